mod detect;
mod http;
mod recipes;

pub use detect::UploadDetectClient;
pub use http::{ApiTransport, Call};
pub use recipes::RecipeSearchClient;

use async_trait::async_trait;

use crate::image::ImageFile;
use crate::model::{Detection, RankedRecipe, RecipeDetail, SearchRequest, UploadResponse};
use crate::ClientError;

/// Upload and ingredient detection, the first half of a journey
#[async_trait]
pub trait DetectionService: Send + Sync {
    /// Stores the raw image and returns its remote identifier
    async fn upload(&self, file: &ImageFile) -> Result<UploadResponse, ClientError>;

    /// Runs ingredient detection on an uploaded image
    async fn detect(&self, image_id: &str) -> Result<Detection, ClientError>;
}

/// Recipe search and per-recipe detail, the second half of a journey
#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Returns candidates in the order the service ranked them
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RankedRecipe>, ClientError>;

    /// Fetches the extended record for one recipe
    async fn get_detail(&self, id: i64) -> Result<RecipeDetail, ClientError>;
}
