pub mod builder;
pub mod clients;
pub mod config;
pub mod error;
pub mod image;
pub mod ingredients;
pub mod merge;
pub mod messages;
pub mod model;
pub mod upload;
pub mod view;
pub mod workflow;

use std::path::Path;
use std::time::Duration;

use log::debug;

pub use builder::{IngredientVision, IngredientVisionBuilder, Journey};
pub use clients::{DetectionService, RecipeSearchClient, RecipeService, UploadDetectClient};
pub use config::ClientConfig;
pub use error::ClientError;
pub use image::{ImageFile, ImageSource};
pub use ingredients::{IngredientSet, SearchFilters};
pub use merge::{match_percentage, merge};
pub use model::{Detection, RankedRecipe, RecipeDetail, SearchRequest};
pub use upload::UploadPolicy;
pub use view::AppView;
pub use workflow::{AppState, Effect, Event, Stage, Workflow};

fn configured_clients() -> Result<(UploadDetectClient, RecipeSearchClient), ClientError> {
    IngredientVision::builder()
        .config(ClientConfig::load()?)
        .clients()
}

/// Upload a photo and return the detected ingredients.
///
/// Uses configuration from `ingredient-vision.toml` / `INGREDIENT_VISION__*`.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let detection = ingredient_vision::detect_ingredients("fridge.jpg").await?;
/// println!("{:?}", detection.ingredients_normalized);
/// # Ok(())
/// # }
/// ```
pub async fn detect_ingredients(path: impl AsRef<Path>) -> Result<Detection, ClientError> {
    let config = ClientConfig::load()?;
    let file = ImageFile::from_path(path.as_ref()).await?;
    UploadPolicy::from(&config.upload).validate(&file)?;

    let (detection, _) = configured_clients()?;
    let uploaded = detection.upload(&file).await?;
    debug!("Uploaded as {}", uploaded.image_id);
    detection.detect(&uploaded.image_id).await
}

/// Search recipes for a list of ingredients, in the service's ranking order.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipes = ingredient_vision::find_recipes(&["steak", "tortilla"], None, None).await?;
/// for recipe in recipes {
///     println!("{}", recipe.display_title());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn find_recipes(
    ingredients: &[&str],
    cuisine: Option<&str>,
    meal_type: Option<&str>,
) -> Result<Vec<RankedRecipe>, ClientError> {
    let mut set = IngredientSet::new();
    set.seed(ingredients);
    let mut filters = SearchFilters::default();
    filters.set_cuisine(cuisine);
    filters.set_meal_type(meal_type);
    let request = set.confirm(&filters)?;

    let (_, recipes) = configured_clients()?;
    recipes.search(&request).await
}

/// Check that the backend is up
pub async fn check_health(base_url: &str, timeout: Option<Duration>) -> Result<String, ClientError> {
    let transport = clients::ApiTransport::new(base_url, timeout)?;
    let health = RecipeSearchClient::new(transport).health().await?;
    Ok(health.status)
}
