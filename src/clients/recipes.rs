use async_trait::async_trait;
use log::{debug, info};

use super::http::{ApiTransport, Call};
use super::RecipeService;
use crate::model::{HealthStatus, RankedRecipe, RecipeDetail, SearchRequest, SearchResponse};
use crate::ClientError;

/// Talks to `/recipes`, `/recipes/{id}` and `/health`
#[derive(Debug, Clone)]
pub struct RecipeSearchClient {
    transport: ApiTransport,
}

impl RecipeSearchClient {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    /// Liveness probe; not part of the workflow
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.transport
            .send_json(self.transport.get("/health"), Call::Health)
            .await
    }
}

#[async_trait]
impl RecipeService for RecipeSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RankedRecipe>, ClientError> {
        debug!("Searching recipes with {:?}", request);
        let response: SearchResponse = self
            .transport
            .send_json(self.transport.post("/recipes").json(request), Call::Search)
            .await?;
        info!("Search returned {} recipes", response.recipes.len());
        Ok(response.recipes)
    }

    async fn get_detail(&self, id: i64) -> Result<RecipeDetail, ClientError> {
        debug!("Fetching detail for recipe {}", id);
        self.transport
            .send_json(self.transport.get(&format!("/recipes/{}", id)), Call::Detail)
            .await
    }
}
