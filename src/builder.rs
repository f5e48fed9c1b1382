use log::info;
use std::time::Duration;

use crate::clients::{ApiTransport, Call, RecipeSearchClient, UploadDetectClient};
use crate::config::ClientConfig;
use crate::image::{ImageFile, ImageSource};
use crate::upload::UploadPolicy;
use crate::view::AppView;
use crate::workflow::{AppState, Event, Stage, Workflow};
use crate::ClientError;

/// Builder for configuring and running one photo-to-recipes journey
#[derive(Debug, Default)]
pub struct IngredientVisionBuilder {
    source: Option<ImageSource>,
    config: Option<ClientConfig>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_recipes: Option<usize>,
    cuisine: Option<String>,
    meal_type: Option<String>,
    add: Vec<String>,
    remove: Vec<String>,
}

impl IngredientVisionBuilder {
    /// Use a photo on disk
    ///
    /// # Example
    /// ```
    /// use ingredient_vision::IngredientVision;
    ///
    /// let builder = IngredientVision::builder()
    ///     .image("/path/to/fridge.jpg");
    /// ```
    pub fn image(mut self, path: impl Into<String>) -> Self {
        self.source = Some(ImageSource::Path(path.into()));
        self
    }

    /// Use a camera capture handed over as base64 or a `data:` URL
    pub fn image_base64(mut self, data: impl Into<String>) -> Self {
        self.source = Some(ImageSource::Base64(data.into()));
        self
    }

    /// Start from a loaded configuration instead of the defaults
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the API base URL
    ///
    /// # Example
    /// ```
    /// use ingredient_vision::IngredientVision;
    ///
    /// let builder = IngredientVision::builder()
    ///     .image("/path/to/fridge.jpg")
    ///     .base_url("http://localhost:8000");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Show at most `max` recipes in the journey's view
    pub fn max_recipes(mut self, max: usize) -> Self {
        self.max_recipes = Some(max);
        self
    }

    pub fn cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    pub fn meal_type(mut self, meal_type: impl Into<String>) -> Self {
        self.meal_type = Some(meal_type.into());
        self
    }

    /// Add an ingredient the detection missed
    pub fn add_ingredient(mut self, name: impl Into<String>) -> Self {
        self.add.push(name.into());
        self
    }

    /// Drop a detected ingredient (matched case-insensitively)
    pub fn remove_ingredient(mut self, name: impl Into<String>) -> Self {
        self.remove.push(name.into());
        self
    }

    /// The configuration the journey will run with, overrides applied.
    ///
    /// A `.timeout()` override is kept as given and not folded into
    /// `api.timeout`, which only holds whole seconds.
    pub fn resolved_config(&self) -> ClientConfig {
        let mut config = self.config.clone().unwrap_or_default();
        if let Some(url) = &self.base_url {
            config.api.base_url = url.clone();
        }
        if self.max_recipes.is_some() {
            config.display.max_recipes = self.max_recipes;
        }
        config
    }

    /// HTTP clients for the resolved configuration
    pub fn clients(&self) -> Result<(UploadDetectClient, RecipeSearchClient), ClientError> {
        let config = self.resolved_config();
        let timeout = self.timeout.or_else(|| config.api.request_timeout());
        let transport = ApiTransport::new(config.api.base_url, timeout)?;
        Ok((
            UploadDetectClient::new(transport.clone()),
            RecipeSearchClient::new(transport),
        ))
    }

    /// Run the journey: upload, detect, apply the edits, search.
    ///
    /// When detection finds nothing and no ingredients were added, the journey
    /// stops in the ingredients stage without searching.
    ///
    /// # Errors
    /// Returns `ClientError` if:
    /// - No image was specified or it cannot be read
    /// - The image fails local validation
    /// - Upload, detection or search fails
    pub async fn build(self) -> Result<Journey, ClientError> {
        let source = self.source.clone().ok_or_else(|| {
            ClientError::BuilderError("No image specified. Use .image() or .image_base64()".to_string())
        })?;

        let config = self.resolved_config();
        let (detection, recipes) = self.clients()?;
        let mut workflow = Workflow::new(detection, recipes, UploadPolicy::from(&config.upload));

        let file = ImageFile::load(&source).await?;
        workflow.dispatch(Event::ImageSelected(file)).await;
        check(workflow.state())?;

        for name in &self.remove {
            if let Some(index) = workflow.state().ingredients().position(name) {
                workflow.dispatch(Event::RemoveIngredient(index)).await;
            }
        }
        for name in self.add {
            workflow.dispatch(Event::AddIngredient(name)).await;
        }
        workflow.dispatch(Event::SetCuisine(self.cuisine)).await;
        workflow.dispatch(Event::SetMealType(self.meal_type)).await;

        if workflow.state().can_confirm() {
            workflow.dispatch(Event::Confirm).await;
            check(workflow.state())?;
            info!("Journey finished with {} recipes", workflow.state().recipes().len());
        } else {
            info!("No ingredients to search with");
        }

        Ok(Journey {
            workflow,
            max_recipes: config.display.max_recipes,
        })
    }
}

/// Turns a stage the journey cannot continue from into an error
fn check(state: &AppState) -> Result<(), ClientError> {
    match state.stage() {
        Stage::Upload => Err(ClientError::InvalidFile(
            state.notice().unwrap_or_default().to_string(),
        )),
        Stage::Error => {
            let error = state.error();
            let call = error.map(|e| e.failed).unwrap_or(Call::Upload);
            let message = error
                .map(|e| e.message.clone())
                .unwrap_or_else(|| call.fallback_message().to_string());
            Err(call.error(message))
        }
        _ => Ok(()),
    }
}

/// A journey that has reached the ingredients or recipes stage
pub struct Journey {
    workflow: Workflow<UploadDetectClient, RecipeSearchClient>,
    max_recipes: Option<usize>,
}

impl Journey {
    pub fn state(&self) -> &AppState {
        self.workflow.state()
    }

    pub fn view(&self) -> AppView {
        AppView::from_state(self.workflow.state(), self.max_recipes)
    }

    /// Open one recipe card and load its detail.
    ///
    /// A failed detail fetch leaves the summary in place.
    pub async fn open_recipe(&mut self, index: usize) -> AppView {
        self.workflow.dispatch(Event::SelectRecipe(index)).await;
        self.view()
    }

    pub async fn close_recipe(&mut self) {
        self.workflow.dispatch(Event::CloseRecipe).await;
    }
}

/// Main entry point for the builder API
pub struct IngredientVision;

impl IngredientVision {
    /// Creates a new builder for a journey
    ///
    /// # Example
    /// ```
    /// use ingredient_vision::IngredientVision;
    ///
    /// let builder = IngredientVision::builder();
    /// ```
    pub fn builder() -> IngredientVisionBuilder {
        IngredientVisionBuilder::default()
    }
}
