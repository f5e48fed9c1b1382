use crate::clients::Call;
use crate::image::ImageFile;
use crate::model::{Detection, RankedRecipe, RecipeDetail, UploadResponse};

/// Everything that can happen to a journey: user actions and call results.
///
/// Call results carry the version their effect was issued under.
#[derive(Debug, Clone)]
pub enum Event {
    /// The user picked or captured a photo
    ImageSelected(ImageFile),
    Uploaded {
        version: u64,
        response: UploadResponse,
    },
    Detected {
        version: u64,
        detection: Detection,
    },
    SearchCompleted {
        version: u64,
        recipes: Vec<RankedRecipe>,
    },
    /// Upload, detect or search failed
    Failed {
        version: u64,
        call: Call,
        message: String,
    },
    DetailLoaded {
        version: u64,
        recipe_id: i64,
        detail: RecipeDetail,
    },
    DetailFailed {
        version: u64,
        recipe_id: i64,
        message: String,
    },
    AddIngredient(String),
    RemoveIngredient(usize),
    SetCuisine(Option<String>),
    SetMealType(Option<String>),
    /// Search with the current ingredient set and filters
    Confirm,
    SelectRecipe(usize),
    CloseRecipe,
    DismissError,
    Retake,
    StartOver,
}
