//! User-facing strings shared by the clients, the workflow and the view model.

pub const INVALID_FILE_TYPE: &str = "Please upload a valid image file (JPEG or PNG)";

pub const UPLOAD_ERROR: &str = "Failed to upload image. Please try again.";
pub const PROCESSING_ERROR: &str = "Failed to process image. Please try again.";
pub const RECIPES_ERROR: &str = "Failed to fetch recipes. Please try again.";
pub const DETAIL_ERROR: &str = "Failed to get recipe details";
pub const HEALTH_ERROR: &str = "Health check failed";

pub const NO_INGREDIENTS: &str = "No ingredients detected. Add some manually below.";
pub const NO_RECIPES: &str =
    "No recipes found with the given ingredients. Try adding more ingredients!";
pub const PROCESSING_TIME: &str = "This may take 5-10 seconds...";

/// Message for a file over the size ceiling, e.g. "File size must be less than 10MB"
pub fn file_too_large(max_bytes: u64) -> String {
    let mb = max_bytes as f64 / 1024.0 / 1024.0;
    if mb.fract() == 0.0 {
        format!("File size must be less than {}MB", mb as u64)
    } else {
        format!("File size must be less than {:.1}MB", mb)
    }
}
