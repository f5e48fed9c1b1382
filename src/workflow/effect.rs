use crate::image::ImageFile;
use crate::model::SearchRequest;

/// An external call the workflow wants made.
///
/// Whoever runs it must report back with an event stamped with the same version.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Upload { version: u64, file: ImageFile },
    Detect { version: u64, image_id: String },
    Search { version: u64, request: SearchRequest },
    FetchDetail { version: u64, recipe_id: i64 },
}
