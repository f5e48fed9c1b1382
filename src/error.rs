use thiserror::Error;

/// Errors that can occur while driving an ingredient-to-recipe journey
///
/// The stage variants (`InvalidFile`, `Upload`, `Detect`, `Search`,
/// `DetailFetch`, `Health`) carry the message shown to the user, so their
/// `Display` output is exactly that message.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The selected file was rejected locally and never sent
    #[error("{0}")]
    InvalidFile(String),

    /// The image upload call failed
    #[error("{0}")]
    Upload(String),

    /// The ingredient detection call failed
    #[error("{0}")]
    Detect(String),

    /// The recipe search call failed
    #[error("{0}")]
    Search(String),

    /// Fetching extended detail for one recipe failed
    #[error("{0}")]
    DetailFetch(String),

    /// The liveness probe failed
    #[error("{0}")]
    Health(String),

    /// Confirm was requested with no ingredients
    #[error("Add at least one ingredient before searching")]
    EmptyIngredients,

    /// Transport-level failure outside of a stage call
    #[error("Failed to reach the API: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to read an image file from disk
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    /// Camera capture data was not valid base64
    #[error("Invalid image data: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
