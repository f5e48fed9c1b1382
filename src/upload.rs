use crate::config::UploadConfig;
use crate::image::ImageFile;
use crate::{messages, ClientError};

/// Checks an image against the accepted types and size ceiling before it is
/// allowed anywhere near the network.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    accepted_types: Vec<String>,
    max_file_size: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::from(&UploadConfig::default())
    }
}

impl From<&UploadConfig> for UploadPolicy {
    fn from(config: &UploadConfig) -> Self {
        Self {
            accepted_types: config
                .accepted_types
                .iter()
                .map(|t| t.trim().to_lowercase())
                .collect(),
            max_file_size: config.max_file_size,
        }
    }
}

impl UploadPolicy {
    pub fn accepted_types(&self) -> &[String] {
        &self.accepted_types
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// # Errors
    /// Returns `ClientError::InvalidFile` carrying the message to show the user
    pub fn validate(&self, file: &ImageFile) -> Result<(), ClientError> {
        let content_type = file.content_type.trim().to_lowercase();
        if !self.accepted_types.contains(&content_type) {
            return Err(ClientError::InvalidFile(
                messages::INVALID_FILE_TYPE.to_string(),
            ));
        }

        if file.size() > self.max_file_size {
            return Err(ClientError::InvalidFile(messages::file_too_large(
                self.max_file_size,
            )));
        }

        Ok(())
    }
}
