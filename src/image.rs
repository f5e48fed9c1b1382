use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use std::fmt;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;

use crate::ClientError;

/// Represents where the user's photo comes from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image from a file path
    Path(String),
    /// Image as base64-encoded data, optionally as a `data:` URL
    /// (the shape a camera capture is handed over in)
    Base64(String),
}

/// An image held in memory, ready for validation and upload
#[derive(Clone, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl ImageFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Loads an image from its source
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the base64 data is malformed
    pub async fn load(source: &ImageSource) -> Result<Self, ClientError> {
        match source {
            ImageSource::Path(path) => Self::from_path(Path::new(path)).await,
            ImageSource::Base64(data) => Self::from_base64(data),
        }
    }

    /// Reads an image file; the content type comes from the file extension
    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let bytes = fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let content_type = content_type_for(&name);
        debug!("Loaded {} ({}, {} bytes)", name, content_type, bytes.len());
        Ok(Self::new(name, content_type, bytes))
    }

    /// Decodes camera capture data, e.g. `data:image/jpeg;base64,/9j/4AAQ...`
    pub fn from_base64(data: &str) -> Result<Self, ClientError> {
        let (declared, payload) = match data.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest.split_once(',').ok_or_else(|| {
                    ClientError::InvalidFile("Malformed data URL".to_string())
                })?;
                let mime = header.split(';').next().unwrap_or_default();
                (Some(mime.to_string()), payload)
            }
            None => (None, data),
        };

        let bytes = STANDARD.decode(payload.trim())?;
        let content_type = declared
            .filter(|mime| !mime.is_empty())
            .or_else(|| sniff_content_type(&bytes).map(str::to_string))
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let name = format!("photo-{}.{}", millis, extension_for(&content_type));
        Ok(Self::new(name, content_type, bytes))
    }
}

/// Content type inferred from a file name's extension
pub fn content_type_for(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Content type from the image's magic bytes
fn sniff_content_type(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, b'P', b'N', b'G', ..] => Some("image/png"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        _ => None,
    }
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "bin",
    }
}
