use config::{Config, ConfigError, Environment, File};
use log::warn;
use serde::Deserialize;
use std::time::Duration;

/// Main client configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClientConfig {
    /// Where the backend lives and how long to wait for it
    #[serde(default)]
    pub api: ApiConfig,
    /// Local checks applied before an image is uploaded
    #[serde(default)]
    pub upload: UploadConfig,
    /// Presentation options
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Configuration for the backend API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL the endpoint paths are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl ApiConfig {
    /// Request timeout for the HTTP clients.
    ///
    /// A zero timeout would fail every request, so it is ignored and the
    /// transport's default applies.
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.timeout == 0 {
            warn!("Ignoring api.timeout = 0");
            return None;
        }
        Some(Duration::from_secs(self.timeout))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

/// Configuration for local upload validation
#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Content types accepted for upload
    #[serde(default = "default_accepted_types")]
    pub accepted_types: Vec<String>,
    /// Maximum file size in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            accepted_types: default_accepted_types(),
            max_file_size: default_max_file_size(),
        }
    }
}

/// Configuration for how results are shown
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DisplayConfig {
    /// Show at most this many recipes; all of them when unset
    #[serde(default)]
    pub max_recipes: Option<usize>,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_accepted_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/jpg".to_string(),
        "image/png".to_string(),
    ]
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

impl ClientConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with INGREDIENT_VISION__ prefix
    /// 2. ingredient-vision.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: INGREDIENT_VISION__API__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`ClientConfig::load`] for the precedence rules.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("ingredient-vision").required(false))
        // Use double underscore for nested: INGREDIENT_VISION__UPLOAD__MAX_FILE_SIZE
        .add_source(
            Environment::with_prefix("INGREDIENT_VISION")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
