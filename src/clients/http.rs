use log::{debug, warn};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::model::ErrorBody;
use crate::{messages, ClientError};

/// The backend calls, each with its own failure message and error variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Upload,
    Detect,
    Search,
    Detail,
    Health,
}

impl Call {
    /// Generic message used when the server does not provide one
    pub fn fallback_message(self) -> &'static str {
        match self {
            Call::Upload => messages::UPLOAD_ERROR,
            Call::Detect => messages::PROCESSING_ERROR,
            Call::Search => messages::RECIPES_ERROR,
            Call::Detail => messages::DETAIL_ERROR,
            Call::Health => messages::HEALTH_ERROR,
        }
    }

    pub fn error(self, message: impl Into<String>) -> ClientError {
        let message = message.into();
        match self {
            Call::Upload => ClientError::Upload(message),
            Call::Detect => ClientError::Detect(message),
            Call::Search => ClientError::Search(message),
            Call::Detail => ClientError::DetailFetch(message),
            Call::Health => ClientError::Health(message),
        }
    }
}

/// Shared HTTP plumbing: one pooled `reqwest::Client` plus the API base URL
#[derive(Debug, Clone)]
pub struct ApiTransport {
    client: Client,
    base_url: String,
}

impl ApiTransport {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ingredient-vision/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    /// Sends `request` and decodes a JSON body.
    ///
    /// Every failure, whether transport, status or decoding, comes back as
    /// `call`'s error variant. A non-2xx response with a `detail` string
    /// surfaces that string; anything else gets the call's fallback message.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call: Call,
    ) -> Result<T, ClientError> {
        let response = request.send().await.map_err(|e| {
            warn!("{:?} request failed: {}", call, e);
            call.error(call.fallback_message())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{:?} returned {}: {}", call, status, body);
            let message =
                server_message(&body).unwrap_or_else(|| call.fallback_message().to_string());
            return Err(call.error(message));
        }

        let body = response.text().await.map_err(|e| {
            warn!("Failed to read {:?} response: {}", call, e);
            call.error(call.fallback_message())
        })?;
        debug!("{:?} response: {}", call, body);

        serde_json::from_str(&body).map_err(|e| {
            warn!("Unexpected {:?} response shape: {}", call, e);
            call.error(call.fallback_message())
        })
    }
}

/// Extracts a FastAPI-style `{"detail": "..."}` message from an error body
fn server_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .detail?
        .as_str()
        .map(str::trim)
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message() {
        assert_eq!(
            server_message(r#"{"detail": "Invalid file type. Allowed: jpg, jpeg, png"}"#),
            Some("Invalid file type. Allowed: jpg, jpeg, png".to_string())
        );
        assert_eq!(server_message(r#"{"detail": ""}"#), None);
        assert_eq!(server_message(r#"{"detail": [{"loc": ["body"]}]}"#), None);
        assert_eq!(server_message("<html>Bad Gateway</html>"), None);
    }

    #[test]
    fn test_url_joining() {
        let transport = ApiTransport::new("http://localhost:8000/", None).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8000");
        assert_eq!(transport.url("/analyze"), "http://localhost:8000/analyze");
        assert_eq!(transport.url("recipes/7"), "http://localhost:8000/recipes/7");
    }

    #[test]
    fn test_call_error_variants() {
        assert!(matches!(Call::Upload.error("x"), ClientError::Upload(_)));
        assert!(matches!(Call::Detect.error("x"), ClientError::Detect(_)));
        assert!(matches!(Call::Search.error("x"), ClientError::Search(_)));
        assert!(matches!(Call::Detail.error("x"), ClientError::DetailFetch(_)));
        assert_eq!(
            Call::Detect.error(Call::Detect.fallback_message()).to_string(),
            messages::PROCESSING_ERROR
        );
    }
}
