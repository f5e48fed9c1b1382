use async_trait::async_trait;
use log::{debug, info};
use reqwest::multipart::{Form, Part};
use serde_json::json;

use super::http::{ApiTransport, Call};
use super::DetectionService;
use crate::image::ImageFile;
use crate::model::{Detection, UploadResponse};
use crate::ClientError;

/// Talks to `/upload-image` and `/analyze`
#[derive(Debug, Clone)]
pub struct UploadDetectClient {
    transport: ApiTransport,
}

impl UploadDetectClient {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl DetectionService for UploadDetectClient {
    async fn upload(&self, file: &ImageFile) -> Result<UploadResponse, ClientError> {
        debug!("Uploading {:?}", file);
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(|_| Call::Upload.error(Call::Upload.fallback_message()))?;
        let form = Form::new().part("image", part);

        let uploaded: UploadResponse = self
            .transport
            .send_json(self.transport.post("/upload-image").multipart(form), Call::Upload)
            .await?;
        info!("Uploaded {} as {}", file.name, uploaded.image_id);
        Ok(uploaded)
    }

    async fn detect(&self, image_id: &str) -> Result<Detection, ClientError> {
        debug!("Detecting ingredients in {}", image_id);
        let detection: Detection = self
            .transport
            .send_json(
                self.transport
                    .post("/analyze")
                    .json(&json!({ "s3_key": image_id })),
                Call::Detect,
            )
            .await?;
        info!(
            "Detected {} ingredients ({} raw labels)",
            detection.ingredients_normalized.len(),
            detection.ingredients_raw.len()
        );
        Ok(detection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages;
    use mockito::{Matcher, Server};

    fn client(server: &Server) -> UploadDetectClient {
        UploadDetectClient::new(ApiTransport::new(server.url(), None).unwrap())
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_image_field() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/upload-image")
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="image""#.to_string()),
                Matcher::Regex(r#"filename="steak_taco.jpg""#.to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"image_id": "uploads/abc.jpg", "status": "uploaded", "url": "https://s3/abc"}"#)
            .create_async()
            .await;

        let file = ImageFile::new("steak_taco.jpg", "image/jpeg", b"jpegdata".to_vec());
        let uploaded = client(&server).upload(&file).await.unwrap();

        assert_eq!(uploaded.image_id, "uploads/abc.jpg");
        assert_eq!(uploaded.status, "uploaded");
        assert_eq!(uploaded.url.as_deref(), Some("https://s3/abc"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_error_prefers_server_detail() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/upload-image")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail": "Invalid file type. Allowed: jpg, jpeg, png"}"#)
            .create_async()
            .await;

        let file = ImageFile::new("a.png", "image/png", b"png".to_vec());
        let err = client(&server).upload(&file).await.unwrap_err();

        assert!(matches!(err, ClientError::Upload(_)));
        assert_eq!(err.to_string(), "Invalid file type. Allowed: jpg, jpeg, png");
    }

    #[tokio::test]
    async fn test_detect_posts_s3_key() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/analyze")
            .match_body(Matcher::Json(json!({"s3_key": "uploads/abc.jpg"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"ingredients_raw": ["Steak", "Tortilla", "Onion"],
                    "ingredients_normalized": ["steak", "tortilla", "onion"]}"#,
            )
            .create_async()
            .await;

        let detection = client(&server).detect("uploads/abc.jpg").await.unwrap();
        assert_eq!(detection.ingredients_normalized, vec!["steak", "tortilla", "onion"]);
        assert_eq!(detection.ingredients_raw[0], "Steak");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_detect_error_falls_back_to_generic_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/analyze")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let err = client(&server).detect("uploads/abc.jpg").await.unwrap_err();
        assert!(matches!(err, ClientError::Detect(_)));
        assert_eq!(err.to_string(), messages::PROCESSING_ERROR);
    }
}
