use std::path::Path;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::ocr::{OCR_LANGUAGE, OcrError, TextRecognizer};

/// HTTP OCR API client
#[derive(Clone)]
pub struct RemoteOcr {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct OcrRequest<'a> {
    image: String,
    language: &'a str,
}

#[derive(Deserialize)]
struct OcrResponse {
    #[serde(default)]
    text: String,
}

impl RemoteOcr {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl TextRecognizer for RemoteOcr {
    async fn recognize(&self, image_path: &Path) -> Result<String, OcrError> {
        let bytes = tokio::fs::read(image_path).await?;
        let request = OcrRequest {
            image: BASE64.encode(&bytes),
            language: OCR_LANGUAGE,
        };

        tracing::debug!("POST {} ({} image bytes)", self.api_url, bytes.len());
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(OcrError::Status(response.status()));
        }

        let body: OcrResponse = response.json().await?;
        Ok(body.text)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn image_file(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("screenshot.png");
        tokio::fs::write(&path, b"png-bytes").await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_remote_ocr_returns_text_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ocr"))
            .and(header("authorization", "Bearer ocr-key"))
            .and(body_json(json!({
                "image": BASE64.encode(b"png-bytes"),
                "language": "chi_sim",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "hello" })))
            .expect(1)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let image = image_file(tmp.path()).await;
        let ocr = RemoteOcr::new(format!("{}/ocr", server.uri()), "ocr-key".to_string());

        assert_eq!(ocr.recognize(&image).await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_remote_ocr_missing_text_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "lines": [] })))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let image = image_file(tmp.path()).await;
        let ocr = RemoteOcr::new(server.uri(), "ocr-key".to_string());

        assert_eq!(ocr.recognize(&image).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_remote_ocr_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let image = image_file(tmp.path()).await;
        let ocr = RemoteOcr::new(server.uri(), "ocr-key".to_string());

        let err = ocr.recognize(&image).await.unwrap_err();
        assert!(matches!(err, OcrError::Status(s) if s == StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_missing_image_is_io_error() {
        let ocr = RemoteOcr::new("http://127.0.0.1:9".to_string(), String::new());

        let err = ocr.recognize(Path::new("/nonexistent/shot.png")).await.unwrap_err();
        assert!(matches!(err, OcrError::Io(_)));
    }
}
