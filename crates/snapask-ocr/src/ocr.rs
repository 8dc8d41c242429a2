use std::path::Path;

use snapask_config::Config;

use crate::local::LocalOcr;
use crate::remote::RemoteOcr;

/// Language model requested from both OCR backends (simplified Chinese)
pub const OCR_LANGUAGE: &str = "chi_sim";

/// Text recognition backend
#[async_trait::async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize the text in the image stored at `image_path`
    async fn recognize(&self, image_path: &Path) -> Result<String, OcrError>;

    /// Backend name used in logs
    fn name(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("OCR engine exited with {status}: {stderr}")]
    Engine { status: String, stderr: String },

    #[error("OCR API error: {0}")]
    Status(reqwest::StatusCode),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Pick the backend selected by `use_tesseract`
pub fn recognizer_from_config(config: &Config) -> Box<dyn TextRecognizer> {
    if config.api.use_local_ocr {
        Box::new(LocalOcr::new(config.paths.tesseract_path.clone()))
    } else {
        Box::new(RemoteOcr::new(
            config.api.ocr_api_url.clone(),
            config.api.ocr_api_key.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_follows_config() {
        let mut config = Config::default();

        config.api.use_local_ocr = true;
        assert_eq!(recognizer_from_config(&config).name(), "local");

        config.api.use_local_ocr = false;
        assert_eq!(recognizer_from_config(&config).name(), "remote");
    }
}
