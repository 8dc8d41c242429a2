use ini::{Ini, Properties};

use crate::{ConfigError, parse_bool};

pub const SECTION: &str = "API";

fn default_openai_api_key() -> String {
    "your-openai-api-key".to_string()
}

fn default_openai_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_use_local_ocr() -> bool {
    true
}

fn default_ocr_api_url() -> String {
    "your-ocr-api-url".to_string()
}

fn default_ocr_api_key() -> String {
    "your-ocr-api-key".to_string()
}

/// Credentials and backend selection for the remote services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Chat-completion API key
    pub openai_api_key: String,
    /// Chat-completion API base URL, e.g. `https://api.openai.com/v1`
    pub openai_api_base: String,
    /// Use the local OCR engine instead of the remote OCR API
    pub use_local_ocr: bool,
    /// Remote OCR endpoint
    pub ocr_api_url: String,
    /// Bearer token for the remote OCR endpoint
    pub ocr_api_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: default_openai_api_key(),
            openai_api_base: default_openai_api_base(),
            use_local_ocr: default_use_local_ocr(),
            ocr_api_url: default_ocr_api_url(),
            ocr_api_key: default_ocr_api_key(),
        }
    }
}

impl ApiConfig {
    pub(crate) fn from_section(props: Option<&Properties>) -> Result<Self, ConfigError> {
        let get = |key: &str| props.and_then(|p| p.get(key));

        let use_local_ocr = match get("use_tesseract") {
            Some(value) => parse_bool(value).ok_or_else(|| ConfigError::InvalidValue {
                section: SECTION,
                key: "use_tesseract",
                value: value.to_string(),
            })?,
            None => default_use_local_ocr(),
        };

        Ok(Self {
            openai_api_key: get("openai_api_key")
                .map(str::to_string)
                .unwrap_or_else(default_openai_api_key),
            openai_api_base: get("openai_api_base")
                .map(str::to_string)
                .unwrap_or_else(default_openai_api_base),
            use_local_ocr,
            ocr_api_url: get("ocr_api_url")
                .map(str::to_string)
                .unwrap_or_else(default_ocr_api_url),
            ocr_api_key: get("ocr_api_key")
                .map(str::to_string)
                .unwrap_or_else(default_ocr_api_key),
        })
    }

    pub(crate) fn write_section(&self, ini: &mut Ini) {
        ini.with_section(Some(SECTION))
            .set("openai_api_key", self.openai_api_key.as_str())
            .set("openai_api_base", self.openai_api_base.as_str())
            .set("use_tesseract", if self.use_local_ocr { "true" } else { "false" })
            .set("ocr_api_url", self.ocr_api_url.as_str())
            .set("ocr_api_key", self.ocr_api_key.as_str());
    }
}
