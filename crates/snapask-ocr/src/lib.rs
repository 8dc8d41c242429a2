mod capture;
mod local;
mod ocr;
mod remote;

pub use capture::{
    SCREENSHOT_FILE, capture_primary_screen, capture_screen_region, crop_region, save_screenshot,
};
pub use local::LocalOcr;
pub use ocr::{OCR_LANGUAGE, OcrError, TextRecognizer, recognizer_from_config};
pub use remote::RemoteOcr;
