use std::path::PathBuf;

use ini::{Ini, Properties};

pub const SECTION: &str = "Paths";
pub const SCREENSHOT_DIR_KEY: &str = "screenshot_dir";

fn default_screenshot_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Screenshots")
}

fn default_tesseract_path() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Program Files\Tesseract-OCR\tesseract.exe")
    } else {
        PathBuf::from("tesseract")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    /// Directory receiving `screenshot.png`
    pub screenshot_dir: PathBuf,
    /// Local OCR engine binary
    pub tesseract_path: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            screenshot_dir: default_screenshot_dir(),
            tesseract_path: default_tesseract_path(),
        }
    }
}

impl PathsConfig {
    pub(crate) fn from_section(props: Option<&Properties>) -> Self {
        let get = |key: &str| props.and_then(|p| p.get(key)).map(PathBuf::from);

        Self {
            screenshot_dir: get(SCREENSHOT_DIR_KEY).unwrap_or_else(default_screenshot_dir),
            tesseract_path: get("tesseract_path").unwrap_or_else(default_tesseract_path),
        }
    }

    pub(crate) fn write_section(&self, ini: &mut Ini) {
        ini.with_section(Some(SECTION))
            .set(
                SCREENSHOT_DIR_KEY,
                self.screenshot_dir.to_string_lossy().into_owned(),
            )
            .set(
                "tesseract_path",
                self.tesseract_path.to_string_lossy().into_owned(),
            );
    }
}
