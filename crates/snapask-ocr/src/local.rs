use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::ocr::{OCR_LANGUAGE, OcrError, TextRecognizer};

/// Runs the OCR engine binary (`<engine> <image> stdout -l chi_sim`)
pub struct LocalOcr {
    engine_path: PathBuf,
}

impl LocalOcr {
    pub fn new(engine_path: PathBuf) -> Self {
        Self { engine_path }
    }
}

#[async_trait]
impl TextRecognizer for LocalOcr {
    async fn recognize(&self, image_path: &Path) -> Result<String, OcrError> {
        tracing::debug!(
            "Running {} on {}",
            self.engine_path.display(),
            image_path.display()
        );

        let output = Command::new(&self.engine_path)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", OCR_LANGUAGE])
            .output()
            .await?;

        if !output.status.success() {
            return Err(OcrError::Engine {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    use super::*;

    /// Stand-in engine script that echoes its arguments
    fn fake_engine(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-ocr");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_local_ocr_trims_output_and_passes_language() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = fake_engine(tmp.path(), r#"printf '  %s %s %s %s\n\n' "$1" "$2" "$3" "$4""#);

        let text = LocalOcr::new(engine)
            .recognize(Path::new("shot.png"))
            .await
            .unwrap();

        assert_eq!(text, "shot.png stdout -l chi_sim");
    }

    #[tokio::test]
    async fn test_local_ocr_reports_engine_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = fake_engine(tmp.path(), "echo 'no language data' >&2\nexit 1");

        let err = LocalOcr::new(engine)
            .recognize(Path::new("shot.png"))
            .await
            .unwrap_err();

        match err {
            OcrError::Engine { stderr, .. } => assert_eq!(stderr, "no language data"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_engine_is_io_error() {
        let err = LocalOcr::new(PathBuf::from("/nonexistent/ocr-engine"))
            .recognize(Path::new("shot.png"))
            .await
            .unwrap_err();

        assert!(matches!(err, OcrError::Io(_)));
    }
}
