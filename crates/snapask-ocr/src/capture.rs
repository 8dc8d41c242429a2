use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage, imageops};
use snapask_types::SelectionRect;
use xcap::Monitor;

/// Fixed name of the saved capture, overwritten on every run
pub const SCREENSHOT_FILE: &str = "screenshot.png";

/// Capture the entire primary monitor as RGBA
pub fn capture_primary_screen() -> Result<RgbaImage> {
    let monitors = Monitor::all().context("Failed to get monitors")?;
    let monitor = monitors.first().context("No monitor found")?;

    monitor.capture_image().context("Failed to capture screen")
}

/// Capture the primary monitor and crop it to `rect`
pub fn capture_screen_region(rect: SelectionRect) -> Result<RgbaImage> {
    let screen = capture_primary_screen()?;
    crop_region(&screen, rect).with_context(|| {
        format!(
            "Selection {:?} lies outside the {}x{} screen",
            rect,
            screen.width(),
            screen.height()
        )
    })
}

/// Crop `screen` to `rect`, clamped to the image bounds.
///
/// Returns `None` when nothing of the rectangle remains inside the image.
pub fn crop_region(screen: &RgbaImage, rect: SelectionRect) -> Option<RgbaImage> {
    let x = rect.x1.max(0) as u32;
    let y = rect.y1.max(0) as u32;
    let right = (rect.x2.max(0) as u32).min(screen.width());
    let bottom = (rect.y2.max(0) as u32).min(screen.height());

    if x >= right || y >= bottom {
        return None;
    }

    Some(imageops::crop_imm(screen, x, y, right - x, bottom - y).to_image())
}

/// Write `image` as PNG to `{dir}/screenshot.png`
pub fn save_screenshot(image: &RgbaImage, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(SCREENSHOT_FILE);
    image
        .save_with_format(&path, ImageFormat::Png)
        .with_context(|| format!("Failed to save screenshot to {}", path.display()))?;

    tracing::debug!(
        "Saved {}x{} capture to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(path)
}
