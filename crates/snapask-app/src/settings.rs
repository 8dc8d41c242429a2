use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use snapask_config::ConfigStore;

/// Native folder picker
pub fn pick_directory() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select screenshot directory")
        .pick_folder()
}

/// Ask for a new screenshot directory and persist it if one was chosen
pub fn change_screenshot_dir<P, W>(
    store: &ConfigStore,
    pick: P,
    out: &mut W,
) -> Result<Option<PathBuf>>
where
    P: FnOnce() -> Option<PathBuf>,
    W: Write,
{
    let config = store
        .load()
        .with_context(|| format!("Failed to load {}", store.path().display()))?;
    tracing::debug!(
        "Current screenshot directory: {}",
        config.paths.screenshot_dir.display()
    );

    let Some(dir) = pick() else {
        tracing::info!("No directory chosen");
        return Ok(None);
    };

    store.set_screenshot_dir(&dir)?;
    writeln!(out, "Screenshot directory changed to: {}", dir.display())?;
    Ok(Some(dir))
}
