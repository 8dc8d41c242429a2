use std::io::Write;

use anyhow::{Context, Result};
use image::RgbaImage;
use snapask_assistant::{Assistant, ChatAssistant};
use snapask_config::{Config, ConfigStore};
use snapask_ocr::{TextRecognizer, recognizer_from_config, save_screenshot};

/// Where the captured region comes from
pub trait RegionSource {
    /// `Ok(None)` means the user cancelled
    fn select(&mut self) -> Result<Option<RgbaImage>>;
}

/// Interactive drag selection over a full-screen overlay
pub struct OverlaySelector;

impl RegionSource for OverlaySelector {
    fn select(&mut self) -> Result<Option<RgbaImage>> {
        snapask_ui::select_region()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Cancelled,
    RecognitionFailed,
    AssistantFailed,
    Answered(String),
}

/// Load config, capture, recognize, ask, print
pub async fn run<S, W>(store: &ConfigStore, source: &mut S, out: &mut W) -> Result<PipelineOutcome>
where
    S: RegionSource,
    W: Write,
{
    let config = store
        .load()
        .with_context(|| format!("Failed to load {}", store.path().display()))?;

    let recognizer = recognizer_from_config(&config);
    let assistant = ChatAssistant::from_config(&config);

    run_with(&config, source, recognizer.as_ref(), &assistant, out).await
}

pub async fn run_with<S, W>(
    config: &Config,
    source: &mut S,
    recognizer: &dyn TextRecognizer,
    assistant: &dyn Assistant,
    out: &mut W,
) -> Result<PipelineOutcome>
where
    S: RegionSource,
    W: Write,
{
    let save_dir = config.ensure_screenshot_dir()?;

    let Some(image) = source.select().context("Region selection failed")? else {
        writeln!(out, "Screenshot cancelled")?;
        return Ok(PipelineOutcome::Cancelled);
    };

    let image_path = save_screenshot(&image, save_dir)?;
    writeln!(out, "Screenshot saved to: {}", image_path.display())?;

    tracing::info!("Recognizing text with {} OCR", recognizer.name());
    let text = match recognizer.recognize(&image_path).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            tracing::warn!("OCR returned no text");
            writeln!(out, "Text recognition failed")?;
            return Ok(PipelineOutcome::RecognitionFailed);
        }
        Err(e) => {
            tracing::error!("OCR error: {e}");
            writeln!(out, "Text recognition failed")?;
            return Ok(PipelineOutcome::RecognitionFailed);
        }
    };
    writeln!(out, "Recognized text: {text}")?;

    tracing::info!("Asking {}", assistant.model());
    match assistant.ask(&text).await {
        Ok(reply) if !reply.text.is_empty() => {
            tracing::info!("Reply from {} ({} chars)", reply.model, reply.text.chars().count());
            writeln!(out, "Assistant reply: {}", reply.text)?;
            Ok(PipelineOutcome::Answered(reply.text))
        }
        Ok(_) => {
            tracing::warn!("Assistant returned an empty reply");
            writeln!(out, "Failed to get assistant reply")?;
            Ok(PipelineOutcome::AssistantFailed)
        }
        Err(e) => {
            tracing::error!("Assistant API error: {e}");
            writeln!(out, "Failed to get assistant reply")?;
            Ok(PipelineOutcome::AssistantFailed)
        }
    }
}
