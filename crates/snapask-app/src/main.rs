use std::io;

use clap::Parser;
use snapask_config::ConfigStore;

pub mod logging;
pub mod pipeline;
pub mod settings;


use self::pipeline::{OverlaySelector, PipelineOutcome};

/// Drag-select a screen region, OCR it, and ask a chat model about the text
#[derive(Debug, Parser)]
#[command(name = "snapask", disable_help_flag = true, disable_version_flag = true)]
pub(crate) struct Cli {
    /// Choose a new screenshot directory instead of capturing
    #[arg(long = "config-dir")]
    pub(crate) config_dir: bool,

    /// Anything else on the command line is ignored and the pipeline runs
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    _rest: Vec<String>,
}

// Single-threaded: the overlay's event loop has to own the main thread
#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();
    let store = ConfigStore::from_env();
    let mut stdout = io::stdout();

    if cli.config_dir {
        let changed =
            settings::change_screenshot_dir(&store, settings::pick_directory, &mut stdout);
        if let Err(e) = changed {
            tracing::error!("Failed to change screenshot directory: {e:#}");
            println!("Program error: {e:#}");
        }
        return;
    }

    match pipeline::run(&store, &mut OverlaySelector, &mut stdout).await {
        Ok(PipelineOutcome::Answered(_)) => tracing::debug!("Pipeline finished"),
        Ok(outcome) => tracing::info!("Pipeline stopped: {:?}", outcome),
        Err(e) => {
            tracing::error!("Pipeline error: {e:#}");
            println!("Program error: {e:#}");
        }
    }
}
