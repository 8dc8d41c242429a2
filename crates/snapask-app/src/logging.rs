use std::env;

use tracing_subscriber::EnvFilter;

/// Set to any value to emit JSON log lines
pub const LOG_JSON_ENV: &str = "SNAPASK_LOG_JSON";

/// Install the stderr subscriber; `RUST_LOG` overrides the default `info` level
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if env::var_os(LOG_JSON_ENV).is_some() {
        builder.json().init();
    } else {
        builder.init();
    }
}
