use crate::constants::DEFAULT_LOG_FILTER;
use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
/// With `log_file`, events are appended to that file instead of stderr.
pub fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };
    installed.map_err(|e| anyhow!("install tracing subscriber: {}", e))
}
