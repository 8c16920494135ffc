use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub(crate) const LOG_ENV: &str = "EXPENSETUI_LOG";
pub(crate) const LOG_FILE: &str = "expensetui.log";

/// Send tracing output to a log file in `dir`. The terminal belongs to the
/// TUI, so nothing is ever written to stdout or stderr.
pub(crate) fn init(dir: &Path) -> Result<()> {
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Arc::new(file)),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(())
}
