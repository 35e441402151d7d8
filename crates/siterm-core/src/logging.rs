//! Logging init: append to a file under the XDG state dir, or fall back to stderr.
//!
//! The filter comes from `SITERM_LOG`, then `RUST_LOG`, then [`DEFAULT_FILTER`].

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,siterm=debug,siterm_core=debug";

/// Environment variable holding siterm's own filter directives.
pub const LOG_ENV: &str = "SITERM_LOG";

/// Builds the filter from `directives` (e.g. the `SITERM_LOG` value), falling
/// back to `RUST_LOG` and then to the default.
fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn filter() -> EnvFilter {
    filter_from(std::env::var(LOG_ENV).ok().as_deref())
}

/// `$XDG_STATE_HOME/siterm/siterm.log`; the directory is created if missing.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("siterm")?;
    xdg_dirs
        .place_state_file("siterm.log")
        .context("create siterm state directory")
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}

/// Initialize logging to [`log_file_path`]. Returns Err when the file cannot
/// be opened or a subscriber is already set, so the caller can fall back to
/// [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let file = open_log_file(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {}", e))?;

    tracing::info!(path = %path.display(), "siterm logging initialized");
    Ok(())
}

/// Initialize logging to stderr only.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
