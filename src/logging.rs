//! File logging. The TUI owns the terminal, so nothing goes to stderr.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::settings;

pub const LOG_FILE: &str = "datecell.log";

/// Default filter when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "datecell=debug" } else { "datecell=warn" }
}

pub fn log_path(config_dir: &Path) -> PathBuf {
    settings::log_dir(config_dir).join(LOG_FILE)
}

/// Install the global subscriber. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init(config_dir: &Path, verbose: bool) -> Result<WorkerGuard> {
    let dir = settings::log_dir(config_dir);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .ok();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn verbose_raises_level() {
        assert_eq!(default_filter(false), "datecell=warn");
        assert_eq!(default_filter(true), "datecell=debug");
    }

    #[test]
    fn log_file_lives_under_config_dir() {
        let temp = TempDir::new().unwrap();
        let path = log_path(temp.path());
        assert!(path.starts_with(temp.path()));
        assert!(path.ends_with("logs/datecell.log"));
    }

    #[test]
    fn init_creates_log_dir() {
        let temp = TempDir::new().unwrap();
        let _guard = init(temp.path(), false).unwrap();
        assert!(settings::log_dir(temp.path()).is_dir());
    }
}
