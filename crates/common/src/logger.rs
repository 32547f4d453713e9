use crate::error::ReviewRagError;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log file written inside the configured log directory
pub const LOG_FILE_NAME: &str = "reviewrag.log";

/// `RUST_LOG` wins over the configured level; an unknown level is a config error.
fn level_filter(log_level: &str) -> Result<EnvFilter, ReviewRagError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(log_level)
        .map_err(|e| ReviewRagError::config(format!("Invalid LOG_LEVEL '{}': {}", log_level, e)))
}

/// Append handle on `<log_dir>/reviewrag.log`, creating the directory if needed
fn open_log_file(log_dir: &Path) -> Result<(File, PathBuf), ReviewRagError> {
    std::fs::create_dir_all(log_dir).map_err(|e| {
        ReviewRagError::config(format!(
            "Failed to create log directory {}: {}",
            log_dir.display(),
            e
        ))
    })?;

    let path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| {
            ReviewRagError::config(format!("Failed to open log file {}: {}", path.display(), e))
        })?;

    Ok((file, path))
}

/// Initialize logging for the server
///
/// Compact lines on the console, full records (thread ids, source
/// locations, no colors) in `reviewrag.log`.
pub fn setup_logging(log_dir: &Path, log_level: &str) -> Result<(), ReviewRagError> {
    let (file, path) = open_log_file(log_dir)?;

    let console = fmt::layer()
        .compact()
        .with_target(false)
        .with_filter(level_filter(log_level)?);

    let file = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(level_filter(log_level)?);

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| ReviewRagError::config(format!("Failed to install logger: {}", e)))?;

    tracing::info!(level = log_level, file = %path.display(), "Logging initialized");
    Ok(())
}

/// Console-only logging on stderr
///
/// Used by the one-shot CLI commands so that stdout only carries results
pub fn setup_console_logging(log_level: &str) -> Result<(), ReviewRagError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(level_filter(log_level)?)
        .try_init()
        .map_err(|e| ReviewRagError::config(format!("Failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_log_file_creates_nested_dir() {
        let dir = tempdir().unwrap();
        let log_dir = dir.path().join("var").join("log");

        let (_file, path) = open_log_file(&log_dir).unwrap();

        assert_eq!(path, log_dir.join(LOG_FILE_NAME));
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_level_is_config_error() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let err = level_filter("reviewrag=loud").unwrap_err();
        assert!(matches!(err, ReviewRagError::Config(_)));
        assert!(level_filter("debug").is_ok());
    }

    #[test]
    fn test_setup_logging_creates_log_file() {
        let dir = tempdir().unwrap();
        let log_dir = dir.path().join("log");

        // A global subscriber may already be installed by another test;
        // the file is opened before that matters.
        let _ = setup_logging(&log_dir, "debug");

        assert!(log_dir.join(LOG_FILE_NAME).exists());
    }
}
