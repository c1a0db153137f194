#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Logging primitives shared across the seedshift workspace.
//!
//! The run log is a single append-only file: one timestamped line per
//! event, levelled INFO/WARN, written directly without a background
//! drain so lines are durable the moment the macro returns. `RUST_LOG`
//! overrides the default filter when set.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt};

pub mod error;

pub use error::{TelemetryError, TelemetryResult};

/// Default log level when `RUST_LOG` is not provided.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default location of the append-only run log.
pub const DEFAULT_LOG_PATH: &str = "/tmp/seedshift.log";

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// File receiving run events, opened in append mode.
    pub path: PathBuf,
    /// Default level filter applied when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_PATH),
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Logging configuration targeting the given file with default level.
    #[must_use]
    pub fn for_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Configure and install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or if a global
/// subscriber has already been installed.
pub fn init_logging(config: &LoggingConfig) -> TelemetryResult<()> {
    let subscriber = build_subscriber(config)?;
    tracing::subscriber::set_global_default(subscriber).map_err(|err| TelemetryError::Install {
        detail: err.to_string(),
    })
}

/// Build the file-backed subscriber without installing it globally.
fn build_subscriber(
    config: &LoggingConfig,
) -> TelemetryResult<impl Subscriber + Send + Sync + 'static> {
    let file = open_log_file(&config.path)?;
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    Ok(fmt::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .finish())
}

/// Open the run log for appending, creating it when absent.
fn open_log_file(path: &Path) -> TelemetryResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| TelemetryError::OpenLog {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tracing::info;

    #[test]
    fn default_config_targets_fixed_path() {
        let config = LoggingConfig::default();
        assert_eq!(config.path, PathBuf::from(DEFAULT_LOG_PATH));
        assert_eq!(config.level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn open_log_file_appends_across_handles() -> Result<(), TelemetryError> {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.log");

        drop(open_log_file(&path)?);
        drop(open_log_file(&path)?);

        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn open_log_file_reports_unreachable_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("run.log");

        let err = open_log_file(&path).expect_err("open should fail");
        assert!(matches!(err, TelemetryError::OpenLog { .. }));
    }

    #[test]
    fn subscriber_writes_levelled_lines_to_file() -> Result<(), TelemetryError> {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.log");
        let subscriber = build_subscriber(&LoggingConfig::for_file(&path))?;

        tracing::subscriber::with_default(subscriber, || {
            info!(processed = 3_usize, "run complete");
        });

        let contents = fs::read_to_string(&path).expect("log readable");
        assert!(contents.contains("INFO"));
        assert!(contents.contains("run complete"));
        assert!(contents.contains("processed=3"));
        Ok(())
    }
}
