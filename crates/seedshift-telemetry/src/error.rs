//! Error types for telemetry initialisation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Primary error type for telemetry operations.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The log file could not be opened for appending.
    #[error("failed to open log file")]
    OpenLog {
        /// Path of the log file that could not be opened.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The global tracing subscriber could not be installed.
    #[error("failed to install tracing subscriber")]
    Install {
        /// Detail reported by the subscriber registry.
        detail: String,
    },
}
