//! # Design
//!
//! - Centralize application-level errors for bootstrap and the run
//!   orchestrator.
//! - Keep error messages constant while carrying source errors for
//!   context.
//! - Exit codes distinguish usage problems from connectivity failures;
//!   per-torrent failures never surface here (they are reported and
//!   logged, not raised).

use std::error::Error;

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Run-parameter resolution failed.
    #[error("configuration resolution failed")]
    Config {
        /// Source configuration error.
        source: seedshift_config::ConfigError,
    },
    /// Telemetry initialisation failed.
    #[error("telemetry initialisation failed")]
    Telemetry {
        /// Source telemetry error.
        source: seedshift_telemetry::TelemetryError,
    },
    /// The source client could not be constructed.
    #[error("source client construction failed")]
    Client {
        /// Source client error.
        source: seedshift_source::SourceError,
    },
    /// The source client could not establish a session.
    #[error("source connection failed")]
    Connect {
        /// Source client error.
        source: seedshift_source::SourceError,
    },
    /// The seeding status query failed after a successful connect.
    #[error("seeding status query failed")]
    Query {
        /// Source client error.
        source: seedshift_source::SourceError,
    },
}

impl AppError {
    /// Process exit code for this failure class.
    ///
    /// Usage and setup problems exit 2; connectivity failures exit 1.
    /// A run that processed torrents always exits 0, whatever the
    /// per-torrent outcomes were.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } | Self::Telemetry { .. } => 2,
            Self::Client { .. } | Self::Connect { .. } | Self::Query { .. } => 1,
        }
    }

    /// Render the error with its source chain for terminal output.
    #[must_use]
    pub fn display_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = Error::source(self);
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }
}
