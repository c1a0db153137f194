//! Error types for source-client operations.

use thiserror::Error;

/// Result alias for source-client operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Primary error type for source-client operations.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The HTTP client could not be constructed.
    #[error("source client construction failed")]
    Client {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying HTTP client error.
        source: reqwest::Error,
    },
    /// The configured endpoint URL was invalid.
    #[error("invalid source endpoint")]
    Endpoint {
        /// Offending endpoint value.
        value: String,
        /// Underlying URL parse error.
        source: url::ParseError,
    },
    /// A request could not be transported or its body read.
    #[error("source transport failure")]
    Transport {
        /// RPC method being invoked.
        operation: &'static str,
        /// Underlying HTTP error.
        source: reqwest::Error,
    },
    /// The endpoint answered with a non-success HTTP status.
    #[error("source returned error status")]
    Status {
        /// RPC method being invoked.
        operation: &'static str,
        /// HTTP status code returned by the endpoint.
        status: u16,
    },
    /// The web interface rejected the configured password.
    #[error("source authentication rejected")]
    AuthRejected,
    /// The web interface is not attached to a running daemon.
    #[error("source web interface not connected to a daemon")]
    Disconnected,
    /// The daemon reported a remote error for an RPC call.
    #[error("source rpc failure")]
    Remote {
        /// RPC method being invoked.
        operation: &'static str,
        /// Remote error code when supplied.
        code: i64,
        /// Remote error message.
        message: String,
    },
    /// A response payload did not match the expected shape.
    #[error("source response decode failure")]
    Decode {
        /// RPC method being invoked.
        operation: &'static str,
        /// Static reason for the failure.
        reason: &'static str,
    },
}

impl SourceError {
    /// Whether this error class indicates the source client was
    /// unreachable or refused the session, as opposed to a
    /// per-operation remote failure.
    #[must_use]
    pub const fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            Self::Client { .. }
                | Self::Endpoint { .. }
                | Self::Transport { .. }
                | Self::Status { .. }
                | Self::AuthRejected
                | Self::Disconnected
        )
    }
}
