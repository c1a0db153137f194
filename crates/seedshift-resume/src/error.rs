//! Error types for metadata and fast-resume handling.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for resume-data operations.
pub type ResumeResult<T> = Result<T, ResumeError>;

/// Primary error type for metadata and fast-resume operations.
#[derive(Debug, Error)]
pub enum ResumeError {
    /// IO failure while reading or writing a torrent file.
    #[error("metadata io failure")]
    Io {
        /// Operation that triggered the failure.
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The torrent file was not valid bencode.
    #[error("metadata decode failure")]
    Decode {
        /// Underlying codec error.
        source: serde_bencode::Error,
    },
    /// The metadata could not be re-encoded.
    #[error("metadata encode failure")]
    Encode {
        /// Underlying codec error.
        source: serde_bencode::Error,
    },
    /// The metadata decoded but its structure was unusable.
    #[error("structurally invalid metadata")]
    Invalid {
        /// Field that failed validation.
        field: &'static str,
        /// Static reason for the failure.
        reason: &'static str,
    },
    /// A payload file could not be inspected.
    #[error("payload inspection failure")]
    Payload {
        /// Path of the payload file.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A payload file's size did not match the metadata.
    #[error("payload size mismatch")]
    SizeMismatch {
        /// Path of the payload file.
        path: PathBuf,
        /// Size recorded in the metadata.
        expected: u64,
        /// Size observed on disk.
        actual: u64,
    },
    /// A written torrent failed post-write validation.
    #[error("written torrent failed validation")]
    Verify {
        /// Path of the written torrent.
        path: PathBuf,
        /// Piece count expected from the transformed metadata.
        expected_pieces: u64,
        /// Piece count decoded from the written file.
        actual_pieces: u64,
    },
}
