//! Core source-client domain types.
//!
//! # Design
//! - Pure data carriers; wire-format quirks stay in the adapter.
//! - Snapshots are read-only views over the source client's state.

use std::fmt;
use std::path::PathBuf;

/// Opaque identifier for a torrent in the source client.
///
/// Deluge uses the hex-encoded info hash; nothing here depends on
/// that beyond the identifier doubling as the state-file stem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TorrentId(String);

impl TorrentId {
    /// Wrap a raw identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TorrentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TorrentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Per-torrent snapshot reported by the source client.
#[derive(Debug, Clone)]
pub struct TorrentSummary {
    /// Identifier assigned by the source client.
    pub id: TorrentId,
    /// Display name from the torrent's `info` dictionary.
    pub name: String,
    /// Upload ratio accumulated while the torrent was active.
    pub ratio: f64,
    /// Elapsed seeding time in seconds.
    pub seeding_secs: u64,
    /// Directory the payload was downloaded into.
    pub save_path: PathBuf,
    /// User-assigned category label; empty when unlabelled.
    pub label: String,
}
