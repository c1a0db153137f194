//! Client trait implemented by source-daemon adapters.

use async_trait::async_trait;

use crate::error::SourceResult;
use crate::model::{TorrentId, TorrentSummary};

/// Operations the migration pipeline needs from the source client.
///
/// Implemented by the Deluge web adapter in production and by
/// in-memory fakes in pipeline tests.
#[async_trait]
pub trait SourceClient: Send + Sync {
    /// Authenticate and confirm the client can reach a running daemon.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint is unreachable, the
    /// credentials are rejected, or no daemon is attached.
    async fn connect(&self) -> SourceResult<()>;

    /// Snapshot every torrent currently in the seeding state.
    ///
    /// The returned order is whatever the source enumeration yields
    /// and must not be relied upon.
    ///
    /// # Errors
    ///
    /// Returns an error when the status query fails remotely or its
    /// response cannot be decoded.
    async fn seeding_torrents(&self) -> SourceResult<Vec<TorrentSummary>>;

    /// Remove a torrent from the source client's bookkeeping.
    ///
    /// Payload files are deleted only when `delete_data` is set; the
    /// migration pipeline always passes `false`.
    ///
    /// # Errors
    ///
    /// Returns an error when the daemon refuses or fails the removal.
    async fn remove_torrent(&self, id: &TorrentId, delete_data: bool) -> SourceResult<()>;
}
