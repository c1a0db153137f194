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

//! Source-client abstraction for the migration pipeline.
//!
//! Layout: `model.rs` (torrent snapshots and identifiers), `select.rs`
//! (threshold selection), `service.rs` (the [`SourceClient`] trait),
//! `deluge.rs` (web JSON-RPC adapter).

pub mod deluge;
pub mod error;
pub mod model;
pub mod select;
pub mod service;

pub use deluge::{DelugeClient, DelugeClientConfig};
pub use error::{SourceError, SourceResult};
pub use model::{TorrentId, TorrentSummary};
pub use select::{SelectionCriteria, select_finished};
pub use service::SourceClient;
