//! Typed run-configuration models.
//!
//! # Design
//! - `RunOptions` carries raw parameters exactly as collected from the CLI.
//! - `RunConfig` is the validated, fully-resolved form consumed by the
//!   pipeline; it is immutable once produced by [`crate::resolve`].

use std::path::PathBuf;
use std::time::Duration;

/// Raw, unvalidated run parameters as collected from the CLI surface.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Minimum upload ratio required to select a torrent.
    pub ratio: f64,
    /// Minimum number of days a torrent must have been seeding.
    pub days: u32,
    /// Maximum number of torrents migrated in one run.
    pub max: usize,
    /// Watch folder, joined under the home directory unless absolute.
    pub watch_folder: PathBuf,
    /// Whether per-label subdirectories of the watch folder are used.
    pub label_subfolders: bool,
    /// Override for the source client's torrent state directory.
    pub state_dir: Option<PathBuf>,
    /// Whether written torrents are re-decoded before source removal.
    pub verify_written: bool,
}

/// Immutable run configuration consumed by the migration pipeline.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Minimum upload ratio required to select a torrent.
    pub min_ratio: f64,
    /// Minimum elapsed seeding time required to select a torrent.
    pub min_seeding: Duration,
    /// Maximum number of torrents migrated in one run.
    pub max_migrations: usize,
    /// Root of the destination watch folder.
    pub watch_root: PathBuf,
    /// Whether per-label subdirectories of the watch folder are used.
    pub label_subfolders: bool,
    /// Directory holding the source client's per-torrent `.torrent` files.
    pub state_dir: PathBuf,
    /// Whether written torrents are re-decoded before source removal.
    pub verify_written: bool,
}
