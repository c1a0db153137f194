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

//! Seedshift application wiring.
//!
//! Layout: `cli.rs` (flag surface), `bootstrap.rs` (dependency
//! wiring), `orchestrator.rs` (selection and per-torrent migration
//! pipeline).

/// Application bootstrap and dependency wiring.
pub mod bootstrap;
/// Command-line flag surface.
pub mod cli;
/// Application-level errors and exit codes.
pub mod error;
/// Selection and migration pipeline.
pub mod orchestrator;

pub use bootstrap::run_app;
pub use cli::Cli;
pub use error::{AppError, AppResult};
pub use orchestrator::{MigrationOutcome, MigrationRecord, MigrationRun, RunReport};
