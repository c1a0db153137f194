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

//! Run-configuration models and resolution for seedshift.
//!
//! Layout: `model.rs` (raw options and resolved config), `resolve.rs`
//! (validation and filesystem path resolution against `$HOME`).

pub mod error;
pub mod model;
pub mod resolve;

pub use error::{ConfigError, ConfigResult};
pub use model::{RunConfig, RunOptions};
pub use resolve::{resolve, resolve_with_home};
