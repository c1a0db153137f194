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

//! Torrent metadata handling for the migration pipeline: bencode
//! decode with round-trip fidelity, `rTorrent` fast-resume injection,
//! and watch-folder placement.
//!
//! Layout: `metainfo.rs` (decoded metadata and typed accessors),
//! `fastresume.rs` (resume-section computation from the on-disk
//! payload), `placement.rs` (destination resolution and atomic
//! writes).

pub mod error;
pub mod fastresume;
pub mod metainfo;
pub mod placement;

pub use error::{ResumeError, ResumeResult};
pub use fastresume::add_fast_resume;
pub use metainfo::{Metainfo, PayloadFile, read_metainfo};
pub use placement::{resolve_destination, verify_written, write_torrent};
