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

//! Binary entrypoint that runs one migration batch and exits with a
//! status reflecting connectivity, never per-torrent outcomes.

use std::process;

use clap::Parser;
use seedshift_app::{Cli, run_app};

/// Parses the CLI, runs the batch, and maps failures to exit codes.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run_app(cli).await {
        eprintln!("error: {}", err.display_message());
        process::exit(err.exit_code());
    }
}
