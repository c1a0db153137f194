//! Application bootstrap wiring.

use seedshift_source::DelugeClient;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::error::{AppError, AppResult};
use crate::orchestrator::MigrationRun;

/// Resolve configuration, initialise telemetry, and drive one run.
///
/// # Errors
///
/// Returns an error if configuration or telemetry setup fails, or if
/// the source client cannot be reached; per-torrent failures are
/// logged and swallowed inside the run.
pub async fn run_app(cli: Cli) -> AppResult<()> {
    let config = seedshift_config::resolve(cli.run_options())
        .map_err(|source| AppError::Config { source })?;
    seedshift_telemetry::init_logging(&cli.logging_config())
        .map_err(|source| AppError::Telemetry { source })?;

    info!(
        min_ratio = config.min_ratio,
        min_seeding_secs = config.min_seeding.as_secs(),
        max = config.max_migrations,
        watch_root = %config.watch_root.display(),
        label_subfolders = config.label_subfolders,
        verify_written = config.verify_written,
        "run started"
    );

    let client =
        DelugeClient::new(cli.client_config()).map_err(|source| AppError::Client { source })?;

    let run = MigrationRun::new(&client, &config);
    match run.execute().await {
        Ok(report) => {
            info!(
                seeding = report.seeding_total,
                processed = report.processed(),
                migrated = report.migrated(),
                "run complete"
            );
            Ok(())
        }
        Err(err) => {
            warn!(error = %err.display_message(), "run aborted");
            Err(err)
        }
    }
}
