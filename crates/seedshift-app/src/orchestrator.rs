//! Selection and per-torrent migration pipeline.
//!
//! Torrents move through `selected → metadata read → resume computed →
//! written → removed`; the first failed step becomes the torrent's
//! terminal outcome. Failures are per-torrent: they are logged,
//! recorded, and never abort the rest of the batch. Only connectivity
//! failures (connect or the initial status query) escape as errors.

use std::fs;
use std::path::{Path, PathBuf};

use seedshift_config::RunConfig;
use seedshift_resume::{
    Metainfo, ResumeError, ResumeResult, add_fast_resume, read_metainfo, resolve_destination,
    verify_written, write_torrent,
};
use seedshift_source::{
    SelectionCriteria, SourceClient, SourceError, TorrentId, TorrentSummary, select_finished,
};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Terminal state of one torrent's trip through the pipeline.
#[derive(Debug)]
pub enum MigrationOutcome {
    /// The rewritten torrent landed in the watch folder and the
    /// source entry was removed.
    Migrated {
        /// Final path of the rewritten torrent.
        destination: PathBuf,
    },
    /// The original metadata could not be read or was invalid.
    MetadataFailed {
        /// Underlying metadata error.
        source: ResumeError,
    },
    /// Fast-resume computation failed against the on-disk payload.
    ResumeFailed {
        /// Underlying resume error.
        source: ResumeError,
    },
    /// The rewritten torrent could not be placed in the watch folder.
    WriteFailed {
        /// Underlying placement error.
        source: ResumeError,
    },
    /// Placement succeeded but the source client kept its entry; the
    /// torrent now exists in both clients.
    RemoveFailed {
        /// Final path of the rewritten torrent.
        destination: PathBuf,
        /// Underlying removal error.
        source: SourceError,
    },
}

impl MigrationOutcome {
    /// Whether the torrent completed the full pipeline.
    #[must_use]
    pub const fn is_migrated(&self) -> bool {
        matches!(self, Self::Migrated { .. })
    }
}

/// Outcome of one selected torrent.
#[derive(Debug)]
pub struct MigrationRecord {
    /// Source-client identifier.
    pub id: TorrentId,
    /// Torrent display name.
    pub name: String,
    /// Terminal pipeline state.
    pub outcome: MigrationOutcome,
}

/// Summary of one batch run.
#[derive(Debug)]
pub struct RunReport {
    /// Number of seeding torrents reported by the source client.
    pub seeding_total: usize,
    /// Per-torrent outcomes in processing order.
    pub records: Vec<MigrationRecord>,
}

impl RunReport {
    /// Number of torrents that entered the pipeline.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.records.len()
    }

    /// Number of torrents that completed migration.
    #[must_use]
    pub fn migrated(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.outcome.is_migrated())
            .count()
    }
}

/// One batch run over a connected source client.
pub struct MigrationRun<'a> {
    client: &'a dyn SourceClient,
    config: &'a RunConfig,
}

impl<'a> MigrationRun<'a> {
    /// Bind a run to its source client and configuration.
    #[must_use]
    pub const fn new(client: &'a dyn SourceClient, config: &'a RunConfig) -> Self {
        Self { client, config }
    }

    /// Execute the selection and migration pipeline end to end.
    ///
    /// # Errors
    ///
    /// Returns an error only for connectivity failures: establishing
    /// the session or issuing the initial status query. Per-torrent
    /// failures are recorded in the report instead.
    pub async fn execute(&self) -> AppResult<RunReport> {
        self.client
            .connect()
            .await
            .map_err(|source| AppError::Connect { source })?;

        let torrents = self
            .client
            .seeding_torrents()
            .await
            .map_err(|source| AppError::Query { source })?;
        let seeding_total = torrents.len();
        info!(count = seeding_total, "fetched seeding torrents");

        let criteria = SelectionCriteria {
            min_ratio: self.config.min_ratio,
            min_seeding_secs: self.config.min_seeding.as_secs(),
            limit: self.config.max_migrations,
        };
        info!(
            max = criteria.limit,
            min_ratio = criteria.min_ratio,
            min_seeding_secs = criteria.min_seeding_secs,
            "selecting finished torrents"
        );

        let selected = select_finished(torrents, &criteria);
        let mut records = Vec::with_capacity(selected.len());
        for (position, torrent) in selected.into_iter().enumerate() {
            info!(
                position = position + 1,
                torrent_id = %torrent.id,
                name = %torrent.name,
                ratio = torrent.ratio,
                seeding_secs = torrent.seeding_secs,
                "selected torrent"
            );

            let outcome = self.migrate_one(&torrent).await;
            log_outcome(&torrent, &outcome);
            records.push(MigrationRecord {
                id: torrent.id,
                name: torrent.name,
                outcome,
            });
        }

        Ok(RunReport {
            seeding_total,
            records,
        })
    }

    async fn migrate_one(&self, torrent: &TorrentSummary) -> MigrationOutcome {
        let metadata_path = self
            .config
            .state_dir
            .join(format!("{}.torrent", torrent.id));
        let mut meta = match read_metainfo(&metadata_path) {
            Ok(meta) => meta,
            Err(source) => return MigrationOutcome::MetadataFailed { source },
        };

        let name = match meta.name() {
            Ok(name) => name,
            Err(source) => return MigrationOutcome::MetadataFailed { source },
        };
        let payload_root = torrent.save_path.join(name);

        if let Err(source) = add_fast_resume(&mut meta, &payload_root) {
            return MigrationOutcome::ResumeFailed { source };
        }

        let bytes = match meta.encode() {
            Ok(bytes) => bytes,
            Err(source) => return MigrationOutcome::WriteFailed { source },
        };

        let destination = resolve_destination(
            &self.config.watch_root,
            &torrent.label,
            self.config.label_subfolders,
        );
        let written = match write_torrent(&destination, torrent.id.as_str(), &bytes) {
            Ok(path) => path,
            Err(source) => return MigrationOutcome::WriteFailed { source },
        };

        if self.config.verify_written
            && let Err(source) = validate_written(&meta, &written)
        {
            let _ = fs::remove_file(&written);
            return MigrationOutcome::WriteFailed { source };
        }

        match self.client.remove_torrent(&torrent.id, false).await {
            Ok(()) => MigrationOutcome::Migrated {
                destination: written,
            },
            Err(source) => MigrationOutcome::RemoveFailed {
                destination: written,
                source,
            },
        }
    }
}

fn validate_written(meta: &Metainfo, written: &Path) -> ResumeResult<()> {
    verify_written(written, meta.piece_count()?)
}

fn log_outcome(torrent: &TorrentSummary, outcome: &MigrationOutcome) {
    match outcome {
        MigrationOutcome::Migrated { destination } => {
            info!(
                torrent_id = %torrent.id,
                destination = %destination.display(),
                "wrote fast-resume torrent and removed source entry"
            );
        }
        MigrationOutcome::MetadataFailed { source } => {
            warn!(
                torrent_id = %torrent.id,
                error = %source,
                "original metadata unreadable; torrent left in source client"
            );
        }
        MigrationOutcome::ResumeFailed { source } => {
            warn!(
                torrent_id = %torrent.id,
                error = %source,
                "fast-resume computation failed; torrent left in source client"
            );
        }
        MigrationOutcome::WriteFailed { source } => {
            warn!(
                torrent_id = %torrent.id,
                error = %source,
                "write into watch folder failed; torrent left in source client"
            );
        }
        MigrationOutcome::RemoveFailed {
            destination,
            source,
        } => {
            warn!(
                torrent_id = %torrent.id,
                destination = %destination.display(),
                error = %source,
                "source removal failed; torrent now exists in both clients"
            );
        }
    }
}
