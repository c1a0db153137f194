//! Command-line surface for the migration tool.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use seedshift_config::RunOptions;
use seedshift_source::DelugeClientConfig;
use seedshift_telemetry::{DEFAULT_LOG_PATH, LoggingConfig};
use url::Url;

const DEFAULT_SOURCE_URL: &str = "http://127.0.0.1:8112";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Command-line arguments for one migration run.
///
/// Selects seeding torrents past a ratio or age threshold, rewrites
/// their metadata with fast-resume data for the payload already on
/// disk, drops the result into the watch folder, and removes the
/// source entry. Intended to run unattended from a scheduler.
#[derive(Debug, Parser)]
#[command(
    name = "seedshift",
    version,
    about = "Moves finished torrents from Deluge into an rTorrent watch folder"
)]
pub struct Cli {
    /// Minimum upload ratio required to select a torrent.
    #[arg(short = 'r', long, env = "SEEDSHIFT_RATIO", default_value_t = 3.0)]
    pub ratio: f64,

    /// Minimum number of days a torrent must have been seeding.
    #[arg(short = 'd', long, env = "SEEDSHIFT_DAYS", default_value_t = 5)]
    pub days: u32,

    /// Maximum number of torrents to migrate in one run.
    #[arg(short = 'm', long, env = "SEEDSHIFT_MAX", default_value_t = 100)]
    pub max: usize,

    /// Receiving watch folder, joined under the home directory unless
    /// absolute.
    #[arg(
        short = 'W',
        long = "watch",
        alias = "Watch",
        env = "SEEDSHIFT_WATCH",
        default_value = "watch"
    )]
    pub watch_folder: PathBuf,

    /// Drop torrents into a per-label subdirectory of the watch folder
    /// when one already exists.
    #[arg(short = 'L', long = "label", alias = "Label", env = "SEEDSHIFT_LABEL")]
    pub label_subfolders: bool,

    /// Base URL of the Deluge web interface.
    #[arg(
        long,
        env = "SEEDSHIFT_URL",
        value_parser = parse_url,
        default_value = DEFAULT_SOURCE_URL
    )]
    pub url: Url,

    /// Password for the Deluge web interface.
    #[arg(
        long,
        env = "SEEDSHIFT_PASSWORD",
        default_value = "deluge",
        hide_env_values = true
    )]
    pub password: String,

    /// Per-request timeout in seconds for source client calls.
    #[arg(long, env = "SEEDSHIFT_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Override for the source client's torrent state directory.
    #[arg(long, env = "SEEDSHIFT_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Re-decode each written torrent and compare piece counts before
    /// removing the source entry.
    #[arg(long, env = "SEEDSHIFT_VERIFY_WRITTEN")]
    pub verify_written: bool,

    /// File receiving the run log.
    #[arg(long, env = "SEEDSHIFT_LOG_FILE", default_value = DEFAULT_LOG_PATH)]
    pub log_file: PathBuf,
}

impl Cli {
    /// Raw run options for configuration resolution.
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            ratio: self.ratio,
            days: self.days,
            max: self.max,
            watch_folder: self.watch_folder.clone(),
            label_subfolders: self.label_subfolders,
            state_dir: self.state_dir.clone(),
            verify_written: self.verify_written,
        }
    }

    /// Connection settings for the source client.
    #[must_use]
    pub fn client_config(&self) -> DelugeClientConfig {
        DelugeClientConfig {
            base_url: self.url.clone(),
            password: self.password.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }

    /// Logging settings for telemetry initialisation.
    #[must_use]
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::for_file(&self.log_file)
    }
}

fn parse_url(value: &str) -> Result<Url, String> {
    Url::parse(value).map_err(|err| format!("invalid URL: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_documented_surface() {
        let cli = Cli::try_parse_from(["seedshift"]).expect("defaults parse");
        assert!((cli.ratio - 3.0).abs() < f64::EPSILON);
        assert_eq!(cli.days, 5);
        assert_eq!(cli.max, 100);
        assert_eq!(cli.watch_folder, PathBuf::from("watch"));
        assert!(!cli.label_subfolders);
        assert_eq!(cli.url.as_str(), "http://127.0.0.1:8112/");
        assert_eq!(cli.timeout, DEFAULT_TIMEOUT_SECS);
        assert!(!cli.verify_written);
        assert_eq!(cli.log_file, PathBuf::from(DEFAULT_LOG_PATH));
    }

    #[test]
    fn original_flag_spellings_are_accepted() {
        let cli = Cli::try_parse_from([
            "seedshift",
            "--Watch",
            "drop",
            "--Label",
            "-r",
            "2.5",
            "-d",
            "3",
            "-m",
            "10",
        ])
        .expect("legacy spellings parse");
        assert_eq!(cli.watch_folder, PathBuf::from("drop"));
        assert!(cli.label_subfolders);
        assert!((cli.ratio - 2.5).abs() < f64::EPSILON);
        assert_eq!(cli.days, 3);
        assert_eq!(cli.max, 10);
    }

    #[test]
    fn invalid_url_is_rejected_at_parse_time() {
        let err = Cli::try_parse_from(["seedshift", "--url", "not a url"]);
        assert!(err.is_err());
    }
}
