//! Validation and filesystem resolution of run parameters.

use std::path::Path;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{RunConfig, RunOptions};

/// Seconds in one day, used to convert the day threshold.
const SECONDS_PER_DAY: u64 = 86_400;

/// Relative path of the source client's state directory under `$HOME`.
const DEFAULT_STATE_DIR: &str = ".config/deluge/state";

/// Resolve raw run options against the current user's home directory.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined or a
/// parameter fails validation.
pub fn resolve(options: RunOptions) -> ConfigResult<RunConfig> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeDirUnavailable)?;
    resolve_with_home(options, &home)
}

/// Resolve raw run options against an explicit home directory.
///
/// Relative watch folders land under `home`; the state directory
/// defaults to the source client's fixed location under `home` unless
/// overridden.
///
/// # Errors
///
/// Returns an error if a parameter fails validation.
pub fn resolve_with_home(options: RunOptions, home: &Path) -> ConfigResult<RunConfig> {
    if !options.ratio.is_finite() || options.ratio < 0.0 {
        return Err(ConfigError::InvalidField {
            field: "ratio",
            reason: "must be a non-negative finite number",
            value: Some(options.ratio.to_string()),
        });
    }

    let watch_root = if options.watch_folder.is_absolute() {
        options.watch_folder
    } else {
        home.join(options.watch_folder)
    };

    let state_dir = options
        .state_dir
        .unwrap_or_else(|| home.join(DEFAULT_STATE_DIR));

    Ok(RunConfig {
        min_ratio: options.ratio,
        min_seeding: Duration::from_secs(u64::from(options.days) * SECONDS_PER_DAY),
        max_migrations: options.max,
        watch_root,
        label_subfolders: options.label_subfolders,
        state_dir,
        verify_written: options.verify_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn options() -> RunOptions {
        RunOptions {
            ratio: 3.0,
            days: 5,
            max: 100,
            watch_folder: PathBuf::from("watch"),
            label_subfolders: false,
            state_dir: None,
            verify_written: false,
        }
    }

    #[test]
    fn relative_watch_folder_joins_home() -> ConfigResult<()> {
        let config = resolve_with_home(options(), Path::new("/home/seed"))?;
        assert_eq!(config.watch_root, PathBuf::from("/home/seed/watch"));
        Ok(())
    }

    #[test]
    fn absolute_watch_folder_is_kept() -> ConfigResult<()> {
        let mut opts = options();
        opts.watch_folder = PathBuf::from("/srv/rtorrent/watch");
        let config = resolve_with_home(opts, Path::new("/home/seed"))?;
        assert_eq!(config.watch_root, PathBuf::from("/srv/rtorrent/watch"));
        Ok(())
    }

    #[test]
    fn state_dir_defaults_under_home() -> ConfigResult<()> {
        let config = resolve_with_home(options(), Path::new("/home/seed"))?;
        assert_eq!(
            config.state_dir,
            PathBuf::from("/home/seed/.config/deluge/state")
        );
        Ok(())
    }

    #[test]
    fn state_dir_override_wins() -> ConfigResult<()> {
        let mut opts = options();
        opts.state_dir = Some(PathBuf::from("/var/lib/deluge/state"));
        let config = resolve_with_home(opts, Path::new("/home/seed"))?;
        assert_eq!(config.state_dir, PathBuf::from("/var/lib/deluge/state"));
        Ok(())
    }

    #[test]
    fn day_threshold_converts_to_seconds() -> ConfigResult<()> {
        let config = resolve_with_home(options(), Path::new("/home/seed"))?;
        assert_eq!(config.min_seeding, Duration::from_secs(5 * 86_400));
        Ok(())
    }

    #[test]
    fn negative_ratio_is_rejected() {
        let mut opts = options();
        opts.ratio = -0.5;
        let err = resolve_with_home(opts, Path::new("/home/seed")).expect_err("must fail");
        assert!(matches!(
            err,
            ConfigError::InvalidField { field: "ratio", .. }
        ));
    }

    #[test]
    fn non_finite_ratio_is_rejected() {
        let mut opts = options();
        opts.ratio = f64::NAN;
        let err = resolve_with_home(opts, Path::new("/home/seed")).expect_err("must fail");
        assert!(matches!(
            err,
            ConfigError::InvalidField { field: "ratio", .. }
        ));
    }
}
