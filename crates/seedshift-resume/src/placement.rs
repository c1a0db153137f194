//! Placement of rewritten torrents into the watch folder.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ResumeError, ResumeResult};
use crate::metainfo::read_metainfo;

/// Resolve the directory a rewritten torrent should land in.
///
/// With label placement enabled, a non-empty label whose subdirectory
/// already exists under the watch root selects that subdirectory;
/// anything else falls back to the root. Label subdirectories are
/// never created here.
#[must_use]
pub fn resolve_destination(watch_root: &Path, label: &str, label_subfolders: bool) -> PathBuf {
    if label_subfolders && !label.is_empty() {
        let candidate = watch_root.join(label);
        if candidate.is_dir() {
            return candidate;
        }
    }
    watch_root.to_path_buf()
}

/// Write torrent bytes to `<directory>/<id>.torrent`.
///
/// The bytes are staged next to the final name and renamed into place
/// so the destination client's watcher never observes a partial file.
///
/// # Errors
///
/// Returns an error if the staging write or the rename fails; a stale
/// staging file is cleaned up on the way out.
pub fn write_torrent(directory: &Path, id: &str, bytes: &[u8]) -> ResumeResult<PathBuf> {
    let final_path = directory.join(format!("{id}.torrent"));
    let staging_path = directory.join(format!("{id}.torrent.tmp"));

    fs::write(&staging_path, bytes).map_err(|source| ResumeError::Io {
        operation: "write_staging",
        path: staging_path.clone(),
        source,
    })?;

    if let Err(source) = fs::rename(&staging_path, &final_path) {
        let _ = fs::remove_file(&staging_path);
        return Err(ResumeError::Io {
            operation: "rename_into_watch",
            path: final_path,
            source,
        });
    }

    Ok(final_path)
}

/// Re-decode a written torrent and compare its piece count.
///
/// Optional safety net before the source copy is removed: confirms the
/// watch folder holds a decodable file describing the same piece
/// layout as the transformed metadata.
///
/// # Errors
///
/// Returns an error if the file cannot be decoded or the piece counts
/// disagree.
pub fn verify_written(path: &Path, expected_pieces: u64) -> ResumeResult<()> {
    let meta = read_metainfo(path)?;
    let actual_pieces = meta.piece_count()?;
    if actual_pieces != expected_pieces {
        return Err(ResumeError::Verify {
            path: path.to_path_buf(),
            expected_pieces,
            actual_pieces,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_label_subdirectory_falls_back_to_root() {
        let watch = tempfile::tempdir().expect("tempdir");
        let destination = resolve_destination(watch.path(), "linux", true);
        assert_eq!(destination, watch.path());
    }

    #[test]
    fn existing_label_subdirectory_is_used() {
        let watch = tempfile::tempdir().expect("tempdir");
        fs::create_dir(watch.path().join("linux")).expect("label dir");
        let destination = resolve_destination(watch.path(), "linux", true);
        assert_eq!(destination, watch.path().join("linux"));
    }

    #[test]
    fn label_placement_disabled_ignores_existing_subdirectory() {
        let watch = tempfile::tempdir().expect("tempdir");
        fs::create_dir(watch.path().join("linux")).expect("label dir");
        let destination = resolve_destination(watch.path(), "linux", false);
        assert_eq!(destination, watch.path());
    }

    #[test]
    fn empty_label_falls_back_to_root() {
        let watch = tempfile::tempdir().expect("tempdir");
        let destination = resolve_destination(watch.path(), "", true);
        assert_eq!(destination, watch.path());
    }

    #[test]
    fn write_lands_under_final_name_without_leftovers() -> ResumeResult<()> {
        let watch = tempfile::tempdir().expect("tempdir");
        let written = write_torrent(watch.path(), "aa11", b"d4:spam4:eggse")?;

        assert_eq!(written, watch.path().join("aa11.torrent"));
        assert_eq!(fs::read(&written).expect("readable"), b"d4:spam4:eggse");
        assert!(!watch.path().join("aa11.torrent.tmp").exists());
        Ok(())
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let watch = tempfile::tempdir().expect("tempdir");
        let err = write_torrent(&watch.path().join("absent"), "aa11", b"x").expect_err("must fail");
        assert!(matches!(err, ResumeError::Io { .. }));
    }
}
