//! `rTorrent` fast-resume injection.
//!
//! Rewrites decoded metadata so the destination client treats the
//! payload as already downloaded and verified: a top-level
//! `libtorrent_resume` dictionary carries the total piece count as a
//! bitfield marker plus one entry per payload file with the pieces it
//! spans, its observed mtime, and a default priority. Sizes and mtimes
//! are taken from the payload on disk; hashes are never recomputed —
//! completeness is the source client's invariant, not ours.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde_bencode::value::Value;

use crate::error::{ResumeError, ResumeResult};
use crate::metainfo::Metainfo;

const BITFIELD_KEY: &[u8] = b"bitfield";
const FILES_KEY: &[u8] = b"files";
const COMPLETED_KEY: &[u8] = b"completed";
const MTIME_KEY: &[u8] = b"mtime";
const PRIORITY_KEY: &[u8] = b"priority";

/// Priority recorded for every payload file.
const FILE_PRIORITY: i64 = 1;

/// Inject fast-resume data referencing the payload at `payload_root`.
///
/// For single-file torrents `payload_root` is the payload file itself
/// (or the directory containing it); for multi-file torrents it is the
/// directory holding the file tree. Every field of the metadata other
/// than the injected section is left untouched.
///
/// # Errors
///
/// Returns an error if the metadata is structurally unusable, a
/// payload file is missing or cannot be inspected, or an on-disk size
/// does not match the metadata.
pub fn add_fast_resume(meta: &mut Metainfo, payload_root: &Path) -> ResumeResult<()> {
    let piece_length = meta.piece_length()?;
    let piece_count = meta.piece_count()?;
    let name = meta.name()?;
    let files = meta.files()?;

    let mut entries = Vec::with_capacity(files.len());
    let mut offset: u64 = 0;
    for file in &files {
        let path = if file.is_single() {
            locate_single_payload(payload_root, &name)
        } else {
            payload_root.join(&file.relative_path)
        };

        let metadata = fs::metadata(&path).map_err(|source| ResumeError::Payload {
            path: path.clone(),
            source,
        })?;
        if metadata.len() != file.length {
            return Err(ResumeError::SizeMismatch {
                path,
                expected: file.length,
                actual: metadata.len(),
            });
        }

        let completed = completed_pieces(offset, file.length, piece_length);
        entries.push(resume_entry(completed, file_mtime(&metadata, &path)?)?);
        offset += file.length;
    }

    let mut resume = HashMap::new();
    resume.insert(
        BITFIELD_KEY.to_vec(),
        Value::Int(to_bencode_int(piece_count, "info.pieces")?),
    );
    resume.insert(FILES_KEY.to_vec(), Value::List(entries));
    meta.set_resume(Value::Dict(resume))
}

/// Resolve the payload file of a single-file torrent.
///
/// Save paths usually point at the containing directory; accept a
/// direct file path as well.
fn locate_single_payload(payload_root: &Path, name: &str) -> PathBuf {
    if payload_root.is_dir() {
        payload_root.join(name)
    } else {
        payload_root.to_path_buf()
    }
}

/// Number of pieces overlapping a file starting at `offset`.
const fn completed_pieces(offset: u64, length: u64, piece_length: u64) -> u64 {
    (offset + length).div_ceil(piece_length) - offset / piece_length
}

fn file_mtime(metadata: &fs::Metadata, path: &Path) -> ResumeResult<i64> {
    let modified = metadata.modified().map_err(|source| ResumeError::Payload {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(modified
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)
        }))
}

fn resume_entry(completed: u64, mtime: i64) -> ResumeResult<Value> {
    let mut entry = HashMap::new();
    entry.insert(
        COMPLETED_KEY.to_vec(),
        Value::Int(to_bencode_int(completed, "completed")?),
    );
    entry.insert(MTIME_KEY.to_vec(), Value::Int(mtime));
    entry.insert(PRIORITY_KEY.to_vec(), Value::Int(FILE_PRIORITY));
    Ok(Value::Dict(entry))
}

fn to_bencode_int(value: u64, field: &'static str) -> ResumeResult<i64> {
    i64::try_from(value).map_err(|_| ResumeError::Invalid {
        field,
        reason: "value overflows a bencode integer",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_spans_cover_file_boundaries() {
        // Two files over 16-byte pieces: 20 bytes spans pieces 0-1,
        // the next 12 bytes start inside piece 1 and end in piece 2.
        assert_eq!(completed_pieces(0, 20, 16), 2);
        assert_eq!(completed_pieces(20, 12, 16), 1);
        assert_eq!(completed_pieces(0, 16, 16), 1);
        assert_eq!(completed_pieces(16, 16, 16), 1);
    }

    #[test]
    fn zero_length_file_inside_a_piece_spans_one() {
        // Matches the established resume math: a zero-length file at
        // an unaligned offset still records the piece it sits in.
        assert_eq!(completed_pieces(5, 0, 16), 1);
        assert_eq!(completed_pieces(0, 0, 16), 0);
    }

    #[test]
    fn bencode_int_rejects_overflow() {
        let err = to_bencode_int(u64::MAX, "completed").expect_err("must fail");
        assert!(matches!(err, ResumeError::Invalid { .. }));
    }
}
