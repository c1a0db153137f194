//! Decoded torrent metadata with round-trip fidelity.
//!
//! # Design
//! - The whole file is held as a bencode [`Value`] so keys this tool
//!   does not understand survive decode → transform → encode verbatim.
//! - Typed accessors validate only the fields the pipeline relies on.
//! - Re-encoding emits canonically sorted dictionaries, so untouched
//!   input produced by a well-formed encoder round-trips byte-for-byte.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_bencode::value::Value;

use crate::error::{ResumeError, ResumeResult};

type Dict = HashMap<Vec<u8>, Value>;

const INFO_KEY: &[u8] = b"info";
const NAME_KEY: &[u8] = b"name";
const PIECE_LENGTH_KEY: &[u8] = b"piece length";
const PIECES_KEY: &[u8] = b"pieces";
const LENGTH_KEY: &[u8] = b"length";
const FILES_KEY: &[u8] = b"files";
const PATH_KEY: &[u8] = b"path";

/// Top-level key receiving the injected fast-resume dictionary.
pub(crate) const RESUME_KEY: &[u8] = b"libtorrent_resume";

/// Length of one SHA-1 piece hash in the `pieces` string.
const PIECE_HASH_LEN: usize = 20;

/// One payload file described by the metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadFile {
    /// Path relative to the payload root. Empty for single-file
    /// torrents, whose payload root is the file itself.
    pub relative_path: PathBuf,
    /// Expected file size in bytes.
    pub length: u64,
}

impl PayloadFile {
    /// Whether this entry describes the lone file of a single-file
    /// torrent.
    #[must_use]
    pub fn is_single(&self) -> bool {
        self.relative_path.as_os_str().is_empty()
    }
}

/// Decoded torrent metadata; unknown keys are preserved verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Metainfo {
    root: Value,
}

impl Metainfo {
    /// Decode metadata from raw torrent-file bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not valid bencode or the
    /// structure lacks the fields the pipeline relies on (an `info`
    /// dictionary with a UTF-8 `name`, a positive `piece length`,
    /// whole SHA-1 `pieces`, and a usable file layout).
    pub fn from_bytes(bytes: &[u8]) -> ResumeResult<Self> {
        let root: Value =
            serde_bencode::from_bytes(bytes).map_err(|source| ResumeError::Decode { source })?;
        if !matches!(root, Value::Dict(_)) {
            return Err(ResumeError::Invalid {
                field: "root",
                reason: "must be a dictionary",
            });
        }

        let meta = Self { root };
        meta.name()?;
        meta.piece_length()?;
        meta.piece_count()?;
        meta.files()?;
        Ok(meta)
    }

    /// Re-encode the metadata as canonical bencode bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(&self) -> ResumeResult<Vec<u8>> {
        serde_bencode::to_bytes(&self.root).map_err(|source| ResumeError::Encode { source })
    }

    /// Payload name from the `info` dictionary.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing or not valid UTF-8.
    pub fn name(&self) -> ResumeResult<String> {
        let bytes = require_bytes(self.info_dict()?, NAME_KEY, "info.name")?;
        String::from_utf8(bytes.to_vec()).map_err(|_| ResumeError::Invalid {
            field: "info.name",
            reason: "must be valid utf-8",
        })
    }

    /// Piece size in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing or not a positive
    /// integer.
    pub fn piece_length(&self) -> ResumeResult<u64> {
        let length = require_u64(self.info_dict()?, PIECE_LENGTH_KEY, "info.piece length")?;
        if length == 0 {
            return Err(ResumeError::Invalid {
                field: "info.piece length",
                reason: "must be positive",
            });
        }
        Ok(length)
    }

    /// Number of pieces described by the `pieces` hash string.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing or its length is not a
    /// multiple of the SHA-1 digest size.
    pub fn piece_count(&self) -> ResumeResult<u64> {
        let pieces = require_bytes(self.info_dict()?, PIECES_KEY, "info.pieces")?;
        if pieces.len() % PIECE_HASH_LEN != 0 {
            return Err(ResumeError::Invalid {
                field: "info.pieces",
                reason: "length must be a multiple of the hash size",
            });
        }
        u64::try_from(pieces.len() / PIECE_HASH_LEN).map_err(|_| ResumeError::Invalid {
            field: "info.pieces",
            reason: "piece count overflows a bencode integer",
        })
    }

    /// The payload file list, normalised across single- and
    /// multi-file layouts.
    ///
    /// # Errors
    ///
    /// Returns an error if neither a `length` nor a usable `files`
    /// list is present.
    pub fn files(&self) -> ResumeResult<Vec<PayloadFile>> {
        let info = self.info_dict()?;
        match info.get(FILES_KEY) {
            Some(Value::List(entries)) => {
                if entries.is_empty() {
                    return Err(ResumeError::Invalid {
                        field: "info.files",
                        reason: "must not be empty",
                    });
                }
                entries.iter().map(file_entry).collect()
            }
            Some(_) => Err(ResumeError::Invalid {
                field: "info.files",
                reason: "must be a list",
            }),
            None => {
                let length = require_u64(info, LENGTH_KEY, "info.length")?;
                Ok(vec![PayloadFile {
                    relative_path: PathBuf::new(),
                    length,
                }])
            }
        }
    }

    /// The `info` dictionary as a raw bencode value.
    ///
    /// # Errors
    ///
    /// Returns an error if the dictionary is missing.
    pub fn info(&self) -> ResumeResult<&Value> {
        self.root_dict()?
            .get(INFO_KEY)
            .ok_or(ResumeError::Invalid {
                field: "info",
                reason: "missing dictionary",
            })
    }

    /// The injected fast-resume section, when present.
    #[must_use]
    pub fn resume_section(&self) -> Option<&Value> {
        match &self.root {
            Value::Dict(dict) => dict.get(RESUME_KEY),
            _ => None,
        }
    }

    /// Replace the top-level fast-resume section.
    pub(crate) fn set_resume(&mut self, resume: Value) -> ResumeResult<()> {
        self.root_dict_mut()?.insert(RESUME_KEY.to_vec(), resume);
        Ok(())
    }

    fn info_dict(&self) -> ResumeResult<&Dict> {
        match self.info()? {
            Value::Dict(dict) => Ok(dict),
            _ => Err(ResumeError::Invalid {
                field: "info",
                reason: "must be a dictionary",
            }),
        }
    }

    fn root_dict(&self) -> ResumeResult<&Dict> {
        match &self.root {
            Value::Dict(dict) => Ok(dict),
            _ => Err(ResumeError::Invalid {
                field: "root",
                reason: "must be a dictionary",
            }),
        }
    }

    fn root_dict_mut(&mut self) -> ResumeResult<&mut Dict> {
        match &mut self.root {
            Value::Dict(dict) => Ok(dict),
            _ => Err(ResumeError::Invalid {
                field: "root",
                reason: "must be a dictionary",
            }),
        }
    }
}

/// Decode a torrent file from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails
/// [`Metainfo::from_bytes`] validation.
pub fn read_metainfo(path: &Path) -> ResumeResult<Metainfo> {
    let bytes = fs::read(path).map_err(|source| ResumeError::Io {
        operation: "read_metadata",
        path: path.to_path_buf(),
        source,
    })?;
    Metainfo::from_bytes(&bytes)
}

fn file_entry(value: &Value) -> ResumeResult<PayloadFile> {
    let Value::Dict(entry) = value else {
        return Err(ResumeError::Invalid {
            field: "info.files",
            reason: "entries must be dictionaries",
        });
    };

    let length = require_u64(entry, LENGTH_KEY, "info.files.length")?;

    let Some(Value::List(components)) = entry.get(PATH_KEY) else {
        return Err(ResumeError::Invalid {
            field: "info.files.path",
            reason: "must be a list",
        });
    };
    if components.is_empty() {
        return Err(ResumeError::Invalid {
            field: "info.files.path",
            reason: "must not be empty",
        });
    }

    let mut relative_path = PathBuf::new();
    for component in components {
        let Value::Bytes(bytes) = component else {
            return Err(ResumeError::Invalid {
                field: "info.files.path",
                reason: "components must be byte strings",
            });
        };
        let part = std::str::from_utf8(bytes).map_err(|_| ResumeError::Invalid {
            field: "info.files.path",
            reason: "components must be valid utf-8",
        })?;
        relative_path.push(part);
    }

    Ok(PayloadFile {
        relative_path,
        length,
    })
}

fn require_bytes<'a>(dict: &'a Dict, key: &[u8], field: &'static str) -> ResumeResult<&'a [u8]> {
    match dict.get(key) {
        Some(Value::Bytes(bytes)) => Ok(bytes),
        Some(_) => Err(ResumeError::Invalid {
            field,
            reason: "must be a byte string",
        }),
        None => Err(ResumeError::Invalid {
            field,
            reason: "missing field",
        }),
    }
}

fn require_u64(dict: &Dict, key: &[u8], field: &'static str) -> ResumeResult<u64> {
    match dict.get(key) {
        Some(Value::Int(value)) => u64::try_from(*value).map_err(|_| ResumeError::Invalid {
            field,
            reason: "must be non-negative",
        }),
        Some(_) => Err(ResumeError::Invalid {
            field,
            reason: "must be an integer",
        }),
        None => Err(ResumeError::Invalid {
            field,
            reason: "missing field",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_file_torrent(name: &str, piece_length: i64, length: i64, pieces: usize) -> Vec<u8> {
        let mut info = HashMap::new();
        info.insert(NAME_KEY.to_vec(), Value::Bytes(name.as_bytes().to_vec()));
        info.insert(PIECE_LENGTH_KEY.to_vec(), Value::Int(piece_length));
        info.insert(
            PIECES_KEY.to_vec(),
            Value::Bytes(vec![0xAB; pieces * PIECE_HASH_LEN]),
        );
        info.insert(LENGTH_KEY.to_vec(), Value::Int(length));

        let mut root = HashMap::new();
        root.insert(INFO_KEY.to_vec(), Value::Dict(info));
        root.insert(
            b"announce".to_vec(),
            Value::Bytes(b"http://tracker.example/announce".to_vec()),
        );
        serde_bencode::to_bytes(&Value::Dict(root)).expect("test torrent encodes")
    }

    #[test]
    fn decodes_single_file_layout() -> ResumeResult<()> {
        let meta = Metainfo::from_bytes(&single_file_torrent("linux.iso", 32_768, 100_000, 4))?;
        assert_eq!(meta.name()?, "linux.iso");
        assert_eq!(meta.piece_length()?, 32_768);
        assert_eq!(meta.piece_count()?, 4);

        let files = meta.files()?;
        assert_eq!(files.len(), 1);
        assert!(files[0].is_single());
        assert_eq!(files[0].length, 100_000);
        Ok(())
    }

    #[test]
    fn untouched_metadata_round_trips_byte_for_byte() -> ResumeResult<()> {
        let original = single_file_torrent("linux.iso", 32_768, 100_000, 4);
        let meta = Metainfo::from_bytes(&original)?;
        assert_eq!(meta.encode()?, original);
        Ok(())
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = Metainfo::from_bytes(b"not a torrent").expect_err("must fail");
        assert!(matches!(err, ResumeError::Decode { .. }));
    }

    #[test]
    fn missing_info_is_invalid() {
        let root: HashMap<Vec<u8>, Value> = HashMap::new();
        let bytes = serde_bencode::to_bytes(&Value::Dict(root)).expect("encodes");
        let err = Metainfo::from_bytes(&bytes).expect_err("must fail");
        assert!(matches!(err, ResumeError::Invalid { field: "info", .. }));
    }

    #[test]
    fn ragged_piece_string_is_invalid() {
        let mut info = HashMap::new();
        info.insert(NAME_KEY.to_vec(), Value::Bytes(b"x".to_vec()));
        info.insert(PIECE_LENGTH_KEY.to_vec(), Value::Int(16));
        info.insert(PIECES_KEY.to_vec(), Value::Bytes(vec![0; 19]));
        info.insert(LENGTH_KEY.to_vec(), Value::Int(10));
        let mut root = HashMap::new();
        root.insert(INFO_KEY.to_vec(), Value::Dict(info));
        let bytes = serde_bencode::to_bytes(&Value::Dict(root)).expect("encodes");

        let err = Metainfo::from_bytes(&bytes).expect_err("must fail");
        assert!(matches!(
            err,
            ResumeError::Invalid {
                field: "info.pieces",
                ..
            }
        ));
    }

    #[test]
    fn multi_file_paths_join_components() -> ResumeResult<()> {
        let mut file = HashMap::new();
        file.insert(LENGTH_KEY.to_vec(), Value::Int(64));
        file.insert(
            PATH_KEY.to_vec(),
            Value::List(vec![
                Value::Bytes(b"sub".to_vec()),
                Value::Bytes(b"data.bin".to_vec()),
            ]),
        );

        let mut info = HashMap::new();
        info.insert(NAME_KEY.to_vec(), Value::Bytes(b"bundle".to_vec()));
        info.insert(PIECE_LENGTH_KEY.to_vec(), Value::Int(16));
        info.insert(
            PIECES_KEY.to_vec(),
            Value::Bytes(vec![0; 4 * PIECE_HASH_LEN]),
        );
        info.insert(FILES_KEY.to_vec(), Value::List(vec![Value::Dict(file)]));
        let mut root = HashMap::new();
        root.insert(INFO_KEY.to_vec(), Value::Dict(info));
        let bytes = serde_bencode::to_bytes(&Value::Dict(root)).expect("encodes");

        let meta = Metainfo::from_bytes(&bytes)?;
        let files = meta.files()?;
        assert_eq!(files[0].relative_path, PathBuf::from("sub/data.bin"));
        assert!(!files[0].is_single());
        Ok(())
    }
}
