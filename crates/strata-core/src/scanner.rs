//! Directory scanner — produces a `DirectoryListing` from a path.
//!
//! Scanning has one deliberate side effect: entry names containing bytes
//! outside printable ASCII are renamed on disk, each offending byte replaced
//! with `~`, and the listing records the post-rename name. The terminal
//! renderer only ever has to display plain ASCII. The rename is idempotent;
//! a second scan of the same directory finds nothing left to normalize.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ScanError;
use crate::listing::{DirectoryEntry, DirectoryListing, EntryKind};

/// Initial entry storage; doubles on growth.
const INITIAL_CAPACITY: usize = 4;

/// Scan one directory into a listing.
///
/// `.` and `..` are never listed. On an unreadable directory this returns
/// `Err`; an I/O failure partway through enumeration returns the entries
/// collected so far with the listing marked incomplete.
pub fn scan_directory(path: &Path) -> Result<DirectoryListing, ScanError> {
    let reader = fs::read_dir(path).map_err(|source| ScanError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut entries: Vec<DirectoryEntry> = Vec::with_capacity(INITIAL_CAPACITY);
    let mut complete = true;

    for dirent in reader {
        let dirent = match dirent {
            Ok(d) => d,
            Err(e) => {
                // Keep what we have; the caller checks is_complete().
                warn!("enumeration of {} interrupted: {}", path.display(), e);
                complete = false;
                break;
            }
        };

        let kind = match dirent.file_type() {
            Ok(t) if t.is_file() => EntryKind::RegularFile,
            Ok(t) if t.is_dir() => EntryKind::Directory,
            _ => EntryKind::Other,
        };

        let (name, entry_path) = normalize_entry(path, &dirent.file_name());
        let index = entries.len();
        entries.push(DirectoryEntry {
            name,
            path: entry_path,
            kind,
            index,
        });
    }

    Ok(DirectoryListing::new(entries, complete))
}

/// Apply ASCII normalization to one entry, renaming it on disk if needed.
/// Returns the name and full path the listing should record.
fn normalize_entry(parent: &Path, raw: &OsStr) -> (String, PathBuf) {
    let bytes = name_bytes(raw);
    if bytes.iter().all(|&b| b <= 127) {
        let name = String::from_utf8_lossy(&bytes).into_owned();
        let path = parent.join(&name);
        return (name, path);
    }

    let sanitized: String = bytes
        .iter()
        .map(|&b| if b > 127 { '~' } else { b as char })
        .collect();
    let from = parent.join(raw);
    let to = parent.join(&sanitized);

    match fs::rename(&from, &to) {
        Ok(()) => {
            debug!("normalized {:?} -> {}", raw, sanitized);
            (sanitized, to)
        }
        Err(e) => {
            // Leave the entry under its original name; it stays usable.
            warn!("failed to normalize {}: {}", from.display(), e);
            (raw.to_string_lossy().into_owned(), from)
        }
    }
}

#[cfg(unix)]
fn name_bytes(name: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    name.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn name_bytes(name: &OsStr) -> Vec<u8> {
    name.to_string_lossy().as_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_names_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        let (name, path) = normalize_entry(dir.path(), OsStr::new("track.flac"));
        assert_eq!(name, "track.flac");
        assert_eq!(path, dir.path().join("track.flac"));
    }

    #[test]
    fn high_bytes_become_tildes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("café.mp3"), b"x").unwrap();

        let (name, path) = normalize_entry(dir.path(), OsStr::new("café.mp3"));
        // "é" is two bytes in UTF-8, both above 127.
        assert_eq!(name, "caf~~.mp3");
        assert!(path.exists());
        assert!(!dir.path().join("café.mp3").exists());
    }
}
