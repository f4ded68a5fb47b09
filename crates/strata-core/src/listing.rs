//! Directory listing data model.

use std::path::PathBuf;

/// What kind of filesystem object a listing entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    RegularFile,
    Directory,
    /// Symlinks, sockets, fifos, or anything whose type could not be read.
    Other,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::RegularFile => "file",
            Self::Directory => "directory",
            Self::Other => "other",
        }
    }
}

/// One entry of a scanned directory. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Entry name after ASCII normalization (see `scanner`).
    pub name: String,
    /// Absolute path: parent joined with `name`, no trailing separator.
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Ordinal position within the listing, in enumeration order.
    pub index: usize,
}

/// The cached result of scanning one directory.
///
/// Entry order is enumeration order, deliberately not sorted, so a re-scan
/// of an unchanged directory reproduces the same view the kernel gave us.
#[derive(Debug)]
pub struct DirectoryListing {
    entries: Vec<DirectoryEntry>,
    complete: bool,
}

impl DirectoryListing {
    pub(crate) fn new(entries: Vec<DirectoryEntry>, complete: bool) -> Self {
        Self { entries, complete }
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&DirectoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// False when a resource failure interrupted the scan partway through.
    /// Entries collected before the failure are still present; callers must
    /// check this before trusting `len()` as the directory's true size.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
