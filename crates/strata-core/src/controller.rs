//! Navigation controller — maps UI actions onto the cache, the scanner,
//! and the playback session.
//!
//! All browsing state lives here: the current depth key, the in-listing
//! selection row, and the optional active session. The front-end only reads
//! through the accessors and dispatches the movement/activation methods.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cache::NavigationCache;
use crate::decode::{decode_file, ChannelPolicy};
use crate::error::ScanError;
use crate::listing::{DirectoryEntry, DirectoryListing, EntryKind};
use crate::playback::{AudioServer, PlaybackSession};
use crate::scanner;

pub struct NavigationController<S: AudioServer> {
    server: S,
    policy: ChannelPolicy,
    cache: NavigationCache,
    /// Depth key: a monotonic counter clamped into [0, cache capacity).
    depth: usize,
    /// Selection row within the current listing.
    row: usize,
    session: Option<PlaybackSession>,
    playing: Option<PathBuf>,
}

impl<S: AudioServer> NavigationController<S> {
    /// Scan `root` into depth slot 0 and start browsing there. A root that
    /// cannot be scanned is a startup failure.
    pub fn new(server: S, root: &Path, policy: ChannelPolicy) -> Result<Self, ScanError> {
        let mut cache = NavigationCache::default();
        let listing = scanner::scan_directory(root)?;
        if !listing.is_complete() {
            warn!("root listing for {} is incomplete", root.display());
        }
        cache.set(0, listing);

        Ok(Self {
            server,
            policy,
            cache,
            depth: 0,
            row: 0,
            session: None,
            playing: None,
        })
    }

    // ── Read accessors ───────────────────────────────────────────────────

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn listing(&self) -> Option<&DirectoryListing> {
        self.cache.get(self.depth)
    }

    pub fn selected(&self) -> usize {
        self.row
    }

    pub fn selected_entry(&self) -> Option<&DirectoryEntry> {
        self.listing()?.get(self.row)
    }

    /// Path of the track whose session is currently alive, if any.
    pub fn playing_path(&self) -> Option<&Path> {
        self.playing.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_some()
    }

    /// Join and drop a session whose render thread already returned, so the
    /// playing indicator clears once end-of-stream is reached. Called once
    /// per UI frame.
    pub fn reap_finished(&mut self) {
        if self.session.as_ref().is_some_and(|s| s.is_finished()) {
            if let Some(mut session) = self.session.take() {
                session.join();
            }
            self.playing = None;
        }
    }

    // ── Selection movement ───────────────────────────────────────────────

    pub fn select_up(&mut self, n: usize) {
        self.row = self.row.saturating_sub(n);
    }

    pub fn select_down(&mut self, n: usize) {
        let len = self.listing().map_or(0, DirectoryListing::len);
        if len == 0 {
            self.row = 0;
        } else {
            self.row = (self.row + n).min(len - 1);
        }
    }

    pub fn select_first(&mut self) {
        self.row = 0;
    }

    pub fn select_last(&mut self) {
        self.row = self.listing().map_or(0, DirectoryListing::len).saturating_sub(1);
    }

    // ── Depth movement ───────────────────────────────────────────────────

    /// Move one level toward the root. Only commits when the target slot
    /// still holds a listing; otherwise the current key is retained.
    pub fn move_shallower(&mut self) -> bool {
        if self.depth == 0 {
            return false;
        }
        self.move_to(self.depth - 1)
    }

    /// Move one level deeper without scanning: lateral movement back into
    /// a slot that was populated by an earlier descend. Rejected when the
    /// slot is empty, so the browser never shows never-scanned territory.
    pub fn move_deeper(&mut self) -> bool {
        let target = (self.depth + 1).min(self.cache.capacity() - 1);
        if target == self.depth {
            return false;
        }
        self.move_to(target)
    }

    fn move_to(&mut self, target: usize) -> bool {
        if self.cache.get(target).is_some() {
            self.depth = target;
            self.row = 0;
            true
        } else {
            debug!("no listing at depth {target}, staying at {}", self.depth);
            false
        }
    }

    // ── Activation ───────────────────────────────────────────────────────

    /// Activate the selected entry: descend into a directory, play a
    /// regular file, ignore anything else.
    pub fn activate(&mut self) {
        let Some(entry) = self.selected_entry().cloned() else {
            return;
        };
        match entry.kind {
            EntryKind::Directory => self.descend(&entry.path),
            EntryKind::RegularFile => self.play(&entry.path),
            EntryKind::Other => {
                debug!("ignoring activation of {} ({})", entry.name, entry.kind.label());
            }
        }
    }

    /// Stop playback, joining the render thread.
    pub fn stop(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.cancel();
        }
        self.playing = None;
    }

    fn descend(&mut self, path: &Path) {
        let target = (self.depth + 1).min(self.cache.capacity() - 1);
        match scanner::scan_directory(path) {
            Ok(listing) => {
                if !listing.is_complete() {
                    warn!("partial listing for {}", path.display());
                }
                self.cache.set(target, listing);
                self.depth = target;
                self.row = 0;
            }
            // The current listing stays on screen; nothing advanced.
            Err(e) => warn!("{e}"),
        }
    }

    fn play(&mut self, path: &Path) {
        // At-most-one-concurrent-session: the outgoing render thread is
        // cancelled and joined before the new session exists.
        if let Some(mut old) = self.session.take() {
            old.cancel();
            self.playing = None;
        }

        match decode_file(path, self.policy) {
            Ok(buffer) => {
                info!(
                    "playing {} ({} ch @ {} Hz, {} frames)",
                    path.display(),
                    buffer.channels(),
                    buffer.sample_rate(),
                    buffer.frames()
                );
                self.session = Some(PlaybackSession::start(&self.server, buffer));
                self.playing = Some(path.to_path_buf());
            }
            Err(e) => warn!("{e}"),
        }
    }
}
