//! strata-core — directory navigation and audio playback for the strata browser.
//!
//! The terminal front-end (crates/strata-tui) owns drawing and input; this
//! crate owns everything with real state: the per-depth listing cache, the
//! filesystem scanner, whole-file audio decoding, and the render thread that
//! feeds the audio server.

pub mod cache;
pub mod config;
pub mod controller;
pub mod decode;
pub mod error;
pub mod listing;
pub mod platform;
pub mod playback;
pub mod scanner;

pub use cache::NavigationCache;
pub use config::Config;
pub use controller::NavigationController;
pub use decode::{decode_file, ChannelPolicy};
pub use error::{DecodeError, PlaybackError, ScanError};
pub use listing::{DirectoryEntry, DirectoryListing, EntryKind};
pub use playback::{
    AudioBuffer, AudioServer, BlockStatus, CpalServer, PlaybackSession, Renderer, StreamSpec,
};
