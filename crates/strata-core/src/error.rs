//! Error types for strata-core.
//!
//! Three failure families, matching how the browser recovers from them:
//! scan errors abort one navigation step, decode errors abort one playback
//! request, playback errors end one session. None of them are fatal to the
//! process; the binary treats only startup failures as fatal.

use std::path::PathBuf;

use thiserror::Error;

/// Directory scanning errors.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The directory could not be opened at all.
    #[error("failed to open directory {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Audio decoding errors. No partial buffer survives any of these.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported or unrecognized container/codec in {path}: {detail}")]
    Unsupported { path: PathBuf, detail: String },

    #[error("no audio track in {path}")]
    NoTrack { path: PathBuf },

    #[error("{path} has {found} channel(s); current policy requires stereo")]
    ChannelLayout { path: PathBuf, found: usize },

    #[error("decode of {path} produced no samples")]
    Empty { path: PathBuf },

    #[error("decode failed for {path}: {detail}")]
    Decode { path: PathBuf, detail: String },
}

/// Audio output errors raised by the render thread.
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("no usable audio output device")]
    NoDevice,

    #[error("no supported stream configuration for {channels} ch @ {sample_rate} Hz")]
    NoStreamConfig { channels: u16, sample_rate: u32 },

    #[error("audio stream error: {0}")]
    Stream(String),
}
