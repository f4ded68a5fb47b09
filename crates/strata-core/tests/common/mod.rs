//! Shared fixtures for strata-core integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use strata_core::error::PlaybackError;
use strata_core::playback::{AudioServer, BlockStatus, Renderer, StreamSpec};

/// Audio server double: drives the renderer with fixed-size blocks on the
/// render thread, pacing each block so tests can observe a live stream. The
/// counters give tests a thread gauge for the at-most-one-session property.
#[derive(Clone)]
pub struct BlockServer {
    block_frames: usize,
    pace: Duration,
    active: Arc<AtomicUsize>,
    started: Arc<AtomicUsize>,
}

impl BlockServer {
    pub fn new(block_frames: usize, pace: Duration) -> Self {
        Self {
            block_frames,
            pace,
            active: Arc::new(AtomicUsize::new(0)),
            started: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Render threads currently inside `run`.
    pub fn active_threads(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Total streams ever opened.
    pub fn streams_started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

impl AudioServer for BlockServer {
    fn run(&self, spec: StreamSpec, mut renderer: Renderer) -> Result<(), PlaybackError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        self.active.fetch_add(1, Ordering::SeqCst);

        let mut dst = vec![0.0f32; self.block_frames * spec.channels as usize];
        loop {
            match renderer.render_block(&mut dst, Some(self.block_frames)) {
                BlockStatus::Filled { .. } => std::thread::sleep(self.pace),
                BlockStatus::Finished => break,
            }
        }

        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Write a PCM WAV fixture the real symphonia decode path can consume.
pub fn write_wav(path: &Path, seconds: f32, channels: u16, sample_rate: u32) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
    let frames = (seconds * sample_rate as f32) as u32;
    for i in 0..frames {
        let v = ((i as f32 * 0.05).sin() * 8000.0) as i16;
        for _ in 0..channels {
            writer.write_sample(v).expect("write sample");
        }
    }
    writer.finalize().expect("finalize wav");
}

/// Spin until `cond` holds or `timeout` elapses; true when it held.
pub fn wait_for(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    cond()
}
