//! Real-time playback engine.
//!
//! A session moves through five states: Idle (no buffer), Starting (buffer
//! attached, cursor zeroed, quit flag clear), Streaming (render thread alive,
//! the audio server pulls blocks through [`Renderer::render_block`]),
//! Draining (the renderer reported end-of-stream or saw the quit flag; the
//! render thread tears the stream down) and Stopped (thread joined). The
//! states are structural rather than an enum: Idle is "no session", Starting
//! is [`PlaybackSession::start`] before the thread spawns, and the join in
//! [`PlaybackSession::cancel`] is the Draining→Stopped edge.
//!
//! `render_block` runs on the audio server's real-time path: it must not
//! block, allocate, or perform I/O. It only copies already-decoded samples
//! and advances the cursor.

mod output;
mod session;

pub use output::CpalServer;
pub use session::{AudioServer, PlaybackSession};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Fully decoded, interleaved f32 samples plus the stream parameters the
/// audio server needs to play them. Exclusively owned by one renderer.
#[derive(Debug)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Self {
        Self {
            samples,
            channels,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total sample count: frames × channels.
    pub fn total_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    pub fn spec(&self) -> StreamSpec {
        StreamSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
        }
    }
}

/// Parameters a server stream is opened with. Sample format is always f32.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSpec {
    pub channels: u16,
    pub sample_rate: u32,
}

/// What one render callback invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    /// `frames` output frames are valid in the destination, `stride` bytes
    /// per frame. When the source ran out mid-block the tail of the
    /// destination is left unwritten but the full count is still reported,
    /// exactly as the server expects a complete block.
    Filled { frames: usize, stride: usize },
    /// Quit was requested or the cursor reached end-of-stream. Nothing was
    /// written; the owning thread should tear the stream down.
    Finished,
}

/// The render-callback state: one audio buffer, a position cursor, and the
/// shared quit flag. Owned by the render thread for the whole session.
pub struct Renderer {
    buffer: AudioBuffer,
    position: usize,
    quit: Arc<AtomicBool>,
}

impl Renderer {
    pub fn new(buffer: AudioBuffer, quit: Arc<AtomicBool>) -> Self {
        Self {
            buffer,
            position: 0,
            quit,
        }
    }

    /// Position cursor in samples. Monotonically non-decreasing, never
    /// exceeds `total_samples()`.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn spec(&self) -> StreamSpec {
        self.buffer.spec()
    }

    /// Another handle on the session quit flag, for the thread that waits
    /// on stream completion.
    pub fn quit_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.quit)
    }

    /// Copy the next block of frames into `dst`.
    ///
    /// `dst` capacity and the server's `requested` frame hint (when it gives
    /// one) bound the block; the smaller wins. The quit flag is the only
    /// value another thread mutates while this runs, and it is a monotone
    /// 0→1 transition, so a relaxed load suffices.
    pub fn render_block(&mut self, dst: &mut [f32], requested: Option<usize>) -> BlockStatus {
        let total = self.buffer.total_samples();
        if self.quit.load(Ordering::Relaxed) || self.position >= total {
            return BlockStatus::Finished;
        }

        let stride = self.buffer.channels() as usize;
        let mut n_frames = dst.len() / stride;
        if let Some(req) = requested {
            n_frames = n_frames.min(req);
        }
        let byte_stride = stride * std::mem::size_of::<f32>();
        if n_frames == 0 {
            return BlockStatus::Filled {
                frames: 0,
                stride: byte_stride,
            };
        }

        // Samples consumed this call, clamped so the cursor lands exactly on
        // end-of-stream instead of past it.
        let mut consumed = n_frames * stride;
        if self.position + consumed >= total {
            consumed = total - self.position;
        }

        let samples = self.buffer.samples();
        match stride {
            1 => {
                for i in 0..n_frames {
                    let src = self.position + i;
                    if src >= total {
                        break;
                    }
                    dst[i] = samples[src];
                }
            }
            2 => {
                for i in 0..n_frames {
                    let left = self.position + i * 2;
                    let right = left + 1;
                    if right >= total {
                        // The pair would read past the end: stop here and
                        // leave the rest of the block untouched.
                        break;
                    }
                    dst[i * 2] = samples[left];
                    dst[i * 2 + 1] = samples[right];
                }
            }
            // Layouts beyond stereo produce no audio; the cursor still
            // advances so the stream terminates.
            _ => {}
        }

        self.position += consumed;

        BlockStatus::Filled {
            frames: n_frames,
            stride: byte_stride,
        }
    }
}
