//! Playback sessions and the audio-server seam.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::error;

use crate::error::PlaybackError;

use super::{AudioBuffer, Renderer, StreamSpec};

/// The audio output collaborator.
///
/// `run` opens a stream for `spec` (f32 samples), drives the renderer until
/// it reports completion, tears the stream down, and returns. It executes on
/// the session's render thread, so implementations may block.
pub trait AudioServer: Clone + Send + 'static {
    fn run(&self, spec: StreamSpec, renderer: Renderer) -> Result<(), PlaybackError>;
}

/// Exactly one render thread playing exactly one decoded buffer.
///
/// The buffer moves into the render thread with the renderer; after
/// `cancel` returns, the thread is joined and the buffer is gone with it.
/// Never more than one session streams at a time; the controller cancels
/// and joins the old session before constructing the next.
pub struct PlaybackSession {
    quit: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl PlaybackSession {
    /// Attach `buffer`, reset the cursor, and spawn the render thread.
    pub fn start<S: AudioServer>(server: &S, buffer: AudioBuffer) -> Self {
        let quit = Arc::new(AtomicBool::new(false));
        let spec = buffer.spec();
        let renderer = Renderer::new(buffer, Arc::clone(&quit));
        let server = server.clone();

        let thread = thread::spawn(move || {
            if let Err(e) = server.run(spec, renderer) {
                error!("render thread exited with error: {e}");
            }
        });

        Self {
            quit,
            thread: Some(thread),
        }
    }

    /// True once the render thread has returned (end of stream, error, or a
    /// previous cancel).
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Cooperative cancellation: raise the quit flag, then join.
    ///
    /// The join is the synchronization barrier: once it returns, no render
    /// callback will run again and nothing else references the buffer. The
    /// wait is bounded by the server's callback latency.
    pub fn cancel(&mut self) {
        self.quit.store(true, Ordering::Relaxed);
        self.join();
    }

    /// Join the render thread without signalling quit. Used to reap a
    /// session that already reached end-of-stream.
    pub fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("render thread panicked");
            }
        }
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.cancel();
    }
}
