//! cpal-backed audio server.

use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, SampleRate, StreamConfig};
use tracing::{debug, error, info, warn};

use crate::error::PlaybackError;

use super::{AudioServer, BlockStatus, Renderer, StreamSpec};

/// How often the completion wait re-checks the quit flag. Keeps `cancel`
/// bounded even if the device stops invoking the data callback.
const QUIT_POLL: Duration = Duration::from_millis(100);

/// Audio output through the default host. Holds configuration only; the
/// stream itself lives inside `run` on the render thread.
#[derive(Clone, Default)]
pub struct CpalServer {
    /// Preferred output device name; None picks the system default.
    device: Option<String>,
}

impl CpalServer {
    pub fn new(device: Option<String>) -> Self {
        Self { device }
    }

    fn open_device(&self) -> Result<Device, PlaybackError> {
        let host = cpal::default_host();

        if let Some(name) = &self.device {
            let mut devices = host
                .output_devices()
                .map_err(|e| PlaybackError::Stream(e.to_string()))?;
            if let Some(dev) = devices.find(|d| d.name().ok().as_deref() == Some(name.as_str())) {
                info!("using audio device: {name}");
                return Ok(dev);
            }
            warn!("audio device '{name}' not found, falling back to default");
        }

        host.default_output_device().ok_or(PlaybackError::NoDevice)
    }

    fn stream_config(device: &Device, spec: StreamSpec) -> Result<StreamConfig, PlaybackError> {
        let mut configs = device
            .supported_output_configs()
            .map_err(|e| PlaybackError::Stream(e.to_string()))?;

        let range = configs
            .find(|c| {
                c.channels() == spec.channels
                    && c.sample_format() == SampleFormat::F32
                    && c.min_sample_rate().0 <= spec.sample_rate
                    && c.max_sample_rate().0 >= spec.sample_rate
            })
            .ok_or(PlaybackError::NoStreamConfig {
                channels: spec.channels,
                sample_rate: spec.sample_rate,
            })?;

        Ok(range.with_sample_rate(SampleRate(spec.sample_rate)).config())
    }
}

impl AudioServer for CpalServer {
    fn run(&self, spec: StreamSpec, renderer: Renderer) -> Result<(), PlaybackError> {
        let device = self.open_device()?;
        let config = Self::stream_config(&device, spec)?;

        let quit = renderer.quit_handle();
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let mut renderer = renderer;

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    // cpal gives no requested-frame hint; the block is
                    // bounded by the destination capacity alone.
                    if let BlockStatus::Finished = renderer.render_block(data, None) {
                        // Silence while the owning thread tears us down; the
                        // buffer may hold stale samples from earlier blocks.
                        data.fill(0.0);
                        let _ = done_tx.send(());
                    }
                },
                |err| error!("audio stream error: {err}"),
                None,
            )
            .map_err(|e| PlaybackError::Stream(e.to_string()))?;

        stream
            .play()
            .map_err(|e| PlaybackError::Stream(e.to_string()))?;
        debug!(
            "stream started: {} ch @ {} Hz",
            spec.channels, spec.sample_rate
        );

        loop {
            match done_rx.recv_timeout(QUIT_POLL) {
                Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if quit.load(Ordering::Relaxed) {
                        break;
                    }
                }
            }
        }

        drop(stream);
        debug!("stream torn down");
        Ok(())
    }
}
