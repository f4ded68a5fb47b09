//! Whole-file audio decoding via symphonia.
//!
//! The decoder eagerly materializes the entire stream into one interleaved
//! f32 buffer before playback starts; the render thread never touches the
//! codec. Sample rate and channel count pass through unmodified; layout
//! handling happens at render time, not here.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

use crate::error::DecodeError;
use crate::playback::AudioBuffer;

/// Which channel layouts the decoder accepts.
///
/// The browser historically shipped in two variants: one rejected anything
/// that was not plain stereo, the other played whatever the codec produced.
/// Both behaviors remain available; stereo-only is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelPolicy {
    #[default]
    #[serde(rename = "stereo")]
    StereoOnly,
    #[serde(rename = "any")]
    Any,
}

/// Decode `path` completely into one `AudioBuffer`.
///
/// Every failure path returns before an `AudioBuffer` is constructed, so a
/// partially decoded file can never reach a playback session.
pub fn decode_file(path: &Path, policy: ChannelPolicy) -> Result<AudioBuffer, DecodeError> {
    let file = File::open(path).map_err(|source| DecodeError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| DecodeError::Unsupported {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
    let mut format = probed.format;

    let track = format.default_track().ok_or_else(|| DecodeError::NoTrack {
        path: path.to_path_buf(),
    })?;
    let track_id = track.id;
    let params = track.codec_params.clone();

    let channels = params.channels.map(|c| c.count()).unwrap_or(0);
    if channels == 0 {
        return Err(DecodeError::Unsupported {
            path: path.to_path_buf(),
            detail: "missing channel description".to_string(),
        });
    }
    if policy == ChannelPolicy::StereoOnly && channels != 2 {
        return Err(DecodeError::ChannelLayout {
            path: path.to_path_buf(),
            found: channels,
        });
    }
    let sample_rate = params.sample_rate.ok_or_else(|| DecodeError::Unsupported {
        path: path.to_path_buf(),
        detail: "missing sample rate".to_string(),
    })?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&params, &DecoderOptions::default())
        .map_err(|e| DecodeError::Unsupported {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    let mut samples: Vec<f32> = Vec::new();
    let mut conv: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(DecodeError::Decode {
                    path: path.to_path_buf(),
                    detail: e.to_string(),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                if conv.is_none() {
                    conv = Some(SampleBuffer::new(decoded.capacity() as u64, *decoded.spec()));
                }
                if let Some(buf) = conv.as_mut() {
                    buf.copy_interleaved_ref(decoded);
                    samples.extend_from_slice(buf.samples());
                }
            }
            // A corrupt packet is skippable; the rest of the stream may decode.
            Err(SymphoniaError::DecodeError(e)) => {
                debug!("skipping undecodable packet in {}: {}", path.display(), e);
            }
            Err(e) => {
                return Err(DecodeError::Decode {
                    path: path.to_path_buf(),
                    detail: e.to_string(),
                });
            }
        }
    }

    if samples.is_empty() {
        return Err(DecodeError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!(
        "decoded {}: {} samples, {} ch, {} Hz",
        path.display(),
        samples.len(),
        channels,
        sample_rate
    );

    Ok(AudioBuffer::new(samples, channels as u16, sample_rate))
}
