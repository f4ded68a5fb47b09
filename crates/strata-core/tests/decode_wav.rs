//! Decode tests over real WAV fixtures, through the full symphonia path.

mod common;

use common::write_wav;
use strata_core::decode::{decode_file, ChannelPolicy};
use strata_core::error::DecodeError;

#[test]
fn stereo_two_seconds_materializes_every_sample() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two-seconds.wav");
    write_wav(&path, 2.0, 2, 44_100);

    let buffer = decode_file(&path, ChannelPolicy::StereoOnly).unwrap();
    assert_eq!(buffer.channels(), 2);
    assert_eq!(buffer.sample_rate(), 44_100);
    assert_eq!(buffer.total_samples(), 2 * 44_100 * 2);
    assert_eq!(buffer.frames(), 2 * 44_100);
}

#[test]
fn stereo_policy_rejects_mono() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mono.wav");
    write_wav(&path, 0.5, 1, 44_100);

    match decode_file(&path, ChannelPolicy::StereoOnly) {
        Err(DecodeError::ChannelLayout { found, .. }) => assert_eq!(found, 1),
        other => panic!("expected channel-layout rejection, got {other:?}"),
    }
}

#[test]
fn any_policy_accepts_mono() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mono.wav");
    write_wav(&path, 0.5, 1, 22_050);

    let buffer = decode_file(&path, ChannelPolicy::Any).unwrap();
    assert_eq!(buffer.channels(), 1);
    assert_eq!(buffer.sample_rate(), 22_050);
    assert_eq!(buffer.total_samples(), 22_050 / 2);
}

#[test]
fn sample_rate_and_channels_pass_through_unmodified() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("odd-rate.wav");
    write_wav(&path, 0.25, 2, 48_000);

    let buffer = decode_file(&path, ChannelPolicy::StereoOnly).unwrap();
    assert_eq!(buffer.sample_rate(), 48_000);
    assert_eq!(buffer.channels(), 2);
}

#[test]
fn missing_file_is_an_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.wav");
    assert!(matches!(
        decode_file(&path, ChannelPolicy::StereoOnly),
        Err(DecodeError::Open { .. })
    ));
}

#[test]
fn non_audio_file_is_rejected_without_a_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.wav");
    std::fs::write(&path, b"this is not a waveform").unwrap();

    assert!(decode_file(&path, ChannelPolicy::StereoOnly).is_err());
}
