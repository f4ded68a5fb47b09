//! Controller behavior over real directory trees and the server double.

mod common;

use std::fs;
use std::path::Path;
use std::time::Duration;

use common::{wait_for, write_wav, BlockServer};
use strata_core::controller::NavigationController;
use strata_core::decode::ChannelPolicy;
use strata_core::playback::AudioServer;

/// root/
///   albums/deep.wav   (0.3 s)
///   track.wav         (5 s, streams long enough to observe)
///   short.wav         (0.1 s)
///   notes.txt         (not audio)
fn music_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let albums = dir.path().join("albums");
    fs::create_dir(&albums).unwrap();
    write_wav(&albums.join("deep.wav"), 0.3, 2, 44_100);
    write_wav(&dir.path().join("track.wav"), 5.0, 2, 44_100);
    write_wav(&dir.path().join("short.wav"), 0.1, 2, 44_100);
    fs::write(dir.path().join("notes.txt"), b"not audio").unwrap();
    dir
}

fn controller(root: &Path, server: BlockServer) -> NavigationController<BlockServer> {
    NavigationController::new(server, root, ChannelPolicy::StereoOnly).unwrap()
}

fn select_by_name<S: AudioServer>(c: &mut NavigationController<S>, name: &str) {
    let idx = c
        .listing()
        .unwrap()
        .entries()
        .iter()
        .position(|e| e.name == name)
        .unwrap_or_else(|| panic!("{name} not in listing"));
    c.select_first();
    c.select_down(idx);
}

#[test]
fn starts_with_root_listing_at_depth_zero() {
    let tree = music_tree();
    let c = controller(tree.path(), BlockServer::new(64, Duration::ZERO));

    assert_eq!(c.depth(), 0);
    assert_eq!(c.listing().unwrap().len(), 4);
    assert_eq!(c.selected(), 0);
}

#[test]
fn missing_root_is_a_startup_error() {
    let tree = music_tree();
    let missing = tree.path().join("gone");
    let server = BlockServer::new(64, Duration::ZERO);
    assert!(NavigationController::new(server, &missing, ChannelPolicy::StereoOnly).is_err());
}

#[test]
fn descend_caches_level_and_lateral_moves_reuse_it() {
    let tree = music_tree();
    let mut c = controller(tree.path(), BlockServer::new(64, Duration::ZERO));

    select_by_name(&mut c, "albums");
    c.activate();
    assert_eq!(c.depth(), 1);
    assert_eq!(c.selected(), 0);
    assert_eq!(c.listing().unwrap().len(), 1);
    assert_eq!(c.listing().unwrap().entries()[0].name, "deep.wav");

    // Back toward the root: slot 0 still holds the original listing.
    assert!(c.move_shallower());
    assert_eq!(c.depth(), 0);
    assert_eq!(c.listing().unwrap().len(), 4);

    // Forward again without a rescan: slot 1 is still populated.
    assert!(c.move_deeper());
    assert_eq!(c.depth(), 1);
    assert_eq!(c.listing().unwrap().entries()[0].name, "deep.wav");
}

#[test]
fn lateral_move_into_unscanned_slot_is_rejected() {
    let tree = music_tree();
    let mut c = controller(tree.path(), BlockServer::new(64, Duration::ZERO));

    // Depth 1 has never been scanned; the key must not move.
    assert!(!c.move_deeper());
    assert_eq!(c.depth(), 0);

    // And there is nothing shallower than the root.
    assert!(!c.move_shallower());
    assert_eq!(c.depth(), 0);
}

#[test]
fn failed_descend_leaves_navigation_state_unchanged() {
    let tree = music_tree();
    let mut c = controller(tree.path(), BlockServer::new(64, Duration::ZERO));

    select_by_name(&mut c, "albums");
    let row_before = c.selected();
    fs::remove_dir_all(tree.path().join("albums")).unwrap();

    c.activate();

    assert_eq!(c.depth(), 0);
    assert_eq!(c.selected(), row_before);
    assert_eq!(c.listing().unwrap().len(), 4);
}

#[test]
fn activating_a_file_starts_playback() {
    let tree = music_tree();
    let server = BlockServer::new(64, Duration::from_millis(1));
    let mut c = controller(tree.path(), server.clone());

    select_by_name(&mut c, "track.wav");
    c.activate();

    assert!(c.is_playing());
    assert_eq!(c.playing_path(), Some(tree.path().join("track.wav")).as_deref());
    assert!(wait_for(Duration::from_secs(2), || {
        server.active_threads() == 1
    }));
}

#[test]
fn replacing_playback_keeps_one_render_thread() {
    let tree = music_tree();
    let server = BlockServer::new(64, Duration::from_millis(1));
    let mut c = controller(tree.path(), server.clone());

    select_by_name(&mut c, "track.wav");
    c.activate();
    assert!(wait_for(Duration::from_secs(2), || {
        server.active_threads() == 1
    }));

    // Activating another file cancels and joins the old session first.
    select_by_name(&mut c, "short.wav");
    c.activate();

    assert_eq!(server.streams_started(), 2);
    assert!(server.active_threads() <= 1);
    assert_eq!(c.playing_path(), Some(tree.path().join("short.wav")).as_deref());
}

#[test]
fn undecodable_file_does_not_start_a_session() {
    let tree = music_tree();
    let server = BlockServer::new(64, Duration::ZERO);
    let mut c = controller(tree.path(), server.clone());

    select_by_name(&mut c, "notes.txt");
    c.activate();

    assert!(!c.is_playing());
    assert_eq!(server.streams_started(), 0);
}

#[test]
fn finished_playback_is_reaped() {
    let tree = music_tree();
    let server = BlockServer::new(256, Duration::ZERO);
    let mut c = controller(tree.path(), server.clone());

    select_by_name(&mut c, "short.wav");
    c.activate();

    assert!(wait_for(Duration::from_secs(2), || {
        server.active_threads() == 0
    }));
    c.reap_finished();
    assert!(!c.is_playing());
    assert!(c.playing_path().is_none());
}

#[test]
fn stop_ends_playback_immediately() {
    let tree = music_tree();
    let server = BlockServer::new(64, Duration::from_millis(1));
    let mut c = controller(tree.path(), server.clone());

    select_by_name(&mut c, "track.wav");
    c.activate();
    assert!(c.is_playing());

    c.stop();

    assert!(!c.is_playing());
    assert_eq!(server.active_threads(), 0);
}
