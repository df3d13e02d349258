// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests running every viewer against the synthetic sensor

mod common;

use common::RecordingWindow;
use tracker_viewer::backends::synthetic::{SCENE_PERIOD, SyntheticBackend};
use tracker_viewer::constants::overlay::PALETTE;
use tracker_viewer::samples::{self, SampleKind};
use tracker_viewer::sdk::{PoseType, TrackingBackend};
use tracker_viewer::{SensorKind, ViewerConfig};

fn small_config() -> ViewerConfig {
    ViewerConfig {
        depth_width: 160,
        depth_height: 120,
        ..ViewerConfig::default()
    }
}

/// Run `kind` for `ticks` iterations and return the recorded window
fn run_for(kind: SampleKind, config: &ViewerConfig, ticks: usize) -> RecordingWindow {
    let mut backend = SyntheticBackend::new(config.depth_width, config.depth_height);
    let mut viewer = samples::create(kind, &mut backend, config).unwrap();
    let mut window = RecordingWindow::with_keys(std::iter::repeat_n(None, ticks - 1));
    let completed = samples::run(viewer.as_mut(), &mut window, config).unwrap();
    assert_eq!(completed, ticks as u64);
    window
}

#[test]
fn test_every_viewer_runs() {
    for kind in SampleKind::ALL {
        let window = run_for(kind, &small_config(), 60);
        // The first frame has no depth reading yet
        assert_eq!(window.shown.len(), 59, "{kind:?}");
        assert!(window.shown.iter().all(|(title, _)| title == kind.window_name()));
        let (_, image) = &window.shown[0];
        assert_eq!((image.width(), image.height()), (160, 120));
    }
}

#[test]
fn test_realsense_opens_the_virtual_device() {
    let config = ViewerConfig {
        sensor: SensorKind::RealSense,
        ..small_config()
    };
    let window = run_for(SampleKind::Skeleton, &config, 70);
    let last = &window.shown.last().unwrap().1;
    assert!(last.pixels.pixels().any(|p| *p == PALETTE[0]));
}

#[test]
fn test_skeleton_appears_after_calibration() {
    let window = run_for(SampleKind::Skeleton, &small_config(), 70);
    let colored = |index: usize| {
        window.shown[index]
            .1
            .pixels
            .pixels()
            .any(|p| *p == PALETTE[0])
    };
    // User 1 enters at tick 45 and calibrates for 10 ticks
    assert!(!colored(44));
    assert!(colored(window.shown.len() - 1));
}

#[test]
fn test_user_map_colors_first_user() {
    let window = run_for(SampleKind::User, &small_config(), 50);
    let last = &window.shown.last().unwrap().1;
    assert!(last.pixels.pixels().any(|p| *p == PALETTE[0]));
    assert!(!last.pixels.pixels().any(|p| *p == PALETTE[1]));
}

#[test]
fn test_pose_labels_for_tracked_user() {
    let window = run_for(SampleKind::Pose, &small_config(), 70);
    let last = &window.shown.last().unwrap().1;
    let texts: Vec<_> = last.labels.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["Psi is not detected", "Crossed Hands is not detected"]);
}

#[test]
fn test_gesture_labels_follow_the_routine() {
    // Wave runs from tick 75 to 115
    let window = run_for(SampleKind::Gesture, &small_config(), 100);
    let last = &window.shown.last().unwrap().1;
    let texts: Vec<_> = last.labels.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["Wave is in progress"]);
}

#[test]
fn test_hand_viewer_tracks_after_wave() {
    let window = run_for(SampleKind::Hand, &small_config(), 130);
    let last = &window.shown.last().unwrap().1;
    // First tracked hand gets id 1
    assert!(last.pixels.pixels().any(|p| *p == PALETTE[1]));
}

#[test]
fn test_scene_repeats() {
    let config = small_config();
    let mut backend = SyntheticBackend::new(config.depth_width, config.depth_height);
    backend.initialize_driver();
    backend.initialize_middleware();
    let mut tracker = backend.create_user_tracker(None).unwrap();

    let frames: Vec<_> = (0..=SCENE_PERIOD + 1)
        .map(|_| tracker.read_frame().unwrap())
        .collect();
    let first = &frames[1];
    let again = &frames[SCENE_PERIOD as usize + 1];
    assert_eq!(first.depth, again.depth);
    assert_eq!(first.user_map, again.user_map);
    assert!(tracker.start_pose_detection(1, PoseType::Psi).is_err());
}
