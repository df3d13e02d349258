// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use image::Rgb;
use tracker_viewer::DepthColoring;
use tracker_viewer::constants::{depth, overlay, windows};
use tracker_viewer::pipeline::depth_intensity;
use tracker_viewer::samples::SampleKind;

#[test]
fn test_palette_colors() {
    // Blue, green, red, cyan, magenta, yellow
    assert_eq!(overlay::PALETTE.len(), overlay::PALETTE_SIZE);
    assert_eq!(overlay::PALETTE[0], Rgb([0, 0, 255]));
    assert_eq!(overlay::PALETTE[2], Rgb([255, 0, 0]));
    assert_eq!(overlay::PALETTE[5], Rgb([255, 255, 0]));
}

#[test]
fn test_palette_colors_are_distinct() {
    for (i, a) in overlay::PALETTE.iter().enumerate() {
        for b in &overlay::PALETTE[i + 1..] {
            assert_ne!(a, b, "Palette entries should be distinct");
        }
    }
}

#[test]
fn test_display_range_endpoints() {
    // Near is bright, the range limit and beyond are black
    assert_eq!(depth_intensity(0, DepthColoring::NearBright), 255);
    assert_eq!(depth_intensity(depth::DISPLAY_RANGE_MM, DepthColoring::NearBright), 0);
    assert_eq!(depth_intensity(u16::MAX, DepthColoring::NearBright), 0);
}

#[test]
fn test_window_names_match_samples() {
    assert_eq!(SampleKind::Hand.window_name(), windows::HAND);
    assert_eq!(SampleKind::User.window_name(), windows::USER);
    let mut names: Vec<_> = SampleKind::ALL.iter().map(|k| k.window_name()).collect();
    names.dedup();
    assert_eq!(names.len(), 5);
}
