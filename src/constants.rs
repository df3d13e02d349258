// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use image::Rgb;
use std::time::Duration;

/// Depth range and visualization
pub mod depth {
    /// Depth mapped to the far end of the gray ramp (millimeters).
    /// Samples above this saturate.
    pub const DISPLAY_RANGE_MM: u16 = 10_000;

    /// Default depth stream resolution
    pub const DEFAULT_WIDTH: u32 = 640;
    pub const DEFAULT_HEIGHT: u32 = 480;

    /// Default depth stream framerate
    pub const DEFAULT_FPS: u32 = 30;
}

/// Kinect pinhole intrinsics at the 640x480 reference resolution
pub mod intrinsics {
    /// Focal length X (pixels)
    pub const FX: f32 = 594.21;
    /// Focal length Y (pixels)
    pub const FY: f32 = 591.04;
    /// Principal point X (pixels)
    pub const CX: f32 = 339.5;
    /// Principal point Y (pixels)
    pub const CY: f32 = 242.7;

    pub const BASE_WIDTH: f32 = 640.0;
    pub const BASE_HEIGHT: f32 = 480.0;
}

/// Overlay palette and layout
pub mod overlay {
    use super::Rgb;

    /// Number of distinct subject colors
    pub const PALETTE_SIZE: usize = 6;

    /// Subject colors in order: blue, green, red, cyan, magenta, yellow
    pub const PALETTE: [Rgb<u8>; PALETTE_SIZE] = [
        Rgb([0, 0, 255]),
        Rgb([0, 255, 0]),
        Rgb([255, 0, 0]),
        Rgb([0, 255, 255]),
        Rgb([255, 0, 255]),
        Rgb([255, 255, 0]),
    ];

    /// Label color used by the gesture viewer
    pub const LABEL_BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    /// Hand marker: hollow circle
    pub const HAND_RADIUS: i32 = 30;
    pub const HAND_THICKNESS: i32 = 2;

    /// Skeleton joint marker: filled circle
    pub const JOINT_RADIUS: i32 = 5;

    /// Joints below this position confidence are not drawn
    pub const JOINT_CONFIDENCE_THRESHOLD: f32 = 0.7;

    /// Status labels start at (LABEL_ORIGIN_X, LABEL_ORIGIN_Y) and advance by LABEL_LINE_STEP
    pub const LABEL_ORIGIN_X: i32 = 20;
    pub const LABEL_ORIGIN_Y: i32 = 20;
    pub const LABEL_LINE_STEP: i32 = 20;
}

/// Window titles, one per viewer
pub mod windows {
    pub const HAND: &str = "Hand";
    pub const GESTURE: &str = "Gesture";
    pub const SKELETON: &str = "Skeleton";
    pub const POSE: &str = "Pose";
    pub const USER: &str = "User";
}

/// Main loop timing
pub mod timing {
    use super::Duration;

    /// How long each tick waits for a key press
    pub const KEY_WAIT: Duration = Duration::from_millis(10);

    /// Log a frame summary every N frames
    pub const FRAME_LOG_INTERVAL: u64 = 30;
}

/// Key that ends every viewer
pub const QUIT_KEY: char = 'q';
