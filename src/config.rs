// SPDX-License-Identifier: GPL-3.0-only

//! Viewer configuration
//!
//! The viewers take no arguments and read no files; this struct gathers the
//! compiled-in defaults in one place so tests and alternative front-ends
//! can override them.

use crate::constants::{QUIT_KEY, depth, overlay, timing};
use std::time::Duration;

/// Which depth sensor family the trackers run on
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SensorKind {
    /// Trackers open the default device and convert coordinates themselves
    #[default]
    PrimeSensor,
    /// The first enumerated device is opened explicitly and projects
    /// points itself, with the vertical axis flipped
    RealSense,
}

/// How depth maps onto the gray ramp
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DepthColoring {
    /// 0 mm is white, the display range end is black
    #[default]
    NearBright,
    /// 0 mm is black, the display range end is white
    NearDark,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Sensor family (selects device handling and projection)
    pub sensor: SensorKind,
    /// Requested depth stream width
    pub depth_width: u32,
    /// Requested depth stream height
    pub depth_height: u32,
    /// Requested depth stream framerate
    pub depth_fps: u32,
    /// Gray ramp direction
    pub coloring: DepthColoring,
    /// Joint confidence below which skeleton joints are skipped
    pub joint_confidence_threshold: f32,
    /// How long each tick waits for a key press
    pub key_wait: Duration,
    /// Key that ends the viewer
    pub quit_key: char,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            sensor: SensorKind::default(),
            depth_width: depth::DEFAULT_WIDTH,
            depth_height: depth::DEFAULT_HEIGHT,
            depth_fps: depth::DEFAULT_FPS,
            coloring: DepthColoring::default(),
            joint_confidence_threshold: overlay::JOINT_CONFIDENCE_THRESHOLD,
            key_wait: timing::KEY_WAIT,
            quit_key: QUIT_KEY,
        }
    }
}
