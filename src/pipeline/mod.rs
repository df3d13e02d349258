// SPDX-License-Identifier: GPL-3.0-only

//! Frame display pipeline
//!
//! One tick turns a tracker frame into something a window can show:
//!
//! 1. [`depth_to_image`]: 16-bit millimeters to 3-channel gray
//! 2. per-subject overlays, positioned through a [`Projection`]
//! 3. [`DisplayImage::apply`]: burn the overlays in
//!
//! A frame without depth data produces no image, and nothing is shown for
//! that tick.

mod colorize;
mod overlay;
mod projection;

pub use colorize::{depth_intensity, depth_to_image, paint_user_map};
pub use overlay::{DisplayImage, Overlay, PixelPos, Stroke, TextLabel};
pub use projection::Projection;

use crate::config::DepthColoring;
use crate::sdk::DepthFrame;

/// Start a display image from the frame's depth data, if it has any
pub fn render_depth(depth: Option<&DepthFrame>, coloring: DepthColoring) -> Option<DisplayImage> {
    depth
        .and_then(|frame| depth_to_image(frame, coloring))
        .map(DisplayImage::new)
}
