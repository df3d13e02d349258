// SPDX-License-Identifier: GPL-3.0-only

//! Real-world to depth-pixel projection
//!
//! Trackers on a PrimeSensor-style device convert coordinates themselves.
//! An explicitly opened device (RealSense) projects through its own
//! calibration and reports the vertical axis bottom-up, so the row is
//! flipped against the frame height here.

use crate::errors::SdkError;
use crate::sdk::{CheckStatus, DepthDevice, HandTracker, Point3, UserTracker};

#[derive(Clone, Copy)]
pub enum Projection<'a> {
    Hand(&'a dyn HandTracker),
    Joint(&'a dyn UserTracker),
    Device {
        device: &'a dyn DepthDevice,
        frame_height: u32,
    },
}

impl Projection<'_> {
    /// Depth pixel coordinates of a real-world point; any failed
    /// conversion call is an error
    pub fn to_depth(&self, position: Point3) -> Result<(f32, f32), SdkError> {
        match self {
            Projection::Hand(tracker) => tracker
                .convert_hand_coordinates_to_depth(position)
                .check("HandTracker::convert_hand_coordinates_to_depth"),
            Projection::Joint(tracker) => tracker
                .convert_joint_coordinates_to_depth(position)
                .check("UserTracker::convert_joint_coordinates_to_depth"),
            Projection::Device {
                device,
                frame_height,
            } => {
                let [x, y] = device
                    .project_point_to_pixel(position)
                    .check("DepthDevice::project_point_to_pixel")?;
                Ok((x, *frame_height as f32 - y))
            }
        }
    }
}
