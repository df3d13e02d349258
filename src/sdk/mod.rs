// SPDX-License-Identifier: GPL-3.0-only

//! Tracking middleware abstraction
//!
//! The viewers never talk to a sensor directly. Everything they need from
//! the depth driver and the tracking middleware goes through these traits:
//!
//! ```text
//! ┌─────────────────────┐
//! │  Viewer (samples)   │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  TrackingBackend    │  ← driver/middleware init, device discovery
//! └──────────┬──────────┘
//!            │ creates
//!            ▼
//! ┌──────────────┐ ┌──────────────┐ ┌──────────────┐
//! │ HandTracker  │ │ UserTracker  │ │ DepthDevice  │
//! └──────────────┘ └──────────────┘ └──────────────┘
//! ```
//!
//! Calls report failure as a non-[`Status::Ok`] status; callers turn those
//! into errors with [`CheckStatus`].

mod types;

pub use types::*;

/// Identity of an attached depth sensor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub name: String,
    pub vendor: String,
    pub uri: String,
}

/// An explicitly opened depth sensor
pub trait DepthDevice: Send + Sync {
    fn info(&self) -> &DeviceInfo;

    /// Project a real-world point to pixel coordinates using the device's
    /// own calibration. The vertical pixel axis grows upwards from the
    /// bottom row.
    fn project_point_to_pixel(&self, point: Point3) -> Result<[f32; 2], Status>;
}

/// Hand and gesture tracking
pub trait HandTracker: Send + Sync {
    /// Begin reporting gestures of the given type
    fn start_gesture_detection(&mut self, gesture: GestureType) -> Result<(), Status>;

    /// Begin tracking a hand near `position`, returning the new hand id
    fn start_hand_tracking(&mut self, position: Point3) -> Result<HandId, Status>;

    /// Block until the next frame is available
    fn read_frame(&mut self) -> Result<HandFrame, Status>;

    /// Convert a real-world hand position to depth pixel coordinates
    fn convert_hand_coordinates_to_depth(&self, position: Point3) -> Result<(f32, f32), Status>;
}

/// User segmentation, skeleton and pose tracking
pub trait UserTracker: Send + Sync {
    fn start_skeleton_tracking(&mut self, user: UserId) -> Result<(), Status>;

    fn start_pose_detection(&mut self, user: UserId, pose: PoseType) -> Result<(), Status>;

    /// Block until the next frame is available
    fn read_frame(&mut self) -> Result<UserFrame, Status>;

    /// Convert a real-world joint position to depth pixel coordinates
    fn convert_joint_coordinates_to_depth(&self, position: Point3)
    -> Result<(f32, f32), Status>;
}

/// Entry point into a driver + middleware pair
pub trait TrackingBackend {
    /// Short name for logging
    fn name(&self) -> &str;

    /// Initialize the depth sensor driver
    fn initialize_driver(&mut self) -> Status;

    /// Initialize the tracking middleware
    fn initialize_middleware(&mut self) -> Status;

    /// List attached depth sensors
    fn enumerate_devices(&self) -> Vec<DeviceInfo>;

    /// Open a sensor by uri
    fn open_device(&mut self, uri: &str) -> Result<Box<dyn DepthDevice>, Status>;

    /// Create a hand tracker on `device`, or on the default device when `None`
    fn create_hand_tracker(
        &mut self,
        device: Option<&dyn DepthDevice>,
    ) -> Result<Box<dyn HandTracker>, Status>;

    /// Create a user tracker on `device`, or on the default device when `None`
    fn create_user_tracker(
        &mut self,
        device: Option<&dyn DepthDevice>,
    ) -> Result<Box<dyn UserTracker>, Status>;
}
