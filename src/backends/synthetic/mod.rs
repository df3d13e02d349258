// SPDX-License-Identifier: GPL-3.0-only

//! Built-in virtual depth sensor
//!
//! Stands in for a real driver and tracking middleware so every viewer can
//! run without hardware. The scene is scripted and deterministic: the same
//! tick always yields the same people, postures, gestures and poses.
//!
//! ```text
//! scene (people_at(tick))
//!        │
//!        ├──▶ render: capsule bodies → depth + user map
//!        │
//!        └──▶ trackers: gestures, hands, skeletons, poses
//! ```

mod render;
mod scene;
mod trackers;

pub use scene::{Camera, SCENE_PERIOD};
pub use trackers::{CALIBRATION_TICKS, FrameClock, SyntheticHandTracker, SyntheticUserTracker};

use crate::sdk::{
    DepthDevice, DeviceInfo, HandTracker, Point3, Status, TrackingBackend, UserTracker,
};
use tracing::{debug, info};

pub const DEVICE_URI: &str = "synthetic://depth/0";

/// The single virtual device
///
/// Its pixel projection follows the driver convention of a y axis that
/// grows upward from the bottom row.
#[derive(Debug, Clone)]
pub struct SyntheticDevice {
    info: DeviceInfo,
    camera: Camera,
}

impl SyntheticDevice {
    fn new(camera: Camera) -> Self {
        Self {
            info: DeviceInfo {
                name: "Synthetic Depth Sensor".to_string(),
                vendor: env!("CARGO_PKG_NAME").to_string(),
                uri: DEVICE_URI.to_string(),
            },
            camera,
        }
    }
}

impl DepthDevice for SyntheticDevice {
    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn project_point_to_pixel(&self, point: Point3) -> Result<[f32; 2], Status> {
        let (x, y) = self.camera.project(point).ok_or(Status::Error)?;
        Ok([x, self.camera.height as f32 - y])
    }
}

pub struct SyntheticBackend {
    camera: Camera,
    fps: Option<u32>,
    driver_ready: bool,
    middleware_ready: bool,
}

impl SyntheticBackend {
    /// Unpaced backend: frames are produced as fast as they are read
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            camera: Camera::new(width, height),
            fps: None,
            driver_ready: false,
            middleware_ready: false,
        }
    }

    /// Pace frame reads to `fps`, like a sensor streaming at that rate
    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        self.fps = Some(fps);
        self
    }

    fn trackers_ready(&self) -> Result<(), Status> {
        if self.driver_ready && self.middleware_ready {
            Ok(())
        } else {
            Err(Status::OutOfFlow)
        }
    }
}

impl TrackingBackend for SyntheticBackend {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn initialize_driver(&mut self) -> Status {
        self.driver_ready = true;
        debug!(
            width = self.camera.width,
            height = self.camera.height,
            "Synthetic driver initialized"
        );
        Status::Ok
    }

    fn initialize_middleware(&mut self) -> Status {
        if !self.driver_ready {
            return Status::OutOfFlow;
        }
        self.middleware_ready = true;
        Status::Ok
    }

    fn enumerate_devices(&self) -> Vec<DeviceInfo> {
        if !self.driver_ready {
            return Vec::new();
        }
        vec![SyntheticDevice::new(self.camera).info]
    }

    fn open_device(&mut self, uri: &str) -> Result<Box<dyn DepthDevice>, Status> {
        if !self.driver_ready {
            return Err(Status::OutOfFlow);
        }
        if uri != DEVICE_URI {
            return Err(Status::Error);
        }
        info!(uri, "Opened synthetic depth device");
        Ok(Box::new(SyntheticDevice::new(self.camera)))
    }

    fn create_hand_tracker(
        &mut self,
        _device: Option<&dyn DepthDevice>,
    ) -> Result<Box<dyn HandTracker>, Status> {
        self.trackers_ready()?;
        Ok(Box::new(SyntheticHandTracker::new(
            self.camera,
            FrameClock::new(self.fps),
        )))
    }

    fn create_user_tracker(
        &mut self,
        _device: Option<&dyn DepthDevice>,
    ) -> Result<Box<dyn UserTracker>, Status> {
        self.trackers_ready()?;
        Ok(Box::new(SyntheticUserTracker::new(
            self.camera,
            FrameClock::new(self.fps),
        )))
    }
}
