// SPDX-License-Identifier: GPL-3.0-only

//! Scripted backend and recording window shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracker_viewer::AppResult;
use tracker_viewer::display::Window;
use tracker_viewer::pipeline::DisplayImage;
use tracker_viewer::sdk::{
    DepthDevice, DepthFrame, DeviceInfo, GestureType, HandFrame, HandId, HandTracker, Point3,
    PoseType, Status, TrackingBackend, UserFrame, UserId, UserTracker,
};

/// Calls the viewers made against the scripted trackers
#[derive(Debug, Default)]
pub struct CallLog {
    pub gesture_detection: Vec<GestureType>,
    pub hand_tracking: Vec<Point3>,
    pub skeleton_tracking: Vec<UserId>,
    pub pose_detection: Vec<(UserId, PoseType)>,
}

/// Statuses and frames the scripted backend hands out
pub struct Script {
    pub driver: Status,
    pub middleware: Status,
    pub devices: Vec<DeviceInfo>,
    pub gesture_detection: Result<(), Status>,
    pub hand_tracking: Result<HandId, Status>,
    pub skeleton_tracking: Result<(), Status>,
    pub pose_detection: Result<(), Status>,
    pub hand_frames: Vec<Result<HandFrame, Status>>,
    pub user_frames: Vec<Result<UserFrame, Status>>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            driver: Status::Ok,
            middleware: Status::Ok,
            devices: Vec::new(),
            gesture_detection: Ok(()),
            hand_tracking: Ok(1),
            skeleton_tracking: Ok(()),
            pose_detection: Ok(()),
            hand_frames: Vec::new(),
            user_frames: Vec::new(),
        }
    }
}

pub fn device_info() -> DeviceInfo {
    DeviceInfo {
        name: "Scripted Sensor".to_string(),
        vendor: "test".to_string(),
        uri: "scripted://0".to_string(),
    }
}

/// Depth frame filled with one value
pub fn flat_depth(width: u32, height: u32, mm: u16) -> DepthFrame {
    DepthFrame::new(width, height, vec![mm; (width * height) as usize]).unwrap()
}

pub struct ScriptedBackend {
    script: Script,
    pub log: Arc<Mutex<CallLog>>,
}

impl ScriptedBackend {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            log: Arc::default(),
        }
    }
}

impl TrackingBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    fn initialize_driver(&mut self) -> Status {
        self.script.driver
    }

    fn initialize_middleware(&mut self) -> Status {
        self.script.middleware
    }

    fn enumerate_devices(&self) -> Vec<DeviceInfo> {
        self.script.devices.clone()
    }

    fn open_device(&mut self, uri: &str) -> Result<Box<dyn DepthDevice>, Status> {
        let info = self
            .script
            .devices
            .iter()
            .find(|d| d.uri == uri)
            .cloned()
            .ok_or(Status::Error)?;
        Ok(Box::new(ScriptedDevice { info }))
    }

    fn create_hand_tracker(
        &mut self,
        _device: Option<&dyn DepthDevice>,
    ) -> Result<Box<dyn HandTracker>, Status> {
        Ok(Box::new(ScriptedHandTracker {
            frames: std::mem::take(&mut self.script.hand_frames).into(),
            gesture_detection: self.script.gesture_detection,
            hand_tracking: self.script.hand_tracking,
            log: Arc::clone(&self.log),
        }))
    }

    fn create_user_tracker(
        &mut self,
        _device: Option<&dyn DepthDevice>,
    ) -> Result<Box<dyn UserTracker>, Status> {
        Ok(Box::new(ScriptedUserTracker {
            frames: std::mem::take(&mut self.script.user_frames).into(),
            skeleton_tracking: self.script.skeleton_tracking,
            pose_detection: self.script.pose_detection,
            log: Arc::clone(&self.log),
        }))
    }
}

/// Device projection: x and y copied through, y read as bottom-up
pub struct ScriptedDevice {
    info: DeviceInfo,
}

impl DepthDevice for ScriptedDevice {
    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn project_point_to_pixel(&self, point: Point3) -> Result<[f32; 2], Status> {
        Ok([point.x, point.y])
    }
}

/// Tracker projection: x and y copied through, z ignored
fn identity(position: Point3) -> Result<(f32, f32), Status> {
    if position.z < 0.0 {
        return Err(Status::Error);
    }
    Ok((position.x, position.y))
}

pub struct ScriptedHandTracker {
    frames: VecDeque<Result<HandFrame, Status>>,
    gesture_detection: Result<(), Status>,
    hand_tracking: Result<HandId, Status>,
    log: Arc<Mutex<CallLog>>,
}

impl HandTracker for ScriptedHandTracker {
    fn start_gesture_detection(&mut self, gesture: GestureType) -> Result<(), Status> {
        self.log.lock().unwrap().gesture_detection.push(gesture);
        self.gesture_detection
    }

    fn start_hand_tracking(&mut self, position: Point3) -> Result<HandId, Status> {
        self.log.lock().unwrap().hand_tracking.push(position);
        self.hand_tracking
    }

    fn read_frame(&mut self) -> Result<HandFrame, Status> {
        self.frames.pop_front().unwrap_or_else(|| Ok(HandFrame::default()))
    }

    fn convert_hand_coordinates_to_depth(&self, position: Point3) -> Result<(f32, f32), Status> {
        identity(position)
    }
}

pub struct ScriptedUserTracker {
    frames: VecDeque<Result<UserFrame, Status>>,
    skeleton_tracking: Result<(), Status>,
    pose_detection: Result<(), Status>,
    log: Arc<Mutex<CallLog>>,
}

impl UserTracker for ScriptedUserTracker {
    fn start_skeleton_tracking(&mut self, user: UserId) -> Result<(), Status> {
        self.log.lock().unwrap().skeleton_tracking.push(user);
        self.skeleton_tracking
    }

    fn start_pose_detection(&mut self, user: UserId, pose: PoseType) -> Result<(), Status> {
        self.log.lock().unwrap().pose_detection.push((user, pose));
        self.pose_detection
    }

    fn read_frame(&mut self) -> Result<UserFrame, Status> {
        self.frames.pop_front().unwrap_or_else(|| Ok(UserFrame::default()))
    }

    fn convert_joint_coordinates_to_depth(&self, position: Point3) -> Result<(f32, f32), Status> {
        identity(position)
    }
}

/// Window that records what it is shown and replays scripted keys
///
/// Once the scripted keys run out it answers `q`.
#[derive(Default)]
pub struct RecordingWindow {
    pub shown: Vec<(String, DisplayImage)>,
    pub keys: VecDeque<Option<char>>,
    pub waits: Vec<Duration>,
    pub destroyed: usize,
}

impl RecordingWindow {
    pub fn with_keys(keys: impl IntoIterator<Item = Option<char>>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Window for RecordingWindow {
    fn show(&mut self, title: &str, image: &DisplayImage) -> AppResult<()> {
        self.shown.push((title.to_string(), image.clone()));
        Ok(())
    }

    fn wait_key(&mut self, timeout: Duration) -> AppResult<Option<char>> {
        self.waits.push(timeout);
        Ok(self.keys.pop_front().unwrap_or(Some('q')))
    }

    fn destroy(&mut self) -> AppResult<()> {
        self.destroyed += 1;
        Ok(())
    }
}
