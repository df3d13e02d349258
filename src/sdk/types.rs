// SPDX-License-Identifier: GPL-3.0-only

//! Data reported by the sensor driver and the tracking middleware

use crate::errors::{FrameError, SdkError};

/// Status code returned by every driver and middleware call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Status {
    Ok = 0,
    Error = 1,
    BadUserId = 2,
    OutOfFlow = 3,
}

impl Status {
    /// Numeric status code as the middleware reports it
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }
}

/// Turns a middleware status into a `Result`, naming the failed call
///
/// ```
/// use tracker_viewer::sdk::{CheckStatus, Status};
///
/// assert!(Status::Ok.check("NiTE::initialize").is_ok());
/// let err = Status::Error.check("NiTE::initialize").unwrap_err();
/// assert_eq!(err.to_string(), "failed NiTE::initialize 1");
/// ```
pub trait CheckStatus<T> {
    fn check(self, call: &'static str) -> Result<T, SdkError>;
}

impl CheckStatus<()> for Status {
    fn check(self, call: &'static str) -> Result<(), SdkError> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(SdkError::new(call, self))
        }
    }
}

impl<T> CheckStatus<T> for Result<T, Status> {
    fn check(self, call: &'static str) -> Result<T, SdkError> {
        self.map_err(|status| SdkError::new(call, status))
    }
}

/// A point in real-world coordinates (millimeters, sensor at the origin,
/// x right, y up, z away from the sensor)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One depth snapshot: row-major millimeter samples
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DepthFrame {
    width: u32,
    height: u32,
    data: Vec<u16>,
}

impl DepthFrame {
    /// Wrap row-major samples; the buffer must hold exactly `width * height` values
    pub fn new(width: u32, height: u32, data: Vec<u16>) -> Result<Self, FrameError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(FrameError::SizeMismatch {
                expected: expected * 2,
                actual: data.len() * 2,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a frame from a driver buffer of native-endian 16-bit samples
    pub fn from_raw_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, FrameError> {
        let expected = width as usize * height as usize * 2;
        if bytes.len() != expected {
            return Err(FrameError::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        // Copies, so the driver buffer does not need u16 alignment
        let data: Vec<u16> = bytemuck::pod_collect_to_vec(bytes);
        Self::new(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u16] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample at (x, y), `None` outside the frame
    pub fn get(&self, x: u32, y: u32) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

pub type HandId = i16;
pub type UserId = u16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandState {
    /// First frame of a newly tracked hand (already tracking)
    New,
    Tracking,
    /// Tracking ended this frame; the hand will not be reported again
    Lost,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandData {
    pub id: HandId,
    pub position: Point3,
    pub state: HandState,
}

impl HandData {
    pub fn is_tracking(&self) -> bool {
        matches!(self.state, HandState::New | HandState::Tracking)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureType {
    Wave,
    Click,
    HandRaise,
}

impl GestureType {
    pub const ALL: [GestureType; 3] = [
        GestureType::Wave,
        GestureType::Click,
        GestureType::HandRaise,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            GestureType::Wave => "Wave",
            GestureType::Click => "Click",
            GestureType::HandRaise => "Hand Raise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    InProgress,
    Complete,
    /// Reported but neither progressing nor complete
    Idle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureData {
    pub kind: GestureType,
    pub current_position: Point3,
    pub state: GestureState,
}

impl GestureData {
    pub fn is_in_progress(&self) -> bool {
        self.state == GestureState::InProgress
    }

    pub fn is_complete(&self) -> bool {
        self.state == GestureState::Complete
    }
}

/// Skeleton joints in middleware order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointType {
    Head,
    Neck,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftHand,
    RightHand,
    Torso,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftFoot,
    RightFoot,
}

pub const JOINT_COUNT: usize = 15;

impl JointType {
    pub const ALL: [JointType; JOINT_COUNT] = [
        JointType::Head,
        JointType::Neck,
        JointType::LeftShoulder,
        JointType::RightShoulder,
        JointType::LeftElbow,
        JointType::RightElbow,
        JointType::LeftHand,
        JointType::RightHand,
        JointType::Torso,
        JointType::LeftHip,
        JointType::RightHip,
        JointType::LeftKnee,
        JointType::RightKnee,
        JointType::LeftFoot,
        JointType::RightFoot,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonJoint {
    pub kind: JointType,
    pub position: Point3,
    /// Position confidence in [0, 1]
    pub confidence: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkeletonState {
    #[default]
    None,
    Calibrating,
    Tracked,
    CalibrationError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    pub state: SkeletonState,
    joints: [SkeletonJoint; JOINT_COUNT],
}

impl Skeleton {
    pub fn new(state: SkeletonState, joints: [SkeletonJoint; JOINT_COUNT]) -> Self {
        Self { state, joints }
    }

    /// A skeleton with every joint at the origin and zero confidence
    pub fn untracked() -> Self {
        let joints = JointType::ALL.map(|kind| SkeletonJoint {
            kind,
            position: Point3::default(),
            confidence: 0.0,
        });
        Self::new(SkeletonState::None, joints)
    }

    pub fn joint(&self, kind: JointType) -> &SkeletonJoint {
        &self.joints[kind.index()]
    }

    pub fn joints(&self) -> &[SkeletonJoint; JOINT_COUNT] {
        &self.joints
    }

    pub fn is_tracked(&self) -> bool {
        self.state == SkeletonState::Tracked
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseType {
    Psi,
    CrossedHands,
}

pub const POSE_COUNT: usize = 2;

impl PoseType {
    pub const ALL: [PoseType; POSE_COUNT] = [PoseType::Psi, PoseType::CrossedHands];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PoseType::Psi => "Psi",
            PoseType::CrossedHands => "Crossed Hands",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoseState {
    /// Pose was assumed this frame
    Entered,
    /// Pose is being held
    Held,
    /// Pose was released this frame
    Exited,
    #[default]
    NotDetected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoseData {
    pub kind: PoseType,
    pub state: PoseState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserData {
    pub id: UserId,
    /// First frame this user is reported
    pub is_new: bool,
    pub is_visible: bool,
    /// Last frame this user is reported
    pub is_lost: bool,
    pub skeleton: Skeleton,
    poses: [PoseData; POSE_COUNT],
}

impl UserData {
    pub fn new(id: UserId, skeleton: Skeleton) -> Self {
        Self {
            id,
            is_new: false,
            is_visible: true,
            is_lost: false,
            skeleton,
            poses: PoseType::ALL.map(|kind| PoseData {
                kind,
                state: PoseState::NotDetected,
            }),
        }
    }

    pub fn pose(&self, kind: PoseType) -> &PoseData {
        &self.poses[kind.index()]
    }

    pub fn set_pose(&mut self, kind: PoseType, state: PoseState) {
        self.poses[kind.index()].state = state;
    }
}

/// Per-pixel user segmentation, 0 = background
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserMap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<UserId>,
}

/// Result of one hand tracker read
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandFrame {
    pub frame_index: u64,
    pub depth: Option<DepthFrame>,
    pub hands: Vec<HandData>,
    pub gestures: Vec<GestureData>,
}

/// Result of one user tracker read
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserFrame {
    pub frame_index: u64,
    pub depth: Option<DepthFrame>,
    pub users: Vec<UserData>,
    pub user_map: Option<UserMap>,
}
