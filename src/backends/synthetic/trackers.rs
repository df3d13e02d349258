// SPDX-License-Identifier: GPL-3.0-only

//! Hand and user trackers over the scripted scene

use super::render::rasterize;
use super::scene::{Camera, Person, Presence, people_at};
use crate::sdk::{
    DepthFrame, GestureData, GestureType, HandData, HandFrame, HandId, HandState, HandTracker,
    JOINT_COUNT, JointType, POSE_COUNT, Point3, PoseType, Skeleton, SkeletonJoint, SkeletonState,
    Status, UserData, UserFrame, UserId, UserMap, UserTracker,
};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Ticks a skeleton stays in calibration after tracking is requested
pub const CALIBRATION_TICKS: u64 = 10;
/// A tracking request this close to a tracked hand returns that hand
const HAND_MATCH_MM: f32 = 150.0;
/// A new hand follows the nearest right hand within this distance
const HAND_CAPTURE_MM: f32 = 400.0;
const FOOT_CONFIDENCE: f32 = 0.5;

/// Frame counter with optional pacing to a fixed rate
#[derive(Debug)]
pub struct FrameClock {
    next_tick: u64,
    interval: Option<Duration>,
    last_frame: Option<Instant>,
}

impl FrameClock {
    pub fn new(fps: Option<u32>) -> Self {
        Self {
            next_tick: 0,
            interval: fps
                .filter(|&fps| fps > 0)
                .map(|fps| Duration::from_secs(1) / fps),
            last_frame: None,
        }
    }

    /// Tick of the most recent frame, 0 before the first read
    pub fn current(&self) -> u64 {
        self.next_tick.saturating_sub(1)
    }

    /// Block until the next frame is due and return its tick
    pub fn advance(&mut self) -> u64 {
        if let Some(interval) = self.interval
            && let Some(last) = self.last_frame
        {
            let elapsed = last.elapsed();
            if elapsed < interval {
                std::thread::sleep(interval - elapsed);
            }
        }
        self.last_frame = Some(Instant::now());
        let tick = self.next_tick;
        self.next_tick += 1;
        tick
    }
}

/// Depth for a tick; the first frame arrives before the sensor has
/// produced a reading
fn depth_frame(camera: &Camera, tick: u64, depth: Vec<u16>) -> Result<Option<DepthFrame>, Status> {
    if tick == 0 {
        return Ok(None);
    }
    DepthFrame::new(camera.width, camera.height, depth)
        .map(Some)
        .map_err(|_| Status::Error)
}

fn to_depth(camera: &Camera, position: Point3) -> Result<(f32, f32), Status> {
    camera.project(position).ok_or(Status::Error)
}

#[derive(Debug, Clone)]
struct TrackedHand {
    id: HandId,
    follows: Option<UserId>,
    position: Point3,
    reported: bool,
}

pub struct SyntheticHandTracker {
    camera: Camera,
    clock: FrameClock,
    gestures: Vec<GestureType>,
    hands: Vec<TrackedHand>,
    next_hand_id: HandId,
}

impl SyntheticHandTracker {
    pub fn new(camera: Camera, clock: FrameClock) -> Self {
        Self {
            camera,
            clock,
            gestures: Vec::new(),
            hands: Vec::new(),
            next_hand_id: 1,
        }
    }

    /// Move each hand with the person it follows; hands whose person is
    /// gone are reported lost once and dropped
    fn track_hands(&mut self, people: &[Person]) -> Vec<HandData> {
        let mut reports = Vec::with_capacity(self.hands.len());
        self.hands.retain_mut(|hand| {
            let person = hand.follows.and_then(|id| {
                people
                    .iter()
                    .find(|p| p.id == id && p.presence.is_visible())
            });
            let lost = hand.follows.is_some() && person.is_none();
            if let Some(person) = person {
                hand.position = person.joint(JointType::RightHand);
            }

            let state = if lost {
                HandState::Lost
            } else if hand.reported {
                HandState::Tracking
            } else {
                HandState::New
            };
            hand.reported = true;
            reports.push(HandData {
                id: hand.id,
                position: hand.position,
                state,
            });
            !lost
        });
        reports
    }
}

impl HandTracker for SyntheticHandTracker {
    fn start_gesture_detection(&mut self, gesture: GestureType) -> Result<(), Status> {
        if !self.gestures.contains(&gesture) {
            self.gestures.push(gesture);
        }
        debug!(?gesture, "Gesture detection started");
        Ok(())
    }

    fn start_hand_tracking(&mut self, position: Point3) -> Result<HandId, Status> {
        if position.z <= 0.0 {
            return Err(Status::Error);
        }

        if let Some(hand) = self
            .hands
            .iter()
            .find(|hand| distance(hand.position, position) < HAND_MATCH_MM)
        {
            return Ok(hand.id);
        }

        let follows = people_at(self.clock.current())
            .iter()
            .filter(|p| p.presence.is_visible())
            .map(|p| (p.id, distance(p.joint(JointType::RightHand), position)))
            .filter(|&(_, d)| d < HAND_CAPTURE_MM)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id);

        let id = self.next_hand_id;
        self.next_hand_id = self.next_hand_id.checked_add(1).unwrap_or(1);
        self.hands.push(TrackedHand {
            id,
            follows,
            position,
            reported: false,
        });
        debug!(hand_id = id, ?follows, "Hand tracking started");
        Ok(id)
    }

    fn read_frame(&mut self) -> Result<HandFrame, Status> {
        let tick = self.clock.advance();
        let people = people_at(tick);

        let gestures = people
            .iter()
            .filter(|p| p.presence.is_visible())
            .filter_map(|p| {
                let (kind, state) = p.gesture()?;
                self.gestures.contains(&kind).then(|| GestureData {
                    kind,
                    current_position: p.joint(JointType::RightHand),
                    state,
                })
            })
            .collect();
        let hands = self.track_hands(&people);

        let (depth, _) = rasterize(&self.camera, &people);
        trace!(tick, hands = hands.len(), "Hand frame");
        Ok(HandFrame {
            frame_index: tick,
            depth: depth_frame(&self.camera, tick, depth)?,
            hands,
            gestures,
        })
    }

    fn convert_hand_coordinates_to_depth(&self, position: Point3) -> Result<(f32, f32), Status> {
        to_depth(&self.camera, position)
    }
}

#[derive(Debug, Clone, Default)]
struct UserRequests {
    skeleton_since: Option<u64>,
    poses: [bool; POSE_COUNT],
}

pub struct SyntheticUserTracker {
    camera: Camera,
    clock: FrameClock,
    requests: HashMap<UserId, UserRequests>,
}

impl SyntheticUserTracker {
    pub fn new(camera: Camera, clock: FrameClock) -> Self {
        Self {
            camera,
            clock,
            requests: HashMap::new(),
        }
    }

    fn requests_for(&mut self, user: UserId) -> Result<&mut UserRequests, Status> {
        let present = people_at(self.clock.current())
            .iter()
            .any(|p| p.id == user && p.presence.is_visible());
        if !present {
            return Err(Status::BadUserId);
        }
        Ok(self.requests.entry(user).or_default())
    }

    fn user_data(&self, person: &Person, tick: u64) -> UserData {
        let requests = self.requests.get(&person.id);
        let since = requests
            .and_then(|r| r.skeleton_since)
            .filter(|_| person.presence.is_visible());
        let state = match since {
            None => SkeletonState::None,
            Some(since) if tick.saturating_sub(since) < CALIBRATION_TICKS => {
                SkeletonState::Calibrating
            }
            Some(_) => SkeletonState::Tracked,
        };
        let skeleton = if state == SkeletonState::Tracked {
            Skeleton::new(state, skeleton_joints(person))
        } else {
            let mut skeleton = Skeleton::untracked();
            skeleton.state = state;
            skeleton
        };

        let mut user = UserData::new(person.id, skeleton);
        user.is_new = person.presence == Presence::Entered;
        user.is_visible = person.presence.is_visible();
        user.is_lost = !user.is_visible;
        if let Some(requests) = requests {
            for kind in PoseType::ALL {
                if requests.poses[kind.index()] {
                    user.set_pose(kind, person.pose(kind));
                }
            }
        }
        user
    }
}

fn skeleton_joints(person: &Person) -> [SkeletonJoint; JOINT_COUNT] {
    JointType::ALL.map(|kind| SkeletonJoint {
        kind,
        position: person.joint(kind),
        confidence: match kind {
            JointType::LeftFoot | JointType::RightFoot => FOOT_CONFIDENCE,
            _ => 1.0,
        },
    })
}

impl UserTracker for SyntheticUserTracker {
    fn start_skeleton_tracking(&mut self, user: UserId) -> Result<(), Status> {
        let tick = self.clock.current();
        let requests = self.requests_for(user)?;
        requests.skeleton_since.get_or_insert(tick);
        debug!(user_id = user, "Skeleton tracking started");
        Ok(())
    }

    fn start_pose_detection(&mut self, user: UserId, pose: PoseType) -> Result<(), Status> {
        self.requests_for(user)?.poses[pose.index()] = true;
        debug!(user_id = user, ?pose, "Pose detection started");
        Ok(())
    }

    fn read_frame(&mut self) -> Result<UserFrame, Status> {
        let tick = self.clock.advance();
        let people = people_at(tick);
        let users: Vec<UserData> = people.iter().map(|p| self.user_data(p, tick)).collect();

        // Requests do not survive the user leaving
        for person in people.iter().filter(|p| !p.presence.is_visible()) {
            self.requests.remove(&person.id);
        }

        let (depth, labels) = rasterize(&self.camera, &people);
        let depth = depth_frame(&self.camera, tick, depth)?;
        let user_map = depth.as_ref().map(|_| UserMap {
            width: self.camera.width,
            height: self.camera.height,
            pixels: labels,
        });
        trace!(tick, users = users.len(), "User frame");
        Ok(UserFrame {
            frame_index: tick,
            depth,
            users,
            user_map,
        })
    }

    fn convert_joint_coordinates_to_depth(&self, position: Point3) -> Result<(f32, f32), Status> {
        to_depth(&self.camera, position)
    }
}

fn distance(a: Point3, b: Point3) -> f32 {
    let (dx, dy, dz) = (a.x - b.x, a.y - b.y, a.z - b.z);
    (dx * dx + dy * dy + dz * dz).sqrt()
}
