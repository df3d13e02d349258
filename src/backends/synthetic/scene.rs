// SPDX-License-Identifier: GPL-3.0-only

//! Scripted scene: a room with two people walking in and out
//!
//! Everything here is a pure function of the frame tick, so two trackers
//! reading the same tick see the same people in the same posture.
//!
//! Each person repeats a routine while present:
//!
//! ```text
//! age % 300   30..70   100..160   180..200   220..235   250..290
//!             Wave     Psi        Click      HandRaise  CrossedHands
//! ```

use crate::constants::intrinsics;
use crate::sdk::{
    GestureState, GestureType, JOINT_COUNT, JointType, Point3, PoseState, PoseType, UserId,
};
use std::f32::consts::TAU;

/// Length of one scene cycle in ticks
pub const SCENE_PERIOD: u64 = 900;
/// Back wall distance from the sensor
pub const WALL_MM: f32 = 3500.0;
/// Sensor height above the floor
pub const SENSOR_HEIGHT_MM: f32 = 1000.0;

const ROUTINE_PERIOD: u64 = 300;

/// Pinhole model with the Kinect intrinsics scaled to the frame size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub width: u32,
    pub height: u32,
    fx: f32,
    fy: f32,
    cx: f32,
    cy: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        let sx = width as f32 / intrinsics::BASE_WIDTH;
        let sy = height as f32 / intrinsics::BASE_HEIGHT;
        Self {
            width,
            height,
            fx: intrinsics::FX * sx,
            fy: intrinsics::FY * sy,
            cx: intrinsics::CX * sx,
            cy: intrinsics::CY * sy,
        }
    }

    /// Pixel coordinates (y down) of a point, `None` behind the sensor
    pub fn project(&self, p: Point3) -> Option<(f32, f32)> {
        if p.z <= 0.0 {
            return None;
        }
        Some((self.cx + self.fx * p.x / p.z, self.cy - self.fy * p.y / p.z))
    }

    /// Pixel length of `mm` seen at distance `z`
    pub fn scale_at(&self, mm: f32, z: f32) -> f32 {
        self.fx * mm / z
    }

    /// Depth of the empty room along pixel row `v`: floor below the
    /// horizon, back wall above it
    pub fn room_depth(&self, v: u32) -> f32 {
        let below = v as f32 + 0.5 - self.cy;
        if below <= 0.0 {
            return WALL_MM;
        }
        (SENSOR_HEIGHT_MM * self.fy / below).min(WALL_MM)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// First tick in view
    Entered,
    Present,
    /// Walked out this tick; reported once more, no longer visible
    Leaving,
}

impl Presence {
    pub fn is_visible(self) -> bool {
        self != Presence::Leaving
    }
}

#[derive(Debug, Clone, Copy)]
struct Actor {
    id: UserId,
    enter: u64,
    leave: u64,
    center_x: f32,
    depth: f32,
    sway: f32,
    sway_period: f32,
}

const ACTORS: [Actor; 2] = [
    Actor {
        id: 1,
        enter: 45,
        leave: 600,
        center_x: -300.0,
        depth: 2200.0,
        sway: 500.0,
        sway_period: 400.0,
    },
    Actor {
        id: 2,
        enter: 300,
        leave: 840,
        center_x: 500.0,
        depth: 2800.0,
        sway: 300.0,
        sway_period: 500.0,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Act {
    Gesture(GestureType),
    Pose(PoseType),
}

#[derive(Debug, Clone, Copy)]
struct Move {
    start: u64,
    end: u64,
    act: Act,
}

const ROUTINE: [Move; 5] = [
    Move {
        start: 30,
        end: 70,
        act: Act::Gesture(GestureType::Wave),
    },
    Move {
        start: 100,
        end: 160,
        act: Act::Pose(PoseType::Psi),
    },
    Move {
        start: 180,
        end: 200,
        act: Act::Gesture(GestureType::Click),
    },
    Move {
        start: 220,
        end: 235,
        act: Act::Gesture(GestureType::HandRaise),
    },
    Move {
        start: 250,
        end: 290,
        act: Act::Pose(PoseType::CrossedHands),
    },
];

/// One person as seen on a given tick
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: UserId,
    pub presence: Presence,
    /// Ticks since this person entered
    pub age: u64,
    pub joints: [Point3; JOINT_COUNT],
}

impl Person {
    pub fn joint(&self, kind: JointType) -> Point3 {
        self.joints[kind.index()]
    }

    /// Gesture being performed, if any
    pub fn gesture(&self) -> Option<(GestureType, GestureState)> {
        let (step, phase) = current_move(self.age)?;
        let Act::Gesture(kind) = step.act else {
            return None;
        };
        let state = if phase == step.end {
            GestureState::Complete
        } else {
            GestureState::InProgress
        };
        Some((kind, state))
    }

    pub fn pose(&self, kind: PoseType) -> PoseState {
        let Some((step, phase)) = current_move(self.age) else {
            return PoseState::NotDetected;
        };
        if step.act != Act::Pose(kind) {
            return PoseState::NotDetected;
        }
        if phase == step.start {
            PoseState::Entered
        } else if phase == step.end {
            PoseState::Exited
        } else {
            PoseState::Held
        }
    }
}

/// Everyone in the scene on `tick`, in user id order
pub fn people_at(tick: u64) -> Vec<Person> {
    let phase = tick % SCENE_PERIOD;
    ACTORS
        .iter()
        .filter_map(|actor| {
            let presence = match phase {
                p if p == actor.enter => Presence::Entered,
                p if p > actor.enter && p < actor.leave => Presence::Present,
                p if p == actor.leave => Presence::Leaving,
                _ => return None,
            };
            let age = phase - actor.enter;
            Some(Person {
                id: actor.id,
                presence,
                age,
                joints: body(actor, age),
            })
        })
        .collect()
}

/// Routine step active at `age`, with the phase inside the routine
fn current_move(age: u64) -> Option<(Move, u64)> {
    let phase = age % ROUTINE_PERIOD;
    ROUTINE
        .iter()
        .find(|step| phase >= step.start && phase <= step.end)
        .map(|step| (*step, phase))
}

/// Joint positions for a standing person, arms placed by the routine
fn body(actor: &Actor, age: u64) -> [Point3; JOINT_COUNT] {
    let x0 = actor.center_x + actor.sway * (TAU * age as f32 / actor.sway_period).sin();
    let z0 = actor.depth;
    // Offsets from the point between the feet, y measured up from the floor
    let mut offsets: [(f32, f32, f32); JOINT_COUNT] = [
        (0.0, 1600.0, 0.0),
        (0.0, 1450.0, 0.0),
        (-180.0, 1400.0, 0.0),
        (180.0, 1400.0, 0.0),
        (-250.0, 1150.0, 0.0),
        (250.0, 1150.0, 0.0),
        (-280.0, 900.0, -50.0),
        (280.0, 900.0, -50.0),
        (0.0, 1150.0, 0.0),
        (-110.0, 900.0, 0.0),
        (110.0, 900.0, 0.0),
        (-120.0, 500.0, 0.0),
        (120.0, 500.0, 0.0),
        (-130.0, 80.0, 0.0),
        (130.0, 80.0, 0.0),
    ];

    if let Some((step, phase)) = current_move(age) {
        let progress = (phase - step.start) as f32 / (step.end - step.start) as f32;
        let mut set = |joint: JointType, offset: (f32, f32, f32)| offsets[joint.index()] = offset;
        match step.act {
            Act::Gesture(GestureType::Wave) => {
                let swing = 150.0 * (2.0 * TAU * progress).sin();
                set(JointType::RightElbow, (320.0, 1400.0, 0.0));
                set(JointType::RightHand, (300.0 + swing, 1700.0, -50.0));
            }
            Act::Gesture(GestureType::Click) => {
                // Push toward the sensor and back
                let reach = 400.0 * (TAU * 0.5 * progress).sin();
                set(JointType::RightElbow, (220.0, 1300.0, -150.0 - reach / 2.0));
                set(JointType::RightHand, (200.0, 1350.0, -200.0 - reach));
            }
            Act::Gesture(GestureType::HandRaise) => {
                set(JointType::RightElbow, (260.0, 1250.0 + 250.0 * progress, 0.0));
                set(JointType::RightHand, (270.0, 1000.0 + 800.0 * progress, -50.0));
            }
            Act::Pose(PoseType::Psi) => {
                set(JointType::LeftElbow, (-380.0, 1420.0, 0.0));
                set(JointType::RightElbow, (380.0, 1420.0, 0.0));
                set(JointType::LeftHand, (-360.0, 1750.0, 0.0));
                set(JointType::RightHand, (360.0, 1750.0, 0.0));
            }
            Act::Pose(PoseType::CrossedHands) => {
                set(JointType::LeftElbow, (-200.0, 1200.0, -150.0));
                set(JointType::RightElbow, (200.0, 1200.0, -150.0));
                set(JointType::LeftHand, (150.0, 1300.0, -250.0));
                set(JointType::RightHand, (-150.0, 1300.0, -250.0));
            }
        }
    }

    offsets.map(|(dx, y, dz)| Point3::new(x0 + dx, y - SENSOR_HEIGHT_MM, z0 + dz))
}
