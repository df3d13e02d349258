// SPDX-License-Identifier: GPL-3.0-only

//! Depth and user-map rasterization of the scripted scene
//!
//! Bodies are drawn as capsules around their bones. A pixel covered by a
//! person takes that person's depth and user id; everything else shows the
//! empty room.

use super::scene::{Camera, Person};
use crate::sdk::{JointType, UserId};
use rayon::prelude::*;

/// Columns on the left edge with no depth reading, like the shadow band of
/// a structured-light sensor
const SHADOW_BAND_DIVISOR: u32 = 64;

const HEAD_RADIUS_MM: f32 = 110.0;
const TORSO_RADIUS_MM: f32 = 150.0;
const LIMB_RADIUS_MM: f32 = 60.0;

const BONES: [(JointType, JointType, f32); 14] = [
    (JointType::Head, JointType::Neck, HEAD_RADIUS_MM),
    (JointType::Neck, JointType::Torso, TORSO_RADIUS_MM),
    (JointType::LeftShoulder, JointType::RightShoulder, LIMB_RADIUS_MM),
    (JointType::LeftShoulder, JointType::LeftElbow, LIMB_RADIUS_MM),
    (JointType::LeftElbow, JointType::LeftHand, LIMB_RADIUS_MM),
    (JointType::RightShoulder, JointType::RightElbow, LIMB_RADIUS_MM),
    (JointType::RightElbow, JointType::RightHand, LIMB_RADIUS_MM),
    (JointType::Torso, JointType::LeftHip, TORSO_RADIUS_MM),
    (JointType::Torso, JointType::RightHip, TORSO_RADIUS_MM),
    (JointType::LeftHip, JointType::RightHip, LIMB_RADIUS_MM),
    (JointType::LeftHip, JointType::LeftKnee, LIMB_RADIUS_MM),
    (JointType::LeftKnee, JointType::LeftFoot, LIMB_RADIUS_MM),
    (JointType::RightHip, JointType::RightKnee, LIMB_RADIUS_MM),
    (JointType::RightKnee, JointType::RightFoot, LIMB_RADIUS_MM),
];

/// A bone projected to pixel space
#[derive(Debug, Clone, Copy)]
struct Capsule {
    a: (f32, f32),
    b: (f32, f32),
    radius: f32,
    depth: u16,
    user: UserId,
}

impl Capsule {
    fn covers(&self, x: f32, y: f32) -> bool {
        let (dx, dy) = (self.b.0 - self.a.0, self.b.1 - self.a.1);
        let length_sq = dx * dx + dy * dy;
        let t = if length_sq > 0.0 {
            (((x - self.a.0) * dx + (y - self.a.1) * dy) / length_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let (px, py) = (self.a.0 + t * dx - x, self.a.1 + t * dy - y);
        px * px + py * py <= self.radius * self.radius
    }

    fn rows(&self) -> (f32, f32) {
        (
            self.a.1.min(self.b.1) - self.radius,
            self.a.1.max(self.b.1) + self.radius,
        )
    }
}

fn capsules(camera: &Camera, people: &[Person]) -> Vec<Capsule> {
    people
        .iter()
        .filter(|person| person.presence.is_visible())
        .flat_map(|person| {
            BONES.iter().filter_map(move |&(from, to, radius_mm)| {
                let (p, q) = (person.joint(from), person.joint(to));
                let z = (p.z + q.z) / 2.0;
                Some(Capsule {
                    a: camera.project(p)?,
                    b: camera.project(q)?,
                    radius: camera.scale_at(radius_mm, z),
                    depth: z.round() as u16,
                    user: person.id,
                })
            })
        })
        .collect()
}

/// Row-major depth samples (millimeters, 0 = no reading) and user ids
pub fn rasterize(camera: &Camera, people: &[Person]) -> (Vec<u16>, Vec<UserId>) {
    let width = camera.width as usize;
    let height = camera.height as usize;
    let mut depth = vec![0u16; width * height];
    let mut users = vec![0 as UserId; width * height];
    if width == 0 {
        return (depth, users);
    }

    let bodies = capsules(camera, people);
    let band = camera.width / SHADOW_BAND_DIVISOR;

    depth
        .par_chunks_mut(width)
        .zip(users.par_chunks_mut(width))
        .enumerate()
        .for_each(|(row, (depth_row, user_row))| {
            let room = camera.room_depth(row as u32).round() as u16;
            let y = row as f32 + 0.5;
            let in_row: Vec<&Capsule> = bodies
                .iter()
                .filter(|capsule| {
                    let (top, bottom) = capsule.rows();
                    y >= top && y <= bottom
                })
                .collect();

            for (column, (sample, user)) in
                depth_row.iter_mut().zip(user_row.iter_mut()).enumerate()
            {
                if (column as u32) < band {
                    continue;
                }
                *sample = room;
                let x = column as f32 + 0.5;
                for capsule in in_row.iter().filter(|capsule| capsule.covers(x, y)) {
                    if capsule.depth < *sample {
                        *sample = capsule.depth;
                        *user = capsule.user;
                    }
                }
            }
        });

    (depth, users)
}
