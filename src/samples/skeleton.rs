// SPDX-License-Identifier: GPL-3.0-only

//! Skeleton viewer: confident joints of every tracked skeleton as dots

use super::{Viewer, open_sensor, palette_color};
use crate::config::ViewerConfig;
use crate::constants::overlay::JOINT_RADIUS;
use crate::constants::windows;
use crate::errors::{AppResult, SdkError};
use crate::pipeline::{DisplayImage, Overlay, PixelPos, Projection, Stroke, render_depth};
use crate::sdk::{CheckStatus, DepthDevice, TrackingBackend, UserData, UserFrame, UserTracker};
use rayon::prelude::*;
use tracing::{info, warn};

pub struct SkeletonViewer {
    tracker: Box<dyn UserTracker>,
    device: Option<Box<dyn DepthDevice>>,
    config: ViewerConfig,
    frame: UserFrame,
    image: Option<DisplayImage>,
}

impl SkeletonViewer {
    pub fn new(backend: &mut dyn TrackingBackend, config: ViewerConfig) -> AppResult<Self> {
        let device = open_sensor(backend, &config)?;
        let tracker = backend
            .create_user_tracker(device.as_deref())
            .check("UserTracker::create")?;
        info!("Skeleton viewer ready");

        Ok(Self {
            tracker,
            device,
            config,
            frame: UserFrame::default(),
            image: None,
        })
    }
}

impl Viewer for SkeletonViewer {
    fn window_name(&self) -> &'static str {
        windows::SKELETON
    }

    fn update(&mut self) -> AppResult<()> {
        self.frame = self.tracker.read_frame().check("UserTracker::read_frame")?;
        request_skeletons(self.tracker.as_mut(), &self.frame.users);
        Ok(())
    }

    fn draw(&mut self) -> AppResult<()> {
        self.image = None;
        let Some(mut image) = render_depth(self.frame.depth.as_ref(), self.config.coloring) else {
            return Ok(());
        };

        let projection =
            joint_projection(self.tracker.as_ref(), self.device.as_deref(), image.height());
        let overlays = skeleton_overlays(
            &self.frame.users,
            projection,
            self.config.joint_confidence_threshold,
            image.width(),
            image.height(),
        )?;

        image.apply(overlays);
        self.image = Some(image);
        Ok(())
    }

    fn image(&self) -> Option<&DisplayImage> {
        self.image.as_ref()
    }
}

/// Ask for skeleton tracking on every user seen for the first time
///
/// A refused request is logged and the user stays untracked.
pub(super) fn request_skeletons(tracker: &mut dyn UserTracker, users: &[UserData]) {
    for user in users.iter().filter(|u| u.is_new) {
        match tracker.start_skeleton_tracking(user.id) {
            Ok(()) => info!(user_id = user.id, "Start Skeleton Tracking"),
            Err(status) => warn!(user_id = user.id, ?status, "Skeleton tracking request failed"),
        }
    }
}

pub(super) fn joint_projection<'a>(
    tracker: &'a dyn UserTracker,
    device: Option<&'a dyn DepthDevice>,
    frame_height: u32,
) -> Projection<'a> {
    match device {
        Some(device) => Projection::Device {
            device,
            frame_height,
        },
        None => Projection::Joint(tracker),
    }
}

/// Joint dots for all users with a tracked skeleton, colored by the
/// user's position in the frame's user list
pub(super) fn skeleton_overlays(
    users: &[UserData],
    projection: Projection<'_>,
    confidence_threshold: f32,
    width: u32,
    height: u32,
) -> Result<Vec<Overlay>, SdkError> {
    let per_user = users
        .par_iter()
        .enumerate()
        .filter(|(_, user)| !user.is_lost && user.skeleton.is_tracked())
        .map(|(index, user)| {
            let color = palette_color(index);
            let mut dots = Vec::new();
            for joint in user.skeleton.joints() {
                if joint.confidence < confidence_threshold {
                    continue;
                }
                let (x, y) = projection.to_depth(joint.position)?;
                if let Some(center) = PixelPos::from_projected(x, y, width, height) {
                    dots.push(Overlay::Circle {
                        center,
                        radius: JOINT_RADIUS,
                        stroke: Stroke::Filled,
                        color,
                    });
                }
            }
            Ok(dots)
        })
        .collect::<Result<Vec<Vec<Overlay>>, SdkError>>()?;

    Ok(per_user.into_iter().flatten().collect())
}
