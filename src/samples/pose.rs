// SPDX-License-Identifier: GPL-3.0-only

//! Pose viewer: skeleton dots plus the detection status of each pose

use super::skeleton::{joint_projection, request_skeletons, skeleton_overlays};
use super::{Viewer, open_sensor, palette_color, status_label};
use crate::config::ViewerConfig;
use crate::constants::windows;
use crate::errors::AppResult;
use crate::pipeline::{DisplayImage, render_depth};
use crate::sdk::{
    CheckStatus, DepthDevice, PoseData, PoseState, PoseType, TrackingBackend, UserData, UserFrame,
    UserTracker,
};
use tracing::{info, warn};

pub struct PoseViewer {
    tracker: Box<dyn UserTracker>,
    device: Option<Box<dyn DepthDevice>>,
    config: ViewerConfig,
    frame: UserFrame,
    image: Option<DisplayImage>,
}

impl PoseViewer {
    pub fn new(backend: &mut dyn TrackingBackend, config: ViewerConfig) -> AppResult<Self> {
        let device = open_sensor(backend, &config)?;
        let tracker = backend
            .create_user_tracker(device.as_deref())
            .check("UserTracker::create")?;
        info!(poses = ?PoseType::ALL, "Pose viewer ready");

        Ok(Self {
            tracker,
            device,
            config,
            frame: UserFrame::default(),
            image: None,
        })
    }
}

/// "<Pose> is entered" and so on, one line per pose type
pub fn pose_status(pose: &PoseData) -> String {
    let state = match pose.state {
        PoseState::Entered => "is entered",
        PoseState::Held => "is held",
        PoseState::Exited => "is exited",
        PoseState::NotDetected => "is not detected",
    };
    format!("{} {}", pose.kind.display_name(), state)
}

fn shows_poses(user: &UserData) -> bool {
    !user.is_lost && user.is_visible && user.skeleton.is_tracked()
}

impl Viewer for PoseViewer {
    fn window_name(&self) -> &'static str {
        windows::POSE
    }

    fn update(&mut self) -> AppResult<()> {
        self.frame = self.tracker.read_frame().check("UserTracker::read_frame")?;
        request_skeletons(self.tracker.as_mut(), &self.frame.users);

        for user in self.frame.users.iter().filter(|u| u.is_new) {
            for kind in PoseType::ALL {
                if let Err(status) = self.tracker.start_pose_detection(user.id, kind) {
                    warn!(
                        user_id = user.id,
                        pose = ?kind,
                        ?status,
                        "Pose detection request failed"
                    );
                }
            }
        }
        Ok(())
    }

    fn draw(&mut self) -> AppResult<()> {
        self.image = None;
        let Some(mut image) = render_depth(self.frame.depth.as_ref(), self.config.coloring) else {
            return Ok(());
        };

        let (width, height) = (image.width(), image.height());
        let projection = joint_projection(self.tracker.as_ref(), self.device.as_deref(), height);
        let mut overlays = skeleton_overlays(
            &self.frame.users,
            projection,
            self.config.joint_confidence_threshold,
            width,
            height,
        )?;

        // Users share the status rows; later users are drawn over earlier ones
        for (index, user) in self.frame.users.iter().enumerate() {
            if !shows_poses(user) {
                continue;
            }
            let color = palette_color(index);
            overlays.extend(PoseType::ALL.iter().filter_map(|&kind| {
                status_label(kind.index(), pose_status(user.pose(kind)), color, width, height)
            }));
        }

        image.apply(overlays);
        self.image = Some(image);
        Ok(())
    }

    fn image(&self) -> Option<&DisplayImage> {
        self.image.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::{Skeleton, SkeletonState};

    #[test]
    fn test_pose_status_text() {
        let held = PoseData {
            kind: PoseType::CrossedHands,
            state: PoseState::Held,
        };
        assert_eq!(pose_status(&held), "Crossed Hands is held");

        let idle = PoseData {
            kind: PoseType::Psi,
            state: PoseState::NotDetected,
        };
        assert_eq!(pose_status(&idle), "Psi is not detected");
    }

    #[test]
    fn test_only_visible_tracked_users_show_poses() {
        let mut skeleton = Skeleton::untracked();
        skeleton.state = SkeletonState::Tracked;

        let mut user = UserData::new(1, skeleton);
        assert!(shows_poses(&user));

        user.is_visible = false;
        assert!(!shows_poses(&user));

        let calibrating = UserData::new(2, Skeleton::untracked());
        assert!(!shows_poses(&calibrating));
    }
}
