// SPDX-License-Identifier: GPL-3.0-only

//! User viewer: depth image with each segmented user painted in its color

use super::{Viewer, open_sensor};
use crate::config::ViewerConfig;
use crate::constants::overlay::PALETTE;
use crate::constants::windows;
use crate::errors::AppResult;
use crate::pipeline::{DisplayImage, paint_user_map, render_depth};
use crate::sdk::{CheckStatus, DepthDevice, TrackingBackend, UserFrame, UserTracker};
use tracing::{debug, info};

pub struct UserViewer {
    tracker: Box<dyn UserTracker>,
    // Held open for the tracker's lifetime
    _device: Option<Box<dyn DepthDevice>>,
    config: ViewerConfig,
    frame: UserFrame,
    image: Option<DisplayImage>,
}

impl UserViewer {
    pub fn new(backend: &mut dyn TrackingBackend, config: ViewerConfig) -> AppResult<Self> {
        let device = open_sensor(backend, &config)?;
        let tracker = backend
            .create_user_tracker(device.as_deref())
            .check("UserTracker::create")?;
        info!("User viewer ready");

        Ok(Self {
            tracker,
            _device: device,
            config,
            frame: UserFrame::default(),
            image: None,
        })
    }
}

impl Viewer for UserViewer {
    fn window_name(&self) -> &'static str {
        windows::USER
    }

    fn update(&mut self) -> AppResult<()> {
        self.frame = self.tracker.read_frame().check("UserTracker::read_frame")?;
        for user in &self.frame.users {
            if user.is_new {
                info!(user_id = user.id, "New user");
            } else if user.is_lost {
                info!(user_id = user.id, "Lost user");
            }
        }
        Ok(())
    }

    fn draw(&mut self) -> AppResult<()> {
        self.image = None;
        let Some(mut image) = render_depth(self.frame.depth.as_ref(), self.config.coloring) else {
            return Ok(());
        };

        match &self.frame.user_map {
            Some(map) => paint_user_map(&mut image.pixels, map, &PALETTE),
            None => debug!(frame = self.frame.frame_index, "Frame has no user map"),
        }

        self.image = Some(image);
        Ok(())
    }

    fn image(&self) -> Option<&DisplayImage> {
        self.image.as_ref()
    }
}
