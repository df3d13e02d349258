// SPDX-License-Identifier: GPL-3.0-only

//! Hand viewer: completed gestures start hand tracking, tracked hands are
//! circled on the depth image

use super::{Viewer, open_sensor, palette_color};
use crate::config::ViewerConfig;
use crate::constants::overlay::{HAND_RADIUS, HAND_THICKNESS, PALETTE_SIZE};
use crate::constants::windows;
use crate::errors::{AppResult, SdkError};
use crate::pipeline::{DisplayImage, Overlay, PixelPos, Projection, Stroke, render_depth};
use crate::sdk::{
    CheckStatus, DepthDevice, GestureType, HandData, HandFrame, HandTracker, TrackingBackend,
};
use rayon::prelude::*;
use tracing::{info, warn};

pub struct HandViewer {
    tracker: Box<dyn HandTracker>,
    device: Option<Box<dyn DepthDevice>>,
    config: ViewerConfig,
    frame: HandFrame,
    image: Option<DisplayImage>,
}

impl HandViewer {
    /// Gestures that can start hand tracking
    pub const GESTURES: [GestureType; 3] =
        [GestureType::Click, GestureType::Wave, GestureType::HandRaise];

    pub fn new(backend: &mut dyn TrackingBackend, config: ViewerConfig) -> AppResult<Self> {
        let device = open_sensor(backend, &config)?;
        let mut tracker = backend
            .create_hand_tracker(device.as_deref())
            .check("HandTracker::create")?;

        for gesture in Self::GESTURES {
            tracker
                .start_gesture_detection(gesture)
                .check("HandTracker::start_gesture_detection")?;
        }
        info!(gestures = ?Self::GESTURES, "Hand viewer ready");

        Ok(Self {
            tracker,
            device,
            config,
            frame: HandFrame::default(),
            image: None,
        })
    }

    fn projection(&self, frame_height: u32) -> Projection<'_> {
        match &self.device {
            Some(device) => Projection::Device {
                device: device.as_ref(),
                frame_height,
            },
            None => Projection::Hand(self.tracker.as_ref()),
        }
    }
}

/// Hollow circle around a tracked hand, `None` when it projects off-image
fn hand_overlay(
    hand: &HandData,
    projection: Projection<'_>,
    width: u32,
    height: u32,
) -> Result<Option<Overlay>, SdkError> {
    let (x, y) = projection.to_depth(hand.position)?;
    Ok(
        PixelPos::from_projected(x, y, width, height).map(|center| Overlay::Circle {
            center,
            radius: HAND_RADIUS,
            stroke: Stroke::Outline(HAND_THICKNESS),
            color: palette_color(hand.id.rem_euclid(PALETTE_SIZE as i16) as usize),
        }),
    )
}

impl Viewer for HandViewer {
    fn window_name(&self) -> &'static str {
        windows::HAND
    }

    fn update(&mut self) -> AppResult<()> {
        self.frame = self.tracker.read_frame().check("HandTracker::read_frame")?;

        for gesture in self.frame.gestures.iter().filter(|g| g.is_complete()) {
            match self.tracker.start_hand_tracking(gesture.current_position) {
                Ok(hand_id) => info!(hand_id, gesture = ?gesture.kind, "Start Hand Tracking"),
                Err(status) => {
                    warn!(?status, gesture = ?gesture.kind, "Hand tracking request failed")
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
        let projection = self.projection(height);
        let overlays = self
            .frame
            .hands
            .par_iter()
            .filter(|hand| hand.is_tracking())
            .map(|hand| hand_overlay(hand, projection, width, height))
            .collect::<Result<Vec<_>, SdkError>>()?;

        image.apply(overlays.into_iter().flatten());
        self.image = Some(image);
        Ok(())
    }

    fn image(&self) -> Option<&DisplayImage> {
        self.image.as_ref()
    }
}
