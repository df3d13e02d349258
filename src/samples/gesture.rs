// SPDX-License-Identifier: GPL-3.0-only

//! Gesture viewer: one status line per reported gesture

use super::{Viewer, open_sensor, status_label};
use crate::config::ViewerConfig;
use crate::constants::overlay::LABEL_BLACK;
use crate::constants::windows;
use crate::errors::AppResult;
use crate::pipeline::{DisplayImage, render_depth};
use crate::sdk::{CheckStatus, GestureData, GestureState, GestureType, HandFrame, HandTracker};
use crate::sdk::{DepthDevice, TrackingBackend};
use tracing::info;

pub struct GestureViewer {
    tracker: Box<dyn HandTracker>,
    // Held open for the tracker's lifetime
    _device: Option<Box<dyn DepthDevice>>,
    config: ViewerConfig,
    frame: HandFrame,
    image: Option<DisplayImage>,
}

impl GestureViewer {
    /// Hand raise is left out: it fires too easily to be useful here
    pub const GESTURES: [GestureType; 2] = [GestureType::Wave, GestureType::Click];

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
        info!(gestures = ?Self::GESTURES, "Gesture viewer ready");

        Ok(Self {
            tracker,
            _device: device,
            config,
            frame: HandFrame::default(),
            image: None,
        })
    }
}

/// "<Gesture> is in progress" / "<Gesture> is complete"; idle gestures
/// have no status line
pub fn gesture_status(gesture: &GestureData) -> Option<String> {
    let state = match gesture.state {
        GestureState::InProgress => "is in progress",
        GestureState::Complete => "is complete",
        GestureState::Idle => return None,
    };
    Some(format!("{} {}", gesture.kind.display_name(), state))
}

impl Viewer for GestureViewer {
    fn window_name(&self) -> &'static str {
        windows::GESTURE
    }

    fn update(&mut self) -> AppResult<()> {
        self.frame = self.tracker.read_frame().check("HandTracker::read_frame")?;
        Ok(())
    }

    fn draw(&mut self) -> AppResult<()> {
        self.image = None;
        let Some(mut image) = render_depth(self.frame.depth.as_ref(), self.config.coloring) else {
            return Ok(());
        };

        let (width, height) = (image.width(), image.height());
        // Rows are indexed by gesture position, so idle gestures leave a gap
        let labels = self
            .frame
            .gestures
            .iter()
            .enumerate()
            .filter_map(|(row, gesture)| {
                let status = gesture_status(gesture)?;
                info!("{}", status);
                status_label(row, status, LABEL_BLACK, width, height)
            })
            .collect::<Vec<_>>();

        image.apply(labels);
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
    use crate::sdk::Point3;

    fn gesture(kind: GestureType, state: GestureState) -> GestureData {
        GestureData {
            kind,
            current_position: Point3::default(),
            state,
        }
    }

    #[test]
    fn test_gesture_status_text() {
        assert_eq!(
            gesture_status(&gesture(GestureType::Wave, GestureState::InProgress)).as_deref(),
            Some("Wave is in progress")
        );
        assert_eq!(
            gesture_status(&gesture(GestureType::HandRaise, GestureState::Complete)).as_deref(),
            Some("Hand Raise is complete")
        );
        assert_eq!(gesture_status(&gesture(GestureType::Click, GestureState::Idle)), None);
    }
}
