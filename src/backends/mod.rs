// SPDX-License-Identifier: GPL-3.0-only

//! Tracking backend implementations
//!
//! The viewers only see the [`TrackingBackend`] trait. The backend layer
//! picks the concrete driver and middleware behind it:
//!
//! ```text
//! ┌─────────────────────┐
//! │      Viewers        │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ TrackingBackend     │  ← Driver + middleware lifecycle
//! └──────────┬──────────┘
//!            │
//!            ▼
//!      ┌───────────┐
//!      │ Synthetic │  ← Scripted virtual sensor
//!      └───────────┘
//! ```

pub mod synthetic;

use crate::config::ViewerConfig;
use crate::sdk::TrackingBackend;

/// Get a concrete backend instance for the configured stream
pub fn get_backend(config: &ViewerConfig) -> Box<dyn TrackingBackend> {
    Box::new(
        synthetic::SyntheticBackend::new(config.depth_width, config.depth_height)
            .with_frame_rate(config.depth_fps),
    )
}
