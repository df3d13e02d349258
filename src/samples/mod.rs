// SPDX-License-Identifier: GPL-3.0-only

//! Tracker viewers
//!
//! Every viewer follows the same lifecycle: it is initialized against a
//! [`TrackingBackend`], then [`run`] repeats update → draw → show → key
//! poll until the quit key arrives. Viewers differ only in which tracker
//! they read and which overlay they draw.

mod gesture;
mod hand;
mod pose;
mod skeleton;
mod user;

pub use gesture::GestureViewer;
pub use hand::HandViewer;
pub use pose::PoseViewer;
pub use skeleton::SkeletonViewer;
pub use user::UserViewer;

use crate::config::{SensorKind, ViewerConfig};
use crate::constants::overlay::{
    LABEL_LINE_STEP, LABEL_ORIGIN_X, LABEL_ORIGIN_Y, PALETTE, PALETTE_SIZE,
};
use crate::constants::{timing, windows};
use crate::display::Window;
use crate::errors::{AppResult, DeviceError};
use crate::pipeline::{DisplayImage, Overlay, PixelPos, TextLabel};
use crate::sdk::{CheckStatus, DepthDevice, TrackingBackend};
use image::Rgb;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Hand,
    Gesture,
    Skeleton,
    Pose,
    User,
}

impl SampleKind {
    pub const ALL: [SampleKind; 5] = [
        SampleKind::Hand,
        SampleKind::Gesture,
        SampleKind::Skeleton,
        SampleKind::Pose,
        SampleKind::User,
    ];

    pub fn window_name(&self) -> &'static str {
        match self {
            SampleKind::Hand => windows::HAND,
            SampleKind::Gesture => windows::GESTURE,
            SampleKind::Skeleton => windows::SKELETON,
            SampleKind::Pose => windows::POSE,
            SampleKind::User => windows::USER,
        }
    }
}

/// One tracker viewer
pub trait Viewer {
    fn window_name(&self) -> &'static str;

    /// Read the next tracker frame and issue any tracking requests it calls for
    fn update(&mut self) -> AppResult<()>;

    /// Rebuild the display image from the current frame
    ///
    /// Leaves no image when the frame carries no depth data.
    fn draw(&mut self) -> AppResult<()>;

    /// Image produced by the last [`Viewer::draw`]
    fn image(&self) -> Option<&DisplayImage>;

    /// Show the current image; nothing is shown when there is none
    fn show(&self, window: &mut dyn Window) -> AppResult<()> {
        match self.image() {
            Some(image) => window.show(self.window_name(), image),
            None => Ok(()),
        }
    }
}

/// Initialize the backend and build the viewer of the given kind
pub fn create(
    kind: SampleKind,
    backend: &mut dyn TrackingBackend,
    config: &ViewerConfig,
) -> AppResult<Box<dyn Viewer>> {
    let config = config.clone();
    Ok(match kind {
        SampleKind::Hand => Box::new(HandViewer::new(backend, config)?),
        SampleKind::Gesture => Box::new(GestureViewer::new(backend, config)?),
        SampleKind::Skeleton => Box::new(SkeletonViewer::new(backend, config)?),
        SampleKind::Pose => Box::new(PoseViewer::new(backend, config)?),
        SampleKind::User => Box::new(UserViewer::new(backend, config)?),
    })
}

/// Main loop: update, draw, show, then wait for a key
///
/// Returns the number of completed ticks once the quit key is seen. Any
/// error ends the loop immediately. The window is destroyed on both paths.
pub fn run(
    viewer: &mut dyn Viewer,
    window: &mut dyn Window,
    config: &ViewerConfig,
) -> AppResult<u64> {
    info!(window = viewer.window_name(), "Entering main loop");
    let result = run_loop(viewer, window, config);
    let closed = window.destroy();
    let ticks = result?;
    closed?;
    info!(ticks, "Main loop finished");
    Ok(ticks)
}

fn run_loop(
    viewer: &mut dyn Viewer,
    window: &mut dyn Window,
    config: &ViewerConfig,
) -> AppResult<u64> {
    let mut ticks = 0u64;
    loop {
        viewer.update()?;
        viewer.draw()?;
        viewer.show(window)?;
        ticks += 1;

        if ticks % timing::FRAME_LOG_INTERVAL == 0 {
            debug!(ticks, has_image = viewer.image().is_some(), "Frame stats");
        }

        if window.wait_key(config.key_wait)? == Some(config.quit_key) {
            return Ok(ticks);
        }
    }
}

/// Initialize driver and middleware; for sensors that need it, open the
/// first attached device
fn open_sensor(
    backend: &mut dyn TrackingBackend,
    config: &ViewerConfig,
) -> AppResult<Option<Box<dyn DepthDevice>>> {
    backend.initialize_driver().check("DepthDriver::initialize")?;
    backend
        .initialize_middleware()
        .check("TrackingMiddleware::initialize")?;
    info!(backend = backend.name(), sensor = ?config.sensor, "Tracking backend initialized");

    match config.sensor {
        SensorKind::PrimeSensor => Ok(None),
        SensorKind::RealSense => {
            let devices = backend.enumerate_devices();
            let first = devices.first().ok_or(DeviceError::NoDeviceFound)?;
            info!(
                device = %first.name,
                uri = %first.uri,
                count = devices.len(),
                "Opening depth device"
            );
            let device = backend.open_device(&first.uri).check("DepthDevice::open")?;
            Ok(Some(device))
        }
    }
}

/// Palette color for a subject index
pub fn palette_color(index: usize) -> Rgb<u8> {
    PALETTE[index % PALETTE_SIZE]
}

/// Text label on status row `row` (0-based), dropped if it would fall
/// outside the image
fn status_label(
    row: usize,
    text: String,
    color: Rgb<u8>,
    width: u32,
    height: u32,
) -> Option<Overlay> {
    let y = LABEL_ORIGIN_Y + LABEL_LINE_STEP * row as i32;
    PixelPos::checked(LABEL_ORIGIN_X, y, width, height)
        .map(|origin| Overlay::Label(TextLabel { origin, text, color }))
}
