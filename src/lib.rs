// SPDX-License-Identifier: GPL-3.0-only

//! Tracker Viewer - depth-sensor tracking samples for the terminal
//!
//! Five small viewers (hand, gesture, skeleton, pose, user) pull frames
//! from a tracking middleware, turn the 16-bit depth image into a grayscale
//! picture, overlay what the middleware tracked, and show the result until
//! `q` is pressed.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`sdk`]: Driver and middleware surface (status codes, frames, trackers)
//! - [`backends`]: Concrete backends, including the synthetic sensor
//! - [`pipeline`]: Depth colorization, projection and overlay rasterization
//! - [`samples`]: The five viewers and the shared main loop
//! - [`display`]: Window abstraction and the terminal renderer
//! - [`config`]: Viewer configuration
//!
//! # Example
//!
//! ```ignore
//! // Each viewer is its own binary, run without arguments:
//! // skeleton
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod display;
pub mod errors;
pub mod pipeline;
pub mod samples;
pub mod sdk;

// Re-export commonly used types
pub use config::{DepthColoring, SensorKind, ViewerConfig};
pub use errors::{AppError, AppResult, SdkError};
pub use samples::{SampleKind, Viewer};
