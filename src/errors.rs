// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the tracker viewers
//!
//! Every status reported by the sensor driver or the tracking middleware is
//! checked; a non-success status becomes an [`SdkError`] and is fatal for
//! the viewer that received it.

use crate::sdk::Status;
use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// A failed sensor or middleware call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkError {
    /// Name of the call that failed (e.g. "UserTracker::read_frame")
    pub call: &'static str,
    /// Status returned by the call
    pub status: Status,
}

impl SdkError {
    pub fn new(call: &'static str, status: Status) -> Self {
        Self { call, status }
    }
}

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// A sensor or middleware call returned a non-success status
    Sdk(SdkError),
    /// Device discovery errors
    Device(DeviceError),
    /// Depth buffer could not be interpreted
    Frame(FrameError),
    /// Display surface (terminal) errors
    Display(String),
}

/// Device discovery errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// No depth sensor was enumerated
    NoDeviceFound,
}

/// Depth buffer errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Raw buffer length does not match width * height samples
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for SdkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed {} {:x}", self.call, self.status.code())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Sdk(e) => write!(f, "{}", e),
            AppError::Device(e) => write!(f, "{}", e),
            AppError::Frame(e) => write!(f, "Frame error: {}", e),
            AppError::Display(msg) => write!(f, "Display error: {}", msg),
        }
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::NoDeviceFound => write!(f, "failed could not find devices"),
        }
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::SizeMismatch { expected, actual } => write!(
                f,
                "depth buffer holds {} bytes, expected {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for SdkError {}
impl std::error::Error for AppError {}
impl std::error::Error for DeviceError {}
impl std::error::Error for FrameError {}

impl From<SdkError> for AppError {
    fn from(err: SdkError) -> Self {
        AppError::Sdk(err)
    }
}

impl From<DeviceError> for AppError {
    fn from(err: DeviceError) -> Self {
        AppError::Device(err)
    }
}

impl From<FrameError> for AppError {
    fn from(err: FrameError) -> Self {
        AppError::Frame(err)
    }
}

// Terminal setup, drawing and key polling all surface as io::Error
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Display(err.to_string())
    }
}
