// SPDX-License-Identifier: GPL-3.0-only

//! Gesture viewer: prints the state of wave and click gestures

use std::process::ExitCode;
use tracker_viewer::SampleKind;

fn main() -> ExitCode {
    tracker_viewer::app::main(SampleKind::Gesture)
}
