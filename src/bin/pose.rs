// SPDX-License-Identifier: GPL-3.0-only

//! Pose viewer: skeletons plus psi and crossed-hands pose status

use std::process::ExitCode;
use tracker_viewer::SampleKind;

fn main() -> ExitCode {
    tracker_viewer::app::main(SampleKind::Pose)
}
