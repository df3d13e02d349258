// SPDX-License-Identifier: GPL-3.0-only

//! Skeleton viewer: draws the confident joints of every tracked user

use std::process::ExitCode;
use tracker_viewer::SampleKind;

fn main() -> ExitCode {
    tracker_viewer::app::main(SampleKind::Skeleton)
}
