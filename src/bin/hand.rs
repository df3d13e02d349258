// SPDX-License-Identifier: GPL-3.0-only

//! Hand viewer: circles every tracked hand

use std::process::ExitCode;
use tracker_viewer::SampleKind;

fn main() -> ExitCode {
    tracker_viewer::app::main(SampleKind::Hand)
}
