// SPDX-License-Identifier: GPL-3.0-only

//! User viewer: paints each segmented user in its own color

use std::process::ExitCode;
use tracker_viewer::SampleKind;

fn main() -> ExitCode {
    tracker_viewer::app::main(SampleKind::User)
}
