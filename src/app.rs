// SPDX-License-Identifier: GPL-3.0-only

//! Process entry shared by the viewer binaries

use crate::backends;
use crate::config::ViewerConfig;
use crate::display::TerminalWindow;
use crate::errors::AppResult;
use crate::samples::{self, SampleKind};
use std::process::ExitCode;
use tracing::{error, info};

/// Initialize logging
///
/// Set the RUST_LOG environment variable to control the log level.
/// Examples: RUST_LOG=debug, RUST_LOG=tracker_viewer=debug, RUST_LOG=info
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Run one viewer until the quit key, reporting any failure on stderr
pub fn main(kind: SampleKind) -> ExitCode {
    init_logging();
    info!(
        version = env!("GIT_VERSION"),
        sample = kind.window_name(),
        "Starting tracker viewer"
    );

    match launch(kind, &ViewerConfig::default()) {
        Ok(ticks) => {
            info!(ticks, "Viewer closed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Viewer failed");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn launch(kind: SampleKind, config: &ViewerConfig) -> AppResult<u64> {
    let mut backend = backends::get_backend(config);
    let mut viewer = samples::create(kind, backend.as_mut(), config)?;
    let mut window = TerminalWindow::open()?;
    samples::run(viewer.as_mut(), &mut window, config)
}
