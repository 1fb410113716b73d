// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! `gs1-sim`: runs one simulation configured from the environment.
//!
//! ```text
//! GS1_FRAMES=300 GS1_LOG=gs1_sub=debug gs1-sim
//! ```

use std::process::ExitCode;

use gs1_sim::Simulation;
use gs1_sim::config::{DEFAULT_LOG, SimConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = SimConfig::from_env();
    let filter = config.as_ref().map_or(DEFAULT_LOG, |c| c.log.as_str());
    init_logging(filter);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        frames = config.frames,
        watchdog_ms = config.watchdog.as_millis() as u64,
        "starting simulation"
    );

    match Simulation::new(config).run().await {
        Ok(summary) => {
            tracing::info!(
                frames = summary.frames,
                rendered = summary.rendered,
                windows = ?summary.titles(),
                ink = summary.screen.ink(),
                "simulation finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "simulation failed");
            ExitCode::FAILURE
        }
    }
}

/// Installs the log subscriber. Bad directives fall back to the default.
fn init_logging(directives: &str) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|e| {
        eprintln!("gs1-sim: ignoring log filter {directives:?}: {e}");
        EnvFilter::new(DEFAULT_LOG)
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .with_target(false)
        .init();
}
