// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Simulator settings read from the environment.
//!
//! | Variable          | Meaning                                   | Default |
//! |-------------------|-------------------------------------------|---------|
//! | `GS1_FRAMES`      | frames the Main loop runs before stopping | 120     |
//! | `GS1_WATCHDOG_MS` | longest wait for the next heartbeat       | 2000    |
//! | `GS1_LOG`         | `tracing` filter directives               | `info`  |


use core::fmt;
use std::time::Duration;

/// Frames to run when `GS1_FRAMES` is unset.
pub const DEFAULT_FRAMES: u32 = 120;

/// Watchdog bound when `GS1_WATCHDOG_MS` is unset.
pub const DEFAULT_WATCHDOG_MS: u64 = 2000;

/// Log filter when `GS1_LOG` is unset.
pub const DEFAULT_LOG: &str = "info";

/// A variable that is set but cannot be used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Not a non-negative integer.
    NotANumber { key: &'static str, value: String },
    /// `GS1_WATCHDOG_MS` was 0.
    ZeroWatchdog,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber { key, value } => {
                write!(f, "{key}={value:?} is not a non-negative integer")
            }
            Self::ZeroWatchdog => write!(f, "GS1_WATCHDOG_MS must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime configuration of one simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Frames the Main loop renders before the run ends.
    pub frames: u32,
    /// Longest time between two heartbeats of the Main loop.
    pub watchdog: Duration,
    /// Filter directives for the log subscriber.
    pub log: String,
}

impl SimConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let frames = number(&lookup, "GS1_FRAMES")?.map_or(Ok(DEFAULT_FRAMES), |n| {
            u32::try_from(n).map_err(|_| ConfigError::NotANumber {
                key: "GS1_FRAMES",
                value: n.to_string(),
            })
        })?;
        let watchdog_ms = number(&lookup, "GS1_WATCHDOG_MS")?.unwrap_or(DEFAULT_WATCHDOG_MS);
        if watchdog_ms == 0 {
            return Err(ConfigError::ZeroWatchdog);
        }
        let log = lookup("GS1_LOG")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG.to_string());

        Ok(Self {
            frames,
            watchdog: Duration::from_millis(watchdog_ms),
            log,
        })
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frames: DEFAULT_FRAMES,
            watchdog: Duration::from_millis(DEFAULT_WATCHDOG_MS),
            log: DEFAULT_LOG.to_string(),
        }
    }
}

/// Parses `key` if it is set. Surrounding whitespace is ignored.
fn number(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::NotANumber { key, value })
}
