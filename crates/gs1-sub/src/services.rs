// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Collaborators the Sub runtime drives but does not implement.

use core::fmt;

use gs1_compositor::Compositor;

/// CD audio playback.
pub trait CdAudio {
    /// Starts playing an audio track.
    fn play(&mut self, track: u16);

    /// Stops playback.
    fn stop(&mut self);
}

/// A CD drive that only logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentCd;

impl CdAudio for SilentCd {
    fn play(&mut self, track: u16) {
        tracing::debug!(track, "cd play ignored");
    }

    fn stop(&mut self) {
        tracing::debug!("cd stop ignored");
    }
}

/// Applications reachable from the Apps menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum App {
    Calculator,
    Notepad,
    Paint,
}

impl App {
    /// Menu label and window title.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Calculator => "Calculator",
            Self::Notepad => "Notepad",
            Self::Paint => "Paint",
        }
    }
}

impl fmt::Display for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opens applications on the desktop.
///
/// A launcher typically opens a window and attaches a
/// [`gs1_compositor::WindowProc`] to it.
pub trait AppLauncher {
    fn launch(&mut self, app: App, desktop: &mut Compositor);
}

/// A launcher without applications.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoApps;

impl AppLauncher for NoApps {
    fn launch(&mut self, app: App, _desktop: &mut Compositor) {
        tracing::info!(%app, "no launcher installed");
    }
}
