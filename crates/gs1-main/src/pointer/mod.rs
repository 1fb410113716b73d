// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Mouse position tracking on the Main processor.
//!
//! The mouse reports relative motion. [`PointerTracker`] accumulates it
//! into an absolute position on the screen and classifies each poll into
//! at most one pointer event for the Sub.

#[cfg(test)]
mod pointer_test;

use gs1_abi::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
use gs1_abi::{Buttons, MouseEvent, Point};

/// Largest motion a single mouse packet can report on one axis.
pub const MAX_DELTA: i16 = 255;

/// Where the pointer starts: the screen center.
pub const HOME: Point = Point::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2);

/// One raw mouse poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerSample {
    pub dx: i16,
    /// Positive is down the screen.
    pub dy: i16,
    pub buttons: Buttons,
}

impl PointerSample {
    #[must_use]
    pub const fn new(dx: i16, dy: i16, buttons: Buttons) -> Self {
        Self { dx, dy, buttons }
    }
}

/// Absolute pointer state built from relative samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerTracker {
    pos: Point,
    buttons: Buttons,
}

impl PointerTracker {
    /// A tracker at the screen center with no buttons held.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pos: HOME,
            buttons: Buttons::NONE,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Point {
        self.pos
    }

    #[must_use]
    pub const fn buttons(&self) -> Buttons {
        self.buttons
    }

    /// Applies one sample and returns the event it produced, if any.
    ///
    /// Deltas beyond [`MAX_DELTA`] count as overflowed packets and are
    /// clamped. The position stays on screen.
    pub fn update(&mut self, sample: PointerSample) -> Option<MouseEvent> {
        let dx = sample.dx.clamp(-MAX_DELTA, MAX_DELTA);
        let dy = sample.dy.clamp(-MAX_DELTA, MAX_DELTA);
        self.pos = Point::new(
            self.pos.x.saturating_add(dx).clamp(0, SCREEN_WIDTH - 1),
            self.pos.y.saturating_add(dy).clamp(0, SCREEN_HEIGHT - 1),
        );
        let previous = self.buttons;
        self.buttons = sample.buttons;
        let event = MouseEvent::classify(self.pos, sample.buttons, previous, dx, dy);
        if let Some(event) = &event {
            tracing::trace!(kind = ?event.kind, pos = %event.pos, "pointer event");
        }
        event
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}
