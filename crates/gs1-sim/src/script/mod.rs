// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! A scripted mouse.
//!
//! The script is a list of waypoints. Each frame the pointer moves toward
//! the next waypoint by at most [`PointerScript::speed`] pixels per axis with
//! that waypoint's buttons held, so a waypoint at the current position with
//! different buttons is a press or a release. Once the list is used up the
//! mouse goes quiet.


use std::collections::VecDeque;

use gs1_abi::{Buttons, Point};
use gs1_main::pointer::HOME;
use gs1_main::{PointerSample, PointerSource};

/// Pixels per axis per frame.
pub const DEFAULT_SPEED: i16 = 8;

/// Target position and the buttons held on the way there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Waypoint {
    pub to: Point,
    pub buttons: Buttons,
}

impl Waypoint {
    /// Moves with no button held.
    #[must_use]
    pub const fn hover(x: i16, y: i16) -> Self {
        Self {
            to: Point::new(x, y),
            buttons: Buttons::NONE,
        }
    }

    /// Moves with the left button held.
    #[must_use]
    pub const fn drag(x: i16, y: i16) -> Self {
        Self {
            to: Point::new(x, y),
            buttons: Buttons::LEFT,
        }
    }
}

/// Replays waypoints as mouse samples.
#[derive(Clone, Debug)]
pub struct PointerScript {
    steps: VecDeque<Waypoint>,
    at: Point,
    speed: i16,
}

impl PointerScript {
    /// A script starting where the Main pointer tracker starts.
    #[must_use]
    pub fn new(steps: impl IntoIterator<Item = Waypoint>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            at: HOME,
            speed: DEFAULT_SPEED,
        }
    }

    /// Changes the per-axis step. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_speed(mut self, speed: i16) -> Self {
        self.speed = speed.max(1);
        self
    }

    #[must_use]
    pub const fn speed(&self) -> i16 {
        self.speed
    }

    /// Where the script believes the pointer is.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.at
    }

    /// Waypoints not yet reached.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    /// The demo session:
    ///
    /// 1. File > New opens "Window 01"
    /// 2. its title bar is dragged 30 right and 42 down
    /// 3. Apps > Paint opens a sketch window on top
    /// 4. a stroke is drawn into the sketch
    #[must_use]
    pub fn demo() -> Self {
        Self::new([
            // File > New
            Waypoint::hover(20, 5),
            Waypoint::drag(20, 5),
            Waypoint::drag(30, 28),
            Waypoint::hover(30, 28),
            // Move "Window 01" by its title bar
            Waypoint::hover(130, 58),
            Waypoint::drag(130, 58),
            Waypoint::drag(160, 100),
            Waypoint::hover(160, 100),
            // Apps > Paint
            Waypoint::hover(95, 5),
            Waypoint::drag(95, 5),
            Waypoint::drag(100, 56),
            Waypoint::hover(100, 56),
            // A stroke in the sketch
            Waypoint::hover(60, 90),
            Waypoint::drag(60, 90),
            Waypoint::drag(100, 110),
            Waypoint::hover(100, 110),
        ])
    }
}

impl PointerSource for PointerScript {
    fn poll(&mut self) -> Option<PointerSample> {
        let step = *self.steps.front()?;
        let dx = (step.to.x - self.at.x).clamp(-self.speed, self.speed);
        let dy = (step.to.y - self.at.y).clamp(-self.speed, self.speed);
        self.at = Point::new(self.at.x + dx, self.at.y + dy);
        if self.at == step.to {
            self.steps.pop_front();
        }
        Some(PointerSample::new(dx, dy, step.buttons))
    }
}
