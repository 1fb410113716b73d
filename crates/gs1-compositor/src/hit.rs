// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Hit testing.
//!
//! Resolution order, first match wins:
//!
//! 1. Menu bar band at the top of the screen
//! 2. Visible windows front to back; inside the first frame that contains
//!    the point: close box, grow box, title bar, content, else border
//! 3. Desktop

use core::fmt;

use gs1_abi::Point;
use gs1_abi::WindowId;
use gs1_abi::layout::MENU_BAR_HEIGHT;

use crate::registry::WindowRegistry;
use crate::window::Window;

/// The part of the screen a point falls on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    /// The menu bar band.
    MenuBar,
    /// No window; the desktop background.
    Desktop,
    /// Title bar or border: drags the window.
    Drag,
    /// The content area.
    Content,
    /// The close box.
    Close,
    /// The grow box.
    Grow,
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MenuBar => "menu-bar",
            Self::Desktop => "desktop",
            Self::Drag => "drag",
            Self::Content => "content",
            Self::Close => "close",
            Self::Grow => "grow",
        };
        f.write_str(name)
    }
}

/// Result of a hit test: one part, and the window it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub part: Part,
    /// `None` for [`Part::MenuBar`] and [`Part::Desktop`].
    pub window: Option<WindowId>,
}

impl Hit {
    const fn outside(part: Part) -> Self {
        Self { part, window: None }
    }
}

/// Resolves points against the windows of a registry.
pub struct HitTester<'a> {
    registry: &'a WindowRegistry,
}

impl<'a> HitTester<'a> {
    #[must_use]
    pub const fn new(registry: &'a WindowRegistry) -> Self {
        Self { registry }
    }

    /// Finds the part under `pt`.
    #[must_use]
    pub fn resolve(&self, pt: Point) -> Hit {
        if pt.y < MENU_BAR_HEIGHT {
            return Hit::outside(Part::MenuBar);
        }
        self.registry
            .front_to_back()
            .find(|w| w.is_visible() && w.frame().contains(pt))
            .map_or(Hit::outside(Part::Desktop), |w| Hit {
                part: part_of(w, pt),
                window: Some(w.id()),
            })
    }
}

/// The part of `window` under `pt`, which lies inside its frame.
fn part_of(window: &Window, pt: Point) -> Part {
    if window.title_bar().contains(pt) && window.close_box().is_some_and(|b| b.contains(pt)) {
        return Part::Close;
    }
    if window.grow_box().is_some_and(|b| b.contains(pt)) {
        return Part::Grow;
    }
    if window.title_bar().contains(pt) {
        return Part::Drag;
    }
    if window.content().contains(pt) {
        return Part::Content;
    }
    Part::Drag
}
