// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Painting seams.
//!
//! The compositor decides *what* is painted and in which order; a
//! [`Renderer`] turns that into pixels in the bank being rendered.
//! Applications paint their content through a [`WindowProc`].

#[cfg(any(test, feature = "std"))]
pub mod recording;

use core::fmt;

use gs1_abi::{Point, Rect};

use crate::menu::MenuBar;
use crate::window::Window;

/// Desktop background fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DesktopPattern {
    White = 0,
    /// Checkerboard.
    #[default]
    Gray50 = 1,
    /// Sparse checkerboard.
    Gray25 = 2,
}

impl DesktopPattern {
    /// Try to convert from a raw selector.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::White),
            1 => Some(Self::Gray50),
            2 => Some(Self::Gray25),
            _ => None,
        }
    }

    /// Returns true if the pattern sets pixel `(x, y)`.
    #[must_use]
    pub const fn is_set(self, x: i16, y: i16) -> bool {
        match self {
            Self::White => false,
            Self::Gray50 => (x ^ y) & 1 == 1,
            Self::Gray25 => x & 1 == 0 && y & 1 == 0,
        }
    }
}

impl fmt::Display for DesktopPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::White => "white",
            Self::Gray50 => "gray-50",
            Self::Gray25 => "gray-25",
        };
        f.write_str(name)
    }
}

/// One of the four gray levels of the 2 bpp frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Shade {
    #[default]
    White = 0,
    Light = 1,
    Dark = 2,
    Black = 3,
}

/// Paints primitives into the frame being rendered.
///
/// Every call except [`Renderer::reset_clip`] and [`Renderer::finish`] is
/// clipped to the rectangle from the last [`Renderer::set_clip`].
pub trait Renderer {
    /// Restricts painting to `clip`.
    fn set_clip(&mut self, clip: Rect);

    /// Allows painting anywhere on the screen again.
    fn reset_clip(&mut self);

    /// Fills `area` with a desktop pattern.
    fn fill_pattern(&mut self, area: Rect, pattern: DesktopPattern);

    /// Fills `area` with a solid shade.
    fn fill_rect(&mut self, area: Rect, shade: Shade);

    /// Draws `text` in the system font with its top-left corner at `at`.
    fn draw_text(&mut self, at: Point, text: &str);

    /// Paints a window's border, title bar and boxes.
    fn draw_window_frame(&mut self, window: &Window);

    /// Paints the menu bar.
    fn draw_menu_bar(&mut self, menus: &MenuBar);

    /// Paints the open dropdown of the menu bar.
    fn draw_dropdown(&mut self, menus: &MenuBar);

    /// Paints the pointer cursor with its hot spot at `at`.
    fn draw_cursor(&mut self, at: Point);

    /// Called once per frame with the bank bytes before they are published.
    fn finish(&mut self, frame: &mut [u8]) {
        let _ = frame;
    }
}

/// Application behavior attached to a window.
///
/// `click` and `drag` return true when the window's content needs
/// repainting.
pub trait WindowProc {
    /// Paints the content area. The clip is already set.
    fn draw(&mut self, window: &Window, renderer: &mut dyn Renderer);

    /// Mouse button pressed inside the content area.
    fn click(&mut self, window: &Window, at: Point) -> bool {
        let _ = (window, at);
        false
    }

    /// Mouse dragged while this window is active and not being moved.
    fn drag(&mut self, window: &Window, at: Point) -> bool {
        let _ = (window, at);
        false
    }
}
