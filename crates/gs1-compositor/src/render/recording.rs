// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! A renderer that records calls instead of painting.

use std::string::{String, ToString};
use std::vec::Vec;

use gs1_abi::{Point, Rect, WindowId};

use super::{DesktopPattern, Renderer, Shade};
use crate::menu::MenuBar;
use crate::window::Window;

/// One recorded renderer call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    SetClip(Rect),
    ResetClip,
    FillPattern(Rect, DesktopPattern),
    FillRect(Rect, Shade),
    Text(Point, String),
    WindowFrame(WindowId),
    MenuBar,
    /// Index of the open menu.
    Dropdown(usize),
    Cursor(Point),
    /// Length of the bank handed to `finish`.
    Finish(usize),
}

/// Records every call in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    pub ops: Vec<Op>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Window frames in the order they were painted.
    #[must_use]
    pub fn frames(&self) -> Vec<WindowId> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::WindowFrame(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Clip rectangles in the order they were set.
    #[must_use]
    pub fn clips(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::SetClip(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn set_clip(&mut self, clip: Rect) {
        self.ops.push(Op::SetClip(clip));
    }

    fn reset_clip(&mut self) {
        self.ops.push(Op::ResetClip);
    }

    fn fill_pattern(&mut self, area: Rect, pattern: DesktopPattern) {
        self.ops.push(Op::FillPattern(area, pattern));
    }

    fn fill_rect(&mut self, area: Rect, shade: Shade) {
        self.ops.push(Op::FillRect(area, shade));
    }

    fn draw_text(&mut self, at: Point, text: &str) {
        self.ops.push(Op::Text(at, text.to_string()));
    }

    fn draw_window_frame(&mut self, window: &Window) {
        self.ops.push(Op::WindowFrame(window.id()));
    }

    fn draw_menu_bar(&mut self, _menus: &MenuBar) {
        self.ops.push(Op::MenuBar);
    }

    fn draw_dropdown(&mut self, menus: &MenuBar) {
        if let Some(menu) = menus.open_menu() {
            self.ops.push(Op::Dropdown(menu));
        }
    }

    fn draw_cursor(&mut self, at: Point) {
        self.ops.push(Op::Cursor(at));
    }

    fn finish(&mut self, frame: &mut [u8]) {
        self.ops.push(Op::Finish(frame.len()));
    }
}
