// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The compositor facade: windows, menus, cursor and desktop together.

#[cfg(feature = "alloc")]
use alloc::boxed::Box;

#[cfg(feature = "alloc")]
use gs1_abi::layout::MAX_WINDOWS;
use gs1_abi::layout::{CURSOR_HEIGHT, CURSOR_WIDTH, DESKTOP, SCREEN, SCREEN_HEIGHT, SCREEN_WIDTH};
use gs1_abi::{Point, Rect, WindowFlags, WindowId, WindowStyle};

use crate::error::WmError;
use crate::menu::{MenuBar, MenuSelection};
use crate::registry::WindowRegistry;
use crate::render::{DesktopPattern, Renderer, WindowProc};
use crate::window::Window;

/// Where the cursor starts: the middle of the screen.
const CURSOR_HOME: Point = Point::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2);

/// Screen area covered by the cursor glyph at `at`.
const fn cursor_rect(at: Point) -> Rect {
    Rect::from_origin_size(at.x, at.y, CURSOR_WIDTH, CURSOR_HEIGHT)
}

/// All compositor state of the Sub processor.
pub struct Compositor {
    windows: WindowRegistry,
    menus: MenuBar,
    cursor: Point,
    cursor_visible: bool,
    pattern: DesktopPattern,
    #[cfg(feature = "alloc")]
    procs: [Option<Box<dyn WindowProc>>; MAX_WINDOWS],
}

impl Compositor {
    /// A desktop without windows or menus.
    ///
    /// The whole screen starts dirty so the first frame paints everything.
    #[must_use]
    pub fn new() -> Self {
        let mut windows = WindowRegistry::new();
        windows.invalidate(SCREEN);
        Self {
            windows,
            menus: MenuBar::new(),
            cursor: CURSOR_HOME,
            cursor_visible: true,
            pattern: DesktopPattern::default(),
            #[cfg(feature = "alloc")]
            procs: core::array::from_fn(|_| None),
        }
    }

    /// Drops every window, menu and procedure and starts over.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[must_use]
    pub const fn windows(&self) -> &WindowRegistry {
        &self.windows
    }

    /// Direct registry access for operations without a procedure side.
    pub const fn windows_mut(&mut self) -> &mut WindowRegistry {
        &mut self.windows
    }

    #[must_use]
    pub const fn menus(&self) -> &MenuBar {
        &self.menus
    }

    /// Menu bar access for building menus.
    pub const fn menus_mut(&mut self) -> &mut MenuBar {
        &mut self.menus
    }

    // =========================================================================
    // Windows
    // =========================================================================

    /// Opens a window; see [`WindowRegistry::allocate`].
    pub fn open_window(
        &mut self,
        frame: Rect,
        title: &str,
        style: WindowStyle,
        flags: WindowFlags,
    ) -> Result<WindowId, WmError> {
        self.windows.allocate(frame, title, style, flags)
    }

    /// Closes a window and drops its procedure.
    pub fn close_window(&mut self, id: WindowId) -> Result<(), WmError> {
        self.windows.free(id)?;
        #[cfg(feature = "alloc")]
        {
            self.procs[id.index()] = None;
        }
        Ok(())
    }

    /// Attaches application behavior to a window, replacing any previous one.
    #[cfg(feature = "alloc")]
    pub fn attach(&mut self, id: WindowId, proc: Box<dyn WindowProc>) -> Result<(), WmError> {
        if !self.windows.is_live(id) {
            return Err(WmError::NoSuchWindow);
        }
        self.procs[id.index()] = Some(proc);
        self.windows.invalidate_window(id)
    }

    /// Forwards a content click to the window's procedure.
    ///
    /// Returns true if the procedure asked for a repaint.
    pub fn click(&mut self, id: WindowId, at: Point) -> Result<bool, WmError> {
        let window = *self.windows.get(id).ok_or(WmError::NoSuchWindow)?;
        Ok(self.forward(window, |proc, w| proc.click(w, at)))
    }

    /// Forwards a drag to the window's procedure.
    ///
    /// Returns true if the procedure asked for a repaint.
    pub fn drag(&mut self, id: WindowId, at: Point) -> Result<bool, WmError> {
        let window = *self.windows.get(id).ok_or(WmError::NoSuchWindow)?;
        Ok(self.forward(window, |proc, w| proc.drag(w, at)))
    }

    /// Runs `call` on the window's procedure and dirties the content if it
    /// asks for a repaint.
    #[cfg(feature = "alloc")]
    fn forward(
        &mut self,
        window: Window,
        call: impl FnOnce(&mut dyn WindowProc, &Window) -> bool,
    ) -> bool {
        let Some(proc) = self.procs[window.id().index()].as_mut() else {
            return false;
        };
        if !call(proc.as_mut(), &window) {
            return false;
        }
        self.windows.invalidate(window.content());
        true
    }

    /// Without `alloc` no procedure can be attached.
    #[cfg(not(feature = "alloc"))]
    #[allow(clippy::unused_self)]
    fn forward(
        &mut self,
        _window: Window,
        _call: impl FnOnce(&mut dyn WindowProc, &Window) -> bool,
    ) -> bool {
        false
    }

    // =========================================================================
    // Cursor and Desktop
    // =========================================================================

    /// Current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> Point {
        self.cursor
    }

    #[must_use]
    pub const fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Moves the cursor, dirtying the old and the new glyph area.
    pub fn move_cursor(&mut self, to: Point) {
        let from = self.cursor;
        self.cursor = to;
        self.windows.invalidate(cursor_rect(from));
        self.windows.invalidate(cursor_rect(to));
    }

    /// Shows or hides the cursor.
    pub fn set_cursor_visible(&mut self, visible: bool) {
        if self.cursor_visible != visible {
            self.cursor_visible = visible;
            self.windows.invalidate(cursor_rect(self.cursor));
        }
    }

    #[must_use]
    pub const fn desktop_pattern(&self) -> DesktopPattern {
        self.pattern
    }

    /// Changes the desktop pattern, dirtying the desktop below the menu bar.
    pub fn set_desktop_pattern(&mut self, pattern: DesktopPattern) {
        if pattern != self.pattern {
            self.pattern = pattern;
            self.windows.invalidate(DESKTOP);
        }
    }

    // =========================================================================
    // Menus
    // =========================================================================

    /// Mouse pressed in the menu bar band.
    pub fn menu_mouse_down(&mut self, at: Point) -> bool {
        self.track_menu(|menus| menus.mouse_down(at))
    }

    /// Mouse moved while a menu is open.
    pub fn menu_mouse_move(&mut self, at: Point) {
        self.track_menu(|menus| menus.mouse_move(at));
    }

    /// Mouse released while a menu is open.
    pub fn menu_mouse_up(&mut self) -> Option<MenuSelection> {
        self.track_menu(MenuBar::mouse_up)
    }

    /// Runs a tracking step, dirtying the dropdown area before and after.
    fn track_menu<T>(&mut self, step: impl FnOnce(&mut MenuBar) -> T) -> T {
        let before = self.menus.open_dropdown_area();
        let result = step(&mut self.menus);
        let after = self.menus.open_dropdown_area();
        for area in [before, after].into_iter().flatten() {
            self.windows.invalidate(area);
        }
        self.windows.damage_mut().invalidate_menu_bar();
        result
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Number of dirty rectangles the next [`Compositor::paint`] consumes.
    #[must_use]
    pub const fn pending_damage(&self) -> usize {
        self.windows.damage().begin_update()
    }

    /// Paints one frame and consumes the accumulated damage.
    ///
    /// Each dirty rectangle gets the desktop pattern, then every visible
    /// window overlapping it from back to front, so nearer windows cover
    /// farther ones. Menu bar, open dropdown and cursor follow unclipped.
    ///
    /// Returns the number of dirty rectangles consumed.
    pub fn paint(&mut self, renderer: &mut dyn Renderer) -> usize {
        let count = self.windows.damage().begin_update();
        for index in 0..count {
            let Some(dirty) = self.windows.damage().get(index).copied() else {
                continue;
            };
            if !dirty.valid {
                continue;
            }
            let clip = dirty.rect;
            tracing::trace!(%clip, "painting dirty rect");
            renderer.set_clip(clip);
            renderer.fill_pattern(clip, self.pattern);
            for window in self.windows.back_to_front() {
                if !window.is_visible() || !window.frame().intersects(clip) {
                    continue;
                }
                renderer.draw_window_frame(window);
                #[cfg(feature = "alloc")]
                if let Some(proc) = self.procs[window.id().index()].as_mut() {
                    proc.draw(window, renderer);
                }
            }
        }

        renderer.reset_clip();
        renderer.draw_menu_bar(&self.menus);
        if self.menus.is_tracking() {
            renderer.draw_dropdown(&self.menus);
        }
        if self.cursor_visible {
            renderer.draw_cursor(self.cursor);
        }
        self.windows.damage_mut().end_update();
        count
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}
