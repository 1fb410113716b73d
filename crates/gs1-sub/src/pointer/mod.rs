// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Pointer event routing.
//!
//! Every event moves the cursor. What else happens depends on the kind:
//!
//! | Kind | Action |
//! |------|--------|
//! | Down | hit test: content clicks, title drags, close box closes, menu bar opens a menu |
//! | Move | updates the menu highlight while a menu is open |
//! | Drag | menu highlight, else the grabbed window follows, else the active window's drag procedure |
//! | Up | resolves the menu selection, ends any window drag |

#[cfg(test)]
mod pointer_test;

use gs1_abi::layout::MENU_BAR_HEIGHT;
use gs1_abi::{MouseEvent, Point, PointerKind, WindowId};
use gs1_compositor::{Compositor, MenuSelection, Part, WmError};

/// A window following the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Grab {
    window: WindowId,
    /// Pointer position relative to the frame's top-left corner.
    offset: Point,
}

/// Pointer state that outlives a single event.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerRouter {
    grab: Option<Grab>,
}

impl PointerRouter {
    #[must_use]
    pub const fn new() -> Self {
        Self { grab: None }
    }

    /// The window being dragged by its title bar.
    #[must_use]
    pub fn dragging(&self) -> Option<WindowId> {
        self.grab.map(|g| g.window)
    }

    /// Drops a drag on a window that is going away.
    pub fn forget(&mut self, window: WindowId) {
        if self.dragging() == Some(window) {
            self.grab = None;
        }
    }

    /// Ends any drag.
    pub fn reset(&mut self) {
        self.grab = None;
    }

    /// Applies one pointer event to the desktop.
    ///
    /// Returns the menu selection a release produced, for the caller to
    /// dispatch.
    pub fn route(
        &mut self,
        desktop: &mut Compositor,
        event: MouseEvent,
    ) -> Result<Option<MenuSelection>, WmError> {
        let at = event.pos;
        desktop.move_cursor(at);
        match event.kind {
            PointerKind::None => {}
            PointerKind::Down => self.press(desktop, at)?,
            PointerKind::Move => {
                if desktop.menus().is_tracking() {
                    desktop.menu_mouse_move(at);
                }
            }
            PointerKind::Drag => self.drag(desktop, at)?,
            PointerKind::Up => {
                self.grab = None;
                if desktop.menus().is_tracking() {
                    return Ok(desktop.menu_mouse_up());
                }
            }
        }
        Ok(None)
    }

    fn press(&mut self, desktop: &mut Compositor, at: Point) -> Result<(), WmError> {
        let hit = desktop.windows().hit_test(at);
        tracing::trace!(%at, part = %hit.part, window = ?hit.window, "pointer down");
        match (hit.part, hit.window) {
            (Part::Content, Some(id)) => {
                desktop.windows_mut().select(id)?;
                desktop.click(id, at)?;
            }
            (Part::Drag, Some(id)) => {
                desktop.windows_mut().select(id)?;
                let window = desktop.windows().get(id).ok_or(WmError::NoSuchWindow)?;
                let origin = window.frame().origin();
                let offset = Point::new(
                    at.x.saturating_sub(origin.x),
                    at.y.saturating_sub(origin.y),
                );
                self.grab = Some(Grab { window: id, offset });
            }
            (Part::Close, Some(id)) => {
                self.forget(id);
                desktop.close_window(id)?;
            }
            (Part::MenuBar, _) => {
                desktop.menu_mouse_down(at);
            }
            // Resizing by the grow box is not interactive.
            _ => {}
        }
        Ok(())
    }

    fn drag(&mut self, desktop: &mut Compositor, at: Point) -> Result<(), WmError> {
        if desktop.menus().is_tracking() {
            desktop.menu_mouse_move(at);
            return Ok(());
        }
        if let Some(grab) = self.grab {
            let x = at.x.saturating_sub(grab.offset.x);
            let y = at.y.saturating_sub(grab.offset.y).max(MENU_BAR_HEIGHT);
            if let Err(e) = desktop.windows_mut().move_to(grab.window, x, y) {
                self.grab = None;
                return Err(e);
            }
            return Ok(());
        }
        if let Some(active) = desktop.windows().active() {
            desktop.drag(active, at)?;
        }
        Ok(())
    }
}
