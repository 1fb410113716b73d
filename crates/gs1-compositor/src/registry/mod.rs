// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The window registry.
//!
//! A fixed pool of 16 window records with an occupancy bitmap. A window's
//! id is its slot index and stays valid until the window is freed; the
//! record itself is never handed out mutably.
//!
//! The registry also owns the Z-order, the active window and the damage
//! accumulator, because every window operation touches all three: opening
//! a window links it in front and activates it, moving one dirties the old
//! and the new frame.


use gs1_abi::layout::MAX_WINDOWS;
use gs1_abi::{Point, Rect, WindowFlags, WindowId, WindowStyle};

use crate::damage::DamageTracker;
use crate::error::WmError;
use crate::hit::{Hit, HitTester};
use crate::window::{Title, Window};
use crate::zorder::ZOrderList;

/// Window pool plus ordering, activation and damage state.
#[derive(Clone, Debug)]
pub struct WindowRegistry {
    slots: [Window; MAX_WINDOWS],
    /// Bit `i` set while slot `i` holds a live window.
    used: u16,
    z: ZOrderList,
    active: Option<WindowId>,
    damage: DamageTracker,
}

impl WindowRegistry {
    /// An empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [Window::VACANT; MAX_WINDOWS],
            used: 0,
            z: ZOrderList::new(),
            active: None,
            damage: DamageTracker::new(),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Opens a window in the first free slot.
    ///
    /// The frame is clamped to the screen, style-implied flags are added,
    /// and the window goes to the front of the Z-order as the active window.
    pub fn allocate(
        &mut self,
        frame: Rect,
        title: &str,
        style: WindowStyle,
        flags: WindowFlags,
    ) -> Result<WindowId, WmError> {
        let slot = (!self.used).trailing_zeros() as usize;
        if slot >= MAX_WINDOWS {
            tracing::warn!(capacity = MAX_WINDOWS, "window pool exhausted");
            return Err(WmError::PoolExhausted);
        }
        let id = WindowId::new(slot as u8);

        self.slots[slot] = Window::new(id, frame, title, style, flags);
        self.used |= 1 << slot;
        self.z.push_top(id);
        self.activate(id);

        let window = &self.slots[slot];
        if window.is_visible() {
            self.damage.invalidate(window.frame());
        }
        tracing::debug!(%id, frame = %window.frame(), ?style, "window opened");
        Ok(id)
    }

    /// Closes a window and returns its slot to the pool.
    ///
    /// The area it covered is dirtied, and if it was active the new front
    /// window (if any) becomes active.
    pub fn free(&mut self, id: WindowId) -> Result<(), WmError> {
        let frame = self.get(id).ok_or(WmError::NoSuchWindow)?.frame();
        self.damage.invalidate(frame);
        self.z.unlink(id);
        self.used &= !(1 << id.index());
        self.slots[id.index()] = Window::VACANT;

        if self.active == Some(id) {
            self.active = self.z.front();
            if let Some(next) = self.active {
                let window = &mut self.slots[next.index()];
                window.flags.insert(WindowFlags::HILITED);
                let frame = window.frame();
                self.damage.invalidate(frame);
            }
        }
        tracing::debug!(%id, "window closed");
        Ok(())
    }

    /// Closes every window.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// The live window with this id.
    #[must_use]
    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.is_live(id).then(|| &self.slots[id.index()])
    }

    /// Returns true if `id` names a live window.
    #[must_use]
    pub const fn is_live(&self, id: WindowId) -> bool {
        id.index() < MAX_WINDOWS && self.used & (1 << id.index()) != 0
    }

    /// Number of live windows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.used.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// The active window, which receives input.
    #[must_use]
    pub const fn active(&self) -> Option<WindowId> {
        self.active
    }

    /// Frontmost window.
    #[must_use]
    pub const fn front(&self) -> Option<WindowId> {
        self.z.front()
    }

    /// Backmost window.
    #[must_use]
    pub const fn back(&self) -> Option<WindowId> {
        self.z.back()
    }

    /// The Z-order.
    #[must_use]
    pub const fn z_order(&self) -> &ZOrderList {
        &self.z
    }

    /// Live windows from front to back.
    pub fn front_to_back(&self) -> impl Iterator<Item = &Window> + '_ {
        self.z.front_to_back().map(|id| &self.slots[id.index()])
    }

    /// Live windows from back to front (painting order).
    pub fn back_to_front(&self) -> impl Iterator<Item = &Window> + '_ {
        self.z.back_to_front().map(|id| &self.slots[id.index()])
    }

    /// Resolves a screen point to a window part.
    #[must_use]
    pub fn hit_test(&self, pt: Point) -> Hit {
        HitTester::new(self).resolve(pt)
    }

    // =========================================================================
    // Z-Order and Activation
    // =========================================================================

    /// Brings a window to the front and makes it active.
    ///
    /// Both the previously active and the newly active frame are dirtied.
    pub fn select(&mut self, id: WindowId) -> Result<(), WmError> {
        if !self.is_live(id) {
            return Err(WmError::NoSuchWindow);
        }
        if self.z.front() == Some(id) && self.active == Some(id) {
            return Ok(());
        }
        self.z.push_top(id);
        self.activate(id);
        self.damage.invalidate(self.slots[id.index()].frame());
        tracing::debug!(%id, "window selected");
        Ok(())
    }

    /// Moves a window behind all others. Activation does not change.
    pub fn send_to_back(&mut self, id: WindowId) -> Result<(), WmError> {
        if !self.is_live(id) {
            return Err(WmError::NoSuchWindow);
        }
        if self.z.back() == Some(id) {
            return Ok(());
        }
        self.z.send_to_back(id);
        self.damage.invalidate(self.slots[id.index()].frame());
        Ok(())
    }

    /// Moves the highlight to `id`, dirtying the previous holder.
    fn activate(&mut self, id: WindowId) {
        if let Some(old) = self.active.filter(|&old| old != id) {
            let window = &mut self.slots[old.index()];
            window.flags.remove(WindowFlags::HILITED);
            let frame = window.frame();
            self.damage.invalidate(frame);
        }
        self.active = Some(id);
        self.slots[id.index()].flags.insert(WindowFlags::HILITED);
    }

    // =========================================================================
    // Visibility and Geometry
    // =========================================================================

    /// Makes a hidden window visible.
    pub fn show(&mut self, id: WindowId) -> Result<(), WmError> {
        let window = self.live_mut(id)?;
        if window.is_visible() {
            return Ok(());
        }
        window.flags.insert(WindowFlags::VISIBLE);
        let frame = window.frame();
        self.damage.invalidate(frame);
        Ok(())
    }

    /// Hides a window without closing it.
    pub fn hide(&mut self, id: WindowId) -> Result<(), WmError> {
        let window = self.live_mut(id)?;
        if !window.is_visible() {
            return Ok(());
        }
        window.flags.remove(WindowFlags::VISIBLE);
        let frame = window.frame();
        self.damage.invalidate(frame);
        Ok(())
    }

    /// Moves a window's top-left corner to `(x, y)`.
    ///
    /// The frame keeps its size unless the screen edge clamps it.
    pub fn move_to(&mut self, id: WindowId, x: i16, y: i16) -> Result<(), WmError> {
        let window = self.live_mut(id)?;
        let old = window.frame();
        let dx = x.saturating_sub(old.left);
        let dy = y.saturating_sub(old.top);
        window.set_frame(old.offset(dx, dy));
        let new = window.frame();
        self.damage.invalidate(old);
        self.damage.invalidate(new);
        tracing::trace!(%id, from = %old, to = %new, "window moved");
        Ok(())
    }

    /// Resizes a window, keeping its top-left corner.
    pub fn resize(&mut self, id: WindowId, width: i16, height: i16) -> Result<(), WmError> {
        let window = self.live_mut(id)?;
        let old = window.frame();
        window.set_frame(Rect::from_origin_size(old.left, old.top, width, height));
        let new = window.frame();
        self.damage.invalidate(old);
        self.damage.invalidate(new);
        Ok(())
    }

    /// Replaces a window's title. Only the title bar is dirtied.
    pub fn set_title(&mut self, id: WindowId, title: &str) -> Result<(), WmError> {
        let window = self.live_mut(id)?;
        window.title = Title::new(title);
        let title_bar = window.title_bar();
        self.damage.invalidate(title_bar);
        Ok(())
    }

    fn live_mut(&mut self, id: WindowId) -> Result<&mut Window, WmError> {
        if self.is_live(id) {
            Ok(&mut self.slots[id.index()])
        } else {
            Err(WmError::NoSuchWindow)
        }
    }

    // =========================================================================
    // Damage
    // =========================================================================

    /// The damage accumulator.
    #[must_use]
    pub const fn damage(&self) -> &DamageTracker {
        &self.damage
    }

    /// The damage accumulator, for consuming a frame.
    pub const fn damage_mut(&mut self) -> &mut DamageTracker {
        &mut self.damage
    }

    /// Marks a screen region for repaint.
    pub fn invalidate(&mut self, rect: Rect) {
        self.damage.invalidate(rect);
    }

    /// Marks a window's frame for repaint.
    pub fn invalidate_window(&mut self, id: WindowId) -> Result<(), WmError> {
        let frame = self.get(id).ok_or(WmError::NoSuchWindow)?.frame();
        self.damage.invalidate(frame);
        Ok(())
    }
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}
