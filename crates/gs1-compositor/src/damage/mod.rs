// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Damage tracking.
//!
//! Screen regions that need repainting accumulate in up to 32 entries until
//! the next frame consumes them. The union of the valid entries always
//! covers everything invalidated since the last [`DamageTracker::end_update`];
//! entries may overlap and may cover more than was invalidated.
//!
//! An incoming rectangle merges into the first entry it intersects. With
//! all entries taken and nothing to merge with, it is folded into entry 0,
//! so the tracker can repaint too much but never too little.


use gs1_abi::Rect;
use gs1_abi::layout::{MAX_DIRTY_RECTS, SCREEN};

/// One accumulator entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyRect {
    /// Screen region to repaint.
    pub rect: Rect,
    /// False for unused entries.
    pub valid: bool,
}

impl DirtyRect {
    const UNUSED: Self = Self {
        rect: Rect::EMPTY,
        valid: false,
    };
}

/// Accumulator of dirty rectangles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DamageTracker {
    entries: [DirtyRect; MAX_DIRTY_RECTS],
    count: u8,
    menu_bar_dirty: bool,
}

impl DamageTracker {
    /// An empty tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: [DirtyRect::UNUSED; MAX_DIRTY_RECTS],
            count: 0,
            menu_bar_dirty: false,
        }
    }

    /// Records `rect` as needing a repaint.
    ///
    /// The rectangle is clipped to the screen first; empty results are
    /// dropped.
    pub fn invalidate(&mut self, rect: Rect) {
        let clipped = rect.clip_to(SCREEN);
        if clipped.is_empty() {
            return;
        }

        let count = usize::from(self.count);
        if let Some(entry) = self.entries[..count]
            .iter_mut()
            .find(|e| e.valid && e.rect.intersects(clipped))
        {
            entry.rect = entry.rect.union(clipped);
            return;
        }

        if count < MAX_DIRTY_RECTS {
            self.entries[count] = DirtyRect {
                rect: clipped,
                valid: true,
            };
            self.count += 1;
        } else {
            let first = &mut self.entries[0];
            first.rect = first.rect.union(clipped);
            tracing::warn!(
                rect = %clipped,
                merged = %first.rect,
                "damage overflow, folded into first entry"
            );
        }
    }

    /// Marks the menu bar for repaint.
    pub fn invalidate_menu_bar(&mut self) {
        self.menu_bar_dirty = true;
    }

    /// Returns true if the menu bar was marked since the last consume.
    #[must_use]
    pub const fn menu_bar_dirty(&self) -> bool {
        self.menu_bar_dirty
    }

    /// Number of entries the consumer should walk (`0..count`).
    #[must_use]
    pub const fn begin_update(&self) -> usize {
        self.count as usize
    }

    /// Entry `index`, if it is below the current count.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DirtyRect> {
        self.entries[..usize::from(self.count)].get(index)
    }

    /// Valid rectangles in entry order.
    pub fn rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.entries[..usize::from(self.count)]
            .iter()
            .filter(|e| e.valid)
            .map(|e| e.rect)
    }

    /// Clears every entry. The only way entries are removed.
    pub fn end_update(&mut self) {
        self.entries = [DirtyRect::UNUSED; MAX_DIRTY_RECTS];
        self.count = 0;
        self.menu_bar_dirty = false;
    }

    /// Returns true if nothing is waiting to be repainted.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.count == 0 && !self.menu_bar_dirty
    }
}

impl Default for DamageTracker {
    fn default() -> Self {
        Self::new()
    }
}
