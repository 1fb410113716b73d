// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Front-to-back window order.
//!
//! A doubly linked list threaded through two arrays indexed by window id.
//! The list orders windows but owns none of them; the registry's pool does.
//!
//! ```text
//! head (front)                          tail (back)
//!   C  --below-->  B  --below-->  A
//!   C  <--above--  B  <--above--  A
//! ```

#[cfg(test)]
mod zorder_test;

use gs1_abi::WindowId;
use gs1_abi::layout::MAX_WINDOWS;

/// Z-order over window ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZOrderList {
    above: [Option<WindowId>; MAX_WINDOWS],
    below: [Option<WindowId>; MAX_WINDOWS],
    head: Option<WindowId>,
    tail: Option<WindowId>,
    /// Bit `i` set while window `i` is linked.
    linked: u16,
}

impl ZOrderList {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            above: [None; MAX_WINDOWS],
            below: [None; MAX_WINDOWS],
            head: None,
            tail: None,
            linked: 0,
        }
    }

    /// Frontmost window.
    #[must_use]
    pub const fn front(&self) -> Option<WindowId> {
        self.head
    }

    /// Backmost window.
    #[must_use]
    pub const fn back(&self) -> Option<WindowId> {
        self.tail
    }

    /// Window directly in front of `id`.
    #[must_use]
    pub fn above(&self, id: WindowId) -> Option<WindowId> {
        self.above.get(id.index()).copied().flatten()
    }

    /// Window directly behind `id`.
    #[must_use]
    pub fn below(&self, id: WindowId) -> Option<WindowId> {
        self.below.get(id.index()).copied().flatten()
    }

    /// Returns true if `id` is in the list.
    #[must_use]
    pub const fn contains(&self, id: WindowId) -> bool {
        id.index() < MAX_WINDOWS && self.linked & (1 << id.index()) != 0
    }

    /// Number of linked windows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.linked.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.linked == 0
    }

    /// Makes `id` the frontmost window.
    ///
    /// A window already in the list is moved.
    pub fn push_top(&mut self, id: WindowId) {
        self.unlink(id);
        let i = id.index();
        self.above[i] = None;
        self.below[i] = self.head;
        if let Some(old) = self.head {
            self.above[old.index()] = Some(id);
        }
        self.head = Some(id);
        if self.tail.is_none() {
            self.tail = Some(id);
        }
        self.linked |= 1 << i;
    }

    /// Makes `id` the backmost window.
    ///
    /// A window already in the list is moved.
    pub fn push_bottom(&mut self, id: WindowId) {
        self.unlink(id);
        let i = id.index();
        self.below[i] = None;
        self.above[i] = self.tail;
        if let Some(old) = self.tail {
            self.below[old.index()] = Some(id);
        }
        self.tail = Some(id);
        if self.head.is_none() {
            self.head = Some(id);
        }
        self.linked |= 1 << i;
    }

    /// Removes `id` from wherever it sits.
    ///
    /// Returns false if it was not linked.
    pub fn unlink(&mut self, id: WindowId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let i = id.index();
        let (above, below) = (self.above[i], self.below[i]);

        match above {
            Some(a) => self.below[a.index()] = below,
            None => self.head = below,
        }
        match below {
            Some(b) => self.above[b.index()] = above,
            None => self.tail = above,
        }

        self.above[i] = None;
        self.below[i] = None;
        self.linked &= !(1 << i);
        true
    }

    /// Moves `id` to the back; unlink followed by tail insertion.
    pub fn send_to_back(&mut self, id: WindowId) {
        self.push_bottom(id);
    }

    /// Iterates from the frontmost to the backmost window.
    #[must_use]
    pub const fn front_to_back(&self) -> FrontToBack<'_> {
        FrontToBack {
            list: self,
            next: self.head,
        }
    }

    /// Iterates from the backmost to the frontmost window.
    #[must_use]
    pub const fn back_to_front(&self) -> BackToFront<'_> {
        BackToFront {
            list: self,
            next: self.tail,
        }
    }
}

impl Default for ZOrderList {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`ZOrderList::front_to_back`].
pub struct FrontToBack<'a> {
    list: &'a ZOrderList,
    next: Option<WindowId>,
}

impl Iterator for FrontToBack<'_> {
    type Item = WindowId;

    fn next(&mut self) -> Option<WindowId> {
        let id = self.next?;
        self.next = self.list.below(id);
        Some(id)
    }
}

/// Iterator returned by [`ZOrderList::back_to_front`].
pub struct BackToFront<'a> {
    list: &'a ZOrderList,
    next: Option<WindowId>,
}

impl Iterator for BackToFront<'_> {
    type Item = WindowId;

    fn next(&mut self) -> Option<WindowId> {
        let id = self.next?;
        self.next = self.list.above(id);
        Some(id)
    }
}
