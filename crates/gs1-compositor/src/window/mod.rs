// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Window records.
//!
//! A window's title bar and content rectangles are always derived from its
//! frame and style, never stored independently:
//!
//! ```text
//! frame.left                         frame.right
//!   +--------------------------------+  frame.top
//!   |+------------------------------+|  frame.top + 1
//!   ||[x]  title bar (18 px)        ||
//!   |+------------------------------+|  frame.top + 19
//!   |                                |  1 px separator
//!   |+------------------------------+|  frame.top + 20
//!   ||  content                     ||
//!   ||                         [grow]||
//!   |+------------------------------+|  frame.bottom - 1
//!   +--------------------------------+
//! ```
//!
//! Plain and shadow windows have no title bar; their content starts right
//! below the top border.

#[cfg(test)]
mod window_test;

use core::fmt;

use gs1_abi::layout::{
    BORDER_WIDTH, CLOSE_BOX_INSET_X, CLOSE_BOX_INSET_Y, CLOSE_BOX_SIZE, GROW_BOX_SIZE, SCREEN,
    TITLE_BAR_HEIGHT, TITLE_MAX,
};
use gs1_abi::{Rect, WindowFlags, WindowId, WindowStyle};

// =============================================================================
// Title
// =============================================================================

/// A window title in a fixed buffer of at most 31 bytes.
///
/// Longer titles are cut at the last character boundary that fits.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Title {
    bytes: [u8; TITLE_MAX],
    len: u8,
}

impl Title {
    /// The empty title.
    pub const EMPTY: Self = Self {
        bytes: [0; TITLE_MAX],
        len: 0,
    };

    /// Copies `text`, truncating to the buffer size.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut end = text.len().min(TITLE_MAX);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let mut title = Self::EMPTY;
        title.bytes[..end].copy_from_slice(&text.as_bytes()[..end]);
        title.len = end as u8;
        title
    }

    /// The title text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..usize::from(self.len)]).unwrap_or_default()
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns true for the empty title.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for Title {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Window
// =============================================================================

/// One window record in the pool.
///
/// Records are owned by [`crate::WindowRegistry`]; everything outside the
/// crate sees them read-only and refers to them by [`WindowId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    id: WindowId,
    style: WindowStyle,
    pub(crate) flags: WindowFlags,
    frame: Rect,
    title_bar: Rect,
    content: Rect,
    pub(crate) title: Title,
}

impl Window {
    /// A zeroed record for an unused pool slot.
    pub(crate) const VACANT: Self = Self {
        id: WindowId::new(0),
        style: WindowStyle::Document,
        flags: WindowFlags::NONE,
        frame: Rect::EMPTY,
        title_bar: Rect::EMPTY,
        content: Rect::EMPTY,
        title: Title::EMPTY,
    };

    /// Creates a record with its frame clamped to the screen and its
    /// style-implied flags applied.
    #[must_use]
    pub fn new(
        id: WindowId,
        frame: Rect,
        title: &str,
        style: WindowStyle,
        flags: WindowFlags,
    ) -> Self {
        let mut window = Self {
            id,
            style,
            flags: flags | style.implied_flags(),
            frame: Rect::EMPTY,
            title_bar: Rect::EMPTY,
            content: Rect::EMPTY,
            title: Title::new(title),
        };
        window.set_frame(frame);
        window
    }

    /// Replaces the frame, clamping it to the screen and re-deriving the
    /// title bar and content rectangles.
    pub(crate) fn set_frame(&mut self, frame: Rect) {
        self.frame = frame.clip_to(SCREEN);
        let (title_bar, content) = decoration_rects(self.frame, self.style);
        self.title_bar = title_bar;
        self.content = content;
    }

    /// Stable id.
    #[must_use]
    pub const fn id(&self) -> WindowId {
        self.id
    }

    /// Decoration style.
    #[must_use]
    pub const fn style(&self) -> WindowStyle {
        self.style
    }

    /// Current flags.
    #[must_use]
    pub const fn flags(&self) -> WindowFlags {
        self.flags
    }

    /// Outer frame including the border.
    #[must_use]
    pub const fn frame(&self) -> Rect {
        self.frame
    }

    /// Title bar (empty for plain and shadow windows).
    #[must_use]
    pub const fn title_bar(&self) -> Rect {
        self.title_bar
    }

    /// Content area handed to the application.
    #[must_use]
    pub const fn content(&self) -> Rect {
        self.content
    }

    /// Title text.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.flags.contains(WindowFlags::VISIBLE)
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.flags.contains(WindowFlags::HILITED)
    }

    /// The close box, if the window has one.
    ///
    /// Sits at a fixed inset from the title bar's top-left corner, cut to
    /// the title bar on narrow windows.
    #[must_use]
    pub const fn close_box(&self) -> Option<Rect> {
        if !self.flags.contains(WindowFlags::HAS_CLOSE) || !self.style.has_title_bar() {
            return None;
        }
        let close = Rect::from_origin_size(
            self.title_bar.left.saturating_add(CLOSE_BOX_INSET_X),
            self.title_bar.top.saturating_add(CLOSE_BOX_INSET_Y),
            CLOSE_BOX_SIZE,
            CLOSE_BOX_SIZE,
        );
        Some(close.intersection(self.title_bar))
    }

    /// The grow box, if the window has one.
    ///
    /// Sits inside the border at the frame's bottom-right corner.
    #[must_use]
    pub const fn grow_box(&self) -> Option<Rect> {
        if !self.flags.contains(WindowFlags::HAS_GROW) {
            return None;
        }
        let inner = inset(self.frame);
        let grow = Rect::new(
            inner.right.saturating_sub(GROW_BOX_SIZE),
            inner.bottom.saturating_sub(GROW_BOX_SIZE),
            inner.right,
            inner.bottom,
        );
        Some(grow.intersection(inner))
    }
}

/// The frame minus its border.
const fn inset(frame: Rect) -> Rect {
    Rect::new(
        frame.left.saturating_add(BORDER_WIDTH),
        frame.top.saturating_add(BORDER_WIDTH),
        frame.right.saturating_sub(BORDER_WIDTH),
        frame.bottom.saturating_sub(BORDER_WIDTH),
    )
}

/// Derives `(title_bar, content)` from a frame and a style.
///
/// Both stay inside the frame; a frame too small for its decorations yields
/// empty rectangles.
#[must_use]
pub const fn decoration_rects(frame: Rect, style: WindowStyle) -> (Rect, Rect) {
    let inner = inset(frame);
    if !style.has_title_bar() {
        return (Rect::EMPTY, inner);
    }

    let bar_bottom = inner.top.saturating_add(TITLE_BAR_HEIGHT);
    let title_bar = Rect::new(
        inner.left,
        inner.top,
        inner.right,
        if bar_bottom < inner.bottom { bar_bottom } else { inner.bottom },
    );
    // One pixel separator line between title bar and content.
    let content = Rect::new(
        inner.left,
        title_bar.bottom.saturating_add(1),
        inner.right,
        inner.bottom,
    );
    (title_bar, content)
}
