// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Window decoration styles and flag bits.

use core::fmt;

/// Decoration style of a window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WindowStyle {
    /// Title bar, close box, drag.
    #[default]
    Document = 0,
    /// Modal dialog, title bar without close box.
    Dialog = 1,
    /// Plain rectangle without title bar.
    Plain = 2,
    /// Plain rectangle with a drop shadow.
    Shadow = 3,
    /// Alert box with a bold border.
    Alert = 4,
}

impl WindowStyle {
    /// Try to convert from a raw byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Document),
            1 => Some(Self::Dialog),
            2 => Some(Self::Plain),
            3 => Some(Self::Shadow),
            4 => Some(Self::Alert),
            _ => None,
        }
    }

    /// Returns true if the style draws a title bar.
    #[inline]
    #[must_use]
    pub const fn has_title_bar(self) -> bool {
        !matches!(self, Self::Plain | Self::Shadow)
    }

    /// Flags every window of this style carries.
    #[must_use]
    pub const fn implied_flags(self) -> WindowFlags {
        match self {
            Self::Document => WindowFlags::HAS_CLOSE,
            Self::Dialog | Self::Alert => WindowFlags::MODAL,
            Self::Plain | Self::Shadow => WindowFlags::NONE,
        }
    }
}

/// Window flag bitfield.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct WindowFlags(u8);

impl WindowFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// Drawn on screen and eligible for hit testing.
    pub const VISIBLE: Self = Self(0x01);
    /// Title bar highlighted; the active window.
    pub const HILITED: Self = Self(0x02);
    /// Has a close box.
    pub const HAS_CLOSE: Self = Self(0x04);
    /// Has a grow box.
    pub const HAS_GROW: Self = Self(0x08);
    /// Blocks input to other windows.
    pub const MODAL: Self = Self(0x10);
    /// Needs a full redraw.
    pub const DIRTY: Self = Self(0x20);

    /// Creates flags from raw bits.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if every flag in `other` is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of both flag sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Sets the given flags.
    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clears the given flags.
    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Sets or clears the given flags.
    #[inline]
    pub fn set(&mut self, other: Self, on: bool) {
        if on {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }
}

impl core::ops::BitOr for WindowFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Debug for WindowFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(WindowFlags, &str); 6] = [
            (WindowFlags::VISIBLE, "VISIBLE"),
            (WindowFlags::HILITED, "HILITED"),
            (WindowFlags::HAS_CLOSE, "HAS_CLOSE"),
            (WindowFlags::HAS_GROW, "HAS_GROW"),
            (WindowFlags::MODAL, "MODAL"),
            (WindowFlags::DIRTY, "DIRTY"),
        ];
        write!(f, "WindowFlags(")?;
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    write!(f, " | ")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        write!(f, ")")
    }
}
