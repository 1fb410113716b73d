// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Pointer events and their packing into command parameter words.
//!
//! The Main processor polls the pointer device once per vertical blank,
//! classifies the change since the previous poll and, if anything happened,
//! sends a `MOUSE_EVENT` command:
//!
//! | Word | Content |
//! |------|---------|
//! | CMD0 | absolute x |
//! | CMD1 | absolute y |
//! | CMD2 | `kind << 8 \| buttons` |
//! | CMD3 | delta x (signed) |

use crate::geometry::Point;
use crate::protocol::PARAM_WORDS;
use core::fmt;

#[cfg(test)]
mod input_test;

/// Kind of pointer event, packed into the high byte of CMD2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PointerKind {
    /// Nothing changed.
    None = 0x00,
    /// Moved with no button held.
    Move = 0x01,
    /// A button was newly pressed.
    Down = 0x02,
    /// A button was released.
    Up = 0x03,
    /// Moved with a button held.
    Drag = 0x04,
}

impl PointerKind {
    /// Try to convert from a raw byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::None),
            0x01 => Some(Self::Move),
            0x02 => Some(Self::Down),
            0x03 => Some(Self::Up),
            0x04 => Some(Self::Drag),
            _ => None,
        }
    }
}

/// Pointer button mask (4 bits).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Buttons(u8);

impl Buttons {
    /// No button held.
    pub const NONE: Self = Self(0);
    /// Left button.
    pub const LEFT: Self = Self(0x01);
    /// Right button.
    pub const RIGHT: Self = Self(0x02);
    /// Middle button.
    pub const MIDDLE: Self = Self(0x04);
    /// Start button.
    pub const START: Self = Self(0x08);

    const MASK: u8 = 0x0F;

    /// Creates a mask from raw bits; bits above the low nibble are dropped.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    /// Raw bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if no button is held.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every button in `other` is held.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Buttons held in `self` but not in `previous`.
    #[inline]
    #[must_use]
    pub const fn newly_pressed(self, previous: Self) -> Self {
        Self(self.0 & !previous.0)
    }
}

impl core::ops::BitOr for Buttons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for Buttons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Buttons({:#06b})", self.0)
    }
}

/// A decoded pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: PointerKind,
    /// Buttons held after the event.
    pub buttons: Buttons,
    /// Absolute pointer position.
    pub pos: Point,
    /// Horizontal movement since the previous poll.
    pub dx: i16,
}

impl MouseEvent {
    /// Creates an event.
    #[must_use]
    pub const fn new(kind: PointerKind, buttons: Buttons, pos: Point, dx: i16) -> Self {
        Self {
            kind,
            buttons,
            pos,
            dx,
        }
    }

    /// Classifies the change between two pointer polls.
    ///
    /// A newly pressed button wins over everything, then any other button
    /// change is a release, then movement is a drag (button held) or a move.
    /// Returns `None` when nothing changed.
    #[must_use]
    pub const fn classify(
        pos: Point,
        buttons: Buttons,
        previous: Buttons,
        dx: i16,
        dy: i16,
    ) -> Option<Self> {
        let kind = if buttons.0 != previous.0 {
            if buttons.newly_pressed(previous).is_empty() {
                PointerKind::Up
            } else {
                PointerKind::Down
            }
        } else if dx != 0 || dy != 0 {
            if buttons.is_empty() {
                PointerKind::Move
            } else {
                PointerKind::Drag
            }
        } else {
            return None;
        };
        Some(Self::new(kind, buttons, pos, dx))
    }

    /// Packs the event into the four `MOUSE_EVENT` parameter words.
    #[must_use]
    pub const fn to_params(self) -> [u16; PARAM_WORDS] {
        [
            self.pos.x as u16,
            self.pos.y as u16,
            ((self.kind as u16) << 8) | self.buttons.0 as u16,
            self.dx as u16,
        ]
    }

    /// Unpacks an event from `MOUSE_EVENT` parameter words.
    ///
    /// Returns `None` if the kind byte is not a known pointer kind.
    #[must_use]
    pub const fn from_params(params: [u16; PARAM_WORDS]) -> Option<Self> {
        let Some(kind) = PointerKind::from_u8((params[2] >> 8) as u8) else {
            return None;
        };
        Some(Self::new(
            kind,
            Buttons::from_bits(params[2] as u8),
            Point::new(params[0] as i16, params[1] as i16),
            params[3] as i16,
        ))
    }
}
