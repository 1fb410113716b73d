// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The Main side's stand-in for the video chip.


use gs1_abi::layout::FRAME_BYTES;
use gs1_link::BankId;
use gs1_main::FrameSink;

use crate::canvas::{color, pixel_at};

/// Keeps the last presented frame.
#[derive(Clone, Debug)]
pub struct Screen {
    frame: Vec<u8>,
    presented: u32,
    last_bank: Option<BankId>,
}

impl Screen {
    /// A blank white screen.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: vec![(color::WHITE << 4) | color::WHITE; FRAME_BYTES],
            presented: 0,
            last_bank: None,
        }
    }

    /// Frames presented so far.
    #[must_use]
    pub const fn presented(&self) -> u32 {
        self.presented
    }

    /// Bank of the most recent frame.
    #[must_use]
    pub const fn last_bank(&self) -> Option<BankId> {
        self.last_bank
    }

    #[must_use]
    pub fn pixel(&self, x: i16, y: i16) -> Option<u8> {
        pixel_at(&self.frame, x, y)
    }

    /// Number of pixels that are not white.
    #[must_use]
    pub fn ink(&self) -> usize {
        self.frame
            .iter()
            .map(|&byte| {
                usize::from(byte >> 4 != color::WHITE) + usize::from(byte & 0x0F != color::WHITE)
            })
            .sum()
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for Screen {
    fn present(&mut self, bank: BankId, frame: &[u8]) {
        let Some(pixels) = frame.get(..FRAME_BYTES) else {
            tracing::warn!(%bank, len = frame.len(), "short frame dropped");
            return;
        };
        self.frame.copy_from_slice(pixels);
        self.presented = self.presented.wrapping_add(1);
        self.last_bank = Some(bank);
        tracing::trace!(frame = self.presented, %bank, "frame shown");
    }
}
