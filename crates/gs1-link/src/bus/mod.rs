// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Bus abstraction over the gate array.
//!
//! The protocol layers only ever touch the gate array through these two
//! traits, so the same code drives the real registers on hardware and the
//! shared-memory mock on the host.

#[cfg(test)]
mod mmio_test;

#[cfg(any(test, feature = "std"))]
pub mod mock;
mod mmio;

pub use mmio::MmioBus;

use crate::bank::BankId;

/// Byte and word access to the gate array register window.
///
/// Offsets are relative to the side's register base. Words are big-endian:
/// the byte at an even offset is the high byte of the word at that offset.
pub trait RegisterBus {
    /// Read one byte.
    fn read_u8(&self, offset: u16) -> u8;

    /// Write one byte.
    fn write_u8(&self, offset: u16, value: u8);

    /// Read one 16-bit word at an even offset.
    fn read_u16(&self, offset: u16) -> u16;

    /// Write one 16-bit word at an even offset.
    fn write_u16(&self, offset: u16, value: u16);
}

/// Access to the Word RAM bank mapped into this side's address space.
pub trait BankWindow {
    /// Runs `f` over the bytes of `bank`.
    ///
    /// Callers must hold the bank's ownership token; [`crate::BankGrant`]
    /// is the only caller in this crate.
    fn with_bank<R>(&self, bank: BankId, f: impl FnOnce(&mut [u8]) -> R) -> R;
}
