// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Memory-mapped gate array access.
//!
//! Both processors are 68000s without caches, so a volatile access is a bus
//! cycle and a write is visible to the other side as soon as it completes.

use core::ptr::{read_volatile, write_volatile};

use gs1_abi::layout::BANK_SIZE;

use super::{BankWindow, RegisterBus};
use crate::bank::BankId;
use crate::link::Side;

/// Gate array registers and Word RAM window at fixed addresses.
#[derive(Clone, Copy, Debug)]
pub struct MmioBus {
    /// Register window base.
    regs: *mut u8,
    /// Word RAM bank window base.
    bank: *mut u8,
    /// Word RAM bank window length.
    bank_len: usize,
}

// SAFETY: The pointers name device memory, not Rust-owned data. Access
// ordering across processors is the protocol's job.
unsafe impl Send for MmioBus {}
// SAFETY: As above; every access is a single volatile bus cycle.
unsafe impl Sync for MmioBus {}

impl MmioBus {
    /// Creates a bus over explicit register and bank windows.
    ///
    /// # Safety
    ///
    /// - `regs` must point to at least [`gs1_abi::regs::WINDOW_SIZE`] bytes of
    ///   readable and writable memory, 2-byte aligned
    /// - `bank` must point to `bank_len` bytes of readable and writable memory
    /// - Both regions must stay valid for the lifetime of the bus and every copy
    #[must_use]
    pub const unsafe fn from_raw(regs: *mut u8, bank: *mut u8, bank_len: usize) -> Self {
        Self {
            regs,
            bank,
            bank_len,
        }
    }

    /// Creates a bus at the hardware addresses for side `S`.
    ///
    /// # Safety
    ///
    /// Must only be called on the GS1 hardware, from processor `S`.
    #[must_use]
    pub unsafe fn for_side<S: Side>() -> Self {
        let regs = core::ptr::with_exposed_provenance_mut(S::REGS_BASE);
        let bank = core::ptr::with_exposed_provenance_mut(S::BANK_BASE);
        // SAFETY: The caller guarantees these are the mapped gate array and
        // Word RAM windows of processor `S`.
        unsafe { Self::from_raw(regs, bank, BANK_SIZE) }
    }

    fn reg(&self, offset: u16) -> *mut u8 {
        debug_assert!(usize::from(offset) < gs1_abi::regs::WINDOW_SIZE);
        self.regs.wrapping_add(usize::from(offset))
    }
}

#[allow(
    clippy::cast_ptr_alignment,
    reason = "word registers sit at even offsets from a word-aligned base"
)]
impl RegisterBus for MmioBus {
    fn read_u8(&self, offset: u16) -> u8 {
        // SAFETY: The constructor guarantees the register window is mapped.
        unsafe { read_volatile(self.reg(offset)) }
    }

    fn write_u8(&self, offset: u16, value: u8) {
        // SAFETY: The constructor guarantees the register window is mapped.
        unsafe { write_volatile(self.reg(offset), value) }
    }

    fn read_u16(&self, offset: u16) -> u16 {
        debug_assert!(offset % 2 == 0, "unaligned word read at {offset:#x}");
        // SAFETY: The constructor guarantees the register window is mapped
        // and aligned; the offset is even.
        unsafe { read_volatile(self.reg(offset).cast::<u16>()) }
    }

    fn write_u16(&self, offset: u16, value: u16) {
        debug_assert!(offset % 2 == 0, "unaligned word write at {offset:#x}");
        // SAFETY: As for `read_u16`.
        unsafe { write_volatile(self.reg(offset).cast::<u16>(), value) }
    }
}

impl BankWindow for MmioBus {
    /// The hardware always maps the owned bank into the same window, so the
    /// bank id only matters to the mock.
    fn with_bank<R>(&self, _bank: BankId, f: impl FnOnce(&mut [u8]) -> R) -> R {
        // SAFETY: The constructor guarantees the window is mapped; the caller
        // holds the bank grant, so the other processor is not using it.
        let bytes = unsafe { core::slice::from_raw_parts_mut(self.bank, self.bank_len) };
        f(bytes)
    }
}
