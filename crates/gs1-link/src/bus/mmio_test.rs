// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the MMIO bus against local memory.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use gs1_abi::regs::{COMM_STATUS0, MEM_MODE, WINDOW_SIZE};

/// Register window plus a small bank, word aligned.
struct Backing {
    regs: [u16; WINDOW_SIZE / 2],
    bank: [u8; 64],
}

impl Backing {
    fn new() -> Self {
        Self {
            regs: [0; WINDOW_SIZE / 2],
            bank: [0; 64],
        }
    }

    fn bus(&mut self) -> MmioBus {
        // SAFETY: Both buffers outlive the bus in every test below.
        unsafe {
            MmioBus::from_raw(
                self.regs.as_mut_ptr().cast::<u8>(),
                self.bank.as_mut_ptr(),
                self.bank.len(),
            )
        }
    }
}

#[test]
fn word_access_hits_the_right_register() {
    let mut backing = Backing::new();
    let bus = backing.bus();
    bus.write_u16(MEM_MODE, 0x0004);
    bus.write_u16(COMM_STATUS0, 0xBEEF);
    assert_eq!(bus.read_u16(MEM_MODE), 0x0004);
    assert_eq!(bus.read_u16(COMM_STATUS0), 0xBEEF);
    assert_eq!(backing.regs[usize::from(MEM_MODE / 2)], 0x0004);
    assert_eq!(backing.regs[usize::from(COMM_STATUS0 / 2)], 0xBEEF);
}

#[test]
fn byte_access_is_independent_per_byte() {
    let mut backing = Backing::new();
    let bus = backing.bus();
    bus.write_u8(0x0E, 0x10);
    bus.write_u8(0x0F, 0x03);
    assert_eq!(bus.read_u8(0x0E), 0x10);
    assert_eq!(bus.read_u8(0x0F), 0x03);
}

#[test]
fn bank_window_exposes_the_mapped_bytes() {
    let mut backing = Backing::new();
    let bus = backing.bus();
    bus.with_bank(BankId::ONE, |bytes| {
        assert_eq!(bytes.len(), 64);
        bytes[0] = 0xAA;
        bytes[63] = 0x55;
    });
    assert_eq!(backing.bank[0], 0xAA);
    assert_eq!(backing.bank[63], 0x55);
}
