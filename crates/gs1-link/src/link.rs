// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Per-side register access.
//!
//! [`RegisterLink`] wraps a [`RegisterBus`] with the view of one processor.
//! The side is a type parameter, so Main code cannot write status words and
//! Sub code cannot write command words: the methods simply do not exist on
//! the wrong side.

use core::marker::PhantomData;

use gs1_abi::layout::{MAIN_BANK_BASE, SUB_BANK_BASE};
use gs1_abi::protocol::{PARAM_WORDS, RESULT_WORDS};
use gs1_abi::regs::{
    self, COMM_FLAG_MAIN, COMM_FLAG_SUB, MEM_MODE, MEM_MODE_DMNA, MEM_MODE_MAIN_WRITABLE,
    MEM_MODE_RET, MEM_MODE_SEL, MEM_MODE_SUB_WRITABLE,
};

use crate::bank::BankId;
use crate::bus::RegisterBus;

mod sealed {
    pub trait Sealed {}
}

/// One of the two processors.
pub trait Side: sealed::Sealed + 'static {
    /// Name used in logs and violation messages.
    const NAME: &'static str;
    /// True for the Main processor.
    const IS_MAIN: bool;
    /// Offset of the flag byte this side writes.
    const FLAG: u16;
    /// Offset of the flag byte the other side writes.
    const PEER_FLAG: u16;
    /// This side's swap request bit in `MEM_MODE`.
    const SWAP_BIT: u16;
    /// Bits of `MEM_MODE` this side may write.
    const MODE_WRITABLE: u16;
    /// Register window base address on hardware.
    const REGS_BASE: usize;
    /// Word RAM bank window base address on hardware.
    const BANK_BASE: usize;

    /// Bank this side sees for a given `MEM_MODE.SEL` value.
    fn bank(sel: bool) -> BankId;
}

/// The Main processor: initiator of commands, consumer of frames.
#[derive(Debug)]
pub enum Main {}

/// The Sub processor: responder to commands, producer of frames.
#[derive(Debug)]
pub enum Sub {}

impl sealed::Sealed for Main {}
impl sealed::Sealed for Sub {}

impl Side for Main {
    const NAME: &'static str = "main";
    const IS_MAIN: bool = true;
    const FLAG: u16 = COMM_FLAG_MAIN;
    const PEER_FLAG: u16 = COMM_FLAG_SUB;
    const SWAP_BIT: u16 = MEM_MODE_DMNA;
    const MODE_WRITABLE: u16 = MEM_MODE_MAIN_WRITABLE;
    const REGS_BASE: usize = regs::MAIN_BASE;
    const BANK_BASE: usize = MAIN_BANK_BASE;

    fn bank(sel: bool) -> BankId {
        if sel { BankId::ONE } else { BankId::ZERO }
    }
}

impl Side for Sub {
    const NAME: &'static str = "sub";
    const IS_MAIN: bool = false;
    const FLAG: u16 = COMM_FLAG_SUB;
    const PEER_FLAG: u16 = COMM_FLAG_MAIN;
    const SWAP_BIT: u16 = MEM_MODE_RET;
    const MODE_WRITABLE: u16 = MEM_MODE_SUB_WRITABLE;
    const REGS_BASE: usize = regs::SUB_BASE;
    const BANK_BASE: usize = SUB_BANK_BASE;

    fn bank(sel: bool) -> BankId {
        if sel { BankId::ZERO } else { BankId::ONE }
    }
}

/// Register access as seen from side `S`.
pub struct RegisterLink<B, S: Side> {
    bus: B,
    _side: PhantomData<fn() -> S>,
}

impl<B: Clone, S: Side> Clone for RegisterLink<B, S> {
    fn clone(&self) -> Self {
        Self::new(self.bus.clone())
    }
}

impl<B, S: Side> RegisterLink<B, S> {
    /// Wraps a bus.
    #[must_use]
    pub const fn new(bus: B) -> Self {
        Self {
            bus,
            _side: PhantomData,
        }
    }

    /// The underlying bus.
    #[must_use]
    pub const fn bus(&self) -> &B {
        &self.bus
    }
}

impl<B: RegisterBus, S: Side> RegisterLink<B, S> {
    /// This side's flag byte.
    #[must_use]
    pub fn own_flag(&self) -> u8 {
        self.bus.read_u8(S::FLAG)
    }

    /// The other side's flag byte.
    #[must_use]
    pub fn peer_flag(&self) -> u8 {
        self.bus.read_u8(S::PEER_FLAG)
    }

    /// Writes this side's flag byte.
    pub fn set_flag(&self, value: u8) {
        self.bus.write_u8(S::FLAG, value);
    }

    /// Reads `MEM_MODE`.
    #[must_use]
    pub fn mem_mode(&self) -> u16 {
        self.bus.read_u16(MEM_MODE)
    }

    /// Sets bits this side owns in `MEM_MODE`.
    pub fn set_mode_bits(&self, bits: u16) {
        debug_assert!(
            bits & !S::MODE_WRITABLE == 0,
            "{} cannot set MEM_MODE bits {bits:#06x}",
            S::NAME
        );
        let mode = self.mem_mode();
        self.bus.write_u16(MEM_MODE, mode | (bits & S::MODE_WRITABLE));
    }

    /// Returns true while this side's swap request waits for the hardware.
    #[must_use]
    pub fn swap_requested(&self) -> bool {
        self.mem_mode() & S::SWAP_BIT != 0
    }

    /// The bank currently mapped to this side.
    #[must_use]
    pub fn current_bank(&self) -> BankId {
        S::bank(self.mem_mode() & MEM_MODE_SEL != 0)
    }
}

impl<B: RegisterBus> RegisterLink<B, Main> {
    /// Writes command parameter word `index`.
    pub fn write_param(&self, index: usize, value: u16) {
        debug_assert!(index < PARAM_WORDS);
        self.bus.write_u16(regs::cmd_word(index), value);
    }

    /// Reads status (result) word `index`.
    #[must_use]
    pub fn read_result(&self, index: usize) -> u16 {
        self.bus.read_u16(regs::status_word(index))
    }

    /// Reads all result words.
    #[must_use]
    pub fn read_results(&self) -> [u16; RESULT_WORDS] {
        core::array::from_fn(|i| self.read_result(i))
    }

    /// Reads the Sub reset / bus request register.
    #[must_use]
    pub fn read_reset(&self) -> u16 {
        self.bus.read_u16(regs::RESET)
    }

    /// Writes the Sub reset / bus request register.
    pub fn write_reset(&self, value: u16) {
        self.bus.write_u16(regs::RESET, value);
    }
}

impl<B: RegisterBus> RegisterLink<B, Sub> {
    /// Reads command parameter word `index`.
    #[must_use]
    pub fn read_param(&self, index: usize) -> u16 {
        debug_assert!(index < PARAM_WORDS);
        self.bus.read_u16(regs::cmd_word(index))
    }

    /// Reads all parameter words.
    #[must_use]
    pub fn read_params(&self) -> [u16; PARAM_WORDS] {
        core::array::from_fn(|i| self.read_param(i))
    }

    /// Writes status (result) word `index`.
    pub fn write_result(&self, index: usize, value: u16) {
        self.bus.write_u16(regs::status_word(index), value);
    }
}
