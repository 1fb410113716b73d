// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Shared-memory gate array for host tests and the simulator.
//!
//! One [`GateArray`] is shared by both processors (usually two threads).
//! Each processor gets its own [`MockBus`] view. Registers are atomics, so a
//! write by one thread is visible to a spinning reader on the other one,
//! which is exactly the guarantee the real bus gives.
//!
//! The mock enforces the ownership rules the hardware enforces and a few it
//! cannot, panicking on violations:
//! - a side writing a register byte owned by the other side
//! - both sides touching the same Word RAM bank at the same time
//!
//! `MEM_MODE` writes only change the bits the writing side owns, like the
//! hardware. A swap request either completes immediately (auto-swap, used
//! by the simulator) or waits for [`GateArray::step_hardware`] (used by
//! tests that want to observe the pending state).

use core::marker::PhantomData;
use core::sync::atomic::{AtomicU16, Ordering};
use std::boxed::Box;
use std::sync::{Arc, Mutex, TryLockError};
use std::vec;

use gs1_abi::layout::BANK_SIZE;
use gs1_abi::regs::{
    COMM_CMD0, COMM_FLAG_MAIN, COMM_FLAG_SUB, COMM_STATUS0, MEM_MODE, MEM_MODE_DMNA,
    MEM_MODE_RET, MEM_MODE_SEL, RESET, RESET_SRES, WINDOW_SIZE,
};

use super::{BankWindow, RegisterBus};
use crate::bank::BankId;
use crate::link::{Main, Side, Sub};

/// Number of 16-bit registers in the window.
const REG_WORDS: usize = WINDOW_SIZE / 2;

/// Which processor may write a register byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Owner {
    Main,
    Sub,
    /// `MEM_MODE`: both, each through its own bit mask.
    Mode,
    /// Registers the link never uses.
    Open,
}

fn owner(offset: u16) -> Owner {
    match offset {
        o if o == RESET || o == RESET + 1 => Owner::Main,
        o if o == MEM_MODE || o == MEM_MODE + 1 => Owner::Mode,
        o if o == COMM_FLAG_MAIN => Owner::Main,
        o if o == COMM_FLAG_SUB => Owner::Sub,
        o if (COMM_CMD0..COMM_CMD0 + 0x10).contains(&o) => Owner::Main,
        o if (COMM_STATUS0..COMM_STATUS0 + 0x10).contains(&o) => Owner::Sub,
        _ => Owner::Open,
    }
}

/// The shared gate array: register file plus both Word RAM banks.
pub struct GateArray {
    regs: [AtomicU16; REG_WORDS],
    banks: [Mutex<Box<[u8]>>; 2],
    auto_swap: bool,
}

impl GateArray {
    /// Creates a gate array whose swaps wait for [`Self::step_hardware`].
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::build(false))
    }

    /// Creates a gate array that completes every swap request immediately.
    #[must_use]
    pub fn with_auto_swap() -> Arc<Self> {
        Arc::new(Self::build(true))
    }

    fn build(auto_swap: bool) -> Self {
        Self {
            regs: core::array::from_fn(|_| AtomicU16::new(0)),
            banks: core::array::from_fn(|_| Mutex::new(vec![0u8; BANK_SIZE].into_boxed_slice())),
            auto_swap,
        }
    }

    /// The Main processor's view.
    #[must_use]
    pub fn main_bus(self: &Arc<Self>) -> MockBus<Main> {
        MockBus::new(Arc::clone(self))
    }

    /// The Sub processor's view.
    #[must_use]
    pub fn sub_bus(self: &Arc<Self>) -> MockBus<Sub> {
        MockBus::new(Arc::clone(self))
    }

    /// Reads a register word without side or ownership checks.
    #[must_use]
    pub fn peek_u16(&self, offset: u16) -> u16 {
        self.word(offset).load(Ordering::SeqCst)
    }

    /// Current bank assignment bit (`MEM_MODE.SEL`).
    #[must_use]
    pub fn sel(&self) -> bool {
        self.peek_u16(MEM_MODE) & MEM_MODE_SEL != 0
    }

    /// Returns true if either side's swap request is waiting for hardware.
    #[must_use]
    pub fn swap_pending(&self) -> bool {
        self.peek_u16(MEM_MODE) & (MEM_MODE_RET | MEM_MODE_DMNA) != 0
    }

    /// Completes a pending swap: clears the request bits and flips `SEL`.
    ///
    /// Returns false if no swap was pending. Requests from both sides that
    /// are pending at once complete as a single swap.
    pub fn step_hardware(&self) -> bool {
        let word = self.word(MEM_MODE);
        let result = word.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |old| {
            (old & (MEM_MODE_RET | MEM_MODE_DMNA) != 0)
                .then_some((old & !(MEM_MODE_RET | MEM_MODE_DMNA)) ^ MEM_MODE_SEL)
        });
        match result {
            Ok(old) => {
                tracing::trace!(sel = old & MEM_MODE_SEL == 0, "hardware completed bank swap");
                true
            }
            Err(_) => false,
        }
    }

    /// Returns true once Main has released the Sub processor from reset.
    #[must_use]
    pub fn reset_released(&self) -> bool {
        self.peek_u16(RESET) & RESET_SRES != 0
    }

    /// Blocks the calling thread until Main releases the Sub from reset.
    pub fn wait_reset_released(&self) {
        while !self.reset_released() {
            std::thread::yield_now();
        }
    }

    fn word(&self, offset: u16) -> &AtomicU16 {
        let index = usize::from(offset / 2);
        assert!(
            index < REG_WORDS,
            "register offset {offset:#x} outside the gate array window"
        );
        &self.regs[index]
    }

    fn check_owner<S: Side>(offset: u16) {
        let allowed = match owner(offset) {
            Owner::Main => S::IS_MAIN,
            Owner::Sub => !S::IS_MAIN,
            Owner::Mode | Owner::Open => true,
        };
        assert!(
            allowed,
            "protocol violation: {} wrote register {offset:#04x} owned by the other processor",
            S::NAME
        );
    }

    /// Replaces the bits in `mask` of the word at `offset`.
    fn write_masked<S: Side>(&self, offset: u16, value: u16, mask: u16) {
        if owner(offset) == Owner::Mode {
            self.write_mode::<S>(value, mask);
        } else {
            let _ = self.word(offset).fetch_update(Ordering::SeqCst, Ordering::SeqCst, |old| {
                Some((old & !mask) | (value & mask))
            });
        }
    }

    fn write_mode<S: Side>(&self, value: u16, mask: u16) {
        let mask = mask & S::MODE_WRITABLE;
        let auto_swap = self.auto_swap;
        let word = self.word(MEM_MODE);
        let _ = word.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |old| {
            let mut new = (old & !mask) | (value & mask);
            let requested = new & S::SWAP_BIT != 0 && old & S::SWAP_BIT == 0;
            if requested && auto_swap {
                new = (new & !S::SWAP_BIT) ^ MEM_MODE_SEL;
            }
            Some(new)
        });
    }

    fn with_bank<R>(&self, bank: BankId, f: impl FnOnce(&mut [u8]) -> R) -> R {
        let mut guard = match self.banks[bank.index()].try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => {
                panic!("protocol violation: {bank} accessed by both processors at once")
            }
        };
        f(&mut guard[..])
    }
}

/// One processor's view of a shared [`GateArray`].
pub struct MockBus<S: Side> {
    ga: Arc<GateArray>,
    _side: PhantomData<fn() -> S>,
}

impl<S: Side> MockBus<S> {
    fn new(ga: Arc<GateArray>) -> Self {
        Self {
            ga,
            _side: PhantomData,
        }
    }

    /// The shared gate array behind this view.
    #[must_use]
    pub fn gate_array(&self) -> &Arc<GateArray> {
        &self.ga
    }
}

impl<S: Side> Clone for MockBus<S> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.ga))
    }
}

impl<S: Side> RegisterBus for MockBus<S> {
    fn read_u8(&self, offset: u16) -> u8 {
        let word = self.ga.word(offset & !1).load(Ordering::SeqCst);
        if offset % 2 == 0 {
            (word >> 8) as u8
        } else {
            word as u8
        }
    }

    fn write_u8(&self, offset: u16, value: u8) {
        GateArray::check_owner::<S>(offset);
        tracing::trace!(side = S::NAME, offset, value, "register byte write");
        let (value, mask) = if offset % 2 == 0 {
            (u16::from(value) << 8, 0xFF00)
        } else {
            (u16::from(value), 0x00FF)
        };
        self.ga.write_masked::<S>(offset & !1, value, mask);
    }

    fn read_u16(&self, offset: u16) -> u16 {
        assert!(offset % 2 == 0, "unaligned word read at {offset:#x}");
        self.ga.word(offset).load(Ordering::SeqCst)
    }

    fn write_u16(&self, offset: u16, value: u16) {
        assert!(offset % 2 == 0, "unaligned word write at {offset:#x}");
        GateArray::check_owner::<S>(offset);
        GateArray::check_owner::<S>(offset + 1);
        tracing::trace!(side = S::NAME, offset, value, "register word write");
        self.ga.write_masked::<S>(offset, value, 0xFFFF);
    }
}

impl<S: Side> BankWindow for MockBus<S> {
    fn with_bank<R>(&self, bank: BankId, f: impl FnOnce(&mut [u8]) -> R) -> R {
        self.ga.with_bank(bank, f)
    }
}
