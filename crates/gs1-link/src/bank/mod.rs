// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Word RAM bank exchange.
//!
//! In 1M mode Word RAM is two banks. At any instant one bank is mapped to
//! the Main processor and the other to the Sub processor; `MEM_MODE.SEL`
//! records which. A side gives its bank away by setting its swap bit
//! (`DMNA` for Main, `RET` for Sub). The hardware performs the swap, flips
//! `SEL` and clears the bit. Until the bit clears the side owns neither bank.
//!
//! Ownership is modelled with a token: [`BankExchange::acquire`] hands out a
//! [`BankGrant`] that mutably borrows the exchange, so a side can hold at
//! most one grant, and the swap operations consume it. Bytes of the bank
//! are only reachable through a grant.
//!
//! ```text
//! acquire ──► BankGrant ──begin_swap──► PendingSwap ──poll/wait──► (new bank)
//!    ▲                                                                 │
//!    └─────────────────────────────────────────────────────────────────┘
//! ```

#[cfg(test)]
mod bank_test;

use core::fmt;

use crate::bus::{BankWindow, RegisterBus};
use crate::error::LinkError;
use crate::link::{Main, RegisterLink, Side, Sub};

/// One of the two Word RAM banks.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BankId(u8);

impl BankId {
    /// Bank 0.
    pub const ZERO: Self = Self(0);
    /// Bank 1.
    pub const ONE: Self = Self(1);

    /// Index into a two-element bank array.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other bank.
    #[inline]
    #[must_use]
    pub const fn other(self) -> Self {
        Self(self.0 ^ 1)
    }
}

impl fmt::Debug for BankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BankId({})", self.0)
    }
}

impl fmt::Display for BankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bank {}", self.0)
    }
}

/// Bank ownership protocol for side `S`.
pub struct BankExchange<B, S: Side> {
    link: RegisterLink<B, S>,
}

impl<B: RegisterBus + BankWindow, S: Side> BankExchange<B, S> {
    /// Creates the exchange over a link.
    #[must_use]
    pub const fn new(link: RegisterLink<B, S>) -> Self {
        Self { link }
    }

    /// The underlying register link.
    #[must_use]
    pub const fn link(&self) -> &RegisterLink<B, S> {
        &self.link
    }

    /// Returns true while this side's swap request waits for the hardware.
    #[must_use]
    pub fn swap_pending(&self) -> bool {
        self.link.swap_requested()
    }

    /// Takes ownership of the bank currently mapped to this side.
    ///
    /// Fails with [`LinkError::SwapPending`] while a previous swap has not
    /// completed, since the side owns no bank during that window.
    pub fn acquire(&mut self) -> Result<BankGrant<'_, B, S>, LinkError> {
        if self.link.swap_requested() {
            return Err(LinkError::SwapPending);
        }
        let bank = self.link.current_bank();
        tracing::trace!(side = S::NAME, %bank, "bank acquired");
        Ok(BankGrant {
            exchange: self,
            bank,
        })
    }
}

/// Proof that side `S` owns a bank.
///
/// Not `Clone`; dropping it without swapping keeps the bank with this side.
pub struct BankGrant<'a, B, S: Side> {
    exchange: &'a mut BankExchange<B, S>,
    bank: BankId,
}

impl<'a, B: RegisterBus + BankWindow, S: Side> BankGrant<'a, B, S> {
    /// The owned bank.
    #[must_use]
    pub const fn bank(&self) -> BankId {
        self.bank
    }

    /// Runs `f` over the owned bank's bytes.
    pub fn with_bytes<R>(&mut self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        self.exchange.link.bus().with_bank(self.bank, f)
    }

    /// Gives the bank away: sets this side's swap bit.
    ///
    /// The grant is consumed; the returned [`PendingSwap`] completes once
    /// the hardware has cleared the bit.
    #[must_use = "the swap is only complete once the pending swap resolves"]
    pub fn begin_swap(self) -> PendingSwap<'a, B, S> {
        self.exchange.link.set_mode_bits(S::SWAP_BIT);
        tracing::trace!(side = S::NAME, bank = %self.bank, "bank swap requested");
        PendingSwap {
            exchange: self.exchange,
            from: self.bank,
        }
    }
}

impl<B: RegisterBus + BankWindow> BankGrant<'_, B, Main> {
    /// Requests a swap and spins until the hardware completes it.
    ///
    /// Returns the bank this side sees afterwards: the one the Sub owned.
    pub fn request_swap(self) -> BankId {
        self.begin_swap().wait()
    }
}

impl<B: RegisterBus + BankWindow> BankGrant<'_, B, Sub> {
    /// Returns the bank to Main and spins until the swap completes.
    ///
    /// Returns the bank this side sees afterwards.
    pub fn return_bank(self) -> BankId {
        self.begin_swap().wait()
    }
}

/// A swap that the hardware has not completed yet.
pub struct PendingSwap<'a, B, S: Side> {
    exchange: &'a mut BankExchange<B, S>,
    from: BankId,
}

impl<B: RegisterBus + BankWindow, S: Side> PendingSwap<'_, B, S> {
    /// The bank that was given away.
    #[must_use]
    pub const fn released(&self) -> BankId {
        self.from
    }

    /// Checks once whether the swap has completed.
    ///
    /// Returns the bank now mapped to this side once the swap bit is clear.
    pub fn poll(&mut self) -> Option<BankId> {
        if self.exchange.link.swap_requested() {
            return None;
        }
        let bank = self.exchange.link.current_bank();
        tracing::debug!(side = S::NAME, from = %self.from, to = %bank, "bank swap complete");
        Some(bank)
    }

    /// Spins until the swap completes. Never times out.
    pub fn wait(mut self) -> BankId {
        loop {
            if let Some(bank) = self.poll() {
                return bank;
            }
            core::hint::spin_loop();
        }
    }
}
