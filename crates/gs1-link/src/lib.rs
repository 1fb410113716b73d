// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # GS1 Link
//!
//! Typed access to the gate array shared by the Main and Sub processors.
//!
//! This crate provides:
//! - [`RegisterBus`]: byte/word access to the register window, with an MMIO
//!   backend for hardware and a shared-memory [`mock::GateArray`] for hosts
//! - [`RegisterLink`]: per-side register access where each side can only
//!   write what it owns
//! - [`handshake`]: the single-flight command/status rendezvous
//! - [`bank`]: the two-bank Word RAM ownership exchange
//! - [`bounded`]: an opt-in spin budget layered over the blocking primitives
//!
//! Every blocking operation is a spin over a non-blocking poll. The
//! primitives never time out; callers that need a bound go through
//! [`bounded`].

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod bank;
pub mod bounded;
pub mod bus;
mod error;
pub mod handshake;
mod link;

#[cfg(any(test, feature = "std"))]
pub use bus::mock;

pub use bank::{BankExchange, BankGrant, BankId, PendingSwap};
pub use bus::{BankWindow, MmioBus, RegisterBus};
pub use error::LinkError;
pub use handshake::{Initiator, Reply, Responder};
pub use link::{Main, RegisterLink, Side, Sub};
