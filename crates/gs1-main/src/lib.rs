// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # GS1 Main
//!
//! The runtime of the Main processor. It owns the display and the mouse
//! and drives the Sub processor through the command link.
//!
//! - [`boot`]: releases the Sub from reset and waits for it to report READY
//! - [`SubClient`]: typed command helpers over the handshake, plus the
//!   frame hand-off from the bank Main currently owns
//! - [`PointerTracker`]: mouse deltas to absolute position and pointer events
//! - [`FrameLoop`]: one pointer poll, one `RENDER_FRAME` and one present per
//!   vertical blank
//!
//! # Frame Loop
//!
//! ```text
//! wait_vblank
//! poll mouse ──► MOUSE_EVENT      (only when something changed)
//! RENDER_FRAME ──► Sub paints its bank and returns it
//! acquire bank ──► FrameSink::present(bank, bytes)
//! ```
//!
//! A `RENDER_FRAME` answered with ERROR halts the loop.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod boot;
pub mod client;
mod error;
pub mod frame;
pub mod pointer;
#[cfg(test)]
mod scripted;

pub use client::SubClient;
pub use error::MainError;
pub use frame::{FrameLoop, FrameReport, FrameSink, NoPointer, PointerSource};
pub use pointer::{PointerSample, PointerTracker};
