// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Link errors.

use core::fmt;

/// Errors reported by the non-blocking and bounded link operations.
///
/// The blocking primitives never fail on a slow peer; they spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The peer has not returned to its rest state yet.
    PeerBusy,
    /// A spin budget ran out before the peer responded.
    Timeout,
    /// This side's swap request is still waiting for the hardware.
    SwapPending,
    /// The call does not fit the current protocol phase.
    ProtocolViolation,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PeerBusy => write!(f, "peer is not idle"),
            Self::Timeout => write!(f, "peer did not respond within the spin budget"),
            Self::SwapPending => write!(f, "bank swap still pending"),
            Self::ProtocolViolation => write!(f, "operation out of protocol order"),
        }
    }
}

impl core::error::Error for LinkError {}
