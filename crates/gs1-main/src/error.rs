// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Main runtime errors.

use core::fmt;

use gs1_abi::{Opcode, SubState};
use gs1_link::LinkError;

/// Errors reported to the Main processor's caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainError {
    /// The Sub finished booting in a state other than READY (raw status word 0).
    SubNotReady(u16),
    /// The Sub answered a command with ERROR.
    CommandFailed(Opcode),
    /// The Sub answered `RENDER_FRAME` with ERROR. Fatal for the frame loop.
    RenderFailed,
    /// A link operation failed.
    Link(LinkError),
}

impl fmt::Display for MainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubNotReady(raw) => match SubState::from_u16(*raw) {
                Some(state) => write!(f, "sub not ready after boot: {state:?}"),
                None => write!(f, "sub not ready after boot: state {raw:#06x}"),
            },
            Self::CommandFailed(opcode) => write!(f, "sub rejected {opcode}"),
            Self::RenderFailed => write!(f, "sub failed to render a frame"),
            Self::Link(e) => write!(f, "link error: {e}"),
        }
    }
}

impl core::error::Error for MainError {}

impl From<LinkError> for MainError {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}
