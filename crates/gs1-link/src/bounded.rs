// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Opt-in bounded waits.
//!
//! The handshake and bank primitives spin forever on an unresponsive peer.
//! This layer runs the same non-blocking steps under a [`SpinBudget`] and
//! gives up with [`LinkError::Timeout`]. It adds no register traffic of its
//! own, so protocol timing is the same as the unbounded calls until the
//! budget runs out.
//!
//! A timed-out call leaves the protocol mid-cycle. The initiator or
//! responder stays in its current phase and can be polled again later.

use gs1_abi::protocol::{Command, Status};

use crate::bank::{BankId, PendingSwap};
use crate::bus::{BankWindow, RegisterBus};
use crate::error::LinkError;
use crate::handshake::{Initiator, Responder};
use crate::link::Side;

/// Maximum number of polls before a bounded wait gives up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinBudget {
    polls: u32,
}

impl SpinBudget {
    /// A budget of `polls` attempts (at least one).
    #[must_use]
    pub const fn new(polls: u32) -> Self {
        Self {
            polls: if polls == 0 { 1 } else { polls },
        }
    }

    /// Number of attempts.
    #[must_use]
    pub const fn polls(self) -> u32 {
        self.polls
    }

    /// Polls `step` until it yields a value or the budget is spent.
    ///
    /// Errors from `step` other than "not yet" end the wait immediately.
    pub fn run<T>(
        self,
        mut step: impl FnMut() -> Result<Option<T>, LinkError>,
    ) -> Result<T, LinkError> {
        for _ in 0..self.polls {
            if let Some(value) = step()? {
                return Ok(value);
            }
            core::hint::spin_loop();
        }
        tracing::debug!(polls = self.polls, "spin budget exhausted");
        Err(LinkError::Timeout)
    }
}

/// Posts a command, retrying while the responder is busy.
pub fn send<B: RegisterBus>(
    initiator: &mut Initiator<B>,
    cmd: Command,
    budget: SpinBudget,
) -> Result<(), LinkError> {
    budget.run(|| match initiator.post(cmd) {
        Ok(()) => Ok(Some(())),
        Err(LinkError::PeerBusy) => Ok(None),
        Err(e) => Err(e),
    })
}

/// Waits for the posted command to complete.
pub fn wait_done<B: RegisterBus>(
    initiator: &mut Initiator<B>,
    budget: SpinBudget,
) -> Result<Status, LinkError> {
    budget.run(|| initiator.poll_completion())
}

/// Waits for the initiator to post an opcode.
pub fn wait_command<B: RegisterBus>(
    responder: &Responder<B>,
    budget: SpinBudget,
) -> Result<u8, LinkError> {
    budget.run(|| Ok(responder.poll_command()))
}

/// Signals a terminal status and waits for the initiator to release.
///
/// On timeout the status stays signalled; call again with a fresh budget
/// via [`Responder::poll_release`].
pub fn finish<B: RegisterBus>(
    responder: &mut Responder<B>,
    status: Status,
    budget: SpinBudget,
) -> Result<(), LinkError> {
    responder.signal(status)?;
    budget.run(|| Ok(responder.poll_release()?.then_some(())))
}

/// Waits for a bank swap to complete.
pub fn wait_swap<B: RegisterBus + BankWindow, S: Side>(
    pending: &mut PendingSwap<'_, B, S>,
    budget: SpinBudget,
) -> Result<BankId, LinkError> {
    budget.run(|| Ok(pending.poll()))
}
