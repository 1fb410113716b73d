// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Sub processor boot.
//!
//! ```text
//! RESET = 0                     hold the Sub
//! RESET = SBRQ, spin until set  take its program bus
//! load()                        copy the Sub program
//! MEM_MODE |= 1M                two 128 KiB banks
//! RESET = SRES                  run
//! spin until flag IDLE and status[0] past BOOTING
//! status[0] == READY, or fail
//! ```
//!
//! The Sub's flag already reads IDLE while it is held in reset, so the
//! flag alone does not tell a finished boot from one that has not
//! started. Status word 0 reads `RESET` until the Sub writes `BOOTING`.

#[cfg(test)]
mod boot_test;

use gs1_abi::regs::{MEM_MODE_1M, RESET_SBRQ, RESET_SRES};
use gs1_abi::{Status, SubState};
use gs1_link::bounded::SpinBudget;
use gs1_link::{Main, RegisterBus, RegisterLink};

use crate::error::MainError;

/// Releases the Sub from reset with its program in place.
///
/// `load` runs while Main holds the Sub's program bus.
pub fn start_sub<B: RegisterBus>(link: &RegisterLink<B, Main>, load: impl FnOnce()) {
    link.write_reset(0);
    link.write_reset(RESET_SBRQ);
    while link.read_reset() & RESET_SBRQ == 0 {
        core::hint::spin_loop();
    }
    load();
    link.set_mode_bits(MEM_MODE_1M);
    link.write_reset(RESET_SRES);
    tracing::info!("sub released from reset");
}

/// Checks once whether the Sub has finished booting.
///
/// Returns its raw status word 0 once the flag is IDLE and the state has
/// moved past `RESET` and `BOOTING`.
#[must_use]
pub fn settled_state<B: RegisterBus>(link: &RegisterLink<B, Main>) -> Option<u16> {
    if link.peer_flag() != Status::Idle.as_u8() {
        return None;
    }
    let raw = link.read_result(0);
    match SubState::from_u16(raw) {
        Some(SubState::Reset | SubState::Booting) => None,
        _ => Some(raw),
    }
}

/// Boots the Sub and spins until it reports its state. Never times out.
pub fn boot<B: RegisterBus>(
    link: &RegisterLink<B, Main>,
    load: impl FnOnce(),
) -> Result<(), MainError> {
    start_sub(link, load);
    loop {
        if let Some(raw) = settled_state(link) {
            return check_ready(raw);
        }
        core::hint::spin_loop();
    }
}

/// Boots the Sub, giving up with [`LinkError::Timeout`](gs1_link::LinkError::Timeout)
/// after `budget` polls.
pub fn boot_bounded<B: RegisterBus>(
    link: &RegisterLink<B, Main>,
    load: impl FnOnce(),
    budget: SpinBudget,
) -> Result<(), MainError> {
    start_sub(link, load);
    let raw = budget.run(|| Ok(settled_state(link)))?;
    check_ready(raw)
}

fn check_ready(raw: u16) -> Result<(), MainError> {
    if raw == SubState::Ready.as_u16() {
        tracing::info!("sub ready");
        Ok(())
    } else {
        let e = MainError::SubNotReady(raw);
        tracing::error!(error = %e, "sub boot failed");
        Err(e)
    }
}
