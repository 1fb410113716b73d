// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the Sub boot sequence.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::Cell;
use std::sync::Arc;
use std::thread;

use super::*;
use gs1_abi::regs::{MEM_MODE, MEM_MODE_1M};
use gs1_link::mock::GateArray;
use gs1_link::{LinkError, Responder, Sub};

/// Plays a Sub that boots into `state`.
fn sub_booting_into(ga: &Arc<GateArray>, state: SubState) {
    ga.wait_reset_released();
    let responder = Responder::new(RegisterLink::<_, Sub>::new(ga.sub_bus()));
    responder.write_result(0, SubState::Booting.as_u16());
    responder.set_status(Status::Busy);
    thread::yield_now();
    responder.write_result(0, state.as_u16());
    responder.set_status(Status::Idle);
}

// =============================================================================
// Boot
// =============================================================================

#[test]
fn boot_succeeds_when_sub_reports_ready() {
    let ga = GateArray::new();
    let link = RegisterLink::<_, Main>::new(ga.main_bus());
    let loaded = Cell::new(false);

    thread::scope(|s| {
        s.spawn(|| sub_booting_into(&ga, SubState::Ready));
        boot(&link, || loaded.set(true)).unwrap();
    });

    assert!(loaded.get());
    assert!(ga.reset_released());
    assert_ne!(ga.peek_u16(MEM_MODE) & MEM_MODE_1M, 0);
}

#[test]
fn boot_fails_when_sub_crashed() {
    let ga = GateArray::new();
    let link = RegisterLink::<_, Main>::new(ga.main_bus());

    let result = thread::scope(|s| {
        s.spawn(|| sub_booting_into(&ga, SubState::Crashed));
        boot(&link, || {})
    });

    assert_eq!(result, Err(MainError::SubNotReady(0xFF)));
}

#[test]
fn program_loads_while_the_sub_is_held() {
    let ga = GateArray::new();
    let link = RegisterLink::<_, Main>::new(ga.main_bus());
    let held = Cell::new(false);

    start_sub(&link, || {
        held.set(link.read_reset() & RESET_SBRQ != 0 && !ga.reset_released());
    });

    assert!(held.get());
    assert!(ga.reset_released());
}

#[test]
fn bounded_boot_times_out_without_a_sub() {
    let ga = GateArray::new();
    let link = RegisterLink::<_, Main>::new(ga.main_bus());
    let result = boot_bounded(&link, || {}, SpinBudget::new(16));
    assert_eq!(result, Err(MainError::Link(LinkError::Timeout)));
}

// =============================================================================
// Settled State
// =============================================================================

#[test]
fn state_is_unsettled_until_sub_reports_past_booting() {
    let ga = GateArray::new();
    let link = RegisterLink::<_, Main>::new(ga.main_bus());
    let sub = Responder::new(RegisterLink::<_, Sub>::new(ga.sub_bus()));

    // Flag IDLE, state RESET: the Sub has not started.
    assert_eq!(settled_state(&link), None);

    sub.write_result(0, SubState::Booting.as_u16());
    sub.set_status(Status::Busy);
    assert_eq!(settled_state(&link), None);

    // READY written, flag still BUSY.
    sub.write_result(0, SubState::Ready.as_u16());
    assert_eq!(settled_state(&link), None);

    sub.set_status(Status::Idle);
    assert_eq!(settled_state(&link), Some(SubState::Ready.as_u16()));
}
