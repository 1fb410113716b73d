// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the command/status handshake.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::bounded::{self, SpinBudget};
use crate::bus::mock::{GateArray, MockBus};
use gs1_abi::protocol::WindowId;
use gs1_abi::regs::COMM_FLAG;
use proptest::prelude::*;
use std::sync::Arc;
use std::thread;

fn pair(ga: &Arc<GateArray>) -> (Initiator<MockBus<Main>>, Responder<MockBus<Sub>>) {
    (
        Initiator::new(RegisterLink::new(ga.main_bus())),
        Responder::new(RegisterLink::new(ga.sub_bus())),
    )
}

// =============================================================================
// Single-Threaded Stepping
// =============================================================================

#[test]
fn one_cycle_step_by_step() {
    let ga = GateArray::new();
    let (mut main, mut sub) = pair(&ga);

    assert_eq!(sub.poll_command(), None);
    main.post(Command::open_window(10, 20, 30, 40)).unwrap();
    assert_eq!(ga.peek_u16(COMM_FLAG), 0x2000);

    assert_eq!(sub.poll_command(), Some(Opcode::OpenWindow.as_u8()));
    sub.ack().unwrap();
    assert_eq!(sub.acked_opcode(), Some(0x20));
    assert_eq!(ga.peek_u16(COMM_FLAG), 0x2001);
    assert_eq!(sub.params(), [10, 20, 30, 40]);
    assert_eq!(main.poll_completion(), Ok(None));

    sub.write_result(0, 3);
    sub.signal(Status::Done).unwrap();
    assert_eq!(sub.poll_release(), Ok(false));

    // Main sees DONE, clears its opcode, then waits for IDLE.
    assert_eq!(main.poll_completion(), Ok(None));
    assert_eq!(ga.peek_u16(COMM_FLAG), 0x0003);

    assert_eq!(sub.poll_release(), Ok(true));
    assert_eq!(ga.peek_u16(COMM_FLAG), 0x0000);
    assert_eq!(main.poll_completion(), Ok(Some(Status::Done)));
    assert_eq!(main.read_result(0), 3);
    assert!(main.is_idle());
}

#[test]
fn post_refuses_while_peer_is_not_idle() {
    let ga = GateArray::new();
    let (mut main, sub) = pair(&ga);
    sub.set_status(Status::Busy);
    assert_eq!(main.post(Command::init_os()), Err(LinkError::PeerBusy));
    sub.set_status(Status::Idle);
    assert_eq!(main.post(Command::init_os()), Ok(()));
}

#[test]
fn out_of_order_calls_are_rejected() {
    let ga = GateArray::new();
    let (mut main, mut sub) = pair(&ga);
    assert_eq!(main.poll_completion(), Err(LinkError::ProtocolViolation));
    assert_eq!(main.post(Command::bare(Opcode::None)), Err(LinkError::ProtocolViolation));
    assert_eq!(sub.ack(), Err(LinkError::ProtocolViolation));
    assert_eq!(sub.poll_release(), Err(LinkError::ProtocolViolation));

    main.post(Command::init_os()).unwrap();
    assert_eq!(main.post(Command::init_os()), Err(LinkError::ProtocolViolation));
    assert_eq!(sub.signal(Status::Done), Err(LinkError::ProtocolViolation));
    sub.ack().unwrap();
    assert_eq!(sub.signal(Status::Busy), Err(LinkError::ProtocolViolation));
    // A second ack in the same cycle sees no new command.
    assert_eq!(sub.ack(), Err(LinkError::ProtocolViolation));
}

#[test]
fn responder_does_not_see_a_new_command_before_release() {
    let ga = GateArray::new();
    let (mut main, mut sub) = pair(&ga);
    main.post(Command::init_os()).unwrap();
    sub.ack().unwrap();
    sub.signal(Status::Error).unwrap();
    assert_eq!(sub.poll_command(), None);
    assert_eq!(main.poll_completion(), Ok(None));
    assert!(sub.poll_release().unwrap());
    assert_eq!(main.poll_completion(), Ok(Some(Status::Error)));
}

// =============================================================================
// Two Threads
// =============================================================================

/// Serves `count` commands, answering each with DONE and echoing CMD0 + 1.
fn echo_responder(mut sub: Responder<MockBus<Sub>>, count: usize) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for _ in 0..count {
            let _ = sub.wait_command();
            sub.ack().unwrap();
            let params = sub.params();
            sub.write_result(0, params[0].wrapping_add(1));
            sub.done().unwrap();
        }
    })
}

#[test]
fn send_ack_done_wait_done_ends_idle() {
    let ga = GateArray::new();
    let (mut main, sub) = pair(&ga);
    let responder = echo_responder(sub, 1);

    main.send(Command::close_window(WindowId::new(4))).unwrap();
    assert_eq!(main.wait_done(), Ok(Status::Done));
    responder.join().unwrap();

    assert_eq!(main.read_result(0), 5);
    assert_eq!(ga.peek_u16(COMM_FLAG), 0x0000);
}

#[test]
fn many_calls_in_sequence() {
    let ga = GateArray::new();
    let (mut main, sub) = pair(&ga);
    let responder = echo_responder(sub, 200);
    for i in 0..200u16 {
        let reply = main.call(Command::cd_play(i)).unwrap();
        assert!(reply.is_done());
        assert_eq!(reply.words[0], i + 1);
    }
    responder.join().unwrap();
}

#[test]
fn error_reply_is_reported_like_done() {
    let ga = GateArray::new();
    let (mut main, mut sub) = pair(&ga);
    let responder = thread::spawn(move || {
        let raw = sub.wait_command();
        assert_eq!(raw, Opcode::CdStop.as_u8());
        sub.ack().unwrap();
        sub.error().unwrap();
    });
    let reply = main.call(Command::cd_stop()).unwrap();
    responder.join().unwrap();
    assert_eq!(reply.status, Status::Error);
    assert!(!reply.is_done());
    assert_eq!(ga.peek_u16(COMM_FLAG), 0x0000);
    assert!(main.is_idle());
}

// =============================================================================
// Bounded Waits
// =============================================================================

#[test]
fn bounded_waits_time_out_on_a_silent_peer() {
    let ga = GateArray::new();
    let (mut main, sub) = pair(&ga);

    assert_eq!(
        bounded::wait_command(&sub, SpinBudget::new(50)),
        Err(LinkError::Timeout)
    );

    bounded::send(&mut main, Command::init_os(), SpinBudget::new(1)).unwrap();
    assert_eq!(
        bounded::wait_done(&mut main, SpinBudget::new(50)),
        Err(LinkError::Timeout)
    );
    // The cycle is still in flight and can be resumed.
    assert!(!main.is_idle());
}

#[test]
fn bounded_send_times_out_on_a_busy_peer() {
    let ga = GateArray::new();
    let (mut main, sub) = pair(&ga);
    sub.set_status(Status::Busy);
    assert_eq!(
        bounded::send(&mut main, Command::init_os(), SpinBudget::new(10)),
        Err(LinkError::Timeout)
    );
}

#[test]
fn bounded_finish_resumes_after_timeout() {
    let ga = GateArray::new();
    let (mut main, mut sub) = pair(&ga);
    main.post(Command::init_os()).unwrap();
    sub.ack().unwrap();
    assert_eq!(
        bounded::finish(&mut sub, Status::Done, SpinBudget::new(10)),
        Err(LinkError::Timeout)
    );
    assert_eq!(main.poll_completion(), Ok(None));
    assert_eq!(sub.poll_release(), Ok(true));
    assert_eq!(main.poll_completion(), Ok(Some(Status::Done)));
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn every_call_sees_its_own_parameters(
        values in proptest::collection::vec(any::<u16>(), 1..20),
    ) {
        let ga = GateArray::new();
        let (mut main, sub) = pair(&ga);
        let responder = echo_responder(sub, values.len());
        for &value in &values {
            let reply = main.call(Command::cd_play(value)).unwrap();
            prop_assert_eq!(reply.words[0], value.wrapping_add(1));
        }
        responder.join().unwrap();
        prop_assert_eq!(ga.peek_u16(COMM_FLAG), 0);
    }
}
