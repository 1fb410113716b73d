// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the Sub command client.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::thread;

use super::*;
use crate::scripted::{ScriptedSub, Seen};
use gs1_abi::protocol::RESULT_FAILED;
use gs1_abi::{Buttons, Point, PointerKind, Status};
use gs1_link::LinkError;
use gs1_link::mock::{GateArray, MockBus};

fn client(ga: &Arc<GateArray>) -> SubClient<MockBus<Main>> {
    SubClient::new(ga.main_bus())
}

/// Runs `main` against a Sub that answers one command with `status` and `words`.
fn with_answer<T: Send>(
    status: Status,
    words: &[u16],
    main: impl FnOnce(&mut SubClient<MockBus<Main>>) -> T + Send,
) -> (T, Seen) {
    let ga = GateArray::with_auto_swap();
    let mut client = client(&ga);
    thread::scope(|s| {
        let sub = s.spawn(|| ScriptedSub::new(&ga).answer(status, words));
        let result = main(&mut client);
        (result, sub.join().unwrap())
    })
}

#[derive(Default)]
struct Capture {
    frames: Vec<(BankId, u8, usize)>,
}

impl FrameSink for Capture {
    fn present(&mut self, bank: BankId, frame: &[u8]) {
        self.frames.push((bank, frame[0], frame.len()));
    }
}

// =============================================================================
// Window Commands
// =============================================================================

#[test]
fn open_window_sends_origin_and_size() {
    let (id, seen) = with_answer(Status::Done, &[3], |c| {
        c.open_window(Rect::new(10, 30, 110, 110))
    });
    assert_eq!(id, Ok(Some(WindowId::new(3))));
    assert_eq!(seen.opcode, Opcode::OpenWindow.as_u8());
    assert_eq!(seen.params, [10, 30, 100, 80]);
}

#[test]
fn open_window_reports_a_full_pool() {
    let (id, _) = with_answer(Status::Done, &[RESULT_FAILED], |c| {
        c.open_window(Rect::new(0, 20, 50, 50))
    });
    assert_eq!(id, Ok(None));
}

#[test]
fn close_and_move_decode_the_outcome() {
    let (closed, seen) = with_answer(Status::Done, &[RESULT_OK], |c| {
        c.close_window(WindowId::new(2))
    });
    assert_eq!(closed, Ok(true));
    assert_eq!(seen.params[0], 2);

    let (moved, seen) = with_answer(Status::Done, &[RESULT_FAILED], |c| {
        c.move_window(WindowId::new(4), 60, 70)
    });
    assert_eq!(moved, Ok(false));
    assert_eq!(seen.params[..3], [4, 60, 70]);
}

// =============================================================================
// Other Commands
// =============================================================================

#[test]
fn pointer_events_are_packed_into_the_params() {
    let event = MouseEvent::new(PointerKind::Down, Buttons::LEFT, Point::new(42, 17), -3);
    let (sent, seen) = with_answer(Status::Done, &[], |c| c.send_pointer(event));
    assert_eq!(sent, Ok(()));
    assert_eq!(seen.opcode, Opcode::MouseEvent.as_u8());
    assert_eq!(MouseEvent::from_params(seen.params), Some(event));
}

#[test]
fn error_reply_is_a_failed_command() {
    let (played, seen) = with_answer(Status::Error, &[], |c| c.cd_play(5));
    assert_eq!(played, Err(MainError::CommandFailed(Opcode::CdPlay)));
    assert_eq!(seen.params[0], 5);
}

#[test]
fn bounded_call_times_out_without_a_sub() {
    let ga = GateArray::with_auto_swap();
    let mut client = client(&ga);
    let result = client.call_bounded(Command::cd_stop(), SpinBudget::new(16));
    assert_eq!(result, Err(MainError::Link(LinkError::Timeout)));
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn render_error_is_fatal() {
    let (result, _) = with_answer(Status::Error, &[], SubClient::render_frame);
    assert_eq!(result, Err(MainError::RenderFailed));
}

#[test]
fn rendered_frame_is_presented_from_the_swapped_bank() {
    let ga = GateArray::with_auto_swap();
    let mut client = client(&ga);
    let mut sink = Capture::default();
    let before = client.link().current_bank();

    let seen = thread::scope(|s| {
        let sub = s.spawn(|| ScriptedSub::new(&ga).render(0xAB));
        let reply = client.render_frame().unwrap();
        assert_eq!(reply, RenderReply { state: SubState::Ready.as_u16(), rects: 1 });
        sub.join().unwrap()
    });
    let bank = client.present(&mut sink).unwrap();

    assert_eq!(seen.params, [0, 0, 320, 224]);
    assert_eq!(bank, before.other());
    assert_eq!(sink.frames, [(bank, 0xAB, gs1_abi::layout::BANK_SIZE)]);
}
