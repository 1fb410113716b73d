// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! A scripted Sub processor for tests.
//!
//! Answers commands the way a test tells it to, without any compositor.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use gs1_abi::protocol::PARAM_WORDS;
use gs1_abi::{Opcode, Status, SubState};
use gs1_link::mock::{GateArray, MockBus};
use gs1_link::{BankExchange, RegisterLink, Responder, Sub};

/// One command as the Sub saw it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seen {
    pub opcode: u8,
    pub params: [u16; PARAM_WORDS],
}

pub struct ScriptedSub {
    responder: Responder<MockBus<Sub>>,
    bank: BankExchange<MockBus<Sub>, Sub>,
}

impl ScriptedSub {
    pub fn new(ga: &Arc<GateArray>) -> Self {
        Self {
            responder: Responder::new(RegisterLink::new(ga.sub_bus())),
            bank: BankExchange::new(RegisterLink::new(ga.sub_bus())),
        }
    }

    /// Serves one command: writes `words` to the result words and signals
    /// `status`.
    pub fn answer(&mut self, status: Status, words: &[u16]) -> Seen {
        let opcode = self.responder.wait_command();
        self.responder.ack().unwrap();
        let seen = Seen {
            opcode,
            params: self.responder.params(),
        };
        for (index, &word) in words.iter().enumerate() {
            self.responder.write_result(index, word);
        }
        self.responder.signal(status).unwrap();
        while !self.responder.poll_release().unwrap() {
            std::thread::yield_now();
        }
        seen
    }

    /// Serves one `RENDER_FRAME`: fills the owned bank with `fill` and
    /// returns it to Main.
    pub fn render(&mut self, fill: u8) -> Seen {
        let opcode = self.responder.wait_command();
        assert_eq!(opcode, Opcode::RenderFrame.as_u8());
        self.responder.ack().unwrap();
        let seen = Seen {
            opcode,
            params: self.responder.params(),
        };
        self.responder.write_result(0, SubState::Rendering.as_u16());
        let mut grant = self.bank.acquire().unwrap();
        grant.with_bytes(|bytes| bytes.fill(fill));
        grant.return_bank();
        self.responder.write_result(0, SubState::Ready.as_u16());
        self.responder.write_result(1, 1);
        self.responder.done().unwrap();
        seen
    }
}
