// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Typed commands to the Sub processor.
//!
//! [`SubClient`] wraps the initiator half of the handshake and Main's half
//! of the bank exchange. Each helper sends one command, waits for the
//! cycle to finish and decodes the result words. A reply of ERROR becomes
//! [`MainError::CommandFailed`], except for `RENDER_FRAME`, where it is
//! [`MainError::RenderFailed`].

#[cfg(test)]
mod client_test;

use gs1_abi::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
use gs1_abi::protocol::RESULT_OK;
use gs1_abi::{Command, MouseEvent, Opcode, Rect, SubState, WindowId};
use gs1_link::bounded::{self, SpinBudget};
use gs1_link::{BankExchange, BankId, BankWindow, Initiator, Main, RegisterBus, RegisterLink, Reply};

use crate::boot;
use crate::error::MainError;
use crate::frame::FrameSink;

/// Result words of a completed `RENDER_FRAME`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderReply {
    /// Status word 0: the Sub's state after the frame.
    pub state: u16,
    /// Status word 1: dirty rectangles the frame repainted.
    pub rects: u16,
}

/// Main's end of the link.
pub struct SubClient<B> {
    initiator: Initiator<B>,
    bank: BankExchange<B, Main>,
}

impl<B> SubClient<B>
where
    B: RegisterBus + BankWindow + Clone,
{
    #[must_use]
    pub fn new(bus: B) -> Self {
        Self {
            initiator: Initiator::new(RegisterLink::new(bus.clone())),
            bank: BankExchange::new(RegisterLink::new(bus)),
        }
    }

    /// The underlying register link.
    #[must_use]
    pub const fn link(&self) -> &RegisterLink<B, Main> {
        self.initiator.link()
    }

    /// Releases the Sub from reset and waits for READY. See [`boot::boot`].
    pub fn boot(&self, load: impl FnOnce()) -> Result<(), MainError> {
        boot::boot(self.link(), load)
    }

    // =========================================================================
    // Command Cycle
    // =========================================================================

    /// Sends a command and waits for the reply.
    ///
    /// Fails with [`MainError::CommandFailed`] if the Sub answered ERROR.
    pub fn call(&mut self, cmd: Command) -> Result<Reply, MainError> {
        let reply = self.initiator.call(cmd)?;
        check(cmd, reply)
    }

    /// Like [`SubClient::call`], but each wait gives up after `budget` polls.
    ///
    /// A timeout leaves the command in flight; the initiator refuses new
    /// commands until it has completed.
    pub fn call_bounded(&mut self, cmd: Command, budget: SpinBudget) -> Result<Reply, MainError> {
        bounded::send(&mut self.initiator, cmd, budget)?;
        let status = bounded::wait_done(&mut self.initiator, budget)?;
        let reply = Reply {
            status,
            words: self.link().read_results(),
        };
        check(cmd, reply)
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// `INIT_OS`: the Sub drops every window and reinstalls its menus.
    pub fn init_os(&mut self) -> Result<(), MainError> {
        self.call(Command::init_os()).map(drop)
    }

    /// `RENDER_FRAME` over the whole screen.
    ///
    /// On success the bank Main owns holds the new frame.
    pub fn render_frame(&mut self) -> Result<RenderReply, MainError> {
        let reply = match self.call(Command::render_frame(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT)) {
            Err(MainError::CommandFailed(_)) => return Err(MainError::RenderFailed),
            other => other?,
        };
        let reply = RenderReply {
            state: reply.words[0],
            rects: reply.words[1],
        };
        if reply.state != SubState::Ready.as_u16() {
            tracing::warn!(state = reply.state, "sub not ready after frame");
        }
        Ok(reply)
    }

    /// `OPEN_WINDOW`. Returns `None` if the Sub's window pool is full.
    pub fn open_window(&mut self, frame: Rect) -> Result<Option<WindowId>, MainError> {
        let cmd = Command::open_window(frame.left, frame.top, frame.width(), frame.height());
        let reply = self.call(cmd)?;
        Ok(WindowId::from_result(reply.words[0]))
    }

    /// `CLOSE_WINDOW`. Returns false if there was no such window.
    pub fn close_window(&mut self, id: WindowId) -> Result<bool, MainError> {
        let reply = self.call(Command::close_window(id))?;
        Ok(reply.words[0] == RESULT_OK)
    }

    /// `MOVE_WINDOW`. Returns false if there is no such window.
    pub fn move_window(&mut self, id: WindowId, x: i16, y: i16) -> Result<bool, MainError> {
        let reply = self.call(Command::move_window(id, x, y))?;
        Ok(reply.words[0] == RESULT_OK)
    }

    pub fn cd_play(&mut self, track: u16) -> Result<(), MainError> {
        self.call(Command::cd_play(track)).map(drop)
    }

    pub fn cd_stop(&mut self) -> Result<(), MainError> {
        self.call(Command::cd_stop()).map(drop)
    }

    /// `MOUSE_EVENT`.
    pub fn send_pointer(&mut self, event: MouseEvent) -> Result<(), MainError> {
        self.call(Command::new(Opcode::MouseEvent, event.to_params())).map(drop)
    }

    /// `WRAM_SWAP`: the Sub gives its bank to Main without painting.
    pub fn wram_swap(&mut self) -> Result<(), MainError> {
        self.call(Command::wram_swap()).map(drop)
    }

    // =========================================================================
    // Frame Hand-off
    // =========================================================================

    /// Hands the bank Main currently owns to `sink`.
    ///
    /// After a `RENDER_FRAME` that is the frame the Sub just published.
    pub fn present<F: FrameSink + ?Sized>(&mut self, sink: &mut F) -> Result<BankId, MainError> {
        let mut grant = self.bank.acquire()?;
        let bank = grant.bank();
        grant.with_bytes(|bytes| sink.present(bank, bytes));
        Ok(bank)
    }
}

fn check(cmd: Command, reply: Reply) -> Result<Reply, MainError> {
    if reply.is_done() {
        Ok(reply)
    } else {
        Err(MainError::CommandFailed(cmd.opcode))
    }
}
