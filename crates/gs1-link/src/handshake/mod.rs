// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Command/status handshake.
//!
//! A strict single-flight rendezvous over two flag bytes. The Main
//! processor is the [`Initiator`], the Sub processor the [`Responder`].
//!
//! ```text
//!            Main flag (opcode)            Sub flag (status)
//! post       params, then opcode    ──►    IDLE
//! ack                                      BUSY
//! signal                                   DONE | ERROR
//! release    NONE                   ──►
//! rest                                     IDLE
//! ```
//!
//! Each write is only made once the peer's previous write is observed:
//! Main posts only while Sub reads IDLE, Sub returns to IDLE only once
//! Main reads NONE. That two-phase rule keeps a responder from starting a
//! new cycle before the initiator has seen the previous completion.
//!
//! Every blocking call spins on a non-blocking step and never times out.
//! [`crate::bounded`] adds a spin budget on top.

#[cfg(test)]
mod handshake_test;

use gs1_abi::protocol::{Command, Opcode, PARAM_WORDS, RESULT_WORDS, Status};

use crate::bus::RegisterBus;
use crate::error::LinkError;
use crate::link::{Main, RegisterLink, Sub};

// =============================================================================
// Initiator (Main)
// =============================================================================

/// Where the initiator is in the current command cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InitiatorPhase {
    /// No command in flight.
    Idle,
    /// Opcode written, waiting for a terminal status.
    Posted(Opcode),
    /// Opcode cleared, waiting for the responder to return to IDLE.
    Releasing(Status),
}

/// A completed command: terminal status plus the result words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reply {
    /// `Done` or `Error`.
    pub status: Status,
    /// Status words as the responder left them.
    pub words: [u16; RESULT_WORDS],
}

impl Reply {
    /// Returns true if the command completed with `Done`.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.status, Status::Done)
    }
}

/// Main side of the handshake.
pub struct Initiator<B> {
    link: RegisterLink<B, Main>,
    phase: InitiatorPhase,
}

impl<B: RegisterBus> Initiator<B> {
    /// Creates an initiator at rest.
    #[must_use]
    pub const fn new(link: RegisterLink<B, Main>) -> Self {
        Self {
            link,
            phase: InitiatorPhase::Idle,
        }
    }

    /// The underlying register link.
    #[must_use]
    pub const fn link(&self) -> &RegisterLink<B, Main> {
        &self.link
    }

    /// Returns true if no command is in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == InitiatorPhase::Idle
    }

    /// Posts a command if the responder is idle.
    ///
    /// Writes the parameter words first and the opcode last; the opcode
    /// write is the signal edge.
    pub fn post(&mut self, cmd: Command) -> Result<(), LinkError> {
        if self.phase != InitiatorPhase::Idle || cmd.opcode == Opcode::None {
            return Err(LinkError::ProtocolViolation);
        }
        if self.link.peer_flag() != Status::Idle.as_u8() {
            return Err(LinkError::PeerBusy);
        }
        for (index, &value) in cmd.params.iter().enumerate() {
            self.link.write_param(index, value);
        }
        self.link.set_flag(cmd.opcode.as_u8());
        self.phase = InitiatorPhase::Posted(cmd.opcode);
        tracing::trace!(opcode = %cmd.opcode, "command posted");
        Ok(())
    }

    /// Advances the completion half of the cycle by one step.
    ///
    /// Returns the terminal status once the responder is back at IDLE.
    pub fn poll_completion(&mut self) -> Result<Option<Status>, LinkError> {
        match self.phase {
            InitiatorPhase::Idle => Err(LinkError::ProtocolViolation),
            InitiatorPhase::Posted(opcode) => {
                let raw = self.link.peer_flag();
                match Status::from_u8(raw) {
                    Some(status) if status.is_terminal() => {
                        self.link.set_flag(Opcode::None.as_u8());
                        self.phase = InitiatorPhase::Releasing(status);
                        tracing::trace!(%opcode, %status, "command completed, releasing");
                        self.poll_completion()
                    }
                    _ => Ok(None),
                }
            }
            InitiatorPhase::Releasing(status) => {
                if self.link.peer_flag() == Status::Idle.as_u8() {
                    self.phase = InitiatorPhase::Idle;
                    Ok(Some(status))
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Spins until the responder is idle, then posts the command.
    pub fn send(&mut self, cmd: Command) -> Result<(), LinkError> {
        loop {
            match self.post(cmd) {
                Err(LinkError::PeerBusy) => core::hint::spin_loop(),
                other => return other,
            }
        }
    }

    /// Spins until the posted command completes and the responder is idle.
    ///
    /// Returns the terminal status (`Done` or `Error`).
    pub fn wait_done(&mut self) -> Result<Status, LinkError> {
        loop {
            if let Some(status) = self.poll_completion()? {
                return Ok(status);
            }
            core::hint::spin_loop();
        }
    }

    /// Sends a command, waits for completion and collects the result words.
    pub fn call(&mut self, cmd: Command) -> Result<Reply, LinkError> {
        self.send(cmd)?;
        let status = self.wait_done()?;
        let reply = Reply {
            status,
            words: self.link.read_results(),
        };
        if status == Status::Error {
            tracing::warn!(opcode = %cmd.opcode, "command answered with ERROR");
        }
        Ok(reply)
    }

    /// Reads result word `index` of the last reply.
    #[must_use]
    pub fn read_result(&self, index: usize) -> u16 {
        self.link.read_result(index)
    }
}

// =============================================================================
// Responder (Sub)
// =============================================================================

/// Where the responder is in the current command cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResponderPhase {
    /// Waiting for an opcode.
    Waiting,
    /// Opcode seen and acknowledged with BUSY.
    Acked(u8),
    /// Terminal status written, waiting for the initiator to clear.
    Signalled(Status),
}

/// Sub side of the handshake.
pub struct Responder<B> {
    link: RegisterLink<B, Sub>,
    phase: ResponderPhase,
}

impl<B: RegisterBus> Responder<B> {
    /// Creates a responder waiting for a command.
    #[must_use]
    pub const fn new(link: RegisterLink<B, Sub>) -> Self {
        Self {
            link,
            phase: ResponderPhase::Waiting,
        }
    }

    /// The underlying register link.
    #[must_use]
    pub const fn link(&self) -> &RegisterLink<B, Sub> {
        &self.link
    }

    /// Checks once for a posted opcode.
    ///
    /// Returns the raw opcode byte, which may not be a known [`Opcode`]; the
    /// dispatcher answers unknown bytes with ERROR.
    #[must_use]
    pub fn poll_command(&self) -> Option<u8> {
        if self.phase != ResponderPhase::Waiting {
            return None;
        }
        let raw = self.link.peer_flag();
        (raw != Opcode::None.as_u8()).then_some(raw)
    }

    /// Spins until the initiator posts an opcode.
    pub fn wait_command(&self) -> u8 {
        loop {
            if let Some(raw) = self.poll_command() {
                tracing::trace!(opcode = raw, "command observed");
                return raw;
            }
            core::hint::spin_loop();
        }
    }

    /// Acknowledges the posted command with BUSY.
    pub fn ack(&mut self) -> Result<(), LinkError> {
        let Some(raw) = self.poll_command() else {
            return Err(LinkError::ProtocolViolation);
        };
        self.link.set_flag(Status::Busy.as_u8());
        self.phase = ResponderPhase::Acked(raw);
        Ok(())
    }

    /// Raw opcode of the acknowledged command, if one is being executed.
    #[must_use]
    pub const fn acked_opcode(&self) -> Option<u8> {
        match self.phase {
            ResponderPhase::Acked(raw) => Some(raw),
            ResponderPhase::Waiting | ResponderPhase::Signalled(_) => None,
        }
    }

    /// Reads the parameter words of the acknowledged command.
    #[must_use]
    pub fn params(&self) -> [u16; PARAM_WORDS] {
        self.link.read_params()
    }

    /// Writes result word `index`.
    pub fn write_result(&self, index: usize, value: u16) {
        self.link.write_result(index, value);
    }

    /// Writes the status flag outside of a command cycle (boot).
    pub fn set_status(&self, status: Status) {
        self.link.set_flag(status.as_u8());
    }

    /// Writes the terminal status of the acknowledged command.
    pub fn signal(&mut self, status: Status) -> Result<(), LinkError> {
        if !status.is_terminal() || !matches!(self.phase, ResponderPhase::Acked(_)) {
            return Err(LinkError::ProtocolViolation);
        }
        self.link.set_flag(status.as_u8());
        self.phase = ResponderPhase::Signalled(status);
        Ok(())
    }

    /// Checks once whether the initiator has cleared its opcode.
    ///
    /// Once it has, writes IDLE and returns true; the cycle is over.
    pub fn poll_release(&mut self) -> Result<bool, LinkError> {
        let ResponderPhase::Signalled(status) = self.phase else {
            return Err(LinkError::ProtocolViolation);
        };
        if self.link.peer_flag() != Opcode::None.as_u8() {
            return Ok(false);
        }
        self.link.set_flag(Status::Idle.as_u8());
        self.phase = ResponderPhase::Waiting;
        tracing::trace!(%status, "command released");
        Ok(true)
    }

    /// Signals DONE and spins until the initiator releases the cycle.
    pub fn done(&mut self) -> Result<(), LinkError> {
        self.finish(Status::Done)
    }

    /// Signals ERROR and spins until the initiator releases the cycle.
    pub fn error(&mut self) -> Result<(), LinkError> {
        self.finish(Status::Error)
    }

    fn finish(&mut self, status: Status) -> Result<(), LinkError> {
        self.signal(status)?;
        while !self.poll_release()? {
            core::hint::spin_loop();
        }
        Ok(())
    }
}
