// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The Sub processor's command dispatcher.
//!
//! After [`CommandDispatcher::boot`] announces the Sub as ready, each
//! command cycle is `wait_command -> ack -> execute -> done | error`.
//!
//! | Opcode | Effect | Result word 0 |
//! |--------|--------|---------------|
//! | `INIT_OS` | reset the desktop, install default menus | - |
//! | `RENDER_FRAME` | render cycle, publish the bank | `READY` |
//! | `WRAM_SWAP` | return the bank to Main | - |
//! | `OPEN_WINDOW` | open an "Untitled" window | id or `0xFF` |
//! | `CLOSE_WINDOW` | close by id | `0` or `0xFF` |
//! | `MOVE_WINDOW` | move by id | `0` or `0xFF` |
//! | `CD_PLAY`, `CD_STOP` | forwarded to [`CdAudio`] | - |
//! | `MOUSE_EVENT` | pointer routing, menu commands | - |
//!
//! Every other byte, known or not, is answered with ERROR before anything
//! is touched.


use core::convert::Infallible;

use gs1_abi::protocol::{RESULT_FAILED, RESULT_OK};
use gs1_abi::{MouseEvent, Opcode, Rect, Status, SubState, WindowId};
use gs1_compositor::{Renderer, WmError};
use gs1_link::bounded::{self, SpinBudget};
use gs1_link::{BankExchange, BankWindow, LinkError, RegisterBus, RegisterLink, Responder, Sub};

use crate::desktop::Desktop;
use crate::render::RenderCycleCoordinator;
use crate::services::{AppLauncher, CdAudio, NoApps, SilentCd};

/// Answers the Main processor's commands.
pub struct CommandDispatcher<B, R, C = SilentCd, A = NoApps> {
    responder: Responder<B>,
    bank: BankExchange<B, Sub>,
    desktop: Desktop,
    render: RenderCycleCoordinator<R>,
    cd: C,
    apps: A,
    /// A bounded cycle timed out waiting for Main to release it.
    unreleased: bool,
}

impl<B, R> CommandDispatcher<B, R>
where
    B: RegisterBus + BankWindow + Clone,
    R: Renderer,
{
    /// A dispatcher without CD audio or applications.
    #[must_use]
    pub fn new(bus: B, renderer: R) -> Self {
        Self::with_services(bus, renderer, SilentCd, NoApps)
    }
}

impl<B, R, C, A> CommandDispatcher<B, R, C, A>
where
    B: RegisterBus + BankWindow + Clone,
    R: Renderer,
    C: CdAudio,
    A: AppLauncher,
{
    #[must_use]
    pub fn with_services(bus: B, renderer: R, cd: C, apps: A) -> Self {
        Self {
            responder: Responder::new(RegisterLink::new(bus.clone())),
            bank: BankExchange::new(RegisterLink::new(bus)),
            desktop: Desktop::new(),
            render: RenderCycleCoordinator::new(renderer),
            cd,
            apps,
            unreleased: false,
        }
    }

    #[must_use]
    pub const fn desktop(&self) -> &Desktop {
        &self.desktop
    }

    pub const fn desktop_mut(&mut self) -> &mut Desktop {
        &mut self.desktop
    }

    #[must_use]
    pub const fn renderer(&self) -> &R {
        self.render.renderer()
    }

    /// Frames published so far.
    #[must_use]
    pub const fn frames(&self) -> u32 {
        self.render.frames()
    }

    #[must_use]
    pub const fn cd(&self) -> &C {
        &self.cd
    }

    #[must_use]
    pub const fn apps(&self) -> &A {
        &self.apps
    }

    // =========================================================================
    // Boot
    // =========================================================================

    /// Initializes the desktop and tells Main whether it worked.
    ///
    /// Status word 0 goes `BOOTING`, then `READY` (or `CRASHED` if the
    /// desktop could not be set up), while the flag is held at BUSY. The
    /// flag returns to IDLE in both cases; Main decides from the state.
    pub fn boot(&mut self) -> Result<(), WmError> {
        self.responder.write_result(0, SubState::Booting.as_u16());
        self.responder.set_status(Status::Busy);

        let result = self.desktop.init();
        let state = if result.is_ok() {
            SubState::Ready
        } else {
            SubState::Crashed
        };

        self.responder.write_result(0, state.as_u16());
        self.responder.set_status(Status::Idle);
        match &result {
            Ok(()) => tracing::info!("sub ready"),
            Err(e) => tracing::error!(error = %e, "sub boot failed"),
        }
        result
    }

    // =========================================================================
    // Command Cycle
    // =========================================================================

    /// Serves one command cycle, spinning as long as it takes.
    ///
    /// Returns the terminal status sent to Main.
    pub fn serve(&mut self) -> Result<Status, LinkError> {
        let raw = self.responder.wait_command();
        self.responder.ack()?;
        let status = self.execute(raw);
        match status {
            Status::Done => self.responder.done()?,
            _ => self.responder.error()?,
        }
        Ok(status)
    }

    /// Serves commands forever. Returns only on a protocol violation.
    pub fn run(&mut self) -> Result<Infallible, LinkError> {
        loop {
            self.serve()?;
        }
    }

    /// Serves one command cycle with each wait bounded by `budget`.
    ///
    /// Fails with [`LinkError::Timeout`] if no command arrives. If Main is
    /// slow to release the finished cycle, the call also times out and the
    /// next call completes the release before waiting for a new command.
    pub fn serve_bounded(&mut self, budget: SpinBudget) -> Result<Status, LinkError> {
        if self.unreleased {
            budget.run(|| Ok(self.responder.poll_release()?.then_some(())))?;
            self.unreleased = false;
        }
        let raw = bounded::wait_command(&self.responder, budget)?;
        self.responder.ack()?;
        let status = self.execute(raw);
        match bounded::finish(&mut self.responder, status, budget) {
            Ok(()) => Ok(status),
            Err(LinkError::Timeout) => {
                self.unreleased = true;
                Err(LinkError::Timeout)
            }
            Err(e) => Err(e),
        }
    }

    /// Runs the acknowledged command and returns the status to signal.
    fn execute(&mut self, raw: u8) -> Status {
        let Some(opcode) = Opcode::from_u8(raw) else {
            tracing::warn!(opcode = raw, "unknown opcode");
            return Status::Error;
        };
        let [p0, p1, p2, p3] = self.responder.params();
        tracing::debug!(%opcode, params = ?[p0, p1, p2, p3], "dispatching");

        match opcode {
            Opcode::InitOs => match self.desktop.init() {
                Ok(()) => Status::Done,
                Err(e) => {
                    tracing::warn!(error = %e, "INIT_OS failed");
                    Status::Error
                }
            },
            Opcode::RenderFrame => {
                // The region parameters are always the full screen.
                let result = self.render.run(
                    self.desktop.compositor_mut(),
                    &self.responder,
                    &mut self.bank,
                );
                match result {
                    Ok(_) => Status::Done,
                    Err(e) => {
                        tracing::warn!(error = %e, "frame not rendered");
                        Status::Error
                    }
                }
            }
            Opcode::WramSwap => match self.bank.acquire() {
                Ok(grant) => {
                    grant.return_bank();
                    Status::Done
                }
                Err(e) => {
                    tracing::warn!(error = %e, "bank swap refused");
                    Status::Error
                }
            },
            Opcode::OpenWindow => {
                let frame = Rect::from_origin_size(p0 as i16, p1 as i16, p2 as i16, p3 as i16);
                let id = self.desktop.open_window(frame);
                self.responder.write_result(0, WindowId::to_result(id));
                Status::Done
            }
            Opcode::CloseWindow => {
                let closed = window_param(p0).is_some_and(|id| self.desktop.close_window(id));
                self.responder.write_result(0, outcome(closed));
                Status::Done
            }
            Opcode::MoveWindow => {
                let moved = window_param(p0)
                    .is_some_and(|id| self.desktop.move_window(id, p1 as i16, p2 as i16));
                self.responder.write_result(0, outcome(moved));
                Status::Done
            }
            Opcode::CdPlay => {
                self.cd.play(p0);
                Status::Done
            }
            Opcode::CdStop => {
                self.cd.stop();
                Status::Done
            }
            Opcode::MouseEvent => match MouseEvent::from_params([p0, p1, p2, p3]) {
                Some(event) => {
                    self.desktop.pointer_event(event, &mut self.apps);
                    Status::Done
                }
                None => {
                    tracing::warn!(word = p2, "malformed pointer event");
                    Status::Error
                }
            },
            Opcode::None
            | Opcode::Boot
            | Opcode::DrawText
            | Opcode::DrawIcon
            | Opcode::FileRead
            | Opcode::FileWrite => {
                tracing::warn!(%opcode, "opcode not handled");
                Status::Error
            }
        }
    }
}

/// Decodes a window id parameter; ids never exceed a byte.
fn window_param(word: u16) -> Option<WindowId> {
    u8::try_from(word).ok().map(WindowId::new)
}

const fn outcome(ok: bool) -> u16 {
    if ok { RESULT_OK } else { RESULT_FAILED }
}
