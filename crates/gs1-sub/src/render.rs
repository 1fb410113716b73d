// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The render cycle: one `RENDER_FRAME` from damage to published bank.
//!
//! ```text
//! status[0] = RENDERING, status[1] = dirty rect count
//! acquire bank ─► paint damage, overlays ─► renderer.finish(bytes)
//! return bank to Main (spins until the hardware swapped)
//! status[0] = READY
//! ```
//!
//! The caller signals DONE afterwards.

use gs1_abi::SubState;
use gs1_compositor::{Compositor, Renderer};
use gs1_link::{BankExchange, BankWindow, LinkError, RegisterBus, Responder, Sub};

/// Drives one frame per call and owns the renderer.
pub struct RenderCycleCoordinator<R> {
    renderer: R,
    frames: u32,
}

impl<R: Renderer> RenderCycleCoordinator<R> {
    #[must_use]
    pub const fn new(renderer: R) -> Self {
        Self {
            renderer,
            frames: 0,
        }
    }

    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    pub const fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Frames published so far.
    #[must_use]
    pub const fn frames(&self) -> u32 {
        self.frames
    }

    /// Renders the accumulated damage and publishes the bank.
    ///
    /// Returns the number of dirty rectangles consumed. Fails only if this
    /// side does not own a bank, in which case nothing is painted and the
    /// damage is kept for the next frame.
    pub fn run<B: RegisterBus + BankWindow>(
        &mut self,
        desktop: &mut Compositor,
        responder: &Responder<B>,
        bank: &mut BankExchange<B, Sub>,
    ) -> Result<usize, LinkError> {
        responder.write_result(0, SubState::Rendering.as_u16());
        let count = desktop.pending_damage();
        responder.write_result(1, count as u16);

        let mut grant = match bank.acquire() {
            Ok(grant) => grant,
            Err(e) => {
                responder.write_result(0, SubState::Ready.as_u16());
                return Err(e);
            }
        };
        let published = grant.bank();
        let renderer = &mut self.renderer;
        grant.with_bytes(|bytes| {
            desktop.paint(&mut *renderer);
            renderer.finish(bytes);
        });
        let next = grant.return_bank();

        self.frames = self.frames.wrapping_add(1);
        responder.write_result(0, SubState::Ready.as_u16());
        tracing::debug!(frame = self.frames, rects = count, %published, %next, "frame rendered");
        Ok(count)
    }
}
