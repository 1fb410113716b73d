// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The per-vblank frame loop.


use core::convert::Infallible;

use gs1_abi::MouseEvent;
use gs1_link::{BankId, BankWindow, RegisterBus};

use crate::client::SubClient;
use crate::error::MainError;
use crate::pointer::{PointerSample, PointerTracker};

/// Where finished frames go: on hardware, tile conversion and DMA to VRAM.
pub trait FrameSink {
    /// Blocks until the next vertical blank. Returns at once by default.
    fn wait_vblank(&mut self) {}

    /// Shows the frame held in `bank`.
    fn present(&mut self, bank: BankId, frame: &[u8]);
}

/// Raw mouse input.
pub trait PointerSource {
    /// Reads one sample. `None` if no mouse is attached.
    fn poll(&mut self) -> Option<PointerSample>;
}

/// A source without a mouse.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPointer;

impl PointerSource for NoPointer {
    fn poll(&mut self) -> Option<PointerSample> {
        None
    }
}

/// What one [`FrameLoop::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    /// Frames presented so far, this one included.
    pub frame: u32,
    /// The bank that was presented.
    pub bank: BankId,
    /// Dirty rectangles the Sub repainted.
    pub rects: u16,
    /// The pointer event sent before rendering, if any.
    pub pointer: Option<MouseEvent>,
}

/// Main's steady state after boot.
pub struct FrameLoop<B, P, F> {
    client: SubClient<B>,
    tracker: PointerTracker,
    source: P,
    sink: F,
    frames: u32,
}

impl<B, P, F> FrameLoop<B, P, F>
where
    B: RegisterBus + BankWindow + Clone,
    P: PointerSource,
    F: FrameSink,
{
    #[must_use]
    pub fn new(client: SubClient<B>, source: P, sink: F) -> Self {
        Self {
            client,
            tracker: PointerTracker::new(),
            source,
            sink,
            frames: 0,
        }
    }

    pub const fn client_mut(&mut self) -> &mut SubClient<B> {
        &mut self.client
    }

    #[must_use]
    pub const fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    #[must_use]
    pub const fn sink(&self) -> &F {
        &self.sink
    }

    /// Frames presented so far.
    #[must_use]
    pub const fn frames(&self) -> u32 {
        self.frames
    }

    /// Stops the loop and hands back the sink.
    #[must_use]
    pub fn into_sink(self) -> F {
        self.sink
    }

    /// Runs one frame.
    ///
    /// A pointer event the Sub rejects is logged and dropped; a failed
    /// render is returned and should halt the loop.
    pub fn tick(&mut self) -> Result<FrameReport, MainError> {
        self.sink.wait_vblank();

        let pointer = self.source.poll().and_then(|sample| self.tracker.update(sample));
        if let Some(event) = pointer {
            match self.client.send_pointer(event) {
                Ok(()) => {}
                Err(MainError::CommandFailed(_)) => {
                    tracing::warn!(?event, "pointer event rejected");
                }
                Err(e) => return Err(e),
            }
        }

        let render = self.client.render_frame()?;
        let bank = self.client.present(&mut self.sink)?;
        self.frames = self.frames.wrapping_add(1);
        tracing::trace!(frame = self.frames, %bank, rects = render.rects, "frame presented");

        Ok(FrameReport {
            frame: self.frames,
            bank,
            rects: render.rects,
            pointer,
        })
    }

    /// Runs `count` frames, stopping at the first error.
    pub fn run_for(&mut self, count: u32) -> Result<(), MainError> {
        for _ in 0..count {
            self.tick()?;
        }
        Ok(())
    }

    /// Runs until a frame fails. Only returns with the error that halted it.
    pub fn run(&mut self) -> Result<Infallible, MainError> {
        loop {
            if let Err(e) = self.tick() {
                tracing::error!(error = %e, frame = self.frames, "frame loop halted");
                return Err(e);
            }
        }
    }
}
