// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Both processors on host threads, watched from the async runtime.
//!
//! ```text
//! thread "sub"    CommandDispatcher<Canvas>   serve_bounded until stopped
//! thread "main"   boot, FrameLoop::tick  ──► heartbeat per frame
//! runtime         timeout(watchdog, next heartbeat)
//! ```
//!
//! The processors never block on the runtime and the runtime never touches
//! the link; it only watches heartbeats. A frame that takes longer than the
//! watchdog bound ends the run with [`SimError::Watchdog`], leaving the
//! stuck threads behind.


use core::fmt;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use gs1_abi::Rect;
use gs1_compositor::WmError;
use gs1_link::LinkError;
use gs1_link::bounded::SpinBudget;
use gs1_link::mock::GateArray;
use gs1_main::{FrameLoop, FrameReport, MainError, SubClient};
use gs1_sub::{CommandDispatcher, SilentCd};
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;

use crate::apps::SimApps;
use crate::canvas::Canvas;
use crate::config::SimConfig;
use crate::display::Screen;
use crate::script::PointerScript;

/// Spins the Sub waits for a command before it checks the stop flag again.
const SUB_SPIN: u32 = 10_000;

/// Heartbeats in flight before the Main thread waits for the watchdog.
const HEARTBEAT_DEPTH: usize = 4;

/// Why a run ended early.
#[derive(Debug)]
pub enum SimError {
    /// A processor thread could not be started.
    Spawn(io::Error),
    /// No heartbeat within the watchdog bound. `frame` 0 is the boot.
    Watchdog { frame: u32, after: Duration },
    /// The Main runtime stopped with an error.
    Main(MainError),
    /// The Sub failed to initialize its desktop.
    SubBoot(WmError),
    /// The Sub's side of the link failed.
    SubLink(LinkError),
    /// The Sub did not stop within the watchdog bound.
    SubStuck(Duration),
    /// A processor thread panicked.
    Panicked(&'static str),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(e) => write!(f, "cannot start processor thread: {e}"),
            Self::Watchdog { frame: 0, after } => {
                write!(f, "watchdog: boot did not finish within {} ms", after.as_millis())
            }
            Self::Watchdog { frame, after } => write!(
                f,
                "watchdog: frame {frame} did not finish within {} ms",
                after.as_millis()
            ),
            Self::Main(e) => write!(f, "main processor: {e}"),
            Self::SubBoot(e) => write!(f, "sub processor init failed: {e}"),
            Self::SubLink(e) => write!(f, "sub processor link: {e}"),
            Self::SubStuck(after) => {
                write!(f, "sub processor did not stop within {} ms", after.as_millis())
            }
            Self::Panicked(side) => write!(f, "{side} processor thread panicked"),
        }
    }
}

impl std::error::Error for SimError {}

impl From<MainError> for SimError {
    fn from(e: MainError) -> Self {
        Self::Main(e)
    }
}

/// One window as the Sub left it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowSnapshot {
    pub title: String,
    pub frame: Rect,
    pub active: bool,
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct Summary {
    /// Frames the Main loop presented.
    pub frames: u32,
    /// Frames the Sub rendered.
    pub rendered: u32,
    /// Windows back to front.
    pub windows: Vec<WindowSnapshot>,
    /// The last frame on screen.
    pub screen: Screen,
}

impl Summary {
    /// Window titles back to front.
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.windows.iter().map(|w| w.title.as_str()).collect()
    }
}

/// What the Main thread reports to the watchdog.
enum Heartbeat {
    Booted,
    Frame(FrameReport),
    Finished(Result<Screen, MainError>),
}

/// What the Sub thread reports once stopped.
struct SubReport {
    windows: Vec<WindowSnapshot>,
    rendered: u32,
}

/// A configured simulation.
pub struct Simulation {
    config: SimConfig,
    gate_array: Arc<GateArray>,
    script: PointerScript,
}

impl Simulation {
    /// Runs the demo script over a gate array that swaps banks on request.
    #[must_use]
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            gate_array: GateArray::with_auto_swap(),
            script: PointerScript::demo(),
        }
    }

    #[must_use]
    pub fn with_gate_array(mut self, gate_array: Arc<GateArray>) -> Self {
        self.gate_array = gate_array;
        self
    }

    #[must_use]
    pub fn with_script(mut self, script: PointerScript) -> Self {
        self.script = script;
        self
    }

    /// Boots both processors, runs the configured number of frames and
    /// stops the Sub.
    pub async fn run(self) -> Result<Summary, SimError> {
        let Self {
            config,
            gate_array,
            script,
        } = self;
        let stop = Arc::new(AtomicBool::new(false));
        let (beat_tx, mut beat_rx) = mpsc::channel(HEARTBEAT_DEPTH);
        let (report_tx, report_rx) = oneshot::channel();

        // Neither thread is ever joined.
        thread::Builder::new()
            .name("sub".into())
            .spawn({
                let gate_array = Arc::clone(&gate_array);
                let stop = Arc::clone(&stop);
                move || {
                    let _ = report_tx.send(serve_sub(&gate_array, &stop));
                }
            })
            .map_err(SimError::Spawn)?;
        let frames = config.frames;
        let spawned = thread::Builder::new().name("main".into()).spawn({
            let gate_array = Arc::clone(&gate_array);
            move || drive_main(&gate_array, frames, script, &beat_tx)
        });
        if let Err(e) = spawned {
            stop.store(true, Ordering::Release);
            return Err(SimError::Spawn(e));
        }

        let watched = watch(&mut beat_rx, config.watchdog).await;
        stop.store(true, Ordering::Release);
        let (presented, screen) = watched?;

        let report = match timeout(config.watchdog, report_rx).await {
            Err(_) => return Err(SimError::SubStuck(config.watchdog)),
            Ok(Err(_)) => return Err(SimError::Panicked("sub")),
            Ok(Ok(report)) => report?,
        };

        Ok(Summary {
            frames: presented,
            rendered: report.rendered,
            windows: report.windows,
            screen,
        })
    }
}

/// Waits for heartbeats until the Main thread finishes.
///
/// Returns the number of frames seen and the final screen.
async fn watch(
    beats: &mut mpsc::Receiver<Heartbeat>,
    bound: Duration,
) -> Result<(u32, Screen), SimError> {
    let mut booted = false;
    let mut frames = 0;
    loop {
        let Ok(beat) = timeout(bound, beats.recv()).await else {
            let frame = if booted { frames + 1 } else { 0 };
            tracing::error!(frame, ?bound, "watchdog expired");
            return Err(SimError::Watchdog { frame, after: bound });
        };
        match beat {
            Some(Heartbeat::Booted) => {
                booted = true;
                tracing::info!("both processors up");
            }
            Some(Heartbeat::Frame(report)) => {
                frames = report.frame;
                tracing::debug!(
                    frame = report.frame,
                    bank = %report.bank,
                    rects = report.rects,
                    pointer = ?report.pointer.map(|e| e.kind),
                    "heartbeat"
                );
            }
            Some(Heartbeat::Finished(result)) => {
                let screen = result?;
                tracing::info!(frames, ink = screen.ink(), "main loop finished");
                return Ok((frames, screen));
            }
            None => return Err(SimError::Panicked("main")),
        }
    }
}

/// Body of the Main thread.
fn drive_main(
    gate_array: &Arc<GateArray>,
    frames: u32,
    script: PointerScript,
    beats: &mpsc::Sender<Heartbeat>,
) {
    let result = run_main(gate_array, frames, script, beats);
    if let Err(e) = &result {
        tracing::error!(error = %e, "main processor stopped");
    }
    // The watchdog may have given up already.
    let _ = beats.blocking_send(Heartbeat::Finished(result));
}

fn run_main(
    gate_array: &Arc<GateArray>,
    frames: u32,
    script: PointerScript,
    beats: &mpsc::Sender<Heartbeat>,
) -> Result<Screen, MainError> {
    let client = SubClient::new(gate_array.main_bus());
    client.boot(|| tracing::debug!("sub program in place"))?;
    if beats.blocking_send(Heartbeat::Booted).is_err() {
        return Ok(Screen::new());
    }

    let mut frame_loop = FrameLoop::new(client, script, Screen::new());
    for _ in 0..frames {
        let report = frame_loop.tick()?;
        if beats.blocking_send(Heartbeat::Frame(report)).is_err() {
            break;
        }
    }
    Ok(frame_loop.into_sink())
}

/// Body of the Sub thread.
///
/// The dispatcher is not `Send`, so it is built on the thread that runs it.
fn serve_sub(gate_array: &Arc<GateArray>, stop: &AtomicBool) -> Result<SubReport, SimError> {
    let mut dispatcher = CommandDispatcher::with_services(
        gate_array.sub_bus(),
        Canvas::new(),
        SilentCd,
        SimApps::new(),
    );
    gate_array.wait_reset_released();
    dispatcher.boot().map_err(SimError::SubBoot)?;

    while !stop.load(Ordering::Acquire) {
        match dispatcher.serve_bounded(SpinBudget::new(SUB_SPIN)) {
            Ok(_) | Err(LinkError::Timeout) => {}
            Err(e) => {
                tracing::error!(error = %e, "sub link failed");
                return Err(SimError::SubLink(e));
            }
        }
    }

    let windows = dispatcher
        .desktop()
        .compositor()
        .windows()
        .back_to_front()
        .map(|w| WindowSnapshot {
            title: w.title().to_string(),
            frame: w.frame(),
            active: w.is_active(),
        })
        .collect();
    tracing::info!(launched = dispatcher.apps().launched().len(), "sub stopped");
    Ok(SubReport {
        windows,
        rendered: dispatcher.frames(),
    })
}
