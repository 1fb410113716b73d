// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # GS1 Sub
//!
//! The runtime of the Sub processor: it answers the Main processor's
//! commands and composites one frame per `RENDER_FRAME`.
//!
//! - [`CommandDispatcher`]: boot announcement, then the
//!   `wait -> ack -> execute -> done | error` loop
//! - [`Desktop`]: compositor state plus the shell behavior the commands
//!   drive (window commands, pointer routing, menu commands)
//! - [`PointerRouter`]: turns pointer events into window and menu actions
//! - [`RenderCycleCoordinator`]: paints the damage into the owned bank and
//!   hands it to the Main processor
//! - [`CdAudio`] and [`AppLauncher`]: collaborators outside the core
//!
//! # Command Cycle
//!
//! ```text
//! Main                        Sub
//! send(op, params) ──────►    wait_command
//!                             ack (BUSY)
//!                             execute(op)   ── RENDER_FRAME: paint, return bank
//! wait_done        ◄──────    done | error
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod desktop;
pub mod dispatch;
pub mod menus;
pub mod pointer;
pub mod render;
pub mod services;

pub use desktop::Desktop;
pub use dispatch::CommandDispatcher;
pub use menus::MenuCommand;
pub use pointer::PointerRouter;
pub use render::RenderCycleCoordinator;
pub use services::{App, AppLauncher, CdAudio, NoApps, SilentCd};
