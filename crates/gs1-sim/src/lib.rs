// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # GS1 Simulator
//!
//! Runs the Main and Sub runtimes against each other on the host.
//!
//! Both processors get an OS thread and share one mock gate array that
//! swaps Word RAM banks as soon as a swap is requested. The Main side
//! follows a scripted mouse through the menus, the Sub side composites into
//! a 4 bpp canvas, and a watchdog on the async runtime fails the run if a
//! frame round trip stalls.
//!
//! - [`SimConfig`]: settings from `GS1_*` environment variables
//! - [`Canvas`]: the Sub's software renderer
//! - [`Screen`]: the Main's frame sink
//! - [`PointerScript`]: the scripted mouse
//! - [`SimApps`]: stand-in applications for the Apps menu
//! - [`Simulation`]: threads, heartbeats and the watchdog

pub mod apps;
pub mod canvas;
pub mod config;
pub mod display;
pub mod script;
pub mod sim;

pub use apps::SimApps;
pub use canvas::Canvas;
pub use config::SimConfig;
pub use display::Screen;
pub use script::PointerScript;
pub use sim::{SimError, Simulation, Summary};
