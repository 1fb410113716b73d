// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Shared definitions between the GS1 Main and Sub processors.
//!
//! This crate defines the contract between the two instruction streams:
//! - Gate array register offsets and bit assignments
//! - Command opcodes, status codes and Sub lifecycle codes
//! - Pointer event packing for the parameter words
//! - Screen geometry (`Rect`, `Point`) and fixed capacities
//! - Window decoration styles and flag bits
//!
//! # Design Principles
//!
//! - **No dependencies**: Pure data types, 100% host-testable
//! - **Wire values are explicit**: every enum carries its register encoding
//! - **16-bit words**: both processors are 68000s, registers are big-endian words
//!
//! # Modules
//!
//! - [`regs`]: Gate array register map and bits
//! - [`protocol`]: Opcodes, status codes, commands and result words
//! - [`input`]: Pointer events and their classification
//! - [`geometry`]: Screen-space points and rectangles
//! - [`layout`]: Screen metrics, capacities and memory sizes
//! - [`window`]: Window styles and flags

#![cfg_attr(not(test), no_std)]

pub mod geometry;
pub mod input;
pub mod layout;
pub mod protocol;
pub mod regs;
pub mod window;

// Re-export commonly used types at crate root
pub use geometry::{Point, Rect};
pub use input::{Buttons, MouseEvent, PointerKind};
pub use protocol::{Command, Opcode, Status, SubState, WindowId};
pub use window::{WindowFlags, WindowStyle};
