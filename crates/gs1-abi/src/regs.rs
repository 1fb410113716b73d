// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Gate array register map.
//!
//! The gate array mediates all communication between the Main processor and
//! the Sub processor. Both processors see the same registers, at different
//! base addresses. Each processor may only write its own registers; both may
//! read all of them.
//!
//! # Communication Registers
//!
//! | Offset | Width | Writer | Content |
//! |--------|-------|--------|---------|
//! | `0x00` | 16 | Main | Sub reset / bus request |
//! | `0x02` | 16 | both (own bits) | Memory mode (bank exchange) |
//! | `0x0E` | 8 | Main | Opcode flag (`CFM`) |
//! | `0x0F` | 8 | Sub | Status flag (`CFS`) |
//! | `0x10..0x1F` | 8 x 16 | Main | Command parameter words |
//! | `0x20..0x2F` | 8 x 16 | Sub | Status (result) words |
//!
//! Registers are big-endian: the byte at `0x0E` is the high byte of the
//! word at `0x0E`.

/// Gate array base address as seen by the Main processor.
pub const MAIN_BASE: usize = 0xA1_2000;

/// Gate array base address as seen by the Sub processor.
pub const SUB_BASE: usize = 0xFF_8000;

/// Size of the register window mapped at each base.
pub const WINDOW_SIZE: usize = 0x68;

// =============================================================================
// Offsets
// =============================================================================

/// Sub reset and bus request register (Main writes).
pub const RESET: u16 = 0x00;

/// Memory mode register.
pub const MEM_MODE: u16 = 0x02;

/// Communication flag word (high byte Main, low byte Sub).
pub const COMM_FLAG: u16 = 0x0E;

/// Main's flag byte: the opcode.
pub const COMM_FLAG_MAIN: u16 = COMM_FLAG;

/// Sub's flag byte: the status.
pub const COMM_FLAG_SUB: u16 = COMM_FLAG + 1;

/// First command parameter word (Main writes, Sub reads).
pub const COMM_CMD0: u16 = 0x10;

/// First status word (Sub writes, Main reads).
pub const COMM_STATUS0: u16 = 0x20;

/// Number of command words in the register file.
pub const COMM_CMD_WORDS: usize = 8;

/// Number of status words in the register file.
pub const COMM_STATUS_WORDS: usize = 8;

/// Offset of command word `index`.
#[inline]
#[must_use]
pub const fn cmd_word(index: usize) -> u16 {
    assert!(index < COMM_CMD_WORDS, "command word index out of range");
    COMM_CMD0 + (index as u16) * 2
}

/// Offset of status word `index`.
#[inline]
#[must_use]
pub const fn status_word(index: usize) -> u16 {
    assert!(index < COMM_STATUS_WORDS, "status word index out of range");
    COMM_STATUS0 + (index as u16) * 2
}

// =============================================================================
// Bits
// =============================================================================

/// `RESET`: 0 holds the Sub processor in reset, 1 lets it run.
pub const RESET_SRES: u16 = 0x0001;

/// `RESET`: request the Sub processor's bus (halts it).
pub const RESET_SBRQ: u16 = 0x0002;

/// `MEM_MODE`: Sub returns its bank (Sub writes, hardware clears).
pub const MEM_MODE_RET: u16 = 0x0001;

/// `MEM_MODE`: Main requests a swap (Main writes, hardware clears).
pub const MEM_MODE_DMNA: u16 = 0x0002;

/// `MEM_MODE`: 1 selects 1M mode (two 128 KB banks, one per side).
pub const MEM_MODE_1M: u16 = 0x0004;

/// `MEM_MODE`: current bank assignment, maintained by hardware.
///
/// 0 means Main sees bank 0 and Sub sees bank 1; a completed swap flips it.
pub const MEM_MODE_SEL: u16 = 0x0008;

/// Bits of `MEM_MODE` the Main processor may write.
pub const MEM_MODE_MAIN_WRITABLE: u16 = MEM_MODE_DMNA | MEM_MODE_1M;

/// Bits of `MEM_MODE` the Sub processor may write.
pub const MEM_MODE_SUB_WRITABLE: u16 = MEM_MODE_RET;
