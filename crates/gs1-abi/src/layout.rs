// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Screen metrics, fixed capacities and memory layout.
//!
//! # Screen Layout
//!
//! ```text
//! y=0    +--------------------------------------------+
//!        | Menu bar (20 px, always painted)           |
//! y=20   +--------------------------------------------+
//!        |                                            |
//!        | Desktop + windows                          |
//!        |                                            |
//! y=224  +--------------------------------------------+
//!        x=0                                      x=320
//! ```
//!
//! # Word RAM (1M mode)
//!
//! Word RAM is split into two 128 KB banks. At any instant the Main processor
//! sees one bank at [`MAIN_BANK_BASE`] and the Sub processor sees the other at
//! [`SUB_BANK_BASE`]. A swap exchanges the assignment.

use crate::geometry::Rect;

/// One kilobyte in bytes.
const KB: usize = 1024;

// =============================================================================
// Screen
// =============================================================================

/// Screen width in pixels.
pub const SCREEN_WIDTH: i16 = 320;

/// Screen height in pixels.
pub const SCREEN_HEIGHT: i16 = 224;

/// The whole screen.
pub const SCREEN: Rect = Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT);

/// Height of the menu bar band at the top of the screen.
pub const MENU_BAR_HEIGHT: i16 = 20;

/// The menu bar band.
pub const MENU_BAR: Rect = Rect::new(0, 0, SCREEN_WIDTH, MENU_BAR_HEIGHT);

/// The desktop area below the menu bar.
pub const DESKTOP: Rect = Rect::new(0, MENU_BAR_HEIGHT, SCREEN_WIDTH, SCREEN_HEIGHT);

// =============================================================================
// Window Decoration Metrics
// =============================================================================

/// Window border width.
pub const BORDER_WIDTH: i16 = 1;

/// Title bar height.
pub const TITLE_BAR_HEIGHT: i16 = 18;

/// Close box edge length.
pub const CLOSE_BOX_SIZE: i16 = 12;

/// Close box offset from the title bar's left edge.
pub const CLOSE_BOX_INSET_X: i16 = 4;

/// Close box offset from the title bar's top edge.
pub const CLOSE_BOX_INSET_Y: i16 = 3;

/// Grow box edge length.
pub const GROW_BOX_SIZE: i16 = 12;

/// Pointer cursor glyph width.
pub const CURSOR_WIDTH: i16 = 11;

/// Pointer cursor glyph height.
pub const CURSOR_HEIGHT: i16 = 16;

/// Horizontal advance of the fixed-width system font.
pub const GLYPH_ADVANCE: i16 = 6;

/// Line height of the system font.
pub const GLYPH_HEIGHT: i16 = 10;

// =============================================================================
// Capacities
// =============================================================================

/// Maximum number of live windows.
pub const MAX_WINDOWS: usize = 16;

/// Maximum number of accumulated dirty rectangles.
pub const MAX_DIRTY_RECTS: usize = 32;

/// Maximum window title length in bytes.
pub const TITLE_MAX: usize = 31;

/// Maximum number of menus in the menu bar.
pub const MAX_MENUS: usize = 8;

/// Maximum number of items per menu.
pub const MAX_MENU_ITEMS: usize = 16;

// =============================================================================
// Word RAM
// =============================================================================

/// Total Word RAM size (256 KB).
pub const WORD_RAM_SIZE: usize = 256 * KB;

/// Size of one bank in 1M mode (128 KB).
pub const BANK_SIZE: usize = 128 * KB;

/// Address of the Main processor's bank window.
pub const MAIN_BANK_BASE: usize = 0x20_0000;

/// Address of the Sub processor's bank window.
pub const SUB_BANK_BASE: usize = 0x0C_0000;

/// Bytes in one 4bpp linear frame (320 x 224 / 2).
pub const FRAME_BYTES: usize = (SCREEN_WIDTH as usize) * (SCREEN_HEIGHT as usize) / 2;

// Compile-time layout checks
const _: () = {
    assert!(BANK_SIZE * 2 == WORD_RAM_SIZE);
    assert!(FRAME_BYTES <= BANK_SIZE);
    assert!(MENU_BAR_HEIGHT < SCREEN_HEIGHT);
    assert!(MAX_WINDOWS <= 16, "window bitmap is a u16");
    assert!(MAX_DIRTY_RECTS <= u8::MAX as usize);
};
