// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # GS1 Compositor
//!
//! The window compositor that runs on the Sub processor.
//!
//! All state lives in fixed-capacity arrays: 16 windows, 32 dirty
//! rectangles, 8 menus of 16 items. Nothing here allocates except the
//! optional boxed [`WindowProc`]s applications attach to their windows.
//!
//! - [`WindowRegistry`]: window pool, Z-order, active window and damage
//! - [`ZOrderList`]: index-linked front-to-back order
//! - [`DamageTracker`]: accumulator of screen regions needing redraw
//! - [`HitTester`]: screen point to window part
//! - [`MenuBar`]: pull-down menus and their mouse tracking
//! - [`Renderer`]: the pixel-painting seam
//! - [`Compositor`]: everything above plus cursor and desktop, painted
//!   once per frame by [`Compositor::paint`]
//!
//! # Frame Painting
//!
//! ```text
//! for each dirty rect:   clip, desktop pattern, windows back to front
//! then, unclipped:       menu bar, open dropdown, cursor
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod compositor;
pub mod damage;
mod error;
pub mod hit;
pub mod menu;
pub mod registry;
pub mod render;
pub mod window;
pub mod zorder;

pub use compositor::Compositor;
pub use damage::{DamageTracker, DirtyRect};
pub use error::WmError;
pub use hit::{Hit, HitTester, Part};
pub use menu::{ItemFlags, MenuBar, MenuSelection};
pub use registry::WindowRegistry;
pub use render::{DesktopPattern, Renderer, Shade, WindowProc};
pub use window::{Title, Window};
pub use zorder::ZOrderList;
