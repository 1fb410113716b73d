// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Compositor errors.

use core::fmt;

use gs1_abi::layout::{MAX_MENUS, MAX_MENU_ITEMS, MAX_WINDOWS};

/// Errors from window and menu operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WmError {
    /// All window slots are in use.
    PoolExhausted,
    /// No live window has the given id.
    NoSuchWindow,
    /// The menu bar already holds the maximum number of menus.
    MenuFull,
    /// The menu already holds the maximum number of items.
    ItemFull,
    /// No menu at the given index.
    NoSuchMenu,
    /// No item at the given index in the menu.
    NoSuchItem,
}

impl fmt::Display for WmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PoolExhausted => write!(f, "all {MAX_WINDOWS} window slots in use"),
            Self::NoSuchWindow => write!(f, "no such window"),
            Self::MenuFull => write!(f, "menu bar holds {MAX_MENUS} menus already"),
            Self::ItemFull => write!(f, "menu holds {MAX_MENU_ITEMS} items already"),
            Self::NoSuchMenu => write!(f, "no such menu"),
            Self::NoSuchItem => write!(f, "no such menu item"),
        }
    }
}

impl core::error::Error for WmError {}
