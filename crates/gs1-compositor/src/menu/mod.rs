// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The menu bar and its pull-down menus.
//!
//! # Geometry
//!
//! ```text
//! y=0   +----------------------------------------------+
//!       |   File    Edit    Apps                       |  20 px
//! y=20  +--+--------------+----------------------------+
//!          | New          |  items 14 px, separators 8 px
//!          | Open         |  2 px padding top and bottom
//!          | ------------ |  width >= 80
//!          +--------------+
//!       x = title_x - 4
//! ```
//!
//! Titles start at x=10; each title is its text width plus 8 pixels wide
//! and the next one follows after another 8 pixels.
//!
//! Text is measured in the 6-pixel fixed-advance system font.


use core::fmt;

use gs1_abi::layout::{GLYPH_ADVANCE, MAX_MENU_ITEMS, MAX_MENUS, MENU_BAR_HEIGHT};
use gs1_abi::{Point, Rect};

use crate::error::WmError;

/// X position of the first menu title.
pub const FIRST_TITLE_X: i16 = 10;
/// Horizontal padding per title.
pub const TITLE_PADDING: i16 = 8;
/// Distance from a title's text to its highlight edge.
pub const TITLE_INSET: i16 = 4;
/// Height of a regular dropdown item.
pub const ITEM_HEIGHT: i16 = 14;
/// Height of a separator item.
pub const SEPARATOR_HEIGHT: i16 = 8;
/// Horizontal padding inside the dropdown.
pub const DROPDOWN_PADDING_X: i16 = 8;
/// Vertical padding at the top and bottom of the dropdown.
pub const DROPDOWN_PADDING_Y: i16 = 2;
/// Minimum dropdown width.
pub const DROPDOWN_MIN_WIDTH: i16 = 80;
/// Offset of the dropdown's drop shadow.
pub const DROPDOWN_SHADOW: i16 = 2;
/// Extra width reserved for a check mark.
pub const CHECK_WIDTH: i16 = 10;

/// Pixel width of `text` in the system font.
#[must_use]
pub fn text_width(text: &str) -> i16 {
    (text.chars().count() as i16).saturating_mul(GLYPH_ADVANCE)
}

// =============================================================================
// Items
// =============================================================================

/// Menu item flag bits.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ItemFlags(u8);

impl ItemFlags {
    pub const NONE: Self = Self(0);
    /// A separator line; never selectable.
    pub const SEPARATOR: Self = Self(0x01);
    /// Grayed out; never selectable.
    pub const DISABLED: Self = Self(0x02);
    /// Drawn with a check mark.
    pub const CHECKED: Self = Self(0x04);

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn set(&mut self, other: Self, on: bool) {
        if on {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}

impl core::ops::BitOr for ItemFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for ItemFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemFlags({:#05b})", self.0)
    }
}

/// One dropdown entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    text: &'static str,
    flags: ItemFlags,
    command: u16,
}

impl MenuItem {
    const UNUSED: Self = Self {
        text: "",
        flags: ItemFlags::NONE,
        command: 0,
    };

    /// Label (empty for separators).
    #[must_use]
    pub const fn text(&self) -> &'static str {
        self.text
    }

    #[must_use]
    pub const fn flags(&self) -> ItemFlags {
        self.flags
    }

    /// Application-defined command id reported on selection.
    #[must_use]
    pub const fn command(&self) -> u16 {
        self.command
    }

    /// Returns true if the item can be chosen.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        !self.flags.contains(ItemFlags::SEPARATOR) && !self.flags.contains(ItemFlags::DISABLED)
    }

    /// Vertical space the item takes in the dropdown.
    #[must_use]
    pub const fn height(&self) -> i16 {
        if self.flags.contains(ItemFlags::SEPARATOR) {
            SEPARATOR_HEIGHT
        } else {
            ITEM_HEIGHT
        }
    }
}

// =============================================================================
// Menus
// =============================================================================

/// A menu: title in the bar plus its items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Menu {
    title: &'static str,
    title_x: i16,
    title_width: i16,
    items: [MenuItem; MAX_MENU_ITEMS],
    item_count: u8,
}

impl Menu {
    const UNUSED: Self = Self {
        title: "",
        title_x: 0,
        title_width: 0,
        items: [MenuItem::UNUSED; MAX_MENU_ITEMS],
        item_count: 0,
    };

    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.title
    }

    /// X position of the title text.
    #[must_use]
    pub const fn title_x(&self) -> i16 {
        self.title_x
    }

    /// The title's clickable (and highlighted) span in the bar.
    #[must_use]
    pub const fn title_rect(&self) -> Rect {
        Rect::new(
            self.title_x - TITLE_INSET,
            0,
            self.title_x + self.title_width,
            MENU_BAR_HEIGHT,
        )
    }

    /// Items in order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items[..usize::from(self.item_count)]
    }

    /// Width of the open dropdown: the widest label plus padding.
    #[must_use]
    pub fn dropdown_width(&self) -> i16 {
        self.items()
            .iter()
            .filter(|item| !item.flags.contains(ItemFlags::SEPARATOR))
            .map(|item| {
                let mut width = text_width(item.text) + DROPDOWN_PADDING_X * 2;
                if item.flags.contains(ItemFlags::CHECKED) {
                    width += CHECK_WIDTH;
                }
                width
            })
            .fold(DROPDOWN_MIN_WIDTH, i16::max)
    }

    /// Height of the open dropdown.
    #[must_use]
    pub fn dropdown_height(&self) -> i16 {
        self.items()
            .iter()
            .map(MenuItem::height)
            .fold(DROPDOWN_PADDING_Y * 2, i16::saturating_add)
    }

    /// The dropdown box, hanging below the title.
    #[must_use]
    pub fn dropdown_rect(&self) -> Rect {
        Rect::from_origin_size(
            self.title_x - TITLE_INSET,
            MENU_BAR_HEIGHT,
            self.dropdown_width(),
            self.dropdown_height(),
        )
    }

    /// Top edge of each item, paired with the item.
    pub fn item_tops(&self) -> impl Iterator<Item = (i16, &MenuItem)> + '_ {
        self.items().iter().scan(MENU_BAR_HEIGHT + DROPDOWN_PADDING_Y, |y, item| {
            let top = *y;
            *y += item.height();
            Some((top, item))
        })
    }

    /// Index of the item under `pt`, if any.
    fn item_at(&self, pt: Point) -> Option<usize> {
        let drop = self.dropdown_rect();
        if pt.x < drop.left || pt.x >= drop.right {
            return None;
        }
        self.item_tops()
            .position(|(top, item)| pt.y >= top && pt.y < top + item.height())
    }
}

/// A chosen menu item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuSelection {
    pub menu: u8,
    pub item: u8,
    pub command: u16,
}

/// Dropdown tracking state while the mouse button is held on a menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Tracking {
    menu: u8,
    item: Option<u8>,
}

// =============================================================================
// Menu Bar
// =============================================================================

/// The menu bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuBar {
    menus: [Menu; MAX_MENUS],
    menu_count: u8,
    tracking: Option<Tracking>,
}

impl MenuBar {
    /// A bar without menus.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            menus: [Menu::UNUSED; MAX_MENUS],
            menu_count: 0,
            tracking: None,
        }
    }

    /// Appends a menu after the existing ones. Returns its index.
    pub fn add_menu(&mut self, title: &'static str) -> Result<usize, WmError> {
        let index = usize::from(self.menu_count);
        if index >= MAX_MENUS {
            return Err(WmError::MenuFull);
        }
        let title_x = match index.checked_sub(1) {
            None => FIRST_TITLE_X,
            Some(prev) => {
                let prev = &self.menus[prev];
                prev.title_x + prev.title_width + TITLE_PADDING
            }
        };
        self.menus[index] = Menu {
            title,
            title_x,
            title_width: text_width(title) + TITLE_PADDING,
            ..Menu::UNUSED
        };
        self.menu_count += 1;
        Ok(index)
    }

    /// Appends an item to a menu. Returns its index.
    pub fn add_item(
        &mut self,
        menu: usize,
        text: &'static str,
        command: u16,
        flags: ItemFlags,
    ) -> Result<usize, WmError> {
        let menu = self.menu_mut(menu)?;
        let index = usize::from(menu.item_count);
        if index >= MAX_MENU_ITEMS {
            return Err(WmError::ItemFull);
        }
        menu.items[index] = MenuItem {
            text,
            flags,
            command,
        };
        menu.item_count += 1;
        Ok(index)
    }

    /// Appends a separator line to a menu.
    pub fn add_separator(&mut self, menu: usize) -> Result<usize, WmError> {
        self.add_item(menu, "", 0, ItemFlags::SEPARATOR)
    }

    /// Enables or grays out an item.
    pub fn set_item_enabled(
        &mut self,
        menu: usize,
        item: usize,
        enabled: bool,
    ) -> Result<(), WmError> {
        self.item_mut(menu, item)?.flags.set(ItemFlags::DISABLED, !enabled);
        Ok(())
    }

    /// Sets or clears an item's check mark.
    pub fn set_item_checked(
        &mut self,
        menu: usize,
        item: usize,
        checked: bool,
    ) -> Result<(), WmError> {
        self.item_mut(menu, item)?.flags.set(ItemFlags::CHECKED, checked);
        Ok(())
    }

    fn menu_mut(&mut self, menu: usize) -> Result<&mut Menu, WmError> {
        if menu < usize::from(self.menu_count) {
            Ok(&mut self.menus[menu])
        } else {
            Err(WmError::NoSuchMenu)
        }
    }

    fn item_mut(&mut self, menu: usize, item: usize) -> Result<&mut MenuItem, WmError> {
        let menu = self.menu_mut(menu)?;
        if item < usize::from(menu.item_count) {
            Ok(&mut menu.items[item])
        } else {
            Err(WmError::NoSuchItem)
        }
    }

    /// Menus in bar order.
    #[must_use]
    pub fn menus(&self) -> &[Menu] {
        &self.menus[..usize::from(self.menu_count)]
    }

    /// Index of the menu whose title spans `x`.
    fn title_at(&self, x: i16) -> Option<usize> {
        self.menus().iter().position(|m| {
            let span = m.title_rect();
            x >= span.left && x < span.right
        })
    }

    // =========================================================================
    // Tracking
    // =========================================================================

    /// Returns true while a dropdown is open.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Index of the open menu.
    #[must_use]
    pub fn open_menu(&self) -> Option<usize> {
        self.tracking.map(|t| usize::from(t.menu))
    }

    /// Index of the highlighted item in the open menu.
    #[must_use]
    pub fn highlighted_item(&self) -> Option<usize> {
        self.tracking.and_then(|t| t.item).map(usize::from)
    }

    /// Screen area covered by the open dropdown including its shadow.
    #[must_use]
    pub fn open_dropdown_area(&self) -> Option<Rect> {
        let menu = &self.menus[self.open_menu()?];
        let drop = menu.dropdown_rect();
        Some(drop.union(drop.offset(DROPDOWN_SHADOW, DROPDOWN_SHADOW)))
    }

    /// Mouse button pressed at `pt`.
    ///
    /// Opens the menu whose title is under the point and returns true.
    /// A press below the bar closes any open menu.
    pub fn mouse_down(&mut self, pt: Point) -> bool {
        if pt.y >= MENU_BAR_HEIGHT {
            self.close();
            return false;
        }
        match self.title_at(pt.x) {
            Some(menu) => {
                self.tracking = Some(Tracking {
                    menu: menu as u8,
                    item: None,
                });
                true
            }
            None => false,
        }
    }

    /// Mouse moved to `pt` with the button held.
    ///
    /// Switches menus when the pointer crosses another title and
    /// highlights the selectable item under the pointer.
    pub fn mouse_move(&mut self, pt: Point) {
        let Some(tracking) = self.tracking else {
            return;
        };
        if pt.y < MENU_BAR_HEIGHT {
            let menu = self.title_at(pt.x).map_or(tracking.menu, |m| m as u8);
            self.tracking = Some(Tracking { menu, item: None });
            return;
        }
        let menu = &self.menus[usize::from(tracking.menu)];
        let item = menu
            .item_at(pt)
            .filter(|&i| menu.items()[i].is_selectable())
            .map(|i| i as u8);
        self.tracking = Some(Tracking {
            menu: tracking.menu,
            item,
        });
    }

    /// Mouse button released. Closes the dropdown and returns the
    /// highlighted item, if one was selectable.
    pub fn mouse_up(&mut self) -> Option<MenuSelection> {
        let tracking = self.tracking.take()?;
        let index = tracking.item?;
        let item = self.menus[usize::from(tracking.menu)].items()[usize::from(index)];
        item.is_selectable().then_some(MenuSelection {
            menu: tracking.menu,
            item: index,
            command: item.command,
        })
    }

    /// Closes any open dropdown.
    pub fn close(&mut self) {
        self.tracking = None;
    }
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}
