// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The default menu bar and its command ids.
//!
//! Command ids are `menu << 8 | item`, both counted from 1:
//!
//! | Menu | Items |
//! |------|-------|
//! | File | New `0x0101`, Open `0x0102`, Close `0x0103`, Quit `0x0104` |
//! | Edit | Undo `0x0201`, Cut `0x0202`, Copy `0x0203`, Paste `0x0204` |
//! | Apps | Calculator `0x0301`, Notepad `0x0302`, Paint `0x0303` |

use gs1_compositor::{ItemFlags, MenuBar, WmError};

use crate::services::App;

/// A command from the default menus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    New,
    Open,
    Close,
    Quit,
    Undo,
    Cut,
    Copy,
    Paste,
    Launch(App),
}

impl MenuCommand {
    /// Decodes a command id.
    #[must_use]
    pub const fn from_u16(id: u16) -> Option<Self> {
        match id {
            0x0101 => Some(Self::New),
            0x0102 => Some(Self::Open),
            0x0103 => Some(Self::Close),
            0x0104 => Some(Self::Quit),
            0x0201 => Some(Self::Undo),
            0x0202 => Some(Self::Cut),
            0x0203 => Some(Self::Copy),
            0x0204 => Some(Self::Paste),
            0x0301 => Some(Self::Launch(App::Calculator)),
            0x0302 => Some(Self::Launch(App::Notepad)),
            0x0303 => Some(Self::Launch(App::Paint)),
            _ => None,
        }
    }

    /// The command id carried by the menu item.
    #[must_use]
    pub const fn id(self) -> u16 {
        match self {
            Self::New => 0x0101,
            Self::Open => 0x0102,
            Self::Close => 0x0103,
            Self::Quit => 0x0104,
            Self::Undo => 0x0201,
            Self::Cut => 0x0202,
            Self::Copy => 0x0203,
            Self::Paste => 0x0204,
            Self::Launch(App::Calculator) => 0x0301,
            Self::Launch(App::Notepad) => 0x0302,
            Self::Launch(App::Paint) => 0x0303,
        }
    }
}

/// Builds File, Edit and Apps into an empty menu bar.
pub fn install_default_menus(bar: &mut MenuBar) -> Result<(), WmError> {
    let file = bar.add_menu("File")?;
    add(bar, file, "New", MenuCommand::New, ItemFlags::NONE)?;
    add(bar, file, "Open", MenuCommand::Open, ItemFlags::NONE)?;
    add(bar, file, "Close", MenuCommand::Close, ItemFlags::NONE)?;
    bar.add_separator(file)?;
    add(bar, file, "Quit", MenuCommand::Quit, ItemFlags::NONE)?;

    let edit = bar.add_menu("Edit")?;
    add(bar, edit, "Undo", MenuCommand::Undo, ItemFlags::DISABLED)?;
    bar.add_separator(edit)?;
    add(bar, edit, "Cut", MenuCommand::Cut, ItemFlags::NONE)?;
    add(bar, edit, "Copy", MenuCommand::Copy, ItemFlags::NONE)?;
    add(bar, edit, "Paste", MenuCommand::Paste, ItemFlags::NONE)?;

    let apps = bar.add_menu("Apps")?;
    for app in [App::Calculator, App::Notepad, App::Paint] {
        add(bar, apps, app.name(), MenuCommand::Launch(app), ItemFlags::NONE)?;
    }
    Ok(())
}

fn add(
    bar: &mut MenuBar,
    menu: usize,
    text: &'static str,
    command: MenuCommand,
    flags: ItemFlags,
) -> Result<(), WmError> {
    bar.add_item(menu, text, command.id(), flags).map(|_| ())
}
