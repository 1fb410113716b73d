// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The desktop shell.
//!
//! [`Desktop`] is the compositor plus the behavior the Main processor's
//! commands and the default menus expect from it: opening "Untitled"
//! windows for `OPEN_WINDOW`, numbered document windows for File > New,
//! pointer routing and menu command dispatch.


use core::fmt::Write;

use gs1_abi::{MouseEvent, Rect, WindowFlags, WindowId, WindowStyle};
use gs1_compositor::{Compositor, WmError};

use crate::menus::{self, MenuCommand};
use crate::pointer::PointerRouter;
use crate::services::AppLauncher;

/// Size of a File > New window.
const DOCUMENT_WIDTH: i16 = 180;
const DOCUMENT_HEIGHT: i16 = 120;

/// Title of windows opened by `OPEN_WINDOW`.
const UNTITLED: &str = "Untitled";

/// Compositor state and shell behavior of the Sub processor.
pub struct Desktop {
    compositor: Compositor,
    pointer: PointerRouter,
    /// Number of File > New windows opened so far.
    documents: u8,
}

impl Desktop {
    /// An empty desktop without menus. See [`Desktop::init`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            compositor: Compositor::new(),
            pointer: PointerRouter::new(),
            documents: 0,
        }
    }

    /// Resets everything and installs the default menus.
    pub fn init(&mut self) -> Result<(), WmError> {
        self.compositor.reset();
        self.pointer.reset();
        self.documents = 0;
        menus::install_default_menus(self.compositor.menus_mut())?;
        tracing::info!("desktop initialized");
        Ok(())
    }

    #[must_use]
    pub const fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub const fn compositor_mut(&mut self) -> &mut Compositor {
        &mut self.compositor
    }

    #[must_use]
    pub const fn pointer(&self) -> &PointerRouter {
        &self.pointer
    }

    // =========================================================================
    // Window Commands
    // =========================================================================

    /// `OPEN_WINDOW`: a visible "Untitled" document window.
    ///
    /// Returns `None` when the pool is exhausted.
    pub fn open_window(&mut self, frame: Rect) -> Option<WindowId> {
        self.compositor
            .open_window(frame, UNTITLED, WindowStyle::Document, WindowFlags::VISIBLE)
            .ok()
    }

    /// `CLOSE_WINDOW`. Returns false if there is no such window.
    pub fn close_window(&mut self, id: WindowId) -> bool {
        self.pointer.forget(id);
        self.compositor.close_window(id).is_ok()
    }

    /// `MOVE_WINDOW`. Returns false if there is no such window.
    pub fn move_window(&mut self, id: WindowId, x: i16, y: i16) -> bool {
        self.compositor.windows_mut().move_to(id, x, y).is_ok()
    }

    // =========================================================================
    // Pointer and Menus
    // =========================================================================

    /// `MOUSE_EVENT`: routes the event and runs any menu command it selects.
    pub fn pointer_event(&mut self, event: MouseEvent, apps: &mut dyn AppLauncher) {
        match self.pointer.route(&mut self.compositor, event) {
            Ok(Some(selection)) => self.menu_command(selection.command, apps),
            Ok(None) => {}
            Err(e) => tracing::warn!(?event, error = %e, "pointer event failed"),
        }
    }

    /// Runs a menu command by id. Unknown ids are ignored.
    pub fn menu_command(&mut self, command: u16, apps: &mut dyn AppLauncher) {
        let Some(cmd) = MenuCommand::from_u16(command) else {
            tracing::debug!(command, "unknown menu command");
            return;
        };
        tracing::debug!(?cmd, "menu command");
        match cmd {
            MenuCommand::New => {
                if let Err(e) = self.new_document() {
                    tracing::warn!(error = %e, "File > New failed");
                }
            }
            MenuCommand::Close => {
                if let Some(active) = self.compositor.windows().active() {
                    self.close_window(active);
                }
            }
            MenuCommand::Launch(app) => apps.launch(app, &mut self.compositor),
            MenuCommand::Open
            | MenuCommand::Quit
            | MenuCommand::Undo
            | MenuCommand::Cut
            | MenuCommand::Copy
            | MenuCommand::Paste => {}
        }
    }

    /// File > New: "Window NN" with a grow box, staggered across the desktop.
    pub fn new_document(&mut self) -> Result<WindowId, WmError> {
        let n = self.documents.wrapping_add(1);
        self.documents = n;

        let mut title = TitleBuf::new();
        // Always two digits.
        let _ = write!(title, "Window {:02}", n % 100);

        let step = i16::from(n);
        let frame = Rect::from_origin_size(
            30 + (step * 12) % 120,
            40 + (step * 10) % 80,
            DOCUMENT_WIDTH,
            DOCUMENT_HEIGHT,
        );
        self.compositor.open_window(
            frame,
            title.as_str(),
            WindowStyle::Document,
            WindowFlags::VISIBLE | WindowFlags::HAS_GROW,
        )
    }
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed buffer for formatting short titles without allocating.
struct TitleBuf {
    bytes: [u8; 16],
    len: usize,
}

impl TitleBuf {
    const fn new() -> Self {
        Self {
            bytes: [0; 16],
            len: 0,
        }
    }

    fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }
}

impl Write for TitleBuf {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let end = self.len + s.len();
        let dst = self.bytes.get_mut(self.len..end).ok_or(core::fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}
