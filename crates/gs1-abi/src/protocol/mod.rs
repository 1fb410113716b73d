// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Command/status protocol between the Main and Sub processors.
//!
//! The Main processor (initiator) writes an [`Opcode`] into its flag byte and
//! up to four parameter words into the command registers. The Sub processor
//! (responder) answers with a [`Status`] in its flag byte and result words in
//! the status registers. Status word 0 doubles as the Sub lifecycle register
//! ([`SubState`]) outside of command replies that overwrite it.
//!
//! # Command Parameters
//!
//! | Opcode | CMD0 | CMD1 | CMD2 | CMD3 | Result word 0 |
//! |--------|------|------|------|------|---------------|
//! | `RenderFrame` | x | y | w | h | `SubState::Ready` |
//! | `OpenWindow` | x | y | w | h | window id or `0xFF` |
//! | `CloseWindow` | id | - | - | - | `0` or `0xFF` |
//! | `MoveWindow` | id | x | y | - | `0` or `0xFF` |
//! | `CdPlay` | track | - | - | - | - |
//! | `MouseEvent` | x | y | kind << 8 \| buttons | dx | - |

use core::fmt;


/// Number of parameter words carried by one command.
pub const PARAM_WORDS: usize = 4;

/// Number of result words a reply may carry.
pub const RESULT_WORDS: usize = 8;

/// Result word for a successful window operation.
pub const RESULT_OK: u16 = 0;

/// Result word for a failed window operation (no such window, pool full).
pub const RESULT_FAILED: u16 = 0xFF;

// =============================================================================
// Opcodes
// =============================================================================

/// Command opcode written by the Main processor into its flag byte.
///
/// `None` is the rest value: the initiator has no command in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// No command in flight.
    None = 0x00,
    /// Sub processor has booted.
    Boot = 0x01,
    /// (Re-)initialize the Sub operating system.
    InitOs = 0x02,
    /// Composite the accumulated damage and publish the bank.
    RenderFrame = 0x10,
    /// Hand the Sub bank back to the Main processor.
    WramSwap = 0x11,
    /// Open a document window.
    OpenWindow = 0x20,
    /// Close a window by id.
    CloseWindow = 0x21,
    /// Move a window by id.
    MoveWindow = 0x22,
    /// Draw a text string.
    DrawText = 0x30,
    /// Draw an icon bitmap.
    DrawIcon = 0x31,
    /// Play a CD audio track.
    CdPlay = 0x40,
    /// Stop CD audio.
    CdStop = 0x41,
    /// Read a file from disc.
    FileRead = 0x50,
    /// Write a file to backup RAM.
    FileWrite = 0x51,
    /// Deliver a pointer event.
    MouseEvent = 0x60,
}

impl Opcode {
    /// Try to convert from a raw flag byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::None),
            0x01 => Some(Self::Boot),
            0x02 => Some(Self::InitOs),
            0x10 => Some(Self::RenderFrame),
            0x11 => Some(Self::WramSwap),
            0x20 => Some(Self::OpenWindow),
            0x21 => Some(Self::CloseWindow),
            0x22 => Some(Self::MoveWindow),
            0x30 => Some(Self::DrawText),
            0x31 => Some(Self::DrawIcon),
            0x40 => Some(Self::CdPlay),
            0x41 => Some(Self::CdStop),
            0x50 => Some(Self::FileRead),
            0x51 => Some(Self::FileWrite),
            0x60 => Some(Self::MouseEvent),
            _ => None,
        }
    }

    /// Raw flag byte.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::Boot => "BOOT",
            Self::InitOs => "INIT_OS",
            Self::RenderFrame => "RENDER_FRAME",
            Self::WramSwap => "WRAM_SWAP",
            Self::OpenWindow => "OPEN_WINDOW",
            Self::CloseWindow => "CLOSE_WINDOW",
            Self::MoveWindow => "MOVE_WINDOW",
            Self::DrawText => "DRAW_TEXT",
            Self::DrawIcon => "DRAW_ICON",
            Self::CdPlay => "CD_PLAY",
            Self::CdStop => "CD_STOP",
            Self::FileRead => "FILE_READ",
            Self::FileWrite => "FILE_WRITE",
            Self::MouseEvent => "MOUSE_EVENT",
        };
        write!(f, "{name}({:#04x})", *self as u8)
    }
}

// =============================================================================
// Status Codes
// =============================================================================

/// Status byte written by the Sub processor into its flag byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    /// Ready for a command.
    Idle = 0x00,
    /// Command acknowledged and executing.
    Busy = 0x01,
    /// Command acknowledged (unused by the dispatcher, kept for the wire).
    Ack = 0x02,
    /// Command complete, result words valid.
    Done = 0x03,
    /// Command rejected or failed.
    Error = 0xFF,
}

impl Status {
    /// Try to convert from a raw flag byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Idle),
            0x01 => Some(Self::Busy),
            0x02 => Some(Self::Ack),
            0x03 => Some(Self::Done),
            0xFF => Some(Self::Error),
            _ => None,
        }
    }

    /// Raw flag byte.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns true if this status ends a command cycle.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Busy => write!(f, "BUSY"),
            Self::Ack => write!(f, "ACK"),
            Self::Done => write!(f, "DONE"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

// =============================================================================
// Sub Lifecycle
// =============================================================================

/// Sub processor lifecycle state, reported in status word 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum SubState {
    /// Held in reset.
    Reset = 0,
    /// Running OS initialization.
    Booting = 1,
    /// Ready for commands.
    Ready = 2,
    /// Compositing a frame.
    Rendering = 3,
    /// Unrecoverable failure.
    Crashed = 0xFF,
}

impl SubState {
    /// Try to convert from a raw status word.
    #[must_use]
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(Self::Reset),
            1 => Some(Self::Booting),
            2 => Some(Self::Ready),
            3 => Some(Self::Rendering),
            0xFF => Some(Self::Crashed),
            _ => None,
        }
    }

    /// Raw status word.
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// Commands
// =============================================================================

/// One command as it crosses the link: an opcode and four parameter words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Command {
    /// Operation to perform.
    pub opcode: Opcode,
    /// Parameter words `CMD0..CMD3`.
    pub params: [u16; PARAM_WORDS],
}

impl Command {
    /// Creates a command with explicit parameters.
    #[inline]
    #[must_use]
    pub const fn new(opcode: Opcode, params: [u16; PARAM_WORDS]) -> Self {
        Self { opcode, params }
    }

    /// Creates a command without parameters.
    #[inline]
    #[must_use]
    pub const fn bare(opcode: Opcode) -> Self {
        Self::new(opcode, [0; PARAM_WORDS])
    }

    /// `INIT_OS`.
    #[must_use]
    pub const fn init_os() -> Self {
        Self::bare(Opcode::InitOs)
    }

    /// `RENDER_FRAME` over a screen region.
    #[must_use]
    pub const fn render_frame(x: i16, y: i16, w: i16, h: i16) -> Self {
        Self::new(
            Opcode::RenderFrame,
            [x as u16, y as u16, w as u16, h as u16],
        )
    }

    /// `OPEN_WINDOW` with an origin and size.
    #[must_use]
    pub const fn open_window(x: i16, y: i16, w: i16, h: i16) -> Self {
        Self::new(Opcode::OpenWindow, [x as u16, y as u16, w as u16, h as u16])
    }

    /// `CLOSE_WINDOW` for a window id.
    #[must_use]
    pub const fn close_window(id: WindowId) -> Self {
        Self::new(Opcode::CloseWindow, [id.as_u8() as u16, 0, 0, 0])
    }

    /// `MOVE_WINDOW` to a new origin.
    #[must_use]
    pub const fn move_window(id: WindowId, x: i16, y: i16) -> Self {
        Self::new(
            Opcode::MoveWindow,
            [id.as_u8() as u16, x as u16, y as u16, 0],
        )
    }

    /// `CD_PLAY` for a track number.
    #[must_use]
    pub const fn cd_play(track: u16) -> Self {
        Self::new(Opcode::CdPlay, [track, 0, 0, 0])
    }

    /// `CD_STOP`.
    #[must_use]
    pub const fn cd_stop() -> Self {
        Self::bare(Opcode::CdStop)
    }

    /// `WRAM_SWAP`.
    #[must_use]
    pub const fn wram_swap() -> Self {
        Self::bare(Opcode::WramSwap)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [p0, p1, p2, p3] = self.params;
        write!(
            f,
            "{} [{p0:#06x}, {p1:#06x}, {p2:#06x}, {p3:#06x}]",
            self.opcode
        )
    }
}

// =============================================================================
// Window Ids
// =============================================================================

/// Stable external handle of a window: its slot index in the pool.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct WindowId(u8);

impl WindowId {
    /// Sentinel reported on the wire for "no window".
    pub const INVALID: u8 = 0xFF;

    /// Creates a window id from a slot index.
    #[inline]
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw id value.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Slot index in the window pool.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Decodes an `OPEN_WINDOW` result word; `None` for the sentinel.
    #[must_use]
    pub const fn from_result(word: u16) -> Option<Self> {
        if word >= Self::INVALID as u16 {
            None
        } else {
            Some(Self(word as u8))
        }
    }

    /// Encodes an optional id as an `OPEN_WINDOW` result word.
    #[must_use]
    pub const fn to_result(id: Option<Self>) -> u16 {
        match id {
            Some(id) => id.0 as u16,
            None => Self::INVALID as u16,
        }
    }
}

impl fmt::Debug for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowId({})", self.0)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "win:{}", self.0)
    }
}
