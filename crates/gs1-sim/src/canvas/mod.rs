// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! A 4 bpp software renderer for the Sub side of the simulator.
//!
//! # Frame Layout
//!
//! ```text
//! 320 x 224 pixels, 160 bytes per row, rows top to bottom
//! byte = [ left pixel : 4 | right pixel : 4 ]
//! ```
//!
//! The compositor only repaints damage, and a bank last held the screen two
//! frames ago, so [`Canvas`] paints into its own back buffer and
//! [`Renderer::finish`] copies that buffer into the bank being published.
//!
//! Text uses block glyphs: one solid cell per visible character.


use gs1_abi::layout::{
    CURSOR_HEIGHT, CURSOR_WIDTH, FRAME_BYTES, GLYPH_ADVANCE, GLYPH_HEIGHT, MENU_BAR,
    MENU_BAR_HEIGHT, SCREEN, SCREEN_WIDTH,
};
use gs1_abi::{Point, Rect};
use gs1_compositor::menu::{
    CHECK_WIDTH, DROPDOWN_PADDING_X, DROPDOWN_SHADOW, ITEM_HEIGHT, SEPARATOR_HEIGHT, text_width,
};
use gs1_compositor::{DesktopPattern, ItemFlags, MenuBar, Renderer, Shade, Window};

/// Bytes in one frame row.
pub const BYTES_PER_ROW: usize = SCREEN_WIDTH as usize / 2;

/// Palette indices of the 16-color mode.
pub mod color {
    pub const BLACK: u8 = 0;
    pub const LIGHT_GRAY: u8 = 7;
    pub const DARK_GRAY: u8 = 8;
    pub const WHITE: u8 = 15;
}

use color::{BLACK, DARK_GRAY, LIGHT_GRAY, WHITE};

/// Palette index of a compositor shade.
#[must_use]
pub const fn shade_color(shade: Shade) -> u8 {
    match shade {
        Shade::White => WHITE,
        Shade::Light => LIGHT_GRAY,
        Shade::Dark => DARK_GRAY,
        Shade::Black => BLACK,
    }
}

/// Reads pixel `(x, y)` of a frame in the bank layout.
///
/// `None` off screen or past the end of `frame`.
#[must_use]
pub fn pixel_at(frame: &[u8], x: i16, y: i16) -> Option<u8> {
    if !SCREEN.contains(Point::new(x, y)) {
        return None;
    }
    let byte = *frame.get(y as usize * BYTES_PER_ROW + x as usize / 2)?;
    Some(if x & 1 == 0 { byte >> 4 } else { byte & 0x0F })
}

/// Pointer arrow, hot spot top-left. `#` outline, `.` fill, blank transparent.
const ARROW: [&[u8; CURSOR_WIDTH as usize]; CURSOR_HEIGHT as usize] = [
    b"#          ",
    b"##         ",
    b"#.#        ",
    b"#..#       ",
    b"#...#      ",
    b"#....#     ",
    b"#.....#    ",
    b"#......#   ",
    b"#.......#  ",
    b"#........# ",
    b"#.....#####",
    b"#..#..#    ",
    b"#.# #..#   ",
    b"##  #..#   ",
    b"#    #..#  ",
    b"     ###   ",
];

/// Software renderer with a persistent back buffer.
pub struct Canvas {
    pixels: Vec<u8>,
    clip: Rect,
}

impl Canvas {
    /// A white screen with no clip.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pixels: vec![(WHITE << 4) | WHITE; FRAME_BYTES],
            clip: SCREEN,
        }
    }

    /// The back buffer in the bank layout.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[must_use]
    pub fn pixel(&self, x: i16, y: i16) -> Option<u8> {
        pixel_at(&self.pixels, x, y)
    }

    /// Current clip rectangle.
    #[must_use]
    pub const fn clip(&self) -> Rect {
        self.clip
    }

    fn plot(&mut self, x: i16, y: i16, color: u8) {
        if !self.clip.contains(Point::new(x, y)) {
            return;
        }
        let index = y as usize * BYTES_PER_ROW + x as usize / 2;
        if let Some(byte) = self.pixels.get_mut(index) {
            *byte = if x & 1 == 0 {
                (*byte & 0x0F) | (color << 4)
            } else {
                (*byte & 0xF0) | (color & 0x0F)
            };
        }
    }

    /// Paints every clipped pixel of `area` with the color `paint` picks.
    fn fill_with(&mut self, area: Rect, paint: impl Fn(i16, i16) -> u8) {
        let area = area.intersection(self.clip);
        if area.is_empty() {
            return;
        }
        for y in area.top..area.bottom {
            for x in area.left..area.right {
                self.plot(x, y, paint(x, y));
            }
        }
    }

    fn fill(&mut self, area: Rect, color: u8) {
        self.fill_with(area, |_, _| color);
    }

    /// One-pixel outline along the inside of `r`.
    fn outline(&mut self, r: Rect, color: u8) {
        if r.is_empty() {
            return;
        }
        self.fill(Rect::new(r.left, r.top, r.right, r.top + 1), color);
        self.fill(Rect::new(r.left, r.bottom - 1, r.right, r.bottom), color);
        self.fill(Rect::new(r.left, r.top, r.left + 1, r.bottom), color);
        self.fill(Rect::new(r.right - 1, r.top, r.right, r.bottom), color);
    }

    fn text(&mut self, at: Point, text: &str, color: u8) {
        let mut x = at.x;
        for ch in text.chars() {
            if !ch.is_whitespace() {
                let cell = Rect::new(x, at.y + 1, x + GLYPH_ADVANCE - 1, at.y + GLYPH_HEIGHT - 2);
                self.fill(cell, color);
            }
            x = x.saturating_add(GLYPH_ADVANCE);
        }
    }

    fn title_bar(&mut self, window: &Window) {
        let bar = window.title_bar();
        if bar.is_empty() {
            return;
        }
        let width = text_width(window.title());
        let x = bar.left + (bar.width() - width) / 2;
        let y = bar.top + (bar.height() - GLYPH_HEIGHT) / 2;

        if window.is_active() {
            self.fill_with(bar, |x, y| {
                if DesktopPattern::Gray50.is_set(x, y) {
                    BLACK
                } else {
                    LIGHT_GRAY
                }
            });
            self.fill(Rect::new(x - 4, bar.top + 1, x + width + 4, bar.bottom - 1), WHITE);
        } else {
            self.fill(bar, LIGHT_GRAY);
        }
        self.text(Point::new(x, y), window.title(), BLACK);
        self.outline(bar, BLACK);
        self.fill(Rect::new(bar.left, bar.bottom, bar.right, bar.bottom + 1), BLACK);
        if let Some(close) = window.close_box() {
            self.fill(close, WHITE);
            self.outline(close, BLACK);
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for Canvas {
    fn set_clip(&mut self, clip: Rect) {
        self.clip = clip.clip_to(SCREEN);
    }

    fn reset_clip(&mut self) {
        self.clip = SCREEN;
    }

    fn fill_pattern(&mut self, area: Rect, pattern: DesktopPattern) {
        self.fill_with(area, |x, y| if pattern.is_set(x, y) { BLACK } else { WHITE });
    }

    fn fill_rect(&mut self, area: Rect, shade: Shade) {
        self.fill(area, shade_color(shade));
    }

    fn draw_text(&mut self, at: Point, text: &str) {
        self.text(at, text, BLACK);
    }

    fn draw_window_frame(&mut self, window: &Window) {
        self.outline(window.frame(), BLACK);
        self.title_bar(window);
        self.fill(window.content(), WHITE);
        if let Some(grow) = window.grow_box() {
            self.outline(grow, BLACK);
            let inner = Rect::new(grow.left + 3, grow.top + 3, grow.right - 3, grow.bottom - 3);
            self.outline(inner, BLACK);
        }
    }

    fn draw_menu_bar(&mut self, menus: &MenuBar) {
        self.fill(MENU_BAR, WHITE);
        self.fill(
            Rect::new(MENU_BAR.left, MENU_BAR_HEIGHT - 1, MENU_BAR.right, MENU_BAR_HEIGHT),
            BLACK,
        );
        let open = menus.open_menu();
        let y = (MENU_BAR_HEIGHT - GLYPH_HEIGHT) / 2;
        for (index, menu) in menus.menus().iter().enumerate() {
            let ink = if open == Some(index) {
                let title = menu.title_rect();
                self.fill(Rect::new(title.left, title.top, title.right, title.bottom - 1), BLACK);
                WHITE
            } else {
                BLACK
            };
            self.text(Point::new(menu.title_x(), y), menu.title(), ink);
        }
    }

    fn draw_dropdown(&mut self, menus: &MenuBar) {
        let Some(menu) = menus.open_menu().and_then(|index| menus.menus().get(index)) else {
            return;
        };
        let drop = menu.dropdown_rect();
        self.fill(drop.offset(DROPDOWN_SHADOW, DROPDOWN_SHADOW), BLACK);
        self.fill(drop, WHITE);
        self.outline(drop, BLACK);

        let highlighted = menus.highlighted_item();
        for (index, (top, item)) in menu.item_tops().enumerate() {
            if item.flags().contains(ItemFlags::SEPARATOR) {
                let y = top + SEPARATOR_HEIGHT / 2;
                let line = Rect::new(drop.left + 1, y, drop.right - 1, y + 1);
                self.fill_with(line, |x, _| if x & 1 == 0 { BLACK } else { WHITE });
                continue;
            }
            let ink = if highlighted == Some(index) {
                self.fill(Rect::new(drop.left + 1, top, drop.right - 1, top + ITEM_HEIGHT), BLACK);
                WHITE
            } else if item.is_selectable() {
                BLACK
            } else {
                LIGHT_GRAY
            };
            let mut x = drop.left + DROPDOWN_PADDING_X;
            if item.flags().contains(ItemFlags::CHECKED) {
                self.fill(Rect::new(x, top + 5, x + 4, top + 9), ink);
                x += CHECK_WIDTH;
            }
            self.text(Point::new(x, top + (ITEM_HEIGHT - GLYPH_HEIGHT) / 2), item.text(), ink);
        }
    }

    fn draw_cursor(&mut self, at: Point) {
        for (row, line) in (0_i16..).zip(ARROW) {
            for (col, &px) in (0_i16..).zip(line.iter()) {
                let color = match px {
                    b'#' => BLACK,
                    b'.' => WHITE,
                    _ => continue,
                };
                self.plot(at.x.saturating_add(col), at.y.saturating_add(row), color);
            }
        }
    }

    fn finish(&mut self, frame: &mut [u8]) {
        match frame.get_mut(..FRAME_BYTES) {
            Some(dst) => dst.copy_from_slice(&self.pixels),
            None => tracing::warn!(len = frame.len(), "bank too small for a frame"),
        }
    }
}
