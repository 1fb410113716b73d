// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Stand-in applications for the Apps menu.
//!
//! Paint gets a [`Sketch`] surface that leaves a dot wherever the mouse is
//! pressed or dragged; the other applications show a [`Caption`].

#[cfg(test)]
mod apps_test;

use gs1_abi::{Point, Rect, WindowFlags, WindowStyle};
use gs1_compositor::{Compositor, Renderer, Shade, Window, WindowProc};
use gs1_sub::{App, AppLauncher};

/// Dots one [`Sketch`] keeps before it ignores further input.
pub const MAX_DOTS: usize = 256;

/// Where each application's window opens.
#[must_use]
pub const fn home_frame(app: App) -> Rect {
    match app {
        App::Calculator => Rect::from_origin_size(24, 34, 120, 100),
        App::Notepad => Rect::from_origin_size(60, 44, 200, 140),
        App::Paint => Rect::from_origin_size(20, 30, 160, 120),
    }
}

/// Opens one window per launch and attaches its behavior.
#[derive(Debug, Default)]
pub struct SimApps {
    launched: Vec<App>,
}

impl SimApps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applications started so far, in order.
    #[must_use]
    pub fn launched(&self) -> &[App] {
        &self.launched
    }
}

impl AppLauncher for SimApps {
    fn launch(&mut self, app: App, desktop: &mut Compositor) {
        let id = match desktop.open_window(
            home_frame(app),
            app.name(),
            WindowStyle::Document,
            WindowFlags::VISIBLE,
        ) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(%app, error = %e, "cannot open application window");
                return;
            }
        };
        let proc: Box<dyn WindowProc> = match app {
            App::Paint => Box::new(Sketch::default()),
            App::Calculator | App::Notepad => Box::new(Caption(app.name())),
        };
        if let Err(e) = desktop.attach(id, proc) {
            tracing::warn!(%app, %id, error = %e, "cannot attach application");
            return;
        }
        self.launched.push(app);
        tracing::info!(%app, %id, "application launched");
    }
}

/// Dots at every press and drag, kept relative to the content origin.
#[derive(Debug, Default)]
pub struct Sketch {
    dots: Vec<Point>,
}

impl Sketch {
    #[must_use]
    pub fn dots(&self) -> &[Point] {
        &self.dots
    }

    fn dot(&mut self, window: &Window, at: Point) -> bool {
        let content = window.content();
        if !content.contains(at) || self.dots.len() >= MAX_DOTS {
            return false;
        }
        self.dots.push(Point::new(at.x - content.left, at.y - content.top));
        true
    }
}

impl WindowProc for Sketch {
    fn draw(&mut self, window: &Window, renderer: &mut dyn Renderer) {
        let origin = window.content().origin();
        for dot in &self.dots {
            let x = origin.x + dot.x;
            let y = origin.y + dot.y;
            renderer.fill_rect(Rect::new(x - 1, y - 1, x + 2, y + 2), Shade::Black);
        }
    }

    fn click(&mut self, window: &Window, at: Point) -> bool {
        self.dot(window, at)
    }

    fn drag(&mut self, window: &Window, at: Point) -> bool {
        self.dot(window, at)
    }
}

/// A line of text in the top-left corner of the content.
#[derive(Clone, Copy, Debug)]
pub struct Caption(pub &'static str);

impl WindowProc for Caption {
    fn draw(&mut self, window: &Window, renderer: &mut dyn Renderer) {
        let origin = window.content().origin();
        renderer.draw_text(Point::new(origin.x + 8, origin.y + 8), self.0);
    }
}
