// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for pointer event routing.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::menus::install_default_menus;
use gs1_abi::{Buttons, Rect, WindowFlags, WindowStyle};
use gs1_compositor::{Renderer, Window, WindowProc};

fn event(kind: PointerKind, x: i16, y: i16) -> MouseEvent {
    let buttons = match kind {
        PointerKind::Down | PointerKind::Drag => Buttons::LEFT,
        _ => Buttons::NONE,
    };
    MouseEvent::new(kind, buttons, Point::new(x, y), 0)
}

/// A document window at (10,30)-(110,130).
///
/// Title bar (11,31)-(109,49), close box (15,34)-(27,46), content from y 50.
fn desktop_with_window() -> (Compositor, WindowId) {
    let mut c = Compositor::new();
    let id = c
        .open_window(
            Rect::new(10, 30, 110, 130),
            "Doc",
            WindowStyle::Document,
            WindowFlags::VISIBLE,
        )
        .unwrap();
    (c, id)
}

/// Counts clicks and drags.
struct Counter {
    clicks: Rc<Cell<u32>>,
    drags: Rc<Cell<u32>>,
}

impl WindowProc for Counter {
    fn draw(&mut self, _window: &Window, _renderer: &mut dyn Renderer) {}

    fn click(&mut self, _window: &Window, _at: Point) -> bool {
        self.clicks.set(self.clicks.get() + 1);
        false
    }

    fn drag(&mut self, _window: &Window, _at: Point) -> bool {
        self.drags.set(self.drags.get() + 1);
        false
    }
}

fn attach_counter(c: &mut Compositor, id: WindowId) -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
    let clicks = Rc::new(Cell::new(0));
    let drags = Rc::new(Cell::new(0));
    c.attach(
        id,
        Box::new(Counter {
            clicks: Rc::clone(&clicks),
            drags: Rc::clone(&drags),
        }),
    )
    .unwrap();
    (clicks, drags)
}

// =============================================================================
// Cursor
// =============================================================================

#[test]
fn every_event_moves_the_cursor() {
    let mut c = Compositor::new();
    let mut router = PointerRouter::new();
    for (kind, x, y) in [
        (PointerKind::Move, 100, 100),
        (PointerKind::Down, 200, 150),
        (PointerKind::Up, 5, 210),
    ] {
        router.route(&mut c, event(kind, x, y)).unwrap();
        assert_eq!(c.cursor(), Point::new(x, y));
    }
}

// =============================================================================
// Windows
// =============================================================================

#[test]
fn press_in_content_selects_and_clicks() {
    let (mut c, a) = desktop_with_window();
    let b = c
        .open_window(
            Rect::new(200, 100, 300, 200),
            "B",
            WindowStyle::Document,
            WindowFlags::VISIBLE,
        )
        .unwrap();
    let (clicks, _) = attach_counter(&mut c, a);
    let mut router = PointerRouter::new();

    assert_eq!(c.windows().front(), Some(b));
    router.route(&mut c, event(PointerKind::Down, 50, 80)).unwrap();
    assert_eq!(c.windows().front(), Some(a));
    assert_eq!(c.windows().active(), Some(a));
    assert_eq!(clicks.get(), 1);
    assert_eq!(router.dragging(), None);
}

#[test]
fn title_drag_moves_the_window_with_the_grab_offset() {
    let (mut c, id) = desktop_with_window();
    let mut router = PointerRouter::new();

    router.route(&mut c, event(PointerKind::Down, 50, 35)).unwrap();
    assert_eq!(router.dragging(), Some(id));

    router.route(&mut c, event(PointerKind::Drag, 150, 100)).unwrap();
    assert_eq!(c.windows().get(id).unwrap().frame(), Rect::new(110, 95, 210, 195));

    router.route(&mut c, event(PointerKind::Up, 150, 100)).unwrap();
    assert_eq!(router.dragging(), None);
}

#[test]
fn dragged_window_stays_below_the_menu_bar() {
    let (mut c, id) = desktop_with_window();
    let mut router = PointerRouter::new();
    router.route(&mut c, event(PointerKind::Down, 50, 35)).unwrap();
    router.route(&mut c, event(PointerKind::Drag, 50, 10)).unwrap();
    assert_eq!(c.windows().get(id).unwrap().frame().top, 20);
}

#[test]
fn close_box_closes_the_window() {
    let (mut c, id) = desktop_with_window();
    let mut router = PointerRouter::new();
    router.route(&mut c, event(PointerKind::Down, 20, 38)).unwrap();
    assert!(!c.windows().is_live(id));
}

#[test]
fn grow_box_press_does_nothing() {
    let mut c = Compositor::new();
    let a = c
        .open_window(
            Rect::new(10, 30, 110, 130),
            "A",
            WindowStyle::Document,
            WindowFlags::VISIBLE | WindowFlags::HAS_GROW,
        )
        .unwrap();
    let b = c
        .open_window(Rect::new(200, 30, 300, 130), "B", WindowStyle::Document, WindowFlags::VISIBLE)
        .unwrap();
    let mut router = PointerRouter::new();
    // Grow box (97,117)-(109,129).
    router.route(&mut c, event(PointerKind::Down, 100, 120)).unwrap();
    assert!(c.windows().is_live(a));
    assert_eq!(c.windows().front(), Some(b));
    assert_eq!(router.dragging(), None);
}

#[test]
fn drag_without_grab_reaches_the_active_window() {
    let (mut c, id) = desktop_with_window();
    let (_, drags) = attach_counter(&mut c, id);
    let mut router = PointerRouter::new();

    // Press on the desktop, then drag: no grab, the active window gets it.
    router.route(&mut c, event(PointerKind::Down, 250, 200)).unwrap();
    router.route(&mut c, event(PointerKind::Drag, 255, 205)).unwrap();
    assert_eq!(drags.get(), 1);
    assert_eq!(c.windows().get(id).unwrap().frame(), Rect::new(10, 30, 110, 130));
}

#[test]
fn drag_of_a_vanished_window_ends_the_grab() {
    let (mut c, id) = desktop_with_window();
    let mut router = PointerRouter::new();
    router.route(&mut c, event(PointerKind::Down, 50, 35)).unwrap();
    c.close_window(id).unwrap();

    let result = router.route(&mut c, event(PointerKind::Drag, 60, 60));
    assert_eq!(result, Err(WmError::NoSuchWindow));
    assert_eq!(router.dragging(), None);
}

#[test]
fn forget_only_drops_the_named_window() {
    let (mut c, id) = desktop_with_window();
    let mut router = PointerRouter::new();
    router.route(&mut c, event(PointerKind::Down, 50, 35)).unwrap();
    router.forget(WindowId::new(7));
    assert_eq!(router.dragging(), Some(id));
    router.forget(id);
    assert_eq!(router.dragging(), None);
}

// =============================================================================
// Menus
// =============================================================================

#[test]
fn press_drag_release_selects_a_menu_item() {
    let mut c = Compositor::new();
    install_default_menus(c.menus_mut()).unwrap();
    let mut router = PointerRouter::new();

    router.route(&mut c, event(PointerKind::Down, 20, 5)).unwrap();
    assert_eq!(c.menus().open_menu(), Some(0));

    // File items start at y 22, 14 pixels each: New, Open, Close.
    router.route(&mut c, event(PointerKind::Drag, 30, 40)).unwrap();
    assert_eq!(c.menus().highlighted_item(), Some(1));

    let selection = router.route(&mut c, event(PointerKind::Up, 30, 40)).unwrap();
    assert_eq!(selection.map(|s| s.command), Some(0x0102));
    assert!(!c.menus().is_tracking());
}

#[test]
fn move_while_tracking_updates_the_highlight() {
    let mut c = Compositor::new();
    install_default_menus(c.menus_mut()).unwrap();
    let mut router = PointerRouter::new();
    router.route(&mut c, event(PointerKind::Down, 20, 5)).unwrap();
    router.route(&mut c, event(PointerKind::Move, 30, 25)).unwrap();
    assert_eq!(c.menus().highlighted_item(), Some(0));
}

#[test]
fn release_outside_any_item_selects_nothing() {
    let mut c = Compositor::new();
    install_default_menus(c.menus_mut()).unwrap();
    let mut router = PointerRouter::new();
    router.route(&mut c, event(PointerKind::Down, 20, 5)).unwrap();
    router.route(&mut c, event(PointerKind::Drag, 250, 150)).unwrap();
    assert_eq!(router.route(&mut c, event(PointerKind::Up, 250, 150)), Ok(None));
}

#[test]
fn release_without_menu_is_nothing() {
    let (mut c, _) = desktop_with_window();
    let mut router = PointerRouter::new();
    assert_eq!(router.route(&mut c, event(PointerKind::Up, 50, 80)), Ok(None));
}
