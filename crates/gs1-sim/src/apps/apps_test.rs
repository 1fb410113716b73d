// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the stand-in applications.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use gs1_abi::layout::MAX_WINDOWS;
use gs1_compositor::render::recording::{Op, RecordingRenderer};

fn paint_window() -> Window {
    Window::new(
        gs1_abi::WindowId::new(0),
        home_frame(App::Paint),
        "Paint",
        WindowStyle::Document,
        WindowFlags::VISIBLE,
    )
}

#[test]
fn launch_opens_a_titled_window() {
    let mut desktop = Compositor::new();
    let mut apps = SimApps::new();
    apps.launch(App::Paint, &mut desktop);

    let windows: Vec<_> = desktop.windows().back_to_front().collect();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].title(), "Paint");
    assert_eq!(windows[0].frame(), Rect::new(20, 30, 180, 150));
    assert_eq!(apps.launched(), [App::Paint]);
}

#[test]
fn launch_with_a_full_pool_opens_nothing() {
    let mut desktop = Compositor::new();
    for _ in 0..MAX_WINDOWS {
        desktop
            .open_window(
                Rect::new(0, 20, 50, 60),
                "Filler",
                WindowStyle::Document,
                WindowFlags::VISIBLE,
            )
            .unwrap();
    }
    let mut apps = SimApps::new();
    apps.launch(App::Calculator, &mut desktop);
    assert!(apps.launched().is_empty());
}

#[test]
fn sketch_keeps_dots_inside_the_content() {
    let window = paint_window();
    let mut sketch = Sketch::default();

    assert!(sketch.click(&window, Point::new(60, 90)));
    assert!(sketch.drag(&window, Point::new(61, 90)));
    // Title bar and outside the window
    assert!(!sketch.click(&window, Point::new(60, 35)));
    assert!(!sketch.drag(&window, Point::new(300, 200)));

    let content = window.content();
    assert_eq!(
        sketch.dots(),
        [
            Point::new(60 - content.left, 90 - content.top),
            Point::new(61 - content.left, 90 - content.top),
        ]
    );
}

#[test]
fn sketch_draws_a_square_per_dot() {
    let window = paint_window();
    let mut sketch = Sketch::default();
    sketch.click(&window, Point::new(60, 90));

    let mut renderer = RecordingRenderer::new();
    sketch.draw(&window, &mut renderer);
    assert_eq!(renderer.ops, [Op::FillRect(Rect::new(59, 89, 62, 92), Shade::Black)]);
}

#[test]
fn sketch_stops_at_its_capacity() {
    let window = paint_window();
    let mut sketch = Sketch::default();
    for _ in 0..MAX_DOTS {
        assert!(sketch.click(&window, Point::new(60, 90)));
    }
    assert!(!sketch.click(&window, Point::new(60, 90)));
    assert_eq!(sketch.dots().len(), MAX_DOTS);
}

#[test]
fn caption_writes_the_name_into_the_content() {
    let window = paint_window();
    let origin = window.content().origin();
    let mut renderer = RecordingRenderer::new();
    Caption("Notepad").draw(&window, &mut renderer);
    assert_eq!(
        renderer.ops,
        [Op::Text(Point::new(origin.x + 8, origin.y + 8), "Notepad".to_string())]
    );
}

#[test]
fn clicks_reach_the_launched_sketch() {
    let mut desktop = Compositor::new();
    SimApps::new().launch(App::Paint, &mut desktop);
    let id = desktop.windows().back_to_front().next().unwrap().id();
    assert_eq!(desktop.click(id, Point::new(60, 90)), Ok(true));
    assert_eq!(desktop.click(id, Point::new(60, 35)), Ok(false));
}
