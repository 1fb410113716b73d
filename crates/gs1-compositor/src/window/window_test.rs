// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for window records and rectangle derivation.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use gs1_abi::Point;

fn document(frame: Rect) -> Window {
    Window::new(
        WindowId::new(0),
        frame,
        "Doc",
        WindowStyle::Document,
        WindowFlags::VISIBLE,
    )
}

// =============================================================================
// Rectangle Derivation
// =============================================================================

#[test]
fn document_rects_follow_the_frame() {
    let w = document(Rect::new(10, 10, 100, 100));
    assert_eq!(w.frame(), Rect::new(10, 10, 100, 100));
    assert_eq!(w.title_bar(), Rect::new(11, 11, 99, 29));
    assert_eq!(w.content(), Rect::new(11, 30, 99, 99));
}

#[test]
fn plain_and_shadow_have_no_title_bar() {
    for style in [WindowStyle::Plain, WindowStyle::Shadow] {
        let (title_bar, content) = decoration_rects(Rect::new(10, 10, 100, 100), style);
        assert!(title_bar.is_empty());
        assert_eq!(content, Rect::new(11, 11, 99, 99));
    }
}

#[test]
fn frame_is_clamped_to_the_screen() {
    let w = document(Rect::new(-20, -5, 400, 300));
    assert_eq!(w.frame(), SCREEN);
    assert_eq!(w.content().right, SCREEN.right - 1);
}

#[test]
fn short_frame_keeps_decorations_inside() {
    let w = document(Rect::new(10, 30, 100, 40));
    assert_eq!(w.title_bar(), Rect::new(11, 31, 99, 39));
    assert!(w.content().is_empty());
}

#[test]
fn narrow_frame_cuts_the_close_box() {
    let w = document(Rect::new(10, 30, 20, 80));
    assert_eq!(w.close_box(), Some(Rect::new(15, 34, 19, 46)));
}

#[test]
fn moving_the_frame_rederives_everything() {
    let mut w = document(Rect::new(10, 10, 100, 100));
    w.set_frame(Rect::new(50, 60, 140, 150));
    assert_eq!(w.title_bar(), Rect::new(51, 61, 139, 79));
    assert_eq!(w.content(), Rect::new(51, 80, 139, 149));
}

// =============================================================================
// Flags and Decorations
// =============================================================================

#[test]
fn style_implied_flags_are_applied() {
    let doc = document(Rect::new(0, 20, 50, 50));
    assert!(doc.flags().contains(WindowFlags::HAS_CLOSE));
    assert!(!doc.flags().contains(WindowFlags::MODAL));

    for style in [WindowStyle::Dialog, WindowStyle::Alert] {
        let frame = Rect::new(0, 20, 50, 50);
        let w = Window::new(WindowId::new(1), frame, "", style, WindowFlags::NONE);
        assert!(w.flags().contains(WindowFlags::MODAL));
        assert!(!w.flags().contains(WindowFlags::HAS_CLOSE));
    }
}

#[test]
fn close_box_sits_at_the_title_bar_corner() {
    let w = document(Rect::new(10, 10, 100, 100));
    let close = w.close_box().unwrap();
    assert_eq!(close, Rect::new(15, 14, 27, 26));
    assert!(close.contains(Point::new(15, 14)));
    assert!(!close.contains(Point::new(27, 14)));
}

#[test]
fn grow_box_only_with_the_flag() {
    let w = document(Rect::new(10, 10, 100, 100));
    assert_eq!(w.grow_box(), None);

    let w = Window::new(
        WindowId::new(2),
        Rect::new(10, 10, 100, 100),
        "",
        WindowStyle::Document,
        WindowFlags::HAS_GROW,
    );
    assert_eq!(w.grow_box(), Some(Rect::new(87, 87, 99, 99)));
}

#[test]
fn plain_window_never_has_a_close_box() {
    let w = Window::new(
        WindowId::new(3),
        Rect::new(10, 10, 100, 100),
        "",
        WindowStyle::Plain,
        WindowFlags::HAS_CLOSE,
    );
    assert_eq!(w.close_box(), None);
}

// =============================================================================
// Titles
// =============================================================================

#[test]
fn title_keeps_short_text() {
    let t = Title::new("Untitled");
    assert_eq!(t.as_str(), "Untitled");
    assert_eq!(t.len(), 8);
    assert!(Title::default().is_empty());
}

#[test]
fn title_truncates_at_capacity() {
    let long = "abcdefghijklmnopqrstuvwxyz0123456789";
    let t = Title::new(long);
    assert_eq!(t.len(), TITLE_MAX);
    assert_eq!(t.as_str(), &long[..TITLE_MAX]);
}

#[test]
fn title_truncates_on_a_char_boundary() {
    // 30 ASCII bytes then a two-byte character straddling the limit.
    let text = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaé";
    let t = Title::new(text);
    assert_eq!(t.len(), 30);
    assert_eq!(t.as_str(), &text[..30]);
}
