// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for screen geometry.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

#[test]
fn rect_is_half_open() {
    let r = Rect::new(10, 10, 20, 20);
    assert!(r.contains(Point::new(10, 10)));
    assert!(r.contains(Point::new(19, 19)));
    assert!(!r.contains(Point::new(20, 10)));
    assert!(!r.contains(Point::new(10, 20)));
    assert!(!r.contains(Point::new(9, 15)));
}

#[test]
fn empty_rects() {
    assert!(Rect::EMPTY.is_empty());
    assert!(Rect::new(5, 5, 5, 10).is_empty());
    assert!(Rect::new(5, 5, 10, 5).is_empty());
    assert!(Rect::new(10, 10, 5, 20).is_empty());
    assert!(!Rect::new(0, 0, 1, 1).is_empty());
    assert_eq!(Rect::new(10, 10, 5, 5).width(), 0);
    assert_eq!(Rect::new(10, 10, 5, 5).height(), 0);
}

#[test]
fn intersects_requires_a_shared_pixel() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(a.intersects(Rect::new(5, 5, 15, 15)));
    assert!(a.intersects(Rect::new(9, 9, 10, 10)));
    // Touching edges share no pixel.
    assert!(!a.intersects(Rect::new(10, 0, 20, 10)));
    assert!(!a.intersects(Rect::new(0, 10, 10, 20)));
    assert!(!a.intersects(Rect::EMPTY));
}

#[test]
fn union_is_bounding_box() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(5, 5, 15, 15);
    assert_eq!(a.union(b), Rect::new(0, 0, 15, 15));
    assert_eq!(a.union(a), a);
}

#[test]
fn intersection_of_disjoint_is_empty() {
    let a = Rect::new(0, 0, 10, 10);
    assert_eq!(a.intersection(Rect::new(5, 5, 15, 15)), Rect::new(5, 5, 10, 10));
    assert!(a.intersection(Rect::new(20, 20, 30, 30)).is_empty());
}

#[test]
fn clip_to_clamps_each_edge() {
    let screen = Rect::new(0, 0, 320, 224);
    assert_eq!(
        Rect::new(-10, -5, 400, 300).clip_to(screen),
        Rect::new(0, 0, 320, 224)
    );
    assert_eq!(
        Rect::new(300, 200, 340, 240).clip_to(screen),
        Rect::new(300, 200, 320, 224)
    );
    assert!(Rect::new(400, 10, 500, 20).clip_to(screen).is_empty());
}

#[test]
fn clip_to_keeps_far_rects_inside_the_bounds() {
    let screen = Rect::new(0, 0, 320, 224);
    let right = Rect::new(i16::MAX, 10, i16::MAX, 20).clip_to(screen);
    assert_eq!(right, Rect::new(320, 10, 320, 20));
    let corner = Rect::new(i16::MIN, i16::MIN, -100, -100).clip_to(screen);
    assert_eq!(corner, Rect::new(0, 0, 0, 0));
    assert!(screen.contains_rect(right) && screen.contains_rect(corner));
}

#[test]
fn from_origin_size_and_offset() {
    let r = Rect::from_origin_size(10, 20, 30, 40);
    assert_eq!(r, Rect::new(10, 20, 40, 60));
    assert_eq!(r.width(), 30);
    assert_eq!(r.height(), 40);
    assert_eq!(r.offset(-10, 5), Rect::new(0, 25, 30, 65));
    assert_eq!(r.origin(), Point::new(10, 20));
}

#[test]
fn from_origin_size_saturates() {
    let r = Rect::from_origin_size(i16::MAX - 1, 0, 100, 1);
    assert_eq!(r.right, i16::MAX);
}

#[test]
fn contains_rect() {
    let outer = Rect::new(0, 0, 100, 100);
    assert!(outer.contains_rect(Rect::new(10, 10, 20, 20)));
    assert!(outer.contains_rect(outer));
    assert!(outer.contains_rect(Rect::EMPTY));
    assert!(!outer.contains_rect(Rect::new(90, 90, 110, 100)));
}

#[test]
fn display_formats_edges() {
    assert_eq!(format!("{}", Rect::new(1, 2, 3, 4)), "(1,2)-(3,4)");
    assert_eq!(format!("{:?}", Rect::new(1, 2, 3, 4)), "Rect(1,2)-(3,4)");
    assert_eq!(format!("{}", Point::new(-1, 7)), "(-1,7)");
}
