// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for pointer tracking.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use gs1_abi::PointerKind;
use gs1_abi::layout::SCREEN;
use proptest::prelude::*;

fn kind(event: Option<MouseEvent>) -> Option<PointerKind> {
    event.map(|e| e.kind)
}

#[test]
fn starts_at_the_screen_center() {
    let tracker = PointerTracker::new();
    assert_eq!(tracker.position(), Point::new(160, 112));
    assert_eq!(tracker.buttons(), Buttons::NONE);
}

#[test]
fn motion_without_buttons_is_a_move() {
    let mut tracker = PointerTracker::new();
    let event = tracker.update(PointerSample::new(10, -4, Buttons::NONE)).unwrap();
    assert_eq!(event.kind, PointerKind::Move);
    assert_eq!(event.pos, Point::new(170, 108));
    assert_eq!(event.dx, 10);
}

#[test]
fn nothing_changed_is_no_event() {
    let mut tracker = PointerTracker::new();
    assert_eq!(tracker.update(PointerSample::default()), None);
}

#[test]
fn press_drag_release() {
    let mut tracker = PointerTracker::new();
    assert_eq!(
        kind(tracker.update(PointerSample::new(0, 0, Buttons::LEFT))),
        Some(PointerKind::Down)
    );
    assert_eq!(
        kind(tracker.update(PointerSample::new(3, 3, Buttons::LEFT))),
        Some(PointerKind::Drag)
    );
    // Held without motion.
    assert_eq!(tracker.update(PointerSample::new(0, 0, Buttons::LEFT)), None);
    assert_eq!(
        kind(tracker.update(PointerSample::new(0, 0, Buttons::NONE))),
        Some(PointerKind::Up)
    );
    assert_eq!(tracker.position(), Point::new(163, 115));
}

#[test]
fn press_wins_over_motion() {
    let mut tracker = PointerTracker::new();
    let event = tracker.update(PointerSample::new(5, 5, Buttons::LEFT)).unwrap();
    assert_eq!(event.kind, PointerKind::Down);
    assert_eq!(event.pos, Point::new(165, 117));
}

#[test]
fn position_stops_at_the_screen_edges() {
    let mut tracker = PointerTracker::new();
    tracker.update(PointerSample::new(-200, -200, Buttons::NONE));
    assert_eq!(tracker.position(), Point::new(0, 0));
    tracker.update(PointerSample::new(i16::MAX, i16::MAX, Buttons::NONE));
    assert_eq!(tracker.position(), Point::new(255, 223));
    tracker.update(PointerSample::new(i16::MAX, 0, Buttons::NONE));
    assert_eq!(tracker.position(), Point::new(319, 223));
}

#[test]
fn overflowed_delta_is_clamped() {
    let mut tracker = PointerTracker::new();
    let event = tracker.update(PointerSample::new(-1000, 0, Buttons::NONE)).unwrap();
    assert_eq!(event.dx, -MAX_DELTA);
}

proptest! {
    #[test]
    fn position_always_on_screen(
        samples in prop::collection::vec((any::<i16>(), any::<i16>(), 0u8..16), 1..64),
    ) {
        let mut tracker = PointerTracker::new();
        for (dx, dy, bits) in samples {
            let sample = PointerSample::new(dx, dy, Buttons::from_bits(bits));
            if let Some(event) = tracker.update(sample) {
                prop_assert!(SCREEN.contains(event.pos));
            }
            prop_assert!(SCREEN.contains(tracker.position()));
        }
    }
}
