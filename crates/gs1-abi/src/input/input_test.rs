// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for pointer event classification and packing.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

const AT: Point = Point::new(100, 50);

#[test]
fn press_is_down() {
    let evt = MouseEvent::classify(AT, Buttons::LEFT, Buttons::NONE, 0, 0).unwrap();
    assert_eq!(evt.kind, PointerKind::Down);
    assert_eq!(evt.buttons, Buttons::LEFT);
}

#[test]
fn second_button_press_while_holding_is_down() {
    let held = Buttons::LEFT;
    let evt = MouseEvent::classify(AT, held | Buttons::RIGHT, held, 3, 0).unwrap();
    assert_eq!(evt.kind, PointerKind::Down);
}

#[test]
fn release_is_up() {
    let evt = MouseEvent::classify(AT, Buttons::NONE, Buttons::LEFT, 0, 0).unwrap();
    assert_eq!(evt.kind, PointerKind::Up);

    // Swapping buttons in one poll presses one, so it reads as down.
    let evt = MouseEvent::classify(AT, Buttons::RIGHT, Buttons::LEFT, 0, 0).unwrap();
    assert_eq!(evt.kind, PointerKind::Down);
}

#[test]
fn movement_is_move_or_drag() {
    let evt = MouseEvent::classify(AT, Buttons::NONE, Buttons::NONE, 2, 0).unwrap();
    assert_eq!(evt.kind, PointerKind::Move);

    let evt = MouseEvent::classify(AT, Buttons::LEFT, Buttons::LEFT, 0, -1).unwrap();
    assert_eq!(evt.kind, PointerKind::Drag);
}

#[test]
fn no_change_is_no_event() {
    assert!(MouseEvent::classify(AT, Buttons::NONE, Buttons::NONE, 0, 0).is_none());
    assert!(MouseEvent::classify(AT, Buttons::LEFT, Buttons::LEFT, 0, 0).is_none());
}

#[test]
fn params_layout() {
    let evt = MouseEvent::new(PointerKind::Drag, Buttons::LEFT, Point::new(319, 223), -4);
    let params = evt.to_params();
    assert_eq!(params, [319, 223, 0x0401, 0xFFFC]);
    assert_eq!(MouseEvent::from_params(params), Some(evt));
}

#[test]
fn from_params_rejects_unknown_kind() {
    assert_eq!(MouseEvent::from_params([0, 0, 0x0901, 0]), None);
}

#[test]
fn buttons_keep_low_nibble() {
    assert_eq!(Buttons::from_bits(0xFF).bits(), 0x0F);
    assert!(Buttons::from_bits(0x0F).contains(Buttons::START));
    assert!(!Buttons::LEFT.contains(Buttons::RIGHT));
    assert_eq!(format!("{:?}", Buttons::LEFT), "Buttons(0b0001)");
}
