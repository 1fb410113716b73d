// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the Z-order list.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use proptest::prelude::*;

const A: WindowId = WindowId::new(0);
const B: WindowId = WindowId::new(1);
const C: WindowId = WindowId::new(2);

fn order(list: &ZOrderList) -> Vec<WindowId> {
    list.front_to_back().collect()
}

// =============================================================================
// Push and Unlink
// =============================================================================

#[test]
fn push_top_orders_newest_first() {
    let mut z = ZOrderList::new();
    z.push_top(A);
    z.push_top(B);
    z.push_top(C);
    assert_eq!(order(&z), [C, B, A]);
    assert_eq!(z.front(), Some(C));
    assert_eq!(z.back(), Some(A));
    assert_eq!(z.len(), 3);
}

#[test]
fn unlink_middle_repairs_neighbours() {
    let mut z = ZOrderList::new();
    z.push_top(A);
    z.push_top(B);
    z.push_top(C);
    assert!(z.unlink(B));
    assert_eq!(order(&z), [C, A]);
    assert_eq!(z.below(C), Some(A));
    assert_eq!(z.above(A), Some(C));
    assert!(!z.contains(B));
    assert!(!z.unlink(B));
}

#[test]
fn unlink_ends_moves_head_and_tail() {
    let mut z = ZOrderList::new();
    z.push_top(A);
    z.push_top(B);
    z.push_top(C);
    z.unlink(C);
    assert_eq!(z.front(), Some(B));
    z.unlink(A);
    assert_eq!(z.back(), Some(B));
    z.unlink(B);
    assert!(z.is_empty());
    assert_eq!(z.front(), None);
    assert_eq!(z.back(), None);
}

#[test]
fn first_push_is_also_the_back() {
    let mut z = ZOrderList::new();
    z.push_top(B);
    assert_eq!(z.front(), Some(B));
    assert_eq!(z.back(), Some(B));
}

#[test]
fn push_top_of_a_linked_window_moves_it() {
    let mut z = ZOrderList::new();
    z.push_top(A);
    z.push_top(B);
    z.push_top(C);
    z.push_top(A);
    assert_eq!(order(&z), [A, C, B]);
    assert_eq!(z.len(), 3);
}

#[test]
fn send_to_back_moves_to_the_tail() {
    let mut z = ZOrderList::new();
    z.push_top(A);
    z.push_top(B);
    z.push_top(C);
    z.send_to_back(C);
    assert_eq!(order(&z), [B, A, C]);
    assert_eq!(z.back_to_front().collect::<Vec<_>>(), [C, A, B]);
}

// =============================================================================
// Property Tests
// =============================================================================

#[derive(Clone, Debug)]
enum Op {
    Top(u8),
    Bottom(u8),
    Unlink(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..16).prop_map(Op::Top),
        (0u8..16).prop_map(Op::Bottom),
        (0u8..16).prop_map(Op::Unlink),
    ]
}

proptest! {
    /// The list behaves like a plain vector with the same operations.
    #[test]
    fn matches_a_vector_model(ops in proptest::collection::vec(op(), 0..64)) {
        let mut z = ZOrderList::new();
        let mut model: Vec<WindowId> = Vec::new();
        for op in ops {
            match op {
                Op::Top(i) => {
                    let id = WindowId::new(i);
                    model.retain(|&w| w != id);
                    model.insert(0, id);
                    z.push_top(id);
                }
                Op::Bottom(i) => {
                    let id = WindowId::new(i);
                    model.retain(|&w| w != id);
                    model.push(id);
                    z.push_bottom(id);
                }
                Op::Unlink(i) => {
                    let id = WindowId::new(i);
                    let was = model.contains(&id);
                    model.retain(|&w| w != id);
                    prop_assert_eq!(z.unlink(id), was);
                }
            }
            prop_assert_eq!(order(&z), model.clone());
            let mut reversed: Vec<WindowId> = z.back_to_front().collect();
            reversed.reverse();
            prop_assert_eq!(reversed, model.clone());
            prop_assert_eq!(z.len(), model.len());
        }
    }
}
