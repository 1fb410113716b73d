// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the Word RAM bank exchange.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::bounded::{self, SpinBudget};
use crate::bus::mock::{GateArray, MockBus};
use gs1_abi::regs::{MEM_MODE, MEM_MODE_DMNA, MEM_MODE_RET};
use std::sync::Arc;

type MainBank = BankExchange<MockBus<Main>, Main>;
type SubBank = BankExchange<MockBus<Sub>, Sub>;

fn exchanges(ga: &Arc<GateArray>) -> (MainBank, SubBank) {
    (
        BankExchange::new(RegisterLink::new(ga.main_bus())),
        BankExchange::new(RegisterLink::new(ga.sub_bus())),
    )
}

#[test]
fn sides_start_on_complementary_banks() {
    let ga = GateArray::new();
    let (mut main, mut sub) = exchanges(&ga);
    assert_eq!(main.acquire().unwrap().bank(), BankId::ZERO);
    assert_eq!(sub.acquire().unwrap().bank(), BankId::ONE);
}

#[test]
fn full_exchange_with_hardware_steps() {
    let ga = GateArray::new();
    let (mut main, mut sub) = exchanges(&ga);
    let main_before = main.acquire().unwrap().bank();
    let sub_before = sub.acquire().unwrap().bank();

    // Main requests: its bit is set until the hardware steps.
    let mut pending = main.acquire().unwrap().begin_swap();
    assert_ne!(ga.peek_u16(MEM_MODE) & MEM_MODE_DMNA, 0);
    assert_eq!(pending.poll(), None);
    assert!(ga.step_hardware());
    assert_eq!(ga.peek_u16(MEM_MODE) & MEM_MODE_DMNA, 0);
    assert_eq!(pending.poll(), Some(sub_before));

    assert_eq!(main.acquire().unwrap().bank(), main_before.other());
    assert_eq!(sub.acquire().unwrap().bank(), sub_before.other());

    // Sub returns: symmetric.
    let mut pending = sub.acquire().unwrap().begin_swap();
    assert_ne!(ga.peek_u16(MEM_MODE) & MEM_MODE_RET, 0);
    assert_eq!(pending.released(), sub_before.other());
    assert_eq!(pending.poll(), None);
    assert!(ga.step_hardware());
    assert_eq!(pending.poll(), Some(sub_before));

    assert_eq!(main.acquire().unwrap().bank(), main_before);
}

#[test]
fn acquire_fails_while_own_swap_is_pending() {
    let ga = GateArray::new();
    let (_, mut sub) = exchanges(&ga);
    let pending = sub.acquire().unwrap().begin_swap();
    drop(pending);
    assert_eq!(sub.acquire().err(), Some(LinkError::SwapPending));
    ga.step_hardware();
    assert_eq!(sub.acquire().unwrap().bank(), BankId::ZERO);
}

#[test]
fn published_bytes_reach_the_other_side() {
    let ga = GateArray::with_auto_swap();
    let (mut main, mut sub) = exchanges(&ga);

    let mut grant = sub.acquire().unwrap();
    grant.with_bytes(|bytes| bytes[..4].copy_from_slice(b"GS1!"));
    let now = grant.return_bank();
    assert_eq!(now, BankId::ZERO);

    let mut grant = main.acquire().unwrap();
    assert_eq!(grant.bank(), BankId::ONE);
    grant.with_bytes(|bytes| assert_eq!(&bytes[..4], b"GS1!"));
}

#[test]
fn request_swap_blocks_until_hardware_steps() {
    let ga = GateArray::new();
    let (mut main, _) = exchanges(&ga);
    let stepper = {
        let ga = Arc::clone(&ga);
        std::thread::spawn(move || {
            while !ga.step_hardware() {
                std::thread::yield_now();
            }
        })
    };
    let bank = main.acquire().unwrap().request_swap();
    stepper.join().unwrap();
    assert_eq!(bank, BankId::ONE);
}

#[test]
fn bounded_swap_wait_times_out_without_hardware() {
    let ga = GateArray::new();
    let (_, mut sub) = exchanges(&ga);
    let mut pending = sub.acquire().unwrap().begin_swap();
    assert_eq!(
        bounded::wait_swap(&mut pending, SpinBudget::new(100)),
        Err(LinkError::Timeout)
    );
    ga.step_hardware();
    assert_eq!(
        bounded::wait_swap(&mut pending, SpinBudget::new(1)),
        Ok(BankId::ZERO)
    );
}
