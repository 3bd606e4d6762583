//! Kani safety proofs for the insurance fund invariants

use kani::{any, assume};
use model_safety::{fund::*, helpers::*, transitions::*};
use crate::{adversary::*, sanitizer::*, generators::*};

/// Capacity is exactly vault value plus wallet, negative included
#[kani::proof]
fn capacity_is_additive() {
    let value: i64 = any();
    let wallet: u64 = any();

    let cap = capacity(value as i128, wallet as u128);
    kani::assert(cap == Some(value as i128 + wallet as i128), "capacity must equal V + B");
}

/// Repay never runs without a deficit
#[kani::proof]
fn repay_requires_negative_value() {
    let value: i128 = any();
    let wallet: u128 = any();
    assume(value >= 0);

    kani::assert(repay_amount(value, wallet).is_none(), "non-negative value must not repay");
}

/// Repay pays min(wallet, |value|) for every negative value, i128::MIN included
#[kani::proof]
fn repay_amount_is_min_of_wallet_and_deficit() {
    let value: i128 = any();
    let wallet: u128 = any();
    assume(value < 0);

    let amount = repay_amount(value, wallet);
    let deficit = value.unsigned_abs();
    let expected = if wallet < deficit { wallet } else { deficit };
    kani::assert(amount == Some(expected), "repay amount must be min(wallet, deficit)");
}

/// Surplus is bounded by both the excess over threshold and free collateral
#[kani::proof]
fn surplus_double_cap() {
    let cap: i64 = any();
    let threshold: u64 = any();
    let free: u64 = any();

    let out = surplus(cap as i128, threshold as u128, free as u128);
    kani::assert(out <= free as u128, "surplus must not exceed free collateral");
    let excess = cap as i128 - threshold as i128;
    if excess <= 0 {
        kani::assert(out == 0, "no surplus at or below threshold");
    } else {
        kani::assert(out <= excess as u128, "surplus must not exceed capacity - threshold");
    }
}

/// Repay and distribution only move tokens between holders
#[kani::proof]
fn fund_calls_conserve_tokens() {
    let s = any_state_bounded().sanitize();
    let before = s.clone();

    let after = repay(s.clone());
    kani::assert(tokens_conserved(&before, &after), "repay must conserve tokens");
    kani::assert(repay_bounded(&before, &after), "repay must be bounded");

    let after = distribute_fee(s);
    kani::assert(tokens_conserved(&before, &after), "distribution must conserve tokens");
    kani::assert(threshold_respected(&before, &after), "distribution must leave capacity >= threshold");
    kani::assert(liquidity_respected(&before, &after), "distribution must stay within free collateral");
}

/// A second distribution right after a successful one is a no-op
#[kani::proof]
fn second_distribution_is_noop() {
    let s = any_state_bounded().sanitize();

    let once = distribute_fee(s);
    let twice = distribute_fee(once.clone());
    kani::assert(once == twice, "second distribution must change nothing");
}

/// Paused or unconfigured funds never move tokens
#[kani::proof]
fn gated_calls_change_nothing() {
    let mut s = any_state_bounded().sanitize();
    let paused: bool = any();
    let unset: bool = any();
    assume(paused || unset);
    s.paused = paused;
    if unset {
        s.params.beneficiary_set = false;
    }

    let before = s.clone();
    kani::assert(distribute_fee(s.clone()) == before, "gated distribution must be a no-op");
    if paused {
        kani::assert(repay(s) == before, "paused repay must be a no-op");
    }
}

/// Conservation across short adversarial sequences (fees and bad debt excluded)
#[kani::proof]
#[kani::unwind(5)]
fn conservation_across_sequences() {
    let mut s = any_state_bounded().sanitize();
    let start = total_tokens(&s);

    let mut steps: u8 = any();
    steps = (steps % MAX_STEPS) + 1;

    for _ in 0..steps {
        let step: Step = any();
        assume(matches!(step, Step::Repay | Step::Distribute | Step::TogglePause | Step::BadDebt));
        s = apply(s, step, any());
    }
    kani::assert(total_tokens(&s) == start, "token total must be unchanged");
}
