//! Generators for arbitrary state (for Kani)

#[cfg(kani)]
use kani::any;
use model_safety::state::*;

// Small bounds keep the SAT instances fast
const MAX_VAL: u128 = 100;
const MAX_PNL: i128 = 100;

#[cfg(kani)]
pub fn any_params() -> Params {
    let threshold_raw: u8 = any();
    Params {
        threshold: (threshold_raw as u128) % (MAX_VAL * 2),
        beneficiary_set: any(),
    }
}

#[cfg(kani)]
pub fn any_state_bounded() -> State {
    let wallet_raw: u8 = any();
    let settlement_raw: u8 = any();
    let other_raw: u8 = any();
    let pnl_raw: i8 = any();
    let beneficiary_raw: u8 = any();

    State {
        wallet: (wallet_raw as u128) % MAX_VAL,
        vault_settlement: (settlement_raw as u128) % MAX_VAL,
        vault_other_value: (other_raw as u128) % MAX_VAL,
        pnl: (pnl_raw as i128).clamp(-MAX_PNL, MAX_PNL),
        beneficiary: (beneficiary_raw as u128) % MAX_VAL,
        params: any_params(),
        paused: any(),
    }
}

/// Deterministic state for the non-Kani build
pub fn fixture_state() -> State {
    State {
        wallet: 0,
        vault_settlement: 800,
        vault_other_value: 700,
        pnl: 0,
        beneficiary: 0,
        params: Params::default(),
        paused: false,
    }
}
