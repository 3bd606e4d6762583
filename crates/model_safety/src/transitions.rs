//! State transition functions - all total, no panics
//!
//! A rejected call returns the input state unchanged, which models the
//! all-or-nothing rollback of a failed top-level call.

use crate::fund;
use crate::math::*;
use crate::state::*;

/// Cover the fund's vault deficit from its wallet
pub fn repay(mut s: State) -> State {
    if s.paused {
        return s;
    }

    let amount = match fund::repay_amount(s.settlement_value(), s.wallet) {
        Some(amount) => amount,
        None => return s,
    };

    // Approve-then-pull: wallet moves into vault collateral
    s.wallet = sub_u128(s.wallet, amount);
    s.vault_settlement = add_u128(s.vault_settlement, amount);

    s
}

/// Release surplus above the threshold to the beneficiary
pub fn distribute_fee(mut s: State) -> State {
    if s.paused || !s.params.beneficiary_set || s.params.threshold == 0 {
        return s;
    }

    let surplus = fund::surplus(s.capacity(), s.params.threshold, s.free_collateral());
    if surplus == 0 {
        return s;
    }

    // Withdraw to wallet, then forward to the beneficiary
    s.vault_settlement = sub_u128(s.vault_settlement, surplus);
    s.wallet = add_u128(s.wallet, surplus);
    s.wallet = sub_u128(s.wallet, surplus);
    s.beneficiary = add_u128(s.beneficiary, surplus);

    s
}

/// Bad debt socialized onto the fund's vault account
pub fn realize_bad_debt(mut s: State, amount: u128) -> State {
    s.pnl = sub_i128(s.pnl, u128_to_i128(amount));
    s
}

/// Fee income credited to the fund's wallet
pub fn accrue_fees(mut s: State, amount: u128) -> State {
    s.wallet = add_u128(s.wallet, amount);
    s
}
