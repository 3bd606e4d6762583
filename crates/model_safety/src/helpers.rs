//! Invariant checking helpers

use crate::math::*;
use crate::state::*;

/// Settlement tokens across wallet, vault and beneficiary
pub fn total_tokens(s: &State) -> u128 {
    add_u128(add_u128(s.wallet, s.vault_settlement), s.beneficiary)
}

/// Repay and distribution only move tokens, never mint or burn them
pub fn tokens_conserved(before: &State, after: &State) -> bool {
    total_tokens(before) == total_tokens(after)
}

/// A distribution never takes capacity below the threshold
pub fn threshold_respected(before: &State, after: &State) -> bool {
    if after.beneficiary == before.beneficiary {
        return true;
    }
    after.capacity() >= u128_to_i128(before.params.threshold)
}

/// Distribution never withdraws more than was free before the call
pub fn liquidity_respected(before: &State, after: &State) -> bool {
    sub_u128(after.beneficiary, before.beneficiary) <= before.free_collateral()
}

/// Repay moves at most min(wallet, deficit)
pub fn repay_bounded(before: &State, after: &State) -> bool {
    let paid = sub_u128(before.wallet, after.wallet);
    let deficit = clamp_pos_i128(sub_i128(0, before.settlement_value()));
    paid <= before.wallet && paid <= deficit
}
