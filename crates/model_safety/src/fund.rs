//! Insurance fund formulas
//!
//! These are the only places capacity, repayment and surplus are computed.
//! The on-chain instruction processors and the keeper planner both call
//! into this module so the two can never disagree.

use crate::math::*;

/// Total backstop capital: vault settlement value plus wallet balance.
///
/// May be negative when the vault-side deficit exceeds the wallet.
/// None only when the sum does not fit in i128.
pub fn capacity(settlement_value: i128, wallet_balance: u128) -> Option<i128> {
    checked_add_i128_u128(settlement_value, wallet_balance)
}

/// Amount the fund repays into the vault.
///
/// None when there is no deficit (settlement value >= 0), otherwise
/// `min(wallet_balance, |settlement_value|)`.
pub fn repay_amount(settlement_value: i128, wallet_balance: u128) -> Option<u128> {
    if settlement_value >= 0 {
        return None;
    }
    let deficit = settlement_value.unsigned_abs();
    Some(min_u128(wallet_balance, deficit))
}

/// Capital above the configured floor, `max(capacity - threshold, 0)`
pub fn over_threshold(capacity: i128, threshold: u128) -> u128 {
    clamp_pos_i128(sub_i128(capacity, u128_to_i128(threshold)))
}

/// Distributable surplus, `min(max(capacity - threshold, 0), free_collateral)`.
///
/// Capacity may include non-settlement collateral while free collateral
/// only counts the settlement token, so meeting the threshold does not
/// imply a non-zero surplus. Keep it that way.
pub fn surplus(capacity: i128, threshold: u128, free_collateral: u128) -> u128 {
    min_u128(over_threshold(capacity, threshold), free_collateral)
}
