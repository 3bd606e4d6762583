//! Decide what the fund needs from a snapshot of its state

use model_safety::fund::{capacity, repay_amount, surplus};
use serde::Serialize;

/// Everything the planner needs, read in one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FundSnapshot {
    pub settlement_value: i128,
    pub wallet: u128,
    pub free_collateral: u128,
    pub threshold: u128,
    pub beneficiary_set: bool,
    pub paused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Repay { amount: u128 },
    DistributeFee { surplus: u128 },
    Idle,
}

/// Repay takes priority: a fund in deficit never distributes.
///
/// A deficit the wallet cannot touch (empty wallet) is left alone; the
/// call would succeed but move nothing.
pub fn plan(s: &FundSnapshot) -> Action {
    if s.paused {
        return Action::Idle;
    }

    if s.settlement_value < 0 {
        return match repay_amount(s.settlement_value, s.wallet) {
            Some(amount) if amount > 0 => Action::Repay { amount },
            _ => Action::Idle,
        };
    }

    if !s.beneficiary_set || s.threshold == 0 {
        return Action::Idle;
    }
    let Some(cap) = capacity(s.settlement_value, s.wallet) else {
        return Action::Idle;
    };
    match surplus(cap, s.threshold, s.free_collateral) {
        0 => Action::Idle,
        surplus => Action::DistributeFee { surplus },
    }
}
