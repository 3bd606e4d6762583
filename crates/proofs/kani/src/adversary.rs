//! Adversarial step generator

#[cfg(kani)]
use kani::any;
use model_safety::{state::*, transitions::*};

#[derive(Clone, Copy, Debug)]
pub enum Step {
    Repay,
    Distribute,
    BadDebt,
    Fees,
    TogglePause,
}

#[cfg(kani)]
impl kani::Arbitrary for Step {
    fn any() -> Self {
        let choice: u8 = any();
        match choice % 5 {
            0 => Step::Repay,
            1 => Step::Distribute,
            2 => Step::BadDebt,
            3 => Step::Fees,
            _ => Step::TogglePause,
        }
    }
}

/// Apply one step with a bounded amount
pub fn apply(s: State, step: Step, amount: u8) -> State {
    match step {
        Step::Repay => repay(s),
        Step::Distribute => distribute_fee(s),
        Step::BadDebt => realize_bad_debt(s, amount as u128),
        Step::Fees => accrue_fees(s, amount as u128),
        Step::TogglePause => State {
            paused: !s.paused,
            ..s
        },
    }
}
