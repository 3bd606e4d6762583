//! State space sanitizer - bounds values for Kani exploration

use model_safety::state::*;

pub const MAX_STEPS: u8 = 4;

/// Bounds for tractable verification
const MAX_WALLET: u128 = 1_000_000u128;
const MAX_COLLATERAL: u128 = 10_000_000u128;
const MAX_PNL_ABS: i128 = 10_000_000i128;
const MAX_THRESHOLD: u128 = 10_000_000u128;

pub trait Sanitize {
    fn sanitize(self) -> Self;
}

fn bound(x: u128, max: u128) -> u128 {
    if x > max {
        x % max
    } else {
        x
    }
}

impl Sanitize for State {
    fn sanitize(mut self) -> State {
        self.wallet = bound(self.wallet, MAX_WALLET);
        self.vault_settlement = bound(self.vault_settlement, MAX_COLLATERAL);
        self.vault_other_value = bound(self.vault_other_value, MAX_COLLATERAL);
        self.beneficiary = bound(self.beneficiary, MAX_COLLATERAL);
        self.pnl = self.pnl.clamp(-MAX_PNL_ABS, MAX_PNL_ABS);
        self.params.threshold = bound(self.params.threshold, MAX_THRESHOLD);
        self
    }
}
