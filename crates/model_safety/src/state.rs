//! Pure state model of the fund and its vault account

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub threshold: u128,
    pub beneficiary_set: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub wallet: u128,            // Fund's own settlement token balance
    pub vault_settlement: u128,  // Settlement token collateral held by the vault for the fund
    pub vault_other_value: u128, // Non-settlement collateral, valued in settlement units
    pub pnl: i128,               // Realized PnL / socialized bad debt on the fund's vault account
    pub beneficiary: u128,       // Beneficiary's settlement token balance
    pub params: Params,
    pub paused: bool,
}

impl State {
    /// Vault-reported settlement value of the fund's account
    pub fn settlement_value(&self) -> i128 {
        let collateral = crate::math::add_u128(self.vault_settlement, self.vault_other_value);
        crate::math::u128_to_i128(collateral).saturating_add(self.pnl)
    }

    /// Settlement token the vault lets the fund withdraw right now
    pub fn free_collateral(&self) -> u128 {
        let value = crate::math::clamp_pos_i128(self.settlement_value());
        crate::math::min_u128(self.vault_settlement, value)
    }

    /// Wallet plus vault settlement value
    pub fn capacity(&self) -> i128 {
        self.settlement_value()
            .saturating_add(crate::math::u128_to_i128(self.wallet))
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            threshold: 1_000,
            beneficiary_set: true,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self {
            wallet: 0,
            vault_settlement: 0,
            vault_other_value: 0,
            pnl: 0,
            beneficiary: 0,
            params: Params::default(),
            paused: false,
        }
    }
}
