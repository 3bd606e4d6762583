//! Fund configuration

use backstop_common::{is_zero, serde_key, Pubkey, ZERO_KEY};
use serde::{Deserialize, Serialize};

/// The four persisted scalars of an insurance fund.
///
/// `token` is written once by initialization. The rest are replaced in
/// place by owner calls after their arguments have been validated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FundConfig {
    #[serde(with = "serde_key")]
    token: Pubkey,
    #[serde(with = "serde_key")]
    borrower: Pubkey,
    threshold: u128,
    #[serde(with = "serde_key")]
    surplus_beneficiary: Pubkey,
}

impl FundConfig {
    pub fn new(token: Pubkey) -> Self {
        Self {
            token,
            borrower: ZERO_KEY,
            threshold: 0,
            surplus_beneficiary: ZERO_KEY,
        }
    }

    pub fn token(&self) -> Pubkey {
        self.token
    }

    pub fn borrower(&self) -> Pubkey {
        self.borrower
    }

    pub fn threshold(&self) -> u128 {
        self.threshold
    }

    pub fn surplus_beneficiary(&self) -> Pubkey {
        self.surplus_beneficiary
    }

    pub fn has_borrower(&self) -> bool {
        !is_zero(&self.borrower)
    }

    pub fn set_borrower(&mut self, borrower: Pubkey) {
        self.borrower = borrower;
    }

    pub fn set_threshold(&mut self, threshold: u128) {
        self.threshold = threshold;
    }

    pub fn set_surplus_beneficiary(&mut self, beneficiary: Pubkey) {
        self.surplus_beneficiary = beneficiary;
    }
}
