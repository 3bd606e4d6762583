//! Fund events
//!
//! Every committed mutation emits exactly one event through the host.
//! Events of a call that is rolled back are discarded with it.

use backstop_common::{serde_key, Pubkey};
use serde::{Deserialize, Serialize};

/// Outcome of a successful `repay`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repaid {
    #[serde(with = "serde_key")]
    pub fund: Pubkey,
    pub repaid_amount: u128,
    pub token_balance_after: u128,
}

/// Outcome of a successful `distribute_fee`; inputs as of computation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeDistributed {
    #[serde(with = "serde_key")]
    pub fund: Pubkey,
    pub surplus: u128,
    pub insurance_fund_capacity: i128,
    pub insurance_fund_free_collateral: u128,
    pub threshold: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundEvent {
    Initialized {
        #[serde(with = "serde_key")]
        fund: Pubkey,
        #[serde(with = "serde_key")]
        token: Pubkey,
        #[serde(with = "serde_key")]
        owner: Pubkey,
    },
    BorrowerChanged {
        #[serde(with = "serde_key")]
        fund: Pubkey,
        #[serde(with = "serde_key")]
        borrower: Pubkey,
    },
    ThresholdChanged {
        #[serde(with = "serde_key")]
        fund: Pubkey,
        threshold: u128,
    },
    SurplusBeneficiaryChanged {
        #[serde(with = "serde_key")]
        fund: Pubkey,
        #[serde(with = "serde_key")]
        beneficiary: Pubkey,
    },
    Paused {
        #[serde(with = "serde_key")]
        fund: Pubkey,
        #[serde(with = "serde_key")]
        account: Pubkey,
    },
    Unpaused {
        #[serde(with = "serde_key")]
        fund: Pubkey,
        #[serde(with = "serde_key")]
        account: Pubkey,
    },
    OwnerChanged {
        #[serde(with = "serde_key")]
        fund: Pubkey,
        #[serde(with = "serde_key")]
        owner: Pubkey,
    },
    Repaid(Repaid),
    FeeDistributed(FeeDistributed),
}
