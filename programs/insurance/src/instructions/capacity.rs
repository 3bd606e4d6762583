//! Capacity query - vault settlement value plus wallet balance

use backstop_common::*;
use model_safety::fund::capacity;

use crate::fund::InsuranceFund;
use crate::interfaces::Host;
use crate::state::FundConfig;

/// Inputs read from collaborators for one capacity computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityInputs {
    pub settlement_value: i128,
    pub wallet_balance: u128,
}

impl CapacityInputs {
    pub fn capacity(&self) -> Result<i128, BackstopError> {
        capacity(self.settlement_value, self.wallet_balance).ok_or(BackstopError::Overflow)
    }
}

/// Read the fund's vault value and wallet balance against a config snapshot
pub fn read_capacity_inputs(
    fund: &InsuranceFund,
    host: &dyn Host,
    config: &FundConfig,
) -> Result<CapacityInputs, BackstopError> {
    if !config.has_borrower() {
        return Err(BackstopError::BorrowerNotSet);
    }
    let me = fund.address();
    let settlement_value = host.vault(&config.borrower())?.settlement_token_value(&me)?;
    let wallet_balance = host.token(&config.token())?.balance_of(&me);

    log::debug!(
        "fund {}: settlement value {}, wallet {}",
        fmt_key(&me),
        settlement_value,
        wallet_balance
    );
    Ok(CapacityInputs {
        settlement_value,
        wallet_balance,
    })
}

/// Process capacity query
///
/// Pure read; allowed while paused. Negative results are meaningful.
pub fn process_capacity(fund: &InsuranceFund, host: &dyn Host) -> Result<i128, BackstopError> {
    fund.gate().require_initialized()?;
    let config = fund.config();
    read_capacity_inputs(fund, host, &config)?.capacity()
}
