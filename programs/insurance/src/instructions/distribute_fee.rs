//! Distribute fee instruction - release capital above the threshold

use backstop_common::*;
use model_safety::fund::surplus;

use crate::events::{FeeDistributed, FundEvent};
use crate::fund::InsuranceFund;
use crate::instructions::capacity::read_capacity_inputs;
use crate::interfaces::Host;

/// Process distribute fee instruction
///
/// `surplus = min(max(capacity - threshold, 0), free_collateral)` is
/// withdrawn from the vault, sent to the surplus beneficiary, and the
/// beneficiary is told to dispatch it.
///
/// Capacity counts every collateral the vault values while free
/// collateral only counts the settlement token, so a fund above its
/// threshold can still have nothing to distribute.
///
/// # Arguments
/// * `fund` - The fund; must be Active and not already inside a call
/// * `host` - Resolves the vault, token and beneficiary
pub fn process_distribute_fee(fund: &InsuranceFund, host: &dyn Host) -> Result<FeeDistributed, BackstopError> {
    let _guard = fund.gate().enter()?;
    let config = fund.config();
    let me = fund.address();

    if is_zero(&config.surplus_beneficiary()) {
        log::warn!("distribute_fee: fund {} has no surplus beneficiary", fmt_key(&me));
        return Err(BackstopError::SurplusBeneficiaryZero);
    }
    let threshold = config.threshold();
    if threshold == 0 {
        log::warn!("distribute_fee: fund {} threshold is zero", fmt_key(&me));
        return Err(BackstopError::ThresholdZero);
    }
    if !config.has_borrower() {
        return Err(BackstopError::BorrowerNotSet);
    }

    // Reads
    let vault = host.vault(&config.borrower())?;
    let free_collateral = vault.free_collateral_by_token(&me, &config.token())?;
    let capacity = read_capacity_inputs(fund, host, &config)?.capacity()?;
    let amount = surplus(capacity, threshold, free_collateral);

    log::debug!(
        "distribute_fee: capacity {}, threshold {}, free collateral {}, surplus {}",
        capacity,
        threshold,
        free_collateral,
        amount
    );
    if amount == 0 {
        return Err(BackstopError::NoSurplus);
    }

    // Writes
    vault.withdraw(host, &me, &config.token(), amount)?;
    host.token(&config.token())?
        .transfer(&me, &config.surplus_beneficiary(), amount)?;
    host.beneficiary(&config.surplus_beneficiary())?.dispatch(host)?;

    let distributed = FeeDistributed {
        fund: me,
        surplus: amount,
        insurance_fund_capacity: capacity,
        insurance_fund_free_collateral: free_collateral,
        threshold,
    };
    log::info!(
        "fund {}: distributed {} to {}",
        fmt_key(&me),
        amount,
        fmt_key(&config.surplus_beneficiary())
    );
    host.emit(FundEvent::FeeDistributed(distributed.clone()));
    Ok(distributed)
}
