//! Owner instructions - configuration setters, pause switch, ownership
//!
//! Every setter validates its argument before touching the stored
//! configuration, so a rejected call leaves the fund unchanged. Setters
//! stay available while the fund is paused.

use backstop_common::*;

use crate::events::FundEvent;
use crate::fund::InsuranceFund;
use crate::interfaces::Host;

fn require_owner(fund: &InsuranceFund, caller: &Pubkey) -> Result<(), BackstopError> {
    fund.gate().require_initialized()?;
    fund.ownership().require_owner(caller)
}

/// Point the fund at a new vault
pub fn process_set_borrower(
    fund: &InsuranceFund,
    host: &dyn Host,
    caller: &Pubkey,
    borrower: Pubkey,
) -> Result<(), BackstopError> {
    require_owner(fund, caller)?;
    if !host.is_contract(&borrower) {
        log::warn!("set_borrower: {} is not a contract", fmt_key(&borrower));
        return Err(BackstopError::BorrowerNotContract);
    }

    fund.config_mut().set_borrower(borrower);
    log::info!("fund {}: borrower set to {}", fmt_key(&fund.address()), fmt_key(&borrower));
    host.emit(FundEvent::BorrowerChanged {
        fund: fund.address(),
        borrower,
    });
    Ok(())
}

/// Replace the distribution threshold. Zero is accepted and disables
/// distribution until a positive value is set.
pub fn process_set_threshold(
    fund: &InsuranceFund,
    host: &dyn Host,
    caller: &Pubkey,
    threshold: u128,
) -> Result<(), BackstopError> {
    require_owner(fund, caller)?;

    fund.config_mut().set_threshold(threshold);
    log::info!("fund {}: threshold set to {}", fmt_key(&fund.address()), threshold);
    host.emit(FundEvent::ThresholdChanged {
        fund: fund.address(),
        threshold,
    });
    Ok(())
}

/// Replace the surplus beneficiary; it must accept the fund's token
pub fn process_set_surplus_beneficiary(
    fund: &InsuranceFund,
    host: &dyn Host,
    caller: &Pubkey,
    beneficiary: Pubkey,
) -> Result<(), BackstopError> {
    require_owner(fund, caller)?;
    if !host.is_contract(&beneficiary) {
        log::warn!("set_surplus_beneficiary: {} is not a contract", fmt_key(&beneficiary));
        return Err(BackstopError::BeneficiaryNotContract);
    }

    let expected = fund.token();
    let actual = host.beneficiary(&beneficiary)?.token();
    if actual != expected {
        log::warn!(
            "set_surplus_beneficiary: beneficiary token {} != fund token {}",
            fmt_key(&actual),
            fmt_key(&expected)
        );
        return Err(BackstopError::TokenMismatch);
    }

    fund.config_mut().set_surplus_beneficiary(beneficiary);
    log::info!(
        "fund {}: surplus beneficiary set to {}",
        fmt_key(&fund.address()),
        fmt_key(&beneficiary)
    );
    host.emit(FundEvent::SurplusBeneficiaryChanged {
        fund: fund.address(),
        beneficiary,
    });
    Ok(())
}

pub fn process_pause(fund: &InsuranceFund, host: &dyn Host, caller: &Pubkey) -> Result<(), BackstopError> {
    require_owner(fund, caller)?;
    fund.gate().pause()?;

    log::info!("fund {}: paused by {}", fmt_key(&fund.address()), fmt_key(caller));
    host.emit(FundEvent::Paused {
        fund: fund.address(),
        account: *caller,
    });
    Ok(())
}

pub fn process_unpause(fund: &InsuranceFund, host: &dyn Host, caller: &Pubkey) -> Result<(), BackstopError> {
    require_owner(fund, caller)?;
    fund.gate().unpause()?;

    log::info!("fund {}: unpaused by {}", fmt_key(&fund.address()), fmt_key(caller));
    host.emit(FundEvent::Unpaused {
        fund: fund.address(),
        account: *caller,
    });
    Ok(())
}

/// Candidate accepts ownership
pub fn process_update_owner(fund: &InsuranceFund, host: &dyn Host, caller: &Pubkey) -> Result<(), BackstopError> {
    let owner = fund.ownership_mut().update_owner(caller)?;

    log::info!("fund {}: owner is now {}", fmt_key(&fund.address()), fmt_key(&owner));
    host.emit(FundEvent::OwnerChanged {
        fund: fund.address(),
        owner,
    });
    Ok(())
}

/// Leaves the fund without an owner; every owner call fails afterwards
pub fn process_renounce_ownership(
    fund: &InsuranceFund,
    host: &dyn Host,
    caller: &Pubkey,
) -> Result<(), BackstopError> {
    fund.gate().require_initialized()?;
    fund.ownership_mut().renounce(caller)?;

    log::info!("fund {}: ownership renounced", fmt_key(&fund.address()));
    host.emit(FundEvent::OwnerChanged {
        fund: fund.address(),
        owner: ZERO_KEY,
    });
    Ok(())
}
