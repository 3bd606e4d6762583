//! Initialize instruction - bind the fund to its settlement token

use backstop_common::*;

use crate::events::FundEvent;
use crate::fund::InsuranceFund;
use crate::interfaces::Host;

/// Process initialize instruction
///
/// Fixes the settlement token forever and makes `caller` the owner.
/// Can only succeed once per fund.
///
/// # Arguments
/// * `fund` - The fund being initialized
/// * `host` - Execution environment used for the contract check
/// * `caller` - Becomes the owner
/// * `token` - Settlement token; must be a contract
pub fn process_initialize(
    fund: &InsuranceFund,
    host: &dyn Host,
    caller: &Pubkey,
    token: Pubkey,
) -> Result<(), BackstopError> {
    fund.gate().require_uninitialized()?;

    if is_zero(&token) || !host.is_contract(&token) {
        log::warn!("initialize: token {} is not a contract", fmt_key(&token));
        return Err(BackstopError::TokenNotContract);
    }

    *fund.config_mut() = crate::state::FundConfig::new(token);
    *fund.ownership_mut() = Ownership::new(*caller);
    fund.gate().activate()?;

    log::info!(
        "fund {} initialized: token {}, owner {}",
        fmt_key(&fund.address()),
        fmt_key(&token),
        fmt_key(caller)
    );
    host.emit(FundEvent::Initialized {
        fund: fund.address(),
        token,
        owner: *caller,
    });
    Ok(())
}
