//! Repay instruction - cover the fund's vault deficit from its wallet

use backstop_common::*;
use model_safety::fund::repay_amount;

use crate::events::{FundEvent, Repaid};
use crate::fund::InsuranceFund;
use crate::instructions::capacity::read_capacity_inputs;
use crate::interfaces::Host;

/// Process repay instruction
///
/// Pays `min(wallet, deficit)` into the borrower vault. Partial coverage
/// is not an error; the residual deficit stays in the vault.
///
/// # Arguments
/// * `fund` - The fund; must be Active and not already inside a call
/// * `host` - Resolves the borrower vault and settlement token
pub fn process_repay(fund: &InsuranceFund, host: &dyn Host) -> Result<Repaid, BackstopError> {
    let _guard = fund.gate().enter()?;
    let config = fund.config();
    let me = fund.address();

    let inputs = read_capacity_inputs(fund, host, &config)?;
    let amount = match repay_amount(inputs.settlement_value, inputs.wallet_balance) {
        Some(amount) => amount,
        None => {
            log::warn!(
                "repay: fund {} settlement value {} is not negative",
                fmt_key(&me),
                inputs.settlement_value
            );
            return Err(BackstopError::RepayWhenNonNegative);
        }
    };

    let token = host.token(&config.token())?;
    if amount > 0 {
        token.approve(&me, &config.borrower(), amount)?;
        host.vault(&config.borrower())?
            .deposit(host, &me, &config.token(), amount)?;
    }

    let repaid = Repaid {
        fund: me,
        repaid_amount: amount,
        token_balance_after: token.balance_of(&me),
    };
    log::info!(
        "fund {}: repaid {} of deficit {}, wallet now {}",
        fmt_key(&me),
        amount,
        inputs.settlement_value.unsigned_abs(),
        repaid.token_balance_after
    );
    host.emit(FundEvent::Repaid(repaid.clone()));
    Ok(repaid)
}
