//! Collaborator interfaces
//!
//! Every external call the fund makes goes through one of these traits.
//! Calls are synchronous and may reenter the fund; methods take `&self`
//! and collaborators keep their own interior mutability.

use backstop_common::{BackstopResult, Pubkey};

use crate::events::FundEvent;

/// Fungible settlement token ledger
pub trait SettlementToken {
    fn decimals(&self) -> u8;

    fn balance_of(&self, account: &Pubkey) -> u128;

    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u128;

    /// Set (not add to) `spender`'s allowance over `owner`'s balance
    fn approve(&self, owner: &Pubkey, spender: &Pubkey, amount: u128) -> BackstopResult<()>;

    fn transfer(&self, from: &Pubkey, to: &Pubkey, amount: u128) -> BackstopResult<()>;

    /// Move `amount` on behalf of `from`, consuming `spender`'s allowance
    fn transfer_from(
        &self,
        spender: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u128,
    ) -> BackstopResult<()>;
}

/// Margin vault the fund backstops (the fund's "borrower")
pub trait Vault {
    /// Net settlement-token value of an account's collateral and positions
    fn settlement_token_value(&self, account: &Pubkey) -> BackstopResult<i128>;

    /// Amount of `token` the account could withdraw right now
    fn free_collateral_by_token(&self, account: &Pubkey, token: &Pubkey) -> BackstopResult<u128>;

    /// Pull `amount` of `token` from `caller` (prior approval required) and
    /// credit the caller's vault account
    fn deposit(&self, host: &dyn Host, caller: &Pubkey, token: &Pubkey, amount: u128) -> BackstopResult<()>;

    /// Send `amount` of `token` from the caller's vault account to the caller
    fn withdraw(&self, host: &dyn Host, caller: &Pubkey, token: &Pubkey, amount: u128) -> BackstopResult<()>;
}

/// Recipient of distributed surplus
pub trait SurplusBeneficiary {
    /// Token the beneficiary expects to receive
    fn token(&self) -> Pubkey;

    /// Route funds that just arrived (e.g. to stakers)
    fn dispatch(&self, host: &dyn Host) -> BackstopResult<()>;
}

/// Execution environment: resolves identifiers to contracts and records events.
pub trait Host {
    /// True when `account` holds code (a token, vault, beneficiary or fund)
    fn is_contract(&self, account: &Pubkey) -> bool;

    fn token(&self, id: &Pubkey) -> BackstopResult<&dyn SettlementToken>;

    fn vault(&self, id: &Pubkey) -> BackstopResult<&dyn Vault>;

    fn beneficiary(&self, id: &Pubkey) -> BackstopResult<&dyn SurplusBeneficiary>;

    fn emit(&self, event: FundEvent);
}
