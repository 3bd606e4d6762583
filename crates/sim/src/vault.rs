//! Margin vault
//!
//! Accounts hold token balances, a realized PnL and an amount of
//! collateral locked by open positions. The settlement token counts at
//! face value; other collateral is valued through its base token index
//! price. Only settlement-token free collateral can be withdrawn as
//! settlement token, which is what the fund's surplus is gated on.

use std::collections::HashMap;

use backstop_common::*;
use backstop_insurance::{Host, Vault};
use backstop_oracle::BaseToken;
use model_safety::decimals::{normalize_decimals, pow10};
use model_safety::math::{clamp_pos_i128, min_u128, sub_u128};

use crate::journal::{Journal, Journaled};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaultAccount {
    pub balances: HashMap<Pubkey, u128>,
    /// Realized PnL in settlement units; bad debt is negative
    pub pnl: i128,
    /// Settlement value reserved by open positions
    pub locked: u128,
}

impl VaultAccount {
    pub fn balance(&self, token: &Pubkey) -> u128 {
        self.balances.get(token).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct VaultBook {
    pub accounts: HashMap<Pubkey, VaultAccount>,
}

/// Non-settlement collateral accepted by the vault
struct Collateral {
    token_decimals: u8,
    base: BaseToken,
}

pub struct SimVault {
    id: Pubkey,
    settlement_token: Pubkey,
    settlement_decimals: u8,
    collaterals: HashMap<Pubkey, Collateral>,
    twap_interval: u32,
    book: Journaled<VaultBook>,
}

impl SimVault {
    pub fn new(id: Pubkey, settlement_token: Pubkey, settlement_decimals: u8) -> Self {
        Self {
            id,
            settlement_token,
            settlement_decimals,
            collaterals: HashMap::new(),
            twap_interval: 0,
            book: Journaled::new(VaultBook::default()),
        }
    }

    pub fn id(&self) -> Pubkey {
        self.id
    }

    pub fn settlement_token(&self) -> Pubkey {
        self.settlement_token
    }

    /// Accept `token` as collateral, priced by `base`
    pub fn add_collateral(&mut self, token: Pubkey, token_decimals: u8, base: BaseToken) -> BackstopResult<()> {
        if pow10(token_decimals).is_none() {
            return Err(BackstopError::InvalidDecimals);
        }
        self.collaterals.insert(token, Collateral { token_decimals, base });
        log::info!("vault {}: collateral {} added", fmt_key(&self.id), fmt_key(&token));
        Ok(())
    }

    /// Averaging window for collateral index prices
    pub fn set_twap_interval(&mut self, interval: u32) {
        self.twap_interval = interval;
    }

    pub fn account(&self, account: &Pubkey) -> VaultAccount {
        self.book.borrow().accounts.get(account).cloned().unwrap_or_default()
    }

    pub fn balance_of(&self, account: &Pubkey, token: &Pubkey) -> u128 {
        self.account(account).balance(token)
    }

    /// Realize PnL into an account (negative for bad debt)
    pub fn settle_pnl(&self, account: &Pubkey, delta: i128) -> BackstopResult<()> {
        let mut book = self.book.borrow_mut();
        let entry = book.accounts.entry(*account).or_default();
        entry.pnl = entry.pnl.checked_add(delta).ok_or(BackstopError::Overflow)?;
        log::debug!("vault {}: pnl of {} now {}", fmt_key(&self.id), fmt_key(account), entry.pnl);
        Ok(())
    }

    pub fn set_locked(&self, account: &Pubkey, locked: u128) {
        self.book.borrow_mut().accounts.entry(*account).or_default().locked = locked;
    }

    /// Pull `amount` of `token` from `caller` into `to`'s account
    pub fn deposit_for(
        &self,
        host: &dyn Host,
        caller: &Pubkey,
        to: &Pubkey,
        token: &Pubkey,
        amount: u128,
    ) -> BackstopResult<()> {
        self.require_supported(token)?;
        host.token(token)?.transfer_from(&self.id, caller, &self.id, amount)?;

        let mut book = self.book.borrow_mut();
        let balance = book.accounts.entry(*to).or_default().balances.entry(*token).or_default();
        *balance = balance.checked_add(amount).ok_or(BackstopError::Overflow)?;
        log::info!(
            "vault {}: {} deposited {} of {} for {}",
            fmt_key(&self.id),
            fmt_key(caller),
            amount,
            fmt_key(token),
            fmt_key(to)
        );
        Ok(())
    }

    fn require_supported(&self, token: &Pubkey) -> BackstopResult<()> {
        if token == &self.settlement_token || self.collaterals.contains_key(token) {
            return Ok(());
        }
        Err(BackstopError::UnsupportedToken)
    }

    /// Value of `amount` of a collateral token in settlement units, floored
    fn collateral_value(&self, collateral: &Collateral, amount: u128) -> BackstopResult<u128> {
        let price = collateral.base.index_price(self.twap_interval)?;
        let in_price_decimals = amount
            .checked_mul(price)
            .and_then(|v| pow10(collateral.token_decimals).map(|unit| v / unit))
            .ok_or(BackstopError::Overflow)?;
        normalize_decimals(in_price_decimals, collateral.base.decimals(), self.settlement_decimals)
            .ok_or(BackstopError::Overflow)
    }

    fn account_value(&self, account: &VaultAccount) -> BackstopResult<i128> {
        let settlement = account.balance(&self.settlement_token);
        let mut value = i128::try_from(settlement).map_err(|_| BackstopError::Overflow)?;

        for (token, amount) in &account.balances {
            let Some(collateral) = self.collaterals.get(token) else {
                continue;
            };
            if *amount == 0 {
                continue;
            }
            let part = self.collateral_value(collateral, *amount)?;
            let part = i128::try_from(part).map_err(|_| BackstopError::Overflow)?;
            value = value.checked_add(part).ok_or(BackstopError::Overflow)?;
        }
        value.checked_add(account.pnl).ok_or(BackstopError::Overflow)
    }

    /// Settlement value not reserved by positions, `max(value - locked, 0)`
    fn free_value(&self, account: &VaultAccount) -> BackstopResult<u128> {
        let value = self.account_value(account)?;
        let locked = i128::try_from(account.locked).map_err(|_| BackstopError::Overflow)?;
        Ok(clamp_pos_i128(value.saturating_sub(locked)))
    }
}

impl Journal for SimVault {
    fn checkpoint(&self) {
        self.book.checkpoint()
    }

    fn commit(&self) {
        self.book.commit()
    }

    fn revert(&self) {
        self.book.revert()
    }
}

impl Vault for SimVault {
    fn settlement_token_value(&self, account: &Pubkey) -> BackstopResult<i128> {
        self.account_value(&self.account(account))
    }

    fn free_collateral_by_token(&self, account: &Pubkey, token: &Pubkey) -> BackstopResult<u128> {
        self.require_supported(token)?;
        let acct = self.account(account);
        let balance = acct.balance(token);
        let free_value = self.free_value(&acct)?;

        if token == &self.settlement_token {
            return Ok(min_u128(balance, free_value));
        }

        // Convert free settlement value back into collateral units
        let Some(collateral) = self.collaterals.get(token) else {
            return Err(BackstopError::UnsupportedToken);
        };
        let price = collateral.base.index_price(self.twap_interval)?;
        if price == 0 {
            return Ok(balance);
        }
        let units = normalize_decimals(free_value, self.settlement_decimals, collateral.base.decimals())
            .and_then(|v| pow10(collateral.token_decimals).and_then(|unit| v.checked_mul(unit)))
            .map(|v| v / price);
        Ok(units.map_or(balance, |units| min_u128(balance, units)))
    }

    fn deposit(&self, host: &dyn Host, caller: &Pubkey, token: &Pubkey, amount: u128) -> BackstopResult<()> {
        self.deposit_for(host, caller, caller, token, amount)
    }

    fn withdraw(&self, host: &dyn Host, caller: &Pubkey, token: &Pubkey, amount: u128) -> BackstopResult<()> {
        let free = self.free_collateral_by_token(caller, token)?;
        if amount > free {
            log::warn!(
                "vault {}: {} asked for {} with {} free",
                fmt_key(&self.id),
                fmt_key(caller),
                amount,
                free
            );
            return Err(BackstopError::InsufficientFreeCollateral);
        }

        {
            let mut book = self.book.borrow_mut();
            let balance = book.accounts.entry(*caller).or_default().balances.entry(*token).or_default();
            *balance = sub_u128(*balance, amount);
        }
        host.token(token)?.transfer(&self.id, caller, amount)?;
        log::info!(
            "vault {}: {} withdrew {} of {}",
            fmt_key(&self.id),
            fmt_key(caller),
            amount,
            fmt_key(token)
        );
        Ok(())
    }
}
