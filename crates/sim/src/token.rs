//! Settlement token ledger

use std::collections::HashMap;

use backstop_common::*;
use backstop_insurance::SettlementToken;
use model_safety::math::add_u128;

use crate::journal::{Journal, Journaled};

#[derive(Debug, Clone, Default)]
pub struct TokenLedger {
    pub balances: HashMap<Pubkey, u128>,
    pub allowances: HashMap<(Pubkey, Pubkey), u128>,
    pub supply: u128,
}

/// Fungible token with approve / transfer_from semantics.
///
/// `approve` sets the allowance outright. Balances never go negative:
/// a transfer larger than the balance fails with `InsufficientBalance`.
#[derive(Debug)]
pub struct SimToken {
    id: Pubkey,
    decimals: u8,
    ledger: Journaled<TokenLedger>,
}

impl SimToken {
    pub fn new(id: Pubkey, decimals: u8) -> Self {
        Self {
            id,
            decimals,
            ledger: Journaled::new(TokenLedger::default()),
        }
    }

    pub fn id(&self) -> Pubkey {
        self.id
    }

    pub fn total_supply(&self) -> u128 {
        self.ledger.borrow().supply
    }

    /// Create `amount` new tokens in `to`
    pub fn mint(&self, to: &Pubkey, amount: u128) -> BackstopResult<()> {
        let mut ledger = self.ledger.borrow_mut();
        ledger.supply = ledger.supply.checked_add(amount).ok_or(BackstopError::Overflow)?;
        let balance = ledger.balances.entry(*to).or_default();
        *balance = add_u128(*balance, amount);
        Ok(())
    }

    /// Sum of all balances; equals total supply on a consistent ledger
    pub fn sum_of_balances(&self) -> u128 {
        self.ledger
            .borrow()
            .balances
            .values()
            .fold(0u128, |acc, b| acc.saturating_add(*b))
    }
}

impl Journal for SimToken {
    fn checkpoint(&self) {
        self.ledger.checkpoint()
    }

    fn commit(&self) {
        self.ledger.commit()
    }

    fn revert(&self) {
        self.ledger.revert()
    }
}

impl SettlementToken for SimToken {
    fn decimals(&self) -> u8 {
        self.decimals
    }

    fn balance_of(&self, account: &Pubkey) -> u128 {
        self.ledger.borrow().balances.get(account).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u128 {
        self.ledger
            .borrow()
            .allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    fn approve(&self, owner: &Pubkey, spender: &Pubkey, amount: u128) -> BackstopResult<()> {
        self.ledger
            .borrow_mut()
            .allowances
            .insert((*owner, *spender), amount);
        log::debug!(
            "token {}: {} approved {} for {}",
            fmt_key(&self.id),
            fmt_key(owner),
            amount,
            fmt_key(spender)
        );
        Ok(())
    }

    fn transfer(&self, from: &Pubkey, to: &Pubkey, amount: u128) -> BackstopResult<()> {
        let mut ledger = self.ledger.borrow_mut();
        let from_balance = ledger.balances.get(from).copied().unwrap_or(0);
        if from_balance < amount {
            log::warn!(
                "token {}: {} holds {}, cannot send {}",
                fmt_key(&self.id),
                fmt_key(from),
                from_balance,
                amount
            );
            return Err(BackstopError::InsufficientBalance);
        }
        ledger.balances.insert(*from, from_balance - amount);
        let to_balance = ledger.balances.entry(*to).or_default();
        *to_balance = to_balance.checked_add(amount).ok_or(BackstopError::Overflow)?;
        Ok(())
    }

    fn transfer_from(&self, spender: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u128) -> BackstopResult<()> {
        let allowed = self.allowance(from, spender);
        if allowed < amount {
            return Err(BackstopError::InsufficientAllowance);
        }
        self.transfer(from, to, amount)?;
        self.ledger
            .borrow_mut()
            .allowances
            .insert((*from, *spender), allowed - amount);
        Ok(())
    }
}
