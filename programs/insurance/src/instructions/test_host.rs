//! In-memory collaborators for the instruction unit tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use backstop_common::*;

use crate::events::FundEvent;
use crate::fund::InsuranceFund;
use crate::interfaces::*;

#[derive(Default)]
pub struct MockToken {
    balances: RefCell<HashMap<Pubkey, u128>>,
    allowances: RefCell<HashMap<(Pubkey, Pubkey), u128>>,
}

impl MockToken {
    fn debit(&self, from: &Pubkey, amount: u128) -> BackstopResult<()> {
        let mut balances = self.balances.borrow_mut();
        let balance = balances.entry(*from).or_default();
        *balance = balance
            .checked_sub(amount)
            .ok_or(BackstopError::InsufficientBalance)?;
        Ok(())
    }

    fn credit(&self, to: &Pubkey, amount: u128) {
        *self.balances.borrow_mut().entry(*to).or_default() += amount;
    }
}

impl SettlementToken for MockToken {
    fn decimals(&self) -> u8 {
        6
    }

    fn balance_of(&self, account: &Pubkey) -> u128 {
        self.balances.borrow().get(account).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u128 {
        self.allowances.borrow().get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    fn approve(&self, owner: &Pubkey, spender: &Pubkey, amount: u128) -> BackstopResult<()> {
        self.allowances.borrow_mut().insert((*owner, *spender), amount);
        Ok(())
    }

    fn transfer(&self, from: &Pubkey, to: &Pubkey, amount: u128) -> BackstopResult<()> {
        self.debit(from, amount)?;
        self.credit(to, amount);
        Ok(())
    }

    fn transfer_from(&self, spender: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u128) -> BackstopResult<()> {
        let allowed = self.allowance(from, spender);
        if allowed < amount {
            return Err(BackstopError::InsufficientAllowance);
        }
        self.transfer(from, to, amount)?;
        self.allowances.borrow_mut().insert((*from, *spender), allowed - amount);
        Ok(())
    }
}

/// Vault holding a single account: the fund
pub struct MockVault {
    id: Pubkey,
    value: Cell<i128>,
    free: Cell<u128>,
    deposits: Cell<u32>,
}

impl Vault for MockVault {
    fn settlement_token_value(&self, _account: &Pubkey) -> BackstopResult<i128> {
        Ok(self.value.get())
    }

    fn free_collateral_by_token(&self, _account: &Pubkey, _token: &Pubkey) -> BackstopResult<u128> {
        Ok(self.free.get())
    }

    fn deposit(&self, host: &dyn Host, caller: &Pubkey, token: &Pubkey, amount: u128) -> BackstopResult<()> {
        host.token(token)?.transfer_from(&self.id, caller, &self.id, amount)?;
        self.value.set(self.value.get() + amount as i128);
        self.free.set(self.free.get() + amount);
        self.deposits.set(self.deposits.get() + 1);
        Ok(())
    }

    fn withdraw(&self, host: &dyn Host, caller: &Pubkey, token: &Pubkey, amount: u128) -> BackstopResult<()> {
        if amount > self.free.get() {
            return Err(BackstopError::InsufficientFreeCollateral);
        }
        host.token(token)?.transfer(&self.id, caller, amount)?;
        self.value.set(self.value.get() - amount as i128);
        self.free.set(self.free.get() - amount);
        Ok(())
    }
}

pub struct MockBeneficiary {
    token: Pubkey,
    dispatches: Cell<u32>,
    fail: Cell<bool>,
}

impl SurplusBeneficiary for MockBeneficiary {
    fn token(&self) -> Pubkey {
        self.token
    }

    fn dispatch(&self, _host: &dyn Host) -> BackstopResult<()> {
        if self.fail.get() {
            return Err(BackstopError::UnknownContract);
        }
        self.dispatches.set(self.dispatches.get() + 1);
        Ok(())
    }
}

pub struct TestHost {
    pub fund_id: Pubkey,
    pub token_id: Pubkey,
    pub vault_id: Pubkey,
    pub beneficiary_id: Pubkey,
    pub foreign_beneficiary_id: Pubkey,
    pub owner: Pubkey,
    token: MockToken,
    vault: MockVault,
    beneficiary: MockBeneficiary,
    foreign_beneficiary: MockBeneficiary,
    events: RefCell<Vec<FundEvent>>,
}

impl TestHost {
    pub fn new() -> Self {
        let token_id = label_key("usdc");
        let vault_id = label_key("vault");
        let host = Self {
            fund_id: label_key("fund"),
            token_id,
            vault_id,
            beneficiary_id: label_key("stakers"),
            foreign_beneficiary_id: label_key("other-stakers"),
            owner: label_key("owner"),
            token: MockToken::default(),
            vault: MockVault {
                id: vault_id,
                value: Cell::new(0),
                free: Cell::new(0),
                deposits: Cell::new(0),
            },
            beneficiary: MockBeneficiary {
                token: token_id,
                dispatches: Cell::new(0),
                fail: Cell::new(false),
            },
            foreign_beneficiary: MockBeneficiary {
                token: label_key("weth"),
                dispatches: Cell::new(0),
                fail: Cell::new(false),
            },
            events: RefCell::new(Vec::new()),
        };
        // vault reserves backing withdrawals
        host.token.credit(&vault_id, 1_000_000_000);
        host
    }

    /// Initialized fund with borrower, beneficiary and `threshold` set
    pub fn ready_fund(&self, threshold: u128) -> InsuranceFund {
        let fund = InsuranceFund::new(self.fund_id);
        fund.initialize(self, &self.owner, self.token_id).unwrap();
        fund.set_borrower(self, &self.owner, self.vault_id).unwrap();
        fund.set_threshold(self, &self.owner, threshold).unwrap();
        fund.set_surplus_beneficiary(self, &self.owner, self.beneficiary_id).unwrap();
        fund
    }

    pub fn set_vault_value(&self, value: i128) {
        self.vault.value.set(value);
    }

    pub fn vault_value(&self) -> i128 {
        self.vault.value.get()
    }

    pub fn set_free(&self, free: u128) {
        self.vault.free.set(free);
    }

    pub fn deposit_calls(&self) -> u32 {
        self.vault.deposits.get()
    }

    pub fn set_balance(&self, account: &Pubkey, amount: u128) {
        self.token.balances.borrow_mut().insert(*account, amount);
    }

    pub fn balance(&self, account: &Pubkey) -> u128 {
        self.token.balance_of(account)
    }

    pub fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u128 {
        self.token.allowance(owner, spender)
    }

    pub fn dispatches(&self) -> u32 {
        self.beneficiary.dispatches.get()
    }

    pub fn fail_dispatch(&self, fail: bool) {
        self.beneficiary.fail.set(fail);
    }

    pub fn events(&self) -> Vec<FundEvent> {
        self.events.borrow().clone()
    }
}

impl Host for TestHost {
    fn is_contract(&self, account: &Pubkey) -> bool {
        [
            self.fund_id,
            self.token_id,
            self.vault_id,
            self.beneficiary_id,
            self.foreign_beneficiary_id,
        ]
        .contains(account)
    }

    fn token(&self, id: &Pubkey) -> BackstopResult<&dyn SettlementToken> {
        if id == &self.token_id {
            return Ok(&self.token);
        }
        Err(BackstopError::UnknownContract)
    }

    fn vault(&self, id: &Pubkey) -> BackstopResult<&dyn Vault> {
        if id == &self.vault_id {
            return Ok(&self.vault);
        }
        Err(BackstopError::UnknownContract)
    }

    fn beneficiary(&self, id: &Pubkey) -> BackstopResult<&dyn SurplusBeneficiary> {
        if id == &self.beneficiary_id {
            Ok(&self.beneficiary)
        } else if id == &self.foreign_beneficiary_id {
            Ok(&self.foreign_beneficiary)
        } else {
            Err(BackstopError::UnknownContract)
        }
    }

    fn emit(&self, event: FundEvent) {
        self.events.borrow_mut().push(event);
    }
}
