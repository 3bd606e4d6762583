//! Simulated chain: contract registry plus the transaction layer

use std::collections::HashMap;
use std::rc::Rc;

use backstop_common::*;
use backstop_insurance::{FundEvent, Host, InsuranceFund, SettlementToken, SurplusBeneficiary, Vault};

use crate::beneficiary::BeneficiaryContract;
use crate::journal::{FundJournal, Journal, Journaled};
use crate::token::SimToken;
use crate::vault::SimVault;

/// Every contract of the local network.
///
/// Contracts are registered through `&mut self` before use; afterwards
/// all calls go through `&self` and the contracts' own journaled state.
#[derive(Default)]
pub struct Chain {
    tokens: HashMap<Pubkey, SimToken>,
    vaults: HashMap<Pubkey, SimVault>,
    beneficiaries: HashMap<Pubkey, Box<dyn BeneficiaryContract>>,
    funds: HashMap<Pubkey, FundJournal>,
    events: Journaled<Vec<FundEvent>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_token(&mut self, token: SimToken) {
        self.tokens.insert(token.id(), token);
    }

    pub fn add_vault(&mut self, vault: SimVault) {
        self.vaults.insert(vault.id(), vault);
    }

    pub fn add_beneficiary(&mut self, id: Pubkey, beneficiary: Box<dyn BeneficiaryContract>) {
        self.beneficiaries.insert(id, beneficiary);
    }

    /// Host a fund; its stored state joins every transaction
    pub fn add_fund(&mut self, fund: Rc<InsuranceFund>) {
        self.funds.insert(fund.address(), FundJournal::new(fund));
    }

    pub fn sim_token(&self, id: &Pubkey) -> BackstopResult<&SimToken> {
        self.tokens.get(id).ok_or(BackstopError::UnknownContract)
    }

    pub fn sim_vault(&self, id: &Pubkey) -> BackstopResult<&SimVault> {
        self.vaults.get(id).ok_or(BackstopError::UnknownContract)
    }

    /// Committed events, oldest first
    pub fn events(&self) -> Vec<FundEvent> {
        self.events.borrow().clone()
    }

    fn journals(&self) -> impl Iterator<Item = &dyn Journal> + '_ {
        let tokens = self.tokens.values().map(|t| t as &dyn Journal);
        let vaults = self.vaults.values().map(|v| v as &dyn Journal);
        let beneficiaries = self
            .beneficiaries
            .values()
            .map(|b| b.as_journal());
        let funds = self.funds.values().map(|f| f as &dyn Journal);
        tokens
            .chain(vaults)
            .chain(beneficiaries)
            .chain(funds)
            .chain(std::iter::once(&self.events as &dyn Journal))
    }

    /// Run `f` as one transaction: on `Err` every contract and the event
    /// log are restored to their state before the call.
    pub fn transact<T>(&self, f: impl FnOnce(&Chain) -> BackstopResult<T>) -> BackstopResult<T> {
        for journal in self.journals() {
            journal.checkpoint();
        }

        let result = f(self);

        match &result {
            Ok(_) => {
                for journal in self.journals() {
                    journal.commit();
                }
            }
            Err(err) => {
                for journal in self.journals() {
                    journal.revert();
                }
                log::warn!("transaction reverted: {}", err);
            }
        }
        result
    }
}

impl Host for Chain {
    fn is_contract(&self, account: &Pubkey) -> bool {
        self.tokens.contains_key(account)
            || self.vaults.contains_key(account)
            || self.beneficiaries.contains_key(account)
            || self.funds.contains_key(account)
    }

    fn token(&self, id: &Pubkey) -> BackstopResult<&dyn SettlementToken> {
        self.sim_token(id).map(|t| t as &dyn SettlementToken)
    }

    fn vault(&self, id: &Pubkey) -> BackstopResult<&dyn Vault> {
        self.sim_vault(id).map(|v| v as &dyn Vault)
    }

    fn beneficiary(&self, id: &Pubkey) -> BackstopResult<&dyn SurplusBeneficiary> {
        self.beneficiaries
            .get(id)
            .map(|b| b.as_beneficiary())
            .ok_or(BackstopError::UnknownContract)
    }

    fn emit(&self, event: FundEvent) {
        log::debug!("event: {:?}", event);
        self.events.borrow_mut().push(event);
    }
}
