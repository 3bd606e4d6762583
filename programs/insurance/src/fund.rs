//! Insurance fund account

use std::cell::RefCell;

use backstop_common::{Authority, BackstopResult, Ownership, Pubkey};

use crate::events::{FeeDistributed, Repaid};
use crate::instructions::*;
use crate::interfaces::Host;
use crate::state::{FundConfig, Lifecycle, SafetyGate};

/// Stored state of a fund at one point in time.
///
/// Only obtainable from [`InsuranceFund::checkpoint`], so a fund can only
/// ever be rolled back to a state it actually had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundCheckpoint {
    config: FundConfig,
    ownership: Ownership,
    status: Lifecycle,
}

/// One insurance fund deployment.
///
/// All entry points take `&self`: collaborators may hold a handle to the
/// fund and call back into it while one of its calls is in flight, and
/// the safety gate is what turns those reentrant calls away.
#[derive(Debug)]
pub struct InsuranceFund {
    address: Pubkey,
    config: RefCell<FundConfig>,
    ownership: RefCell<Ownership>,
    gate: SafetyGate,
}

impl InsuranceFund {
    /// An uninitialized fund living at `address`
    pub fn new(address: Pubkey) -> Self {
        Self {
            address,
            config: RefCell::new(FundConfig::default()),
            ownership: RefCell::new(Ownership::default()),
            gate: SafetyGate::default(),
        }
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    /// Snapshot of the configuration; never hold a borrow across a call out
    pub fn config(&self) -> FundConfig {
        self.config.borrow().clone()
    }

    pub fn token(&self) -> Pubkey {
        self.config.borrow().token()
    }

    pub fn borrower(&self) -> Pubkey {
        self.config.borrow().borrower()
    }

    pub fn distribution_threshold(&self) -> u128 {
        self.config.borrow().threshold()
    }

    pub fn surplus_beneficiary(&self) -> Pubkey {
        self.config.borrow().surplus_beneficiary()
    }

    pub fn owner(&self) -> Pubkey {
        self.ownership.borrow().owner()
    }

    pub fn candidate(&self) -> Pubkey {
        self.ownership.borrow().candidate()
    }

    pub fn is_authorized(&self, caller: &Pubkey) -> bool {
        self.ownership.borrow().is_authorized(caller)
    }

    pub fn status(&self) -> Lifecycle {
        self.gate.status()
    }

    pub fn is_paused(&self) -> bool {
        self.gate.status() == Lifecycle::Paused
    }

    /// Capture config, ownership and lifecycle status
    pub fn checkpoint(&self) -> FundCheckpoint {
        FundCheckpoint {
            config: self.config.borrow().clone(),
            ownership: *self.ownership.borrow(),
            status: self.gate.status(),
        }
    }

    /// Host-side rollback of a failed transaction. The reentrancy lock is
    /// not part of the checkpoint; it is released by its guard.
    pub fn restore(&self, checkpoint: FundCheckpoint) {
        *self.config.borrow_mut() = checkpoint.config;
        *self.ownership.borrow_mut() = checkpoint.ownership;
        self.gate.restore(checkpoint.status);
    }

    pub(crate) fn ownership(&self) -> Ownership {
        *self.ownership.borrow()
    }

    pub(crate) fn gate(&self) -> &SafetyGate {
        &self.gate
    }

    pub(crate) fn config_mut(&self) -> std::cell::RefMut<'_, FundConfig> {
        self.config.borrow_mut()
    }

    pub(crate) fn ownership_mut(&self) -> std::cell::RefMut<'_, Ownership> {
        self.ownership.borrow_mut()
    }

    // Lifecycle

    pub fn initialize(&self, host: &dyn Host, caller: &Pubkey, token: Pubkey) -> BackstopResult<()> {
        process_initialize(self, host, caller, token)
    }

    // Owner surface

    pub fn set_borrower(&self, host: &dyn Host, caller: &Pubkey, borrower: Pubkey) -> BackstopResult<()> {
        process_set_borrower(self, host, caller, borrower)
    }

    pub fn set_threshold(&self, host: &dyn Host, caller: &Pubkey, threshold: u128) -> BackstopResult<()> {
        process_set_threshold(self, host, caller, threshold)
    }

    pub fn set_surplus_beneficiary(
        &self,
        host: &dyn Host,
        caller: &Pubkey,
        beneficiary: Pubkey,
    ) -> BackstopResult<()> {
        process_set_surplus_beneficiary(self, host, caller, beneficiary)
    }

    pub fn pause(&self, host: &dyn Host, caller: &Pubkey) -> BackstopResult<()> {
        process_pause(self, host, caller)
    }

    pub fn unpause(&self, host: &dyn Host, caller: &Pubkey) -> BackstopResult<()> {
        process_unpause(self, host, caller)
    }

    pub fn set_owner(&self, caller: &Pubkey, new_owner: Pubkey) -> BackstopResult<()> {
        self.ownership_mut().set_owner(caller, new_owner)
    }

    pub fn update_owner(&self, host: &dyn Host, caller: &Pubkey) -> BackstopResult<()> {
        process_update_owner(self, host, caller)
    }

    pub fn renounce_ownership(&self, host: &dyn Host, caller: &Pubkey) -> BackstopResult<()> {
        process_renounce_ownership(self, host, caller)
    }

    // Public surface

    pub fn insurance_fund_capacity(&self, host: &dyn Host) -> BackstopResult<i128> {
        process_capacity(self, host)
    }

    pub fn repay(&self, host: &dyn Host) -> BackstopResult<Repaid> {
        process_repay(self, host)
    }

    pub fn distribute_fee(&self, host: &dyn Host) -> BackstopResult<FeeDistributed> {
        process_distribute_fee(self, host)
    }
}
