//! Fund access for the keeper

use std::cell::Cell;

use backstop_common::{is_zero, BackstopError};
use backstop_insurance::{FeeDistributed, FundEvent, Host, Repaid, SettlementToken, Vault};
use backstop_sim::Deployment;
use thiserror::Error;

use crate::config::LocalConfig;
use crate::planner::FundSnapshot;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientError {
    #[error("fund call failed: {0}")]
    Fund(#[from] BackstopError),
}

impl ClientError {
    /// The fund rejected the call because there was nothing to do
    pub fn is_nothing_to_do(&self) -> bool {
        match self {
            ClientError::Fund(e) => e.is_nothing_to_do(),
        }
    }
}

pub trait FundClient {
    /// Advance the network by one tick
    fn tick(&self, tick: u64) -> Result<(), ClientError>;

    fn snapshot(&self) -> Result<FundSnapshot, ClientError>;

    fn repay(&self) -> Result<Repaid, ClientError>;

    fn distribute_fee(&self) -> Result<FeeDistributed, ClientError>;

    /// Events committed since the last call
    fn new_events(&self) -> Vec<FundEvent>;
}

/// Client over an in-process simulated network
pub struct LocalClient {
    deployment: Deployment,
    local: LocalConfig,
    seen_events: Cell<usize>,
}

impl LocalClient {
    pub fn new(local: &LocalConfig) -> Result<Self, ClientError> {
        let deployment = Deployment::local(&local.to_params())?;
        Ok(Self {
            deployment,
            local: local.clone(),
            seen_events: Cell::new(0),
        })
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }
}

impl FundClient for LocalClient {
    fn tick(&self, tick: u64) -> Result<(), ClientError> {
        let shock = self.local.shock_at(tick);
        if shock != 0 {
            log::info!("tick {}: settlement value shock {}", tick, shock);
            self.deployment.shock(shock)?;
        }
        Ok(())
    }

    fn snapshot(&self) -> Result<FundSnapshot, ClientError> {
        let dep = &self.deployment;
        let fund = &dep.fund;
        let me = fund.address();
        let config = fund.config();

        let vault = dep.chain.vault(&config.borrower())?;
        let token = dep.chain.token(&config.token())?;
        Ok(FundSnapshot {
            settlement_value: vault.settlement_token_value(&me)?,
            wallet: token.balance_of(&me),
            free_collateral: vault.free_collateral_by_token(&me, &config.token())?,
            threshold: config.threshold(),
            beneficiary_set: !is_zero(&config.surplus_beneficiary()),
            paused: fund.is_paused(),
        })
    }

    fn repay(&self) -> Result<Repaid, ClientError> {
        Ok(self.deployment.repay()?)
    }

    fn distribute_fee(&self) -> Result<FeeDistributed, ClientError> {
        Ok(self.deployment.distribute_fee()?)
    }

    fn new_events(&self) -> Vec<FundEvent> {
        let events = self.deployment.chain.events();
        let fresh = events.get(self.seen_events.get()..).unwrap_or_default().to_vec();
        self.seen_events.set(events.len());
        fresh
    }
}
