//! Backstop Integration Tests
//!
//! End-to-end scenarios run the insurance fund against the local network
//! in `backstop-sim`. Each fund call goes through `Chain::transact`, so a
//! failing call is observed exactly as a reverted transaction.

use std::cell::RefCell;
use std::rc::Rc;

use backstop_common::*;
use backstop_insurance::{Host, InsuranceFund, SurplusBeneficiary};
use backstop_sim::{BeneficiaryContract, Deployment, Journal, LocalParams};

/// Whole settlement tokens to smallest units (6 decimals)
pub fn usdc(amount: u128) -> u128 {
    amount * 1_000_000
}

/// WETH units (18 decimals) worth `usd` dollars at the default $2,000 price
pub fn weth_worth(usd: u128) -> u128 {
    usd * 500_000_000_000_000
}

/// Params with everything zero except the threshold
pub fn params(threshold_usd: u128) -> LocalParams {
    LocalParams {
        threshold: usdc(threshold_usd),
        fund_wallet: 0,
        fund_vault_deposit: 0,
        fund_collateral: 0,
        ..LocalParams::default()
    }
}

/// Deploy with a custom surplus beneficiary instead of the staking pool
pub fn deploy_with(
    params: &LocalParams,
    make: impl FnOnce(&Deployment) -> Box<dyn BeneficiaryContract>,
) -> (Deployment, Pubkey) {
    let mut dep = Deployment::bare(params).unwrap();
    let id = label_key("custom-beneficiary");
    let beneficiary = make(&dep);
    dep.chain.add_beneficiary(id, beneficiary);
    dep.configure(params, id).unwrap();
    dep.seed(params).unwrap();
    (dep, id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reentry {
    Repay,
    DistributeFee,
}

/// Beneficiary that calls back into the fund from `dispatch`
pub struct ReentrantBeneficiary {
    token: Pubkey,
    fund: Rc<InsuranceFund>,
    reentry: Reentry,
    swallow: bool,
    seen: RefCell<Vec<BackstopError>>,
}

impl ReentrantBeneficiary {
    pub fn new(token: Pubkey, fund: Rc<InsuranceFund>, reentry: Reentry, swallow: bool) -> Self {
        Self {
            token,
            fund,
            reentry,
            swallow,
            seen: RefCell::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<BackstopError> {
        self.seen.borrow().clone()
    }
}

impl SurplusBeneficiary for ReentrantBeneficiary {
    fn token(&self) -> Pubkey {
        self.token
    }

    fn dispatch(&self, host: &dyn Host) -> BackstopResult<()> {
        let result = match self.reentry {
            Reentry::Repay => self.fund.repay(host).map(|_| ()),
            Reentry::DistributeFee => self.fund.distribute_fee(host).map(|_| ()),
        };
        if let Err(err) = result {
            self.seen.borrow_mut().push(err);
            if !self.swallow {
                return Err(err);
            }
        }
        Ok(())
    }
}

impl Journal for ReentrantBeneficiary {
    fn checkpoint(&self) {}
    fn commit(&self) {}
    fn revert(&self) {}
}

/// Shared handle so a test can inspect a beneficiary the chain owns
pub struct Shared<T>(pub Rc<T>);

impl<T: SurplusBeneficiary> SurplusBeneficiary for Shared<T> {
    fn token(&self) -> Pubkey {
        self.0.token()
    }

    fn dispatch(&self, host: &dyn Host) -> BackstopResult<()> {
        self.0.dispatch(host)
    }
}

impl<T: Journal> Journal for Shared<T> {
    fn checkpoint(&self) {
        self.0.checkpoint()
    }

    fn commit(&self) {
        self.0.commit()
    }

    fn revert(&self) {
        self.0.revert()
    }
}

/// Beneficiary whose dispatch always overspends its balance
pub struct BrokenBeneficiary {
    pub id: Pubkey,
    pub token: Pubkey,
}

impl SurplusBeneficiary for BrokenBeneficiary {
    fn token(&self) -> Pubkey {
        self.token
    }

    fn dispatch(&self, host: &dyn Host) -> BackstopResult<()> {
        let token = host.token(&self.token)?;
        let held = token.balance_of(&self.id);
        token.transfer(&self.id, &label_key("sink"), held + 1)
    }
}

impl Journal for BrokenBeneficiary {
    fn checkpoint(&self) {}
    fn commit(&self) {}
    fn revert(&self) {}
}
