//! Local deployment of the fund and its collaborators

use std::rc::Rc;

use backstop_common::*;
use backstop_insurance::{FeeDistributed, InsuranceFund, Repaid, SettlementToken};
use backstop_oracle::{BaseToken, PriceOracle};

use crate::beneficiary::StakingBeneficiary;
use crate::chain::Chain;
use crate::token::SimToken;
use crate::vault::SimVault;

pub const SETTLEMENT_DECIMALS: u8 = 6;
pub const COLLATERAL_DECIMALS: u8 = 18;
pub const FEED_DECIMALS: u8 = 8;

/// Seed values for a local deployment. Amounts are in smallest units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalParams {
    /// Distribution threshold in settlement units
    pub threshold: u128,
    /// Settlement tokens held directly by the fund
    pub fund_wallet: u128,
    /// Settlement tokens the fund holds inside the vault
    pub fund_vault_deposit: u128,
    /// Non-settlement collateral the fund holds inside the vault
    pub fund_collateral: u128,
    /// Collateral price in feed decimals
    pub collateral_price: u128,
    /// Stake of each surplus beneficiary staker
    pub stakes: Vec<u128>,
}

impl Default for LocalParams {
    fn default() -> Self {
        Self {
            threshold: 1_000_000_000,
            fund_wallet: 0,
            fund_vault_deposit: 1_500_000_000,
            fund_collateral: 0,
            // $2,000.00000000
            collateral_price: 200_000_000_000,
            stakes: vec![1, 1],
        }
    }
}

/// Identifiers of one local deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accounts {
    pub owner: Pubkey,
    pub treasury: Pubkey,
    pub fund: Pubkey,
    pub usdc: Pubkey,
    pub weth: Pubkey,
    pub vault: Pubkey,
    pub stakers: Pubkey,
}

impl Accounts {
    pub fn local() -> Self {
        Self {
            owner: label_key("owner"),
            treasury: label_key("treasury"),
            fund: label_key("insurance-fund"),
            usdc: label_key("usdc"),
            weth: label_key("weth"),
            vault: label_key("vault"),
            stakers: label_key("stakers"),
        }
    }

    pub fn staker(index: usize) -> Pubkey {
        label_key(&format!("staker-{}", index))
    }
}

/// A fund wired to a vault, a token, a price oracle and a staking pool
pub struct Deployment {
    pub chain: Chain,
    pub fund: Rc<InsuranceFund>,
    pub oracle: Rc<PriceOracle>,
    pub accounts: Accounts,
}

impl Deployment {
    /// Build the network without configuring the fund
    pub fn bare(params: &LocalParams) -> BackstopResult<Self> {
        let accounts = Accounts::local();
        let mut chain = Chain::new();

        chain.add_token(SimToken::new(accounts.usdc, SETTLEMENT_DECIMALS));
        chain.add_token(SimToken::new(accounts.weth, COLLATERAL_DECIMALS));

        let oracle = Rc::new(PriceOracle::new(accounts.owner, FEED_DECIMALS));
        oracle.update_price(&accounts.owner, params.collateral_price, 0)?;
        let base = BaseToken::new(accounts.owner, SETTLEMENT_DECIMALS, oracle.clone())?;

        let mut vault = SimVault::new(accounts.vault, accounts.usdc, SETTLEMENT_DECIMALS);
        vault.add_collateral(accounts.weth, COLLATERAL_DECIMALS, base)?;
        chain.add_vault(vault);

        let stakers = StakingBeneficiary::new(accounts.stakers, accounts.usdc);
        for (i, stake) in params.stakes.iter().enumerate() {
            stakers.stake(Accounts::staker(i), *stake);
        }
        chain.add_beneficiary(accounts.stakers, Box::new(stakers));
        let fund = Rc::new(InsuranceFund::new(accounts.fund));
        chain.add_fund(fund.clone());

        Ok(Self {
            chain,
            fund,
            oracle,
            accounts,
        })
    }

    /// Build the network, configure the fund and seed its balances
    pub fn local(params: &LocalParams) -> BackstopResult<Self> {
        let deployment = Self::bare(params)?;
        deployment.configure(params, deployment.accounts.stakers)?;
        deployment.seed(params)?;

        log::info!(
            "local deployment ready: fund {}, vault {}, threshold {}",
            fmt_key(&deployment.accounts.fund),
            fmt_key(&deployment.accounts.vault),
            params.threshold
        );
        Ok(deployment)
    }

    /// Initialize the fund and run the owner setup against `beneficiary`
    pub fn configure(&self, params: &LocalParams, beneficiary: Pubkey) -> BackstopResult<()> {
        let a = self.accounts;
        let fund = self.fund.clone();
        self.chain.transact(|c| {
            fund.initialize(c, &a.owner, a.usdc)?;
            fund.set_borrower(c, &a.owner, a.vault)?;
            fund.set_threshold(c, &a.owner, params.threshold)?;
            fund.set_surplus_beneficiary(c, &a.owner, beneficiary)
        })
    }

    /// Give the fund its wallet and vault balances
    pub fn seed(&self, params: &LocalParams) -> BackstopResult<()> {
        let a = self.accounts;
        self.fund_vault(a.usdc, params.fund_vault_deposit)?;
        self.fund_vault(a.weth, params.fund_collateral)?;
        self.chain
            .transact(|c| c.sim_token(&a.usdc)?.mint(&a.fund, params.fund_wallet))
    }

    /// Credit the fund's vault account with `amount` of `token` paid by the treasury
    pub fn fund_vault(&self, token: Pubkey, amount: u128) -> BackstopResult<()> {
        if amount == 0 {
            return Ok(());
        }
        let a = self.accounts;
        self.chain.transact(|c| {
            let t = c.sim_token(&token)?;
            t.mint(&a.treasury, amount)?;
            t.approve(&a.treasury, &a.vault, amount)?;
            c.sim_vault(&a.vault)?
                .deposit_for(c, &a.treasury, &a.fund, &token, amount)
        })
    }

    /// Realize PnL on the fund's vault account
    pub fn shock(&self, delta: i128) -> BackstopResult<()> {
        let a = self.accounts;
        self.chain
            .transact(|c| c.sim_vault(&a.vault)?.settle_pnl(&a.fund, delta))
    }

    pub fn capacity(&self) -> BackstopResult<i128> {
        self.fund.insurance_fund_capacity(&self.chain)
    }

    pub fn repay(&self) -> BackstopResult<Repaid> {
        let fund = self.fund.clone();
        self.chain.transact(|c| fund.repay(c))
    }

    pub fn distribute_fee(&self) -> BackstopResult<FeeDistributed> {
        let fund = self.fund.clone();
        self.chain.transact(|c| fund.distribute_fee(c))
    }

    pub fn usdc_balance(&self, account: &Pubkey) -> u128 {
        self.chain
            .sim_token(&self.accounts.usdc)
            .map(|t| t.balance_of(account))
            .unwrap_or(0)
    }
}
