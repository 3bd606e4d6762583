//! Surplus distribution scenarios

use backstop_common::*;
use backstop_insurance::{FeeDistributed, FundEvent, SettlementToken, Vault};
use backstop_integration_tests::*;
use backstop_sim::{Accounts, Deployment, LocalParams};

/// capacity 1500 made of `settlement` USDC plus WETH worth the rest
fn deployment(settlement_usd: u128) -> Deployment {
    let params = LocalParams {
        fund_vault_deposit: usdc(settlement_usd),
        fund_collateral: weth_worth(1_500 - settlement_usd),
        ..params(1_000)
    };
    Deployment::local(&params).unwrap()
}

#[test]
fn test_surplus_limited_by_free_collateral() {
    let dep = deployment(300);
    assert_eq!(dep.capacity(), Ok(usdc(1_500) as i128));

    let event = dep.distribute_fee().unwrap();
    assert_eq!(
        event,
        FeeDistributed {
            fund: dep.accounts.fund,
            surplus: usdc(300),
            insurance_fund_capacity: usdc(1_500) as i128,
            insurance_fund_free_collateral: usdc(300),
            threshold: usdc(1_000),
        }
    );
    // stakers split it evenly
    assert_eq!(dep.usdc_balance(&Accounts::staker(0)), usdc(150));
    assert_eq!(dep.usdc_balance(&Accounts::staker(1)), usdc(150));
}

#[test]
fn test_surplus_limited_by_threshold() {
    let dep = deployment(800);

    let event = dep.distribute_fee().unwrap();
    assert_eq!(event.surplus, usdc(500));
    assert_eq!(event.insurance_fund_free_collateral, usdc(800));
    assert_eq!(dep.capacity(), Ok(usdc(1_000) as i128));
    assert_eq!(dep.chain.events().last(), Some(&FundEvent::FeeDistributed(event)));
}

#[test]
fn test_second_distribution_fails() {
    let dep = deployment(800);
    dep.distribute_fee().unwrap();
    let events = dep.chain.events().len();

    assert_eq!(dep.distribute_fee(), Err(BackstopError::NoSurplus));
    assert_eq!(dep.chain.events().len(), events);
}

#[test]
fn test_threshold_met_without_settlement_liquidity() {
    // capacity sits entirely in WETH: above threshold, nothing to release
    let dep = deployment(0);
    assert_eq!(dep.capacity(), Ok(usdc(1_500) as i128));
    assert_eq!(dep.distribute_fee(), Err(BackstopError::NoSurplus));
}

#[test]
fn test_collateral_price_moves_capacity() {
    let dep = deployment(800);
    // WETH halves: 700 of collateral becomes 350
    dep.oracle
        .update_price(&dep.accounts.owner, 100_000_000_000, 10)
        .unwrap();

    assert_eq!(dep.capacity(), Ok(usdc(1_150) as i128));
    assert_eq!(dep.distribute_fee().map(|e| e.surplus), Ok(usdc(150)));
}

#[test]
fn test_wallet_counts_toward_capacity_not_liquidity() {
    let params = LocalParams {
        fund_wallet: usdc(2_000),
        fund_vault_deposit: usdc(100),
        ..params(1_000)
    };
    let dep = Deployment::local(&params).unwrap();

    let event = dep.distribute_fee().unwrap();
    assert_eq!(event.insurance_fund_capacity, usdc(2_100) as i128);
    assert_eq!(event.surplus, usdc(100));
    // the wallet itself is untouched
    assert_eq!(dep.usdc_balance(&dep.accounts.fund), usdc(2_000));
}

#[test]
fn test_zero_threshold_disables_distribution() {
    let dep = deployment(800);
    let a = dep.accounts;
    dep.chain
        .transact(|c| dep.fund.set_threshold(c, &a.owner, 0))
        .unwrap();

    assert_eq!(dep.distribute_fee(), Err(BackstopError::ThresholdZero));
}

#[test]
fn test_vault_accounting_after_distribution() {
    let dep = deployment(300);
    dep.distribute_fee().unwrap();

    let vault = dep.chain.sim_vault(&dep.accounts.vault).unwrap();
    assert_eq!(vault.balance_of(&dep.accounts.fund, &dep.accounts.usdc), 0);
    assert_eq!(
        vault.free_collateral_by_token(&dep.accounts.fund, &dep.accounts.usdc),
        Ok(0)
    );
    let token = dep.chain.sim_token(&dep.accounts.usdc).unwrap();
    assert_eq!(token.balance_of(&dep.accounts.vault), 0);
    assert_eq!(token.sum_of_balances(), token.total_supply());
}
