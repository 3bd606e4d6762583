//! Repayment scenarios

use backstop_common::*;
use backstop_insurance::{FundEvent, Repaid, SettlementToken, Vault};
use backstop_integration_tests::*;
use backstop_sim::{Deployment, LocalParams};

#[test]
fn test_partial_repay_leaves_residual_deficit() {
    // settlement value -200, wallet 150
    let params = LocalParams {
        fund_wallet: usdc(150),
        ..params(1_000)
    };
    let dep = Deployment::local(&params).unwrap();
    dep.shock(-(usdc(200) as i128)).unwrap();

    let repaid = dep.repay().unwrap();
    assert_eq!(repaid.repaid_amount, usdc(150));
    assert_eq!(repaid.token_balance_after, 0);

    let vault = dep.chain.sim_vault(&dep.accounts.vault).unwrap();
    assert_eq!(
        vault.settlement_token_value(&dep.accounts.fund),
        Ok(-(usdc(50) as i128))
    );
    assert_eq!(dep.chain.events().last(), Some(&FundEvent::Repaid(repaid)));
}

#[test]
fn test_full_repay_keeps_remaining_wallet() {
    let params = LocalParams {
        fund_wallet: usdc(1_000),
        ..params(1_000)
    };
    let dep = Deployment::local(&params).unwrap();
    dep.shock(-(usdc(200) as i128)).unwrap();

    let repaid = dep.repay().unwrap();
    assert_eq!(
        repaid,
        Repaid {
            fund: dep.accounts.fund,
            repaid_amount: usdc(200),
            token_balance_after: usdc(800),
        }
    );
    assert_eq!(dep.capacity(), Ok(usdc(800) as i128));

    // approval fully consumed by the vault pull
    let token = dep.chain.sim_token(&dep.accounts.usdc).unwrap();
    assert_eq!(token.allowance(&dep.accounts.fund, &dep.accounts.vault), 0);
}

#[test]
fn test_repay_fails_without_deficit() {
    let params = LocalParams {
        fund_wallet: usdc(100),
        fund_vault_deposit: usdc(10),
        ..params(1_000)
    };
    let dep = Deployment::local(&params).unwrap();
    let events_before = dep.chain.events().len();

    assert_eq!(dep.repay(), Err(BackstopError::RepayWhenNonNegative));

    // settlement value exactly zero
    dep.shock(-(usdc(10) as i128)).unwrap();
    assert_eq!(dep.repay(), Err(BackstopError::RepayWhenNonNegative));

    assert_eq!(dep.usdc_balance(&dep.accounts.fund), usdc(100));
    assert_eq!(dep.chain.events().len(), events_before);
}

#[test]
fn test_repay_with_empty_wallet_records_zero() {
    let dep = Deployment::local(&params(1_000)).unwrap();
    dep.shock(-(usdc(5) as i128)).unwrap();

    let repaid = dep.repay().unwrap();
    assert_eq!(repaid.repaid_amount, 0);
    assert_eq!(dep.capacity(), Ok(-(usdc(5) as i128)));
}

#[test]
fn test_repeated_repay_drains_wallet_once() {
    let params = LocalParams {
        fund_wallet: usdc(150),
        ..params(1_000)
    };
    let dep = Deployment::local(&params).unwrap();
    dep.shock(-(usdc(200) as i128)).unwrap();

    assert_eq!(dep.repay().map(|r| r.repaid_amount), Ok(usdc(150)));
    // still in deficit, nothing left to pay
    assert_eq!(dep.repay().map(|r| r.repaid_amount), Ok(0));

    // fee income tops the wallet up, the rest of the deficit is covered
    dep.chain
        .transact(|c| c.sim_token(&dep.accounts.usdc)?.mint(&dep.accounts.fund, usdc(70)))
        .unwrap();
    assert_eq!(dep.repay().map(|r| r.repaid_amount), Ok(usdc(50)));
    assert_eq!(dep.usdc_balance(&dep.accounts.fund), usdc(20));
    assert_eq!(dep.repay(), Err(BackstopError::RepayWhenNonNegative));
}
