//! All-or-nothing behaviour of failing fund calls

use backstop_common::*;
use backstop_insurance::{SettlementToken, Vault};
use backstop_integration_tests::*;
use backstop_sim::{Deployment, LocalParams};
use proptest::prelude::*;

fn ledger(dep: &Deployment) -> (u128, u128, u128, i128, usize) {
    let a = dep.accounts;
    let token = dep.chain.sim_token(&a.usdc).unwrap();
    let vault = dep.chain.sim_vault(&a.vault).unwrap();
    (
        token.balance_of(&a.fund),
        token.balance_of(&a.vault),
        token.allowance(&a.fund, &a.vault),
        vault.settlement_token_value(&a.fund).unwrap(),
        dep.chain.events().len(),
    )
}

#[test]
fn test_failed_dispatch_reverts_withdrawal_and_transfer() {
    let params = LocalParams {
        fund_vault_deposit: usdc(1_500),
        ..params(1_000)
    };
    let (dep, beneficiary) = deploy_with(&params, |d| {
        Box::new(BrokenBeneficiary {
            id: label_key("custom-beneficiary"),
            token: d.accounts.usdc,
        })
    });
    let before = ledger(&dep);

    assert_eq!(dep.distribute_fee(), Err(BackstopError::InsufficientBalance));
    assert_eq!(ledger(&dep), before);
    assert_eq!(dep.usdc_balance(&beneficiary), 0);
}

#[test]
fn test_failed_call_leaves_lock_free() {
    let dep = Deployment::local(&params(1_000)).unwrap();

    assert_eq!(dep.distribute_fee(), Err(BackstopError::NoSurplus));
    assert_eq!(dep.repay(), Err(BackstopError::RepayWhenNonNegative));

    dep.fund_vault(dep.accounts.usdc, usdc(1_200)).unwrap();
    assert_eq!(dep.distribute_fee().map(|e| e.surplus), Ok(usdc(200)));
}

proptest! {
    #[test]
    fn prop_rejected_calls_change_nothing(
        deposit in 0u128..3_000,
        wallet in 0u128..3_000,
        shock in -5_000i128..5_000,
        threshold in 1u128..3_000,
    ) {
        let params = LocalParams {
            fund_wallet: usdc(wallet),
            fund_vault_deposit: usdc(deposit),
            ..params(threshold)
        };
        let dep = Deployment::local(&params).unwrap();
        dep.shock(shock * 1_000_000).unwrap();

        let before = ledger(&dep);
        if dep.repay().is_err() {
            prop_assert_eq!(ledger(&dep), before);
        }

        let before = ledger(&dep);
        match dep.distribute_fee() {
            Ok(event) => {
                prop_assert!(event.surplus > 0);
                prop_assert!(dep.capacity().unwrap() >= usdc(threshold) as i128);
            }
            Err(_) => prop_assert_eq!(ledger(&dep), before),
        }
    }
}
