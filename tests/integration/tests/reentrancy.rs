//! Callbacks from the surplus beneficiary back into the fund

use std::rc::Rc;

use backstop_common::*;
use backstop_insurance::FundEvent;
use backstop_integration_tests::*;
use backstop_sim::LocalParams;

fn surplus_params() -> LocalParams {
    LocalParams {
        fund_vault_deposit: usdc(1_500),
        ..params(1_000)
    }
}

#[test]
fn test_swallowed_reentry_lets_outer_call_finish() {
    let mut probe = None;
    let (dep, beneficiary) = deploy_with(&surplus_params(), |d| {
        let inner = Rc::new(ReentrantBeneficiary::new(
            d.accounts.usdc,
            d.fund.clone(),
            Reentry::DistributeFee,
            true,
        ));
        probe = Some(inner.clone());
        Box::new(Shared(inner))
    });
    let probe = probe.unwrap();

    let event = dep.distribute_fee().unwrap();
    assert_eq!(event.surplus, usdc(500));
    assert_eq!(probe.seen(), vec![BackstopError::ReentrantCall]);
    assert_eq!(dep.usdc_balance(&beneficiary), usdc(500));

    // exactly one distribution recorded
    let distributions = dep
        .chain
        .events()
        .into_iter()
        .filter(|e| matches!(e, FundEvent::FeeDistributed(_)))
        .count();
    assert_eq!(distributions, 1);
}

#[test]
fn test_propagated_reentry_rolls_everything_back() {
    let mut probe = None;
    let (dep, beneficiary) = deploy_with(&surplus_params(), |d| {
        let inner = Rc::new(ReentrantBeneficiary::new(
            d.accounts.usdc,
            d.fund.clone(),
            Reentry::Repay,
            false,
        ));
        probe = Some(inner.clone());
        Box::new(Shared(inner))
    });
    let probe = probe.unwrap();
    let events = dep.chain.events();
    let capacity = dep.capacity();

    assert_eq!(dep.distribute_fee(), Err(BackstopError::ReentrantCall));
    assert_eq!(probe.seen(), vec![BackstopError::ReentrantCall]);

    assert_eq!(dep.usdc_balance(&beneficiary), 0);
    assert_eq!(dep.capacity(), capacity);
    assert_eq!(dep.chain.events(), events);
}

#[test]
fn test_lock_released_after_reentry_attempt() {
    let (dep, _) = deploy_with(&surplus_params(), |d| {
        Box::new(ReentrantBeneficiary::new(
            d.accounts.usdc,
            d.fund.clone(),
            Reentry::Repay,
            false,
        ))
    });

    assert_eq!(dep.distribute_fee(), Err(BackstopError::ReentrantCall));

    // the fund is usable again once the outer call is gone
    dep.shock(-(usdc(2_000) as i128)).unwrap();
    assert_eq!(dep.repay().map(|r| r.repaid_amount), Ok(0));
}
