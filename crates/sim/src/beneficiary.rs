//! Surplus beneficiaries

use backstop_common::*;
use backstop_insurance::{Host, SurplusBeneficiary};

use crate::journal::{Journal, Journaled};

/// A beneficiary the chain can host: it receives surplus and takes part
/// in transactions
pub trait BeneficiaryContract: SurplusBeneficiary + Journal {
    fn as_beneficiary(&self) -> &dyn SurplusBeneficiary;

    fn as_journal(&self) -> &dyn Journal;
}

impl<T: SurplusBeneficiary + Journal> BeneficiaryContract for T {
    fn as_beneficiary(&self) -> &dyn SurplusBeneficiary {
        self
    }

    fn as_journal(&self) -> &dyn Journal {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct StakeBook {
    pub stakes: Vec<(Pubkey, u128)>,
    pub total_dispatched: u128,
}

/// Splits whatever it holds across stakers pro rata on each dispatch.
///
/// Shares are floored; the rounding dust stays with the beneficiary and
/// is included in the next dispatch.
#[derive(Debug)]
pub struct StakingBeneficiary {
    id: Pubkey,
    token: Pubkey,
    book: Journaled<StakeBook>,
}

impl StakingBeneficiary {
    pub fn new(id: Pubkey, token: Pubkey) -> Self {
        Self {
            id,
            token,
            book: Journaled::new(StakeBook::default()),
        }
    }

    pub fn id(&self) -> Pubkey {
        self.id
    }

    pub fn stake(&self, staker: Pubkey, amount: u128) {
        let mut book = self.book.borrow_mut();
        match book.stakes.iter_mut().find(|(s, _)| *s == staker) {
            Some((_, stake)) => *stake = stake.saturating_add(amount),
            None => book.stakes.push((staker, amount)),
        }
    }

    pub fn total_dispatched(&self) -> u128 {
        self.book.borrow().total_dispatched
    }

    /// Share of `amount` owed to each staker, floored
    pub fn shares(&self, amount: u128) -> BackstopResult<Vec<(Pubkey, u128)>> {
        let book = self.book.borrow();
        let total: u128 = book.stakes.iter().fold(0u128, |acc, (_, s)| acc.saturating_add(*s));
        if total == 0 {
            return Ok(Vec::new());
        }
        book.stakes
            .iter()
            .map(|(staker, stake)| {
                amount
                    .checked_mul(*stake)
                    .map(|v| (*staker, v / total))
                    .ok_or(BackstopError::Overflow)
            })
            .collect()
    }
}

impl Journal for StakingBeneficiary {
    fn checkpoint(&self) {
        self.book.checkpoint()
    }

    fn commit(&self) {
        self.book.commit()
    }

    fn revert(&self) {
        self.book.revert()
    }
}

impl SurplusBeneficiary for StakingBeneficiary {
    fn token(&self) -> Pubkey {
        self.token
    }

    fn dispatch(&self, host: &dyn Host) -> BackstopResult<()> {
        let token = host.token(&self.token)?;
        let held = token.balance_of(&self.id);
        let shares = self.shares(held)?;

        let mut sent = 0u128;
        for (staker, share) in shares {
            if share == 0 {
                continue;
            }
            token.transfer(&self.id, &staker, share)?;
            sent += share;
        }

        let mut book = self.book.borrow_mut();
        book.total_dispatched = book.total_dispatched.saturating_add(sent);
        log::info!(
            "beneficiary {}: dispatched {} of {} held",
            fmt_key(&self.id),
            sent,
            held
        );
        Ok(())
    }
}
