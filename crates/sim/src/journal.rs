//! Checkpointed contract state
//!
//! Each simulated contract keeps its mutable state in a [`Journaled`]
//! cell. The chain checkpoints every contract before a transaction and
//! either commits (drops the checkpoint) or reverts (restores it).

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use backstop_insurance::{FundCheckpoint, InsuranceFund};

/// Contract state that takes part in transactions
pub trait Journal {
    fn checkpoint(&self);
    fn commit(&self);
    fn revert(&self);
}

/// State with a stack of saved copies; nested transactions push more
#[derive(Debug, Default)]
pub struct Journaled<S: Clone> {
    live: RefCell<S>,
    saved: RefCell<Vec<S>>,
}

impl<S: Clone> Journaled<S> {
    pub fn new(state: S) -> Self {
        Self {
            live: RefCell::new(state),
            saved: RefCell::new(Vec::new()),
        }
    }

    pub fn borrow(&self) -> Ref<'_, S> {
        self.live.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, S> {
        self.live.borrow_mut()
    }

    pub fn depth(&self) -> usize {
        self.saved.borrow().len()
    }
}

impl<S: Clone> Journal for Journaled<S> {
    fn checkpoint(&self) {
        let copy = self.live.borrow().clone();
        self.saved.borrow_mut().push(copy);
    }

    fn commit(&self) {
        self.saved.borrow_mut().pop();
    }

    fn revert(&self) {
        if let Some(saved) = self.saved.borrow_mut().pop() {
            *self.live.borrow_mut() = saved;
        }
    }
}

/// Journal over a fund hosted on the chain: config, ownership and
/// lifecycle status are rolled back together with every other contract.
pub struct FundJournal {
    fund: Rc<InsuranceFund>,
    saved: RefCell<Vec<FundCheckpoint>>,
}

impl FundJournal {
    pub fn new(fund: Rc<InsuranceFund>) -> Self {
        Self {
            fund,
            saved: RefCell::new(Vec::new()),
        }
    }

    pub fn fund(&self) -> &Rc<InsuranceFund> {
        &self.fund
    }

    pub fn depth(&self) -> usize {
        self.saved.borrow().len()
    }
}

impl Journal for FundJournal {
    fn checkpoint(&self) {
        self.saved.borrow_mut().push(self.fund.checkpoint());
    }

    fn commit(&self) {
        self.saved.borrow_mut().pop();
    }

    fn revert(&self) {
        if let Some(saved) = self.saved.borrow_mut().pop() {
            self.fund.restore(saved);
        }
    }
}
