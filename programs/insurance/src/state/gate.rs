//! Access & safety gate
//!
//! Lifecycle: Uninitialized -> Active (once), Active <-> Paused (owner).
//! `repay` and `distribute_fee` run inside a single reentrancy lock.

use std::cell::Cell;

use backstop_common::BackstopError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Active,
    Paused,
}

#[derive(Debug)]
pub struct SafetyGate {
    status: Cell<Lifecycle>,
    entered: Cell<bool>,
}

impl Default for SafetyGate {
    fn default() -> Self {
        Self {
            status: Cell::new(Lifecycle::Uninitialized),
            entered: Cell::new(false),
        }
    }
}

impl SafetyGate {
    pub fn status(&self) -> Lifecycle {
        self.status.get()
    }

    pub fn is_entered(&self) -> bool {
        self.entered.get()
    }

    pub fn require_uninitialized(&self) -> Result<(), BackstopError> {
        if self.status.get() != Lifecycle::Uninitialized {
            return Err(BackstopError::AlreadyInitialized);
        }
        Ok(())
    }

    pub fn require_initialized(&self) -> Result<(), BackstopError> {
        if self.status.get() == Lifecycle::Uninitialized {
            return Err(BackstopError::NotInitialized);
        }
        Ok(())
    }

    pub fn require_active(&self) -> Result<(), BackstopError> {
        match self.status.get() {
            Lifecycle::Active => Ok(()),
            Lifecycle::Paused => Err(BackstopError::Paused),
            Lifecycle::Uninitialized => Err(BackstopError::NotInitialized),
        }
    }

    /// Uninitialized -> Active. Fires at most once.
    pub fn activate(&self) -> Result<(), BackstopError> {
        self.require_uninitialized()?;
        self.status.set(Lifecycle::Active);
        Ok(())
    }

    pub fn pause(&self) -> Result<(), BackstopError> {
        self.require_active()?;
        self.status.set(Lifecycle::Paused);
        Ok(())
    }

    pub fn unpause(&self) -> Result<(), BackstopError> {
        match self.status.get() {
            Lifecycle::Paused => {
                self.status.set(Lifecycle::Active);
                Ok(())
            }
            Lifecycle::Active => Err(BackstopError::NotPaused),
            Lifecycle::Uninitialized => Err(BackstopError::NotInitialized),
        }
    }

    /// Put back a status captured earlier; leaves the lock alone
    pub(crate) fn restore(&self, status: Lifecycle) {
        self.status.set(status);
    }

    /// Take the reentrancy lock, then require the Active state.
    ///
    /// The lock is held until the returned guard drops, on success and
    /// error paths alike.
    pub fn enter(&self) -> Result<ReentrancyGuard<'_>, BackstopError> {
        if self.entered.get() {
            log::warn!("reentrant call rejected");
            return Err(BackstopError::ReentrantCall);
        }
        self.entered.set(true);
        let guard = ReentrancyGuard { entered: &self.entered };
        self.require_active()?;
        Ok(guard)
    }
}

#[must_use]
pub struct ReentrancyGuard<'a> {
    entered: &'a Cell<bool>,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        self.entered.set(false);
    }
}
