//! Single-owner authorization with two-step transfer
//!
//! The owner proposes a candidate; the candidate accepts. Nothing else in
//! the workspace grants privileges.

use serde::{Deserialize, Serialize};

use crate::error::BackstopError;
use crate::types::*;

/// Capability check used by every owner-gated entry point
pub trait Authority {
    fn is_authorized(&self, caller: &Pubkey) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ownership {
    #[serde(with = "serde_key")]
    owner: Pubkey,
    #[serde(with = "serde_key")]
    candidate: Pubkey,
}

impl Authority for Ownership {
    fn is_authorized(&self, caller: &Pubkey) -> bool {
        !is_zero(&self.owner) && caller == &self.owner
    }
}

impl Ownership {
    pub fn new(owner: Pubkey) -> Self {
        Self {
            owner,
            candidate: ZERO_KEY,
        }
    }

    pub fn owner(&self) -> Pubkey {
        self.owner
    }

    pub fn candidate(&self) -> Pubkey {
        self.candidate
    }

    /// Fail with `CallerNotOwner` unless `caller` is the owner
    pub fn require_owner(&self, caller: &Pubkey) -> Result<(), BackstopError> {
        if !self.is_authorized(caller) {
            log::warn!("rejected owner call from {}", fmt_key(caller));
            return Err(BackstopError::CallerNotOwner);
        }
        Ok(())
    }

    /// Step one: owner nominates a candidate
    pub fn set_owner(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<(), BackstopError> {
        self.require_owner(caller)?;
        if is_zero(&new_owner) {
            return Err(BackstopError::NewOwnerZero);
        }
        if new_owner == self.owner {
            return Err(BackstopError::SameAsOwner);
        }
        if new_owner == self.candidate {
            return Err(BackstopError::SameAsCandidate);
        }
        self.candidate = new_owner;
        Ok(())
    }

    /// Step two: candidate accepts. Returns the new owner.
    pub fn update_owner(&mut self, caller: &Pubkey) -> Result<Pubkey, BackstopError> {
        if is_zero(&self.candidate) {
            return Err(BackstopError::CandidateZero);
        }
        if caller != &self.candidate {
            return Err(BackstopError::CallerNotCandidate);
        }
        self.owner = self.candidate;
        self.candidate = ZERO_KEY;
        Ok(self.owner)
    }

    /// Drop ownership for good
    pub fn renounce(&mut self, caller: &Pubkey) -> Result<(), BackstopError> {
        self.require_owner(caller)?;
        self.owner = ZERO_KEY;
        self.candidate = ZERO_KEY;
        Ok(())
    }
}
