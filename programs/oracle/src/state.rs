//! Oracle state structures
//!
//! Minimal price oracle for local networks and tests. Keeps a bounded
//! history of observations and answers time-weighted averages over it.

use std::cell::{Cell, RefCell};

use backstop_common::{fmt_key, BackstopError, Ownership, Pubkey};

use crate::feed::PriceFeed;

/// Observations kept before the oldest is dropped
pub const MAX_OBSERVATIONS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// Price in feed decimals
    pub price: u128,
    /// Unix timestamp of the observation
    pub timestamp: i64,
}

/// Price oracle account state
///
/// Only the authority may push prices. The clock only moves forward.
pub struct PriceOracle {
    authority: Ownership,
    decimals: u8,
    observations: RefCell<Vec<Observation>>,
    now: Cell<i64>,
}

impl PriceOracle {
    /// Create a new price oracle with no observations
    pub fn new(authority: Pubkey, decimals: u8) -> Self {
        Self {
            authority: Ownership::new(authority),
            decimals,
            observations: RefCell::new(Vec::new()),
            now: Cell::new(0),
        }
    }

    /// Push a new observation (authority only)
    pub fn update_price(&self, caller: &Pubkey, price: u128, timestamp: i64) -> Result<(), BackstopError> {
        self.authority.require_owner(caller)?;
        if timestamp < self.now.get() {
            return Err(BackstopError::InvalidTimestamp);
        }

        let mut observations = self.observations.borrow_mut();
        if observations.len() == MAX_OBSERVATIONS {
            observations.remove(0);
        }
        observations.push(Observation { price, timestamp });
        self.now.set(timestamp);

        log::debug!(
            "oracle {}: price {} at {}",
            fmt_key(&self.authority.owner()),
            price,
            timestamp
        );
        Ok(())
    }

    /// Advance the oracle clock without a new price
    pub fn advance_to(&self, timestamp: i64) -> Result<(), BackstopError> {
        if timestamp < self.now.get() {
            return Err(BackstopError::InvalidTimestamp);
        }
        self.now.set(timestamp);
        Ok(())
    }

    pub fn latest(&self) -> Option<Observation> {
        self.observations.borrow().last().copied()
    }

    pub fn now(&self) -> i64 {
        self.now.get()
    }
}

impl PriceFeed for PriceOracle {
    fn decimals(&self) -> u8 {
        self.decimals
    }

    fn get_price(&self, interval: u32) -> Result<u128, BackstopError> {
        let observations = self.observations.borrow();
        twap(&observations, self.now.get(), interval)
    }
}

/// Time-weighted average of `observations` over `[now - interval, now]`.
///
/// Each observation holds until the next one (the last until `now`). Time
/// before the first observation is not counted. A zero interval, or a
/// window with no elapsed time, returns the latest price.
pub fn twap(observations: &[Observation], now: i64, interval: u32) -> Result<u128, BackstopError> {
    let latest = observations.last().ok_or(BackstopError::PriceUnavailable)?;
    if interval == 0 {
        return Ok(latest.price);
    }

    let window_start = now.saturating_sub(interval as i64);
    let mut weighted: u128 = 0;
    let mut elapsed: u128 = 0;

    for (i, obs) in observations.iter().enumerate() {
        let seg_end = observations
            .get(i + 1)
            .map(|next| next.timestamp)
            .unwrap_or(now)
            .min(now);
        let seg_start = obs.timestamp.max(window_start);
        if seg_end <= seg_start {
            continue;
        }

        let duration = (seg_end - seg_start) as u128;
        let part = obs
            .price
            .checked_mul(duration)
            .ok_or(BackstopError::Overflow)?;
        weighted = weighted.checked_add(part).ok_or(BackstopError::Overflow)?;
        elapsed += duration;
    }

    if elapsed == 0 {
        return Ok(latest.price);
    }
    Ok(weighted / elapsed)
}
