//! Base token index price

use std::rc::Rc;

use backstop_common::{BackstopError, Ownership, Pubkey};
use model_safety::decimals::{normalize_decimals, MAX_DECIMALS};

use crate::feed::PriceFeed;

/// A token priced by an external feed.
///
/// The feed's precision is read once when the feed is attached and cached;
/// every index price is rescaled from it to the token's own precision.
pub struct BaseToken {
    decimals: u8,
    price_feed: Rc<dyn PriceFeed>,
    price_feed_decimals: u8,
    ownership: Ownership,
}

impl BaseToken {
    pub fn new(owner: Pubkey, decimals: u8, price_feed: Rc<dyn PriceFeed>) -> Result<Self, BackstopError> {
        if decimals > MAX_DECIMALS {
            return Err(BackstopError::InvalidDecimals);
        }
        let price_feed_decimals = checked_feed_decimals(price_feed.as_ref())?;

        Ok(Self {
            decimals,
            price_feed,
            price_feed_decimals,
            ownership: Ownership::new(owner),
        })
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn price_feed_decimals(&self) -> u8 {
        self.price_feed_decimals
    }

    /// Feed price over `interval`, expressed in this token's decimals
    pub fn index_price(&self, interval: u32) -> Result<u128, BackstopError> {
        let raw = self.price_feed.get_price(interval)?;
        normalize_decimals(raw, self.price_feed_decimals, self.decimals)
            .ok_or(BackstopError::Overflow)
    }

    /// Swap the feed (owner only) and re-cache its precision
    pub fn set_price_feed(&mut self, caller: &Pubkey, price_feed: Rc<dyn PriceFeed>) -> Result<(), BackstopError> {
        self.ownership.require_owner(caller)?;
        let price_feed_decimals = checked_feed_decimals(price_feed.as_ref())?;

        self.price_feed = price_feed;
        self.price_feed_decimals = price_feed_decimals;
        log::info!("base token price feed replaced, feed decimals {}", price_feed_decimals);
        Ok(())
    }
}

fn checked_feed_decimals(feed: &dyn PriceFeed) -> Result<u8, BackstopError> {
    let decimals = feed.decimals();
    if decimals > MAX_DECIMALS {
        return Err(BackstopError::InvalidDecimals);
    }
    Ok(decimals)
}
