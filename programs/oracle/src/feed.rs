//! Price feed interface

use std::rc::Rc;

use backstop_common::BackstopError;

pub trait PriceFeed {
    /// Fixed-point precision of every price this feed returns
    fn decimals(&self) -> u8;

    /// Time-weighted price over the last `interval` seconds, in feed decimals
    fn get_price(&self, interval: u32) -> Result<u128, BackstopError>;
}

impl<T: PriceFeed + ?Sized> PriceFeed for Rc<T> {
    fn decimals(&self) -> u8 {
        (**self).decimals()
    }

    fn get_price(&self, interval: u32) -> Result<u128, BackstopError> {
        (**self).get_price(interval)
    }
}
