//! Backstop Oracle
//!
//! Price feeds and the decimal normalization used to express a feed's raw
//! price in a base token's own precision.
//!
//! ## Components
//!
//! - **PriceFeed**: `decimals()` plus `get_price(interval)` (time-weighted
//!   over `interval` seconds, latest for 0)
//! - **PriceOracle**: in-memory feed keeping timestamped observations
//! - **BaseToken**: caches the feed's decimals and rescales its price
//!
//! ```text
//! index_price = raw_price * 10^token_decimals / 10^feed_decimals
//! ```

pub mod base_token;
pub mod feed;
pub mod state;

pub use base_token::BaseToken;
pub use feed::PriceFeed;
pub use state::{Observation, PriceOracle, MAX_OBSERVATIONS};
