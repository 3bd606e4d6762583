/// Insurance fund instruction handlers

pub mod admin;
pub mod capacity;
pub mod distribute_fee;
pub mod initialize;
pub mod repay;

pub use admin::*;
pub use capacity::*;
pub use distribute_fee::*;
pub use initialize::*;
pub use repay::*;

#[cfg(test)]
pub(crate) mod test_host;
