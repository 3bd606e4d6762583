//! Backstop Insurance Fund
//!
//! Absorbs the protocol's settlement shortfalls and releases surplus once
//! the fund sits above its configured threshold.
//!
//! The fund only talks to its collaborators through the traits in
//! [`interfaces`]; the execution environment that resolves identifiers to
//! contracts is the [`Host`].

pub mod events;
pub mod fund;
pub mod instructions;
pub mod interfaces;
pub mod state;

pub use events::*;
pub use fund::{FundCheckpoint, InsuranceFund};
pub use interfaces::*;
pub use state::*;
