//! Local network for the insurance fund
//!
//! Hosts a settlement token ledger, a margin vault and a staking
//! beneficiary behind the fund's collaborator traits, and provides the
//! all-or-nothing transaction layer ([`Chain::transact`]) that makes a
//! fund call atomic across every contract it touches.

pub mod beneficiary;
pub mod chain;
pub mod deploy;
pub mod journal;
pub mod token;
pub mod vault;

pub use beneficiary::*;
pub use chain::*;
pub use deploy::*;
pub use journal::*;
pub use token::*;
pub use vault::*;
