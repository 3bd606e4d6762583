//! Shared types for the backstop programs

pub mod error;
pub mod ownable;
pub mod types;

pub use error::*;
pub use ownable::*;
pub use types::*;
