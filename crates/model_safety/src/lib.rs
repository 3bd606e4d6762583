//! Pure Rust safety model for the insurance fund
//! No host dependencies, no unwrap/panic, all functions total

pub mod state;
pub mod math;
pub mod decimals;
pub mod fund;
pub mod helpers;
pub mod transitions;

// Re-export commonly used types
pub use state::*;
pub use helpers::*;
pub use transitions::*;
