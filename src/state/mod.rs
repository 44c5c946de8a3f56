//! State Module
//!
//! This module contains all account state types for the program.

pub mod authority_state;
pub mod position_state;
pub mod vault_state;

// Re-export all state types for easy access
pub use authority_state::*;
pub use position_state::*;
pub use vault_state::*;
