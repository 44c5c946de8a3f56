//! Processors Module
//!
//! This module contains all processor functions organized by functionality.

pub mod authority;
pub mod deposits;
pub mod system_pause;
pub mod treasury;
pub mod utilities;
pub mod vault_creation;
pub mod withdrawals;

// Re-export authority and vault registry functions
pub use authority::*;

// Re-export ledger operations
pub use deposits::*;
pub use withdrawals::*;

// Re-export pause functions
pub use system_pause::*;

// Re-export treasury functions
pub use treasury::*;

// Re-export view functions
pub use utilities::*;

// Re-export vault creation functions
pub use vault_creation::*;
