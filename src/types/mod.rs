//! Types Module
//!
//! This module contains the instruction, lock table, and pause reason types
//! for the Farm Vault Program.

pub mod instructions;
pub mod lock_options;
pub mod pause_reason;

// Re-export all types for easy access
pub use instructions::*;
pub use lock_options::*;
pub use pause_reason::*;
