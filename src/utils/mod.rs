//! Utility Functions
//!
//! This module contains shared utility functions used throughout the program,
//! organized by concern: validation, serialization, account creation, and
//! program authority checks.

pub mod program_authority;
pub mod rent;
pub mod serialization;
pub mod validation;

// Re-export commonly used items for convenience
pub use program_authority::*;
pub use rent::*;
pub use serialization::*;
pub use validation::*;
