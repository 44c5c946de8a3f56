/*
MIT License

Copyright (c) 2024 Davinci

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! # Common Test Utilities
//!
//! This module provides shared utilities and helpers for integration tests
//! across all test modules. It includes:
//!
//! - Token creation and minting helpers
//! - Authority and vault setup utilities
//! - Test environment configuration (clock control, transaction helpers)

pub mod setup;
pub mod tokens;
pub mod vault_helpers;

// Re-export commonly used types and functions
#[allow(unused_imports)]
pub use setup::*;
#[allow(unused_imports)]
pub use tokens::*;
#[allow(unused_imports)]
pub use vault_helpers::*;

// Re-export external dependencies commonly used in tests
// Allow unused imports since these are provided for optional use across test modules
#[allow(unused_imports)]
pub use borsh::{BorshDeserialize, BorshSerialize};
#[allow(unused_imports)]
pub use solana_program::{
    instruction::{AccountMeta, Instruction, InstructionError},
    pubkey::Pubkey,
};
#[allow(unused_imports)]
pub use solana_sdk::{
    program_pack::Pack,
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};
#[allow(unused_imports)]
pub use spl_token::{
    instruction as token_instruction,
    state::{Account as TokenAccount, Mint as MintAccount},
};
#[allow(unused_imports)]
pub use solana_program_test::*;

// Re-export program-specific imports
#[allow(unused_imports)]
pub use farm_vault::{
    client_sdk::{VaultClient, VaultConfig},
    error::VaultError,
    process_instruction,
    state::{AuthorityState, PositionState, VaultState},
    types::{LockOption, VaultInstruction, WithdrawalQuote},
    ID as PROGRAM_ID,
};

/// Test result type alias for convenience
pub type TestResult = Result<(), BanksClientError>;

/// Common test constants
pub mod constants {
    /// Stablecoin decimal places (USDC-like)
    pub const STABLECOIN_DECIMALS: u8 = 6;

    /// Reward token decimal places
    #[allow(dead_code)]
    pub const REWARD_DECIMALS: u8 = 6;

    /// One whole stablecoin in base units
    pub const ONE_TOKEN: u64 = 1_000_000;

    /// Starting stablecoin balance of the test depositor (1000 tokens)
    #[allow(dead_code)]
    pub const INITIAL_USER_BALANCE: u64 = 1_000 * ONE_TOKEN;

    /// Standard deposit used across tests (100 tokens)
    #[allow(dead_code)]
    pub const DEPOSIT_AMOUNT: u64 = 100 * ONE_TOKEN;

    /// Default SOL airdrop amount for test users
    #[allow(dead_code)]
    pub const DEFAULT_SOL_AIRDROP: u64 = 2_000_000_000; // 2 SOL
}
