//! # Farm Vault Program
//!
//! Time-locked deposit vault for Solana. Depositors lock an underlying
//! stablecoin under one of the vault's lock options and receive a position id.
//! Withdrawing a position returns the principal, less an early withdrawal
//! penalty when the lock has not yet expired, and mints reward tokens for
//! matured positions.
//!
//! ## Roles
//! - **Governor**: approves vaults (`PushVault`), rotates roles, sweeps penalties
//! - **Guardian**: pauses and unpauses ledger operations
//! - **Policy**: creates vaults and edits their lock tables
//!
//! ## Accounts
//! - Authority state PDA: roles, approved vault registry, pause flag
//! - Vault state PDA per (underlying mint, reward mint): lock table and ledger totals
//! - Vault token account PDA: locked principal plus withheld penalties
//! - Position PDA per deposit
//! - Reward mint authority PDA: signs reward mints for approved vaults

use borsh::BorshDeserialize;
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

pub mod client_sdk;
pub mod constants;
pub mod error;
pub mod processors;
pub mod state;
pub mod types;
pub mod utils;

pub use constants::*;
pub use error::*;
pub use state::*;
pub use types::*;

use processors::*;

#[cfg(feature = "mainnet")]
solana_program::declare_id!("8YDXDoqQA7Ajmbu7WgXaAVTRaPr7wSZ1DX7GN4vy991J");

#[cfg(all(feature = "devnet", not(feature = "mainnet")))]
solana_program::declare_id!("49ot1etC153ZEbF7j6K6sN33LDffVKKZbnnFheE5oDHd");

#[cfg(not(any(feature = "mainnet", feature = "devnet")))]
solana_program::declare_id!("D3LDFFVcj9MULA85wYVFUCs4DAyYghyyr6YrpiHNDs49");

#[cfg(not(feature = "no-entrypoint"))]
solana_program::entrypoint!(process_instruction);

/// Program entrypoint: decodes a `VaultInstruction` and routes it.
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = VaultInstruction::try_from_slice(instruction_data).map_err(|e| {
        msg!("Failed to decode instruction: {:?}", e);
        ProgramError::InvalidInstructionData
    })?;

    match instruction {
        VaultInstruction::InitializeAuthority { guardian, policy } => {
            process_initialize_authority(program_id, accounts, guardian, policy)
        }
        VaultInstruction::PushVault { vault, approved } => {
            process_push_vault(program_id, accounts, vault, approved)
        }
        VaultInstruction::UpdateRoles { guardian, policy } => {
            process_update_roles(program_id, accounts, guardian, policy)
        }
        VaultInstruction::ChangeGovernor { new_governor } => {
            process_change_governor(program_id, accounts, new_governor)
        }
        VaultInstruction::InitializeVault { lock_options } => {
            process_initialize_vault(program_id, accounts, lock_options)
        }
        VaultInstruction::SetLockOption { option } => {
            process_set_lock_option(program_id, accounts, option)
        }
        VaultInstruction::Deposit { amount, lock_selector } => {
            process_deposit(program_id, accounts, amount, lock_selector)
        }
        VaultInstruction::Withdraw { position_id } => {
            process_withdraw(program_id, accounts, position_id)
        }
        VaultInstruction::WithdrawPenalties { amount } => {
            process_withdraw_penalties(program_id, accounts, amount)
        }
        VaultInstruction::PauseSystem { reason_code } => {
            process_pause_system(program_id, accounts, reason_code)
        }
        VaultInstruction::UnpauseSystem => process_unpause_system(program_id, accounts),
        VaultInstruction::GetPositionInfo { position_id } => {
            process_get_position_info(program_id, accounts, position_id)
        }
        VaultInstruction::GetVaultInfo => process_get_vault_info(program_id, accounts),
        VaultInstruction::GetVersion => process_get_version(program_id),
    }
}
