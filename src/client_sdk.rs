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

//! # Farm Vault - Client SDK
//!
//! This module provides a high-level client SDK for interacting with the Farm Vault program.
//! It derives every program address and builds the instructions with the exact account
//! ordering each processor expects.
//!
//! ## Features
//! - Address derivation for PDAs (authority state, vaults, vault token accounts, positions)
//! - Reward token account derivation (associated token accounts)
//! - Instruction building for all vault operations
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use farm_vault::client_sdk::{VaultClient, VaultConfig};
//! use solana_program::pubkey::Pubkey;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let program_id = Pubkey::new_unique();
//! let depositor = Pubkey::new_unique();
//! let depositor_token_account = Pubkey::new_unique();
//!
//! let client = VaultClient::new(program_id);
//! let config = VaultConfig::new(Pubkey::new_unique(), Pubkey::new_unique())?;
//!
//! // Approve the vault as delegate, then lock 100 tokens for six months
//! let instructions = client.deposit_with_approval_instructions(
//!     &config,
//!     &depositor,
//!     &depositor_token_account,
//!     0, // vault's next position id
//!     100,
//!     6,
//! )?;
//! # Ok(())
//! # }
//! ```

use borsh::BorshSerialize;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program, sysvar,
};
use spl_associated_token_account::get_associated_token_address;

use crate::{
    constants::{
        AUTHORITY_STATE_SEED_PREFIX, POSITION_SEED_PREFIX, REWARD_MINT_AUTHORITY_SEED_PREFIX,
        VAULT_STATE_SEED_PREFIX, VAULT_TOKEN_SEED_PREFIX,
    },
    types::{LockOption, VaultInstruction},
    utils::get_program_data_address,
};

/// Errors that can occur when using the vault client
#[derive(Debug)]
pub enum VaultClientError {
    /// Underlying and reward mints must differ
    IdenticalMints,
    /// Amount must be greater than zero
    ZeroAmount,
    /// Error building an SPL Token instruction
    TokenInstruction,
    /// Error during instruction serialization
    SerializationError,
}

impl From<std::io::Error> for VaultClientError {
    fn from(_error: std::io::Error) -> Self {
        Self::SerializationError
    }
}

impl std::fmt::Display for VaultClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VaultClientError::IdenticalMints => write!(f, "Underlying and reward mints must differ"),
            VaultClientError::ZeroAmount => write!(f, "Amount must be greater than 0"),
            VaultClientError::TokenInstruction => write!(f, "Failed to build SPL Token instruction"),
            VaultClientError::SerializationError => write!(f, "Failed to serialize instruction data"),
        }
    }
}

impl std::error::Error for VaultClientError {}

/// Identifies a vault by its mint pair.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Token depositors lock (the stablecoin)
    pub underlying_mint: Pubkey,
    /// Token minted as reward for matured positions
    pub reward_mint: Pubkey,
}

impl VaultConfig {
    /// Creates a new vault configuration
    ///
    /// # Errors
    /// * `IdenticalMints` - If the underlying and reward mints are the same
    pub fn new(underlying_mint: Pubkey, reward_mint: Pubkey) -> Result<Self, VaultClientError> {
        if underlying_mint == reward_mint {
            return Err(VaultClientError::IdenticalMints);
        }
        Ok(Self {
            underlying_mint,
            reward_mint,
        })
    }
}

/// Derived addresses for a vault configuration
#[derive(Debug, Clone)]
pub struct VaultAddresses {
    pub authority_state: Pubkey,
    pub reward_mint_authority: Pubkey,
    pub vault_state: Pubkey,
    pub vault_state_bump: u8,
    pub vault_token_account: Pubkey,
    pub vault_token_bump: u8,
}

/// High-level client for building Farm Vault instructions
pub struct VaultClient {
    /// The program ID of the deployed vault program
    program_id: Pubkey,
}

impl VaultClient {
    /// Creates a new vault client.
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    /// Gets the program ID of this client.
    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn derive_authority_state(&self) -> Pubkey {
        Pubkey::find_program_address(&[AUTHORITY_STATE_SEED_PREFIX], &self.program_id).0
    }

    /// Derives the PDA that must be set as mint authority of every reward mint.
    pub fn derive_reward_mint_authority(&self) -> Pubkey {
        Pubkey::find_program_address(&[REWARD_MINT_AUTHORITY_SEED_PREFIX], &self.program_id).0
    }

    /// Derives all addresses for a vault configuration.
    pub fn derive_vault_addresses(&self, config: &VaultConfig) -> VaultAddresses {
        let (vault_state, vault_state_bump) = Pubkey::find_program_address(
            &[
                VAULT_STATE_SEED_PREFIX,
                config.underlying_mint.as_ref(),
                config.reward_mint.as_ref(),
            ],
            &self.program_id,
        );
        let (vault_token_account, vault_token_bump) = Pubkey::find_program_address(
            &[VAULT_TOKEN_SEED_PREFIX, vault_state.as_ref()],
            &self.program_id,
        );

        VaultAddresses {
            authority_state: self.derive_authority_state(),
            reward_mint_authority: self.derive_reward_mint_authority(),
            vault_state,
            vault_state_bump,
            vault_token_account,
            vault_token_bump,
        }
    }

    /// Derives the position PDA for `position_id` in a vault.
    pub fn derive_position(&self, vault_state: &Pubkey, position_id: u64) -> Pubkey {
        Pubkey::find_program_address(
            &[POSITION_SEED_PREFIX, vault_state.as_ref(), &position_id.to_le_bytes()],
            &self.program_id,
        )
        .0
    }

    /// Reward tokens are paid to the owner's associated token account.
    pub fn reward_token_account(&self, owner: &Pubkey, config: &VaultConfig) -> Pubkey {
        get_associated_token_address(owner, &config.reward_mint)
    }

    fn build(&self, accounts: Vec<AccountMeta>, instruction: &VaultInstruction) -> Result<Instruction, VaultClientError> {
        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data: instruction.try_to_vec()?,
        })
    }

    /// Creates the authority initialization instruction (program upgrade authority only).
    pub fn initialize_authority_instruction(
        &self,
        upgrade_authority: &Pubkey,
        guardian: Pubkey,
        policy: Pubkey,
    ) -> Result<Instruction, VaultClientError> {
        self.build(
            vec![
                AccountMeta::new(*upgrade_authority, true),
                AccountMeta::new_readonly(system_program::id(), false),
                AccountMeta::new_readonly(sysvar::rent::id(), false),
                AccountMeta::new(self.derive_authority_state(), false),
                AccountMeta::new_readonly(get_program_data_address(&self.program_id), false),
            ],
            &VaultInstruction::InitializeAuthority { guardian, policy },
        )
    }

    fn role_accounts(&self, signer: &Pubkey) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new_readonly(*signer, true),
            AccountMeta::new(self.derive_authority_state(), false),
        ]
    }

    /// Creates a PushVault instruction approving (or revoking) a vault.
    pub fn push_vault_instruction(
        &self,
        governor: &Pubkey,
        vault_state: Pubkey,
        approved: bool,
    ) -> Result<Instruction, VaultClientError> {
        self.build(
            self.role_accounts(governor),
            &VaultInstruction::PushVault { vault: vault_state, approved },
        )
    }

    pub fn update_roles_instruction(
        &self,
        governor: &Pubkey,
        guardian: Option<Pubkey>,
        policy: Option<Pubkey>,
    ) -> Result<Instruction, VaultClientError> {
        self.build(
            self.role_accounts(governor),
            &VaultInstruction::UpdateRoles { guardian, policy },
        )
    }

    pub fn change_governor_instruction(
        &self,
        governor: &Pubkey,
        new_governor: Pubkey,
    ) -> Result<Instruction, VaultClientError> {
        self.build(
            self.role_accounts(governor),
            &VaultInstruction::ChangeGovernor { new_governor },
        )
    }

    /// Creates the vault initialization instruction. Pass an empty
    /// `lock_options` to install the default lock table.
    pub fn initialize_vault_instruction(
        &self,
        policy: &Pubkey,
        config: &VaultConfig,
        lock_options: Vec<LockOption>,
    ) -> Result<Instruction, VaultClientError> {
        let addresses = self.derive_vault_addresses(config);
        self.build(
            vec![
                AccountMeta::new(*policy, true),
                AccountMeta::new_readonly(addresses.authority_state, false),
                AccountMeta::new(addresses.vault_state, false),
                AccountMeta::new(addresses.vault_token_account, false),
                AccountMeta::new_readonly(config.underlying_mint, false),
                AccountMeta::new_readonly(config.reward_mint, false),
                AccountMeta::new_readonly(addresses.reward_mint_authority, false),
                AccountMeta::new_readonly(system_program::id(), false),
                AccountMeta::new_readonly(spl_token::id(), false),
                AccountMeta::new_readonly(sysvar::rent::id(), false),
            ],
            &VaultInstruction::InitializeVault { lock_options },
        )
    }

    pub fn set_lock_option_instruction(
        &self,
        policy: &Pubkey,
        config: &VaultConfig,
        option: LockOption,
    ) -> Result<Instruction, VaultClientError> {
        let addresses = self.derive_vault_addresses(config);
        self.build(
            vec![
                AccountMeta::new_readonly(*policy, true),
                AccountMeta::new_readonly(addresses.authority_state, false),
                AccountMeta::new(addresses.vault_state, false),
            ],
            &VaultInstruction::SetLockOption { option },
        )
    }

    /// Creates the SPL Token approve instruction that lets the vault pull `amount`.
    pub fn approve_deposit_instruction(
        &self,
        config: &VaultConfig,
        depositor: &Pubkey,
        depositor_token_account: &Pubkey,
        amount: u64,
    ) -> Result<Instruction, VaultClientError> {
        let addresses = self.derive_vault_addresses(config);
        spl_token::instruction::approve(
            &spl_token::id(),
            depositor_token_account,
            &addresses.vault_state,
            depositor,
            &[],
            amount,
        )
        .map_err(|_| VaultClientError::TokenInstruction)
    }

    /// Creates a deposit instruction. `position_id` must be the vault's
    /// current `next_position_id`.
    ///
    /// The position account is derived from that id, so a deposit that lands
    /// after another one built from the same id fails with
    /// `VaultError::StalePositionId`. Refetch the vault state and rebuild the
    /// instruction to retry.
    pub fn deposit_instruction(
        &self,
        config: &VaultConfig,
        depositor: &Pubkey,
        depositor_token_account: &Pubkey,
        position_id: u64,
        amount: u64,
        lock_selector: u8,
    ) -> Result<Instruction, VaultClientError> {
        if amount == 0 {
            return Err(VaultClientError::ZeroAmount);
        }
        let addresses = self.derive_vault_addresses(config);
        self.build(
            vec![
                AccountMeta::new(*depositor, true),
                AccountMeta::new_readonly(addresses.authority_state, false),
                AccountMeta::new(addresses.vault_state, false),
                AccountMeta::new(*depositor_token_account, false),
                AccountMeta::new(addresses.vault_token_account, false),
                AccountMeta::new(self.derive_position(&addresses.vault_state, position_id), false),
                AccountMeta::new_readonly(system_program::id(), false),
                AccountMeta::new_readonly(spl_token::id(), false),
            ],
            &VaultInstruction::Deposit { amount, lock_selector },
        )
    }

    /// Approve + deposit, ready to go into a single transaction.
    pub fn deposit_with_approval_instructions(
        &self,
        config: &VaultConfig,
        depositor: &Pubkey,
        depositor_token_account: &Pubkey,
        position_id: u64,
        amount: u64,
        lock_selector: u8,
    ) -> Result<Vec<Instruction>, VaultClientError> {
        Ok(vec![
            self.approve_deposit_instruction(config, depositor, depositor_token_account, amount)?,
            self.deposit_instruction(config, depositor, depositor_token_account, position_id, amount, lock_selector)?,
        ])
    }

    /// Creates a withdraw instruction. Rewards go to the depositor's
    /// associated reward token account.
    pub fn withdraw_instruction(
        &self,
        config: &VaultConfig,
        depositor: &Pubkey,
        depositor_token_account: &Pubkey,
        position_id: u64,
    ) -> Result<Instruction, VaultClientError> {
        let addresses = self.derive_vault_addresses(config);
        self.build(
            vec![
                AccountMeta::new_readonly(*depositor, true),
                AccountMeta::new_readonly(addresses.authority_state, false),
                AccountMeta::new(addresses.vault_state, false),
                AccountMeta::new(self.derive_position(&addresses.vault_state, position_id), false),
                AccountMeta::new(addresses.vault_token_account, false),
                AccountMeta::new(*depositor_token_account, false),
                AccountMeta::new(config.reward_mint, false),
                AccountMeta::new(self.reward_token_account(depositor, config), false),
                AccountMeta::new_readonly(addresses.reward_mint_authority, false),
                AccountMeta::new_readonly(spl_token::id(), false),
            ],
            &VaultInstruction::Withdraw { position_id },
        )
    }

    pub fn withdraw_penalties_instruction(
        &self,
        governor: &Pubkey,
        config: &VaultConfig,
        destination: &Pubkey,
        amount: u64,
    ) -> Result<Instruction, VaultClientError> {
        let addresses = self.derive_vault_addresses(config);
        self.build(
            vec![
                AccountMeta::new_readonly(*governor, true),
                AccountMeta::new_readonly(addresses.authority_state, false),
                AccountMeta::new(addresses.vault_state, false),
                AccountMeta::new(addresses.vault_token_account, false),
                AccountMeta::new(*destination, false),
                AccountMeta::new_readonly(spl_token::id(), false),
            ],
            &VaultInstruction::WithdrawPenalties { amount },
        )
    }

    pub fn pause_instruction(&self, guardian: &Pubkey, reason_code: u8) -> Result<Instruction, VaultClientError> {
        self.build(
            self.role_accounts(guardian),
            &VaultInstruction::PauseSystem { reason_code },
        )
    }

    pub fn unpause_instruction(&self, guardian: &Pubkey) -> Result<Instruction, VaultClientError> {
        self.build(self.role_accounts(guardian), &VaultInstruction::UnpauseSystem)
    }

    pub fn get_position_info_instruction(
        &self,
        config: &VaultConfig,
        position_id: u64,
    ) -> Result<Instruction, VaultClientError> {
        let addresses = self.derive_vault_addresses(config);
        self.build(
            vec![
                AccountMeta::new_readonly(addresses.vault_state, false),
                AccountMeta::new_readonly(self.derive_position(&addresses.vault_state, position_id), false),
            ],
            &VaultInstruction::GetPositionInfo { position_id },
        )
    }

    pub fn get_vault_info_instruction(&self, config: &VaultConfig) -> Result<Instruction, VaultClientError> {
        let addresses = self.derive_vault_addresses(config);
        self.build(
            vec![AccountMeta::new_readonly(addresses.vault_state, false)],
            &VaultInstruction::GetVaultInfo,
        )
    }

    pub fn get_version_instruction(&self) -> Result<Instruction, VaultClientError> {
        self.build(Vec::new(), &VaultInstruction::GetVersion)
    }
}
