//! Vault ledger state
//!
//! One `VaultState` exists per (underlying mint, reward mint) pair. Besides the
//! lock table it tracks the ledger totals the vault token account must
//! reconcile with:
//!
//! `vault token balance == total_principal_locked + available_penalties()`

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::AccountInfo,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::{
    constants::{MAX_LOCK_OPTIONS, VAULT_STATE_SEED_PREFIX, VAULT_TOKEN_SEED_PREFIX},
    error::VaultError,
    types::lock_options::{find_lock_option, upsert_lock_option, LockOption, WithdrawalQuote},
};

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct VaultState {
    /// Authority state this vault answers to
    pub authority: Pubkey,
    pub underlying_mint: Pubkey,
    pub reward_mint: Pubkey,
    /// Token account holding locked principal and withheld penalties
    pub vault_token_account: Pubkey,
    pub underlying_decimals: u8,
    pub reward_decimals: u8,

    pub lock_options: Vec<LockOption>,

    /// Id the next deposit will receive
    pub next_position_id: u64,

    pub total_principal_locked: u64,
    pub total_deposits: u64,
    pub total_withdrawals: u64,
    pub total_penalties_accrued: u64,
    pub total_penalties_withdrawn: u64,
    pub total_rewards_minted: u64,

    pub vault_state_bump: u8,
    pub vault_token_bump: u8,
    pub last_update_timestamp: i64,
}

impl VaultState {
    pub const LEN: usize =
        32 +                                     // authority
        32 +                                     // underlying_mint
        32 +                                     // reward_mint
        32 +                                     // vault_token_account
        1 +                                      // underlying_decimals
        1 +                                      // reward_decimals
        4 + MAX_LOCK_OPTIONS * LockOption::LEN + // lock_options
        8 +                                      // next_position_id
        8 +                                      // total_principal_locked
        8 +                                      // total_deposits
        8 +                                      // total_withdrawals
        8 +                                      // total_penalties_accrued
        8 +                                      // total_penalties_withdrawn
        8 +                                      // total_rewards_minted
        1 +                                      // vault_state_bump
        1 +                                      // vault_token_bump
        8;                                       // last_update_timestamp

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        authority: Pubkey,
        underlying_mint: Pubkey,
        reward_mint: Pubkey,
        vault_token_account: Pubkey,
        underlying_decimals: u8,
        reward_decimals: u8,
        lock_options: Vec<LockOption>,
        vault_state_bump: u8,
        vault_token_bump: u8,
    ) -> Self {
        Self {
            authority,
            underlying_mint,
            reward_mint,
            vault_token_account,
            underlying_decimals,
            reward_decimals,
            lock_options,
            next_position_id: 0,
            total_principal_locked: 0,
            total_deposits: 0,
            total_withdrawals: 0,
            total_penalties_accrued: 0,
            total_penalties_withdrawn: 0,
            total_rewards_minted: 0,
            vault_state_bump,
            vault_token_bump,
            last_update_timestamp: 0,
        }
    }

    /// Loads a vault state, checking ownership and the PDA derived from its own mints.
    pub fn load_from_account(
        account: &AccountInfo,
        program_id: &Pubkey,
    ) -> Result<Self, ProgramError> {
        if account.owner != program_id {
            msg!("❌ SECURITY VIOLATION: Vault state account not owned by program");
            msg!("   Account: {}", account.key);
            return Err(ProgramError::IncorrectProgramId);
        }

        let state = {
            let data = account.data.borrow();
            if data.is_empty() {
                return Err(ProgramError::UninitializedAccount);
            }
            Self::deserialize(&mut &data[..]).map_err(|e| {
                msg!("❌ VaultState deserialization failed: {:?}", e);
                ProgramError::InvalidAccountData
            })?
        };

        let expected = Pubkey::create_program_address(&state.signer_seeds(), program_id)
            .map_err(|_| ProgramError::InvalidSeeds)?;
        if expected != *account.key {
            msg!("❌ SECURITY VIOLATION: Vault state PDA mismatch");
            msg!("   Expected: {}, Provided: {}", expected, account.key);
            return Err(ProgramError::InvalidAccountData);
        }
        Ok(state)
    }

    /// Seeds used to sign as the vault state PDA (delegate and token account owner).
    pub fn signer_seeds(&self) -> [&[u8]; 4] {
        [
            VAULT_STATE_SEED_PREFIX,
            self.underlying_mint.as_ref(),
            self.reward_mint.as_ref(),
            std::slice::from_ref(&self.vault_state_bump),
        ]
    }

    /// Derives the vault token account address for a vault state.
    pub fn derive_vault_token_account(vault_state: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[VAULT_TOKEN_SEED_PREFIX, vault_state.as_ref()], program_id)
    }

    pub fn lock_option(&self, selector: u8) -> Result<LockOption, VaultError> {
        find_lock_option(&self.lock_options, selector)
    }

    pub fn set_lock_option(&mut self, option: LockOption) -> Result<(), VaultError> {
        upsert_lock_option(&mut self.lock_options, option)
    }

    /// Penalties withheld and not yet swept.
    pub fn available_penalties(&self) -> u64 {
        self.total_penalties_accrued
            .saturating_sub(self.total_penalties_withdrawn)
    }

    /// Token balance the vault token account must hold.
    pub fn expected_vault_balance(&self) -> Result<u64, VaultError> {
        self.total_principal_locked
            .checked_add(self.available_penalties())
            .ok_or(VaultError::ArithmeticOverflow)
    }

    /// Books a deposit and hands out the next position id.
    pub fn record_deposit(&mut self, amount: u64, timestamp: i64) -> Result<u64, VaultError> {
        let position_id = self.next_position_id;
        self.next_position_id = self
            .next_position_id
            .checked_add(1)
            .ok_or(VaultError::ArithmeticOverflow)?;
        self.total_principal_locked = self
            .total_principal_locked
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow)?;
        self.total_deposits = self
            .total_deposits
            .checked_add(1)
            .ok_or(VaultError::ArithmeticOverflow)?;
        self.last_update_timestamp = timestamp;
        Ok(position_id)
    }

    /// Books a settled position: principal leaves the locked total, the
    /// penalty stays behind as treasury balance, rewards are counted.
    pub fn record_withdrawal(&mut self, quote: &WithdrawalQuote, rewards_minted: u64, timestamp: i64) -> Result<(), VaultError> {
        self.total_principal_locked = self
            .total_principal_locked
            .checked_sub(quote.principal)
            .ok_or(VaultError::ArithmeticOverflow)?;
        self.total_penalties_accrued = self
            .total_penalties_accrued
            .checked_add(quote.penalty)
            .ok_or(VaultError::ArithmeticOverflow)?;
        self.total_rewards_minted = self
            .total_rewards_minted
            .checked_add(rewards_minted)
            .ok_or(VaultError::ArithmeticOverflow)?;
        self.total_withdrawals = self
            .total_withdrawals
            .checked_add(1)
            .ok_or(VaultError::ArithmeticOverflow)?;
        self.last_update_timestamp = timestamp;
        Ok(())
    }

    /// Books a penalty sweep by the governor.
    pub fn record_penalty_withdrawal(&mut self, amount: u64, timestamp: i64) -> Result<(), VaultError> {
        let available = self.available_penalties();
        if amount > available {
            return Err(VaultError::InsufficientPenaltyBalance { requested: amount, available });
        }
        self.total_penalties_withdrawn = self
            .total_penalties_withdrawn
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow)?;
        self.last_update_timestamp = timestamp;
        Ok(())
    }
}
