//! Deposit position accounts
//!
//! Each deposit lives in its own PDA keyed by the vault and a global,
//! auto-incrementing position id. The lock terms are copied in at deposit
//! time, so later lock table edits never change an open position.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::AccountInfo,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::{
    constants::POSITION_SEED_PREFIX,
    error::VaultError,
    types::lock_options::{quote_withdrawal, LockOption, WithdrawalQuote},
};

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct PositionState {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub position_id: u64,
    pub principal: u64,
    /// Lock terms in force when the deposit was made
    pub lock_option: LockOption,
    pub created_at: i64,
    pub unlocks_at: i64,
    pub is_withdrawn: bool,
    pub withdrawn_at: i64,
    pub payout: u64,
    pub penalty: u64,
    pub reward: u64,
    pub bump: u8,
}

impl PositionState {
    pub const LEN: usize = 32 + 32 + 8 + 8 + LockOption::LEN + 8 + 8 + 1 + 8 + 8 + 8 + 8 + 1;

    pub fn new(
        vault: Pubkey,
        owner: Pubkey,
        position_id: u64,
        principal: u64,
        lock_option: LockOption,
        created_at: i64,
        bump: u8,
    ) -> Result<Self, VaultError> {
        Ok(Self {
            vault,
            owner,
            position_id,
            principal,
            lock_option,
            created_at,
            unlocks_at: lock_option.unlocks_at(created_at)?,
            is_withdrawn: false,
            withdrawn_at: 0,
            payout: 0,
            penalty: 0,
            reward: 0,
            bump,
        })
    }

    /// Derives the position PDA for `position_id` within a vault.
    pub fn derive_address(vault_state: &Pubkey, position_id: u64, program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[POSITION_SEED_PREFIX, vault_state.as_ref(), &position_id.to_le_bytes()],
            program_id,
        )
    }

    /// Loads the position stored under `position_id`.
    ///
    /// An address that is not the derived PDA is rejected as an invalid
    /// account; a correct address with no program-owned data is reported as
    /// `PositionNotFound`.
    pub fn load(
        account: &AccountInfo,
        vault_state: &Pubkey,
        position_id: u64,
        program_id: &Pubkey,
    ) -> Result<Self, ProgramError> {
        let (expected, _) = Self::derive_address(vault_state, position_id, program_id);
        if *account.key != expected {
            msg!("❌ Position account does not match position {}", position_id);
            msg!("   Expected: {}, Provided: {}", expected, account.key);
            return Err(VaultError::InvalidAccount {
                account: *account.key,
                reason: "position PDA mismatch".to_string(),
            }
            .into());
        }

        if account.owner != program_id || account.data_is_empty() {
            msg!("❌ Position {} does not exist", position_id);
            return Err(VaultError::PositionNotFound { position_id }.into());
        }

        let data = account.data.borrow();
        Self::deserialize(&mut &data[..]).map_err(|e| {
            msg!("❌ PositionState deserialization failed: {:?}", e);
            ProgramError::InvalidAccountData
        })
    }

    /// Quotes what a withdrawal at `now` would settle to.
    pub fn quote(&self, now: i64, underlying_decimals: u8, reward_decimals: u8) -> Result<WithdrawalQuote, VaultError> {
        let elapsed = now.saturating_sub(self.created_at);
        quote_withdrawal(self.principal, &self.lock_option, elapsed, underlying_decimals, reward_decimals)
    }

    /// Checks the caller may settle this position.
    pub fn ensure_withdrawable_by(&self, caller: &Pubkey) -> Result<(), VaultError> {
        if self.owner != *caller {
            return Err(VaultError::Unauthorized);
        }
        if self.is_withdrawn {
            return Err(VaultError::AlreadyWithdrawn { position_id: self.position_id });
        }
        Ok(())
    }

    /// Marks the position settled. `reward_minted` may be lower than the quote
    /// when the vault has lost its reward approval.
    pub fn mark_withdrawn(&mut self, quote: &WithdrawalQuote, reward_minted: u64, now: i64) -> Result<(), VaultError> {
        if self.is_withdrawn {
            return Err(VaultError::AlreadyWithdrawn { position_id: self.position_id });
        }
        self.is_withdrawn = true;
        self.withdrawn_at = now;
        self.payout = quote.payout;
        self.penalty = quote.penalty;
        self.reward = reward_minted;
        Ok(())
    }
}
