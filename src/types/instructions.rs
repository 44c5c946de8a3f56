//! Vault Instructions
//!
//! This module contains all the instruction definitions for the Farm Vault Program.
//! Instructions are Borsh encoded; the variant index is the 1-byte discriminator.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::types::lock_options::LockOption;

/// All supported instructions for the Farm Vault Program.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub enum VaultInstruction {
    /// Creates the authority state. Only the program upgrade authority may
    /// call this; the signer becomes the governor.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Program upgrade authority
    /// 1. `[]` System program
    /// 2. `[]` Rent sysvar
    /// 3. `[writable]` Authority state PDA
    /// 4. `[]` Program data account
    InitializeAuthority {
        guardian: Pubkey,
        policy: Pubkey,
    },

    /// Approves (`approved = true`) or revokes a vault state address in the
    /// authority registry. Approved vaults accept deposits and mint rewards.
    ///
    /// Accounts:
    /// 0. `[signer]` Governor
    /// 1. `[writable]` Authority state PDA
    PushVault {
        vault: Pubkey,
        approved: bool,
    },

    /// Replaces the guardian and/or policy role (governor only).
    ///
    /// Accounts:
    /// 0. `[signer]` Governor
    /// 1. `[writable]` Authority state PDA
    UpdateRoles {
        guardian: Option<Pubkey>,
        policy: Option<Pubkey>,
    },

    /// Proposes, completes, or cancels a governor hand-over guarded by a
    /// 72-hour timelock. Repeating the proposal after the timelock completes it.
    ///
    /// Accounts:
    /// 0. `[signer]` Governor
    /// 1. `[writable]` Authority state PDA
    ChangeGovernor {
        new_governor: Pubkey,
    },

    /// Creates a vault for an underlying mint and reward mint pair.
    /// An empty `lock_options` installs the default lock table.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Policy
    /// 1. `[]` Authority state PDA
    /// 2. `[writable]` Vault state PDA
    /// 3. `[writable]` Vault token account PDA
    /// 4. `[]` Underlying mint
    /// 5. `[]` Reward mint (mint authority must be the reward mint authority PDA)
    /// 6. `[]` Reward mint authority PDA
    /// 7. `[]` System program
    /// 8. `[]` SPL Token program
    /// 9. `[]` Rent sysvar
    InitializeVault {
        lock_options: Vec<LockOption>,
    },

    /// Inserts or replaces one lock option (policy only). Open positions keep
    /// the terms they were created with.
    ///
    /// Accounts:
    /// 0. `[signer]` Policy
    /// 1. `[]` Authority state PDA
    /// 2. `[writable]` Vault state PDA
    SetLockOption {
        option: LockOption,
    },

    /// Locks `amount` underlying tokens under `lock_selector`. The depositor
    /// must have approved the vault state PDA as delegate for at least
    /// `amount`. Returns the new position id as return data.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Depositor
    /// 1. `[]` Authority state PDA
    /// 2. `[writable]` Vault state PDA
    /// 3. `[writable]` Depositor underlying token account
    /// 4. `[writable]` Vault token account PDA
    /// 5. `[writable]` Position PDA for `vault_state.next_position_id`
    /// 6. `[]` System program
    /// 7. `[]` SPL Token program
    Deposit {
        amount: u64,
        lock_selector: u8,
    },

    /// Settles a position. Returns the underlying payout as return data.
    ///
    /// Accounts:
    /// 0. `[signer]` Depositor (position owner)
    /// 1. `[]` Authority state PDA
    /// 2. `[writable]` Vault state PDA
    /// 3. `[writable]` Position PDA
    /// 4. `[writable]` Vault token account PDA
    /// 5. `[writable]` Depositor underlying token account
    /// 6. `[writable]` Reward mint
    /// 7. `[writable]` Depositor reward token account
    /// 8. `[]` Reward mint authority PDA
    /// 9. `[]` SPL Token program
    Withdraw {
        position_id: u64,
    },

    /// Sweeps withheld early-withdrawal penalties (governor only).
    ///
    /// Accounts:
    /// 0. `[signer]` Governor
    /// 1. `[]` Authority state PDA
    /// 2. `[writable]` Vault state PDA
    /// 3. `[writable]` Vault token account PDA
    /// 4. `[writable]` Destination underlying token account
    /// 5. `[]` SPL Token program
    WithdrawPenalties {
        amount: u64,
    },

    /// Pause every ledger operation (guardian only)
    ///
    /// Accounts:
    /// 0. `[signer]` Guardian
    /// 1. `[writable]` Authority state PDA
    PauseSystem {
        reason_code: u8,
    },

    /// Resume ledger operations (guardian only)
    ///
    /// Accounts:
    /// 0. `[signer]` Guardian
    /// 1. `[writable]` Authority state PDA
    UnpauseSystem,

    /// **VIEW INSTRUCTION**: logs a position and returns a withdrawal quote
    /// at the current clock as return data.
    ///
    /// Accounts:
    /// 0. `[]` Vault state PDA
    /// 1. `[]` Position PDA
    GetPositionInfo {
        position_id: u64,
    },

    /// **VIEW INSTRUCTION**: logs vault totals and the lock table.
    ///
    /// Accounts:
    /// 0. `[]` Vault state PDA
    GetVaultInfo,

    /// Logs the program name and version. No accounts required.
    GetVersion,
}
