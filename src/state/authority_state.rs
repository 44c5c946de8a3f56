//! Authority state: roles, approved vault registry, and global pause
//!
//! The authority holds three roles. The governor approves vaults and sweeps
//! penalties, the guardian pauses and unpauses the system, and the policy
//! role creates vaults and edits lock tables. Reward minting is only signed
//! for vaults the governor has pushed into the registry.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::AccountInfo,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::{
    constants::{AUTHORITY_STATE_SEED_PREFIX, GOVERNOR_CHANGE_TIMELOCK_SECONDS, MAX_VAULTS},
    error::VaultError,
};

/// Result of processing a governor hand-over request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GovernorChangeResult {
    /// Hand-over was proposed and the 72-hour timer started
    Initiated {
        new_governor: Pubkey,
        previous_pending: Option<Pubkey>,
    },
    /// Hand-over completed after the timelock
    Completed {
        old_governor: Pubkey,
        new_governor: Pubkey,
    },
    /// Pending hand-over was cancelled by re-proposing the current governor
    Cancelled,
    /// Nothing pending and the current governor was proposed
    NoChange,
    /// Proposal already pending and the timelock has not elapsed
    Pending {
        pending_governor: Pubkey,
        remaining_seconds: i64,
    },
}

/// Program-wide access control state stored at the `authority_state` PDA.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct AuthorityState {
    /// Approves vaults, rotates roles, sweeps penalties
    pub governor: Pubkey,

    /// Pauses and unpauses the system
    pub guardian: Pubkey,

    /// Creates vaults and edits lock tables
    pub policy: Pubkey,

    /// Vault state PDAs allowed to take deposits and mint rewards
    pub approved_vaults: Vec<Pubkey>,

    /// Global pause state - when true, deposits, withdrawals and sweeps are blocked
    pub is_paused: bool,

    /// Unix timestamp when the system was paused
    pub pause_timestamp: i64,

    /// Pause reason code (see `PauseReason`)
    pub pause_reason_code: u8,

    /// Pending governor hand-over (None if no change pending)
    pub pending_governor: Option<Pubkey>,

    /// Timestamp when the pending hand-over was proposed
    pub governor_change_timestamp: i64,

    pub bump: u8,
}

impl AuthorityState {
    /// Space reserved for the account:
    /// - governor, guardian, policy: 3 * 32 bytes
    /// - approved_vaults: 4-byte length + MAX_VAULTS * 32 bytes
    /// - is_paused: 1, pause_timestamp: 8, pause_reason_code: 1
    /// - pending_governor: 33 (Option<Pubkey>)
    /// - governor_change_timestamp: 8
    /// - bump: 1
    pub const LEN: usize = 3 * 32 + (4 + MAX_VAULTS * 32) + 1 + 8 + 1 + 33 + 8 + 1;

    /// Creates an unpaused authority with an empty vault registry.
    pub fn new(governor: Pubkey, guardian: Pubkey, policy: Pubkey, bump: u8) -> Self {
        Self {
            governor,
            guardian,
            policy,
            approved_vaults: Vec::new(),
            is_paused: false,
            pause_timestamp: 0,
            pause_reason_code: 0,
            pending_governor: None,
            governor_change_timestamp: 0,
            bump,
        }
    }

    /// Loads the authority state after checking the account is the canonical PDA.
    ///
    /// Deserialization tolerates trailing bytes because the account is sized
    /// for a full vault registry.
    pub fn load_from_account(
        account: &AccountInfo,
        program_id: &Pubkey,
    ) -> Result<Self, ProgramError> {
        let (expected_pda, _) =
            Pubkey::find_program_address(&[AUTHORITY_STATE_SEED_PREFIX], program_id);

        if *account.key != expected_pda {
            msg!("🚨 SECURITY: Invalid AuthorityState PDA provided");
            msg!("Expected: {}, Provided: {}", expected_pda, account.key);
            return Err(ProgramError::InvalidAccountData);
        }
        if account.owner != program_id {
            msg!("🚨 SECURITY: AuthorityState not owned by program");
            return Err(ProgramError::IncorrectProgramId);
        }

        let account_data = account.data.borrow();
        if account_data.is_empty() {
            msg!("❌ AuthorityState account is empty");
            return Err(ProgramError::UninitializedAccount);
        }

        Self::deserialize(&mut &account_data[..]).map_err(|e| {
            msg!("❌ AuthorityState deserialization failed: {:?}", e);
            ProgramError::InvalidAccountData
        })
    }

    pub fn is_governor(&self, key: &Pubkey) -> bool {
        self.governor == *key
    }

    pub fn is_guardian(&self, key: &Pubkey) -> bool {
        self.guardian == *key
    }

    pub fn is_policy(&self, key: &Pubkey) -> bool {
        self.policy == *key
    }

    pub fn is_vault_approved(&self, vault: &Pubkey) -> bool {
        self.approved_vaults.contains(vault)
    }

    /// Adds or removes a vault. Returns whether the registry changed.
    pub fn push_vault(&mut self, vault: Pubkey, approved: bool) -> Result<bool, VaultError> {
        if approved {
            if self.is_vault_approved(&vault) {
                return Ok(false);
            }
            if self.approved_vaults.len() >= MAX_VAULTS {
                return Err(VaultError::VaultRegistryFull { max: MAX_VAULTS as u8 });
            }
            self.approved_vaults.push(vault);
            Ok(true)
        } else {
            let before = self.approved_vaults.len();
            self.approved_vaults.retain(|v| *v != vault);
            Ok(self.approved_vaults.len() != before)
        }
    }

    /// Pauses the system with the specified reason code and timestamp.
    pub fn pause(&mut self, reason_code: u8, timestamp: i64) {
        self.is_paused = true;
        self.pause_timestamp = timestamp;
        self.pause_reason_code = reason_code;
    }

    /// Unpauses the system, clearing pause state.
    pub fn unpause(&mut self) {
        self.is_paused = false;
        self.pause_timestamp = 0;
        self.pause_reason_code = 0;
    }

    /// Fails with `SystemPaused` while the guardian has the system halted.
    pub fn ensure_not_paused(&self) -> Result<(), VaultError> {
        if self.is_paused {
            return Err(VaultError::SystemPaused);
        }
        Ok(())
    }

    /// Handles a governor hand-over request.
    ///
    /// 1. Proposing the current governor cancels any pending change.
    /// 2. Re-proposing the pending governor after the timelock completes it.
    /// 3. Re-proposing it before the timelock reports the time remaining.
    /// 4. Anything else (re)starts the timer for the proposed governor.
    pub fn process_governor_change(&mut self, new_governor: Pubkey, timestamp: i64) -> GovernorChangeResult {
        if new_governor == self.governor {
            let had_pending = self.pending_governor.take().is_some();
            self.governor_change_timestamp = 0;
            return if had_pending {
                GovernorChangeResult::Cancelled
            } else {
                GovernorChangeResult::NoChange
            };
        }

        if self.pending_governor == Some(new_governor) {
            let remaining = self.governor_change_time_remaining(timestamp);
            if remaining == 0 {
                let old_governor = self.governor;
                self.governor = new_governor;
                self.pending_governor = None;
                self.governor_change_timestamp = 0;
                return GovernorChangeResult::Completed { old_governor, new_governor };
            }
            return GovernorChangeResult::Pending {
                pending_governor: new_governor,
                remaining_seconds: remaining,
            };
        }

        let previous_pending = self.pending_governor.replace(new_governor);
        self.governor_change_timestamp = timestamp;
        GovernorChangeResult::Initiated { new_governor, previous_pending }
    }

    /// Gets time remaining for a pending hand-over (0 if none pending or ready)
    pub fn governor_change_time_remaining(&self, current_timestamp: i64) -> i64 {
        if self.pending_governor.is_none() {
            return 0;
        }
        let elapsed = current_timestamp - self.governor_change_timestamp;
        if elapsed >= GOVERNOR_CHANGE_TIMELOCK_SECONDS {
            return 0;
        }
        GOVERNOR_CHANGE_TIMELOCK_SECONDS - elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use borsh::BorshSerialize;

    fn authority() -> AuthorityState {
        AuthorityState::new(Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique(), 255)
    }

    #[test]
    fn test_len_fits_full_registry() {
        let mut state = authority();
        for _ in 0..MAX_VAULTS {
            state.push_vault(Pubkey::new_unique(), true).unwrap();
        }
        state.pending_governor = Some(Pubkey::new_unique());
        assert_eq!(state.try_to_vec().unwrap().len(), AuthorityState::LEN);
    }

    #[test]
    fn test_push_vault_approve_and_revoke() {
        let mut state = authority();
        let vault = Pubkey::new_unique();

        assert!(!state.is_vault_approved(&vault));
        assert_eq!(state.push_vault(vault, true), Ok(true));
        assert!(state.is_vault_approved(&vault));
        assert_eq!(state.push_vault(vault, true), Ok(false));
        assert_eq!(state.approved_vaults.len(), 1);

        assert_eq!(state.push_vault(vault, false), Ok(true));
        assert!(!state.is_vault_approved(&vault));
        assert_eq!(state.push_vault(vault, false), Ok(false));
    }

    #[test]
    fn test_push_vault_registry_full() {
        let mut state = authority();
        for _ in 0..MAX_VAULTS {
            state.push_vault(Pubkey::new_unique(), true).unwrap();
        }
        assert_eq!(
            state.push_vault(Pubkey::new_unique(), true),
            Err(VaultError::VaultRegistryFull { max: MAX_VAULTS as u8 })
        );
    }

    #[test]
    fn test_pause_cycle() {
        let mut state = authority();
        assert!(state.ensure_not_paused().is_ok());
        state.pause(3, 1_000);
        assert_eq!(state.ensure_not_paused(), Err(VaultError::SystemPaused));
        assert_eq!(state.pause_reason_code, 3);
        state.unpause();
        assert!(state.ensure_not_paused().is_ok());
        assert_eq!(state.pause_timestamp, 0);
    }

    #[test]
    fn test_governor_change_timelock() {
        let mut state = authority();
        let old = state.governor;
        let next = Pubkey::new_unique();

        assert_eq!(
            state.process_governor_change(next, 100),
            GovernorChangeResult::Initiated { new_governor: next, previous_pending: None }
        );
        assert_eq!(
            state.process_governor_change(next, 100 + GOVERNOR_CHANGE_TIMELOCK_SECONDS - 10),
            GovernorChangeResult::Pending { pending_governor: next, remaining_seconds: 10 }
        );
        assert_eq!(state.governor, old);

        assert_eq!(
            state.process_governor_change(next, 100 + GOVERNOR_CHANGE_TIMELOCK_SECONDS),
            GovernorChangeResult::Completed { old_governor: old, new_governor: next }
        );
        assert_eq!(state.governor, next);
        assert!(state.pending_governor.is_none());
    }

    #[test]
    fn test_governor_change_restart_and_cancel() {
        let mut state = authority();
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();

        state.process_governor_change(first, 0);
        assert_eq!(
            state.process_governor_change(second, 50),
            GovernorChangeResult::Initiated { new_governor: second, previous_pending: Some(first) }
        );
        assert_eq!(state.governor_change_time_remaining(50), GOVERNOR_CHANGE_TIMELOCK_SECONDS);

        let current = state.governor;
        assert_eq!(state.process_governor_change(current, 60), GovernorChangeResult::Cancelled);
        assert_eq!(state.process_governor_change(current, 70), GovernorChangeResult::NoChange);
        assert_eq!(state.governor_change_time_remaining(70), 0);
    }
}
