//! System-wide pause functionality
//!
//! The guardian can halt every ledger operation (deposits, withdrawals and
//! penalty sweeps). Views and authority administration keep working.

use solana_program::{
    account_info::AccountInfo,
    clock::Clock,
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvar::Sysvar,
};

use crate::{
    error::VaultError,
    state::AuthorityState,
    types::PauseReason,
    utils::{serialize_to_account, validate_signer, validate_writable},
};

/// Processes the PauseSystem instruction.
///
/// # Account Order:
/// 0. **Guardian** (signer)
/// 1. **Authority State PDA** (writable)
pub fn process_pause_system(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    reason_code: u8,
) -> ProgramResult {
    let reason = PauseReason::from_code(reason_code);
    msg!("🛑 Processing system pause: {} ({})", reason.description(), reason_code);

    if accounts.len() < 2 {
        return Err(ProgramError::NotEnoughAccountKeys);
    }
    let guardian_account = &accounts[0];
    let authority_state_account = &accounts[1];

    validate_signer(guardian_account, "Guardian")?;
    validate_writable(authority_state_account, "Authority state account")?;

    if reason_code == 0 {
        msg!("Pause reason code 0 is reserved for 'no pause'");
        return Err(ProgramError::InvalidArgument);
    }

    let mut authority_state = AuthorityState::load_from_account(authority_state_account, program_id)?;

    if !authority_state.is_guardian(guardian_account.key) {
        msg!("Unauthorized: {} is not the guardian", guardian_account.key);
        return Err(VaultError::Unauthorized.into());
    }

    if authority_state.is_paused {
        msg!("System is already paused since timestamp: {}", authority_state.pause_timestamp);
        return Err(VaultError::SystemAlreadyPaused.into());
    }

    let current_timestamp = Clock::get()?.unix_timestamp;
    authority_state.pause(reason_code, current_timestamp);
    serialize_to_account(&authority_state, authority_state_account)?;

    msg!("🛑 SYSTEM PAUSED: deposits, withdrawals and penalty sweeps blocked");
    msg!("Guardian: {}", guardian_account.key);
    msg!("Timestamp: {}", current_timestamp);
    Ok(())
}

/// Processes the UnpauseSystem instruction.
///
/// # Account Order:
/// 0. **Guardian** (signer)
/// 1. **Authority State PDA** (writable)
pub fn process_unpause_system(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
) -> ProgramResult {
    msg!("✅ Processing system unpause");

    if accounts.len() < 2 {
        return Err(ProgramError::NotEnoughAccountKeys);
    }
    let guardian_account = &accounts[0];
    let authority_state_account = &accounts[1];

    validate_signer(guardian_account, "Guardian")?;
    validate_writable(authority_state_account, "Authority state account")?;

    let mut authority_state = AuthorityState::load_from_account(authority_state_account, program_id)?;

    if !authority_state.is_guardian(guardian_account.key) {
        msg!("Unauthorized: {} is not the guardian", guardian_account.key);
        return Err(VaultError::Unauthorized.into());
    }

    if !authority_state.is_paused {
        msg!("System is not currently paused");
        return Err(VaultError::SystemNotPaused.into());
    }

    let pause_duration = Clock::get()?.unix_timestamp - authority_state.pause_timestamp;
    let reason = PauseReason::from_code(authority_state.pause_reason_code);

    authority_state.unpause();
    serialize_to_account(&authority_state, authority_state_account)?;

    msg!("✅ SYSTEM UNPAUSED: ledger operations resumed");
    msg!("Previous pause reason: {}", reason.description());
    msg!("Pause duration: {} seconds", pause_duration);
    Ok(())
}
