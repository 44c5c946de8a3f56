//! Authority Processors
//!
//! This module handles creation of the authority state and every governor
//! action on it: approving vaults (`PushVault`), rotating the guardian and
//! policy roles, and the timelocked governor hand-over.

use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::Clock,
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvar::{rent::Rent, Sysvar},
};

use crate::{
    constants::AUTHORITY_STATE_SEED_PREFIX,
    error::VaultError,
    state::{AuthorityState, GovernorChangeResult},
    utils::{
        create_pda_account, serialize_to_account, validate_pda, validate_program_upgrade_authority,
        validate_signer, validate_system_program, validate_writable,
    },
};

/// Processes the InitializeAuthority instruction.
///
/// The program upgrade authority creates the authority state PDA and becomes
/// the governor. Guardian and policy may be the same key as the governor.
///
/// # Account Info
/// 0. **Program Authority Signer** (signer, writable) - MUST match program upgrade authority
/// 1. **System Program Account** (readable)
/// 2. **Rent Sysvar Account** (readable)
/// 3. **Authority State PDA** (writable) - MUST match derived PDA
/// 4. **Program Data Account** (readable) - Contains the program upgrade authority
pub fn process_initialize_authority(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    guardian: Pubkey,
    policy: Pubkey,
) -> ProgramResult {
    msg!("🚀 INITIALIZING AUTHORITY");
    let account_info_iter = &mut accounts.iter();
    let program_authority_signer = next_account_info(account_info_iter)?;
    let system_program_account = next_account_info(account_info_iter)?;
    let rent_sysvar_account = next_account_info(account_info_iter)?;
    let authority_state_pda = next_account_info(account_info_iter)?;
    let program_data_account = next_account_info(account_info_iter)?;

    validate_writable(authority_state_pda, "Authority state")?;
    validate_system_program(system_program_account)?;
    validate_program_upgrade_authority(program_id, program_data_account, program_authority_signer)?;

    let bump = validate_pda(
        authority_state_pda,
        &[AUTHORITY_STATE_SEED_PREFIX],
        program_id,
        "Authority State PDA",
    )?;

    if !authority_state_pda.data_is_empty() {
        msg!("❌ Authority already initialized");
        return Err(ProgramError::AccountAlreadyInitialized);
    }

    let rent = &Rent::from_account_info(rent_sysvar_account)?;
    create_pda_account(
        program_authority_signer,
        authority_state_pda,
        system_program_account,
        program_id,
        rent,
        AuthorityState::LEN,
        &[AUTHORITY_STATE_SEED_PREFIX, &[bump]],
    )?;

    let authority_state = AuthorityState::new(*program_authority_signer.key, guardian, policy, bump);
    serialize_to_account(&authority_state, authority_state_pda)?;

    msg!("✅ AUTHORITY INITIALIZED:");
    msg!("   • Authority State PDA: {}", authority_state_pda.key);
    msg!("   • Governor: {}", program_authority_signer.key);
    msg!("   • Guardian: {}", guardian);
    msg!("   • Policy: {}", policy);
    Ok(())
}

/// Loads the authority state and requires the signer to be the governor.
fn load_as_governor(
    program_id: &Pubkey,
    governor: &AccountInfo,
    authority_state_account: &AccountInfo,
) -> Result<AuthorityState, ProgramError> {
    validate_signer(governor, "Governor")?;
    validate_writable(authority_state_account, "Authority state")?;

    let authority_state = AuthorityState::load_from_account(authority_state_account, program_id)?;
    if !authority_state.is_governor(governor.key) {
        msg!("Unauthorized: {} is not the governor", governor.key);
        return Err(VaultError::Unauthorized.into());
    }
    Ok(authority_state)
}

/// Processes the PushVault instruction: approve or revoke a vault.
///
/// # Account Info
/// 0. **Governor** (signer)
/// 1. **Authority State PDA** (writable)
pub fn process_push_vault(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    vault: Pubkey,
    approved: bool,
) -> ProgramResult {
    msg!("Processing PushVault: {} approved={}", vault, approved);
    let account_info_iter = &mut accounts.iter();
    let governor = next_account_info(account_info_iter)?;
    let authority_state_account = next_account_info(account_info_iter)?;

    let mut authority_state = load_as_governor(program_id, governor, authority_state_account)?;

    let changed = authority_state.push_vault(vault, approved)?;
    if changed {
        serialize_to_account(&authority_state, authority_state_account)?;
        msg!("✅ Vault registry updated: {} vault(s) approved", authority_state.approved_vaults.len());
    } else {
        msg!("Vault registry unchanged");
    }
    Ok(())
}

/// Processes the UpdateRoles instruction.
///
/// # Account Info
/// 0. **Governor** (signer)
/// 1. **Authority State PDA** (writable)
pub fn process_update_roles(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    guardian: Option<Pubkey>,
    policy: Option<Pubkey>,
) -> ProgramResult {
    msg!("Processing UpdateRoles");
    let account_info_iter = &mut accounts.iter();
    let governor = next_account_info(account_info_iter)?;
    let authority_state_account = next_account_info(account_info_iter)?;

    let mut authority_state = load_as_governor(program_id, governor, authority_state_account)?;

    if let Some(guardian) = guardian {
        msg!("Guardian: {} -> {}", authority_state.guardian, guardian);
        authority_state.guardian = guardian;
    }
    if let Some(policy) = policy {
        msg!("Policy: {} -> {}", authority_state.policy, policy);
        authority_state.policy = policy;
    }

    serialize_to_account(&authority_state, authority_state_account)
}

/// Processes the ChangeGovernor instruction (72-hour timelock).
///
/// # Account Info
/// 0. **Governor** (signer)
/// 1. **Authority State PDA** (writable)
pub fn process_change_governor(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    new_governor: Pubkey,
) -> ProgramResult {
    msg!("Processing ChangeGovernor: proposed {}", new_governor);
    let account_info_iter = &mut accounts.iter();
    let governor = next_account_info(account_info_iter)?;
    let authority_state_account = next_account_info(account_info_iter)?;

    let mut authority_state = load_as_governor(program_id, governor, authority_state_account)?;
    let now = Clock::get()?.unix_timestamp;

    match authority_state.process_governor_change(new_governor, now) {
        GovernorChangeResult::Initiated { new_governor, previous_pending } => {
            msg!("⏳ Governor change initiated: {} (72h timelock)", new_governor);
            if let Some(previous) = previous_pending {
                msg!("   Replaced pending proposal for {}", previous);
            }
        }
        GovernorChangeResult::Completed { old_governor, new_governor } => {
            msg!("✅ Governor changed: {} -> {}", old_governor, new_governor);
        }
        GovernorChangeResult::Cancelled => msg!("Pending governor change cancelled"),
        GovernorChangeResult::NoChange => msg!("Proposed governor is already the governor"),
        GovernorChangeResult::Pending { pending_governor, remaining_seconds } => {
            msg!("⏳ Governor change to {} pending: {} seconds remaining", pending_governor, remaining_seconds);
        }
    }

    serialize_to_account(&authority_state, authority_state_account)
}
