//! Vault Creation Processors
//!
//! A vault pairs an underlying (stablecoin) mint with a reward mint. Creation
//! sets up the vault state PDA, the vault token account PDA it owns, and the
//! lock table. The reward mint must already delegate minting to the program's
//! reward mint authority PDA.

use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::Clock,
    entrypoint::ProgramResult,
    msg,
    program::invoke_signed,
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
    sysvar::{rent::Rent, Sysvar},
};
use spl_token::state::Account as TokenAccount;

use crate::{
    constants::{REWARD_MINT_AUTHORITY_SEED_PREFIX, VAULT_STATE_SEED_PREFIX, VAULT_TOKEN_SEED_PREFIX},
    error::VaultError,
    state::{AuthorityState, VaultState},
    types::lock_options::{default_lock_options, validate_lock_table, LockOption},
    utils::{
        create_pda_account, serialize_to_account, validate_decimals_gap, validate_mint, validate_mint_authority,
        validate_pda, validate_signer, validate_system_program, validate_token_program,
        validate_writable,
    },
};

/// Processes the InitializeVault instruction.
///
/// An empty `lock_options` list installs the default table (selectors 0, 6
/// and 12).
///
/// # Account Info
/// 0. **Policy Authority** (signer, writable) - pays for the new accounts
/// 1. **Authority State PDA** (readable)
/// 2. **Vault State PDA** (writable)
/// 3. **Vault Token Account PDA** (writable)
/// 4. **Underlying Mint** (readable)
/// 5. **Reward Mint** (readable)
/// 6. **Reward Mint Authority PDA** (readable)
/// 7. **System Program** (readable)
/// 8. **SPL Token Program** (readable)
/// 9. **Rent Sysvar** (readable)
pub fn process_initialize_vault(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    lock_options: Vec<LockOption>,
) -> ProgramResult {
    msg!("🏗️ INITIALIZING VAULT");
    let account_info_iter = &mut accounts.iter();
    let policy_signer = next_account_info(account_info_iter)?;
    let authority_state_account = next_account_info(account_info_iter)?;
    let vault_state_account = next_account_info(account_info_iter)?;
    let vault_token_account = next_account_info(account_info_iter)?;
    let underlying_mint_account = next_account_info(account_info_iter)?;
    let reward_mint_account = next_account_info(account_info_iter)?;
    let reward_mint_authority_account = next_account_info(account_info_iter)?;
    let system_program_account = next_account_info(account_info_iter)?;
    let token_program_account = next_account_info(account_info_iter)?;
    let rent_sysvar_account = next_account_info(account_info_iter)?;

    validate_signer(policy_signer, "Policy authority")?;
    validate_writable(vault_state_account, "Vault state")?;
    validate_writable(vault_token_account, "Vault token account")?;
    validate_system_program(system_program_account)?;
    validate_token_program(token_program_account)?;

    let authority_state = AuthorityState::load_from_account(authority_state_account, program_id)?;
    if !authority_state.is_policy(policy_signer.key) {
        msg!("Unauthorized: {} is not the policy authority", policy_signer.key);
        return Err(VaultError::Unauthorized.into());
    }

    let lock_options = if lock_options.is_empty() {
        msg!("No lock table supplied, installing defaults");
        default_lock_options()
    } else {
        lock_options
    };
    validate_lock_table(&lock_options)?;

    if underlying_mint_account.key == reward_mint_account.key {
        msg!("❌ Underlying and reward mints must differ");
        return Err(VaultError::InvalidAccount {
            account: *reward_mint_account.key,
            reason: "reward mint equals underlying mint".to_string(),
        }
        .into());
    }

    let underlying_mint = validate_mint(underlying_mint_account, "Underlying mint")?;
    let reward_mint = validate_mint(reward_mint_account, "Reward mint")?;
    validate_decimals_gap(
        underlying_mint_account.key,
        underlying_mint.decimals,
        reward_mint_account.key,
        reward_mint.decimals,
    )?;

    validate_pda(
        reward_mint_authority_account,
        &[REWARD_MINT_AUTHORITY_SEED_PREFIX],
        program_id,
        "Reward Mint Authority PDA",
    )?;
    validate_mint_authority(&reward_mint, reward_mint_authority_account.key, "Reward mint")?;

    let vault_state_bump = validate_pda(
        vault_state_account,
        &[
            VAULT_STATE_SEED_PREFIX,
            underlying_mint_account.key.as_ref(),
            reward_mint_account.key.as_ref(),
        ],
        program_id,
        "Vault State PDA",
    )?;
    let vault_token_bump = validate_pda(
        vault_token_account,
        &[VAULT_TOKEN_SEED_PREFIX, vault_state_account.key.as_ref()],
        program_id,
        "Vault Token PDA",
    )?;

    if !vault_state_account.data_is_empty() {
        msg!("❌ Vault already exists for this mint pair");
        return Err(ProgramError::AccountAlreadyInitialized);
    }

    let rent = &Rent::from_account_info(rent_sysvar_account)?;

    create_pda_account(
        policy_signer,
        vault_state_account,
        system_program_account,
        program_id,
        rent,
        VaultState::LEN,
        &[
            VAULT_STATE_SEED_PREFIX,
            underlying_mint_account.key.as_ref(),
            reward_mint_account.key.as_ref(),
            &[vault_state_bump],
        ],
    )?;

    create_pda_account(
        policy_signer,
        vault_token_account,
        system_program_account,
        token_program_account.key,
        rent,
        TokenAccount::LEN,
        &[
            VAULT_TOKEN_SEED_PREFIX,
            vault_state_account.key.as_ref(),
            &[vault_token_bump],
        ],
    )?;

    msg!("Initializing vault token account, owner: {}", vault_state_account.key);
    invoke_signed(
        &spl_token::instruction::initialize_account(
            token_program_account.key,
            vault_token_account.key,
            underlying_mint_account.key,
            vault_state_account.key,
        )?,
        &[
            vault_token_account.clone(),
            underlying_mint_account.clone(),
            vault_state_account.clone(),
            rent_sysvar_account.clone(),
            token_program_account.clone(),
        ],
        &[&[
            VAULT_TOKEN_SEED_PREFIX,
            vault_state_account.key.as_ref(),
            &[vault_token_bump],
        ]],
    )?;

    let mut vault_state = VaultState::new(
        *authority_state_account.key,
        *underlying_mint_account.key,
        *reward_mint_account.key,
        *vault_token_account.key,
        underlying_mint.decimals,
        reward_mint.decimals,
        lock_options,
        vault_state_bump,
        vault_token_bump,
    );
    vault_state.last_update_timestamp = Clock::get()?.unix_timestamp;
    serialize_to_account(&vault_state, vault_state_account)?;

    msg!("✅ VAULT INITIALIZED:");
    msg!("   • Vault State PDA: {}", vault_state_account.key);
    msg!("   • Vault Token Account: {}", vault_token_account.key);
    msg!("   • Underlying: {} ({} decimals)", underlying_mint_account.key, underlying_mint.decimals);
    msg!("   • Reward: {} ({} decimals)", reward_mint_account.key, reward_mint.decimals);
    for option in &vault_state.lock_options {
        msg!(
            "   • Lock {}: {}s, {} bps APY, {} bps early penalty",
            option.selector,
            option.duration_seconds,
            option.reward_apy_basis_points,
            option.early_withdrawal_penalty_basis_points
        );
    }
    msg!("   Vault must be approved by the governor (PushVault) before deposits");
    Ok(())
}

/// Processes the SetLockOption instruction: insert or replace one lock table
/// entry. Open positions keep the terms they were created with.
///
/// # Account Info
/// 0. **Policy Authority** (signer)
/// 1. **Authority State PDA** (readable)
/// 2. **Vault State PDA** (writable)
pub fn process_set_lock_option(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    option: LockOption,
) -> ProgramResult {
    msg!("Processing SetLockOption: selector {}", option.selector);
    let account_info_iter = &mut accounts.iter();
    let policy_signer = next_account_info(account_info_iter)?;
    let authority_state_account = next_account_info(account_info_iter)?;
    let vault_state_account = next_account_info(account_info_iter)?;

    validate_signer(policy_signer, "Policy authority")?;
    validate_writable(vault_state_account, "Vault state")?;

    let authority_state = AuthorityState::load_from_account(authority_state_account, program_id)?;
    if !authority_state.is_policy(policy_signer.key) {
        msg!("Unauthorized: {} is not the policy authority", policy_signer.key);
        return Err(VaultError::Unauthorized.into());
    }

    let mut vault_state = VaultState::load_from_account(vault_state_account, program_id)?;
    if vault_state.authority != *authority_state_account.key {
        msg!("❌ Vault does not belong to this authority");
        return Err(VaultError::Unauthorized.into());
    }

    vault_state.set_lock_option(option)?;
    vault_state.last_update_timestamp = Clock::get()?.unix_timestamp;
    serialize_to_account(&vault_state, vault_state_account)?;

    msg!(
        "✅ Lock {} set: {}s, {} bps APY, {} bps early penalty",
        option.selector,
        option.duration_seconds,
        option.reward_apy_basis_points,
        option.early_withdrawal_penalty_basis_points
    );
    Ok(())
}
