//! Deposit Processor
//!
//! A deposit pulls `amount` underlying tokens from the depositor into the
//! vault token account and opens a position under the next position id.
//!
//! Funding follows the approve/transfer-from model: the depositor first
//! approves the vault state PDA as delegate on their token account, and the
//! program signs the transfer as that delegate. A missing or short approval
//! surfaces as `InsufficientAllowance`, a short balance as
//! `InsufficientBalance`. Both are checked before any state is touched.

use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::Clock,
    entrypoint::ProgramResult,
    msg,
    program::{invoke_signed, set_return_data},
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvar::{rent::Rent, Sysvar},
};

use crate::{
    constants::POSITION_SEED_PREFIX,
    error::VaultError,
    state::{AuthorityState, PositionState, VaultState},
    utils::{
        create_pda_account, serialize_to_account, validate_deposit_funding, validate_non_zero_amount,
        validate_signer, validate_system_program, validate_token_account,
        validate_token_program, validate_writable,
    },
};

/// Processes the Deposit instruction.
///
/// Sets the new position id (u64, little endian) as return data.
///
/// # Account Info
/// 0. **Depositor** (signer, writable) - pays for the position account
/// 1. **Authority State PDA** (readable)
/// 2. **Vault State PDA** (writable) - approved delegate of the depositor token account
/// 3. **Depositor Token Account** (writable) - underlying mint, owned by depositor
/// 4. **Vault Token Account** (writable)
/// 5. **Position PDA** (writable) - derived from the vault's next position id;
///    any other address fails with `StalePositionId`
/// 6. **System Program** (readable)
/// 7. **SPL Token Program** (readable)
pub fn process_deposit(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    amount: u64,
    lock_selector: u8,
) -> ProgramResult {
    msg!("Processing Deposit: {} tokens, lock selector {}", amount, lock_selector);
    let account_info_iter = &mut accounts.iter();
    let depositor = next_account_info(account_info_iter)?;
    let authority_state_account = next_account_info(account_info_iter)?;
    let vault_state_account = next_account_info(account_info_iter)?;
    let depositor_token_account = next_account_info(account_info_iter)?;
    let vault_token_account = next_account_info(account_info_iter)?;
    let position_account = next_account_info(account_info_iter)?;
    let system_program_account = next_account_info(account_info_iter)?;
    let token_program_account = next_account_info(account_info_iter)?;

    validate_signer(depositor, "Depositor")?;
    validate_writable(vault_state_account, "Vault state")?;
    validate_writable(depositor_token_account, "Depositor token account")?;
    validate_writable(vault_token_account, "Vault token account")?;
    validate_writable(position_account, "Position account")?;
    validate_system_program(system_program_account)?;
    validate_token_program(token_program_account)?;
    validate_non_zero_amount(amount, "Deposit")?;

    let authority_state = AuthorityState::load_from_account(authority_state_account, program_id)?;
    authority_state.ensure_not_paused()?;

    let mut vault_state = VaultState::load_from_account(vault_state_account, program_id)?;
    if vault_state.authority != *authority_state_account.key {
        msg!("❌ Vault does not belong to this authority");
        return Err(VaultError::Unauthorized.into());
    }
    if !authority_state.is_vault_approved(vault_state_account.key) {
        msg!("❌ Vault {} is not approved for deposits", vault_state_account.key);
        return Err(VaultError::VaultNotApproved { vault: *vault_state_account.key }.into());
    }

    let lock_option = vault_state.lock_option(lock_selector)?;

    if *vault_token_account.key != vault_state.vault_token_account {
        msg!("❌ Vault token account mismatch");
        return Err(VaultError::InvalidAccount {
            account: *vault_token_account.key,
            reason: "not this vault's token account".to_string(),
        }
        .into());
    }

    let source = validate_token_account(
        depositor_token_account,
        &vault_state.underlying_mint,
        depositor.key,
        "Depositor token account",
    )?;
    validate_deposit_funding(&source, depositor_token_account.key, vault_state_account.key, amount).map_err(|e| {
        msg!("❌ Deposit not funded: {}", e);
        ProgramError::from(e)
    })?;

    let now = Clock::get()?.unix_timestamp;
    let position_id = vault_state.record_deposit(amount, now)?;
    let position_id_bytes = position_id.to_le_bytes();

    let (expected_position, position_bump) =
        PositionState::derive_address(vault_state_account.key, position_id, program_id);
    if *position_account.key != expected_position {
        msg!("❌ Position account is not derived from next position id {}", position_id);
        msg!("   Expected: {}, Provided: {}", expected_position, position_account.key);
        msg!("   Refetch the vault state and retry");
        return Err(VaultError::StalePositionId { next_position_id: position_id }.into());
    }
    if !position_account.data_is_empty() {
        msg!("❌ Position {} already exists", position_id);
        return Err(ProgramError::AccountAlreadyInitialized);
    }

    create_pda_account(
        depositor,
        position_account,
        system_program_account,
        program_id,
        &Rent::get()?,
        PositionState::LEN,
        &[
            POSITION_SEED_PREFIX,
            vault_state_account.key.as_ref(),
            &position_id_bytes,
            &[position_bump],
        ],
    )?;

    let position = PositionState::new(
        *vault_state_account.key,
        *depositor.key,
        position_id,
        amount,
        lock_option,
        now,
        position_bump,
    )?;
    serialize_to_account(&position, position_account)?;

    // State is persisted before the vault state PDA signs as delegate.
    serialize_to_account(&vault_state, vault_state_account)?;

    msg!("Transferring {} tokens from depositor to vault {}", amount, vault_token_account.key);
    invoke_signed(
        &spl_token::instruction::transfer(
            token_program_account.key,
            depositor_token_account.key,
            vault_token_account.key,
            vault_state_account.key,
            &[],
            amount,
        )?,
        &[
            depositor_token_account.clone(),
            vault_token_account.clone(),
            vault_state_account.clone(),
            token_program_account.clone(),
        ],
        &[&vault_state.signer_seeds()],
    )?;

    set_return_data(&position_id_bytes);

    msg!("✅ DEPOSIT COMPLETE:");
    msg!("   • Position ID: {}", position_id);
    msg!("   • Principal: {}", amount);
    msg!("   • Lock: selector {}, unlocks at {}", lock_selector, position.unlocks_at);
    msg!("   • Vault principal locked: {}", vault_state.total_principal_locked);
    Ok(())
}
