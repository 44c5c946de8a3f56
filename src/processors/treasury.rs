//! Treasury Processors
//!
//! Early withdrawal penalties are withheld in the vault token account. The
//! governor sweeps them out with `WithdrawPenalties`; principal that is still
//! locked can never be swept.

use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::Clock,
    entrypoint::ProgramResult,
    msg,
    program::invoke_signed,
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
    sysvar::Sysvar,
};
use spl_token::state::Account as TokenAccount;

use crate::{
    error::VaultError,
    state::{AuthorityState, VaultState},
    utils::{
        serialize_to_account, validate_non_zero_amount, validate_signer, validate_token_program,
        validate_writable,
    },
};

/// Processes the WithdrawPenalties instruction.
///
/// # Account Info
/// 0. **Governor** (signer)
/// 1. **Authority State PDA** (readable)
/// 2. **Vault State PDA** (writable)
/// 3. **Vault Token Account** (writable)
/// 4. **Destination Token Account** (writable) - underlying mint, any owner
/// 5. **SPL Token Program** (readable)
pub fn process_withdraw_penalties(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    amount: u64,
) -> ProgramResult {
    msg!("Processing WithdrawPenalties: {}", amount);
    let account_info_iter = &mut accounts.iter();
    let governor = next_account_info(account_info_iter)?;
    let authority_state_account = next_account_info(account_info_iter)?;
    let vault_state_account = next_account_info(account_info_iter)?;
    let vault_token_account = next_account_info(account_info_iter)?;
    let destination_account = next_account_info(account_info_iter)?;
    let token_program_account = next_account_info(account_info_iter)?;

    validate_signer(governor, "Governor")?;
    validate_writable(vault_state_account, "Vault state")?;
    validate_writable(vault_token_account, "Vault token account")?;
    validate_writable(destination_account, "Destination token account")?;
    validate_token_program(token_program_account)?;
    validate_non_zero_amount(amount, "Penalty withdrawal")?;

    let authority_state = AuthorityState::load_from_account(authority_state_account, program_id)?;
    if !authority_state.is_governor(governor.key) {
        msg!("Unauthorized: {} is not the governor", governor.key);
        return Err(VaultError::Unauthorized.into());
    }
    authority_state.ensure_not_paused()?;

    let mut vault_state = VaultState::load_from_account(vault_state_account, program_id)?;
    if vault_state.authority != *authority_state_account.key {
        msg!("❌ Vault does not belong to this authority");
        return Err(VaultError::Unauthorized.into());
    }
    if *vault_token_account.key != vault_state.vault_token_account {
        msg!("❌ Vault token account mismatch");
        return Err(VaultError::InvalidAccount {
            account: *vault_token_account.key,
            reason: "not this vault's token account".to_string(),
        }
        .into());
    }

    let destination = TokenAccount::unpack(&destination_account.data.borrow()).map_err(|_| {
        msg!("❌ Destination is not a token account");
        ProgramError::InvalidAccountData
    })?;
    if destination.mint != vault_state.underlying_mint {
        msg!("❌ Destination token account holds the wrong mint");
        return Err(VaultError::InvalidAccount {
            account: *destination_account.key,
            reason: "destination has wrong mint".to_string(),
        }
        .into());
    }

    let now = Clock::get()?.unix_timestamp;
    vault_state.record_penalty_withdrawal(amount, now).map_err(|e| {
        msg!("❌ {}", e);
        e
    })?;
    serialize_to_account(&vault_state, vault_state_account)?;

    invoke_signed(
        &spl_token::instruction::transfer(
            token_program_account.key,
            vault_token_account.key,
            destination_account.key,
            vault_state_account.key,
            &[],
            amount,
        )?,
        &[
            vault_token_account.clone(),
            destination_account.clone(),
            vault_state_account.clone(),
            token_program_account.clone(),
        ],
        &[&vault_state.signer_seeds()],
    )?;

    msg!("✅ PENALTIES WITHDRAWN:");
    msg!("   • Amount: {}", amount);
    msg!("   • Destination: {}", destination_account.key);
    msg!("   • Remaining penalties: {}", vault_state.available_penalties());
    Ok(())
}
