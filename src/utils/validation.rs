//! Input Validation Utilities
//!
//! This module contains utilities for validating signers, token accounts,
//! PDAs, and amounts. Processors call these before touching any state.

use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    program_option::COption,
    program_pack::Pack,
    pubkey::Pubkey,
};
use spl_token::state::{Account as TokenAccount, Mint};

use crate::{constants::MAX_DECIMALS_GAP, error::VaultError};

/// Validates that an account is a signer.
///
/// # Arguments
/// * `account` - The account to validate
/// * `context` - Context string for error messages
pub fn validate_signer(account: &AccountInfo, context: &str) -> ProgramResult {
    if !account.is_signer {
        msg!("{} must be a signer", context);
        return Err(ProgramError::MissingRequiredSignature);
    }
    Ok(())
}

/// Validates that an account is writable.
pub fn validate_writable(account: &AccountInfo, context: &str) -> ProgramResult {
    if !account.is_writable {
        msg!("{} must be writable", context);
        return Err(ProgramError::InvalidAccountData);
    }
    Ok(())
}

/// Validates that a token amount is non-zero.
pub fn validate_non_zero_amount(amount: u64, context: &str) -> ProgramResult {
    if amount == 0 {
        msg!("{} amount cannot be zero", context);
        return Err(ProgramError::InvalidArgument);
    }
    Ok(())
}

/// Validates the SPL Token program account passed for CPIs.
pub fn validate_token_program(account: &AccountInfo) -> ProgramResult {
    if *account.key != spl_token::id() {
        msg!("❌ Expected SPL Token program, got {}", account.key);
        return Err(ProgramError::IncorrectProgramId);
    }
    Ok(())
}

/// Validates the system program account passed for account creation.
pub fn validate_system_program(account: &AccountInfo) -> ProgramResult {
    if *account.key != solana_program::system_program::id() {
        msg!("❌ Expected System program, got {}", account.key);
        return Err(ProgramError::IncorrectProgramId);
    }
    Ok(())
}

/// Validates that `account` is the PDA derived from `seeds` and returns its bump.
pub fn validate_pda(
    account: &AccountInfo,
    seeds: &[&[u8]],
    program_id: &Pubkey,
    context: &str,
) -> Result<u8, ProgramError> {
    let (expected, bump) = Pubkey::find_program_address(seeds, program_id);
    if *account.key != expected {
        msg!("❌ SECURITY VIOLATION: {} does not match expected derived PDA", context);
        msg!("   Expected: {}", expected);
        msg!("   Provided: {}", account.key);
        return Err(ProgramError::InvalidSeeds);
    }
    Ok(bump)
}

/// Unpacks an SPL token account and checks its mint and owner.
///
/// # Arguments
/// * `account` - Token account to unpack
/// * `expected_mint` - Mint the account must hold
/// * `expected_owner` - Wallet or PDA that must own the account
/// * `context` - Context string for error messages
pub fn validate_token_account(
    account: &AccountInfo,
    expected_mint: &Pubkey,
    expected_owner: &Pubkey,
    context: &str,
) -> Result<TokenAccount, ProgramError> {
    if *account.owner != spl_token::id() {
        msg!("❌ {}: account not owned by SPL Token program", context);
        return Err(VaultError::InvalidAccount {
            account: *account.key,
            reason: format!("{} not owned by token program", context),
        }
        .into());
    }

    let token_account = TokenAccount::unpack(&account.data.borrow()).map_err(|_| {
        msg!("❌ {}: failed to unpack token account", context);
        ProgramError::InvalidAccountData
    })?;

    if token_account.mint != *expected_mint {
        msg!("❌ {}: wrong mint", context);
        msg!("   Expected mint: {}", expected_mint);
        msg!("   Actual mint: {}", token_account.mint);
        return Err(VaultError::InvalidAccount {
            account: *account.key,
            reason: format!("{} has wrong mint", context),
        }
        .into());
    }
    if token_account.owner != *expected_owner {
        msg!("❌ {}: wrong owner", context);
        msg!("   Expected owner: {}", expected_owner);
        msg!("   Actual owner: {}", token_account.owner);
        return Err(VaultError::InvalidAccount {
            account: *account.key,
            reason: format!("{} has wrong owner", context),
        }
        .into());
    }
    Ok(token_account)
}

/// Checks the depositor can fund a deposit: enough balance, and the vault
/// approved as delegate for at least `amount`.
pub fn validate_deposit_funding(
    token_account: &TokenAccount,
    token_account_key: &Pubkey,
    vault_delegate: &Pubkey,
    amount: u64,
) -> Result<(), VaultError> {
    if token_account.amount < amount {
        return Err(VaultError::InsufficientBalance {
            required: amount,
            available: token_account.amount,
            account: *token_account_key,
        });
    }

    let approved = match token_account.delegate {
        COption::Some(delegate) if delegate == *vault_delegate => token_account.delegated_amount,
        _ => 0,
    };
    if approved < amount {
        return Err(VaultError::InsufficientAllowance {
            required: amount,
            approved,
            account: *token_account_key,
        });
    }
    Ok(())
}

/// Unpacks a mint and checks it is initialized and owned by the token program.
pub fn validate_mint(account: &AccountInfo, context: &str) -> Result<Mint, ProgramError> {
    if *account.owner != spl_token::id() {
        msg!("❌ {}: mint not owned by SPL Token program", context);
        return Err(ProgramError::IncorrectProgramId);
    }
    Mint::unpack(&account.data.borrow()).map_err(|_| {
        msg!("❌ {}: failed to unpack mint", context);
        ProgramError::InvalidAccountData
    })
}

/// Checks the reward mint's decimals stay within `MAX_DECIMALS_GAP` of the
/// underlying mint's, so rewards can be rescaled between the two.
pub fn validate_decimals_gap(
    underlying_mint: &Pubkey,
    underlying_decimals: u8,
    reward_mint: &Pubkey,
    reward_decimals: u8,
) -> Result<(), VaultError> {
    let gap = underlying_decimals.abs_diff(reward_decimals);
    if gap > MAX_DECIMALS_GAP {
        msg!(
            "❌ Mint decimals too far apart: underlying {} ({}), reward {} ({})",
            underlying_mint, underlying_decimals, reward_mint, reward_decimals
        );
        return Err(VaultError::InvalidAccount {
            account: *reward_mint,
            reason: format!("decimals gap {} exceeds {}", gap, MAX_DECIMALS_GAP),
        });
    }
    Ok(())
}

/// Validates that a mint's authority is the expected PDA.
pub fn validate_mint_authority(mint: &Mint, expected_authority: &Pubkey, context: &str) -> ProgramResult {
    match mint.mint_authority {
        COption::Some(authority) if authority == *expected_authority => Ok(()),
        COption::Some(authority) => {
            msg!("❌ {}: invalid mint authority", context);
            msg!("   Expected authority: {}", expected_authority);
            msg!("   Actual authority: {}", authority);
            Err(ProgramError::InvalidAccountData)
        }
        COption::None => {
            msg!("❌ {}: mint has no authority (supply is fixed)", context);
            Err(ProgramError::InvalidAccountData)
        }
    }
}
