//! Utility Processors
//!
//! Read-only view instructions. They log what they find and return the
//! Borsh-encoded result through return data, so clients can read them from a
//! simulated transaction without paying for anything.

use borsh::BorshSerialize;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::Clock,
    entrypoint::ProgramResult,
    msg,
    program::set_return_data,
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvar::Sysvar,
};

use crate::state::{PositionState, VaultState};

/// **VIEW INSTRUCTION**: Quotes a position as if it were withdrawn now.
///
/// Returns the Borsh-encoded `WithdrawalQuote`. For a settled position the
/// quote reflects what was actually paid.
///
/// # Account Info
/// 0. **Vault State PDA** (readable)
/// 1. **Position PDA** (readable)
pub fn process_get_position_info(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    position_id: u64,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();
    let vault_state_account = next_account_info(account_info_iter)?;
    let position_account = next_account_info(account_info_iter)?;

    let vault_state = VaultState::load_from_account(vault_state_account, program_id)?;
    let position = PositionState::load(position_account, vault_state_account.key, position_id, program_id)?;

    let mut quote = position.quote(
        Clock::get()?.unix_timestamp,
        vault_state.underlying_decimals,
        vault_state.reward_decimals,
    )?;
    if position.is_withdrawn {
        quote.payout = position.payout;
        quote.penalty = position.penalty;
        quote.reward = position.reward;
    }

    msg!("=== POSITION {} ===", position_id);
    msg!("Owner: {}", position.owner);
    msg!("Principal: {}", position.principal);
    msg!("Lock selector: {}", position.lock_option.selector);
    msg!("Created at: {}, unlocks at: {}", position.created_at, position.unlocks_at);
    msg!("Withdrawn: {}", position.is_withdrawn);
    msg!("Payout: {}, penalty: {}, reward: {}", quote.payout, quote.penalty, quote.reward);

    let data = quote.try_to_vec().map_err(|_| ProgramError::InvalidAccountData)?;
    set_return_data(&data);
    Ok(())
}

/// **VIEW INSTRUCTION**: Logs the vault configuration and ledger totals.
///
/// Returns the Borsh-encoded `VaultState`.
///
/// # Account Info
/// 0. **Vault State PDA** (readable)
pub fn process_get_vault_info(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();
    let vault_state_account = next_account_info(account_info_iter)?;

    let vault_state = VaultState::load_from_account(vault_state_account, program_id)?;

    msg!("=== VAULT {} ===", vault_state_account.key);
    msg!("Underlying mint: {}", vault_state.underlying_mint);
    msg!("Reward mint: {}", vault_state.reward_mint);
    msg!("Next position id: {}", vault_state.next_position_id);
    msg!("Principal locked: {}", vault_state.total_principal_locked);
    msg!("Deposits: {}, withdrawals: {}", vault_state.total_deposits, vault_state.total_withdrawals);
    msg!(
        "Penalties accrued: {}, swept: {}",
        vault_state.total_penalties_accrued,
        vault_state.total_penalties_withdrawn
    );
    msg!("Rewards minted: {}", vault_state.total_rewards_minted);
    for option in &vault_state.lock_options {
        msg!(
            "Lock {}: {}s, {} bps APY, {} bps early penalty",
            option.selector,
            option.duration_seconds,
            option.reward_apy_basis_points,
            option.early_withdrawal_penalty_basis_points
        );
    }

    let data = vault_state.try_to_vec().map_err(|_| ProgramError::InvalidAccountData)?;
    set_return_data(&data);
    Ok(())
}

/// **VIEW INSTRUCTION**: Returns smart contract version information.
pub fn process_get_version(program_id: &Pubkey) -> ProgramResult {
    msg!("=== SMART CONTRACT VERSION ===");
    msg!("Contract Name: {}", env!("CARGO_PKG_NAME"));
    msg!("Contract Version: {}", env!("CARGO_PKG_VERSION"));
    msg!("Contract Description: {}", env!("CARGO_PKG_DESCRIPTION"));
    msg!("License: {}", env!("CARGO_PKG_LICENSE"));
    msg!("Program ID: {}", program_id);
    msg!("===============================");

    set_return_data(env!("CARGO_PKG_VERSION").as_bytes());
    Ok(())
}
