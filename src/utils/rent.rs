//! Account Creation Utilities
//!
//! Program-owned PDAs are created rent-exempt and funded by the payer of the
//! instruction that first needs them.

use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program::invoke_signed,
    pubkey::Pubkey,
    system_instruction,
    sysvar::rent::Rent,
};

/// Creates a rent-exempt PDA of `space` bytes owned by `owner`.
///
/// # Arguments
/// * `payer` - Funding account (signer, writable)
/// * `new_account` - PDA to create
/// * `system_program` - System program account
/// * `owner` - Program that will own the new account
/// * `rent` - Rent sysvar used for the minimum balance
/// * `space` - Account size in bytes
/// * `signer_seeds` - Seeds (including bump) of `new_account`
pub fn create_pda_account<'a>(
    payer: &AccountInfo<'a>,
    new_account: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    owner: &Pubkey,
    rent: &Rent,
    space: usize,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    let lamports = rent.minimum_balance(space);
    msg!("Creating account {} ({} bytes, {} lamports)", new_account.key, space, lamports);
    invoke_signed(
        &system_instruction::create_account(payer.key, new_account.key, lamports, space as u64, owner),
        &[payer.clone(), new_account.clone(), system_program.clone()],
        &[signer_seeds],
    )
}
