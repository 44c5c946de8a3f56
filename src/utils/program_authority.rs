//! Program upgrade authority checks
//!
//! Only the account that can upgrade the deployed program may create the
//! authority state and so become the first governor.

use solana_program::{
    account_info::AccountInfo,
    bpf_loader_upgradeable::{self, UpgradeableLoaderState},
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

/// Program data account address for `program_id` under the upgradeable loader.
pub fn get_program_data_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[program_id.as_ref()], &bpf_loader_upgradeable::id()).0
}

/// Reads the upgrade authority recorded in a program data account.
fn read_upgrade_authority(program_data_account: &AccountInfo) -> Result<Option<Pubkey>, ProgramError> {
    let data = program_data_account.try_borrow_data()?;
    match bincode::deserialize::<UpgradeableLoaderState>(&data) {
        Ok(UpgradeableLoaderState::ProgramData { upgrade_authority_address, .. }) => {
            Ok(upgrade_authority_address)
        }
        _ => {
            msg!("❌ Program data account does not hold ProgramData state");
            Err(ProgramError::InvalidAccountData)
        }
    }
}

/// Validates that `authority_account` signs as the program upgrade authority.
///
/// The program data account must be the one derived for `program_id`. When
/// nothing lives at that address (programs loaded outside the upgradeable
/// loader, such as `solana-program-test` processors) only the signature is
/// required.
pub fn validate_program_upgrade_authority(
    program_id: &Pubkey,
    program_data_account: &AccountInfo,
    authority_account: &AccountInfo,
) -> Result<(), ProgramError> {
    if !authority_account.is_signer {
        msg!("❌ Program authority must be a signer");
        return Err(ProgramError::MissingRequiredSignature);
    }

    let expected = get_program_data_address(program_id);
    if *program_data_account.key != expected {
        msg!("❌ Invalid program data account provided");
        msg!("   Expected: {}", expected);
        msg!("   Provided: {}", program_data_account.key);
        return Err(ProgramError::InvalidAccountData);
    }

    if *program_data_account.owner != bpf_loader_upgradeable::id() {
        msg!("⚠️  Program data account not owned by upgradeable loader; accepting signer {}", authority_account.key);
        return Ok(());
    }

    match read_upgrade_authority(program_data_account)? {
        Some(upgrade_authority) if upgrade_authority == *authority_account.key => {
            msg!("✅ Program upgrade authority validated: {}", upgrade_authority);
            Ok(())
        }
        Some(upgrade_authority) => {
            msg!("❌ UNAUTHORIZED: signer is not the program upgrade authority");
            msg!("   Expected: {}", upgrade_authority);
            msg!("   Provided: {}", authority_account.key);
            Err(ProgramError::InvalidAccountData)
        }
        None => {
            msg!("❌ Program is immutable (upgrade authority revoked)");
            Err(ProgramError::InvalidAccountData)
        }
    }
}
