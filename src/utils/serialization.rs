//! Serialization Utilities
//!
//! State is serialized into a scratch buffer first and then copied into the
//! account, so a failed serialization never leaves a half-written account
//! behind and data written before a CPI persists.

use borsh::BorshSerialize;
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
};

/// Serializes `data` into `account`, leaving any trailing bytes untouched.
///
/// # Arguments
/// * `data` - The data to serialize (must implement BorshSerialize)
/// * `account` - The account to write the data to
pub fn serialize_to_account<T: BorshSerialize>(data: &T, account: &AccountInfo) -> ProgramResult {
    let serialized_data = data.try_to_vec().map_err(|e| {
        msg!("serialize_to_account: serialization failed: {:?}", e);
        ProgramError::InvalidAccountData
    })?;

    let account_data_len = account.data_len();
    if serialized_data.len() > account_data_len {
        msg!(
            "serialize_to_account: data too large for account {}. Need: {}, Have: {}",
            account.key,
            serialized_data.len(),
            account_data_len
        );
        return Err(ProgramError::AccountDataTooSmall);
    }

    let mut account_data = account.try_borrow_mut_data()?;
    account_data[..serialized_data.len()].copy_from_slice(&serialized_data);
    Ok(())
}
