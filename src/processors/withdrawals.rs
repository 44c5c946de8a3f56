//! Withdrawal Processor
//!
//! Settles a position exactly once. The payout is the principal minus any
//! early withdrawal penalty, transferred from the vault token account signed
//! by the vault state PDA. The penalty stays in the vault token account as
//! treasury balance. Matured positions also receive their reward, minted by
//! the reward mint authority PDA while the vault is approved.

use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::Clock,
    entrypoint::ProgramResult,
    msg,
    program::{invoke_signed, set_return_data},
    pubkey::Pubkey,
    sysvar::Sysvar,
};

use crate::{
    constants::REWARD_MINT_AUTHORITY_SEED_PREFIX,
    error::VaultError,
    state::{AuthorityState, PositionState, VaultState},
    utils::{
        serialize_to_account, validate_pda, validate_signer, validate_token_account,
        validate_token_program, validate_writable,
    },
};

/// Processes the Withdraw instruction.
///
/// Sets the payout (u64, little endian) as return data.
///
/// # Account Info
/// 0. **Depositor** (signer) - MUST be the position owner
/// 1. **Authority State PDA** (readable)
/// 2. **Vault State PDA** (writable)
/// 3. **Position PDA** (writable)
/// 4. **Vault Token Account** (writable)
/// 5. **Depositor Token Account** (writable) - underlying mint, owned by depositor
/// 6. **Reward Mint** (writable)
/// 7. **Depositor Reward Token Account** (writable) - reward mint, owned by depositor;
///    only checked when a reward is minted
/// 8. **Reward Mint Authority PDA** (readable)
/// 9. **SPL Token Program** (readable)
pub fn process_withdraw(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    position_id: u64,
) -> ProgramResult {
    msg!("Processing Withdraw: position {}", position_id);
    let account_info_iter = &mut accounts.iter();
    let depositor = next_account_info(account_info_iter)?;
    let authority_state_account = next_account_info(account_info_iter)?;
    let vault_state_account = next_account_info(account_info_iter)?;
    let position_account = next_account_info(account_info_iter)?;
    let vault_token_account = next_account_info(account_info_iter)?;
    let depositor_token_account = next_account_info(account_info_iter)?;
    let reward_mint_account = next_account_info(account_info_iter)?;
    let depositor_reward_account = next_account_info(account_info_iter)?;
    let reward_mint_authority_account = next_account_info(account_info_iter)?;
    let token_program_account = next_account_info(account_info_iter)?;

    validate_signer(depositor, "Depositor")?;
    validate_token_program(token_program_account)?;

    let authority_state = AuthorityState::load_from_account(authority_state_account, program_id)?;
    authority_state.ensure_not_paused()?;

    let mut vault_state = VaultState::load_from_account(vault_state_account, program_id)?;
    if vault_state.authority != *authority_state_account.key {
        msg!("❌ Vault does not belong to this authority");
        return Err(VaultError::Unauthorized.into());
    }

    let mut position = PositionState::load(position_account, vault_state_account.key, position_id, program_id)?;
    position.ensure_withdrawable_by(depositor.key).map_err(|e| {
        msg!("❌ Position {} cannot be withdrawn by {}: {}", position_id, depositor.key, e);
        e
    })?;

    validate_writable(vault_state_account, "Vault state")?;
    validate_writable(position_account, "Position account")?;
    validate_writable(vault_token_account, "Vault token account")?;
    validate_writable(depositor_token_account, "Depositor token account")?;

    if *vault_token_account.key != vault_state.vault_token_account {
        msg!("❌ Vault token account mismatch");
        return Err(VaultError::InvalidAccount {
            account: *vault_token_account.key,
            reason: "not this vault's token account".to_string(),
        }
        .into());
    }
    if *reward_mint_account.key != vault_state.reward_mint {
        msg!("❌ Reward mint mismatch");
        return Err(VaultError::InvalidAccount {
            account: *reward_mint_account.key,
            reason: "not this vault's reward mint".to_string(),
        }
        .into());
    }
    validate_token_account(
        depositor_token_account,
        &vault_state.underlying_mint,
        depositor.key,
        "Depositor token account",
    )?;
    let reward_mint_authority_bump = validate_pda(
        reward_mint_authority_account,
        &[REWARD_MINT_AUTHORITY_SEED_PREFIX],
        program_id,
        "Reward Mint Authority PDA",
    )?;

    let now = Clock::get()?.unix_timestamp;
    let quote = position.quote(now, vault_state.underlying_decimals, vault_state.reward_decimals)?;

    let reward_to_mint = if quote.reward == 0 {
        0
    } else if authority_state.is_vault_approved(vault_state_account.key) {
        quote.reward
    } else {
        msg!("⚠️ Vault no longer approved, reward of {} not minted", quote.reward);
        0
    };

    position.mark_withdrawn(&quote, reward_to_mint, now)?;
    vault_state.record_withdrawal(&quote, reward_to_mint, now)?;

    // Both accounts are persisted before any CPI.
    serialize_to_account(&position, position_account)?;
    serialize_to_account(&vault_state, vault_state_account)?;

    if quote.payout > 0 {
        msg!("Transferring payout {} from vault to {}", quote.payout, depositor_token_account.key);
        invoke_signed(
            &spl_token::instruction::transfer(
                token_program_account.key,
                vault_token_account.key,
                depositor_token_account.key,
                vault_state_account.key,
                &[],
                quote.payout,
            )?,
            &[
                vault_token_account.clone(),
                depositor_token_account.clone(),
                vault_state_account.clone(),
                token_program_account.clone(),
            ],
            &[&vault_state.signer_seeds()],
        )?;
    }

    if reward_to_mint > 0 {
        validate_writable(reward_mint_account, "Reward mint")?;
        validate_writable(depositor_reward_account, "Depositor reward account")?;
        validate_token_account(
            depositor_reward_account,
            &vault_state.reward_mint,
            depositor.key,
            "Depositor reward account",
        )?;
        msg!("Minting reward {} to {}", reward_to_mint, depositor_reward_account.key);
        invoke_signed(
            &spl_token::instruction::mint_to(
                token_program_account.key,
                reward_mint_account.key,
                depositor_reward_account.key,
                reward_mint_authority_account.key,
                &[],
                reward_to_mint,
            )?,
            &[
                reward_mint_account.clone(),
                depositor_reward_account.clone(),
                reward_mint_authority_account.clone(),
                token_program_account.clone(),
            ],
            &[&[REWARD_MINT_AUTHORITY_SEED_PREFIX, &[reward_mint_authority_bump]]],
        )?;
    }

    set_return_data(&quote.payout.to_le_bytes());

    msg!("✅ WITHDRAWAL COMPLETE:");
    msg!("   • Position ID: {}", position_id);
    msg!("   • Principal: {}", quote.principal);
    msg!("   • Payout: {}", quote.payout);
    msg!("   • Penalty retained: {}", quote.penalty);
    msg!("   • Reward minted: {}", reward_to_mint);
    msg!("   • Matured: {} ({}s elapsed)", quote.matured, quote.elapsed_seconds);
    Ok(())
}
