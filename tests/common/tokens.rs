/*
MIT License

Copyright (c) 2024 Davinci

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! # Token Creation and Management Utilities
//!
//! This module provides utilities for creating and managing SPL tokens
//! in integration tests, including mint creation, token account setup,
//! minting, and balance queries.

use solana_program::pubkey::Pubkey;
use solana_program_test::ProgramTestContext;
use solana_sdk::{program_pack::Pack, signature::Keypair, signer::Signer, system_instruction};
use spl_token::{instruction as token_instruction, state::Account as TokenAccount, state::Mint};

use crate::common::{send_instructions, TestResult};

/// Creates a new SPL token mint with `mint_authority` and `decimals`.
pub async fn create_mint(
    ctx: &mut ProgramTestContext,
    mint: &Keypair,
    mint_authority: &Pubkey,
    decimals: u8,
) -> TestResult {
    let rent = ctx.banks_client.get_rent().await?;
    let lamports = rent.minimum_balance(Mint::LEN);

    let instructions = [
        system_instruction::create_account(
            &ctx.payer.pubkey(),
            &mint.pubkey(),
            lamports,
            Mint::LEN as u64,
            &spl_token::id(),
        ),
        token_instruction::initialize_mint(&spl_token::id(), &mint.pubkey(), mint_authority, None, decimals)
            .unwrap(),
    ];
    send_instructions(ctx, &instructions, &[mint]).await
}

/// Creates a token account for a specific mint and owner.
pub async fn create_token_account(
    ctx: &mut ProgramTestContext,
    token_account: &Keypair,
    mint: &Pubkey,
    owner: &Pubkey,
) -> TestResult {
    let rent = ctx.banks_client.get_rent().await?;
    let lamports = rent.minimum_balance(TokenAccount::LEN);

    let instructions = [
        system_instruction::create_account(
            &ctx.payer.pubkey(),
            &token_account.pubkey(),
            lamports,
            TokenAccount::LEN as u64,
            &spl_token::id(),
        ),
        token_instruction::initialize_account(&spl_token::id(), &token_account.pubkey(), mint, owner).unwrap(),
    ];
    send_instructions(ctx, &instructions, &[token_account]).await
}

/// Creates the owner's associated token account for `mint`.
pub async fn create_associated_token_account(
    ctx: &mut ProgramTestContext,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<Pubkey, solana_program_test::BanksClientError> {
    let instruction = spl_associated_token_account::instruction::create_associated_token_account(
        &ctx.payer.pubkey(),
        owner,
        mint,
        &spl_token::id(),
    );
    send_instructions(ctx, &[instruction], &[]).await?;
    Ok(spl_associated_token_account::get_associated_token_address(owner, mint))
}

/// Mints `amount` tokens to `destination`.
pub async fn mint_tokens(
    ctx: &mut ProgramTestContext,
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Keypair,
    amount: u64,
) -> TestResult {
    let instruction =
        token_instruction::mint_to(&spl_token::id(), mint, destination, &authority.pubkey(), &[], amount).unwrap();
    send_instructions(ctx, &[instruction], &[authority]).await
}

/// Approves `delegate` to move up to `amount` from `source`.
#[allow(dead_code)]
pub async fn approve_delegate(
    ctx: &mut ProgramTestContext,
    source: &Pubkey,
    delegate: &Pubkey,
    owner: &Keypair,
    amount: u64,
) -> TestResult {
    let instruction =
        token_instruction::approve(&spl_token::id(), source, delegate, &owner.pubkey(), &[], amount).unwrap();
    send_instructions(ctx, &[instruction], &[owner]).await
}

/// Transfers lamports from the context payer.
pub async fn airdrop(ctx: &mut ProgramTestContext, recipient: &Pubkey, lamports: u64) -> TestResult {
    let instruction = system_instruction::transfer(&ctx.payer.pubkey(), recipient, lamports);
    send_instructions(ctx, &[instruction], &[]).await
}

/// Reads a token account.
pub async fn get_token_account(ctx: &mut ProgramTestContext, account: &Pubkey) -> TokenAccount {
    let account = ctx
        .banks_client
        .get_account(*account)
        .await
        .unwrap()
        .expect("token account not found");
    TokenAccount::unpack(&account.data).unwrap()
}

/// Reads a token account balance.
pub async fn get_token_balance(ctx: &mut ProgramTestContext, account: &Pubkey) -> u64 {
    get_token_account(ctx, account).await.amount
}

/// Reads a mint's total supply.
#[allow(dead_code)]
pub async fn get_mint_supply(ctx: &mut ProgramTestContext, mint: &Pubkey) -> u64 {
    let account = ctx
        .banks_client
        .get_account(*mint)
        .await
        .unwrap()
        .expect("mint not found");
    Mint::unpack(&account.data).unwrap().supply
}
