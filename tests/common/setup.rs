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

//! # Test Environment Setup Utilities
//!
//! This module provides utilities for setting up test environments,
//! including program test creation, transaction submission, error
//! assertions, and clock control.

use borsh::BorshDeserialize;
use solana_program::{clock::Clock, instruction::Instruction, program::MAX_RETURN_DATA};
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::{
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};
use std::env;

use crate::common::PROGRAM_ID;
use farm_vault::{error::VaultError, process_instruction};

/// Create a basic program test environment
///
/// Sets up the program test with the farm vault program. The SPL Token and
/// Associated Token Account programs are loaded by default.
pub fn create_program_test() -> ProgramTest {
    ProgramTest::new("farm_vault", PROGRAM_ID, processor!(process_instruction))
}

/// Start a test context with minimal logging
pub async fn start_test_context() -> ProgramTestContext {
    env::set_var("RUST_LOG", "error,solana_runtime::message_processor::stable_log=error");
    let _ = env_logger::try_init();

    create_program_test().start_with_context().await
}

/// Start a test context with program logs enabled
#[allow(dead_code)]
pub async fn start_test_context_with_debug() -> ProgramTestContext {
    env::set_var("RUST_LOG", "debug,solana_runtime::message_processor::stable_log=debug");
    let _ = env_logger::try_init();

    create_program_test().start_with_context().await
}

/// Signs and submits `instructions` with the context payer as fee payer.
///
/// A fresh blockhash is fetched for every transaction so that retrying an
/// identical instruction is executed instead of being deduplicated.
pub async fn send_instructions(
    ctx: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<(), BanksClientError> {
    let blockhash = ctx.get_new_latest_blockhash().await?;
    let mut all_signers: Vec<&Keypair> = vec![&ctx.payer];
    all_signers.extend(signers.iter().copied().filter(|s| s.pubkey() != ctx.payer.pubkey()));

    let transaction = Transaction::new_signed_with_payer(
        instructions,
        Some(&ctx.payer.pubkey()),
        &all_signers,
        blockhash,
    );
    ctx.banks_client.process_transaction(transaction).await
}

/// Submits a single instruction and returns the program's return data.
pub async fn send_for_return_data(
    ctx: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<Vec<u8>, BanksClientError> {
    let blockhash = ctx.get_new_latest_blockhash().await?;
    let mut all_signers: Vec<&Keypair> = vec![&ctx.payer];
    all_signers.extend(signers.iter().copied().filter(|s| s.pubkey() != ctx.payer.pubkey()));

    let transaction = Transaction::new_signed_with_payer(
        instructions,
        Some(&ctx.payer.pubkey()),
        &all_signers,
        blockhash,
    );
    let outcome = ctx
        .banks_client
        .process_transaction_with_metadata(transaction)
        .await?;
    outcome.result.map_err(BanksClientError::TransactionError)?;

    Ok(outcome
        .metadata
        .and_then(|metadata| metadata.return_data)
        .map(|return_data| return_data.data)
        .unwrap_or_default())
}

/// Decodes Borsh return data. The bank strips trailing zero bytes from
/// recorded return data, so they are padded back before decoding.
pub fn decode_return_data<T: BorshDeserialize>(data: &[u8]) -> T {
    let mut padded = data.to_vec();
    padded.resize(MAX_RETURN_DATA.max(data.len()), 0);
    T::deserialize(&mut &padded[..]).unwrap()
}

/// Extracts the custom program error code from a failed transaction.
pub fn custom_error_code(error: BanksClientError) -> Option<u32> {
    match error.unwrap() {
        TransactionError::InstructionError(_, solana_program::instruction::InstructionError::Custom(code)) => Some(code),
        _ => None,
    }
}

/// Asserts that `result` failed with `expected`.
pub fn assert_vault_error(result: Result<(), BanksClientError>, expected: VaultError) {
    match result {
        Ok(()) => panic!("expected {:?}, transaction succeeded", expected),
        Err(e) => {
            let code = custom_error_code(e);
            assert_eq!(
                code,
                Some(expected.error_code()),
                "expected {:?} ({}), got {:?}",
                expected,
                expected.error_code(),
                code
            );
        }
    }
}

/// Moves the on-chain clock forward by `seconds`.
pub async fn advance_clock(ctx: &mut ProgramTestContext, seconds: i64) {
    let mut clock: Clock = ctx.banks_client.get_sysvar().await.unwrap();
    clock.unix_timestamp += seconds;
    ctx.set_sysvar(&clock);
}

/// Sets the on-chain clock to an exact unix timestamp.
#[allow(dead_code)]
pub async fn set_clock(ctx: &mut ProgramTestContext, unix_timestamp: i64) {
    let mut clock: Clock = ctx.banks_client.get_sysvar().await.unwrap();
    clock.unix_timestamp = unix_timestamp;
    ctx.set_sysvar(&clock);
}
