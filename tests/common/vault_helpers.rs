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

//! # Vault Test Helpers
//!
//! Builds a complete vault fixture: authority state with separate guardian and
//! policy keys, a stablecoin mint, a reward mint controlled by the program, a
//! vault using the default lock table, and a depositor holding 1000 tokens.

use borsh::BorshDeserialize;
use solana_program::pubkey::Pubkey;
use solana_program_test::{BanksClientError, ProgramTestContext};
use solana_sdk::signature::{Keypair, Signer};

use crate::common::{
    airdrop, constants, create_associated_token_account, create_mint, create_token_account,
    decode_return_data, get_token_balance, mint_tokens, send_for_return_data, send_instructions, start_test_context,
    AuthorityState, PositionState, TestResult, VaultClient, VaultConfig, VaultState, PROGRAM_ID,
};

/// A depositor with a funded stablecoin account and a reward token account.
pub struct TestDepositor {
    pub wallet: Keypair,
    pub token_account: Keypair,
    pub reward_account: Pubkey,
}

/// Complete vault test context
pub struct VaultTestContext {
    pub ctx: ProgramTestContext,
    pub client: VaultClient,
    pub guardian: Keypair,
    pub policy: Keypair,
    pub stablecoin_mint: Keypair,
    pub stablecoin_authority: Keypair,
    pub reward_mint: Keypair,
    pub config: VaultConfig,
    pub user: TestDepositor,
}

impl VaultTestContext {
    pub fn vault_state_address(&self) -> Pubkey {
        self.client.derive_vault_addresses(&self.config).vault_state
    }

    pub fn vault_token_address(&self) -> Pubkey {
        self.client.derive_vault_addresses(&self.config).vault_token_account
    }

    pub async fn authority_state(&mut self) -> AuthorityState {
        let address = self.client.derive_authority_state();
        let account = self.ctx.banks_client.get_account(address).await.unwrap().expect("authority state missing");
        AuthorityState::deserialize(&mut &account.data[..]).unwrap()
    }

    pub async fn vault_state(&mut self) -> VaultState {
        let address = self.vault_state_address();
        let account = self.ctx.banks_client.get_account(address).await.unwrap().expect("vault state missing");
        VaultState::deserialize(&mut &account.data[..]).unwrap()
    }

    pub async fn position(&mut self, position_id: u64) -> Option<PositionState> {
        let address = self.client.derive_position(&self.vault_state_address(), position_id);
        self.ctx
            .banks_client
            .get_account(address)
            .await
            .unwrap()
            .map(|account| PositionState::deserialize(&mut &account.data[..]).unwrap())
    }

    pub async fn user_balance(&mut self) -> u64 {
        let account = self.user.token_account.pubkey();
        get_token_balance(&mut self.ctx, &account).await
    }

    pub async fn user_reward_balance(&mut self) -> u64 {
        let account = self.user.reward_account;
        get_token_balance(&mut self.ctx, &account).await
    }

    pub async fn vault_token_balance(&mut self) -> u64 {
        let account = self.vault_token_address();
        get_token_balance(&mut self.ctx, &account).await
    }

    /// Creates and funds an extra depositor.
    pub async fn create_depositor(&mut self, balance: u64) -> Result<TestDepositor, BanksClientError> {
        let wallet = Keypair::new();
        let token_account = Keypair::new();
        airdrop(&mut self.ctx, &wallet.pubkey(), constants::DEFAULT_SOL_AIRDROP).await?;
        create_token_account(&mut self.ctx, &token_account, &self.config.underlying_mint, &wallet.pubkey()).await?;
        if balance > 0 {
            mint_tokens(
                &mut self.ctx,
                &self.config.underlying_mint,
                &token_account.pubkey(),
                &self.stablecoin_authority,
                balance,
            )
            .await?;
        }
        let reward_account =
            create_associated_token_account(&mut self.ctx, &wallet.pubkey(), &self.config.reward_mint).await?;
        Ok(TestDepositor {
            wallet,
            token_account,
            reward_account,
        })
    }

    /// Approves and deposits for the default user, returning the position id
    /// reported by the program.
    pub async fn deposit(&mut self, amount: u64, lock_selector: u8) -> Result<u64, BanksClientError> {
        let position_id = self.vault_state().await.next_position_id;
        let instructions = self
            .client
            .deposit_with_approval_instructions(
                &self.config,
                &self.user.wallet.pubkey(),
                &self.user.token_account.pubkey(),
                position_id,
                amount,
                lock_selector,
            )
            .unwrap();
        let return_data = send_for_return_data(&mut self.ctx, &instructions, &[&self.user.wallet]).await?;
        Ok(decode_return_data::<u64>(&return_data))
    }

    /// Deposits without approving the vault first.
    pub async fn deposit_without_approval(&mut self, amount: u64, lock_selector: u8) -> TestResult {
        let position_id = self.vault_state().await.next_position_id;
        let instruction = self
            .client
            .deposit_instruction(
                &self.config,
                &self.user.wallet.pubkey(),
                &self.user.token_account.pubkey(),
                position_id,
                amount,
                lock_selector,
            )
            .unwrap();
        send_instructions(&mut self.ctx, &[instruction], &[&self.user.wallet]).await
    }

    /// Withdraws a position for the default user, returning the payout
    /// reported by the program.
    pub async fn withdraw(&mut self, position_id: u64) -> Result<u64, BanksClientError> {
        let instruction = self
            .client
            .withdraw_instruction(
                &self.config,
                &self.user.wallet.pubkey(),
                &self.user.token_account.pubkey(),
                position_id,
            )
            .unwrap();
        let return_data = send_for_return_data(&mut self.ctx, &[instruction], &[&self.user.wallet]).await?;
        Ok(decode_return_data::<u64>(&return_data))
    }

    /// Withdraws a position on behalf of `depositor`.
    pub async fn withdraw_as(&mut self, depositor: &TestDepositor, position_id: u64) -> TestResult {
        let instruction = self
            .client
            .withdraw_instruction(
                &self.config,
                &depositor.wallet.pubkey(),
                &depositor.token_account.pubkey(),
                position_id,
            )
            .unwrap();
        send_instructions(&mut self.ctx, &[instruction], &[&depositor.wallet]).await
    }

    /// Approves or revokes the vault as the governor (the context payer).
    pub async fn push_vault(&mut self, approved: bool) -> TestResult {
        let governor = self.ctx.payer.pubkey();
        let instruction = self
            .client
            .push_vault_instruction(&governor, self.vault_state_address(), approved)
            .unwrap();
        send_instructions(&mut self.ctx, &[instruction], &[]).await
    }

    pub async fn pause(&mut self, reason_code: u8) -> TestResult {
        let instruction = self.client.pause_instruction(&self.guardian.pubkey(), reason_code).unwrap();
        send_instructions(&mut self.ctx, &[instruction], &[&self.guardian]).await
    }

    pub async fn unpause(&mut self) -> TestResult {
        let instruction = self.client.unpause_instruction(&self.guardian.pubkey()).unwrap();
        send_instructions(&mut self.ctx, &[instruction], &[&self.guardian]).await
    }
}

/// Initializes the authority state. The context payer is the upgrade
/// authority in the test bank, so it becomes the governor.
pub async fn initialize_authority(
    ctx: &mut ProgramTestContext,
    client: &VaultClient,
    guardian: &Pubkey,
    policy: &Pubkey,
) -> TestResult {
    let governor = ctx.payer.pubkey();
    let instruction = client
        .initialize_authority_instruction(&governor, *guardian, *policy)
        .unwrap();
    send_instructions(ctx, &[instruction], &[]).await
}

/// Sets up authority, mints, the vault (default lock table) and a depositor
/// holding 1000 stablecoins. When `approve_vault` is set the governor pushes
/// the vault into the approved registry.
pub async fn setup_vault_test_context(approve_vault: bool) -> Result<VaultTestContext, BanksClientError> {
    let mut ctx = start_test_context().await;
    let client = VaultClient::new(PROGRAM_ID);

    let guardian = Keypair::new();
    let policy = Keypair::new();
    airdrop(&mut ctx, &policy.pubkey(), constants::DEFAULT_SOL_AIRDROP).await?;
    initialize_authority(&mut ctx, &client, &guardian.pubkey(), &policy.pubkey()).await?;

    let stablecoin_mint = Keypair::new();
    let stablecoin_authority = Keypair::new();
    let reward_mint = Keypair::new();
    create_mint(
        &mut ctx,
        &stablecoin_mint,
        &stablecoin_authority.pubkey(),
        constants::STABLECOIN_DECIMALS,
    )
    .await?;
    create_mint(
        &mut ctx,
        &reward_mint,
        &client.derive_reward_mint_authority(),
        constants::REWARD_DECIMALS,
    )
    .await?;

    let config = VaultConfig::new(stablecoin_mint.pubkey(), reward_mint.pubkey()).unwrap();
    let instruction = client
        .initialize_vault_instruction(&policy.pubkey(), &config, Vec::new())
        .unwrap();
    send_instructions(&mut ctx, &[instruction], &[&policy]).await?;

    // Placeholder depositor, replaced below once the fixture exists.
    let placeholder = TestDepositor {
        wallet: Keypair::new(),
        token_account: Keypair::new(),
        reward_account: Pubkey::default(),
    };
    let mut vault = VaultTestContext {
        ctx,
        client,
        guardian,
        policy,
        stablecoin_mint,
        stablecoin_authority,
        reward_mint,
        config,
        user: placeholder,
    };
    vault.user = vault.create_depositor(constants::INITIAL_USER_BALANCE).await?;

    if approve_vault {
        vault.push_vault(true).await?;
    }
    Ok(vault)
}
