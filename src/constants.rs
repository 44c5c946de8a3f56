//! Constants for the Farm Vault Program
//!
//! This module contains the lock table defaults, basis point math constants,
//! registry limits, and PDA seed prefixes used throughout the program.

/// Denominator for basis point calculations (1 basis point = 0.01%)
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// Seconds in a (non-leap) year, used for APY accrual
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;

/// Seconds in a day
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Maximum number of lock options a single vault can carry
pub const MAX_LOCK_OPTIONS: usize = 8;

/// Maximum number of vaults the authority can approve at once
pub const MAX_VAULTS: usize = 8;

/// Upper bound for any reward APY (500%)
pub const MAX_REWARD_APY_BASIS_POINTS: u16 = 50_000;

/// Upper bound for any early withdrawal penalty (100%)
pub const MAX_PENALTY_BASIS_POINTS: u16 = 10_000;

/// Largest decimals difference allowed between a vault's underlying and reward mints
pub const MAX_DECIMALS_GAP: u8 = 18;

/// Longest lock duration a vault accepts (4 years)
pub const MAX_LOCK_DURATION_SECONDS: i64 = 4 * 365 * SECONDS_PER_DAY;

/// Default lock table: no lock, earns 10% APY, no penalty
pub const NO_LOCK_SELECTOR: u8 = 0;
pub const NO_LOCK_REWARD_APY_BASIS_POINTS: u16 = 1_000;

/// Default lock table: six month lock, earns 20% APY, 10% early penalty
pub const SIX_MONTH_LOCK_SELECTOR: u8 = 6;
pub const SIX_MONTH_LOCK_DURATION_SECONDS: i64 = 180 * SECONDS_PER_DAY;
pub const SIX_MONTH_REWARD_APY_BASIS_POINTS: u16 = 2_000;

/// Default lock table: one year lock, earns 30% APY, 10% early penalty
pub const ONE_YEAR_LOCK_SELECTOR: u8 = 12;
pub const ONE_YEAR_LOCK_DURATION_SECONDS: i64 = 365 * SECONDS_PER_DAY;
pub const ONE_YEAR_REWARD_APY_BASIS_POINTS: u16 = 3_000;

/// Early withdrawal penalty shared by the default locked options (10%)
pub const DEFAULT_EARLY_WITHDRAWAL_PENALTY_BASIS_POINTS: u16 = 1_000;

/// Timelock for governor hand-over (72 hours)
pub const GOVERNOR_CHANGE_TIMELOCK_SECONDS: i64 = 72 * 60 * 60;

/// PDA seed prefix for the authority state account
pub const AUTHORITY_STATE_SEED_PREFIX: &[u8] = b"authority_state";

/// PDA seed prefix for the reward mint authority
pub const REWARD_MINT_AUTHORITY_SEED_PREFIX: &[u8] = b"reward_mint_authority";

/// PDA seed prefix for vault state accounts
pub const VAULT_STATE_SEED_PREFIX: &[u8] = b"vault_state";

/// PDA seed prefix for the vault's underlying token account
pub const VAULT_TOKEN_SEED_PREFIX: &[u8] = b"vault_token";

/// PDA seed prefix for deposit position accounts
pub const POSITION_SEED_PREFIX: &[u8] = b"position";
