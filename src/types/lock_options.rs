//! Lock Options and Withdrawal Settlement
//!
//! A vault carries a small lock table mapping a numeric lock selector to the
//! terms a deposit accepts: how long principal stays locked, the reward APY it
//! earns, and the share of principal withheld if it is withdrawn before the
//! lock matures. Settlement math lives here so processors and views share it.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::msg;

use crate::{
    constants::*,
    error::VaultError,
};

/// One row of a vault's lock table.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOption {
    /// Selector passed by depositors (e.g. 0 = no lock, 6 = six months)
    pub selector: u8,
    /// Seconds principal stays locked; 0 means withdrawable at any time
    pub duration_seconds: i64,
    /// Reward rate in basis points per year, paid in the reward token
    pub reward_apy_basis_points: u16,
    /// Share of principal withheld on withdrawal before maturity
    pub early_withdrawal_penalty_basis_points: u16,
}

impl LockOption {
    /// Serialized size: selector + duration + apy + penalty
    pub const LEN: usize = 1 + 8 + 2 + 2;

    pub fn new(
        selector: u8,
        duration_seconds: i64,
        reward_apy_basis_points: u16,
        early_withdrawal_penalty_basis_points: u16,
    ) -> Self {
        Self {
            selector,
            duration_seconds,
            reward_apy_basis_points,
            early_withdrawal_penalty_basis_points,
        }
    }

    /// Validates a single lock option against the program limits.
    pub fn validate(&self) -> Result<(), VaultError> {
        if self.duration_seconds < 0 || self.duration_seconds > MAX_LOCK_DURATION_SECONDS {
            return Err(VaultError::InvalidLockTable {
                reason: format!(
                    "selector {} duration {} outside 0..={}",
                    self.selector, self.duration_seconds, MAX_LOCK_DURATION_SECONDS
                ),
            });
        }
        if self.reward_apy_basis_points > MAX_REWARD_APY_BASIS_POINTS {
            return Err(VaultError::InvalidLockTable {
                reason: format!(
                    "selector {} reward apy {} exceeds {}",
                    self.selector, self.reward_apy_basis_points, MAX_REWARD_APY_BASIS_POINTS
                ),
            });
        }
        if self.early_withdrawal_penalty_basis_points > MAX_PENALTY_BASIS_POINTS {
            return Err(VaultError::InvalidLockTable {
                reason: format!(
                    "selector {} penalty {} exceeds {}",
                    self.selector, self.early_withdrawal_penalty_basis_points, MAX_PENALTY_BASIS_POINTS
                ),
            });
        }
        Ok(())
    }

    /// Unix timestamp at which a deposit made at `created_at` matures.
    pub fn unlocks_at(&self, created_at: i64) -> Result<i64, VaultError> {
        created_at
            .checked_add(self.duration_seconds)
            .ok_or(VaultError::ArithmeticOverflow)
    }
}

/// Lock table installed when a vault is created without explicit options.
pub fn default_lock_options() -> Vec<LockOption> {
    vec![
        LockOption::new(NO_LOCK_SELECTOR, 0, NO_LOCK_REWARD_APY_BASIS_POINTS, 0),
        LockOption::new(
            SIX_MONTH_LOCK_SELECTOR,
            SIX_MONTH_LOCK_DURATION_SECONDS,
            SIX_MONTH_REWARD_APY_BASIS_POINTS,
            DEFAULT_EARLY_WITHDRAWAL_PENALTY_BASIS_POINTS,
        ),
        LockOption::new(
            ONE_YEAR_LOCK_SELECTOR,
            ONE_YEAR_LOCK_DURATION_SECONDS,
            ONE_YEAR_REWARD_APY_BASIS_POINTS,
            DEFAULT_EARLY_WITHDRAWAL_PENALTY_BASIS_POINTS,
        ),
    ]
}

/// Validates a whole lock table: bounded size, unique selectors, valid rows.
pub fn validate_lock_table(options: &[LockOption]) -> Result<(), VaultError> {
    if options.is_empty() {
        return Err(VaultError::InvalidLockTable {
            reason: "lock table cannot be empty".to_string(),
        });
    }
    if options.len() > MAX_LOCK_OPTIONS {
        return Err(VaultError::InvalidLockTable {
            reason: format!("{} options exceeds maximum of {}", options.len(), MAX_LOCK_OPTIONS),
        });
    }
    for (i, option) in options.iter().enumerate() {
        option.validate()?;
        if options[..i].iter().any(|o| o.selector == option.selector) {
            return Err(VaultError::InvalidLockTable {
                reason: format!("duplicate selector {}", option.selector),
            });
        }
    }
    Ok(())
}

/// Looks up a selector in a lock table.
pub fn find_lock_option(options: &[LockOption], selector: u8) -> Result<LockOption, VaultError> {
    options
        .iter()
        .find(|o| o.selector == selector)
        .copied()
        .ok_or(VaultError::InvalidLockSelector { selector })
}

/// Inserts a new selector or replaces an existing one, keeping the table valid.
pub fn upsert_lock_option(options: &mut Vec<LockOption>, option: LockOption) -> Result<(), VaultError> {
    option.validate()?;
    match options.iter_mut().find(|o| o.selector == option.selector) {
        Some(existing) => *existing = option,
        None => {
            if options.len() >= MAX_LOCK_OPTIONS {
                return Err(VaultError::InvalidLockTable {
                    reason: format!("lock table already holds {} options", MAX_LOCK_OPTIONS),
                });
            }
            options.push(option);
        }
    }
    Ok(())
}

/// Outcome of settling a position at a given time.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawalQuote {
    pub principal: u64,
    /// Underlying tokens returned to the depositor
    pub payout: u64,
    /// Underlying tokens withheld by the vault
    pub penalty: u64,
    /// Reward tokens minted to the depositor
    pub reward: u64,
    pub matured: bool,
    pub elapsed_seconds: i64,
}

/// Settles `principal` deposited under `option` after `elapsed_seconds`.
///
/// A position is matured once the elapsed time reaches the lock duration.
/// Matured positions return full principal plus reward for the elapsed time,
/// capped at the lock duration for locked options. Positions withdrawn
/// before maturity forfeit their reward and the penalty share of principal.
/// A reward the math cannot represent is dropped to 0; it never blocks the
/// principal settlement.
pub fn quote_withdrawal(
    principal: u64,
    option: &LockOption,
    elapsed_seconds: i64,
    underlying_decimals: u8,
    reward_decimals: u8,
) -> Result<WithdrawalQuote, VaultError> {
    let elapsed = elapsed_seconds.max(0);
    let matured = elapsed >= option.duration_seconds;

    let penalty = if matured {
        0
    } else {
        basis_points_of(principal, option.early_withdrawal_penalty_basis_points)?
    };
    let payout = principal
        .checked_sub(penalty)
        .ok_or(VaultError::ArithmeticOverflow)?;

    let reward = if matured {
        let reward_seconds = if option.duration_seconds > 0 {
            elapsed.min(option.duration_seconds)
        } else {
            elapsed
        };
        match accrued_reward(
            principal,
            option.reward_apy_basis_points,
            reward_seconds as u64,
            underlying_decimals,
            reward_decimals,
        ) {
            Ok(reward) => reward,
            Err(e) => {
                msg!("⚠️ Reward for principal {} not computable ({}), settling principal only", principal, e);
                0
            }
        }
    } else {
        0
    };

    Ok(WithdrawalQuote {
        principal,
        payout,
        penalty,
        reward,
        matured,
        elapsed_seconds: elapsed,
    })
}

/// `amount * basis_points / 10_000`, rounded down.
pub fn basis_points_of(amount: u64, basis_points: u16) -> Result<u64, VaultError> {
    let value = (amount as u128)
        .checked_mul(basis_points as u128)
        .ok_or(VaultError::ArithmeticOverflow)?
        / BASIS_POINTS_DENOMINATOR as u128;
    u64::try_from(value).map_err(|_| VaultError::ArithmeticOverflow)
}

/// Reward for holding `principal` for `seconds` at `apy_basis_points`,
/// converted from underlying base units to reward base units.
pub fn accrued_reward(
    principal: u64,
    apy_basis_points: u16,
    seconds: u64,
    underlying_decimals: u8,
    reward_decimals: u8,
) -> Result<u64, VaultError> {
    let mut numerator = (principal as u128)
        .checked_mul(apy_basis_points as u128)
        .and_then(|v| v.checked_mul(seconds as u128))
        .ok_or(VaultError::ArithmeticOverflow)?;
    let mut denominator = (BASIS_POINTS_DENOMINATOR as u128) * (SECONDS_PER_YEAR as u128);

    if reward_decimals >= underlying_decimals {
        let scale = 10u128
            .checked_pow((reward_decimals - underlying_decimals) as u32)
            .ok_or(VaultError::ArithmeticOverflow)?;
        numerator = numerator.checked_mul(scale).ok_or(VaultError::ArithmeticOverflow)?;
    } else {
        let scale = 10u128
            .checked_pow((underlying_decimals - reward_decimals) as u32)
            .ok_or(VaultError::ArithmeticOverflow)?;
        denominator = denominator.checked_mul(scale).ok_or(VaultError::ArithmeticOverflow)?;
    }

    u64::try_from(numerator / denominator).map_err(|_| VaultError::ArithmeticOverflow)
}
