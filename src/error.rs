use solana_program::{
    program_error::ProgramError,
    pubkey::Pubkey,
};
use thiserror::Error;

/// Error types for the Farm Vault Program.
///
/// Every variant maps to a stable custom error code so clients can match
/// on `ProgramError::Custom(code)` without decoding log output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// The depositor has not approved the vault for enough tokens
    #[error("Insufficient allowance: Required {required}, Approved {approved}, Account {account}")]
    InsufficientAllowance {
        required: u64,
        approved: u64,
        account: Pubkey,
    },

    /// The depositor's token account cannot cover the deposit
    #[error("Insufficient balance: Required {required}, Available {available}, Account {account}")]
    InsufficientBalance {
        required: u64,
        available: u64,
        account: Pubkey,
    },

    /// No position exists under the requested id
    #[error("Position {position_id} not found")]
    PositionNotFound { position_id: u64 },

    /// The position has already been settled
    #[error("Position {position_id} already withdrawn")]
    AlreadyWithdrawn { position_id: u64 },

    /// Signer does not hold the role or ownership required
    #[error("Unauthorized")]
    Unauthorized,

    /// Lock selector is not present in the vault's lock table
    #[error("Invalid lock selector: {selector}")]
    InvalidLockSelector { selector: u8 },

    /// Lock table entry or table shape rejected
    #[error("Invalid lock table: {reason}")]
    InvalidLockTable { reason: String },

    /// Vault is not registered with the authority
    #[error("Vault {vault} is not approved by the authority")]
    VaultNotApproved { vault: Pubkey },

    /// No room left in the approved vault registry
    #[error("Vault registry full: maximum {max} vaults")]
    VaultRegistryFull { max: u8 },

    /// System is paused - all ledger operations blocked except unpause
    #[error("System is paused - all operations blocked except unpause")]
    SystemPaused,

    /// System is already paused
    #[error("System is already paused")]
    SystemAlreadyPaused,

    /// System is not paused
    #[error("System is not paused")]
    SystemNotPaused,

    /// Penalty sweep exceeds what the vault has withheld
    #[error("Insufficient penalty balance: Requested {requested}, Available {available}")]
    InsufficientPenaltyBalance {
        requested: u64,
        available: u64,
    },

    /// Arithmetic overflow
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    /// Position account was derived from an id other than the vault's next one
    #[error("Stale position id: the vault's next position id is {next_position_id}")]
    StalePositionId { next_position_id: u64 },

    /// Account failed mint, owner, or address validation
    #[error("Invalid account: Account {account}. Reason: {reason}")]
    InvalidAccount {
        account: Pubkey,
        reason: String,
    },
}

impl VaultError {
    /// Returns a unique error code for each error variant.
    ///
    /// Error codes are part of the program's public interface and never
    /// get renumbered.
    pub fn error_code(&self) -> u32 {
        match self {
            VaultError::InsufficientAllowance { .. } => 2001,
            VaultError::InsufficientBalance { .. } => 2002,
            VaultError::PositionNotFound { .. } => 2003,
            VaultError::AlreadyWithdrawn { .. } => 2004,
            VaultError::Unauthorized => 2005,
            VaultError::InvalidLockSelector { .. } => 2006,
            VaultError::InvalidLockTable { .. } => 2007,
            VaultError::VaultNotApproved { .. } => 2008,
            VaultError::VaultRegistryFull { .. } => 2009,
            VaultError::SystemPaused => 2010,
            VaultError::SystemAlreadyPaused => 2011,
            VaultError::SystemNotPaused => 2012,
            VaultError::InsufficientPenaltyBalance { .. } => 2013,
            VaultError::ArithmeticOverflow => 2014,
            VaultError::InvalidAccount { .. } => 2015,
            VaultError::StalePositionId { .. } => 2016,
        }
    }
}

impl From<VaultError> for ProgramError {
    /// Converts a VaultError into a ProgramError for Solana program compatibility.
    fn from(e: VaultError) -> Self {
        ProgramError::Custom(e.error_code())
    }
}
