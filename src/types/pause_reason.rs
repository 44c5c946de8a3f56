//! Pause Reason Codes
//!
//! Pause reasons are stored on-chain as a single byte. Clients and log output
//! map the byte back to a readable reason through this enum.

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

/// Standard pause reason codes. 0 means no pause is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u8)]
pub enum PauseReason {
    None = 0,
    ContractUpgrade = 1,
    SecurityIssue = 2,
    Maintenance = 3,
    EmergencyHalt = 4,
    GovernanceAction = 5,
    RewardTokenIssue = 6,
    LockTableMigration = 7,
    Compliance = 8,
    Custom = 255,
}

impl PauseReason {
    /// Decodes a stored reason byte; unknown codes are reported as `Custom`.
    pub fn from_code(code: u8) -> Self {
        PauseReason::from_u8(code).unwrap_or(PauseReason::Custom)
    }

    pub fn description(&self) -> &'static str {
        match self {
            PauseReason::None => "No pause active",
            PauseReason::ContractUpgrade => "Contract upgrade in progress",
            PauseReason::SecurityIssue => "Critical security issue detected",
            PauseReason::Maintenance => "Routine maintenance",
            PauseReason::EmergencyHalt => "Emergency halt due to unexpected behavior",
            PauseReason::GovernanceAction => "Governance action in progress",
            PauseReason::RewardTokenIssue => "Reward token issuance suspended",
            PauseReason::LockTableMigration => "Lock table migration",
            PauseReason::Compliance => "Compliance or regulatory requirements",
            PauseReason::Custom => "Custom reason (see external documentation)",
        }
    }
}
