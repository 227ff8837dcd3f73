//! Degree-of-success grading for percentile checks.
//!
//! One pure function resolves every kind of check in the game: skill,
//! stat, and push-rolls all grade a d100 roll against a target value. The
//! tiers follow the classic percentile-horror ladder: a natural 1 is always
//! a critical, a fifth of the target is an extreme success, half is a hard
//! success, 100 is always a fumble, and 96-99 fumble only against targets
//! below 50.

use serde::{Deserialize, Serialize};

/// Default multiplier for stat checks (`target = stat * 5`).
pub const DEFAULT_STAT_MULTIPLIER: u32 = 5;

/// The graded outcome of a percentile check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuccessTier {
    /// A natural 1, the best possible result.
    Critical,
    /// Roll at or below one fifth of the target.
    ExtremeSuccess,
    /// Roll at or below half of the target.
    HardSuccess,
    /// Roll at or below the target.
    RegularSuccess,
    /// Roll above the target.
    Failure,
    /// Roll of 96-99 against a target below 50.
    Fumble,
    /// A natural 100, always a fumble regardless of target.
    Fumble00,
}

impl SuccessTier {
    /// Whether this tier counts as a success for downstream branching
    /// (push-roll offers, sanity-loss sides, narrator reporting).
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Self::Critical | Self::ExtremeSuccess | Self::HardSuccess | Self::RegularSuccess
        )
    }
}

impl std::fmt::Display for SuccessTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "Critical"),
            Self::ExtremeSuccess => write!(f, "Extreme Success"),
            Self::HardSuccess => write!(f, "Hard Success"),
            Self::RegularSuccess => write!(f, "Regular Success"),
            Self::Failure => write!(f, "Failure"),
            Self::Fumble => write!(f, "Fumble"),
            Self::Fumble00 => write!(f, "Fumble (00)"),
        }
    }
}

/// Grade a d100 roll against a target value.
///
/// The branches are ordered by precedence: a roll of 1 is a critical even
/// against target 0, and a success band always wins over the fumble bands.
pub fn resolve(roll: u32, target: u32) -> SuccessTier {
    if roll <= 1 {
        SuccessTier::Critical
    } else if roll <= target / 5 {
        SuccessTier::ExtremeSuccess
    } else if roll <= target / 2 {
        SuccessTier::HardSuccess
    } else if roll <= target {
        SuccessTier::RegularSuccess
    } else if roll >= 100 {
        SuccessTier::Fumble00
    } else if roll >= 96 && target < 50 {
        SuccessTier::Fumble
    } else {
        SuccessTier::Failure
    }
}

/// Target value for a stat check: `stat * multiplier`.
pub fn stat_check_target(stat: u32, multiplier: u32) -> u32 {
    stat * multiplier
}
