//! Madness status carried on the investigator record.
//!
//! Only the data lives here; the onset/recovery state machine that decides
//! *when* these transitions happen belongs to the session crate, next to
//! the sanity-loss logic and its symptom tables.

use serde::{Deserialize, Serialize};

/// The kind of a madness episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MadnessKind {
    /// A bout that passes after a few rounds.
    Temporary,
    /// An open-ended affliction with no tracked duration.
    Indefinite,
}

impl std::fmt::Display for MadnessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Temporary => write!(f, "temporary"),
            Self::Indefinite => write!(f, "indefinite"),
        }
    }
}

/// An investigator's current mental state. Exactly one at a time; a new
/// onset overwrites whatever was there before.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum MadnessState {
    /// No active madness.
    #[default]
    Sane,
    /// A temporary bout with a round counter.
    Temporary {
        /// Narrative symptom description.
        description: String,
        /// Rounds until the bout ends.
        remaining_rounds: u32,
    },
    /// An indefinite affliction.
    Indefinite {
        /// Narrative symptom description.
        description: String,
    },
}

impl MadnessState {
    /// Returns true if no madness is active.
    pub fn is_sane(&self) -> bool {
        matches!(self, Self::Sane)
    }

    /// The kind of the active episode, if any.
    pub fn kind(&self) -> Option<MadnessKind> {
        match self {
            Self::Sane => None,
            Self::Temporary { .. } => Some(MadnessKind::Temporary),
            Self::Indefinite { .. } => Some(MadnessKind::Indefinite),
        }
    }

    /// The symptom description of the active episode, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Sane => None,
            Self::Temporary { description, .. } | Self::Indefinite { description } => {
                Some(description)
            }
        }
    }
}
