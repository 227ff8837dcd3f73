//! Payloads the session sends to the narrator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use nm_character::Investigator;
use nm_mechanics::SuccessTier;

/// A serialized view of one investigator, sent so the narrator can
/// reference the party accurately. Skills are sorted for stable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestigatorSummary {
    /// Investigator id, as a string the narrator can echo back.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Occupation name.
    pub occupation: String,
    /// Current hit points.
    pub hp_current: u32,
    /// Maximum hit points.
    pub hp_max: u32,
    /// Current sanity.
    pub san_current: u32,
    /// Maximum sanity.
    pub san_max: u32,
    /// Madness status in prose, e.g. `"sane"` or a symptom description.
    pub madness: String,
    /// Skill totals by name.
    pub skills: BTreeMap<String, u32>,
    /// Carried weapons and armor by name.
    pub equipment: Vec<String>,
}

impl InvestigatorSummary {
    /// Build a summary from live character state.
    pub fn of(investigator: &Investigator) -> Self {
        let madness = match investigator.madness.description() {
            Some(description) => format!("mad: {description}"),
            None => "sane".to_string(),
        };
        let equipment = investigator
            .weapons
            .iter()
            .map(|w| w.name.clone())
            .chain(investigator.armor.iter().map(|a| a.name.clone()))
            .collect();
        Self {
            id: investigator.id.to_string(),
            name: investigator.name.clone(),
            occupation: investigator.occupation.clone(),
            hp_current: investigator.hp.current,
            hp_max: investigator.hp.max,
            san_current: investigator.san.current,
            san_max: investigator.san.max,
            madness,
            skills: investigator
                .skills
                .iter()
                .map(|(name, value)| (name.clone(), *value))
                .collect(),
            equipment,
        }
    }
}

/// The outcome of a just-resolved check, reported back to the narrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    /// Who rolled.
    pub investigator: String,
    /// Name of the check, e.g. `"Spot Hidden"` or `"POW x5"`.
    pub check: String,
    /// Target value the roll was compared against.
    pub target: u32,
    /// The d100 result.
    pub roll: u32,
    /// Resolution tier.
    pub tier: SuccessTier,
    /// True if this result came from a push roll.
    pub pushed: bool,
}

impl CheckReport {
    /// One-line summary for transcripts and narrator instructions.
    pub fn message(&self) -> String {
        let pushed = if self.pushed { " (pushed)" } else { "" };
        format!(
            "{} rolled {} on {} (target {}): {}{}",
            self.investigator, self.roll, self.check, self.target, self.tier, pushed
        )
    }
}

/// A turn request to the narrator: what the players did, who they are,
/// and how the dice fell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarratorRequest {
    /// Free-form instruction text, usually the player's action or a
    /// system-composed result message.
    pub instruction: String,
    /// Current party state.
    pub party: Vec<InvestigatorSummary>,
    /// The check that was just resolved, when one was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_outcome: Option<CheckReport>,
}
