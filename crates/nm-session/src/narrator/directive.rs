//! The narrator's structured turn response.

use serde::{Deserialize, Serialize};

use crate::sanity::MadnessRecoveryScope;

/// One turn's worth of instructions from the narrator.
///
/// Only `description` and `actionRequired` are required on the wire;
/// every optional field defaults to empty or absent. A response that
/// is not valid JSON, or is missing a required field, is replaced by
/// [`NarratorDirective::fallback`] rather than surfaced as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarratorDirective {
    /// Narrative prose for this turn.
    pub description: String,
    /// What the narrator expects the players to do next.
    pub action_required: String,
    /// A sanity check to run, if the narrator demands one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanity_check: Option<SanityCheckDirective>,
    /// Name of a skill to check, if demanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_check: Option<String>,
    /// An attribute check to run, if demanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_check: Option<StatCheckDirective>,
    /// A plain dice roll with no pass/fail target, if demanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dice_roll_required: Option<DiceRollDirective>,
    /// A narrator-granted recovery from madness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub madness_recovery: Option<MadnessRecoveryDirective>,
    /// Free suggestions for the players to pick from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_actions: Vec<String>,
    /// The narrator has declared the scenario lost.
    #[serde(default)]
    pub game_over: bool,
    /// The narrator has declared the scenario won.
    #[serde(default)]
    pub game_clear: bool,
    /// Items or boons granted this turn.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rewards: Vec<Reward>,
}

/// A demanded sanity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanityCheckDirective {
    /// Loss notation, either `"N/NdM"` or a single expression for both
    /// branches.
    pub roll: String,
    /// Why the check is happening, for the transcript.
    pub reason: String,
    /// True if the whole party rolls together.
    #[serde(default)]
    pub target_all: bool,
}

/// A demanded attribute check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCheckDirective {
    /// Attribute code, one of `STR CON POW DEX APP SIZ INT EDU`.
    pub stat: String,
    /// Target multiplier; absent means the standard times-five check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<u32>,
    /// Why the check is happening.
    pub reason: String,
}

/// A demanded plain dice roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRollDirective {
    /// Dice notation to roll, e.g. `"2d8+2"`.
    pub roll: String,
    /// Why the roll is happening.
    pub reason: String,
}

/// A narrator-granted madness recovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MadnessRecoveryDirective {
    /// Id of the investigator to recover, as the narrator knows it.
    pub character_id: String,
    /// Why recovery was granted.
    pub reason: String,
    /// Which madness kinds the recovery covers.
    #[serde(rename = "type")]
    pub scope: MadnessRecoveryScope,
}

/// An item or boon granted by the narrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    /// Name of the reward.
    pub name: String,
    /// What it does, in prose.
    pub effect: String,
}

impl NarratorDirective {
    /// Parse a raw narrator response, substituting the fallback
    /// directive when the payload is malformed or incomplete. The
    /// session keeps running either way.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| Self::fallback())
    }

    /// The fixed directive used when a narrator response cannot be
    /// understood.
    pub fn fallback() -> Self {
        Self {
            description: "The narration falters for a moment, as if the world itself lost its \
                          train of thought. The scene settles back into place."
                .to_string(),
            action_required: "Decide what you do next.".to_string(),
            sanity_check: None,
            skill_check: None,
            stat_check: None,
            dice_roll_required: None,
            madness_recovery: None,
            suggested_actions: vec![
                "Take a moment to look around.".to_string(),
                "Repeat your last action.".to_string(),
            ],
            game_over: false,
            game_clear: false,
            rewards: Vec::new(),
        }
    }
}
