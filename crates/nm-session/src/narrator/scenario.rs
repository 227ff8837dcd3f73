//! Scenario outlines and the request that produces them.

use serde::{Deserialize, Serialize};

use super::request::InvestigatorSummary;

/// The scenario outline the narrator improvises before play begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Scenario title.
    pub title: String,
    /// Player-facing synopsis.
    pub summary: String,
    /// What the party must achieve to win.
    pub clear_condition: String,
    /// What loses the scenario.
    pub failure_condition: String,
    /// The hidden truth behind the events; never shown to players.
    pub truth: String,
    /// Rough play time, in prose.
    pub estimated_play_time: String,
}

impl Scenario {
    /// Parse a raw scenario response, substituting the stock fallback
    /// scenario when the payload cannot be understood.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| Self::fallback())
    }

    /// The hardcoded scenario used when outline generation fails, so a
    /// collaborator outage never blocks starting a session.
    pub fn fallback() -> Self {
        Self {
            title: "The House on Gallows Hill".to_string(),
            summary: "An abandoned house above the town has begun showing lights at night. \
                      The last family to live there vanished forty years ago."
                .to_string(),
            clear_condition: "Discover what haunts the house and put it to rest.".to_string(),
            failure_condition: "The party flees town or loses its mind.".to_string(),
            truth: "The house remembers its dead, and it is lonely.".to_string(),
            estimated_play_time: "About an hour".to_string(),
        }
    }
}

/// Operator preferences for scenario generation. Every field is
/// optional; the narrator fills gaps however it likes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioPreferences {
    /// Desired play time, in prose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_time: Option<String>,
    /// Desired difficulty, in prose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Freeform synopsis or theme request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
}

/// The payload sent to the narrator when requesting a scenario outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRequest {
    /// Operator preferences, possibly empty.
    pub preferences: ScenarioPreferences,
    /// Summaries of the party the scenario must fit.
    pub party: Vec<InvestigatorSummary>,
}
