//! Session transcript.
//!
//! Every noteworthy event in a session is appended here in order:
//! player actions, narration, check results, sanity losses, madness
//! episodes, rewards. The transcript is in-memory only and can be
//! exported as markdown or plain text when the session ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranscriptEntry {
    /// The scenario outline was accepted and play began.
    ScenarioStart {
        /// When it happened.
        timestamp: DateTime<Utc>,
        /// Scenario title.
        title: String,
        /// Player-facing synopsis.
        summary: String,
    },
    /// A player submitted an action.
    PlayerAction {
        /// When it happened.
        timestamp: DateTime<Utc>,
        /// The action text.
        text: String,
    },
    /// The narrator described the scene.
    Narration {
        /// When it happened.
        timestamp: DateTime<Utc>,
        /// Narrative prose.
        text: String,
    },
    /// A skill, stat, sanity, or plain dice check resolved.
    CheckResult {
        /// When it happened.
        timestamp: DateTime<Utc>,
        /// One-line result summary.
        text: String,
    },
    /// An investigator lost sanity.
    SanityLoss {
        /// When it happened.
        timestamp: DateTime<Utc>,
        /// Who lost it.
        investigator: String,
        /// Points lost.
        loss: u32,
        /// Sanity after the loss.
        new_sanity: u32,
    },
    /// A madness episode began.
    MadnessOnset {
        /// When it happened.
        timestamp: DateTime<Utc>,
        /// Who it struck.
        investigator: String,
        /// Symptom description.
        description: String,
    },
    /// An investigator returned to sanity.
    MadnessRecovery {
        /// When it happened.
        timestamp: DateTime<Utc>,
        /// Who recovered.
        investigator: String,
    },
    /// The narrator granted a reward.
    Reward {
        /// When it happened.
        timestamp: DateTime<Utc>,
        /// Reward name.
        name: String,
        /// What it does.
        effect: String,
    },
    /// The session reached a terminal state.
    SessionEnd {
        /// When it happened.
        timestamp: DateTime<Utc>,
        /// True for a cleared scenario, false for game over.
        cleared: bool,
    },
}

impl TranscriptEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::ScenarioStart { timestamp, .. }
            | Self::PlayerAction { timestamp, .. }
            | Self::Narration { timestamp, .. }
            | Self::CheckResult { timestamp, .. }
            | Self::SanityLoss { timestamp, .. }
            | Self::MadnessOnset { timestamp, .. }
            | Self::MadnessRecovery { timestamp, .. }
            | Self::Reward { timestamp, .. }
            | Self::SessionEnd { timestamp, .. } => *timestamp,
        }
    }

    fn render(&self) -> String {
        match self {
            Self::ScenarioStart { title, summary, .. } => {
                format!("Scenario begins: {title}. {summary}")
            }
            Self::PlayerAction { text, .. } => format!("Player: {text}"),
            Self::Narration { text, .. } => format!("Narrator: {text}"),
            Self::CheckResult { text, .. } => format!("Check: {text}"),
            Self::SanityLoss {
                investigator,
                loss,
                new_sanity,
                ..
            } => format!("{investigator} loses {loss} sanity (now {new_sanity})"),
            Self::MadnessOnset {
                investigator,
                description,
                ..
            } => format!("{investigator} {description}"),
            Self::MadnessRecovery { investigator, .. } => {
                format!("{investigator} regains their composure")
            }
            Self::Reward { name, effect, .. } => format!("Reward: {name} ({effect})"),
            Self::SessionEnd { cleared, .. } => {
                if *cleared {
                    "The scenario is cleared.".to_string()
                } else {
                    "The session ends in defeat.".to_string()
                }
            }
        }
    }
}

/// An append-only log of session events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn append(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// All entries in order of insertion.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Number of entries recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export as a markdown document, one timestamped bullet per entry.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Session Transcript\n\n");
        for entry in &self.entries {
            out.push_str(&format!(
                "- `{}` {}\n",
                entry.timestamp().format("%Y-%m-%d %H:%M:%S"),
                entry.render()
            ));
        }
        out
    }

    /// Export as plain text, one line per entry.
    pub fn export_text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "[{}] {}",
                    entry.timestamp().format("%H:%M:%S"),
                    entry.render()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
