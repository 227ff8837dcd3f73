//! Sanity loss and the madness state machine.
//!
//! Losing sanity can push an investigator into a bout of madness: a loss
//! of five or more points in one blow causes temporary madness for 1d6
//! rounds, and a loss of a fifth of maximum sanity or more causes
//! indefinite madness. Hitting zero sanity ends the session outright.
//! Madness never blocks play mechanically; it is narrative context the
//! orchestrator forwards to the narrator.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use nm_character::{Investigator, InvestigatorId, MadnessKind, MadnessState};
use nm_mechanics::{Notation, roll_d100, roll_range};

/// A single loss of this many points or more triggers temporary madness.
pub const TEMPORARY_MADNESS_LOSS: u32 = 5;

/// Symptom table for temporary madness bouts.
const TEMPORARY_SYMPTOMS: &[&str] = &[
    "collapses into a screaming fit",
    "loses all memory of the last hour",
    "lashes out violently at the nearest person",
    "is struck by psychosomatic blindness",
    "becomes convinced everyone present is an impostor",
    "faints dead away",
    "trembles and weeps uncontrollably",
    "bolts for the nearest hiding place",
    "babbles in a language no one recognizes",
    "fixates on a meaningless object, refusing to let go",
];

/// Symptom table for indefinite madness afflictions.
const INDEFINITE_SYMPTOMS: &[&str] = &[
    "develops a creeping paranoia that never quite recedes",
    "cannot abide darkness in any form",
    "performs elaborate rituals to keep the world in order",
    "hears whispering just below the edge of comprehension",
    "loses whole stretches of their past",
    "speaks of their own death as something already scheduled",
    "hungers for forbidden knowledge whatever the cost",
    "is wracked by night terrors and cannot sleep alone",
    "turns violent under the slightest stress",
    "withdraws into blank catatonia when pressed",
];

/// The loss an investigator takes is set before the check resolves, as a
/// success/failure pair of notations like `"1/1d6"`. A single notation
/// with no slash applies to both branches. Either side may be a bare
/// integer (a fixed loss) or a dice expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LossNotation {
    /// Loss on a successful sanity check.
    pub success: Notation,
    /// Loss on a failed sanity check.
    pub failure: Notation,
}

impl LossNotation {
    /// Parse a loss pair. Unrecognized sides evaluate to a fixed 0, so a
    /// garbled narrator string costs no sanity rather than erroring.
    pub fn parse(input: &str) -> Self {
        match input.split_once('/') {
            Some((success, failure)) => Self {
                success: Notation::parse(success).unwrap_or(Notation::Fixed(0)),
                failure: Notation::parse(failure).unwrap_or(Notation::Fixed(0)),
            },
            None => {
                let both = Notation::parse(input).unwrap_or(Notation::Fixed(0));
                Self {
                    success: both,
                    failure: both,
                }
            }
        }
    }

    /// Evaluate one branch of the pair. Fixed sides resolve immediately;
    /// dice sides are rolled. Negative results are floored at zero.
    pub fn evaluate(&self, success: bool, rng: &mut StdRng) -> u32 {
        let notation = if success { self.success } else { self.failure };
        notation.roll(rng).max(0) as u32
    }
}

impl std::fmt::Display for LossNotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.success, self.failure)
    }
}

/// What applying a sanity loss did to one investigator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanityOutcome {
    /// Points actually lost.
    pub loss: u32,
    /// Sanity after the loss.
    pub new_sanity: u32,
    /// True if sanity hit zero: the session is over.
    pub game_over: bool,
    /// The madness episode that began, if one did.
    pub onset: Option<MadnessState>,
}

/// Threshold for indefinite madness: a fifth of maximum sanity, rounded up.
pub fn indefinite_threshold(sanity_max: u32) -> u32 {
    sanity_max.div_ceil(5)
}

/// Apply a sanity loss and evaluate madness onset.
///
/// Depletion to zero is terminal and skips onset entirely. Otherwise a
/// new episode overwrites any existing madness state; a loss below the
/// temporary threshold leaves the existing state untouched.
pub fn apply_sanity_loss(
    investigator: &mut Investigator,
    loss: u32,
    rng: &mut StdRng,
) -> SanityOutcome {
    let new_sanity = investigator.san.current.saturating_sub(loss);
    investigator.san.set_current(new_sanity);

    if investigator.san.is_depleted() {
        return SanityOutcome {
            loss,
            new_sanity: 0,
            game_over: true,
            onset: None,
        };
    }

    let onset = if loss >= indefinite_threshold(investigator.san.max) && loss > 0 {
        let description = pick(INDEFINITE_SYMPTOMS, rng);
        Some(MadnessState::Indefinite { description })
    } else if loss >= TEMPORARY_MADNESS_LOSS {
        let description = pick(TEMPORARY_SYMPTOMS, rng);
        let remaining_rounds = roll_range(1, 6, rng);
        Some(MadnessState::Temporary {
            description,
            remaining_rounds,
        })
    } else {
        None
    };

    if let Some(state) = &onset {
        investigator.madness = state.clone();
    }

    SanityOutcome {
        loss,
        new_sanity,
        game_over: false,
        onset,
    }
}

fn pick(table: &[&str], rng: &mut StdRng) -> String {
    table[rng.random_range(0..table.len())].to_string()
}

/// Result of one duration tick on an investigator's madness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MadnessTick {
    /// Not in a temporary bout; nothing to tick.
    NotMad,
    /// Still in the bout.
    Ongoing {
        /// Rounds left.
        remaining_rounds: u32,
    },
    /// The bout just ended; carries the symptom that passed.
    Recovered {
        /// Symptom description of the ended bout.
        description: String,
    },
}

/// Tick a temporary madness bout down by one round. Invoked once per
/// player or system action; at zero the investigator returns to sanity.
pub fn decrement_madness_duration(investigator: &mut Investigator) -> MadnessTick {
    let MadnessState::Temporary {
        description,
        remaining_rounds,
    } = &mut investigator.madness
    else {
        return MadnessTick::NotMad;
    };

    *remaining_rounds = remaining_rounds.saturating_sub(1);
    if *remaining_rounds == 0 {
        let description = description.clone();
        investigator.madness = MadnessState::Sane;
        MadnessTick::Recovered { description }
    } else {
        MadnessTick::Ongoing {
            remaining_rounds: *remaining_rounds,
        }
    }
}

/// Which madness kinds a narrator-driven recovery applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MadnessRecoveryScope {
    /// Only a temporary bout.
    Temporary,
    /// Only an indefinite affliction.
    Indefinite,
    /// Either kind.
    Both,
}

impl MadnessRecoveryScope {
    fn matches(self, kind: MadnessKind) -> bool {
        match self {
            Self::Temporary => kind == MadnessKind::Temporary,
            Self::Indefinite => kind == MadnessKind::Indefinite,
            Self::Both => true,
        }
    }
}

/// Result of a narrator-driven recovery request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryResult {
    /// The investigator returned to sanity.
    Recovered {
        /// Kind of the episode that ended.
        kind: MadnessKind,
        /// Symptom description of the ended episode.
        description: String,
    },
    /// The investigator's state did not match the request; nothing changed.
    NotApplicable,
}

/// Clear an investigator's madness if its kind matches the requested
/// scope. A mismatch is a warning-level no-op, never an error: the
/// narrator may be out of date about who is mad.
pub fn recover_from_madness(
    investigator: &mut Investigator,
    scope: MadnessRecoveryScope,
) -> RecoveryResult {
    let Some(kind) = investigator.madness.kind() else {
        return RecoveryResult::NotApplicable;
    };
    if !scope.matches(kind) {
        return RecoveryResult::NotApplicable;
    }
    let description = investigator
        .madness
        .description()
        .unwrap_or_default()
        .to_string();
    investigator.madness = MadnessState::Sane;
    RecoveryResult::Recovered { kind, description }
}

/// The outcome of a sanity check for one investigator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanityCheckOutcome {
    /// Who took the check.
    pub id: InvestigatorId,
    /// Display name, for result messages.
    pub name: String,
    /// True if the shared roll was at or below this investigator's
    /// current sanity.
    pub success: bool,
    /// What the applied loss did.
    pub outcome: SanityOutcome,
}

/// The outcome of one sanity check applied to one or more investigators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanityCheck {
    /// The single d100 roll shared by every participant.
    pub roll: u32,
    /// The loss applied to the success branch, evaluated once.
    pub success_loss: u32,
    /// The loss applied to the failure branch, evaluated once.
    pub failure_loss: u32,
    /// Per-investigator outcomes in roster order.
    pub outcomes: Vec<SanityCheckOutcome>,
}

impl SanityCheck {
    /// True if any participant hit zero sanity.
    pub fn game_over(&self) -> bool {
        self.outcomes.iter().any(|o| o.outcome.game_over)
    }
}

/// Run a sanity check over a group of investigators.
///
/// One d100 roll is shared by everyone; each investigator succeeds iff
/// the roll is at or below their own current sanity (plain roll-under,
/// independent of the skill-check tier ladder). Each branch's loss
/// notation is evaluated exactly once and applied uniformly to every
/// investigator in that branch.
pub fn sanity_check(
    party: &mut [Investigator],
    loss: &LossNotation,
    rng: &mut StdRng,
) -> SanityCheck {
    let roll = roll_d100(rng);
    let success_loss = loss.evaluate(true, rng);
    let failure_loss = loss.evaluate(false, rng);

    let outcomes = party
        .iter_mut()
        .map(|investigator| {
            let success = roll <= investigator.san.current;
            let applied = if success { success_loss } else { failure_loss };
            SanityCheckOutcome {
                id: investigator.id,
                name: investigator.name.clone(),
                success,
                outcome: apply_sanity_loss(investigator, applied, rng),
            }
        })
        .collect();

    SanityCheck {
        roll,
        success_loss,
        failure_loss,
        outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    use nm_character::Attribute;

    fn fresh(pow: i64) -> Investigator {
        let mut inv = Investigator::new("Test");
        inv.set_attribute(Attribute::Pow, pow);
        inv
    }

    #[test]
    fn small_loss_no_onset() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut inv = fresh(10); // SAN 50/50
        let outcome = apply_sanity_loss(&mut inv, 4, &mut rng);
        assert_eq!(outcome.new_sanity, 46);
        assert!(outcome.onset.is_none());
        assert!(inv.madness.is_sane());
    }

    #[test]
    fn loss_of_five_causes_temporary_madness() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut inv = fresh(10);
        let outcome = apply_sanity_loss(&mut inv, 6, &mut rng);
        assert_eq!(outcome.new_sanity, 44);
        match &outcome.onset {
            Some(MadnessState::Temporary {
                remaining_rounds, ..
            }) => {
                assert!((1..=6).contains(remaining_rounds));
            }
            other => panic!("expected temporary madness, got {other:?}"),
        }
        assert_eq!(inv.madness.kind(), Some(MadnessKind::Temporary));
    }

    #[test]
    fn large_loss_causes_indefinite_madness() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut inv = fresh(10); // SAN max 50, threshold 10
        let outcome = apply_sanity_loss(&mut inv, 20, &mut rng);
        assert!(matches!(
            outcome.onset,
            Some(MadnessState::Indefinite { .. })
        ));
        assert_eq!(inv.madness.kind(), Some(MadnessKind::Indefinite));
    }

    #[test]
    fn new_onset_overwrites_existing_state() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut inv = fresh(10);
        apply_sanity_loss(&mut inv, 6, &mut rng);
        assert_eq!(inv.madness.kind(), Some(MadnessKind::Temporary));
        apply_sanity_loss(&mut inv, 15, &mut rng);
        assert_eq!(inv.madness.kind(), Some(MadnessKind::Indefinite));
    }

    #[test]
    fn small_loss_leaves_existing_madness_alone() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut inv = fresh(10);
        apply_sanity_loss(&mut inv, 6, &mut rng);
        let before = inv.madness.clone();
        let outcome = apply_sanity_loss(&mut inv, 2, &mut rng);
        assert!(outcome.onset.is_none());
        assert_eq!(inv.madness, before);
    }

    #[test]
    fn depletion_is_terminal_and_skips_onset() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut inv = fresh(10);
        let outcome = apply_sanity_loss(&mut inv, 60, &mut rng);
        assert!(outcome.game_over);
        assert_eq!(outcome.new_sanity, 0);
        assert!(outcome.onset.is_none());
    }

    #[test]
    fn threshold_rounds_up() {
        assert_eq!(indefinite_threshold(50), 10);
        assert_eq!(indefinite_threshold(51), 11);
        assert_eq!(indefinite_threshold(1), 1);
    }

    #[test]
    fn madness_ticks_down_to_recovery() {
        let mut inv = fresh(10);
        inv.madness = MadnessState::Temporary {
            description: "trembling".to_string(),
            remaining_rounds: 2,
        };
        assert_eq!(
            decrement_madness_duration(&mut inv),
            MadnessTick::Ongoing {
                remaining_rounds: 1
            }
        );
        assert_eq!(
            decrement_madness_duration(&mut inv),
            MadnessTick::Recovered {
                description: "trembling".to_string()
            }
        );
        assert!(inv.madness.is_sane());
        assert_eq!(decrement_madness_duration(&mut inv), MadnessTick::NotMad);
    }

    #[test]
    fn indefinite_madness_does_not_tick() {
        let mut inv = fresh(10);
        inv.madness = MadnessState::Indefinite {
            description: "paranoia".to_string(),
        };
        assert_eq!(decrement_madness_duration(&mut inv), MadnessTick::NotMad);
        assert_eq!(inv.madness.kind(), Some(MadnessKind::Indefinite));
    }

    #[test]
    fn recovery_scope_matching() {
        let mut inv = fresh(10);
        inv.madness = MadnessState::Temporary {
            description: "weeping".to_string(),
            remaining_rounds: 3,
        };
        // Wrong kind: no-op.
        assert_eq!(
            recover_from_madness(&mut inv, MadnessRecoveryScope::Indefinite),
            RecoveryResult::NotApplicable
        );
        assert!(!inv.madness.is_sane());
        // Both always matches.
        assert_eq!(
            recover_from_madness(&mut inv, MadnessRecoveryScope::Both),
            RecoveryResult::Recovered {
                kind: MadnessKind::Temporary,
                description: "weeping".to_string()
            }
        );
        assert!(inv.madness.is_sane());
        // Sane: no-op.
        assert_eq!(
            recover_from_madness(&mut inv, MadnessRecoveryScope::Both),
            RecoveryResult::NotApplicable
        );
    }

    #[test]
    fn loss_notation_parsing() {
        let pair = LossNotation::parse("1/1d6");
        assert_eq!(pair.success, Notation::Fixed(1));
        assert!(!pair.failure.is_fixed());

        let single = LossNotation::parse("1d4");
        assert_eq!(single.success, single.failure);

        let garbled = LossNotation::parse("???/1d6");
        assert_eq!(garbled.success, Notation::Fixed(0));
    }

    #[test]
    fn loss_notation_display() {
        assert_eq!(LossNotation::parse("1/1d6").to_string(), "1/1d6");
        assert_eq!(LossNotation::parse("0/1d4+1").to_string(), "0/1d4+1");
    }

    #[test]
    fn party_check_shares_one_roll_and_branch_losses() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut party = vec![fresh(18), fresh(18), fresh(18)];
        // Spread current sanity so branches differ.
        party[0].san.set_current(90);
        party[1].san.set_current(5);
        party[2].san.set_current(90);

        let result = sanity_check(&mut party, &LossNotation::parse("1/1d6"), &mut rng);
        assert_eq!(result.outcomes.len(), 3);
        assert_eq!(result.success_loss, 1);
        assert!((1..=6).contains(&result.failure_loss));

        for outcome in &result.outcomes {
            let branch_loss = if outcome.success {
                result.success_loss
            } else {
                result.failure_loss
            };
            assert_eq!(outcome.outcome.loss, branch_loss);
        }
        // Same-branch members lose identical amounts.
        assert_eq!(party[0].san.current, party[2].san.current);
    }

    #[test]
    fn party_check_success_is_roll_under_current_sanity() {
        let mut rng = StdRng::seed_from_u64(100);
        let mut party = vec![fresh(18)];
        party[0].san.set_current(90);
        let high = sanity_check(&mut party, &LossNotation::parse("0/0"), &mut rng);
        assert_eq!(high.outcomes[0].success, high.roll <= 90);
    }

    #[test]
    fn party_check_reports_game_over() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut party = vec![fresh(10)];
        party[0].san.set_current(1);
        let result = sanity_check(&mut party, &LossNotation::parse("99/99"), &mut rng);
        assert!(result.game_over());
    }
}
