//! The turn orchestrator.
//!
//! One [`GameSession`] owns the roster, the scenario, the transcript,
//! and a seeded random source, and drives the single-flight turn cycle:
//! the players act, the narrator responds with a directive, the session
//! resolves whatever check the directive demands, and the result goes
//! back to the narrator. Exactly one interaction is pending at a time;
//! calls outside the current phase return an error instead of mutating
//! anything.

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;

use nm_character::{Attribute, Investigator, InvestigatorId};
use nm_mechanics::{DEFAULT_STAT_MULTIPLIER, Notation, resolve, roll_d100, stat_check_target};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::narrator::{
    CheckReport, InvestigatorSummary, NarratorDirective, NarratorRequest, Scenario,
    ScenarioPreferences, ScenarioRequest,
};
use crate::sanity::{
    self, LossNotation, MadnessRecoveryScope, MadnessTick, RecoveryResult,
    decrement_madness_duration, recover_from_madness,
};
use crate::transcript::{Transcript, TranscriptEntry};

/// Where the session currently stands in the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Assembling the roster; play has not begun.
    Setup,
    /// Waiting for the players to act.
    AwaitingPlayerInput,
    /// A request is out to the narrator.
    AwaitingNarrator,
    /// The narrator demanded a check; waiting for a target selection.
    AwaitingCheckSelection,
    /// Target chosen; waiting for the dice to be rolled.
    AwaitingDiceRoll,
    /// A check failed; waiting for the push-roll decision.
    AwaitingPushDecision,
    /// Terminal: the scenario was lost.
    GameOver,
    /// Terminal: the scenario was cleared.
    GameClear,
}

impl Phase {
    /// True once the session has reached a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::GameClear)
    }
}

/// The check a directive demanded, waiting to be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingCheck {
    /// A sanity check with its conditional loss pair.
    Sanity {
        /// Loss applied on success and failure.
        loss: LossNotation,
        /// Why the check is happening.
        reason: String,
        /// True if the whole party may roll together.
        target_all: bool,
    },
    /// A skill check by skill name.
    Skill {
        /// Skill to check.
        name: String,
    },
    /// An attribute check.
    Stat {
        /// Attribute to check.
        attribute: Attribute,
        /// Target multiplier.
        multiplier: u32,
        /// Why the check is happening.
        reason: String,
    },
    /// A plain dice roll with no pass/fail target.
    Dice {
        /// What to roll.
        notation: Notation,
        /// Why the roll is happening.
        reason: String,
    },
}

/// Who takes a pending check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckTarget {
    /// One investigator.
    Investigator(InvestigatorId),
    /// The whole party; only valid for party-wide sanity checks.
    All,
}

/// What the orchestrator surfaces after digesting a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Terminal defeat declared by the narrator.
    GameOver,
    /// Terminal victory declared by the narrator.
    GameClear,
    /// A check must be taken; select a target next.
    CheckOffered {
        /// The demanded check.
        check: PendingCheck,
    },
    /// Nothing pending; the players act freely.
    AwaitingInput {
        /// Suggestions offered by the narrator, possibly empty.
        suggested_actions: Vec<String>,
    },
}

/// What rolling the pending check produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollOutcome {
    /// The result is final; send this to the narrator.
    Resolved(NarratorRequest),
    /// The check failed and may be pushed; decide before reporting.
    PushOffered(CheckReport),
    /// An investigator hit zero sanity; the session is over.
    GameOver {
        /// Summary of the fatal check, for the end screen.
        message: String,
    },
}

#[derive(Debug, Clone)]
struct PendingPush {
    target: usize,
    check_name: String,
    target_value: u32,
    report: CheckReport,
}

/// One in-memory game session. All state lives here; nothing is shared
/// across sessions and nothing persists.
#[derive(Debug)]
pub struct GameSession {
    rng: StdRng,
    roster: Vec<Investigator>,
    scenario: Option<Scenario>,
    phase: Phase,
    pending_check: Option<PendingCheck>,
    pending_target: Option<CheckTarget>,
    pending_push: Option<PendingPush>,
    transcript: Transcript,
}

impl GameSession {
    /// Create a session in the setup phase.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            roster: Vec::new(),
            scenario: None,
            phase: Phase::Setup,
            pending_check: None,
            pending_target: None,
            pending_push: None,
            transcript: Transcript::new(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The party roster.
    pub fn roster(&self) -> &[Investigator] {
        &self.roster
    }

    /// The active scenario, once play has begun.
    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }

    /// The session transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Add an investigator. Only allowed before play begins.
    pub fn add_investigator(&mut self, investigator: Investigator) -> SessionResult<()> {
        if self.phase != Phase::Setup {
            return Err(SessionError::RosterLocked);
        }
        self.roster.push(investigator);
        Ok(())
    }

    /// Remove an investigator by id. Only allowed before play begins.
    pub fn remove_investigator(&mut self, id: InvestigatorId) -> SessionResult<Investigator> {
        if self.phase != Phase::Setup {
            return Err(SessionError::RosterLocked);
        }
        let index = self
            .roster
            .iter()
            .position(|inv| inv.id == id)
            .ok_or_else(|| SessionError::UnknownInvestigator(id.to_string()))?;
        Ok(self.roster.remove(index))
    }

    /// Build the scenario-outline request for the current party.
    pub fn scenario_request(&self, preferences: ScenarioPreferences) -> ScenarioRequest {
        ScenarioRequest {
            preferences,
            party: self.party_summaries(),
        }
    }

    /// Accept a scenario outline and begin play. Requires at least one
    /// investigator; the roster is locked from here on.
    pub fn begin(&mut self, scenario: Scenario) -> SessionResult<()> {
        if self.phase != Phase::Setup {
            return Err(SessionError::RosterLocked);
        }
        if self.roster.is_empty() {
            return Err(SessionError::EmptyRoster);
        }
        self.transcript.append(TranscriptEntry::ScenarioStart {
            timestamp: Utc::now(),
            title: scenario.title.clone(),
            summary: scenario.summary.clone(),
        });
        self.scenario = Some(scenario);
        self.phase = Phase::AwaitingPlayerInput;
        Ok(())
    }

    /// Submit a player action, producing the request to send to the
    /// narrator. Blocks until the directive comes back via
    /// [`GameSession::receive_directive`].
    pub fn submit_action(&mut self, text: impl Into<String>) -> SessionResult<NarratorRequest> {
        match self.phase {
            Phase::AwaitingPlayerInput => {}
            Phase::AwaitingNarrator => return Err(SessionError::NarratorPending),
            Phase::GameOver | Phase::GameClear => return Err(SessionError::SessionEnded),
            _ => return Err(SessionError::NotAwaitingInput),
        }
        let text = text.into();
        self.transcript.append(TranscriptEntry::PlayerAction {
            timestamp: Utc::now(),
            text: text.clone(),
        });
        self.phase = Phase::AwaitingNarrator;
        Ok(NarratorRequest {
            instruction: text,
            party: self.party_summaries(),
            check_outcome: None,
        })
    }

    /// Digest the narrator's directive and decide the next interaction.
    ///
    /// Recoveries and rewards apply unconditionally; then exactly one
    /// pending interaction is chosen, in priority order: terminal
    /// declarations, then a demanded check (sanity over skill over stat
    /// over plain dice), then free input.
    pub fn receive_directive(&mut self, directive: NarratorDirective) -> SessionResult<TurnOutcome> {
        if self.phase != Phase::AwaitingNarrator {
            return Err(SessionError::NoDirectiveExpected);
        }

        self.transcript.append(TranscriptEntry::Narration {
            timestamp: Utc::now(),
            text: directive.description.clone(),
        });

        if let Some(recovery) = &directive.madness_recovery {
            self.apply_recovery(&recovery.character_id, recovery.scope);
        }
        for reward in &directive.rewards {
            self.transcript.append(TranscriptEntry::Reward {
                timestamp: Utc::now(),
                name: reward.name.clone(),
                effect: reward.effect.clone(),
            });
        }

        if directive.game_over {
            self.end(false);
            return Ok(TurnOutcome::GameOver);
        }
        if directive.game_clear {
            self.end(true);
            return Ok(TurnOutcome::GameClear);
        }

        let check = if let Some(sanity) = directive.sanity_check {
            Some(PendingCheck::Sanity {
                loss: LossNotation::parse(&sanity.roll),
                reason: sanity.reason,
                target_all: sanity.target_all,
            })
        } else if let Some(name) = directive.skill_check {
            Some(PendingCheck::Skill { name })
        } else if let Some(stat) = directive.stat_check {
            // An unknown attribute code is a contract violation; drop
            // the check rather than guessing.
            Attribute::parse(&stat.stat).map(|attribute| PendingCheck::Stat {
                attribute,
                multiplier: stat.multiplier.unwrap_or(DEFAULT_STAT_MULTIPLIER),
                reason: stat.reason,
            })
        } else if let Some(dice) = directive.dice_roll_required {
            Some(PendingCheck::Dice {
                notation: Notation::parse(&dice.roll).unwrap_or(Notation::Fixed(0)),
                reason: dice.reason,
            })
        } else {
            None
        };

        match check {
            Some(check) => {
                self.pending_check = Some(check.clone());
                self.phase = Phase::AwaitingCheckSelection;
                Ok(TurnOutcome::CheckOffered { check })
            }
            None => {
                self.phase = Phase::AwaitingPlayerInput;
                Ok(TurnOutcome::AwaitingInput {
                    suggested_actions: directive.suggested_actions,
                })
            }
        }
    }

    /// Choose who takes the pending check. `All` is only valid for a
    /// sanity check flagged party-wide.
    pub fn select_check_target(&mut self, target: CheckTarget) -> SessionResult<()> {
        if self.phase != Phase::AwaitingCheckSelection {
            return Err(SessionError::NoCheckPending);
        }
        match target {
            CheckTarget::All => {
                let party_wide = matches!(
                    self.pending_check,
                    Some(PendingCheck::Sanity {
                        target_all: true,
                        ..
                    })
                );
                if !party_wide {
                    return Err(SessionError::PartyTargetNotAllowed);
                }
            }
            CheckTarget::Investigator(id) => {
                if !self.roster.iter().any(|inv| inv.id == id) {
                    return Err(SessionError::UnknownInvestigator(id.to_string()));
                }
            }
        }
        self.pending_target = Some(target);
        self.phase = Phase::AwaitingDiceRoll;
        Ok(())
    }

    /// Roll the pending check and resolve it.
    ///
    /// Rolling is an action: every temporary madness bout in the roster
    /// ticks down once first. A failed skill or stat check is offered
    /// for a push instead of being reported immediately; sanity checks
    /// and plain rolls are always final.
    pub fn roll_pending(&mut self) -> SessionResult<RollOutcome> {
        if self.phase != Phase::AwaitingDiceRoll {
            return Err(SessionError::NoRollPending);
        }
        let check = self
            .pending_check
            .take()
            .ok_or(SessionError::NoRollPending)?;
        let target = self
            .pending_target
            .take()
            .ok_or(SessionError::NoRollPending)?;

        self.tick_madness();

        match check {
            PendingCheck::Sanity {
                loss,
                reason,
                target_all: _,
            } => self.resolve_sanity(&loss, &reason, target),
            PendingCheck::Skill { name } => {
                let index = self.target_index(target)?;
                let target_value = self.roster[index].skill(&name);
                Ok(self.resolve_percentile(index, name, target_value))
            }
            PendingCheck::Stat {
                attribute,
                multiplier,
                reason: _,
            } => {
                let index = self.target_index(target)?;
                let target_value =
                    stat_check_target(self.roster[index].stats.get(attribute), multiplier);
                let name = format!("{attribute} x{multiplier}");
                Ok(self.resolve_percentile(index, name, target_value))
            }
            PendingCheck::Dice { notation, reason } => {
                let index = self.target_index(target)?;
                let value = notation.roll(&mut self.rng);
                let message = format!(
                    "{} rolls {} for {}: {}",
                    self.roster[index].name, notation, reason, value
                );
                self.transcript.append(TranscriptEntry::CheckResult {
                    timestamp: Utc::now(),
                    text: message.clone(),
                });
                self.phase = Phase::AwaitingNarrator;
                Ok(RollOutcome::Resolved(NarratorRequest {
                    instruction: message,
                    party: self.party_summaries(),
                    check_outcome: None,
                }))
            }
        }
    }

    /// Decline the offered push. The original failure is reported to
    /// the narrator unchanged.
    pub fn decline_push(&mut self) -> SessionResult<NarratorRequest> {
        if self.phase != Phase::AwaitingPushDecision {
            return Err(SessionError::NoPushPending);
        }
        let push = self.pending_push.take().ok_or(SessionError::NoPushPending)?;
        self.phase = Phase::AwaitingNarrator;
        Ok(NarratorRequest {
            instruction: push.report.message(),
            party: self.party_summaries(),
            check_outcome: Some(push.report),
        })
    }

    /// Accept the offered push: one re-roll at the same target, whose
    /// outcome is final either way. No third attempt is ever offered.
    pub fn accept_push(&mut self) -> SessionResult<NarratorRequest> {
        if self.phase != Phase::AwaitingPushDecision {
            return Err(SessionError::NoPushPending);
        }
        let push = self.pending_push.take().ok_or(SessionError::NoPushPending)?;

        // The re-roll is a fresh dice acquisition.
        self.tick_madness();

        let roll = roll_d100(&mut self.rng);
        let tier = resolve(roll, push.target_value);
        let report = CheckReport {
            investigator: self.roster[push.target].name.clone(),
            check: push.check_name,
            target: push.target_value,
            roll,
            tier,
            pushed: true,
        };
        self.transcript.append(TranscriptEntry::CheckResult {
            timestamp: Utc::now(),
            text: report.message(),
        });
        self.phase = Phase::AwaitingNarrator;
        Ok(NarratorRequest {
            instruction: report.message(),
            party: self.party_summaries(),
            check_outcome: Some(report),
        })
    }

    /// Summaries of the whole roster, in order.
    pub fn party_summaries(&self) -> Vec<InvestigatorSummary> {
        self.roster.iter().map(InvestigatorSummary::of).collect()
    }

    fn resolve_percentile(
        &mut self,
        index: usize,
        check_name: String,
        target_value: u32,
    ) -> RollOutcome {
        let roll = roll_d100(&mut self.rng);
        let tier = resolve(roll, target_value);
        let report = CheckReport {
            investigator: self.roster[index].name.clone(),
            check: check_name.clone(),
            target: target_value,
            roll,
            tier,
            pushed: false,
        };
        self.transcript.append(TranscriptEntry::CheckResult {
            timestamp: Utc::now(),
            text: report.message(),
        });

        if tier.is_success() {
            self.phase = Phase::AwaitingNarrator;
            RollOutcome::Resolved(NarratorRequest {
                instruction: report.message(),
                party: self.party_summaries(),
                check_outcome: Some(report),
            })
        } else {
            self.pending_push = Some(PendingPush {
                target: index,
                check_name,
                target_value,
                report: report.clone(),
            });
            self.phase = Phase::AwaitingPushDecision;
            RollOutcome::PushOffered(report)
        }
    }

    fn resolve_sanity(
        &mut self,
        loss: &LossNotation,
        reason: &str,
        target: CheckTarget,
    ) -> SessionResult<RollOutcome> {
        let result = match target {
            CheckTarget::All => sanity::sanity_check(&mut self.roster, loss, &mut self.rng),
            CheckTarget::Investigator(id) => {
                let index = self
                    .roster
                    .iter()
                    .position(|inv| inv.id == id)
                    .ok_or_else(|| SessionError::UnknownInvestigator(id.to_string()))?;
                sanity::sanity_check(&mut self.roster[index..=index], loss, &mut self.rng)
            }
        };

        let mut lines = vec![format!("Sanity check ({reason}), roll {}:", result.roll)];
        for outcome in &result.outcomes {
            let verdict = if outcome.success { "succeeds" } else { "fails" };
            lines.push(format!(
                "{} {verdict}, losing {} (now {})",
                outcome.name, outcome.outcome.loss, outcome.outcome.new_sanity
            ));
            self.transcript.append(TranscriptEntry::SanityLoss {
                timestamp: Utc::now(),
                investigator: outcome.name.clone(),
                loss: outcome.outcome.loss,
                new_sanity: outcome.outcome.new_sanity,
            });
            if let Some(onset) = &outcome.outcome.onset {
                if let Some(description) = onset.description() {
                    self.transcript.append(TranscriptEntry::MadnessOnset {
                        timestamp: Utc::now(),
                        investigator: outcome.name.clone(),
                        description: description.to_string(),
                    });
                }
            }
        }
        let message = lines.join(" ");
        self.transcript.append(TranscriptEntry::CheckResult {
            timestamp: Utc::now(),
            text: message.clone(),
        });

        if result.game_over() {
            self.end(false);
            return Ok(RollOutcome::GameOver { message });
        }

        self.phase = Phase::AwaitingNarrator;
        Ok(RollOutcome::Resolved(NarratorRequest {
            instruction: message,
            party: self.party_summaries(),
            check_outcome: None,
        }))
    }

    fn target_index(&self, target: CheckTarget) -> SessionResult<usize> {
        match target {
            CheckTarget::Investigator(id) => self
                .roster
                .iter()
                .position(|inv| inv.id == id)
                .ok_or_else(|| SessionError::UnknownInvestigator(id.to_string())),
            CheckTarget::All => Err(SessionError::PartyTargetNotAllowed),
        }
    }

    fn apply_recovery(&mut self, character_id: &str, scope: MadnessRecoveryScope) {
        // The narrator may name a character that does not exist or is
        // not mad; both are silent no-ops.
        let Some(investigator) = self
            .roster
            .iter_mut()
            .find(|inv| inv.id.to_string() == character_id)
        else {
            return;
        };
        if let RecoveryResult::Recovered { .. } = recover_from_madness(investigator, scope) {
            let name = investigator.name.clone();
            self.transcript.append(TranscriptEntry::MadnessRecovery {
                timestamp: Utc::now(),
                investigator: name,
            });
        }
    }

    fn tick_madness(&mut self) {
        let mut recovered = Vec::new();
        for investigator in &mut self.roster {
            if let MadnessTick::Recovered { .. } = decrement_madness_duration(investigator) {
                recovered.push(investigator.name.clone());
            }
        }
        for name in recovered {
            self.transcript.append(TranscriptEntry::MadnessRecovery {
                timestamp: Utc::now(),
                investigator: name,
            });
        }
    }

    fn end(&mut self, cleared: bool) {
        self.transcript.append(TranscriptEntry::SessionEnd {
            timestamp: Utc::now(),
            cleared,
        });
        self.phase = if cleared {
            Phase::GameClear
        } else {
            Phase::GameOver
        };
        self.pending_check = None;
        self.pending_target = None;
        self.pending_push = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nm_character::MadnessState;
    use nm_mechanics::SuccessTier;

    use crate::narrator::{SanityCheckDirective, StatCheckDirective};

    fn directive(description: &str) -> NarratorDirective {
        NarratorDirective {
            description: description.to_string(),
            action_required: "Act.".to_string(),
            ..NarratorDirective::fallback()
        }
    }

    fn plain_directive(description: &str) -> NarratorDirective {
        let mut d = directive(description);
        d.suggested_actions = Vec::new();
        d
    }

    fn started_session(party_size: usize) -> GameSession {
        let mut session = GameSession::new(SessionConfig::default());
        for i in 0..party_size {
            session
                .add_investigator(Investigator::new(format!("Investigator {i}")))
                .unwrap();
        }
        session.begin(Scenario::fallback()).unwrap();
        session
    }

    fn offer_skill_check(session: &mut GameSession, skill: &str) {
        session.submit_action("We search the room.").unwrap();
        let mut d = plain_directive("Something glints in the dust.");
        d.skill_check = Some(skill.to_string());
        let outcome = session.receive_directive(d).unwrap();
        assert!(matches!(
            outcome,
            TurnOutcome::CheckOffered {
                check: PendingCheck::Skill { .. }
            }
        ));
        let id = session.roster()[0].id;
        session
            .select_check_target(CheckTarget::Investigator(id))
            .unwrap();
    }

    #[test]
    fn cannot_begin_with_empty_roster() {
        let mut session = GameSession::new(SessionConfig::default());
        assert!(matches!(
            session.begin(Scenario::fallback()),
            Err(SessionError::EmptyRoster)
        ));
    }

    #[test]
    fn roster_locks_after_begin() {
        let mut session = started_session(1);
        assert!(matches!(
            session.add_investigator(Investigator::new("Latecomer")),
            Err(SessionError::RosterLocked)
        ));
        let id = session.roster()[0].id;
        assert!(matches!(
            session.remove_investigator(id),
            Err(SessionError::RosterLocked)
        ));
    }

    #[test]
    fn action_cycle_free_input() {
        let mut session = started_session(1);
        let request = session.submit_action("We knock on the door.").unwrap();
        assert_eq!(request.instruction, "We knock on the door.");
        assert_eq!(request.party.len(), 1);
        assert_eq!(session.phase(), Phase::AwaitingNarrator);

        // A second action cannot be submitted while the narrator thinks.
        assert!(matches!(
            session.submit_action("Again!"),
            Err(SessionError::NarratorPending)
        ));

        let outcome = session
            .receive_directive(plain_directive("No one answers."))
            .unwrap();
        assert_eq!(
            outcome,
            TurnOutcome::AwaitingInput {
                suggested_actions: Vec::new()
            }
        );
        assert_eq!(session.phase(), Phase::AwaitingPlayerInput);
    }

    #[test]
    fn directive_out_of_phase_is_rejected() {
        let mut session = started_session(1);
        assert!(matches!(
            session.receive_directive(plain_directive("Uninvited.")),
            Err(SessionError::NoDirectiveExpected)
        ));
    }

    #[test]
    fn terminal_declarations_end_the_session() {
        let mut session = started_session(1);
        session.submit_action("We give up.").unwrap();
        let mut d = plain_directive("Darkness takes the town.");
        d.game_over = true;
        assert_eq!(session.receive_directive(d).unwrap(), TurnOutcome::GameOver);
        assert_eq!(session.phase(), Phase::GameOver);
        assert!(matches!(
            session.submit_action("One more thing."),
            Err(SessionError::SessionEnded)
        ));
    }

    #[test]
    fn game_over_outranks_offered_checks() {
        let mut session = started_session(1);
        session.submit_action("We read the final page.").unwrap();
        let mut d = plain_directive("The book closes itself.");
        d.game_over = true;
        d.skill_check = Some("Spot Hidden".to_string());
        assert_eq!(session.receive_directive(d).unwrap(), TurnOutcome::GameOver);
    }

    #[test]
    fn skill_check_resolves_and_reports() {
        let mut session = started_session(1);
        offer_skill_check(&mut session, "Spot Hidden");
        let mut outcome = session.roll_pending().unwrap();
        // Drive to a resolved request, declining any push.
        if matches!(outcome, RollOutcome::PushOffered(_)) {
            let request = session.decline_push().unwrap();
            outcome = RollOutcome::Resolved(request);
        }
        let RollOutcome::Resolved(request) = outcome else {
            panic!("skill check cannot end the session");
        };
        let report = request.check_outcome.expect("check outcome attached");
        assert_eq!(report.check, "Spot Hidden");
        assert_eq!(report.target, session.roster()[0].skill("Spot Hidden"));
        assert!((1..=100).contains(&report.roll));
        assert_eq!(session.phase(), Phase::AwaitingNarrator);
    }

    #[test]
    fn failed_check_offers_push_and_decline_forwards_unchanged() {
        // Target 0 cannot be rolled under, except roll 1 which is a
        // critical; retry seeds until the first roll fails.
        for seed in 0..20 {
            let mut session = GameSession::new(SessionConfig::default().with_seed(seed));
            let mut inv = Investigator::new("Doomed");
            inv.skills.insert("Cthulhu Mythos".to_string(), 0);
            session.add_investigator(inv).unwrap();
            session.begin(Scenario::fallback()).unwrap();
            offer_skill_check(&mut session, "Cthulhu Mythos");
            match session.roll_pending().unwrap() {
                RollOutcome::PushOffered(report) => {
                    assert!(!report.tier.is_success());
                    assert!(!report.pushed);
                    assert_eq!(session.phase(), Phase::AwaitingPushDecision);
                    let request = session.decline_push().unwrap();
                    assert_eq!(request.check_outcome, Some(report));
                    assert_eq!(session.phase(), Phase::AwaitingNarrator);
                    return;
                }
                _ => continue,
            }
        }
        panic!("no failing roll in 20 seeds");
    }

    #[test]
    fn accepted_push_rerolls_once_and_is_final() {
        for seed in 0..20 {
            let mut session = GameSession::new(SessionConfig::default().with_seed(seed));
            let mut inv = Investigator::new("Stubborn");
            inv.skills.insert("Cthulhu Mythos".to_string(), 0);
            session.add_investigator(inv).unwrap();
            session.begin(Scenario::fallback()).unwrap();
            offer_skill_check(&mut session, "Cthulhu Mythos");
            if let RollOutcome::PushOffered(first) = session.roll_pending().unwrap() {
                let request = session.accept_push().unwrap();
                let report = request.check_outcome.expect("pushed outcome attached");
                assert!(report.pushed);
                assert_eq!(report.target, first.target);
                // Final either way: the session moved on.
                assert_eq!(session.phase(), Phase::AwaitingNarrator);
                assert!(matches!(
                    session.accept_push(),
                    Err(SessionError::NoPushPending)
                ));
                return;
            }
        }
        panic!("no failing roll in 20 seeds");
    }

    #[test]
    fn stat_check_uses_multiplier() {
        let mut session = started_session(1);
        session.submit_action("I brace against the wind.").unwrap();
        let mut d = plain_directive("The gale howls.");
        d.stat_check = Some(StatCheckDirective {
            stat: "POW".to_string(),
            multiplier: Some(4),
            reason: "Hold firm".to_string(),
        });
        session.receive_directive(d).unwrap();
        let id = session.roster()[0].id;
        let pow = session.roster()[0].stats.get(Attribute::Pow);
        session
            .select_check_target(CheckTarget::Investigator(id))
            .unwrap();
        let outcome = session.roll_pending().unwrap();
        let report = match outcome {
            RollOutcome::Resolved(request) => request.check_outcome.unwrap(),
            RollOutcome::PushOffered(report) => report,
            RollOutcome::GameOver { .. } => panic!("stat check cannot end the session"),
        };
        assert_eq!(report.target, pow * 4);
        assert_eq!(report.check, "POW x4");
    }

    #[test]
    fn unknown_stat_code_drops_the_check() {
        let mut session = started_session(1);
        session.submit_action("I flex.").unwrap();
        let mut d = plain_directive("Impressive, probably.");
        d.stat_check = Some(StatCheckDirective {
            stat: "CHA".to_string(),
            multiplier: None,
            reason: "Vanity".to_string(),
        });
        let outcome = session.receive_directive(d).unwrap();
        assert!(matches!(outcome, TurnOutcome::AwaitingInput { .. }));
    }

    #[test]
    fn party_sanity_check_hits_everyone() {
        let mut session = started_session(3);
        session.submit_action("We look upon it.").unwrap();
        let mut d = plain_directive("It looks back.");
        d.sanity_check = Some(SanityCheckDirective {
            roll: "1/1d6".to_string(),
            reason: "The sight of it".to_string(),
            target_all: true,
        });
        session.receive_directive(d).unwrap();
        session.select_check_target(CheckTarget::All).unwrap();
        let before: Vec<u32> = session.roster().iter().map(|i| i.san.current).collect();
        match session.roll_pending().unwrap() {
            RollOutcome::Resolved(request) => {
                assert!(request.instruction.starts_with("Sanity check"));
                for (inv, before) in session.roster().iter().zip(before) {
                    assert!(inv.san.current < before);
                }
            }
            RollOutcome::GameOver { .. } => {
                assert_eq!(session.phase(), Phase::GameOver);
            }
            RollOutcome::PushOffered(_) => panic!("sanity checks are never pushed"),
        }
    }

    #[test]
    fn party_target_requires_target_all() {
        let mut session = started_session(2);
        session.submit_action("We peek.").unwrap();
        let mut d = plain_directive("Only one of you sees it.");
        d.sanity_check = Some(SanityCheckDirective {
            roll: "0/1d4".to_string(),
            reason: "A glimpse".to_string(),
            target_all: false,
        });
        session.receive_directive(d).unwrap();
        assert!(matches!(
            session.select_check_target(CheckTarget::All),
            Err(SessionError::PartyTargetNotAllowed)
        ));
        let id = session.roster()[1].id;
        session
            .select_check_target(CheckTarget::Investigator(id))
            .unwrap();
        let before = session.roster()[0].san.current;
        session.roll_pending().unwrap();
        // Only the selected investigator is affected.
        assert_eq!(session.roster()[0].san.current, before);
    }

    #[test]
    fn zero_sanity_ends_the_session() {
        let mut session = started_session(1);
        session.roster[0].san.set_current(1);
        session.submit_action("I stare into the abyss.").unwrap();
        let mut d = plain_directive("The abyss is generous.");
        d.sanity_check = Some(SanityCheckDirective {
            roll: "99/99".to_string(),
            reason: "Everything".to_string(),
            target_all: false,
        });
        session.receive_directive(d).unwrap();
        let id = session.roster()[0].id;
        session
            .select_check_target(CheckTarget::Investigator(id))
            .unwrap();
        assert!(matches!(
            session.roll_pending().unwrap(),
            RollOutcome::GameOver { .. }
        ));
        assert_eq!(session.phase(), Phase::GameOver);
    }

    #[test]
    fn plain_dice_roll_resolves_without_push() {
        let mut session = started_session(1);
        session.submit_action("I leap the gap.").unwrap();
        let mut d = plain_directive("The boards give way.");
        d.dice_roll_required = Some(crate::narrator::DiceRollDirective {
            roll: "2d6".to_string(),
            reason: "falling debris".to_string(),
        });
        session.receive_directive(d).unwrap();
        let id = session.roster()[0].id;
        session
            .select_check_target(CheckTarget::Investigator(id))
            .unwrap();
        let RollOutcome::Resolved(request) = session.roll_pending().unwrap() else {
            panic!("plain rolls always resolve");
        };
        assert!(request.check_outcome.is_none());
        assert!(request.instruction.contains("2d6"));
    }

    #[test]
    fn rolling_ticks_temporary_madness() {
        let mut session = started_session(1);
        session.roster[0].madness = MadnessState::Temporary {
            description: "trembles and weeps".to_string(),
            remaining_rounds: 1,
        };
        offer_skill_check(&mut session, "Spot Hidden");
        session.roll_pending().unwrap();
        assert!(session.roster()[0].madness.is_sane());
    }

    #[test]
    fn narrator_recovery_directive_clears_madness() {
        let mut session = started_session(1);
        session.roster[0].madness = MadnessState::Indefinite {
            description: "creeping paranoia".to_string(),
        };
        let id = session.roster()[0].id.to_string();
        session.submit_action("We talk him down.").unwrap();
        let mut d = plain_directive("The fog in his eyes lifts.");
        d.madness_recovery = Some(crate::narrator::MadnessRecoveryDirective {
            character_id: id,
            reason: "A familiar voice".to_string(),
            scope: crate::sanity::MadnessRecoveryScope::Indefinite,
        });
        session.receive_directive(d).unwrap();
        assert!(session.roster()[0].madness.is_sane());
    }

    #[test]
    fn seeded_sessions_are_deterministic() {
        let run = |seed: u64| {
            let mut session = GameSession::new(SessionConfig::default().with_seed(seed));
            session.add_investigator(Investigator::new("Echo")).unwrap();
            session.begin(Scenario::fallback()).unwrap();
            offer_skill_check(&mut session, "Spot Hidden");
            match session.roll_pending().unwrap() {
                RollOutcome::Resolved(request) => request.check_outcome.unwrap().roll,
                RollOutcome::PushOffered(report) => report.roll,
                RollOutcome::GameOver { .. } => unreachable!(),
            }
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn tier_labels_survive_into_reports() {
        let mut session = started_session(1);
        offer_skill_check(&mut session, "Dodge");
        let tier = match session.roll_pending().unwrap() {
            RollOutcome::Resolved(request) => request.check_outcome.unwrap().tier,
            RollOutcome::PushOffered(report) => report.tier,
            RollOutcome::GameOver { .. } => unreachable!(),
        };
        assert!(matches!(
            tier,
            SuccessTier::Critical
                | SuccessTier::ExtremeSuccess
                | SuccessTier::HardSuccess
                | SuccessTier::RegularSuccess
                | SuccessTier::Failure
                | SuccessTier::Fumble
                | SuccessTier::Fumble00
        ));
    }
}
