//! Game-session engine for Nachtmahr.
//!
//! Owns the parts of the game that only exist while a session is running:
//! the sanity-loss and madness state machine, the structured contract with
//! the external generative narrator, the turn orchestrator that sequences
//! player actions, narrator directives, and dice acquisition (including
//! push-rolls), and the session transcript.
//!
//! The narrator itself stays outside this crate. The orchestrator emits a
//! [`NarratorRequest`], the host performs the transport however it likes,
//! and feeds the parsed [`NarratorDirective`] back in. That request/response
//! hop is the session's only suspension point; everything here is
//! synchronous and strictly serialized.

pub mod config;
pub mod error;
pub mod narrator;
pub mod sanity;
pub mod transcript;
pub mod turn;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use narrator::{
    CheckReport, DiceRollDirective, InvestigatorSummary, MadnessRecoveryDirective,
    NarratorDirective, NarratorRequest, Reward, SanityCheckDirective, Scenario,
    ScenarioPreferences, ScenarioRequest, StatCheckDirective,
};
pub use sanity::{
    LossNotation, MadnessRecoveryScope, MadnessTick, RecoveryResult, SanityCheck,
    SanityCheckOutcome, SanityOutcome, apply_sanity_loss, decrement_madness_duration,
    recover_from_madness, sanity_check,
};
pub use transcript::{Transcript, TranscriptEntry};
pub use turn::{CheckTarget, GameSession, PendingCheck, Phase, RollOutcome, TurnOutcome};
