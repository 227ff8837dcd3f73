//! Error types for the session engine.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while driving a game session.
///
/// These are all sequencing violations by the host: engine operations are
/// strictly serialized, so calling one in the wrong phase is refused rather
/// than queued.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The roster may only change before the scenario begins.
    #[error("the roster can only be changed during setup")]
    RosterLocked,

    /// A session cannot begin without at least one investigator.
    #[error("cannot begin a session with an empty roster")]
    EmptyRoster,

    /// The session is not waiting for a player action.
    #[error("the session is not awaiting player input")]
    NotAwaitingInput,

    /// A narrator request is already in flight; actions are single-flight.
    #[error("a narrator request is already in flight")]
    NarratorPending,

    /// A directive arrived while no narrator request was in flight.
    #[error("no narrator response is expected right now")]
    NoDirectiveExpected,

    /// No offered check is awaiting a target selection.
    #[error("no check is awaiting a target selection")]
    NoCheckPending,

    /// No dice acquisition is pending.
    #[error("no roll is pending")]
    NoRollPending,

    /// No push-roll decision is pending.
    #[error("no push-roll decision is pending")]
    NoPushPending,

    /// The referenced investigator is not in the roster.
    #[error("unknown investigator: {0}")]
    UnknownInvestigator(String),

    /// A party-wide target was selected for a single-target check.
    #[error("a party-wide target is only valid for sanity checks")]
    PartyTargetNotAllowed,

    /// The session has reached a terminal state.
    #[error("the session has ended")]
    SessionEnded,
}
