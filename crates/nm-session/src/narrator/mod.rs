//! Wire contract with the external narrator collaborator.
//!
//! The narrator is an opaque generative-text service: the session sends
//! it structured context (instruction text, party state, check results)
//! and receives a structured directive telling the orchestrator what to
//! surface next. Transport is out of scope; this module owns only the
//! payload types and the defensive parsing of responses.

mod directive;
mod request;
mod scenario;

pub use directive::{
    DiceRollDirective, MadnessRecoveryDirective, NarratorDirective, Reward, SanityCheckDirective,
    StatCheckDirective,
};
pub use request::{CheckReport, InvestigatorSummary, NarratorRequest};
pub use scenario::{Scenario, ScenarioPreferences, ScenarioRequest};
