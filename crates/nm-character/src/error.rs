//! Error types for the investigator model.

use thiserror::Error;

/// Result type for investigator operations.
pub type CharacterResult<T> = Result<T, CharacterError>;

/// Errors that can occur while mutating an investigator.
///
/// Deliberately short: numeric input is sanitized instead of rejected, so
/// only structural refusals surface as errors.
#[derive(Debug, Error)]
pub enum CharacterError {
    /// A custom occupation already has the maximum number of occupational
    /// skills selected.
    #[error("custom occupations are capped at {0} occupational skills")]
    OccupationalSkillLimit(usize),

    /// A custom skill with this name already exists on the investigator.
    #[error("custom skill '{0}' already exists")]
    DuplicateCustomSkill(String),
}
