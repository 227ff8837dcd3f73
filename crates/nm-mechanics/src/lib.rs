//! Percentile game mechanics for Nachtmahr.
//!
//! Provides the dice-notation evaluator used throughout the engine and the
//! d100 check-resolution function that grades a roll against a target value
//! into a degree-of-success tier. Both are deliberately small and pure; all
//! randomness flows through an explicitly passed RNG so every consumer can
//! be tested with a fixed seed.

pub mod dice;
pub mod resolution;

pub use dice::{Notation, roll_d100, roll_notation, roll_range};
pub use resolution::{DEFAULT_STAT_MULTIPLIER, SuccessTier, resolve, stat_check_target};
