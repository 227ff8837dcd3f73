//! Dice notation parsing and rolling.
//!
//! The grammar is the classic tabletop one: an optional leading count, a
//! literal `d`, the number of sides, and an optional signed modifier;
//! `2d8+2`, `d6`, `1d100`, `3d6-1`. A bare integer is a fixed value, not a
//! roll. Anything else evaluates to 0 rather than erroring, because the
//! notation frequently arrives from the narrator collaborator and a bad
//! string must never take down a session.

pub mod notation;

pub use notation::Notation;

use rand::Rng;
use rand::rngs::StdRng;

/// Roll a single percentile die (1-100).
pub fn roll_d100(rng: &mut StdRng) -> u32 {
    rng.random_range(1..=100)
}

/// Roll a uniform integer in `low..=high`. `high` below `low` yields `low`.
pub fn roll_range(low: u32, high: u32, rng: &mut StdRng) -> u32 {
    if high <= low {
        return low;
    }
    rng.random_range(low..=high)
}

/// Evaluate a notation string, returning 0 if it does not parse.
pub fn roll_notation(input: &str, rng: &mut StdRng) -> i32 {
    match Notation::parse(input) {
        Some(notation) => notation.roll(rng),
        None => 0,
    }
}
