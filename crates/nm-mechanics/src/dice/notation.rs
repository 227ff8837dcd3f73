//! The parsed form of a dice-notation string.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// A parsed dice notation: either a fixed value or a dice expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notation {
    /// A bare integer with no `d`, read as a fixed value rather than a roll.
    Fixed(i32),
    /// A dice expression like `2d8+2`.
    Dice {
        /// Number of dice to roll (at least 1).
        count: u32,
        /// Sides per die (at least 2).
        sides: u32,
        /// Signed modifier added to the sum.
        modifier: i32,
    },
}

impl Notation {
    /// Parse a notation string.
    ///
    /// Accepts an optional leading count (`2d8`, `d6` means one die), an
    /// optional signed modifier (`3d6+3`, `2d6-1`), and bare integers
    /// (`5`, `+0`). Returns `None` for anything else.
    pub fn parse(input: &str) -> Option<Self> {
        let lowered = input.trim().to_lowercase();
        let s = lowered.strip_prefix('+').unwrap_or(lowered.as_str());
        if s.is_empty() {
            return None;
        }

        if let Ok(value) = s.parse::<i32>() {
            return Some(Self::Fixed(value));
        }

        let (head, tail) = s.split_once('d')?;
        let count = if head.is_empty() {
            1
        } else {
            head.parse::<u32>().ok()?
        };
        if count == 0 {
            return None;
        }

        let (sides_str, modifier) = match tail.find(['+', '-']) {
            Some(idx) => (&tail[..idx], tail[idx..].parse::<i32>().ok()?),
            None => (tail, 0),
        };
        let sides = sides_str.parse::<u32>().ok()?;
        if sides < 2 {
            return None;
        }

        Some(Self::Dice {
            count,
            sides,
            modifier,
        })
    }

    /// Evaluate the notation. Fixed values return themselves without
    /// touching the RNG.
    pub fn roll(&self, rng: &mut StdRng) -> i32 {
        match *self {
            Self::Fixed(value) => value,
            Self::Dice {
                count,
                sides,
                modifier,
            } => {
                let sum: i64 = (0..count)
                    .map(|_| i64::from(rng.random_range(1..=sides)))
                    .sum();
                (sum + i64::from(modifier)) as i32
            }
        }
    }

    /// Returns true if this is a fixed value rather than a dice expression.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    /// The lowest value this notation can produce.
    pub fn minimum(&self) -> i32 {
        match *self {
            Self::Fixed(value) => value,
            Self::Dice {
                count, modifier, ..
            } => count as i32 + modifier,
        }
    }

    /// The highest value this notation can produce.
    pub fn maximum(&self) -> i32 {
        match *self {
            Self::Fixed(value) => value,
            Self::Dice {
                count,
                sides,
                modifier,
            } => (count * sides) as i32 + modifier,
        }
    }
}

impl std::fmt::Display for Notation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Fixed(value) => write!(f, "{value}"),
            Self::Dice {
                count,
                sides,
                modifier,
            } => {
                write!(f, "{count}d{sides}")?;
                match modifier.cmp(&0) {
                    std::cmp::Ordering::Greater => write!(f, "+{modifier}"),
                    std::cmp::Ordering::Less => write!(f, "{modifier}"),
                    std::cmp::Ordering::Equal => Ok(()),
                }
            }
        }
    }
}
