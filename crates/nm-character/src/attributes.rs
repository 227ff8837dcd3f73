//! The eight investigator attributes and their creation rolls.

use serde::{Deserialize, Serialize};

/// One of the eight investigator attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Attribute {
    /// Strength.
    Str,
    /// Constitution.
    Con,
    /// Power, covering willpower and magical potential.
    Pow,
    /// Dexterity.
    Dex,
    /// Appearance.
    App,
    /// Size.
    Siz,
    /// Intelligence.
    Int,
    /// Education.
    Edu,
}

impl Attribute {
    /// All eight attributes in sheet order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Str,
            Self::Con,
            Self::Pow,
            Self::Dex,
            Self::App,
            Self::Siz,
            Self::Int,
            Self::Edu,
        ]
    }

    /// The dice notation rolled for this attribute during creation.
    pub fn creation_notation(self) -> &'static str {
        match self {
            Self::Str | Self::Con | Self::Pow | Self::Dex | Self::App => "3d6",
            Self::Siz | Self::Int => "2d6+6",
            Self::Edu => "3d6+3",
        }
    }

    /// Parse an attribute code like "STR" or "edu".
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "STR" => Some(Self::Str),
            "CON" => Some(Self::Con),
            "POW" => Some(Self::Pow),
            "DEX" => Some(Self::Dex),
            "APP" => Some(Self::App),
            "SIZ" => Some(Self::Siz),
            "INT" => Some(Self::Int),
            "EDU" => Some(Self::Edu),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Str => 0,
            Self::Con => 1,
            Self::Pow => 2,
            Self::Dex => 3,
            Self::App => 4,
            Self::Siz => 5,
            Self::Int => 6,
            Self::Edu => 7,
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str => write!(f, "STR"),
            Self::Con => write!(f, "CON"),
            Self::Pow => write!(f, "POW"),
            Self::Dex => write!(f, "DEX"),
            Self::App => write!(f, "APP"),
            Self::Siz => write!(f, "SIZ"),
            Self::Int => write!(f, "INT"),
            Self::Edu => write!(f, "EDU"),
        }
    }
}

/// Sanitize a raw attribute entry: values below 1 (or otherwise invalid)
/// become 1, values above 99 become 99.
pub fn sanitize(value: i64) -> u32 {
    value.clamp(1, 99) as u32
}

/// The eight attribute scores of an investigator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    values: [u32; 8],
}

impl Stats {
    /// Creation default: every attribute at 10.
    pub fn new() -> Self {
        Self { values: [10; 8] }
    }

    /// Get an attribute score.
    pub fn get(&self, attribute: Attribute) -> u32 {
        self.values[attribute.index()]
    }

    /// Set an attribute score, sanitized to [1, 99].
    pub fn set(&mut self, attribute: Attribute, value: i64) {
        self.values[attribute.index()] = sanitize(value);
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}
