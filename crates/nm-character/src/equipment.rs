//! Weapons and armor carried by an investigator.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a weapon within an investigator's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeaponId(pub Uuid);

impl WeaponId {
    /// Generate a new random weapon ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WeaponId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WeaponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Unique identifier for a piece of armor within an investigator's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArmorId(pub Uuid);

impl ArmorId {
    /// Generate a new random armor ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ArmorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ArmorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A weapon entry on the character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    /// Unique within the owning investigator's weapon list.
    pub id: WeaponId,
    /// Display name.
    pub name: String,
    /// Damage dice notation, e.g. "1d8+1".
    pub damage: String,
    /// Effective range description.
    pub range: String,
    /// Attacks per round.
    pub attacks_per_round: u32,
    /// Magazine capacity, if the weapon uses ammunition.
    pub ammo_capacity: Option<u32>,
    /// Rounds currently loaded.
    pub ammo_current: Option<u32>,
    /// Remaining durability, if tracked.
    pub durability: Option<u32>,
    /// Malfunction number: the weapon jams on rolls at or above it.
    pub malfunction: Option<u32>,
    /// Free-form notes.
    pub notes: String,
}

impl Weapon {
    /// Create a melee-style weapon with no ammunition tracking.
    pub fn new(name: impl Into<String>, damage: impl Into<String>) -> Self {
        Self {
            id: WeaponId::new(),
            name: name.into(),
            damage: damage.into(),
            range: String::new(),
            attacks_per_round: 1,
            ammo_capacity: None,
            ammo_current: None,
            durability: None,
            malfunction: None,
            notes: String::new(),
        }
    }

    /// Set ammunition capacity, starting fully loaded.
    pub fn with_ammo(mut self, capacity: u32) -> Self {
        self.ammo_capacity = Some(capacity);
        self.ammo_current = Some(capacity);
        self
    }

    /// Set the malfunction number.
    pub fn with_malfunction(mut self, malfunction: u32) -> Self {
        self.malfunction = Some(malfunction);
        self
    }
}

/// An armor entry on the character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    /// Unique within the owning investigator's armor list.
    pub id: ArmorId,
    /// Display name.
    pub name: String,
    /// Points of damage absorbed.
    pub armor_value: u32,
    /// Free-form notes.
    pub notes: String,
}

impl Armor {
    /// Create an armor entry.
    pub fn new(name: impl Into<String>, armor_value: u32) -> Self {
        Self {
            id: ArmorId::new(),
            name: name.into(),
            armor_value,
            notes: String::new(),
        }
    }
}
