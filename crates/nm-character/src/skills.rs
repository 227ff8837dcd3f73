//! Skill base values.
//!
//! Most skills have a fixed base percentage from the table below. Two
//! scale dynamically with attributes (Dodge with DEX, the investigator's
//! own language with EDU) and are recomputed whenever those attributes
//! change. Custom skills declare their own base.

use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, Stats};

/// No skill total may exceed this value.
pub const SKILL_CAP: u32 = 99;

/// Fixed base values for the standard skill list.
const BASE_SKILLS: &[(&str, u32)] = &[
    ("Accounting", 5),
    ("Anthropology", 1),
    ("Appraise", 5),
    ("Archaeology", 1),
    ("Art/Craft", 5),
    ("Charm", 15),
    ("Climb", 20),
    ("Credit Rating", 0),
    ("Cthulhu Mythos", 0),
    ("Disguise", 5),
    ("Drive Auto", 20),
    ("Electrical Repair", 10),
    ("Fast Talk", 5),
    ("Fighting (Brawl)", 25),
    ("Firearms (Handgun)", 20),
    ("Firearms (Rifle/Shotgun)", 25),
    ("First Aid", 30),
    ("History", 5),
    ("Intimidate", 15),
    ("Jump", 20),
    ("Language (Other)", 1),
    ("Law", 5),
    ("Library Use", 20),
    ("Listen", 20),
    ("Locksmith", 1),
    ("Mechanical Repair", 10),
    ("Medicine", 1),
    ("Natural World", 10),
    ("Navigate", 10),
    ("Occult", 5),
    ("Operate Heavy Machinery", 1),
    ("Persuade", 10),
    ("Pilot", 1),
    ("Psychoanalysis", 1),
    ("Psychology", 10),
    ("Ride", 5),
    ("Science", 1),
    ("Sleight of Hand", 10),
    ("Spot Hidden", 25),
    ("Stealth", 20),
    ("Survival", 10),
    ("Swim", 20),
    ("Throw", 20),
    ("Track", 10),
];

/// Skill whose base is half the investigator's DEX.
pub const DODGE: &str = "Dodge";
/// Skill whose base equals the investigator's EDU.
pub const OWN_LANGUAGE: &str = "Language (Own)";

/// A user-defined skill with its own declared base value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSkill {
    /// Display name; must not collide with another custom skill.
    pub name: String,
    /// Declared base percentage.
    pub base: u32,
    /// Free-form grouping label ("combat", "academic", ...).
    pub category: String,
}

/// Look up the fixed base for a standard skill.
pub fn static_base(name: &str) -> Option<u32> {
    BASE_SKILLS
        .iter()
        .find(|(skill, _)| *skill == name)
        .map(|(_, base)| *base)
}

/// Base value for a skill whose base is an attribute formula, if it has one.
pub fn dynamic_base(name: &str, stats: &Stats) -> Option<u32> {
    match name {
        DODGE => Some(stats.get(Attribute::Dex) / 2),
        OWN_LANGUAGE => Some(stats.get(Attribute::Edu)),
        _ => None,
    }
}

/// Resolve a skill's base value: dynamic formula first, then a matching
/// custom skill's declared base, then the fixed table, else 0.
pub fn base_skill_value(name: &str, stats: &Stats, custom_skills: &[CustomSkill]) -> u32 {
    if let Some(base) = dynamic_base(name, stats) {
        return base;
    }
    if let Some(custom) = custom_skills.iter().find(|c| c.name == name) {
        return custom.base;
    }
    static_base(name).unwrap_or(0)
}

/// Names of every standard skill, including the dynamic-base ones.
pub fn standard_skill_names() -> impl Iterator<Item = &'static str> {
    BASE_SKILLS
        .iter()
        .map(|(name, _)| *name)
        .chain([DODGE, OWN_LANGUAGE])
}
