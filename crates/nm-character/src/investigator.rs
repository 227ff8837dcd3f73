//! The investigator record and its derived statistics.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nm_mechanics::roll_notation;

use crate::allocation::AllocationTable;
use crate::attributes::{Attribute, Stats};
use crate::equipment::{Armor, ArmorId, Weapon, WeaponId};
use crate::error::{CharacterError, CharacterResult};
use crate::madness::MadnessState;
use crate::occupation::occupational_skills;
use crate::resource::Resource;
use crate::skills::{CustomSkill, SKILL_CAP, base_skill_value, standard_skill_names};

/// Unique identifier for an investigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvestigatorId(pub Uuid);

impl InvestigatorId {
    /// Generate a new random investigator ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InvestigatorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InvestigatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Damage bonus dice notation banded by STR + SIZ.
pub fn damage_bonus(strength: u32, size: u32) -> &'static str {
    match strength + size {
        0..=12 => "-1D6",
        13..=16 => "-1D4",
        17..=24 => "+0",
        25..=32 => "+1D4",
        33..=40 => "+1D6",
        41..=56 => "+2D6",
        57..=72 => "+3D6",
        _ => "+4D6",
    }
}

/// A player-controlled character.
///
/// The `skills` map holds summed totals (base + occupation points +
/// interest points, capped at 99); the per-skill split lives in
/// `allocations` and the two are kept in lockstep by every mutation on
/// this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investigator {
    /// Unique id within the session roster.
    pub id: InvestigatorId,
    /// Display name.
    pub name: String,
    /// Occupation; may match a preset or be entirely custom.
    pub occupation: String,
    /// Free-form background description.
    pub description: String,
    /// Optional portrait reference (a URL or asset key; not interpreted).
    pub portrait: Option<String>,
    /// The eight attribute scores.
    pub stats: Stats,
    /// Hit points: `ceil((CON + SIZ) / 2)`.
    pub hp: Resource,
    /// Magic points: POW.
    pub mp: Resource,
    /// Sanity: maximum POW × 5.
    pub san: Resource,
    /// Skill totals by name.
    pub skills: HashMap<String, u32>,
    /// User-defined skills with declared bases.
    pub custom_skills: Vec<CustomSkill>,
    /// Occupational skills explicitly selected for a custom occupation.
    pub custom_occupational_skills: Vec<String>,
    /// Per-skill occupation/interest point split.
    pub allocations: AllocationTable,
    /// Carried weapons.
    pub weapons: Vec<Weapon>,
    /// Worn armor.
    pub armor: Vec<Armor>,
    /// Current madness status.
    pub madness: MadnessState,
}

impl Investigator {
    /// Create a fresh investigator: every attribute at 10, resources full,
    /// every standard skill at its base value, no equipment.
    pub fn new(name: impl Into<String>) -> Self {
        let stats = Stats::new();
        let mut investigator = Self {
            id: InvestigatorId::new(),
            name: name.into(),
            occupation: String::new(),
            description: String::new(),
            portrait: None,
            hp: Resource::new(hp_max(&stats)),
            mp: Resource::new(mp_max(&stats)),
            san: Resource::new(san_max(&stats)),
            stats,
            skills: HashMap::new(),
            custom_skills: Vec::new(),
            custom_occupational_skills: Vec::new(),
            allocations: AllocationTable::new(),
            weapons: Vec::new(),
            armor: Vec::new(),
            madness: MadnessState::Sane,
        };
        investigator.refresh_all_skills();
        investigator
    }

    /// Set an attribute, sanitizing the value to [1, 99].
    ///
    /// Recomputes the HP/MP/SAN maxima (clamping currents down, never up)
    /// and, for DEX or EDU, every skill total that depends on a dynamic
    /// base.
    pub fn set_attribute(&mut self, attribute: Attribute, value: i64) {
        self.stats.set(attribute, value);
        self.recompute_resource_maxima();
        if matches!(attribute, Attribute::Dex | Attribute::Edu) {
            self.refresh_all_skills();
        }
    }

    /// Roll an attribute from its creation notation and apply it.
    pub fn roll_attribute(&mut self, attribute: Attribute, rng: &mut StdRng) {
        let value = roll_notation(attribute.creation_notation(), rng);
        self.set_attribute(attribute, i64::from(value));
    }

    /// Roll all eight attributes independently, then recompute derived
    /// resources (refilled to the new maxima, as this is a creation-time
    /// reroll of the whole sheet) and every skill total once.
    pub fn roll_all_attributes(&mut self, rng: &mut StdRng) {
        for attribute in Attribute::all() {
            let value = roll_notation(attribute.creation_notation(), rng);
            self.stats.set(*attribute, i64::from(value));
        }
        self.recompute_resource_maxima();
        self.hp.refill();
        self.mp.refill();
        self.san.refill();
        self.refresh_all_skills();
    }

    /// This investigator's damage bonus notation.
    pub fn damage_bonus(&self) -> &'static str {
        damage_bonus(
            self.stats.get(Attribute::Str),
            self.stats.get(Attribute::Siz),
        )
    }

    /// Occupation-point budget: EDU × 20.
    pub fn occupation_point_budget(&self) -> u32 {
        self.stats.get(Attribute::Edu) * 20
    }

    /// Interest-point budget: INT × 10.
    pub fn interest_point_budget(&self) -> u32 {
        self.stats.get(Attribute::Int) * 10
    }

    /// Idea roll target: INT × 5.
    pub fn idea(&self) -> u32 {
        self.stats.get(Attribute::Int) * 5
    }

    /// Luck roll target: POW × 5.
    pub fn luck(&self) -> u32 {
        self.stats.get(Attribute::Pow) * 5
    }

    /// Knowledge roll target: EDU × 5.
    pub fn knowledge(&self) -> u32 {
        self.stats.get(Attribute::Edu) * 5
    }

    /// Current total for a skill; unallocated unknown skills report their
    /// base value.
    pub fn skill(&self, name: &str) -> u32 {
        self.skills.get(name).copied().unwrap_or_else(|| {
            base_skill_value(name, &self.stats, &self.custom_skills)
        })
    }

    /// Base value for a skill on this sheet.
    pub fn skill_base(&self, name: &str) -> u32 {
        base_skill_value(name, &self.stats, &self.custom_skills)
    }

    /// Whether occupation points may be spent on this skill right now:
    /// preset membership for a known occupation, explicit selection for a
    /// custom one.
    pub fn is_occupational_skill(&self, name: &str) -> bool {
        match occupational_skills(&self.occupation) {
            Some(skills) => skills.contains(&name),
            None => self.custom_occupational_skills.iter().any(|s| s == name),
        }
    }

    /// The current occupational skill list, preset or custom.
    pub fn occupational_skill_names(&self) -> Vec<String> {
        match occupational_skills(&self.occupation) {
            Some(skills) => skills.iter().map(|s| s.to_string()).collect(),
            None => self.custom_occupational_skills.clone(),
        }
    }

    /// Add a user-defined skill. Refuses duplicates by name.
    pub fn add_custom_skill(&mut self, skill: CustomSkill) -> CharacterResult<()> {
        if self.custom_skills.iter().any(|c| c.name == skill.name) {
            return Err(CharacterError::DuplicateCustomSkill(skill.name));
        }
        let name = skill.name.clone();
        self.custom_skills.push(skill);
        self.refresh_skill(&name);
        Ok(())
    }

    /// Remove a custom skill everywhere it is referenced: the skill map,
    /// the allocation table, and any custom-occupation selection. Returns
    /// false if no such custom skill exists.
    pub fn remove_custom_skill(&mut self, name: &str) -> bool {
        let Some(pos) = self.custom_skills.iter().position(|c| c.name == name) else {
            return false;
        };
        self.custom_skills.remove(pos);
        self.skills.remove(name);
        self.allocations.remove(name);
        self.custom_occupational_skills.retain(|s| s != name);
        true
    }

    /// Add a weapon to the sheet.
    pub fn add_weapon(&mut self, weapon: Weapon) -> WeaponId {
        let id = weapon.id;
        self.weapons.push(weapon);
        id
    }

    /// Remove a weapon by id. Returns false if absent.
    pub fn remove_weapon(&mut self, id: WeaponId) -> bool {
        let before = self.weapons.len();
        self.weapons.retain(|w| w.id != id);
        self.weapons.len() != before
    }

    /// Add an armor entry to the sheet.
    pub fn add_armor(&mut self, armor: Armor) -> ArmorId {
        let id = armor.id;
        self.armor.push(armor);
        id
    }

    /// Remove an armor entry by id. Returns false if absent.
    pub fn remove_armor(&mut self, id: ArmorId) -> bool {
        let before = self.armor.len();
        self.armor.retain(|a| a.id != id);
        self.armor.len() != before
    }

    /// Recompute one skill total from its base and allocation split.
    pub fn refresh_skill(&mut self, name: &str) {
        let base = base_skill_value(name, &self.stats, &self.custom_skills);
        let split = self.allocations.get(name);
        let total = (base + split.occupation + split.interest).min(SKILL_CAP);
        self.skills.insert(name.to_string(), total);
    }

    /// Recompute every skill total: the standard list, custom skills, and
    /// anything that has an allocation entry.
    pub fn refresh_all_skills(&mut self) {
        let mut names: BTreeSet<String> =
            standard_skill_names().map(str::to_string).collect();
        names.extend(self.custom_skills.iter().map(|c| c.name.clone()));
        names.extend(self.allocations.skill_names().map(str::to_string));
        for name in names {
            self.refresh_skill(&name);
        }
    }

    fn recompute_resource_maxima(&mut self) {
        self.hp.set_max(hp_max(&self.stats));
        self.mp.set_max(mp_max(&self.stats));
        self.san.set_max(san_max(&self.stats));
    }
}

fn hp_max(stats: &Stats) -> u32 {
    (stats.get(Attribute::Con) + stats.get(Attribute::Siz)).div_ceil(2)
}

fn mp_max(stats: &Stats) -> u32 {
    stats.get(Attribute::Pow)
}

fn san_max(stats: &Stats) -> u32 {
    stats.get(Attribute::Pow) * 5
}
