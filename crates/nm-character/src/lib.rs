//! Investigator data model for Nachtmahr.
//!
//! Owns everything about a player character: the eight attributes, derived
//! resources (hit points, magic points, sanity), the skill list with its
//! occupation/interest point split, custom skills and occupations, and
//! equipment. Derived values are recomputed eagerly on every attribute
//! write, so the record is always internally consistent; out-of-range
//! input is sanitized rather than rejected.

pub mod allocation;
pub mod attributes;
pub mod equipment;
pub mod error;
pub mod investigator;
pub mod madness;
pub mod occupation;
pub mod resource;
pub mod skills;

pub use allocation::{AllocationKind, AllocationTable, BudgetReport, SkillAllocation};
pub use attributes::{Attribute, Stats};
pub use equipment::{Armor, ArmorId, Weapon, WeaponId};
pub use error::{CharacterError, CharacterResult};
pub use investigator::{Investigator, InvestigatorId, damage_bonus};
pub use madness::{MadnessKind, MadnessState};
pub use occupation::{MAX_CUSTOM_OCCUPATIONAL_SKILLS, occupational_skills, occupation_names};
pub use resource::Resource;
pub use skills::{CustomSkill, SKILL_CAP, base_skill_value};
