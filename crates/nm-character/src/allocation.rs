//! Skill-point allocation: budgets, mutation, reset, and blind auto-fill.
//!
//! The allocation table is the source of truth for a skill's
//! occupation/interest split; the investigator's skill map only ever shows
//! the capped sum. Budget checks are advisory: an over-budget table is
//! reported, never rejected, matching how the sheet is edited at the table.

use std::collections::BTreeSet;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{CharacterError, CharacterResult};
use crate::investigator::Investigator;
use crate::occupation::MAX_CUSTOM_OCCUPATIONAL_SKILLS;
use crate::skills::{SKILL_CAP, standard_skill_names};

/// Which of the two point budgets an allocation draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationKind {
    /// Points from the EDU × 20 occupation budget.
    Occupation,
    /// Points from the INT × 10 interest budget.
    Interest,
}

/// The occupation/interest point split for one skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillAllocation {
    /// Occupation points allocated.
    pub occupation: u32,
    /// Interest points allocated.
    pub interest: u32,
}

/// Per-skill allocation entries for one investigator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllocationTable {
    entries: std::collections::HashMap<String, SkillAllocation>,
}

impl AllocationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The split for a skill; skills without an entry report zeros.
    pub fn get(&self, skill: &str) -> SkillAllocation {
        self.entries.get(skill).copied().unwrap_or_default()
    }

    /// Overwrite one side of a skill's split.
    pub fn set_points(&mut self, skill: &str, kind: AllocationKind, points: u32) {
        let entry = self.entries.entry(skill.to_string()).or_default();
        match kind {
            AllocationKind::Occupation => entry.occupation = points,
            AllocationKind::Interest => entry.interest = points,
        }
    }

    /// Add points to one side of a skill's split.
    pub fn add_points(&mut self, skill: &str, kind: AllocationKind, points: u32) {
        let current = self.get(skill);
        let new = match kind {
            AllocationKind::Occupation => current.occupation + points,
            AllocationKind::Interest => current.interest + points,
        };
        self.set_points(skill, kind, new);
    }

    /// Remove a skill's entry entirely.
    pub fn remove(&mut self, skill: &str) {
        self.entries.remove(skill);
    }

    /// Zero every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Total occupation points spent across all skills.
    pub fn occupation_total(&self) -> u32 {
        self.entries.values().map(|e| e.occupation).sum()
    }

    /// Total interest points spent across all skills.
    pub fn interest_total(&self) -> u32 {
        self.entries.values().map(|e| e.interest).sum()
    }

    /// Names of skills with an allocation entry.
    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Advisory comparison of spent points against the derived budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetReport {
    /// Occupation points spent.
    pub occupation_spent: u32,
    /// Occupation budget (EDU × 20).
    pub occupation_budget: u32,
    /// Interest points spent.
    pub interest_spent: u32,
    /// Interest budget (INT × 10).
    pub interest_budget: u32,
}

impl BudgetReport {
    /// Occupation points spent beyond the budget, if any.
    pub fn occupation_overrun(&self) -> u32 {
        self.occupation_spent.saturating_sub(self.occupation_budget)
    }

    /// Interest points spent beyond the budget, if any.
    pub fn interest_overrun(&self) -> u32 {
        self.interest_spent.saturating_sub(self.interest_budget)
    }

    /// True if either budget is exceeded. Surfaced to the operator; never
    /// blocks an allocation write or scenario start.
    pub fn is_over_budget(&self) -> bool {
        self.occupation_overrun() > 0 || self.interest_overrun() > 0
    }
}

/// Compare an investigator's spent points against their budgets.
pub fn budget_report(investigator: &Investigator) -> BudgetReport {
    BudgetReport {
        occupation_spent: investigator.allocations.occupation_total(),
        occupation_budget: investigator.occupation_point_budget(),
        interest_spent: investigator.allocations.interest_total(),
        interest_budget: investigator.interest_point_budget(),
    }
}

/// Set a skill's allocation for one budget and recompute its total.
///
/// Negative input is floored at 0; there is no per-call upper clamp, and
/// occupational-skill membership is not enforced here; the operator's
/// sheet flags both conditions instead of rejecting the write.
pub fn allocate(
    investigator: &mut Investigator,
    skill: &str,
    kind: AllocationKind,
    points: i64,
) {
    let points = points.clamp(0, i64::from(u32::MAX)) as u32;
    investigator.allocations.set_points(skill, kind, points);
    investigator.refresh_skill(skill);
}

/// Zero every allocation and recompute all skill totals back to base.
pub fn reset_all(investigator: &mut Investigator) {
    investigator.allocations.clear();
    investigator.refresh_all_skills();
}

/// Toggle a skill in a custom occupation's occupational-skill selection.
///
/// Returns true if the skill was inserted, false if it was removed.
/// Insertion is refused once the selection holds
/// [`MAX_CUSTOM_OCCUPATIONAL_SKILLS`] entries.
pub fn toggle_custom_occupational_skill(
    investigator: &mut Investigator,
    skill: &str,
) -> CharacterResult<bool> {
    if let Some(pos) = investigator
        .custom_occupational_skills
        .iter()
        .position(|s| s == skill)
    {
        investigator.custom_occupational_skills.remove(pos);
        return Ok(false);
    }
    if investigator.custom_occupational_skills.len() >= MAX_CUSTOM_OCCUPATIONAL_SKILLS {
        return Err(CharacterError::OccupationalSkillLimit(
            MAX_CUSTOM_OCCUPATIONAL_SKILLS,
        ));
    }
    investigator.custom_occupational_skills.push(skill.to_string());
    Ok(true)
}

/// Blind auto-allocation: spend the remaining occupation budget one point
/// at a time on uniformly random occupational skills, then the remaining
/// interest budget on the full skill list. A skill leaves the candidate
/// pool once its total hits the cap. Non-deterministic unless the RNG is
/// seeded.
pub fn auto_allocate(investigator: &mut Investigator, rng: &mut StdRng) {
    let occupational = investigator.occupational_skill_names();
    let remaining = investigator
        .occupation_point_budget()
        .saturating_sub(investigator.allocations.occupation_total());
    spend_randomly(
        investigator,
        occupational,
        AllocationKind::Occupation,
        remaining,
        rng,
    );

    let mut all_skills: BTreeSet<String> =
        standard_skill_names().map(str::to_string).collect();
    all_skills.extend(investigator.custom_skills.iter().map(|c| c.name.clone()));
    all_skills.extend(investigator.occupational_skill_names());
    let remaining = investigator
        .interest_point_budget()
        .saturating_sub(investigator.allocations.interest_total());
    spend_randomly(
        investigator,
        all_skills.into_iter().collect(),
        AllocationKind::Interest,
        remaining,
        rng,
    );
}

fn spend_randomly(
    investigator: &mut Investigator,
    candidates: Vec<String>,
    kind: AllocationKind,
    budget: u32,
    rng: &mut StdRng,
) {
    let mut pool: Vec<String> = candidates
        .into_iter()
        .filter(|name| investigator.skill(name) < SKILL_CAP)
        .collect();
    let mut remaining = budget;

    while remaining > 0 && !pool.is_empty() {
        let index = rng.random_range(0..pool.len());
        investigator.allocations.add_points(&pool[index], kind, 1);
        investigator.refresh_skill(&pool[index]);
        remaining -= 1;
        if investigator.skill(&pool[index]) >= SKILL_CAP {
            pool.swap_remove(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    use crate::attributes::Attribute;

    fn detective() -> Investigator {
        let mut inv = Investigator::new("Marlowe");
        inv.occupation = "Detective".to_string();
        inv
    }

    #[test]
    fn allocate_updates_split_and_total() {
        let mut inv = detective();
        allocate(&mut inv, "Spot Hidden", AllocationKind::Occupation, 40);
        allocate(&mut inv, "Spot Hidden", AllocationKind::Interest, 10);
        assert_eq!(inv.allocations.get("Spot Hidden").occupation, 40);
        assert_eq!(inv.allocations.get("Spot Hidden").interest, 10);
        assert_eq!(inv.skill("Spot Hidden"), 75); // base 25 + 40 + 10
    }

    #[test]
    fn allocate_caps_total_at_ninety_nine() {
        let mut inv = detective();
        allocate(&mut inv, "Spot Hidden", AllocationKind::Occupation, 200);
        assert_eq!(inv.skill("Spot Hidden"), 99);
        // The split itself keeps the raw value; only the total is capped.
        assert_eq!(inv.allocations.get("Spot Hidden").occupation, 200);
    }

    #[test]
    fn allocate_floors_negative_at_zero() {
        let mut inv = detective();
        allocate(&mut inv, "Listen", AllocationKind::Interest, -50);
        assert_eq!(inv.allocations.get("Listen").interest, 0);
        assert_eq!(inv.skill("Listen"), 20);
    }

    #[test]
    fn allocate_permits_non_occupational_skills() {
        // Membership is a sheet-level restriction, not a data-level one.
        let mut inv = detective();
        assert!(!inv.is_occupational_skill("Swim"));
        allocate(&mut inv, "Swim", AllocationKind::Occupation, 10);
        assert_eq!(inv.skill("Swim"), 30);
    }

    #[test]
    fn reset_all_is_idempotent() {
        let mut inv = detective();
        allocate(&mut inv, "Spot Hidden", AllocationKind::Occupation, 40);
        allocate(&mut inv, "Swim", AllocationKind::Interest, 15);
        reset_all(&mut inv);
        let after_first: Vec<_> = ["Spot Hidden", "Swim"]
            .iter()
            .map(|s| inv.skill(s))
            .collect();
        reset_all(&mut inv);
        let after_second: Vec<_> = ["Spot Hidden", "Swim"]
            .iter()
            .map(|s| inv.skill(s))
            .collect();
        assert_eq!(after_first, vec![25, 20]);
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn toggle_custom_selection_caps_at_eight() {
        let mut inv = Investigator::new("Custom");
        inv.occupation = "Dream Courier".to_string();
        let skills = [
            "Climb", "Jump", "Swim", "Listen", "Stealth", "Track", "Ride", "Throw",
        ];
        for skill in skills {
            assert!(toggle_custom_occupational_skill(&mut inv, skill).unwrap());
        }
        let ninth = toggle_custom_occupational_skill(&mut inv, "Occult");
        assert!(matches!(
            ninth,
            Err(CharacterError::OccupationalSkillLimit(8))
        ));
        // Removing one frees a slot.
        assert!(!toggle_custom_occupational_skill(&mut inv, "Ride").unwrap());
        assert!(toggle_custom_occupational_skill(&mut inv, "Occult").unwrap());
    }

    #[test]
    fn budget_report_is_advisory() {
        let mut inv = detective();
        inv.set_attribute(Attribute::Edu, 10); // budget 200
        allocate(&mut inv, "Spot Hidden", AllocationKind::Occupation, 150);
        allocate(&mut inv, "Listen", AllocationKind::Occupation, 100);
        let report = budget_report(&inv);
        assert_eq!(report.occupation_spent, 250);
        assert_eq!(report.occupation_overrun(), 50);
        assert!(report.is_over_budget());
        // The writes themselves were not rejected.
        assert_eq!(inv.skill("Listen"), 99);
    }

    #[test]
    fn auto_allocate_respects_budgets_and_cap() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut inv = detective();
        inv.set_attribute(Attribute::Edu, 14); // 280 occupation points
        inv.set_attribute(Attribute::Int, 12); // 120 interest points
        auto_allocate(&mut inv, &mut rng);

        assert!(inv.allocations.occupation_total() <= inv.occupation_point_budget());
        assert!(inv.allocations.interest_total() <= inv.interest_point_budget());
        for (name, total) in &inv.skills {
            assert!(*total <= SKILL_CAP, "{name} at {total}");
        }
        // Occupation points only land on occupational skills.
        for name in inv.allocations.skill_names() {
            if inv.allocations.get(name).occupation > 0 {
                assert!(inv.is_occupational_skill(name), "{name}");
            }
        }
    }

    #[test]
    fn auto_allocate_exhausts_budget_when_pool_allows() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut inv = detective();
        auto_allocate(&mut inv, &mut rng);
        // Default EDU 10 gives 200 points over 7 occupational skills with
        // plenty of headroom below the cap, so the budget is fully spent.
        assert_eq!(inv.allocations.occupation_total(), 200);
        assert_eq!(inv.allocations.interest_total(), 100);
    }

    #[test]
    fn auto_allocate_deterministic_with_seed() {
        let mut a = detective();
        let mut b = detective();
        let mut rng_a = StdRng::seed_from_u64(31);
        let mut rng_b = StdRng::seed_from_u64(31);
        auto_allocate(&mut a, &mut rng_a);
        auto_allocate(&mut b, &mut rng_b);
        assert_eq!(a.skills, b.skills);
    }

    #[test]
    fn auto_allocate_with_no_occupational_skills() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut inv = Investigator::new("Drifter");
        inv.occupation = "Unheard Of".to_string();
        auto_allocate(&mut inv, &mut rng);
        assert_eq!(inv.allocations.occupation_total(), 0);
        assert!(inv.allocations.interest_total() > 0);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn skill_total_always_within_bounds(points in -1000i64..5000, interest in -1000i64..5000) {
                let mut inv = detective();
                allocate(&mut inv, "Spot Hidden", AllocationKind::Occupation, points);
                allocate(&mut inv, "Spot Hidden", AllocationKind::Interest, interest);
                let total = inv.skill("Spot Hidden");
                prop_assert!(total >= inv.skill_base("Spot Hidden"));
                prop_assert!(total <= SKILL_CAP);
            }

            #[test]
            fn auto_allocate_never_overspends(seed in 0u64..1000) {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut inv = detective();
                auto_allocate(&mut inv, &mut rng);
                prop_assert!(inv.allocations.occupation_total() <= inv.occupation_point_budget());
                prop_assert!(inv.allocations.interest_total() <= inv.interest_point_budget());
            }
        }
    }
}
