//! ReductionProfile - Every reduction derived from one loadout

use super::constants::DEFAULT_EXPECTED_DAMAGE;
use super::{
    armor_reduction, clamp_fraction, combined_reduction, effective_health, evasion_reduction,
    protection_reduction, specialized_evasion, specialized_protection,
};
use crate::catalog::ItemStats;
use crate::loadout::Loadout;
use crate::types::{Category, DamageType};
use serde::{Deserialize, Serialize};

/// Reductions of a loadout, each clamped into `[0, REDUCTION_CAP]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReductionProfile {
    // === General reductions ===
    pub protection: f64,
    pub armor: f64,
    pub evasion: f64,
    /// Guaranteed reduction: protection, armor and evasion stacked
    pub general: f64,
    /// Effective health at the guaranteed reduction
    pub true_effective_health: f64,

    // === Specialized reductions ===
    pub projectile: f64,
    pub blast: f64,
    pub fire: f64,
    pub feather_falling: f64,
    pub ability: f64,
    pub melee: f64,

    // === Health sums ===
    pub health: f64,
    pub health_percent: f64,
}

impl ReductionProfile {
    /// General reduction of a category
    pub fn category(&self, category: Category) -> f64 {
        match category {
            Category::Protection => self.protection,
            Category::Armor => self.armor,
            Category::Evasion => self.evasion,
        }
    }

    /// Reduction against a specific damage type
    pub fn specialized(&self, damage_type: DamageType) -> f64 {
        match damage_type {
            DamageType::Projectile => self.projectile,
            DamageType::Blast => self.blast,
            DamageType::Fire => self.fire,
            DamageType::FeatherFalling => self.feather_falling,
            DamageType::Ability => self.ability,
            DamageType::Melee => self.melee,
        }
    }

    /// Effective health for some reduction, using this loadout's health sums
    pub fn effective_health_at(&self, reduction: f64) -> f64 {
        effective_health(reduction, self.health, self.health_percent)
    }
}

/// Derives reduction profiles against a fixed expected hit
#[derive(Debug, Clone, Copy)]
pub struct ReductionCalculator {
    expected_damage: f64,
}

impl Default for ReductionCalculator {
    fn default() -> Self {
        ReductionCalculator::new(DEFAULT_EXPECTED_DAMAGE)
    }
}

impl ReductionCalculator {
    pub fn new(expected_damage: f64) -> Self {
        ReductionCalculator { expected_damage }
    }

    pub fn expected_damage(&self) -> f64 {
        self.expected_damage
    }

    /// Full profile of a loadout
    pub fn profile(&self, loadout: &Loadout<'_>) -> ReductionProfile {
        self.profile_from_totals(&loadout.totals())
    }

    /// Full profile from already summed stats
    pub fn profile_from_totals(&self, totals: &ItemStats) -> ReductionProfile {
        let protection = clamp_fraction(protection_reduction(totals.protection));
        let armor = clamp_fraction(armor_reduction(
            totals.armor,
            totals.toughness,
            self.expected_damage,
        ));
        let evasion = clamp_fraction(evasion_reduction(totals.evasion));
        let general = combined_reduction([protection, armor, evasion]);

        let spec_protection = |specialized: f64| {
            clamp_fraction(specialized_protection(totals.protection, specialized))
        };
        let spec_evasion = |specialized: f64| {
            clamp_fraction(specialized_evasion(totals.evasion, specialized))
        };

        ReductionProfile {
            protection,
            armor,
            evasion,
            general,
            true_effective_health: effective_health(general, totals.health, totals.health_percent),
            projectile: spec_protection(totals.projectile_protection),
            blast: spec_protection(totals.blast_protection),
            fire: spec_protection(totals.fire_protection),
            feather_falling: spec_protection(totals.feather_falling),
            ability: spec_evasion(totals.ability_evasion),
            melee: spec_evasion(totals.melee_evasion),
            health: totals.health,
            health_percent: totals.health_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Item, Stat};
    use crate::types::SlotType;

    #[test]
    fn test_empty_loadout() {
        let profile = ReductionCalculator::default().profile(&Loadout::empty());
        assert!((profile.general - 0.0).abs() < f64::EPSILON);
        assert!((profile.true_effective_health - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_general_stacks_all_three() {
        // 5 protection -> 0.2, 10 armor vs 20 dmg -> 0.08, 5 evasion -> 0.2
        let boots = Item::new(
            SlotType::Boots,
            "boots",
            ItemStats::default()
                .with(Stat::Protection, 5.0)
                .with(Stat::Armor, 10.0)
                .with(Stat::Evasion, 5.0),
        );
        let loadout = Loadout::new(vec![&boots]).unwrap();
        let profile = ReductionCalculator::new(20.0).profile(&loadout);

        let expected = 1.0 - 0.8 * 0.92 * 0.8;
        assert!((profile.general - expected).abs() < 1e-12);
        assert!((profile.true_effective_health - 20.0 / (1.0 - expected)).abs() < 1e-9);
    }

    #[test]
    fn test_specialized_from_general_base() {
        let head = Item::new(
            SlotType::Head,
            "helm",
            ItemStats::default()
                .with(Stat::Protection, 2.0)
                .with(Stat::FireProtection, 4.0)
                .with(Stat::Evasion, 3.0)
                .with(Stat::MeleeEvasion, 1.0),
        );
        let loadout = Loadout::new(vec![&head]).unwrap();
        let profile = ReductionCalculator::default().profile(&loadout);

        // 2 + 4 * 2 = 10 protection points against fire
        assert!((profile.fire - 0.4).abs() < 1e-12);
        assert!((profile.projectile - profile.protection).abs() < f64::EPSILON);
        // 3 + 1 * 2 = 5 evasion points against melee
        assert!((profile.melee - 0.2).abs() < 1e-12);
        assert!((profile.ability - 0.0).abs() < f64::EPSILON);
        assert!((profile.specialized(DamageType::Fire) - profile.fire).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_stats_clamped() {
        let cursed = Item::new(
            SlotType::Chest,
            "cursed",
            ItemStats::default().with(Stat::Protection, -10.0),
        );
        let loadout = Loadout::new(vec![&cursed]).unwrap();
        let profile = ReductionCalculator::default().profile(&loadout);
        assert!((profile.protection - 0.0).abs() < f64::EPSILON);
        assert!(profile.general >= 0.0);
    }

    #[test]
    fn test_health_sums_carried() {
        let chest = Item::new(
            SlotType::Chest,
            "plate",
            ItemStats::default()
                .with(Stat::Health, 4.0)
                .with(Stat::HealthPercent, 0.1),
        );
        let loadout = Loadout::new(vec![&chest]).unwrap();
        let profile = ReductionCalculator::default().profile(&loadout);
        assert!((profile.true_effective_health - 24.0 * 1.1).abs() < 1e-9);
        assert!((profile.effective_health_at(0.5) - 24.0 * 1.1 * 2.0).abs() < 1e-9);
    }
}
