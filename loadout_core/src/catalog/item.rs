//! Item - One equippable piece with its defensive stats

use crate::types::SlotType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Known stat vocabulary. Catalog keys are matched against these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Protection,
    Armor,
    /// Armor toughness, stored as `armor_t`
    #[serde(rename = "armor_t")]
    Toughness,
    Evasion,
    Health,
    /// Percent health bonus as a decimal, stored as `health_p`
    #[serde(rename = "health_p")]
    HealthPercent,
    #[serde(rename = "proj_protection")]
    ProjectileProtection,
    BlastProtection,
    FireProtection,
    FeatherFalling,
    AbilityEvasion,
    MeleeEvasion,
}

impl Stat {
    pub fn all() -> &'static [Stat] {
        &[
            Stat::Protection,
            Stat::Armor,
            Stat::Toughness,
            Stat::Evasion,
            Stat::Health,
            Stat::HealthPercent,
            Stat::ProjectileProtection,
            Stat::BlastProtection,
            Stat::FireProtection,
            Stat::FeatherFalling,
            Stat::AbilityEvasion,
            Stat::MeleeEvasion,
        ]
    }

    /// Key used in catalog files
    pub fn key(&self) -> &'static str {
        match self {
            Stat::Protection => "protection",
            Stat::Armor => "armor",
            Stat::Toughness => "armor_t",
            Stat::Evasion => "evasion",
            Stat::Health => "health",
            Stat::HealthPercent => "health_p",
            Stat::ProjectileProtection => "proj_protection",
            Stat::BlastProtection => "blast_protection",
            Stat::FireProtection => "fire_protection",
            Stat::FeatherFalling => "feather_falling",
            Stat::AbilityEvasion => "ability_evasion",
            Stat::MeleeEvasion => "melee_evasion",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Stat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::all()
            .iter()
            .copied()
            .find(|stat| stat.key() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Fixed-schema stat record. Stats an item does not define are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemStats {
    pub protection: f64,
    pub armor: f64,
    pub toughness: f64,
    pub evasion: f64,
    pub health: f64,
    pub health_percent: f64,
    pub projectile_protection: f64,
    pub blast_protection: f64,
    pub fire_protection: f64,
    pub feather_falling: f64,
    pub ability_evasion: f64,
    pub melee_evasion: f64,
}

impl ItemStats {
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Protection => self.protection,
            Stat::Armor => self.armor,
            Stat::Toughness => self.toughness,
            Stat::Evasion => self.evasion,
            Stat::Health => self.health,
            Stat::HealthPercent => self.health_percent,
            Stat::ProjectileProtection => self.projectile_protection,
            Stat::BlastProtection => self.blast_protection,
            Stat::FireProtection => self.fire_protection,
            Stat::FeatherFalling => self.feather_falling,
            Stat::AbilityEvasion => self.ability_evasion,
            Stat::MeleeEvasion => self.melee_evasion,
        }
    }

    pub fn set(&mut self, stat: Stat, value: f64) {
        let field = match stat {
            Stat::Protection => &mut self.protection,
            Stat::Armor => &mut self.armor,
            Stat::Toughness => &mut self.toughness,
            Stat::Evasion => &mut self.evasion,
            Stat::Health => &mut self.health,
            Stat::HealthPercent => &mut self.health_percent,
            Stat::ProjectileProtection => &mut self.projectile_protection,
            Stat::BlastProtection => &mut self.blast_protection,
            Stat::FireProtection => &mut self.fire_protection,
            Stat::FeatherFalling => &mut self.feather_falling,
            Stat::AbilityEvasion => &mut self.ability_evasion,
            Stat::MeleeEvasion => &mut self.melee_evasion,
        };
        *field = value;
    }

    /// Add every stat of `other` onto this record
    pub fn accumulate(&mut self, other: &ItemStats) {
        for &stat in Stat::all() {
            self.set(stat, self.get(stat) + other.get(stat));
        }
    }

    /// Builder-style setter
    pub fn with(mut self, stat: Stat, value: f64) -> Self {
        self.set(stat, value);
        self
    }
}

/// An item definition, immutable once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub slot: SlotType,
    pub name: String,
    pub stats: ItemStats,
    /// Stats outside the known vocabulary, kept for display
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, f64>,
    /// Known stats the catalog listed for this item, zeros included
    #[serde(skip)]
    pub defined: BTreeSet<Stat>,
}

impl Item {
    pub fn new(slot: SlotType, name: impl Into<String>, stats: ItemStats) -> Self {
        Item {
            slot,
            name: name.into(),
            stats,
            extra: BTreeMap::new(),
            defined: BTreeSet::new(),
        }
    }

    /// Set a known stat as listed in a catalog entry
    pub fn define(&mut self, stat: Stat, value: f64) {
        self.stats.set(stat, value);
        self.defined.insert(stat);
    }

    /// Value of a known stat (zero when undefined)
    pub fn stat(&self, stat: Stat) -> f64 {
        self.stats.get(stat)
    }

    /// Attributes as (key, value) pairs: known stats the catalog listed or
    /// that are non-zero, then extras
    pub fn attributes(&self) -> Vec<(&str, f64)> {
        let mut attrs: Vec<(&str, f64)> = Stat::all()
            .iter()
            .filter_map(|stat| {
                let value = self.stats.get(*stat);
                (value != 0.0 || self.defined.contains(stat)).then_some((stat.key(), value))
            })
            .collect();
        attrs.extend(self.extra.iter().map(|(k, v)| (k.as_str(), *v)));
        attrs
    }
}
