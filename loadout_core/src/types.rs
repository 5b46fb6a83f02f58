//! Core types shared by the catalog, calculator and scorer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Equipment slot an item occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotType {
    Boots,
    Legs,
    Chest,
    Head,
    Offhand,
    Weapon,
}

impl SlotType {
    /// Get all equipment slots in their default search order
    pub fn all() -> &'static [SlotType] {
        &[
            SlotType::Boots,
            SlotType::Legs,
            SlotType::Chest,
            SlotType::Head,
            SlotType::Offhand,
            SlotType::Weapon,
        ]
    }

    /// Name used in catalogs and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotType::Boots => "boots",
            SlotType::Legs => "legs",
            SlotType::Chest => "chest",
            SlotType::Head => "head",
            SlotType::Offhand => "offhand",
            SlotType::Weapon => "weapon",
        }
    }

    /// The main-hand slot, dropped from the search when weapons are skipped
    pub fn is_weapon(&self) -> bool {
        matches!(self, SlotType::Weapon)
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotType::all()
            .iter()
            .copied()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Narrow damage type a user can weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Projectile,
    Blast,
    Fire,
    #[serde(alias = "fall")]
    FeatherFalling,
    Ability,
    Melee,
}

impl DamageType {
    pub fn all() -> &'static [DamageType] {
        &[
            DamageType::Projectile,
            DamageType::Blast,
            DamageType::Fire,
            DamageType::FeatherFalling,
            DamageType::Ability,
            DamageType::Melee,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DamageType::Projectile => "projectile",
            DamageType::Blast => "blast",
            DamageType::Fire => "fire",
            DamageType::FeatherFalling => "feather_falling",
            DamageType::Ability => "ability",
            DamageType::Melee => "melee",
        }
    }

    /// Category whose general reduction this type specializes
    pub fn category(&self) -> Category {
        match self {
            DamageType::Projectile
            | DamageType::Blast
            | DamageType::Fire
            | DamageType::FeatherFalling => Category::Protection,
            DamageType::Ability | DamageType::Melee => Category::Evasion,
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DamageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "fall" {
            return Ok(DamageType::FeatherFalling);
        }
        DamageType::all()
            .iter()
            .copied()
            .find(|dt| dt.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Independent defensive axis, combined multiplicatively with the others
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Protection,
    Armor,
    Evasion,
}

/// Category -> sub-damage-type membership table
const CATEGORY_TABLE: &[(Category, &[DamageType])] = &[
    (
        Category::Protection,
        &[
            DamageType::Projectile,
            DamageType::Blast,
            DamageType::Fire,
            DamageType::FeatherFalling,
        ],
    ),
    (Category::Armor, &[]),
    (Category::Evasion, &[DamageType::Ability, DamageType::Melee]),
];

impl Category {
    pub fn all() -> &'static [Category] {
        &[Category::Protection, Category::Armor, Category::Evasion]
    }

    /// Damage types that specialize this category
    pub fn sub_types(&self) -> &'static [DamageType] {
        CATEGORY_TABLE
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, types)| *types)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Protection => write!(f, "protection"),
            Category::Armor => write!(f, "armor"),
            Category::Evasion => write!(f, "evasion"),
        }
    }
}
