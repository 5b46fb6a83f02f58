//! Damage reduction - Protection, Armor, Evasion and effective health
//!
//! Every function here is pure. Reductions are fractions of incoming damage
//! removed, capped below 1 so effective health stays finite.

mod armor;
mod evasion;
mod health;
mod profile;
mod protection;

pub use armor::armor_reduction;
pub use evasion::{evasion_reduction, specialized_evasion};
pub use health::{clamp_fraction, combined_reduction, effective_health};
pub use profile::{ReductionCalculator, ReductionProfile};
pub use protection::{protection_reduction, specialized_protection};

/// Reduction formula constants
pub mod constants {
    /// Highest fraction any single defensive layer can remove
    pub const REDUCTION_CAP: f64 = 0.8;

    /// Reduction per point of protection
    pub const PROTECTION_PER_POINT: f64 = 0.04;

    /// Specialized protection/evasion points count this many times
    pub const SPECIALIZED_MULTIPLIER: f64 = 2.0;

    /// Effective armor points are capped here
    pub const ARMOR_POINT_CAP: f64 = 20.0;

    /// Effective armor points are divided by this to get a fraction
    pub const ARMOR_POINT_DIVISOR: f64 = 25.0;

    /// Minimum effective armor is armor / ARMOR_FLOOR_DIVISOR
    pub const ARMOR_FLOOR_DIVISOR: f64 = 5.0;

    /// Toughness term: damage / (TOUGHNESS_BASE + toughness / TOUGHNESS_DIVISOR)
    pub const TOUGHNESS_BASE: f64 = 2.0;
    pub const TOUGHNESS_DIVISOR: f64 = 4.0;

    /// Evasion counts in whole steps of this many points
    pub const EVASION_STEP: f64 = 5.0;

    /// Reduction per whole evasion step
    pub const EVASION_PER_STEP: f64 = 0.2;

    /// Health of an unequipped player
    pub const BASE_HEALTH: f64 = 20.0;

    /// Default worst-case incoming hit used by the armor formula
    pub const DEFAULT_EXPECTED_DAMAGE: f64 = 20.0;
}
