//! Armor - Reduction against a worst-case hit, softened by toughness

use super::constants::{
    ARMOR_FLOOR_DIVISOR, ARMOR_POINT_CAP, ARMOR_POINT_DIVISOR, TOUGHNESS_BASE, TOUGHNESS_DIVISOR,
};

/// Reduction from summed armor and toughness against `expected_damage`
///
/// `min(20, max(armor / 5, armor - damage / (2 + toughness / 4))) / 25`
///
/// A fifth of the armor always counts, whatever the hit.
pub fn armor_reduction(armor: f64, toughness: f64, expected_damage: f64) -> f64 {
    let floor = armor / ARMOR_FLOOR_DIVISOR;
    let against_hit = armor - expected_damage / (TOUGHNESS_BASE + toughness / TOUGHNESS_DIVISOR);
    floor.max(against_hit).min(ARMOR_POINT_CAP) / ARMOR_POINT_DIVISOR
}
