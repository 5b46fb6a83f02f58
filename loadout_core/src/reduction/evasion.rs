//! Evasion - Step-wise reduction in whole increments of 5 points

use super::constants::{EVASION_PER_STEP, EVASION_STEP, REDUCTION_CAP, SPECIALIZED_MULTIPLIER};

/// Reduction from summed evasion: `min(floor(evasion / 5) * 0.2, 0.8)`
///
/// Constant on every interval `[5k, 5k + 5)`.
pub fn evasion_reduction(evasion: f64) -> f64 {
    ((evasion / EVASION_STEP).floor() * EVASION_PER_STEP).min(REDUCTION_CAP)
}

/// Reduction against one damage type with type-specific evasion
pub fn specialized_evasion(evasion: f64, specialized: f64) -> f64 {
    evasion_reduction(evasion + specialized * SPECIALIZED_MULTIPLIER)
}
