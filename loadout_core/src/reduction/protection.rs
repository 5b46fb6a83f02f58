//! Protection - Flat percentage reduction with a hard cap

use super::constants::{PROTECTION_PER_POINT, REDUCTION_CAP, SPECIALIZED_MULTIPLIER};

/// Reduction from summed protection: `min(protection * 0.04, 0.8)`
pub fn protection_reduction(protection: f64) -> f64 {
    (protection * PROTECTION_PER_POINT).min(REDUCTION_CAP)
}

/// Reduction against one damage type with type-specific protection.
///
/// Specialized points count double on top of general protection, then go
/// through the same capped curve.
pub fn specialized_protection(protection: f64, specialized: f64) -> f64 {
    protection_reduction(protection + specialized * SPECIALIZED_MULTIPLIER)
}
