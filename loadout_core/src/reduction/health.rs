//! Stacking reductions and effective health

use super::constants::{BASE_HEALTH, REDUCTION_CAP};

/// Stack independent reductions multiplicatively: `1 - Π(1 - f)`.
///
/// Returns 0 for no inputs.
pub fn combined_reduction<I>(fractions: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let taken: f64 = fractions.into_iter().map(|f| 1.0 - f).product();
    1.0 - taken
}

/// Clamp a reduction into `[0, REDUCTION_CAP]` before it is stacked
pub fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        return 0.0;
    }
    fraction.clamp(0.0, REDUCTION_CAP)
}

/// Raw damage absorbed before death:
/// `(20 + health) * (1 + health_percent) / (1 - reduction)`
///
/// `reduction` must be below 1; at exactly 1 the result is infinite.
pub fn effective_health(reduction: f64, health: f64, health_percent: f64) -> f64 {
    (BASE_HEALTH + health) * (1.0 + health_percent) / (1.0 - reduction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_is_zero() {
        assert!((combined_reduction(std::iter::empty()) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_is_identity() {
        assert!((combined_reduction([0.35]) - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_multiplicative_stacking() {
        // 1 - 0.5 * 0.5 = 0.75, not 1.0
        assert!((combined_reduction([0.5, 0.5]) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_fraction() {
        assert!((clamp_fraction(-0.3) - 0.0).abs() < f64::EPSILON);
        assert!((clamp_fraction(0.95) - REDUCTION_CAP).abs() < f64::EPSILON);
        assert!((clamp_fraction(0.5) - 0.5).abs() < f64::EPSILON);
        assert!((clamp_fraction(f64::NAN) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_effective_health_unequipped() {
        assert!((effective_health(0.0, 0.0, 0.0) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_effective_health_scaling() {
        // (20 + 4) * 1.5 / (1 - 0.5) = 72
        assert!((effective_health(0.5, 4.0, 0.5) - 72.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_single_argument(f in 0.0f64..=0.8) {
            prop_assert!((combined_reduction([f]) - f).abs() < 1e-12);
        }

        #[test]
        fn prop_commutative(a in 0.0f64..=0.8, b in 0.0f64..=0.8, c in 0.0f64..=0.8) {
            let abc = combined_reduction([a, b, c]);
            let cba = combined_reduction([c, b, a]);
            let bac = combined_reduction([b, a, c]);
            prop_assert!((abc - cba).abs() < 1e-12);
            prop_assert!((abc - bac).abs() < 1e-12);
        }

        #[test]
        fn prop_associative(a in 0.0f64..=0.8, b in 0.0f64..=0.8, c in 0.0f64..=0.8) {
            let left = combined_reduction([combined_reduction([a, b]), c]);
            let right = combined_reduction([a, combined_reduction([b, c])]);
            prop_assert!((left - right).abs() < 1e-12);
        }

        #[test]
        fn prop_stays_below_one(fs in proptest::collection::vec(0.0f64..=0.8, 0..12)) {
            let combined = combined_reduction(fs);
            prop_assert!(combined < 1.0);
            prop_assert!(effective_health(combined, 0.0, 0.0).is_finite());
        }
    }
}
