//! Scoring - Reduce a reduction profile to one comparable number
//!
//! Each category (protection, armor, evasion) is rescaled by the weights of
//! its sub-damage-types, the three scaled values are stacked like the
//! general ones, and the resulting effective health is the score.

mod weights;

pub use weights::{ScalingMode, ScalingWeights};

use crate::reduction::{clamp_fraction, combined_reduction, ReductionProfile};
use crate::types::Category;
use serde::{Deserialize, Serialize};

/// A reduction profile annotated with its weighted values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredProfile {
    pub profile: ReductionProfile,
    pub scaled_protection: f64,
    pub scaled_armor: f64,
    pub scaled_evasion: f64,
    /// Scaled categories stacked multiplicatively
    pub scaled_reduction: f64,
    /// Effective health at the scaled reduction; the ranking key
    pub scaled_effective_health: f64,
}

impl ScoredProfile {
    /// The ranking key
    pub fn score(&self) -> f64 {
        self.scaled_effective_health
    }

    pub fn scaled_category(&self, category: Category) -> f64 {
        match category {
            Category::Protection => self.scaled_protection,
            Category::Armor => self.scaled_armor,
            Category::Evasion => self.scaled_evasion,
        }
    }
}

/// Applies one weighting scheme to reduction profiles
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScalingWeights,
    mode: ScalingMode,
}

impl Scorer {
    pub fn new(weights: ScalingWeights, mode: ScalingMode) -> Self {
        Scorer { weights, mode }
    }

    pub fn weights(&self) -> &ScalingWeights {
        &self.weights
    }

    pub fn mode(&self) -> ScalingMode {
        self.mode
    }

    /// Weighted reduction of a single category
    pub fn scale_category(&self, profile: &ReductionProfile, category: Category) -> f64 {
        let general = profile.category(category);

        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        for &damage_type in category.sub_types() {
            // Zero weights count as unset
            if let Some(weight) = self.weights.get(damage_type).filter(|w| *w > 0.0) {
                weighted_sum += profile.specialized(damage_type) * weight;
                total_weight += weight;
            }
        }

        let scaled = match self.mode {
            ScalingMode::Normalized if total_weight == 0.0 => general,
            ScalingMode::Normalized => weighted_sum / f64::max(total_weight, 1.0),
            ScalingMode::Remainder => weighted_sum + general * (1.0 - total_weight),
        };

        clamp_fraction(scaled)
    }

    /// Score a profile
    pub fn score(&self, profile: &ReductionProfile) -> ScoredProfile {
        let scaled_protection = self.scale_category(profile, Category::Protection);
        let scaled_armor = self.scale_category(profile, Category::Armor);
        let scaled_evasion = self.scale_category(profile, Category::Evasion);

        let scaled_reduction =
            combined_reduction([scaled_protection, scaled_armor, scaled_evasion]);

        ScoredProfile {
            profile: *profile,
            scaled_protection,
            scaled_armor,
            scaled_evasion,
            scaled_reduction,
            scaled_effective_health: profile.effective_health_at(scaled_reduction),
        }
    }
}

/// Score a profile under the default (normalized) scaling mode
pub fn score(profile: &ReductionProfile, weights: &ScalingWeights) -> ScoredProfile {
    Scorer::new(weights.clone(), ScalingMode::default()).score(profile)
}
