//! ScalingWeights - User weighting of narrow damage types

use crate::config::ConfigError;
use crate::types::DamageType;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// How sub-type weights combine with a category's general reduction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMode {
    /// Weighted sub-type reductions divided by `max(Σ weights, 1)`. A category
    /// with no weighted sub-type uses its general reduction.
    #[default]
    Normalized,
    /// Weighted sub-type reductions plus the general reduction weighted by
    /// whatever is left of 1.
    Remainder,
}

/// Weight in `[0, 1]` per damage type. Unlisted types have no weight.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>")]
pub struct ScalingWeights {
    weights: BTreeMap<DamageType, f64>,
}

impl ScalingWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a weight, rejecting values outside `[0, 1]`
    pub fn set(&mut self, damage_type: DamageType, weight: f64) -> Result<(), ConfigError> {
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(ConfigError::InvalidWeight(format!(
                "{}={} (weights must be within 0..=1)",
                damage_type, weight
            )));
        }
        self.weights.insert(damage_type, weight);
        Ok(())
    }

    /// Builder-style [`ScalingWeights::set`]
    pub fn with(mut self, damage_type: DamageType, weight: f64) -> Result<Self, ConfigError> {
        self.set(damage_type, weight)?;
        Ok(self)
    }

    /// Parse and apply one `key=value` entry, as given on the command line
    pub fn parse_entry(&mut self, entry: &str) -> Result<(), ConfigError> {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidWeight(format!("'{}' is not key=value", entry)))?;
        let damage_type: DamageType = key
            .trim()
            .parse()
            .map_err(ConfigError::UnknownDamageType)?;
        let weight: f64 = value.trim().parse().map_err(|_| {
            ConfigError::InvalidWeight(format!("'{}' is not a number in '{}'", value, entry))
        })?;
        self.set(damage_type, weight)
    }

    /// Weight of a damage type, if one was given
    pub fn get(&self, damage_type: DamageType) -> Option<f64> {
        self.weights.get(&damage_type).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DamageType, f64)> + '_ {
        self.weights.iter().map(|(dt, w)| (*dt, *w))
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Overlay another set of weights on top of this one
    pub fn merge(&mut self, other: &ScalingWeights) {
        self.weights.extend(other.weights.iter().map(|(dt, w)| (*dt, *w)));
    }
}

impl TryFrom<BTreeMap<String, f64>> for ScalingWeights {
    type Error = ConfigError;

    fn try_from(raw: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut weights = ScalingWeights::new();
        for (key, weight) in raw {
            let damage_type: DamageType = key.parse().map_err(ConfigError::UnknownDamageType)?;
            weights.set(damage_type, weight)?;
        }
        Ok(weights)
    }
}

impl Serialize for ScalingWeights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.weights.iter().map(|(dt, w)| (dt.as_str(), w)))
    }
}
