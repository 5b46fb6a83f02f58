//! Run configuration for a loadout search

use super::ConfigError;
use crate::filter::ItemFilter;
use crate::reduction::constants::DEFAULT_EXPECTED_DAMAGE;
use crate::scoring::{ScalingMode, ScalingWeights, Scorer};
use crate::types::SlotType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Item tier: a numeric level or a rarity name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tier {
    Level(u32),
    Name(String),
}

impl From<&str> for Tier {
    fn from(value: &str) -> Self {
        match value.trim().parse() {
            Ok(level) => Tier::Level(level),
            Err(_) => Tier::Name(value.trim().to_string()),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Level(level) => write!(f, "{}", level),
            Tier::Name(name) => f.write_str(name),
        }
    }
}

/// Tunable search options. Every field has a default, so an empty TOML
/// file is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Only these items are searched (per slot, see the filter fallback)
    pub whitelist: Option<Vec<String>>,
    /// Items never searched
    pub blacklist: Vec<String>,
    /// Slots searched, in enumeration order
    pub item_types: Vec<SlotType>,
    /// Accepted but not enforced; catalogs carry no tier data yet
    pub item_tiers: Vec<Tier>,
    /// Weight per damage type
    pub scaling: ScalingWeights,
    pub scaling_mode: ScalingMode,
    /// Worst-case incoming hit for the armor formula
    pub expected_damage: f64,
    /// Leave the main-hand weapon slot out of the search
    pub skip_weapon: bool,
    /// Number of ranked loadouts kept
    pub display_num: usize,
    /// Print raw item attributes with results
    pub verbose: bool,
    /// Worker threads; 0 uses every available core
    pub threads: usize,
    /// Reject catalog stats outside the known vocabulary
    pub strict_stats: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            whitelist: None,
            blacklist: Vec::new(),
            item_types: SlotType::all().to_vec(),
            item_tiers: default_item_tiers(),
            scaling: ScalingWeights::new(),
            scaling_mode: ScalingMode::default(),
            expected_damage: DEFAULT_EXPECTED_DAMAGE,
            skip_weapon: true,
            display_num: 5,
            verbose: true,
            threads: 1,
            strict_stats: false,
        }
    }
}

fn default_item_tiers() -> Vec<Tier> {
    let levels = (1..=5).map(Tier::Level);
    let names = ["uncommon", "unique", "rare", "artifact", "relic", "epic"]
        .into_iter()
        .map(Tier::from);
    levels.chain(names).collect()
}

impl SearchConfig {
    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: SearchConfig = super::load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML config string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = super::parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.expected_damage.is_finite() || self.expected_damage < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "expected_damage must be a non-negative number, got {}",
                self.expected_damage
            )));
        }
        if self.display_num == 0 {
            return Err(ConfigError::ValidationError(
                "display_num must be at least 1".to_string(),
            ));
        }
        if !self.item_tiers.is_empty() {
            debug!(tiers = ?self.item_tiers, "item tiers are not enforced");
        }
        Ok(())
    }

    /// Whitelist/blacklist rules of this config
    pub fn item_filter(&self) -> ItemFilter {
        ItemFilter::new(self.whitelist.clone(), self.blacklist.clone())
    }

    /// Scorer for this config's weights and mode
    pub fn scorer(&self) -> Scorer {
        Scorer::new(self.scaling.clone(), self.scaling_mode)
    }

    /// Effective worker count
    pub fn worker_threads(&self) -> usize {
        match self.threads {
            0 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            n => n,
        }
    }
}
