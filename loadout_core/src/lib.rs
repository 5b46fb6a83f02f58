//! loadout_core - Exhaustive equipment loadout search
//!
//! This library provides:
//! - Catalog: Item definitions loaded from JSON, indexed by slot
//! - ItemFilter: Whitelist/blacklist rules producing per-slot candidates
//! - ReductionCalculator: Protection, armor and evasion reductions and
//!   effective health for a loadout
//! - Scorer: User-weighted reduction of a profile to one score
//! - Optimizer: Cross-product enumeration keeping the top-K loadouts
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use loadout_core::prelude::*;
//!
//! let catalog = Catalog::load(Path::new("items.json"), false)?;
//! let config = SearchConfig::default();
//! let outcome = optimize(&catalog, &config)?;
//! if let Some(best) = outcome.best() {
//!     println!("Scaled effective health: {}", best.scaled_effective_health());
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod filter;
pub mod loadout;
pub mod prelude;
pub mod reduction;
pub mod scoring;
pub mod search;
pub mod types;

// Core API - what most users need
pub use catalog::{Catalog, DataFormatError, Item, ItemStats, Stat};
pub use config::{ConfigError, SearchConfig, Tier};
pub use loadout::Loadout;
pub use reduction::{ReductionCalculator, ReductionProfile};
pub use scoring::{ScalingMode, ScalingWeights, ScoredProfile, Scorer};
pub use search::{optimize, CancelToken, Optimizer, RankedResult, SearchError, SearchOutcome};
pub use types::{Category, DamageType, SlotType};
