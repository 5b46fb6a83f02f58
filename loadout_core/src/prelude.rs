//! Prelude module for convenient imports
//!
//! ```rust
//! use loadout_core::prelude::*;
//! ```

// Core types
pub use crate::catalog::{Catalog, Item, ItemStats, Stat};
pub use crate::loadout::Loadout;
pub use crate::types::{Category, DamageType, SlotType};

// Calculation
pub use crate::reduction::{ReductionCalculator, ReductionProfile};
pub use crate::scoring::{ScalingMode, ScalingWeights, ScoredProfile, Scorer};

// Search
pub use crate::filter::ItemFilter;
pub use crate::search::{optimize, CancelToken, Optimizer, RankedResult, SearchOutcome};

// Config
pub use crate::config::SearchConfig;
