//! RankedResult - One evaluated loadout and its scores

use crate::loadout::Loadout;
use crate::reduction::ReductionProfile;
use crate::scoring::ScoredProfile;
use crate::types::SlotType;
use serde::Serialize;

/// An evaluated loadout kept among the best results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult<'a> {
    /// Position in the cross-product enumeration
    pub index: u64,
    pub loadout: Loadout<'a>,
    pub scored: ScoredProfile,
}

impl<'a> RankedResult<'a> {
    /// Ranking key: the scaled effective health
    pub fn score(&self) -> f64 {
        self.scored.score()
    }

    pub fn profile(&self) -> &ReductionProfile {
        &self.scored.profile
    }

    pub fn scaled_effective_health(&self) -> f64 {
        self.scored.scaled_effective_health
    }

    pub fn scaled_reduction(&self) -> f64 {
        self.scored.scaled_reduction
    }

    pub fn true_effective_health(&self) -> f64 {
        self.scored.profile.true_effective_health
    }

    pub fn true_reduction(&self) -> f64 {
        self.scored.profile.general
    }

    /// Chosen item name per slot, in search order
    pub fn item_names(&self) -> Vec<(SlotType, &'a str)> {
        self.loadout
            .iter()
            .map(|(slot, item)| (slot, item.name.as_str()))
            .collect()
    }
}

/// Everything a finished search reports
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome<'a> {
    /// Best loadouts, ascending by score (best last)
    pub results: Vec<RankedResult<'a>>,
    /// Combinations evaluated
    pub evaluated: u64,
    /// Candidate count per searched slot
    pub slots: Vec<(SlotType, usize)>,
}

impl<'a> SearchOutcome<'a> {
    /// The highest-scoring loadout
    pub fn best(&self) -> Option<&RankedResult<'a>> {
        self.results.last()
    }
}
