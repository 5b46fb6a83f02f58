//! Optimizer - Evaluate every loadout and keep the best
//!
//! A single-use state machine: `Idle -> Enumerating -> Ranking -> Done`.
//! Enumeration walks the full cross-product of slot candidates with no
//! pruning. With more than one worker the index range is split into
//! contiguous shards, each keeping its own top-K, merged by one reducer.

use super::combinations::{search_space, Combinations};
use super::ranking::TopK;
use super::{CancelToken, RankedResult, SearchError, SearchOutcome};
use crate::catalog::{Catalog, ItemStats};
use crate::config::SearchConfig;
use crate::filter::{build_candidates, SlotCandidates};
use crate::loadout::Loadout;
use crate::reduction::ReductionCalculator;
use crate::scoring::Scorer;
use std::ops::Range;
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

/// Combinations evaluated between cancellation checks
const CANCEL_POLL_INTERVAL: u64 = 4096;

/// Below this many combinations per worker, sharding is not worth it
const MIN_SHARD_SIZE: u64 = 8192;

/// Lifecycle of an optimizer run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Enumerating,
    Ranking,
    Done,
}

/// Exhaustive loadout search over one catalog and configuration
pub struct Optimizer<'a> {
    candidates: Vec<SlotCandidates<'a>>,
    calculator: ReductionCalculator,
    scorer: Scorer,
    display_num: usize,
    threads: usize,
    cancel: CancelToken,
    phase: SearchPhase,
}

impl<'a> Optimizer<'a> {
    /// Prepare a search: validate the config, filter candidates per slot
    /// and fix the scoring
    pub fn new(catalog: &'a Catalog, config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let candidates = build_candidates(
            catalog,
            &config.item_types,
            &config.item_filter(),
            config.skip_weapon,
        );

        Ok(Optimizer {
            candidates,
            calculator: ReductionCalculator::new(config.expected_damage),
            scorer: config.scorer(),
            display_num: config.display_num,
            threads: config.worker_threads(),
            cancel: CancelToken::new(),
            phase: SearchPhase::Idle,
        })
    }

    /// Use an externally owned abort hook
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Handle that aborts this search when cancelled
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Per-slot candidate lists, in enumeration order
    pub fn candidates(&self) -> &[SlotCandidates<'a>] {
        &self.candidates
    }

    /// Number of combinations the search will evaluate
    pub fn search_space(&self) -> Result<u64, SearchError> {
        search_space(&self.candidates).ok_or(SearchError::SearchSpaceOverflow)
    }

    /// Run the search. An optimizer runs at most once.
    pub fn run(&mut self) -> Result<SearchOutcome<'a>, SearchError> {
        if self.phase != SearchPhase::Idle {
            return Err(SearchError::AlreadyRun);
        }
        let total = self.search_space()?;

        self.set_phase(SearchPhase::Enumerating);
        let started = Instant::now();
        info!(
            combinations = total,
            slots = self.candidates.len(),
            threads = self.threads,
            "starting loadout search"
        );

        let enumerated = self.enumerate(total);
        let (top, evaluated) = match enumerated {
            Ok(found) => found,
            Err(err) => {
                self.set_phase(SearchPhase::Done);
                return Err(err);
            }
        };

        self.set_phase(SearchPhase::Ranking);
        let results = top.into_sorted_vec();
        self.set_phase(SearchPhase::Done);

        info!(
            evaluated,
            kept = results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "loadout search finished"
        );

        Ok(SearchOutcome {
            results,
            evaluated,
            slots: self
                .candidates
                .iter()
                .map(|c| (c.slot, c.items.len()))
                .collect(),
        })
    }

    fn set_phase(&mut self, phase: SearchPhase) {
        debug!(from = ?self.phase, to = ?phase, "search phase");
        self.phase = phase;
    }

    fn enumerate(&self, total: u64) -> Result<(TopK<RankedResult<'a>>, u64), SearchError> {
        let workers = self.threads.max(1) as u64;
        if workers == 1 || total < MIN_SHARD_SIZE * 2 {
            return self.evaluate_range(0..total);
        }

        let workers = workers.min(total / MIN_SHARD_SIZE).max(1);
        let shard_len = total.div_ceil(workers);
        let shards: Vec<Range<u64>> = (0..workers)
            .map(|i| (i * shard_len)..((i + 1) * shard_len).min(total))
            .filter(|r| !r.is_empty())
            .collect();
        debug!(shards = shards.len(), shard_len, "sharding search");

        let partials: Vec<Result<(TopK<RankedResult<'a>>, u64), SearchError>> =
            thread::scope(|scope| {
                let handles: Vec<_> = shards
                    .into_iter()
                    .map(|range| scope.spawn(move || self.evaluate_range(range)))
                    .collect();
                handles
                    .into_iter()
                    .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                    .collect()
            });

        let mut top = TopK::new(self.display_num);
        let mut evaluated = 0u64;
        let mut cancelled = false;
        for partial in partials {
            match partial {
                Ok((shard_top, count)) => {
                    evaluated += count;
                    top.merge(shard_top);
                }
                Err(SearchError::Cancelled { evaluated: count }) => {
                    evaluated += count;
                    cancelled = true;
                }
                Err(err) => return Err(err),
            }
        }

        if cancelled {
            return Err(SearchError::Cancelled { evaluated });
        }
        Ok((top, evaluated))
    }

    /// Evaluate one contiguous shard of the cross-product
    fn evaluate_range(
        &self,
        range: Range<u64>,
    ) -> Result<(TopK<RankedResult<'a>>, u64), SearchError> {
        let mut top = TopK::new(self.display_num);
        let mut evaluated = 0u64;
        let mut cursor = Combinations::new(&self.candidates, range);

        while let Some(index) = cursor.advance() {
            if evaluated % CANCEL_POLL_INTERVAL == 0 && self.cancel.is_cancelled() {
                return Err(SearchError::Cancelled { evaluated });
            }

            let mut totals = ItemStats::default();
            for item in cursor.items() {
                totals.accumulate(&item.stats);
            }

            let profile = self.calculator.profile_from_totals(&totals);
            let scored = self.scorer.score(&profile);
            evaluated += 1;

            if top.accepts(scored.score(), index) {
                let loadout = Loadout::from_distinct(cursor.items().collect());
                top.push(
                    scored.score(),
                    index,
                    RankedResult {
                        index,
                        loadout,
                        scored,
                    },
                );
            }
        }

        Ok((top, evaluated))
    }
}

/// Build an optimizer for `config` and run it
pub fn optimize<'a>(
    catalog: &'a Catalog,
    config: &SearchConfig,
) -> Result<SearchOutcome<'a>, SearchError> {
    Optimizer::new(catalog, config)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Item, Stat};
    use crate::config::ConfigError;
    use crate::types::SlotType;

    fn boots_catalog() -> Catalog {
        Catalog::new()
            .with_item(Item::new(
                SlotType::Boots,
                "boots_a",
                ItemStats::default().with(Stat::Protection, 5.0),
            ))
            .with_item(Item::new(
                SlotType::Boots,
                "boots_b",
                ItemStats::default().with(Stat::Protection, 10.0),
            ))
    }

    fn boots_config(display_num: usize) -> SearchConfig {
        SearchConfig {
            item_types: vec![SlotType::Boots],
            display_num,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_phases() {
        let catalog = boots_catalog();
        let mut optimizer = Optimizer::new(&catalog, &boots_config(2)).unwrap();
        assert_eq!(optimizer.phase(), SearchPhase::Idle);

        optimizer.run().unwrap();
        assert_eq!(optimizer.phase(), SearchPhase::Done);
    }

    #[test]
    fn test_single_use() {
        let catalog = boots_catalog();
        let mut optimizer = Optimizer::new(&catalog, &boots_config(2)).unwrap();
        optimizer.run().unwrap();
        assert!(matches!(optimizer.run(), Err(SearchError::AlreadyRun)));
    }

    #[test]
    fn test_best_last() {
        let catalog = boots_catalog();
        let outcome = optimize(&catalog, &boots_config(2)).unwrap();
        assert_eq!(outcome.evaluated, 2);
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].loadout.items()[0].name, "boots_a");
        assert_eq!(outcome.best().unwrap().loadout.items()[0].name, "boots_b");
    }

    #[test]
    fn test_cancelled_before_start() {
        let catalog = boots_catalog();
        let token = CancelToken::new();
        token.cancel();
        let mut optimizer = Optimizer::new(&catalog, &boots_config(2))
            .unwrap()
            .with_cancel_token(token);
        let result = optimizer.run();
        assert!(matches!(result, Err(SearchError::Cancelled { evaluated: 0 })));
        assert_eq!(optimizer.phase(), SearchPhase::Done);
    }

    #[test]
    fn test_no_searchable_slots_evaluates_empty_loadout() {
        let catalog = boots_catalog();
        let config = SearchConfig {
            item_types: vec![SlotType::Weapon],
            ..SearchConfig::default()
        };
        let outcome = optimize(&catalog, &config).unwrap();
        assert_eq!(outcome.evaluated, 1);
        assert!(outcome.results[0].loadout.is_empty());
        assert!((outcome.results[0].score() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_config_rejected_before_search() {
        let catalog = boots_catalog();
        let config = SearchConfig {
            display_num: 0,
            ..boots_config(2)
        };
        let result = optimize(&catalog, &config);
        assert!(matches!(
            result,
            Err(SearchError::InvalidConfig(ConfigError::ValidationError(_)))
        ));

        let config = SearchConfig {
            expected_damage: -50.0,
            ..boots_config(2)
        };
        assert!(matches!(
            Optimizer::new(&catalog, &config),
            Err(SearchError::InvalidConfig(_))
        ));
    }
}
