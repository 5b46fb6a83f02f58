//! Integration tests: load catalog -> filter -> search -> rank

use loadout_core::prelude::*;
use loadout_core::{ConfigError, DataFormatError, SearchError};
use std::io::Write;

fn write_catalog(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn names(result: &RankedResult<'_>) -> Vec<String> {
    result
        .item_names()
        .into_iter()
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Deterministic catalog with `per_slot` items in each of the first `slots` slots
fn synthetic_catalog(slots: usize, per_slot: usize) -> Catalog {
    let mut catalog = Catalog::new();
    for (s, slot) in SlotType::all().iter().take(slots).enumerate() {
        for i in 0..per_slot {
            let seed = (s * 31 + i * 17) % 23;
            let stats = ItemStats::default()
                .with(Stat::Protection, (seed % 5) as f64)
                .with(Stat::Armor, (seed % 7) as f64 * 1.5)
                .with(Stat::Toughness, (seed % 3) as f64)
                .with(Stat::Evasion, (seed % 4) as f64)
                .with(Stat::Health, (seed % 2) as f64)
                .with(Stat::FireProtection, (seed % 6) as f64)
                .with(Stat::MeleeEvasion, (i % 3) as f64);
            catalog.insert(Item::new(*slot, format!("{}_{}", slot, i), stats));
        }
    }
    catalog
}

#[test]
fn test_boots_scenario_from_file() {
    let file = write_catalog(
        r#"{ "boots": { "boots_a": { "protection": 5 }, "boots_b": { "protection": 10 } } }"#,
    );
    let catalog = Catalog::load(file.path(), false).unwrap();

    let config = SearchConfig {
        item_types: vec![SlotType::Boots],
        skip_weapon: true,
        expected_damage: 20.0,
        display_num: 2,
        ..SearchConfig::default()
    };
    let outcome = optimize(&catalog, &config).unwrap();

    assert_eq!(outcome.evaluated, 2);
    assert_eq!(outcome.results.len(), 2);
    assert_eq!(names(&outcome.results[0]), vec!["boots_a"]);
    assert_eq!(names(&outcome.results[1]), vec!["boots_b"]);

    // 20 / (1 - 0.4) vs 20 / (1 - 0.2)
    let best = outcome.best().unwrap();
    assert!((best.scaled_effective_health() - 20.0 / 0.6).abs() < 1e-9);
    assert!((best.true_effective_health() - 20.0 / 0.6).abs() < 1e-9);
    assert!((best.true_reduction() - 0.4).abs() < 1e-12);
    assert!((outcome.results[0].scaled_effective_health() - 25.0).abs() < 1e-9);
}

#[test]
fn test_malformed_catalog_fails_before_search() {
    let file = write_catalog(r#"{ "boots": ["boots_a", "boots_b"] }"#);
    let result = Catalog::load(file.path(), false);
    assert!(matches!(result, Err(DataFormatError::NotAMapping { .. })));
}

#[test]
fn test_missing_catalog_file() {
    let result = Catalog::load(std::path::Path::new("/nonexistent/items.json"), false);
    assert!(matches!(result, Err(DataFormatError::Io { .. })));
}

#[test]
fn test_top_k_ascending_best_last() {
    let catalog = synthetic_catalog(3, 6);
    let config = SearchConfig {
        item_types: vec![SlotType::Boots, SlotType::Legs, SlotType::Chest],
        display_num: 4,
        ..SearchConfig::default()
    };

    let outcome = optimize(&catalog, &config).unwrap();
    assert_eq!(outcome.evaluated, 216);
    assert_eq!(outcome.results.len(), 4);
    for pair in outcome.results.windows(2) {
        assert!(pair[0].score() <= pair[1].score());
    }

    // The last result is the global maximum
    let everything = optimize(
        &catalog,
        &SearchConfig {
            display_num: 1000,
            ..config.clone()
        },
    )
    .unwrap();
    assert_eq!(everything.results.len(), 216);
    let max = everything
        .results
        .iter()
        .map(|r| r.score())
        .fold(f64::MIN, f64::max);
    assert!((outcome.best().unwrap().score() - max).abs() < f64::EPSILON);
    assert_eq!(
        outcome.best().unwrap().index,
        everything.best().unwrap().index
    );
}

#[test]
fn test_every_loadout_has_one_item_per_searched_slot() {
    let catalog = synthetic_catalog(4, 3);
    let config = SearchConfig {
        display_num: 81,
        ..SearchConfig::default()
    };
    let outcome = optimize(&catalog, &config).unwrap();
    assert_eq!(outcome.evaluated, 81);

    for result in &outcome.results {
        let slots: Vec<SlotType> = result.loadout.iter().map(|(slot, _)| slot).collect();
        assert_eq!(
            slots,
            vec![SlotType::Boots, SlotType::Legs, SlotType::Chest, SlotType::Head]
        );
    }
}

#[test]
fn test_whitelist_miss_keeps_slot() {
    let catalog = synthetic_catalog(2, 3);
    let config = SearchConfig {
        whitelist: Some(vec!["nonexistent_item".to_string(), "boots_1".to_string()]),
        blacklist: vec!["legs_0".to_string()],
        item_types: vec![SlotType::Boots, SlotType::Legs],
        display_num: 10,
        ..SearchConfig::default()
    };

    let outcome = optimize(&catalog, &config).unwrap();
    // boots: whitelisted boots_1 only; legs: whitelist inapplicable, minus blacklist
    assert_eq!(outcome.slots, vec![(SlotType::Boots, 1), (SlotType::Legs, 2)]);
    assert_eq!(outcome.evaluated, 2);
    for result in &outcome.results {
        assert_eq!(result.loadout.get(SlotType::Boots).unwrap().name, "boots_1");
        assert_ne!(result.loadout.get(SlotType::Legs).unwrap().name, "legs_0");
    }
}

#[test]
fn test_weapon_skipped_by_default() {
    let catalog = synthetic_catalog(6, 2);
    let outcome = optimize(&catalog, &SearchConfig::default()).unwrap();
    assert_eq!(outcome.evaluated, 32);
    assert!(outcome
        .results
        .iter()
        .all(|r| r.loadout.get(SlotType::Weapon).is_none()));

    let with_weapon = optimize(
        &catalog,
        &SearchConfig {
            skip_weapon: false,
            ..SearchConfig::default()
        },
    )
    .unwrap();
    assert_eq!(with_weapon.evaluated, 64);
}

#[test]
fn test_weights_change_the_winner() {
    let catalog = Catalog::parse(
        r#"{
            "chest": {
                "plate": { "protection": 6 },
                "fireproof": { "protection": 3, "fire_protection": 6 }
            }
        }"#,
        false,
    )
    .unwrap();

    let base = SearchConfig {
        item_types: vec![SlotType::Chest],
        display_num: 1,
        ..SearchConfig::default()
    };
    let unweighted = optimize(&catalog, &base).unwrap();
    assert_eq!(names(&unweighted.results[0]), vec!["plate"]);

    let mut weighted_config = base.clone();
    weighted_config.scaling.parse_entry("fire=1").unwrap();
    let weighted = optimize(&catalog, &weighted_config).unwrap();
    assert_eq!(names(&weighted.results[0]), vec!["fireproof"]);
    // Guaranteed numbers ignore the weighting
    assert!((weighted.results[0].true_reduction() - 0.12).abs() < 1e-12);
    assert!((weighted.results[0].scaled_reduction() - 0.6).abs() < 1e-12);
}

#[test]
fn test_idempotent() {
    let catalog = synthetic_catalog(4, 5);
    let config = SearchConfig {
        display_num: 7,
        ..SearchConfig::default()
    };

    let first = optimize(&catalog, &config).unwrap();
    let second = optimize(&catalog, &config).unwrap();
    assert_eq!(first.results, second.results);
}

#[test]
fn test_parallel_matches_serial() {
    // 8^5 = 32768 combinations, enough to shard
    let catalog = synthetic_catalog(5, 8);
    let serial_config = SearchConfig {
        display_num: 12,
        threads: 1,
        ..SearchConfig::default()
    };
    let parallel_config = SearchConfig {
        threads: 4,
        ..serial_config.clone()
    };

    let serial = optimize(&catalog, &serial_config).unwrap();
    let parallel = optimize(&catalog, &parallel_config).unwrap();

    assert_eq!(serial.evaluated, 32768);
    assert_eq!(parallel.evaluated, 32768);
    assert_eq!(serial.results, parallel.results);
}

#[test]
fn test_cancelled_search_returns_no_results() {
    let catalog = synthetic_catalog(5, 8);
    let token = CancelToken::new();
    let mut optimizer = Optimizer::new(&catalog, &SearchConfig::default())
        .unwrap()
        .with_cancel_token(token.clone());
    token.cancel();

    let result = optimizer.run();
    assert!(matches!(result, Err(SearchError::Cancelled { .. })));
}

#[test]
fn test_invalid_config_fails_before_search() {
    let catalog = synthetic_catalog(1, 2);
    let config = SearchConfig {
        display_num: 0,
        expected_damage: -50.0,
        ..SearchConfig::default()
    };

    let result = optimize(&catalog, &config);
    assert!(matches!(
        result,
        Err(SearchError::InvalidConfig(ConfigError::ValidationError(_)))
    ));
}
