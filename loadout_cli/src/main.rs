//! Command line front end for the loadout optimizer
//!
//! Loads an item catalog, applies the run configuration (TOML file, then
//! flags) and prints the best loadouts, best last.

mod report;

use anyhow::{Context, Result};
use clap::Parser;
use loadout_core::config::parse_slot_type;
use loadout_core::{Catalog, Optimizer, ScalingMode, SearchConfig, Tier};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log filter used when neither `RUST_LOG` nor `--log-level` is given
const DEFAULT_LOG_DIRECTIVE: &str = "warn";

/// Search every item combination for the most survivable loadout
#[derive(Parser, Debug)]
#[command(name = "loadout")]
#[command(about = "Exhaustive equipment loadout optimizer", long_about = None)]
#[command(version)]
struct Cli {
    /// Item catalog (JSON: slot -> item -> stat -> value)
    #[arg(long, default_value = "items.json")]
    filename: PathBuf,

    /// TOML run configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only search these items
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    whitelist: Option<Vec<String>>,

    /// Never search these items
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    blacklist: Option<Vec<String>>,

    /// Slots to search, in order
    #[arg(long = "item-types", num_args = 1.., value_delimiter = ',')]
    item_types: Option<Vec<String>>,

    /// Item tiers (accepted, not enforced)
    #[arg(long = "item-tiers", num_args = 1.., value_delimiter = ',')]
    item_tiers: Option<Vec<String>>,

    /// Damage type weights, e.g. `--scaling projectile=0.5 fire=0.3`
    #[arg(long, num_args = 1.., value_name = "TYPE=WEIGHT")]
    scaling: Vec<String>,

    /// How weights combine with general reductions
    #[arg(long = "scaling-mode", value_parser = parse_scaling_mode)]
    scaling_mode: Option<ScalingMode>,

    /// Expected maximum hit, used by the armor formula
    #[arg(long = "expected-damage")]
    expected_damage: Option<f64>,

    /// Leave the main-hand weapon out of the search
    #[arg(long = "skip-weapon", value_name = "BOOL", action = clap::ArgAction::Set)]
    skip_weapon: Option<bool>,

    /// Number of loadouts to print
    #[arg(long = "display-num")]
    display_num: Option<usize>,

    /// Print item attributes with each loadout
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    verbose: Option<bool>,

    /// Worker threads (0 = every core)
    #[arg(long)]
    threads: Option<usize>,

    /// Reject unknown stat names in the catalog
    #[arg(long = "strict-stats")]
    strict_stats: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Print the candidate lists and search size, then exit
    #[arg(long)]
    list: bool,

    /// Log level written to stderr; overrides the global level of `RUST_LOG`
    #[arg(long = "log-level")]
    log_level: Option<Level>,
}

fn parse_scaling_mode(value: &str) -> Result<ScalingMode, String> {
    match value {
        "normalized" => Ok(ScalingMode::Normalized),
        "remainder" => Ok(ScalingMode::Remainder),
        other => Err(format!(
            "unknown scaling mode '{}' (expected normalized or remainder)",
            other
        )),
    }
}

/// `RUST_LOG` directives (or the default), with `--log-level` applied on top
fn log_filter(rust_log: Option<&str>, level: Option<Level>) -> EnvFilter {
    let filter = rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));
    match level {
        Some(level) => filter.add_directive(level.into()),
        None => filter,
    }
}

impl Cli {
    /// Config file values with command line overrides applied
    fn search_config(&self) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => SearchConfig::default(),
        };

        if let Some(whitelist) = &self.whitelist {
            config.whitelist = Some(whitelist.clone());
        }
        if let Some(blacklist) = &self.blacklist {
            config.blacklist = blacklist.clone();
        }
        if let Some(item_types) = &self.item_types {
            config.item_types = item_types
                .iter()
                .map(|name| parse_slot_type(name))
                .collect::<Result<_, _>>()
                .context("invalid --item-types")?;
        }
        if let Some(item_tiers) = &self.item_tiers {
            config.item_tiers = item_tiers.iter().map(|tier| Tier::from(tier.as_str())).collect();
        }
        for entry in &self.scaling {
            config
                .scaling
                .parse_entry(entry)
                .with_context(|| format!("invalid --scaling entry '{}'", entry))?;
        }
        if let Some(mode) = self.scaling_mode {
            config.scaling_mode = mode;
        }
        if let Some(expected_damage) = self.expected_damage {
            config.expected_damage = expected_damage;
        }
        if let Some(skip_weapon) = self.skip_weapon {
            config.skip_weapon = skip_weapon;
        }
        if let Some(display_num) = self.display_num {
            config.display_num = display_num;
        }
        if let Some(verbose) = self.verbose {
            config.verbose = verbose;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        config.strict_stats |= self.strict_stats;

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    let config = cli.search_config()?;
    let catalog = Catalog::load(&cli.filename, config.strict_stats)
        .with_context(|| format!("failed to load catalog {}", cli.filename.display()))?;

    let mut optimizer = Optimizer::new(&catalog, &config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list {
        let combinations = optimizer.search_space()?;
        report::write_candidates(&mut out, optimizer.candidates(), combinations)?;
        return Ok(());
    }

    let outcome = optimizer.run().context("search failed")?;
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &outcome)?;
        writeln!(out)?;
    } else {
        report::write_results(&mut out, &outcome, config.verbose)?;
    }

    Ok(())
}
