//! Round driver for the Covert simulation.
//!
//! Plays one round of the traitor rule against the in-memory station and
//! prints what the players would have seen.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `covert-config.yaml` (or the path given as
//!    the first argument), applying the `COVERT_SEED` override
//! 2. Initialize structured logging (tracing)
//! 3. Load the built-in word lists and string table
//! 4. Seed the station from the crew manifest
//! 5. Add the traitor rule, select traitors, build the round-end report
//! 6. Print briefings, cohorts and the summary

mod config;
mod round;

use std::path::{Path, PathBuf};

use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use covert_rules::{DatasetCatalog, StringTable, TraitorRuleSystem};

use crate::config::{RoundConfig, SEED_ENV};
use crate::round::{run_round, seed_station};

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG: &str = "covert-config.yaml";

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let mut config = load_config(&config_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.rules.logging.level)),
        )
        .with_target(true)
        .init();

    config.apply_seed_override(std::env::var(SEED_ENV).ok().as_deref());
    info!(
        path = %config_path.display(),
        seed = config.round.seed,
        crew = config.round.crew.len(),
        traitor_count = config.round.traitor_count,
        "configuration loaded"
    );

    let datasets = DatasetCatalog::builtin().context("loading built-in word lists")?;
    let strings = StringTable::builtin().context("loading built-in string table")?;
    let mut system =
        TraitorRuleSystem::new(datasets, strings, SmallRng::seed_from_u64(config.round.seed));

    let mut station = seed_station(&config.round.crew, &config.rules.traitor.default_faction);
    let outcome = run_round(&mut system, &mut station, &config.rules.traitor, &config.round)
        .context("running round")?;

    info!(
        selected = outcome.selected,
        traitors = outcome.traitors.len(),
        "round complete"
    );

    for traitor in &outcome.traitors {
        info!(mind = %traitor.mind, allegiance = %traitor.allegiance, "traitor briefed");
        println!("== {} ({}) ==", traitor.name, traitor.allegiance);
        println!("{}", traitor.briefing.trim_end());
        let cohorts: Vec<String> = traitor
            .cohorts
            .iter()
            .filter_map(|c| station.crew_member(c.entity).map(|m| m.name.clone()))
            .collect();
        if !cohorts.is_empty() {
            println!("Known cohorts: {}", cohorts.join(", "));
        }
        println!();
    }
    println!("{}", outcome.summary);

    Ok(())
}

/// Load the round configuration, falling back to defaults when the file
/// does not exist.
fn load_config(path: &Path) -> anyhow::Result<RoundConfig> {
    if path.exists() {
        RoundConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))
    } else {
        Ok(RoundConfig::default())
    }
}
