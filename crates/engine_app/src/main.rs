//! # engine_app
//!
//! Headless driver for the island simulation. Builds the demo archipelago,
//! registers every gameplay system and steps the world at a fixed rate while
//! an autopilot plays the first player.
//!
//! ## Startup Sequence
//!
//! 1. Parse the command line and initialise structured logging.
//! 2. Load gameplay tuning (JSON file or defaults) and apply the seed.
//! 3. Register systems, populate the scene.
//! 4. Enter the fixed-timestep tick loop.

mod demo;
mod tick;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use engine_ecs::World;
use game_systems::{GameplayConfig, Terrain, populate, register_default_systems};
use tracing::info;
use tracing_subscriber::EnvFilter;

use demo::{EventTally, autopilot};
use tick::{TickConfig, TickLoop};

#[derive(Parser, Debug)]
#[command(name = "engine_app", about = "Headless island simulation")]
struct Args {
    /// Number of ticks to run (0 = run until interrupted)
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Ticks per second
    #[arg(long, default_value_t = 60.0, value_parser = parse_tick_rate)]
    tick_rate: f64,

    /// Random seed; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Gameplay tuning as JSON
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log: String,

    /// Pace ticks against the wall clock
    #[arg(long)]
    realtime: bool,
}

fn parse_tick_rate(raw: &str) -> Result<f64, String> {
    let rate: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(format!("tick rate must be a positive number, got {raw}"))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log)),
        )
        .init();

    let mut config = match &args.config {
        Some(path) => GameplayConfig::load(path)
            .with_context(|| format!("loading gameplay config from {}", path.display()))?,
        None => GameplayConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    info!(seed = config.seed, "island simulation starting");

    let terrain = Arc::new(Terrain::archipelago());
    let mut world = World::new();
    register_default_systems(&mut world, &terrain, &config);
    let player = populate(&mut world, &terrain).context("terrain has no islands to populate")?;

    let tick_config = TickConfig::default()
        .with_tick_rate(args.tick_rate)
        .with_max_ticks(args.ticks)
        .with_realtime(args.realtime);
    let mut tick_loop = TickLoop::new(tick_config, world);

    let mut tally = EventTally::default();
    tick_loop.run_with(|world| {
        tally.collect(world);
        autopilot(world, player);
    });
    tally.collect(tick_loop.world_mut());

    info!(
        ticks = tick_loop.tick_id(),
        entities = tick_loop.world().entity_count(),
        hits = tally.hits,
        drops = tally.drops,
        pickups = tally.pickups,
        hatched = tally.hatched,
        starved = tally.starved,
        strikes = tally.strikes,
        collisions = tally.collisions,
        "island simulation finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_rate_must_be_positive() {
        assert_eq!(parse_tick_rate("30"), Ok(30.0));
        assert!(parse_tick_rate("0").is_err());
        assert!(parse_tick_rate("-60").is_err());
        assert!(parse_tick_rate("inf").is_err());
        assert!(parse_tick_rate("fast").is_err());
    }

    #[test]
    fn test_cli_rejects_zero_tick_rate() {
        assert!(Args::try_parse_from(["engine_app", "--tick-rate", "0"]).is_err());
        let args = Args::try_parse_from(["engine_app", "--tick-rate", "120"]).unwrap();
        assert_eq!(args.tick_rate, 120.0);
    }
}
