//! Rogue Sim entry point
//!
//! Loads configuration, builds the run and drives it against the shared
//! directory until the renderer quits or the player dies.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use rogue_sim::handoff::Handoff;
use rogue_sim::sim::World;
use rogue_sim::{Config, Result, runner};

/// Headless room simulator exchanging JSON snapshots with a renderer
#[derive(Parser, Debug)]
#[command(name = "rogue-sim")]
#[command(about = "Deterministic single-room action simulation with file hand-off")]
struct Args {
    /// JSON override merged over the built-in configuration
    #[arg(long, default_value = "game_config.json")]
    config: PathBuf,

    /// Directory holding input.json and game_state.json
    #[arg(long, default_value = "shared")]
    shared_dir: PathBuf,

    /// Random seed for deterministic runs (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.game.rng_seed = Some(seed);
    }

    let handoff = Handoff::new(&args.shared_dir)?;
    let mut world = World::from_config(config)?;
    handoff.write_state(&world)?;

    runner::run(&mut world, &handoff, args.max_ticks)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Rogue Sim starting...");

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("rogue-sim: {err}");
            ExitCode::FAILURE
        }
    }
}
