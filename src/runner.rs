//! Fixed-rate driver loop
//!
//! Each iteration reads input, steps the world once and writes the
//! snapshot, then sleeps off whatever is left of `dt`. There is no
//! catch-up: a slow iteration just makes that tick late, simulated time
//! still advances by exactly `dt`.

use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Result, RunError};
use crate::handoff::Handoff;
use crate::sim::{World, tick};

/// Run until quit, player death or `max_ticks` iterations.
/// A snapshot write failure ends the run with an error.
pub fn run(world: &mut World, handoff: &Handoff, max_ticks: Option<u64>) -> Result<()> {
    let frame = Duration::try_from_secs_f32(world.dt).map_err(|source| RunError::Timestep {
        dt: world.dt,
        source,
    })?;
    let mut iterations: u64 = 0;

    log::info!(
        "Simulation running at {} Hz (seed {})",
        world.config.game.tick_rate,
        world.seed
    );

    while world.running {
        if max_ticks.is_some_and(|limit| iterations >= limit) {
            log::info!("Tick limit reached after {} iterations", iterations);
            break;
        }

        let started = Instant::now();
        let input = handoff.read_input();
        tick(world, &input);
        handoff.write_state(world)?;
        iterations += 1;

        if let Some(remaining) = frame.checked_sub(started.elapsed()) {
            thread::sleep(remaining);
        }
    }

    if world.player.is_dead() {
        log::info!("Run over: player died at tick {}", world.tick);
    } else {
        log::info!("Simulation stopped at tick {}", world.tick);
    }
    Ok(())
}
