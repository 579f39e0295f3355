//! Run-start population: enemies and the starting pickup

use glam::Vec2;
use rand::Rng;

use super::loot::roll_pickup_kind;
use super::room::Room;
use super::state::{Actor, ActorKind, ActorState, Pickup};
use crate::config::{EnemyConfig, PickupConfig};
use crate::consts::*;

/// Uniform float in [lo, hi]; a degenerate range returns `lo`
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + (hi - lo) * rng.random::<f32>()
}

/// Rejection-sample a walkable enemy position. Falls back to a fixed point
/// near the top of the room when every attempt fails, so exhausted enemies
/// share that position.
pub fn place_enemy<R: Rng + ?Sized>(rng: &mut R, room: &Room) -> Vec2 {
    let max_x = room.width as f32 - ENEMY_PLACEMENT_MARGIN;
    let max_y = room.height as f32 - ENEMY_PLACEMENT_MARGIN;
    for _ in 0..ENEMY_PLACEMENT_ATTEMPTS {
        let x = uniform(rng, ENEMY_PLACEMENT_MARGIN, max_x);
        let y = uniform(rng, ENEMY_PLACEMENT_MARGIN, max_y);
        let candidate = Vec2::new(x, y);
        if room.is_walkable(candidate, ENEMY_RADIUS) {
            return candidate;
        }
    }
    log::warn!("Enemy placement exhausted {} attempts, using fallback", ENEMY_PLACEMENT_ATTEMPTS);
    Vec2::new(room.width as f32 / 2.0, ENEMY_FALLBACK_Y)
}

/// Spawn the room's enemy population.
///
/// Per enemy the draw order is: position attempts, variant, hp, speed.
pub fn spawn_enemies<R: Rng + ?Sized>(rng: &mut R, room: &Room, cfg: &EnemyConfig) -> Vec<Actor> {
    let count = rng.random_range(cfg.spawn_min..=cfg.spawn_max);
    let mut enemies = Vec::with_capacity(count as usize);

    for index in 0..count {
        let pos = place_enemy(rng, room);
        let variant = cfg.variants[rng.random_range(0..cfg.variants.len())].clone();
        let hp = rng.random_range(cfg.hp_min..=cfg.hp_max);
        let speed = uniform(rng, cfg.speed_min, cfg.speed_max);

        let mut enemy = Actor::new(
            format!("enemy_{variant}_{index}"),
            ActorKind::Enemy,
            variant,
            pos,
            speed,
            hp,
        );
        enemy.state = ActorState::Wander;
        enemies.push(enemy);
    }
    enemies
}

/// Maybe place one pickup near the room center. A pickup that lands on a
/// solid tile is dropped, not retried.
pub fn spawn_start_pickups<R: Rng + ?Sized>(
    rng: &mut R,
    room: &Room,
    weights: &PickupConfig,
) -> Vec<Pickup> {
    let mut pickups = Vec::new();
    if rng.random::<f32>() < START_PICKUP_CHANCE {
        let kind = roll_pickup_kind(rng.random(), weights);
        let jitter = Vec2::new(
            uniform(rng, -START_PICKUP_JITTER, START_PICKUP_JITTER),
            uniform(rng, -START_PICKUP_JITTER, START_PICKUP_JITTER),
        );
        let pos = room.center() + jitter;
        if room.is_walkable(pos, PICKUP_PLACEMENT_RADIUS) {
            pickups.push(Pickup {
                id: format!("pickup_{}_0", kind.as_str()),
                kind,
                pos,
            });
        } else {
            log::debug!("Starting {} pickup landed on a solid tile, dropped", kind.as_str());
        }
    }
    pickups
}
