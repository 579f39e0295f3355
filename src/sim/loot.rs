//! Loot rolls, pickup collection and inventory changes

use glam::Vec2;
use rand::Rng;

use super::state::{Pickup, PickupKind, World};
use crate::config::PickupConfig;
use crate::consts::*;

/// Map one uniform [0, 1) sample to a pickup kind.
///
/// Thresholds are subtracted in order heart -> coin -> key; whatever is
/// left is a bomb. The weights are sequential splits of the remaining
/// mass, not independent percentages, and are never renormalized.
pub fn roll_pickup_kind(roll: f32, weights: &PickupConfig) -> PickupKind {
    let mut roll = roll;
    if roll < weights.chance_heart {
        return PickupKind::Heart;
    }
    roll -= weights.chance_heart;
    if roll < weights.chance_coin {
        return PickupKind::Coin;
    }
    roll -= weights.chance_coin;
    if roll < weights.chance_key {
        return PickupKind::Key;
    }
    PickupKind::Bomb
}

/// Death drop: one draw gates the drop, a second picks the kind
pub fn roll_enemy_drop(world: &mut World, pos: Vec2) {
    if world.rng.random::<f32>() >= ENEMY_LOOT_CHANCE {
        return;
    }
    let kind = roll_pickup_kind(world.rng.random(), &world.config.pickups);
    log::debug!("Enemy dropped {} at ({:.2}, {:.2})", kind.as_str(), pos.x, pos.y);
    world.pickups.push(Pickup {
        id: format!("pickup_{}_{}", kind.as_str(), world.tick),
        kind,
        pos,
    });
}

/// Collect every pickup within reach of the player
pub fn collect_pickups(world: &mut World) {
    let player_pos = world.player.pos;
    let (taken, remaining): (Vec<Pickup>, Vec<Pickup>) = std::mem::take(&mut world.pickups)
        .into_iter()
        .partition(|p| p.pos.distance(player_pos) < PICKUP_COLLECT_RANGE);
    world.pickups = remaining;

    for pickup in &taken {
        apply_pickup(world, pickup.kind);
    }
}

/// Apply one collected pickup. A heart at full health has no effect and
/// is only reported.
pub fn apply_pickup(world: &mut World, kind: PickupKind) {
    match kind {
        PickupKind::Heart if world.player.heal(1) => {
            world.push_message("You feel healthier.");
        }
        PickupKind::Heart => {
            world.push_message(format!("Picked up {}", kind.as_str()));
        }
        PickupKind::Coin => world.inventory.coins += 1,
        PickupKind::Key => world.inventory.keys += 1,
        PickupKind::Bomb => world.inventory.bombs += 1,
    }
}
