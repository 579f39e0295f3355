//! Attacks, hit detection and damage
//!
//! Player attacks spawn projectiles; enemies attack by contact. Every hit on
//! the player goes through [`World::damage_player`], so overlapping damage
//! sources within one invulnerability window land only once.

use glam::Vec2;

use super::collision::{circles_overlap, move_actor};
use super::loot::roll_enemy_drop;
use super::state::{
    ActorState, Effect, EffectKind, Projectile, ProjectileKind, ProjectileOwner, World,
};
use crate::consts::*;
use crate::{clamp_and_normalize, clamp_axes, title_case, ttl_expired};

/// Player movement, attack and hazard contact for one step.
///
/// `move_dir` and `attack_dir` are raw renderer input; both are clamped per
/// axis here, and the attack direction is normalized.
pub fn update_player(world: &mut World, move_dir: Vec2, attack_dir: Vec2, dt: f32) {
    let move_dir = clamp_axes(move_dir);
    world.player.vel = move_dir * world.player.speed;
    move_actor(&world.room, &mut world.player, dt);

    world.player.state = if move_dir.x.abs() + move_dir.y.abs() > 0.0 {
        ActorState::Move
    } else {
        ActorState::Idle
    };

    let attack_dir = clamp_and_normalize(attack_dir);
    world.player.attack_cooldown = (world.player.attack_cooldown - dt).max(0.0);
    if attack_dir != Vec2::ZERO && world.player.attack_cooldown <= 0.0 {
        spawn_player_projectile(world, attack_dir);
        world.player.attack_cooldown = world.config.player.fire_delay;
    }

    if world.room.tile_at(world.player.pos).is_hazard() && world.player.invulnerability <= 0.0 {
        world.damage_player(1, "spikes", HAZARD_INVULNERABILITY);
    }

    world.player.invulnerability = (world.player.invulnerability - dt).max(0.0);
}

/// Fire a projectile from the player's position along `dir` (unit length)
pub fn spawn_player_projectile(world: &mut World, dir: Vec2) {
    let cfg = &world.config.player;
    let projectile = Projectile {
        id: format!("tear_{}_{}", world.tick, world.projectiles.len()),
        owner: ProjectileOwner::Player,
        kind: ProjectileKind::PlayerProjectile,
        pos: world.player.pos,
        vel: dir * cfg.projectile_speed,
        damage: cfg.projectile_damage,
        ttl: PROJECTILE_TTL,
        radius: PROJECTILE_RADIUS,
    };
    world.projectiles.push(projectile);
}

/// Chase, contact attack and death check for every enemy.
///
/// Enemies are walked by index; dead ones are collected and removed after
/// the pass, in population order, each with its loot roll.
pub fn update_enemies(world: &mut World, dt: f32) {
    let mut dead = Vec::new();

    for i in 0..world.enemies.len() {
        let player_pos = world.player.pos;
        let enemy = &mut world.enemies[i];

        let to_player = player_pos - enemy.pos;
        let dist = to_player.length();
        enemy.vel = if dist > ENEMY_CHASE_EPSILON {
            to_player / dist * enemy.speed
        } else {
            Vec2::ZERO
        };
        move_actor(&world.room, enemy, dt);

        enemy.attack_cooldown = (enemy.attack_cooldown - dt).max(0.0);
        if dist < ENEMY_CONTACT_RANGE && enemy.attack_cooldown <= 0.0 {
            enemy.attack_cooldown = ENEMY_ATTACK_COOLDOWN;
            let source = enemy.variant.clone();
            world.damage_player(1, &source, DAMAGE_INVULNERABILITY);
        }

        if world.enemies[i].is_dead() {
            dead.push(i);
        }
    }

    remove_dead_enemies(world, &dead);
}

/// Remove enemies at `indices` (ascending) and roll their loot
fn remove_dead_enemies(world: &mut World, indices: &[usize]) {
    let mut death_positions = Vec::with_capacity(indices.len());
    for &i in indices.iter().rev() {
        let enemy = world.enemies.remove(i);
        log::info!("{} ({}) died at tick {}", enemy.id, enemy.variant, world.tick);
        death_positions.push(enemy.pos);
    }
    // Removal ran back to front; roll loot front to back
    for pos in death_positions.into_iter().rev() {
        roll_enemy_drop(world, pos);
    }
}

/// Outcome of resolving one projectile
enum Resolution {
    Keep,
    Expired,
    HitWall,
    HitEnemy { index: usize, killed: bool },
    HitPlayer,
}

/// Advance, expire, wall-test and hit-test every projectile.
///
/// Player projectiles test living enemies in population order and stop at
/// the first overlap (not the nearest). Enemy projectiles test only the
/// player and pass through while the player is invulnerable. Enemies killed
/// here are removed once the pass finishes.
pub fn update_projectiles(world: &mut World, dt: f32) {
    let projectiles = std::mem::take(&mut world.projectiles);
    let mut survivors = Vec::with_capacity(projectiles.len());
    let mut killed = Vec::new();

    for mut projectile in projectiles {
        projectile.pos += projectile.vel * dt;
        projectile.ttl -= dt;

        match resolve_projectile(world, &projectile, dt) {
            Resolution::Keep => survivors.push(projectile),
            Resolution::Expired => {}
            Resolution::HitWall => {
                world.effects.push(Effect {
                    id: format!("impact_{}", projectile.id),
                    kind: EffectKind::Impact,
                    pos: projectile.pos,
                    ttl: IMPACT_TTL,
                });
            }
            Resolution::HitEnemy { index, killed: died } => {
                if died {
                    killed.push(index);
                }
            }
            Resolution::HitPlayer => {}
        }
    }

    world.projectiles = survivors;

    killed.sort_unstable();
    killed.dedup();
    remove_dead_enemies(world, &killed);
}

fn resolve_projectile(world: &mut World, projectile: &Projectile, dt: f32) -> Resolution {
    if ttl_expired(projectile.ttl, dt) {
        return Resolution::Expired;
    }
    if world.room.tile_at(projectile.pos).is_solid() {
        return Resolution::HitWall;
    }

    match projectile.owner {
        ProjectileOwner::Player => {
            let hit = world.enemies.iter().position(|e| {
                !e.is_dead()
                    && circles_overlap(e.pos, e.radius(), projectile.pos, projectile.radius)
            });
            let Some(index) = hit else {
                return Resolution::Keep;
            };

            let tick = world.tick;
            let enemy = &mut world.enemies[index];
            enemy.hurt(projectile.damage);
            let killed = enemy.is_dead();
            let effect = Effect {
                id: format!("blood_{}_{}", enemy.id, tick),
                kind: EffectKind::BloodSplatter,
                pos: projectile.pos,
                ttl: BLOOD_SPLATTER_TTL,
            };
            let defeated = killed.then(|| format!("{} defeated!", title_case(&enemy.variant)));

            world.effects.push(effect);
            if let Some(message) = defeated {
                world.push_message(message);
            }
            Resolution::HitEnemy { index, killed }
        }
        ProjectileOwner::Enemy(_) => {
            if world.player.invulnerability > 0.0 {
                return Resolution::Keep;
            }
            let player = &world.player;
            if !circles_overlap(player.pos, player.radius(), projectile.pos, projectile.radius) {
                return Resolution::Keep;
            }
            world.damage_player(1, "projectile", DAMAGE_INVULNERABILITY);
            Resolution::HitPlayer
        }
    }
}
