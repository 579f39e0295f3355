//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::combat::{update_enemies, update_player, update_projectiles};
use super::loot::collect_pickups;
use super::state::World;
use crate::ttl_expired;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// End the run without advancing the simulation
    pub quit: bool,
    /// Raw movement vector (clamped per axis during the tick)
    pub move_dir: Vec2,
    /// Raw attack direction (clamped per axis, then normalized)
    pub attack_dir: Vec2,
}

/// Advance the world by one fixed timestep.
///
/// Order: player, enemies, projectiles, pickups, effects, meta, death check.
/// A quit request ends the run and leaves everything else untouched; a
/// finished run ignores further ticks.
pub fn tick(world: &mut World, input: &TickInput) {
    if input.quit {
        log::info!("Quit requested at tick {}", world.tick);
        world.running = false;
        return;
    }
    if !world.running {
        return;
    }

    let dt = world.dt;
    world.tick += 1;

    update_player(world, input.move_dir, input.attack_dir, dt);
    update_enemies(world, dt);
    update_projectiles(world, dt);
    collect_pickups(world);
    update_effects(world, dt);

    world.refresh_meta();

    if world.player.is_dead() {
        log::info!("Player died at tick {}", world.tick);
        world.running = false;
    }
}

/// Decay cosmetic effects and drop expired ones
pub fn update_effects(world: &mut World, dt: f32) {
    for effect in world.effects.iter_mut() {
        effect.ttl -= dt;
    }
    world.effects.retain(|e| !ttl_expired(e.ttl, dt));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::consts::*;
    use crate::sim::room::{Room, TileKind};
    use crate::sim::state::{
        Actor, ActorKind, Effect, EffectKind, PickupKind, Projectile, ProjectileKind,
        ProjectileOwner,
    };
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// 64 Hz keeps dt exact in binary floating point
    fn config_64hz(seed: u64) -> Config {
        let mut config = Config::default();
        config.game.tick_rate = 64.0;
        config.game.rng_seed = Some(seed);
        config
    }

    /// Open walled room, no enemies or pickups, player at (10, 6)
    fn arena(seed: u64) -> World {
        let mut world = World::from_config(config_64hz(seed)).unwrap();
        world.room = Room::walled(20, 12, 32);
        world.enemies.clear();
        world.pickups.clear();
        world.refresh_meta();
        world
    }

    #[test]
    fn test_tick_advances_counter_and_meta() {
        let mut world = arena(1);
        tick(&mut world, &TickInput::default());
        assert_eq!(world.tick, 1);
        assert_eq!(world.meta.tick, 1);
        assert_eq!(world.meta.delta_time, 1.0 / 64.0);
        assert!(world.meta.room_cleared);
        assert!(!world.meta.player_dead);
        assert!(world.running);
    }

    #[test]
    fn test_spikes_hit_once_per_window() {
        let mut world = arena(2);
        world.room.set(10, 6, TileKind::Spikes);
        assert_eq!(world.player.hp, 6);

        tick(&mut world, &TickInput::default());
        assert_eq!(world.player.hp, 5);
        assert!((world.player.invulnerability - (HAZARD_INVULNERABILITY - world.dt)).abs() < 1e-6);
        assert_eq!(world.meta.messages, vec!["Took damage from spikes!".to_string()]);

        tick(&mut world, &TickInput::default());
        assert_eq!(world.player.hp, 5);
        assert!(world.player.invulnerability > 0.0);
    }

    #[test]
    fn test_spikes_hit_again_after_window() {
        let mut world = arena(3);
        world.room.set(10, 6, TileKind::Spikes);
        // Hit on tick 1; the 0.75 s window (48 ticks at 64 Hz) runs out at
        // the end of tick 48
        for _ in 0..48 {
            tick(&mut world, &TickInput::default());
        }
        assert_eq!(world.player.hp, 5);
        tick(&mut world, &TickInput::default());
        assert_eq!(world.player.hp, 4);
    }

    #[test]
    fn test_hazard_and_enemy_same_tick_land_once() {
        let mut world = arena(4);
        world.room.set(10, 6, TileKind::Spikes);
        let mut e = Actor::new("enemy_hopper_0", ActorKind::Enemy, "hopper", Vec2::new(10.5, 6.0), 0.0, 3);
        e.state = crate::sim::state::ActorState::Wander;
        world.enemies.push(e);

        tick(&mut world, &TickInput::default());
        assert_eq!(world.player.hp, 5);
        assert_eq!(world.messages, vec!["Took damage from spikes!".to_string()]);
        // The enemy still spent its attack
        assert_eq!(world.enemies[0].attack_cooldown, ENEMY_ATTACK_COOLDOWN);
    }

    /// Spitter with 1 hp under a damage-3 tear; the RNG is reset to
    /// `stream` so the loot roll is pinned
    fn kill_spitter(stream: u64) -> World {
        let mut world = arena(0);
        world.rng = Pcg32::seed_from_u64(stream);
        let target = Actor::new("enemy_spitter_0", ActorKind::Enemy, "spitter", Vec2::new(5.0, 3.0), 0.0, 1);
        world.enemies.push(target);
        world.projectiles.push(Projectile {
            id: "tear_0_0".into(),
            owner: ProjectileOwner::Player,
            kind: ProjectileKind::PlayerProjectile,
            pos: Vec2::new(5.0, 3.0),
            vel: Vec2::ZERO,
            damage: 3,
            ttl: PROJECTILE_TTL,
            radius: PROJECTILE_RADIUS,
        });

        tick(&mut world, &TickInput::default());

        assert!(world.enemies.is_empty());
        assert!(world.projectiles.is_empty());
        assert!(world.meta.room_cleared);
        assert_eq!(world.messages, vec!["Spitter defeated!".to_string()]);
        assert!(world.effects.iter().any(|e| e.kind == EffectKind::BloodSplatter));
        world
    }

    #[test]
    fn test_projectile_kill_drops_coin() {
        // Stream 1: gate 0.2018 < 0.3, kind roll 0.4912 lands in coin
        let world = kill_spitter(1);
        assert_eq!(world.pickups.len(), 1);
        assert_eq!(world.pickups[0].kind, PickupKind::Coin);
        assert_eq!(world.pickups[0].id, "pickup_coin_1");
        assert_eq!(world.pickups[0].pos, Vec2::new(5.0, 3.0));
    }

    #[test]
    fn test_projectile_kill_drops_heart() {
        // Stream 3: gate 0.2725, kind roll 0.1483 < 0.25
        let world = kill_spitter(3);
        assert_eq!(world.pickups.len(), 1);
        assert_eq!(world.pickups[0].kind, PickupKind::Heart);
        assert_eq!(world.pickups[0].id, "pickup_heart_1");
    }

    #[test]
    fn test_projectile_kill_without_drop() {
        // Stream 5: gate 0.7186 >= 0.3
        let world = kill_spitter(5);
        assert!(world.pickups.is_empty());
    }

    /// Tick a stationary ttl 2.0 tear and check it lives exactly
    /// `expected` ticks
    fn assert_stationary_lifetime(mut world: World, expected: u32) {
        world.projectiles.push(Projectile {
            id: "tear_0_0".into(),
            owner: ProjectileOwner::Player,
            kind: ProjectileKind::PlayerProjectile,
            pos: Vec2::new(4.5, 4.5),
            vel: Vec2::ZERO,
            damage: 3,
            ttl: 2.0,
            radius: PROJECTILE_RADIUS,
        });

        for t in 1..expected {
            tick(&mut world, &TickInput::default());
            assert_eq!(world.projectiles.len(), 1, "projectile missing after tick {t}");
        }
        tick(&mut world, &TickInput::default());
        assert!(world.projectiles.is_empty(), "projectile still present after tick {expected}");
    }

    #[test]
    fn test_stationary_projectile_lifetime() {
        let world = arena(5);
        assert_eq!((2.0 / world.dt).floor() as u32, 128);
        assert_stationary_lifetime(world, 128);
    }

    #[test]
    fn test_stationary_projectile_lifetime_at_default_rate() {
        // 1/60 is inexact in f32; the lifetime is still 2 s * 60 Hz
        let mut config = Config::default();
        config.game.rng_seed = Some(5);
        let mut world = World::from_config(config).unwrap();
        world.room = Room::walled(20, 12, 32);
        world.enemies.clear();
        world.pickups.clear();
        assert_stationary_lifetime(world, 120);
    }

    #[test]
    fn test_quit_leaves_world_untouched() {
        let mut world = World::from_config(config_64hz(6)).unwrap();
        for _ in 0..3 {
            tick(
                &mut world,
                &TickInput {
                    move_dir: Vec2::new(1.0, 0.0),
                    attack_dir: Vec2::new(0.0, 1.0),
                    ..Default::default()
                },
            );
        }
        let before = world.clone();

        tick(
            &mut world,
            &TickInput {
                quit: true,
                move_dir: Vec2::new(-1.0, 0.0),
                attack_dir: Vec2::new(1.0, 0.0),
            },
        );

        assert!(!world.running);
        assert_eq!(world.tick, before.tick);
        assert_eq!(world.meta, before.meta);
        assert_eq!(world.player, before.player);
        assert_eq!(world.enemies, before.enemies);
        assert_eq!(world.projectiles, before.projectiles);
        assert_eq!(world.pickups, before.pickups);
        assert_eq!(world.effects, before.effects);
        assert_eq!(world.inventory, before.inventory);
        assert_eq!(world.messages, before.messages);
    }

    #[test]
    fn test_finished_run_ignores_ticks() {
        let mut world = arena(7);
        world.running = false;
        tick(&mut world, &TickInput::default());
        assert_eq!(world.tick, 0);
    }

    #[test]
    fn test_player_death_ends_run() {
        let mut world = arena(8);
        world.player.hp = 1;
        world.room.set(10, 6, TileKind::Spikes);
        tick(&mut world, &TickInput::default());
        assert_eq!(world.player.hp, 0);
        assert!(world.meta.player_dead);
        assert!(!world.running);
    }

    #[test]
    fn test_effects_expire() {
        let mut world = arena(9);
        world.effects.push(Effect {
            id: "impact_x".into(),
            kind: EffectKind::Impact,
            pos: Vec2::new(3.0, 3.0),
            ttl: IMPACT_TTL,
        });
        // 0.2 s is 12.8 ticks at 64 Hz
        for _ in 0..12 {
            tick(&mut world, &TickInput::default());
        }
        assert_eq!(world.effects.len(), 1);
        tick(&mut world, &TickInput::default());
        assert!(world.effects.is_empty());
    }

    #[test]
    fn test_pickup_collected_during_tick() {
        let mut world = arena(10);
        world.pickups.push(crate::sim::state::Pickup {
            id: "pickup_coin_0".into(),
            kind: crate::sim::state::PickupKind::Coin,
            pos: world.player.pos + Vec2::new(0.3, 0.0),
        });
        tick(&mut world, &TickInput::default());
        assert!(world.pickups.is_empty());
        assert_eq!(world.meta.coins, 1);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                move_dir: Vec2::new(1.0, 0.5),
                ..Default::default()
            },
            TickInput {
                attack_dir: Vec2::new(-1.0, 0.0),
                ..Default::default()
            },
            TickInput {
                move_dir: Vec2::new(0.0, -1.0),
                attack_dir: Vec2::new(0.3, 0.3),
                ..Default::default()
            },
            TickInput::default(),
        ];

        let mut a = World::from_config(config_64hz(99999)).unwrap();
        let mut b = World::from_config(config_64hz(99999)).unwrap();
        for _ in 0..50 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }

        assert_eq!(a.tick, b.tick);
        assert_eq!(a.player, b.player);
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.projectiles, b.projectiles);
        assert_eq!(a.pickups, b.pickups);
        assert_eq!(a.meta, b.meta);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (
            -2.0f32..2.0,
            -2.0f32..2.0,
            -2.0f32..2.0,
            -2.0f32..2.0,
        )
            .prop_map(|(mx, my, ax, ay)| TickInput {
                quit: false,
                move_dir: Vec2::new(mx, my),
                attack_dir: Vec2::new(ax, ay),
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_hp_stays_in_bounds(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(arb_input(), 1..200),
        ) {
            let mut world = World::from_config(config_64hz(seed)).unwrap();
            for input in &inputs {
                tick(&mut world, input);
                prop_assert!(world.player.hp >= 0 && world.player.hp <= world.player.max_hp);
                for e in &world.enemies {
                    prop_assert!(e.hp >= 0 && e.hp <= e.max_hp);
                }
                prop_assert!(world.player.invulnerability >= 0.0);
                prop_assert!(world.player.attack_cooldown >= 0.0);
                if !world.running {
                    break;
                }
            }
        }
    }
}
