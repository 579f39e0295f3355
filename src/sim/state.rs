//! Game state and core simulation types
//!
//! Everything a run owns lives in [`World`]; resolvers take it explicitly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::room::{Room, generate_room};
use super::spawn::{spawn_enemies, spawn_start_pickups};
use crate::config::{Config, ConfigError};
use crate::consts::*;

/// Messages kept in the run log; only the tail is exported
const MESSAGE_LOG_CAP: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Player,
    Enemy,
}

/// Descriptive actor state (no gameplay effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorState {
    #[default]
    Idle,
    Move,
    Wander,
}

/// Player or enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: String,
    pub kind: ActorKind,
    pub variant: String,
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub state: ActorState,
    /// Seconds until the next attack is allowed
    pub attack_cooldown: f32,
    /// Seconds of damage immunity left
    pub invulnerability: f32,
}

impl Actor {
    pub fn new(
        id: impl Into<String>,
        kind: ActorKind,
        variant: impl Into<String>,
        pos: Vec2,
        speed: f32,
        hp: i32,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            variant: variant.into(),
            pos,
            vel: Vec2::ZERO,
            speed,
            hp,
            max_hp: hp,
            state: ActorState::Idle,
            attack_cooldown: 0.0,
            invulnerability: 0.0,
        }
    }

    /// Collision radius by kind
    pub fn radius(&self) -> f32 {
        match self.kind {
            ActorKind::Player => PLAYER_RADIUS,
            ActorKind::Enemy => ENEMY_RADIUS,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Gated damage: a no-op while invulnerable, otherwise subtracts
    /// `amount` (floored at 0) and opens an invulnerability window.
    /// Returns whether damage landed.
    pub fn take_damage(&mut self, amount: i32, window: f32) -> bool {
        if self.invulnerability > 0.0 {
            return false;
        }
        self.hp = (self.hp - amount).max(0);
        self.invulnerability = window;
        true
    }

    /// Ungated damage (projectile hits on enemies), floored at 0
    pub fn hurt(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }

    /// Heal up to max hp; returns whether anything changed
    pub fn heal(&mut self, amount: i32) -> bool {
        if self.hp >= self.max_hp {
            return false;
        }
        self.hp = (self.hp + amount).min(self.max_hp);
        true
    }
}

/// Who fired a projectile. Enemies are referenced by id only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy(String),
}

impl ProjectileOwner {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectileOwner::Player => "player",
            ProjectileOwner::Enemy(id) => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileKind {
    PlayerProjectile,
    EnemyProjectile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: String,
    pub owner: ProjectileOwner,
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    /// Seconds left before expiry
    pub ttl: f32,
    pub radius: f32,
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupKind {
    Heart,
    Coin,
    Key,
    Bomb,
}

impl PickupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PickupKind::Heart => "heart",
            PickupKind::Coin => "coin",
            PickupKind::Key => "key",
            PickupKind::Bomb => "bomb",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub id: String,
    pub kind: PickupKind,
    pub pos: Vec2,
}

/// Cosmetic effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Impact,
    BloodSplatter,
}

/// A transient visual effect (not gameplay-affecting)
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub id: String,
    pub kind: EffectKind,
    pub pos: Vec2,
    pub ttl: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub coins: u32,
    pub keys: u32,
    pub bombs: u32,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            coins: 0,
            keys: 0,
            bombs: 1,
        }
    }
}

/// Per-tick summary exported to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub tick: u64,
    pub delta_time: f32,
    pub room_id: u32,
    pub player_hp: i32,
    pub player_max_hp: i32,
    pub coins: u32,
    pub keys: u32,
    pub bombs: u32,
    pub rng_seed: Option<u64>,
    pub room_cleared: bool,
    pub messages: Vec<String>,
    pub player_dead: bool,
}

/// Complete run state (the simulation context)
#[derive(Debug, Clone)]
pub struct World {
    pub config: Config,
    /// Seed actually used (configured or time-derived)
    pub seed: u64,
    pub rng: Pcg32,
    /// Fixed step in seconds
    pub dt: f32,
    pub tick: u64,
    pub room: Room,
    pub player: Actor,
    /// Population order is spawn order
    pub enemies: Vec<Actor>,
    pub projectiles: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
    pub effects: Vec<Effect>,
    pub inventory: Inventory,
    pub messages: Vec<String>,
    pub meta: Meta,
    /// Cleared on quit or player death
    pub running: bool,
}

impl World {
    /// Start a fresh run from `config` with the given seed.
    ///
    /// `config` must already pass [`Config::validate`]: spawning draws from
    /// the enemy ranges and variant list and panics on an empty or inverted
    /// one. Use [`World::from_config`] for untrusted input.
    pub fn new(config: Config, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let g = &config.game;
        let room = generate_room(&mut rng, g.room_width, g.room_height, g.tile_size);

        let p = &config.player;
        let player = Actor::new("player", ActorKind::Player, "isaac", room.center(), p.speed, p.hp);

        let enemies = spawn_enemies(&mut rng, &room, &config.enemies);
        let pickups = spawn_start_pickups(&mut rng, &room, &config.pickups);

        log::info!(
            "New run: seed={} room={}x{} enemies={} pickups={}",
            seed,
            room.width,
            room.height,
            enemies.len(),
            pickups.len()
        );

        let dt = config.delta_time();
        let mut world = Self {
            meta: empty_meta(dt),
            config,
            seed,
            rng,
            dt,
            tick: 0,
            room,
            player,
            enemies,
            projectiles: Vec::new(),
            pickups,
            effects: Vec::new(),
            inventory: Inventory::default(),
            messages: Vec::new(),
            running: true,
        };
        world.refresh_meta();
        world
    }

    /// Validate `config`, then start a fresh run with the configured seed,
    /// falling back to wall-clock seconds when none is configured
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.game.rng_seed.unwrap_or_else(time_seed);
        Ok(Self::new(config, seed))
    }

    /// Append to the run log
    pub fn push_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("[tick {}] {}", self.tick, message);
        self.messages.push(message);
        if self.messages.len() > MESSAGE_LOG_CAP {
            let excess = self.messages.len() - MESSAGE_LOG_CAP;
            self.messages.drain(..excess);
        }
    }

    /// Last few messages, oldest first
    pub fn message_tail(&self) -> &[String] {
        let start = self.messages.len().saturating_sub(MESSAGE_TAIL);
        &self.messages[start..]
    }

    /// Damage the player through the invulnerability gate.
    /// Returns whether damage landed.
    pub fn damage_player(&mut self, amount: i32, source: &str, window: f32) -> bool {
        if !self.player.take_damage(amount, window) {
            return false;
        }
        self.push_message(format!("Took damage from {source}!"));
        if self.player.is_dead() {
            log::info!("Player killed by {} at tick {}", source, self.tick);
        }
        true
    }

    /// Recompute the exported summary
    pub fn refresh_meta(&mut self) {
        self.meta = Meta {
            tick: self.tick,
            delta_time: self.dt,
            room_id: 0,
            player_hp: self.player.hp,
            player_max_hp: self.player.max_hp,
            coins: self.inventory.coins,
            keys: self.inventory.keys,
            bombs: self.inventory.bombs,
            rng_seed: self.config.game.rng_seed,
            room_cleared: self.enemies.is_empty(),
            messages: self.message_tail().to_vec(),
            player_dead: self.player.is_dead(),
        };
    }
}

fn empty_meta(dt: f32) -> Meta {
    Meta {
        tick: 0,
        delta_time: dt,
        room_id: 0,
        player_hp: 0,
        player_max_hp: 0,
        coins: 0,
        keys: 0,
        bombs: 0,
        rng_seed: None,
        room_cleared: true,
        messages: Vec::new(),
        player_dead: false,
    }
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
