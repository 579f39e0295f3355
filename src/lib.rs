//! Rogue Sim - A tick-based rogue-like room simulator
//!
//! Core modules:
//! - `sim`: Deterministic simulation (room, physics, combat, loot, game state)
//! - `snapshot`: JSON mapping of the world and of renderer input
//! - `handoff`: File hand-off with the external renderer process
//! - `runner`: Paced outer loop
//! - `config`: Layered, strongly typed configuration

pub mod config;
pub mod error;
pub mod handoff;
pub mod runner;
pub mod sim;
pub mod snapshot;

pub use config::Config;
pub use error::{Result, RunError};

use glam::Vec2;

/// Simulation constants that are not exposed through configuration
pub mod consts {
    /// Collision radii (world units, one tile = 1.0)
    pub const PLAYER_RADIUS: f32 = 0.35;
    pub const ENEMY_RADIUS: f32 = 0.45;
    pub const PICKUP_PLACEMENT_RADIUS: f32 = 0.3;
    pub const PROJECTILE_RADIUS: f32 = 0.2;

    /// Projectile lifetime in seconds
    pub const PROJECTILE_TTL: f32 = 2.0;

    /// Invulnerability windows (seconds)
    pub const DAMAGE_INVULNERABILITY: f32 = 1.0;
    pub const HAZARD_INVULNERABILITY: f32 = 0.75;

    /// Enemy contact attack
    pub const ENEMY_CONTACT_RANGE: f32 = 1.0;
    pub const ENEMY_ATTACK_COOLDOWN: f32 = 0.8;
    /// Below this distance an enemy stops chasing (avoids a zero-length direction)
    pub const ENEMY_CHASE_EPSILON: f32 = 0.01;

    /// Pickup collection distance
    pub const PICKUP_COLLECT_RANGE: f32 = 0.75;

    /// Loot probabilities
    pub const ENEMY_LOOT_CHANCE: f32 = 0.3;
    pub const START_PICKUP_CHANCE: f32 = 0.5;
    /// Starting pickup jitter around room center (each axis)
    pub const START_PICKUP_JITTER: f32 = 2.0;

    /// Enemy placement
    pub const ENEMY_PLACEMENT_ATTEMPTS: u32 = 32;
    pub const ENEMY_PLACEMENT_MARGIN: f32 = 1.5;
    /// Fallback y when placement sampling is exhausted (x is room center)
    pub const ENEMY_FALLBACK_Y: f32 = 2.0;

    /// Effect lifetimes (seconds)
    pub const IMPACT_TTL: f32 = 0.2;
    pub const BLOOD_SPLATTER_TTL: f32 = 0.4;

    /// Number of trailing messages exported in meta/ui
    pub const MESSAGE_TAIL: usize = 4;
}

/// Clamp each axis of an input vector to [-1, 1]
#[inline]
pub fn clamp_axes(v: Vec2) -> Vec2 {
    v.clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
}

/// Clamp each axis to [-1, 1], then normalize (zero stays zero)
#[inline]
pub fn clamp_and_normalize(v: Vec2) -> Vec2 {
    clamp_axes(v).normalize_or_zero()
}

/// A countdown has run out once less than half a step remains. Absorbs the
/// drift of repeatedly subtracting an inexact `dt`, so a lifetime of
/// `n * dt` ends on tick `n` at any tick rate.
#[inline]
pub fn ttl_expired(ttl: f32, dt: f32) -> bool {
    ttl <= dt * 0.5
}

/// Title-case a word: each letter that follows a non-letter is upper-cased,
/// the rest lower-cased ("big_hopper" -> "Big_Hopper")
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}
