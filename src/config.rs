//! Game configuration
//!
//! Built-in defaults deep-merged with an optional JSON override document,
//! then checked into a strongly typed [`Config`]. Loaded once at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Slowest accepted tick rate (one tick every 1000 s)
pub const MIN_TICK_RATE: f32 = 1e-3;

/// Errors raised while loading configuration (all fatal at startup)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config override must be a JSON object")]
    NotAnObject,

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Room and loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    pub room_width: usize,
    pub room_height: usize,
    pub tile_size: u32,
    pub tick_rate: f32,
    /// `None` seeds from wall-clock time
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            room_width: 20,
            room_height: 12,
            tile_size: 32,
            tick_rate: 60.0,
            rng_seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerConfig {
    pub hp: i32,
    pub speed: f32,
    /// Seconds between shots
    pub fire_delay: f32,
    pub projectile_speed: f32,
    pub projectile_damage: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            hp: 6,
            speed: 4.0,
            fire_delay: 0.33,
            projectile_speed: 9.0,
            projectile_damage: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnemyConfig {
    pub variants: Vec<String>,
    pub spawn_min: u32,
    pub spawn_max: u32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub hp_min: i32,
    pub hp_max: i32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            variants: vec!["charger".into(), "hopper".into(), "spitter".into()],
            spawn_min: 3,
            spawn_max: 6,
            speed_min: 1.2,
            speed_max: 2.4,
            hp_min: 2,
            hp_max: 5,
        }
    }
}

/// Sequential split weights for the pickup kind draw.
///
/// Thresholds are consumed in order heart -> coin -> key, bomb takes the
/// remainder; `chance_bomb` is carried for documentation only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PickupConfig {
    pub chance_heart: f32,
    pub chance_coin: f32,
    pub chance_key: f32,
    pub chance_bomb: f32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            chance_heart: 0.25,
            chance_coin: 0.4,
            chance_key: 0.2,
            chance_bomb: 0.15,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub game: GameConfig,
    pub player: PlayerConfig,
    pub enemies: EnemyConfig,
    pub pickups: PickupConfig,
}

impl Config {
    /// Load defaults layered with the override file at `path`.
    ///
    /// A missing file yields the defaults; an unreadable or malformed file
    /// is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_override_str(&text)?;
        log::info!("Loaded config overrides from {}", path.display());
        Ok(config)
    }

    /// Layer an override document (JSON text) over the defaults
    pub fn from_override_str(text: &str) -> Result<Self, ConfigError> {
        let override_doc: Value = serde_json::from_str(text)?;
        Self::from_override(override_doc)
    }

    /// Layer an already-parsed override document over the defaults.
    /// `null` counts as an empty document.
    pub fn from_override(override_doc: Value) -> Result<Self, ConfigError> {
        let override_doc = match override_doc {
            Value::Null => Value::Object(Default::default()),
            obj @ Value::Object(_) => obj,
            _ => return Err(ConfigError::NotAnObject),
        };
        let mut merged = serde_json::to_value(Self::default())?;
        deep_merge(&mut merged, override_doc);
        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Fixed simulation step in seconds
    pub fn delta_time(&self) -> f32 {
        1.0 / self.game.tick_rate
    }

    /// Check ranges and invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        let g = &self.game;
        if g.room_width < 4 || g.room_height < 4 {
            return invalid(format!(
                "room must be at least 4x4, got {}x{}",
                g.room_width, g.room_height
            ));
        }
        if !g.tick_rate.is_finite() || g.tick_rate < MIN_TICK_RATE {
            return invalid(format!(
                "tick_rate must be a finite value >= {}, got {}",
                MIN_TICK_RATE, g.tick_rate
            ));
        }
        let dt = self.delta_time();
        if !dt.is_finite() || dt <= 0.0 {
            return invalid(format!("tick_rate {} gives an unusable step {}", g.tick_rate, dt));
        }

        let p = &self.player;
        if p.hp <= 0 {
            return invalid(format!("player.hp must be positive, got {}", p.hp));
        }
        if p.speed < 0.0 || p.fire_delay < 0.0 || p.projectile_speed < 0.0 {
            return invalid("player speed, fire_delay and projectile_speed must be >= 0".into());
        }

        let e = &self.enemies;
        if e.variants.is_empty() {
            return invalid("enemies.variants must not be empty".into());
        }
        if e.spawn_min > e.spawn_max {
            return invalid(format!("enemies.spawn_min {} > spawn_max {}", e.spawn_min, e.spawn_max));
        }
        if e.hp_min <= 0 || e.hp_min > e.hp_max {
            return invalid(format!("enemies.hp range [{}, {}] is invalid", e.hp_min, e.hp_max));
        }
        if e.speed_min < 0.0 || e.speed_min > e.speed_max {
            return invalid(format!(
                "enemies.speed range [{}, {}] is invalid",
                e.speed_min, e.speed_max
            ));
        }

        let k = &self.pickups;
        for (name, chance) in [
            ("chance_heart", k.chance_heart),
            ("chance_coin", k.chance_coin),
            ("chance_key", k.chance_key),
            ("chance_bomb", k.chance_bomb),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return invalid(format!("pickups.{name} must be in [0, 1], got {chance}"));
            }
        }
        Ok(())
    }
}

/// Recursively merge `overlay` into `base`: objects merge key by key,
/// any other value replaces the base value.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        deep_merge(existing, value);
                    }
                    _ => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
