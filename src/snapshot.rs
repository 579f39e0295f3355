//! JSON mapping between the world and the renderer
//!
//! [`WorldSnapshot`] is what the renderer reads every tick;
//! [`InputSnapshot`] is what it writes. Input parsing never fails: anything
//! missing or malformed reads as "no input".

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sim::{
    ActorKind, ActorState, EffectKind, Meta, PickupKind, ProjectileKind, Room, TickInput,
    TileKind, World,
};

/// Velocity magnitude below which the exported facing is 0
const FACING_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilemapSnapshot {
    pub width: usize,
    pub height: usize,
    pub tile_size: u32,
    pub tiles: Vec<Vec<TileKind>>,
}

impl From<&Room> for TilemapSnapshot {
    fn from(room: &Room) -> Self {
        Self {
            width: room.width,
            height: room.height,
            tile_size: room.tile_size,
            tiles: room.tiles.clone(),
        }
    }
}

/// Player entry; enemies use the same shape with the player-only fields
/// omitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActorKind,
    pub variant: String,
    pub x: f32,
    pub y: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir_x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir_y: Option<f32>,
    pub hp: i32,
    pub max_hp: i32,
    pub state: ActorState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invulnerable: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    pub id: String,
    pub owner: String,
    pub kind: ProjectileKind,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub damage: i32,
    pub ttl: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupSnapshot {
    pub id: String,
    pub kind: PickupKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSnapshot {
    pub id: String,
    pub kind: EffectKind,
    pub x: f32,
    pub y: f32,
    pub ttl: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSnapshot {
    pub messages: Vec<String>,
    /// Always null; rooms have no boss
    pub boss_health: Option<i32>,
}

/// Full world state as exported to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub meta: Meta,
    pub tilemap: TilemapSnapshot,
    /// Player first, then enemies in population order
    pub actors: Vec<ActorSnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
    pub pickups: Vec<PickupSnapshot>,
    pub effects: Vec<EffectSnapshot>,
    pub ui: UiSnapshot,
}

impl WorldSnapshot {
    pub fn capture(world: &World) -> Self {
        let p = &world.player;
        let player = ActorSnapshot {
            id: p.id.clone(),
            kind: p.kind,
            variant: p.variant.clone(),
            x: p.pos.x,
            y: p.pos.y,
            dir_x: Some(facing(p.vel.x)),
            dir_y: Some(facing(p.vel.y)),
            hp: p.hp,
            max_hp: p.max_hp,
            state: p.state,
            speed: Some(p.speed),
            items: Some(Vec::new()),
            invulnerable: Some(p.invulnerability > 0.0),
        };

        let enemies = world.enemies.iter().map(|e| ActorSnapshot {
            id: e.id.clone(),
            kind: e.kind,
            variant: e.variant.clone(),
            x: e.pos.x,
            y: e.pos.y,
            dir_x: None,
            dir_y: None,
            hp: e.hp,
            max_hp: e.max_hp,
            state: e.state,
            speed: None,
            items: None,
            invulnerable: None,
        });

        Self {
            meta: world.meta.clone(),
            tilemap: TilemapSnapshot::from(&world.room),
            actors: std::iter::once(player).chain(enemies).collect(),
            projectiles: world
                .projectiles
                .iter()
                .map(|pr| ProjectileSnapshot {
                    id: pr.id.clone(),
                    owner: pr.owner.as_str().to_string(),
                    kind: pr.kind,
                    x: pr.pos.x,
                    y: pr.pos.y,
                    vx: pr.vel.x,
                    vy: pr.vel.y,
                    damage: pr.damage,
                    ttl: pr.ttl,
                    radius: pr.radius,
                })
                .collect(),
            pickups: world
                .pickups
                .iter()
                .map(|pk| PickupSnapshot {
                    id: pk.id.clone(),
                    kind: pk.kind,
                    x: pk.pos.x,
                    y: pk.pos.y,
                })
                .collect(),
            effects: world
                .effects
                .iter()
                .map(|ef| EffectSnapshot {
                    id: ef.id.clone(),
                    kind: ef.kind,
                    x: ef.pos.x,
                    y: ef.pos.y,
                    ttl: ef.ttl,
                })
                .collect(),
            ui: UiSnapshot {
                messages: world.meta.messages.clone(),
                boss_health: None,
            },
        }
    }
}

/// Sign of a velocity component, or 0 when it is small
fn facing(v: f32) -> f32 {
    if v.abs() > FACING_THRESHOLD {
        1.0_f32.copysign(v)
    } else {
        0.0
    }
}

/// Renderer input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub quit: bool,
    pub move_dir: Vec2,
    pub attack_dir: Vec2,
}

impl InputSnapshot {
    /// Parse renderer input leniently. Malformed JSON, a non-object top
    /// level or wrongly typed fields all fall back to defaults.
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_value(&value),
            Err(err) => {
                log::debug!("Ignoring malformed input snapshot: {}", err);
                Self::default()
            }
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            quit: obj.get("quit").is_some_and(truthy),
            move_dir: read_vec(obj.get("move")),
            attack_dir: read_vec(obj.get("attack")),
        }
    }

    /// Raw vectors are passed through; the tick clamps them
    pub fn to_tick_input(self) -> TickInput {
        TickInput {
            quit: self.quit,
            move_dir: self.move_dir,
            attack_dir: self.attack_dir,
        }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Null => false,
    }
}

/// `{x, y}` with non-numeric or missing axes read as 0
fn read_vec(value: Option<&Value>) -> Vec2 {
    let axis = |key: &str| {
        value
            .and_then(|v| v.get(key))
            .and_then(Value::as_f64)
            .filter(|f| f.is_finite())
            .unwrap_or(0.0) as f32
    };
    Vec2::new(axis("x"), axis("y"))
}
