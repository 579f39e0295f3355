//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (population order)
//! - No file, clock or platform dependencies

pub mod collision;
pub mod combat;
pub mod loot;
pub mod room;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{MoveResult, circles_overlap, move_actor};
pub use loot::roll_pickup_kind;
pub use room::{Room, TileKind, generate_room};
pub use state::{
    Actor, ActorKind, ActorState, Effect, EffectKind, Inventory, Meta, Pickup, PickupKind,
    Projectile, ProjectileKind, ProjectileOwner, World,
};
pub use tick::{TickInput, tick};
