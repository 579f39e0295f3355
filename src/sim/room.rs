//! Room tile grid and procedural generation
//!
//! One world unit is one tile; tile (x, y) covers [x, x+1) x [y, y+1).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Cumulative roll thresholds for interior cells
const ROCK_THRESHOLD: f32 = 0.06;
const PIT_THRESHOLD: f32 = 0.10;
const SPIKES_THRESHOLD: f32 = 0.14;

/// Tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    #[default]
    Floor,
    Wall,
    Rock,
    Pit,
    Spikes,
    DoorUp,
    DoorDown,
    DoorLeft,
    DoorRight,
}

impl TileKind {
    /// Blocks movement and projectiles
    pub fn is_solid(self) -> bool {
        match self {
            TileKind::Wall | TileKind::Rock | TileKind::Pit => true,
            TileKind::Floor
            | TileKind::Spikes
            | TileKind::DoorUp
            | TileKind::DoorDown
            | TileKind::DoorLeft
            | TileKind::DoorRight => false,
        }
    }

    /// Damages the player on contact
    pub fn is_hazard(self) -> bool {
        matches!(self, TileKind::Spikes)
    }
}

/// A generated room (immutable for the duration of a run)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub width: usize,
    pub height: usize,
    pub tile_size: u32,
    /// Row-major: `tiles[y][x]`
    pub tiles: Vec<Vec<TileKind>>,
}

impl Room {
    /// A room of plain floor enclosed by walls (no doors, no obstacles)
    pub fn walled(width: usize, height: usize, tile_size: u32) -> Self {
        let mut tiles = vec![vec![TileKind::Floor; width]; height];
        for x in 0..width {
            tiles[0][x] = TileKind::Wall;
            tiles[height - 1][x] = TileKind::Wall;
        }
        for row in tiles.iter_mut() {
            row[0] = TileKind::Wall;
            row[width - 1] = TileKind::Wall;
        }
        Self {
            width,
            height,
            tile_size,
            tiles,
        }
    }

    /// Room center in world units
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// Tile containing a world position. Coordinates are truncated and
    /// clamped into the grid, so out-of-range lookups hit the border.
    pub fn tile_at(&self, pos: Vec2) -> TileKind {
        let xi = clamp_index(pos.x, self.width);
        let yi = clamp_index(pos.y, self.height);
        self.tiles[yi][xi]
    }

    /// True if a box of half-extent `radius` at `pos` has all four
    /// corners on non-solid tiles
    pub fn is_walkable(&self, pos: Vec2, radius: f32) -> bool {
        let corners = [
            Vec2::new(pos.x - radius, pos.y - radius),
            Vec2::new(pos.x + radius, pos.y - radius),
            Vec2::new(pos.x - radius, pos.y + radius),
            Vec2::new(pos.x + radius, pos.y + radius),
        ];
        corners.iter().all(|&c| !self.tile_at(c).is_solid())
    }

    /// Set a tile (room setup and tests)
    pub fn set(&mut self, x: usize, y: usize, kind: TileKind) {
        self.tiles[y][x] = kind;
    }
}

/// Truncate toward zero, then clamp to [0, len - 1]
fn clamp_index(coord: f32, len: usize) -> usize {
    let max = len.saturating_sub(1) as i64;
    (coord as i64).clamp(0, max) as usize
}

/// Generate a room: border walls, a door at the middle of each edge and
/// randomly scattered rocks, pits and spikes. One draw per interior cell,
/// row by row. Interior connectivity is not guaranteed.
pub fn generate_room<R: Rng + ?Sized>(
    rng: &mut R,
    width: usize,
    height: usize,
    tile_size: u32,
) -> Room {
    let mut room = Room::walled(width, height, tile_size);

    room.set(width / 2, 0, TileKind::DoorUp);
    room.set(width / 2, height - 1, TileKind::DoorDown);
    room.set(0, height / 2, TileKind::DoorLeft);
    room.set(width - 1, height / 2, TileKind::DoorRight);

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let roll: f32 = rng.random();
            let kind = if roll < ROCK_THRESHOLD {
                TileKind::Rock
            } else if roll < PIT_THRESHOLD {
                TileKind::Pit
            } else if roll < SPIKES_THRESHOLD {
                TileKind::Spikes
            } else {
                continue;
            };
            room.set(x, y, kind);
        }
    }

    room
}
