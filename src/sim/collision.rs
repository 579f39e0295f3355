//! Collision detection and response against the tile grid
//!
//! Movement is resolved one axis at a time, x before y, which gives
//! sliding along walls. A blocked axis zeroes that velocity component for
//! the step and leaves the position on that axis unchanged.

use glam::Vec2;

use super::room::Room;
use super::state::Actor;

/// Which axes moved during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    pub moved_x: bool,
    pub moved_y: bool,
}

/// Move `actor` by `vel * dt` with axis-separated resolution against solid
/// tiles, using the actor's own collision radius
pub fn move_actor(room: &Room, actor: &mut Actor, dt: f32) -> MoveResult {
    let radius = actor.radius();
    let desired = actor.pos + actor.vel * dt;
    let mut result = MoveResult::default();

    if room.is_walkable(Vec2::new(desired.x, actor.pos.y), radius) {
        actor.pos.x = desired.x;
        result.moved_x = true;
    } else {
        actor.vel.x = 0.0;
    }

    // Uses the already-resolved x
    if room.is_walkable(Vec2::new(actor.pos.x, desired.y), radius) {
        actor.pos.y = desired.y;
        result.moved_y = true;
    } else {
        actor.vel.y = 0.0;
    }

    result
}

/// Circle-vs-circle overlap (strict)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_RADIUS;
    use crate::sim::room::TileKind;
    use crate::sim::state::ActorKind;

    fn player_at(pos: Vec2, vel: Vec2) -> Actor {
        let mut a = Actor::new("player", ActorKind::Player, "isaac", pos, 4.0, 6);
        a.vel = vel;
        a
    }

    #[test]
    fn test_free_diagonal_move() {
        let room = Room::walled(10, 10, 32);
        let mut a = player_at(Vec2::new(5.0, 5.0), Vec2::new(1.0, 1.0));
        let r = move_actor(&room, &mut a, 0.5);
        assert_eq!(r, MoveResult { moved_x: true, moved_y: true });
        assert_eq!(a.pos, Vec2::new(5.5, 5.5));
    }

    #[test]
    fn test_slides_along_x_wall() {
        // Left wall occupies column 0; player hugging it moves diagonally
        // into it: x is blocked, y still moves
        let room = Room::walled(10, 10, 32);
        let start = Vec2::new(1.0 + PLAYER_RADIUS + 0.01, 5.0);
        let mut a = player_at(start, Vec2::new(-4.0, 4.0));
        let r = move_actor(&room, &mut a, 0.1);
        assert!(!r.moved_x);
        assert!(r.moved_y);
        assert_eq!(a.pos.x, start.x);
        assert!((a.pos.y - 5.4).abs() < 1e-5);
        assert_eq!(a.vel.x, 0.0);
        assert_eq!(a.vel.y, 4.0);
    }

    #[test]
    fn test_slides_along_y_wall() {
        let room = Room::walled(10, 10, 32);
        let start = Vec2::new(5.0, 1.0 + PLAYER_RADIUS + 0.01);
        let mut a = player_at(start, Vec2::new(4.0, -4.0));
        let r = move_actor(&room, &mut a, 0.1);
        assert!(r.moved_x);
        assert!(!r.moved_y);
        assert_eq!(a.pos.y, start.y);
        assert_eq!(a.vel.y, 0.0);
    }

    #[test]
    fn test_x_resolved_before_y() {
        // Rock diagonally ahead: moving x alone is fine, and y alone from the
        // start is fine, but y after x would enter the rock
        let mut room = Room::walled(10, 10, 32);
        room.set(6, 6, TileKind::Rock);
        let start = Vec2::new(5.5, 5.5);
        let mut a = player_at(start, Vec2::new(1.0, 1.0));
        // dt chosen so the desired box reaches into column/row 6
        let r = move_actor(&room, &mut a, 0.3);
        assert!(r.moved_x);
        assert!(!r.moved_y);
        assert!((a.pos.x - 5.8).abs() < 1e-5);
        assert_eq!(a.pos.y, 5.5);
    }

    #[test]
    fn test_spikes_do_not_block() {
        let mut room = Room::walled(10, 10, 32);
        room.set(6, 5, TileKind::Spikes);
        let mut a = player_at(Vec2::new(5.5, 5.5), Vec2::new(1.0, 0.0));
        let r = move_actor(&room, &mut a, 0.5);
        assert!(r.moved_x);
        assert_eq!(a.pos.x, 6.0);
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, 0.5, Vec2::new(0.9, 0.0), 0.5));
        assert!(!circles_overlap(Vec2::ZERO, 0.5, Vec2::new(1.0, 0.0), 0.5));
    }
}
