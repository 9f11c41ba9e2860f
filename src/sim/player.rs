use glam::Vec2;

use super::collision::{MoveResult, SLIDE_STEP, slide};
use super::input::Intent;
use crate::engine::geometry::normalize_angle;
use crate::world::Grid;

pub const WALK_SPEED: f32 = 100.0; // map-units / second
pub const TURN_SPEED: f32 = std::f32::consts::PI / 4.0; // rad / second (45°/s)
pub const EYE_HEIGHT: f32 = 30.0;
/// Minimap marker size (width × height in world units).
pub const PLAYER_SIZE: Vec2 = Vec2::new(1.0, 30.0);

/// The only moving thing in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Eye height above the floor; drives the floor/ceiling projection.
    pub eye_height: f32,
    /// Facing, radians in `[0, 2π)`.
    pub rotation: f32,
    pub intent: Intent,
    pub walk_speed: f32,
    pub turn_speed: f32,
}

impl Player {
    pub fn new(pos: Vec2, rotation: f32) -> Self {
        Self {
            pos,
            size: PLAYER_SIZE,
            eye_height: EYE_HEIGHT,
            rotation: normalize_angle(rotation),
            intent: Intent::default(),
            walk_speed: WALK_SPEED,
            turn_speed: TURN_SPEED,
        }
    }

    /// Unit vector of the facing direction.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        let (s, c) = self.rotation.sin_cos();
        Vec2::new(c, s)
    }

    /// Integrate one frame of the current intent.
    ///
    /// A blocked step is not simply dropped: the player slides along
    /// whichever axis is still free (see [`slide`]).
    pub fn update(&mut self, dt: f32, grid: &Grid) -> MoveResult {
        self.rotation = normalize_angle(
            self.rotation + f32::from(self.intent.turn) * self.turn_speed * dt,
        );

        let step = f32::from(self.intent.walk) * self.walk_speed * dt;
        let target = self.pos + self.forward() * step;

        if !grid.wall_at(target.x, target.y) {
            self.pos = target;
            return MoveResult {
                pos: self.pos,
                ..MoveResult::default()
            };
        }

        let result = slide(grid, self.pos, self.forward() * SLIDE_STEP);
        self.pos = result.pos;
        result
    }
}
