//! Wall response for a blocked step.
//!
//! Grid walls are axis aligned, so instead of projecting the motion onto a
//! wall normal we probe each axis on its own: whichever axis is still free
//! gets the full slide component, the blocked one gets nothing.

use glam::Vec2;

use crate::world::Grid;

/// Fixed slide length along the facing direction, map units.
pub const SLIDE_STEP: f32 = 25.0;

/// What the caller gets back.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveResult {
    pub pos: Vec2,     // final XY
    pub blocked: bool, // the direct step ran into a wall
    pub slid_x: bool,  // X-only slide was committed
    pub slid_y: bool,  // Y-only slide was committed
}

/// Try `slide.x` then `slide.y` independently from `pos`. Each component is
/// committed only if the resulting point is outside every wall.
pub fn slide(grid: &Grid, mut pos: Vec2, slide: Vec2) -> MoveResult {
    let slid_x = !grid.wall_at(pos.x + slide.x, pos.y);
    if slid_x {
        pos.x += slide.x;
    }

    let slid_y = !grid.wall_at(pos.x, pos.y + slide.y);
    if slid_y {
        pos.y += slide.y;
    }

    MoveResult {
        pos,
        blocked: true,
        slid_x,
        slid_y,
    }
}
