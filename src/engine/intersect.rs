//! Grid-line scans.
//!
//! A ray can only enter a new cell by crossing either a horizontal grid line
//! (y = k·tile) or a vertical one (x = k·tile). Each scan walks one family of
//! lines from the nearest crossing outwards and stops at the first line whose
//! far-side cell is solid, or when it leaves the grid.

use glam::Vec2;

use super::geometry::{facing_down, facing_left, facing_right, facing_up};
use crate::world::{CellCode, EMPTY, Grid};

/// Candidate hit from one scan.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WallHit {
    pub point: Vec2,
    /// Raw code of the cell behind the crossing (0 if the crossing was the
    /// grid border).
    pub cell: CellCode,
    pub found: bool,
}

/// Per-ray scratch: best horizontal and vertical candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Intersections {
    pub horizontal: WallHit,
    pub vertical: WallHit,
}

impl Intersections {
    /// Run both scans, overwriting whatever the previous ray left behind.
    pub fn scan(&mut self, grid: &Grid, origin: Vec2, angle: f32) {
        *self = Self::default();
        self.horizontal = scan_horizontal(grid, origin, angle);
        self.vertical = scan_vertical(grid, origin, angle);
    }
}

/// Walk horizontal grid lines. `angle` must already be normalised.
pub fn scan_horizontal(grid: &Grid, origin: Vec2, angle: f32) -> WallHit {
    let tile = grid.tile_size();
    let tan = angle.tan();

    /* first crossing */
    let mut y = (origin.y / tile).floor() * tile;
    if facing_down(angle) {
        y += tile;
    }
    let x = origin.x + (y - origin.y) / tan;

    /* per-line increments */
    let y_step = if facing_up(angle) { -tile } else { tile };
    let mut x_step = tile / tan;
    if (facing_left(angle) && x_step > 0.0) || (facing_right(angle) && x_step < 0.0) {
        x_step = -x_step;
    }

    let probe_dy = if facing_up(angle) { -1.0 } else { 0.0 };
    march(grid, Vec2::new(x, y), Vec2::new(x_step, y_step), Vec2::new(0.0, probe_dy))
}

/// Walk vertical grid lines. `angle` must already be normalised.
pub fn scan_vertical(grid: &Grid, origin: Vec2, angle: f32) -> WallHit {
    let tile = grid.tile_size();
    let tan = angle.tan();

    /* first crossing */
    let mut x = (origin.x / tile).floor() * tile;
    if facing_right(angle) {
        x += tile;
    }
    let y = origin.y + (x - origin.x) * tan;

    /* per-line increments */
    let x_step = if facing_left(angle) { -tile } else { tile };
    let mut y_step = tile * tan;
    if (facing_up(angle) && y_step > 0.0) || (facing_down(angle) && y_step < 0.0) {
        y_step = -y_step;
    }

    let probe_dx = if facing_left(angle) { -1.0 } else { 0.0 };
    march(grid, Vec2::new(x, y), Vec2::new(x_step, y_step), Vec2::new(probe_dx, 0.0))
}

/// Step from `start` by `step` until a probe point (crossing + `probe`) is
/// solid or the crossing leaves the grid.
fn march(grid: &Grid, start: Vec2, step: Vec2, probe: Vec2) -> WallHit {
    let mut next = start;
    while grid.inside_bounds(next.x, next.y) {
        let sample = next + probe;
        if grid.wall_at(sample.x, sample.y) {
            return WallHit {
                point: next,
                cell: grid.cell_at_point(sample).unwrap_or(EMPTY),
                found: true,
            };
        }
        next += step;
    }
    WallHit::default()
}
