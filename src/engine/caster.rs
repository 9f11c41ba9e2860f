use glam::Vec2;

use super::geometry::{distance, normalize_angle};
use super::intersect::{Intersections, WallHit};
use crate::sim::Player;
use crate::world::{CellCode, Grid};

/// What one screen column sees this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayRecord {
    /// Normalised cast angle.
    pub angle: f32,
    pub hit: Vec2,
    /// Euclidean distance to `hit`; `f32::INFINITY` when no wall was found.
    pub distance: f32,
    /// Hit on a vertical grid line (x = k·tile).
    pub vertical: bool,
    /// Raw code of the struck cell.
    pub cell: CellCode,
}

impl Default for RayRecord {
    fn default() -> Self {
        Self {
            angle: 0.0,
            hit: Vec2::ZERO,
            distance: f32::INFINITY,
            vertical: false,
            cell: 0,
        }
    }
}

impl RayRecord {
    #[inline]
    pub fn found(&self) -> bool {
        self.distance.is_finite()
    }

    /// Texture slot of the struck surface (`cell - 1`).
    #[inline]
    pub fn texture_index(&self) -> Option<usize> {
        usize::try_from(self.cell - 1).ok()
    }
}

/// Casts one ray per screen column and keeps the records for the renderer.
#[derive(Clone, Debug)]
pub struct RayCaster {
    records: Vec<RayRecord>,
    scratch: Intersections,
    fov: f32,
    plane_dist: f32,
}

impl RayCaster {
    /// Caster for a `width`-pixel view with horizontal field of view `fov`.
    pub fn new(width: usize, fov: f32) -> Self {
        Self {
            records: vec![RayRecord::default(); width],
            scratch: Intersections::default(),
            fov,
            plane_dist: projection_plane_distance(width, fov),
        }
    }

    /// Reallocate for a new view width.
    pub fn resize(&mut self, width: usize) {
        if width != self.records.len() {
            self.records.resize(width, RayRecord::default());
            self.plane_dist = projection_plane_distance(width, self.fov);
        }
    }

    #[inline]
    pub fn records(&self) -> &[RayRecord] {
        &self.records
    }

    #[inline]
    pub fn num_rays(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn projection_plane_distance(&self) -> f32 {
        self.plane_dist
    }

    /// Cast one ray from `origin` and store the nearer hit in `column`.
    pub fn cast_ray(&mut self, grid: &Grid, origin: Vec2, angle: f32, column: usize) {
        let angle = normalize_angle(angle);
        self.scratch.scan(grid, origin, angle);

        let horz_dist = hit_distance(origin, &self.scratch.horizontal);
        let vert_dist = hit_distance(origin, &self.scratch.vertical);

        let (hit, dist, vertical) = if vert_dist < horz_dist {
            (self.scratch.vertical, vert_dist, true)
        } else {
            (self.scratch.horizontal, horz_dist, false)
        };

        self.records[column] = RayRecord {
            angle,
            hit: hit.point,
            distance: dist,
            vertical,
            cell: hit.cell,
        };
    }

    /// One ray per column, spread over the projection plane (not evenly in
    /// angle) so walls do not bend at the screen edges.
    pub fn cast_all_rays(&mut self, grid: &Grid, player: &Player) {
        let half = (self.records.len() / 2) as f32;
        for column in 0..self.records.len() {
            let offset = (column as f32 - half) / self.plane_dist;
            let angle = player.rotation + offset.atan();
            self.cast_ray(grid, player.pos, angle, column);
        }
    }
}

/// `(width / 2) / tan(fov / 2)`.
#[inline]
pub fn projection_plane_distance(width: usize, fov: f32) -> f32 {
    (width as f32 * 0.5) / (fov * 0.5).tan()
}

#[inline]
fn hit_distance(origin: Vec2, hit: &WallHit) -> f32 {
    if hit.found {
        distance(origin, hit.point)
    } else {
        f32::INFINITY
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, PI};

    fn single_block() -> Grid {
        #[rustfmt::skip]
        let cells = vec![
            0, 0, 0,
            0, 1, 0,
            0, 0, 0,
        ];
        Grid::from_cells(3, 3, 64.0, cells)
    }

    #[test]
    fn hits_near_corner_of_the_block() {
        let grid = single_block();
        let mut caster = RayCaster::new(1, FRAC_PI_3);
        caster.cast_ray(&grid, Vec2::new(32.0, 32.0), FRAC_PI_4, 0);

        let r = caster.records()[0];
        assert!(r.found());
        assert!((r.hit - Vec2::new(64.0, 64.0)).length() < 1e-2, "{:?}", r.hit);
        assert_eq!(r.cell, 1);
        assert_eq!(r.texture_index(), Some(0));
        assert!((r.distance - 32.0 * 2f32.sqrt()).abs() < 1e-2);
    }

    #[test]
    fn casting_twice_is_identical() {
        let grid = single_block();
        let mut caster = RayCaster::new(2, FRAC_PI_3);
        caster.cast_ray(&grid, Vec2::new(20.0, 150.0), -0.7, 0);
        // unrelated ray in between must not leak into the next cast
        caster.cast_ray(&grid, Vec2::new(170.0, 20.0), 2.0, 1);
        let first = caster.records()[0];
        caster.cast_ray(&grid, Vec2::new(20.0, 150.0), -0.7, 0);
        assert_eq!(caster.records()[0], first);
    }

    #[test]
    fn nearer_vertical_hit_wins() {
        // wall column right next to the player, open rows far away
        #[rustfmt::skip]
        let grid = Grid::from_cells(4, 4, 64.0, vec![
            0, 0, 0, 0,
            0, 0, 2, 0,
            0, 0, 2, 0,
            0, 0, 0, 0,
        ]);
        let mut caster = RayCaster::new(1, FRAC_PI_3);
        // shallow angle east-south-east: reaches x=128 long before y=192
        caster.cast_ray(&grid, Vec2::new(100.0, 100.0), 0.1, 0);
        let r = caster.records()[0];
        assert!(r.vertical);
        assert_eq!(r.cell, 2);
        assert!((r.hit.x - 128.0).abs() < 1e-3);

        let mut probe = Intersections::default();
        probe.scan(&grid, Vec2::new(100.0, 100.0), 0.1);
        let horz = hit_distance(Vec2::new(100.0, 100.0), &probe.horizontal);
        assert!(r.distance < horz);
    }

    #[test]
    fn nearer_horizontal_hit_wins() {
        #[rustfmt::skip]
        let grid = Grid::from_cells(4, 4, 64.0, vec![
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 3, 3, 0,
            0, 0, 0, 0,
        ]);
        let mut caster = RayCaster::new(1, FRAC_PI_3);
        // steep angle south-south-east: reaches y=128 before x=128
        caster.cast_ray(&grid, Vec2::new(100.0, 100.0), FRAC_PI_2 - 0.1, 0);
        let r = caster.records()[0];
        assert!(!r.vertical);
        assert_eq!(r.cell, 3);
        assert!((r.hit.y - 128.0).abs() < 1e-3);
    }

    #[test]
    fn angles_are_stored_normalised() {
        let grid = single_block();
        let mut caster = RayCaster::new(1, FRAC_PI_3);
        caster.cast_ray(&grid, Vec2::new(32.0, 32.0), -PI / 2.0, 0);
        let r = caster.records()[0];
        assert!((r.angle - 1.5 * PI).abs() < 1e-5);
        // looking north from the top row lands on the border
        assert!(r.found());
        assert_eq!(r.cell, 0);
        assert_eq!(r.texture_index(), None);
    }

    #[test]
    fn column_angles_follow_projection_plane() {
        let grid = Grid::empty(4, 4, 64.0);
        let player = Player::new(Vec2::new(128.0, 128.0), 0.0);
        let mut caster = RayCaster::new(320, FRAC_PI_3);
        caster.cast_all_rays(&grid, &player);

        let d = caster.projection_plane_distance();
        assert!((d - 160.0 / (FRAC_PI_3 / 2.0).tan()).abs() < 1e-3);

        let rays = caster.records();
        assert_eq!(rays.len(), 320);
        assert!(rays[160].angle.abs() < 1e-6);
        let expected_first = normalize_angle((-160.0f32 / d).atan());
        assert!((rays[0].angle - expected_first).abs() < 1e-5);
        // left edge sits half a FOV to the left
        assert!((rays[0].angle - (2.0 * PI - FRAC_PI_3 / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn resize_reallocates_records() {
        let mut caster = RayCaster::new(10, FRAC_PI_3);
        caster.resize(40);
        assert_eq!(caster.num_rays(), 40);
        assert!((caster.projection_plane_distance() - projection_plane_distance(40, FRAC_PI_3)).abs() < 1e-6);
    }
}
