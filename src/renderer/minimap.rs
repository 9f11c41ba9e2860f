//! Top-down overlay: tiles, a sparse fan of rays, and the player marker,
//! all scaled down into the upper-left corner of the frame.

use glam::Vec2;

use crate::config::Config;
use crate::renderer::{Framebuffer, Rgba, Scene};

const RAY_COLOR: Rgba = 0xFF_FF_00_00;
const PLAYER_COLOR: Rgba = 0xFF_FF_FF_FF;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minimap {
    /// World units → overlay pixels.
    pub scale: f32,
    /// Draw every n-th ray.
    pub ray_stride: usize,
}

impl Default for Minimap {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for Minimap {
    fn from(cfg: &Config) -> Self {
        Self {
            scale: cfg.minimap_scale,
            ray_stride: cfg.minimap_ray_stride.max(1),
        }
    }
}

impl Minimap {
    pub fn draw(&self, fb: &mut Framebuffer, scene: &Scene<'_>) {
        self.draw_tiles(fb, scene);
        self.draw_rays(fb, scene);
        self.draw_player(fb, scene);
    }

    fn draw_tiles(&self, fb: &mut Framebuffer, scene: &Scene<'_>) {
        let grid = scene.grid;
        let side = (grid.tile_size() * self.scale) as i32;
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let origin = self.project(Vec2::new(col as f32, row as f32) * grid.tile_size());
                draw_rect(fb, origin.0, origin.1, side, side, grid.tile_color(row, col));
            }
        }
    }

    fn draw_rays(&self, fb: &mut Framebuffer, scene: &Scene<'_>) {
        let (x0, y0) = self.project(scene.player.pos);
        for ray in scene.rays.iter().step_by(self.ray_stride.max(1)) {
            // a ray that found nothing has no endpoint worth drawing
            if !ray.found() {
                continue;
            }
            let (x1, y1) = self.project(ray.hit);
            draw_line(fb, x0, y0, x1, y1, RAY_COLOR);
        }
    }

    fn draw_player(&self, fb: &mut Framebuffer, scene: &Scene<'_>) {
        let (x, y) = self.project(scene.player.pos);
        let size = scene.player.size * self.scale;
        draw_rect(fb, x, y, size.x as i32, size.y as i32, PLAYER_COLOR);
    }

    #[inline]
    fn project(&self, p: Vec2) -> (i32, i32) {
        ((p.x * self.scale) as i32, (p.y * self.scale) as i32)
    }
}

/// Filled rectangle: columns `x..=x + w`, rows `y..y + h`.
pub fn draw_rect(fb: &mut Framebuffer, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
    for i in x..=x + w {
        for j in y..y + h {
            fb.set(i, j, color);
        }
    }
}

/// DDA line: one pixel per step along the longer axis, the other axis
/// interpolated and rounded. The end point itself is not plotted.
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let longest = dx.abs().max(dy.abs());
    if longest == 0 {
        return;
    }

    let inc = Vec2::new(dx as f32, dy as f32) / longest as f32;
    let mut cur = Vec2::new(x0 as f32, y0 as f32);
    for _ in 0..longest {
        fb.set(cur.x.round() as i32, cur.y.round() as i32, color);
        cur += inc;
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
