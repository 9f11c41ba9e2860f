//! ---------------------------------------------------------------------------
//! Classic software (CPU) column renderer
//!
//! * Fills a [`Framebuffer`] in **0xAARRGGBB** format.
//! * One pass per screen column: floor below the wall span, ceiling above
//!   it, then the textured wall slice itself.
//! * Walls struck on a vertical grid line are darkened by a fixed factor,
//!   the only lighting there is.
//! ---------------------------------------------------------------------------

use crate::{
    config::Config,
    engine::RayRecord,
    renderer::{Framebuffer, Minimap, Renderer, Rgba, Scene},
    world::{Texture, TextureBank, TextureId, wrap},
};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// Knobs that are not geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shading {
    pub floor_texture: TextureId,
    pub ceiling_texture: TextureId,
    /// Per-channel multiplier for vertical-line hits.
    pub shade_factor: f32,
    pub clear_color: Rgba,
}

impl Default for Shading {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for Shading {
    fn from(cfg: &Config) -> Self {
        Self {
            floor_texture: cfg.floor_texture,
            ceiling_texture: cfg.ceiling_texture,
            shade_factor: cfg.shade_factor,
            clear_color: 0xFF_00_00_00,
        }
    }
}

/// Wolfenstein-style column renderer.
#[derive(Default)]
pub struct Software {
    fb: Framebuffer,
    shading: Shading,
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        self.fb.resize(w, h);
        self.fb.clear(self.shading.clear_color);
    }

    fn draw_view(&mut self, scene: &Scene<'_>, bank: &TextureBank) {
        let floor = bank.texture(self.shading.floor_texture);
        let ceiling = bank.texture(self.shading.ceiling_texture);

        for (x, ray) in scene.rays.iter().enumerate() {
            let Some(span) = self.wall_span(ray, scene) else {
                continue;
            };
            let col = x as i32;
            self.draw_floor(col, span.bottom - 1, ray, scene, floor);
            self.draw_ceiling(col, span.top, ray, scene, ceiling);
            self.draw_wall(col, &span, ray, scene, bank.for_cell(ray.cell));
        }
    }

    fn draw_minimap(&mut self, scene: &Scene<'_>, minimap: &Minimap) {
        minimap.draw(&mut self.fb, scene);
    }

    fn end_frame<F, T>(&mut self, submit: F) -> T
    where
        F: FnOnce(&[Rgba], usize, usize) -> T,
    {
        submit(self.fb.as_slice(), self.fb.width(), self.fb.height())
    }
}

/*──────────────────────── helper structs ─────────────────────────────*/

/// On-screen extent of one wall slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct WallSpan {
    /// Unclamped projected height in pixels.
    height: i32,
    /// First wall row, clamped to the screen.
    top: i32,
    /// One past the last wall row, clamped to the screen.
    bottom: i32,
}

/*──────────────────────── column rendering ───────────────────────────*/

impl Software {
    pub fn new(shading: Shading) -> Self {
        Self {
            fb: Framebuffer::default(),
            shading,
        }
    }

    #[inline]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    /// Perpendicular (fisheye-free) distance → projected span. `None` when
    /// the ray points behind the view plane.
    fn wall_span(&self, ray: &RayRecord, scene: &Scene<'_>) -> Option<WallSpan> {
        let perp = ray.distance * (ray.angle - scene.player.rotation).cos();
        if !(perp > 0.0) {
            return None;
        }

        let h = self.fb.height() as i32;
        let half_h = h / 2;
        let height = ((scene.grid.tile_size() / perp) * scene.plane_dist) as i32;
        Some(WallSpan {
            height,
            top: (half_h - height / 2).max(0),
            bottom: (half_h + height / 2).min(h),
        })
    }

    fn draw_wall(
        &mut self,
        x: i32,
        span: &WallSpan,
        ray: &RayRecord,
        scene: &Scene<'_>,
        tex: &Texture,
    ) {
        let tile = (scene.grid.tile_size() as i32).max(1);
        let half_h = self.fb.height() as i32 / 2;

        // which face was struck decides the texture axis
        let along = if ray.vertical { ray.hit.y } else { ray.hit.x };
        let u = wrap(along as i32, tile as usize) * tex.w / tile as usize;
        let v_scale = tex.h as f32 / span.height.max(1) as f32;

        for y in span.top..span.bottom {
            let from_top = y + span.height / 2 - half_h;
            let v = (from_top as f32 * v_scale) as usize;
            let mut color = tex.sample_clamped(u, v);
            if ray.vertical {
                color = darken(color, self.shading.shade_factor);
            }
            self.fb.set(x, y, color);
        }
    }

    /// Rows from `first_row` to the bottom edge.
    fn draw_floor(
        &mut self,
        x: i32,
        first_row: i32,
        ray: &RayRecord,
        scene: &Scene<'_>,
        tex: &Texture,
    ) {
        let h = self.fb.height() as i32;
        for row in first_row.max(0)..h {
            let d = self.plane_distance_at(row, ray, scene);
            let u = (d * ray.angle.cos() + scene.player.pos.x).floor() as i32;
            let v = (d * ray.angle.sin() + scene.player.pos.y).floor() as i32;
            self.fb.set(x, row, tex.sample_wrapped(u, v));
        }
    }

    /// Rows from the top edge down to (not including) `end_row`.
    fn draw_ceiling(
        &mut self,
        x: i32,
        end_row: i32,
        ray: &RayRecord,
        scene: &Scene<'_>,
        tex: &Texture,
    ) {
        for row in 0..end_row {
            let d = self.plane_distance_at(row, ray, scene);
            let u = (-d * ray.angle.cos() + scene.player.pos.x).floor() as i32;
            let v = (-d * ray.angle.sin() + scene.player.pos.y).floor() as i32;
            self.fb.set(x, row, tex.sample_wrapped(u, v));
        }
    }

    /// Similar triangles: distance along the ray to where screen `row`
    /// meets the floor plane (negative above the horizon).
    #[inline]
    fn plane_distance_at(&self, row: i32, ray: &RayRecord, scene: &Scene<'_>) -> f32 {
        let half_h = self.fb.height() as i32 / 2;
        let ratio = scene.player.eye_height / (row - half_h) as f32;
        ratio * scene.plane_dist / (ray.angle - scene.player.rotation).cos()
    }
}

/// Scale R, G and B by `factor`; alpha is kept.
#[inline]
pub fn darken(color: Rgba, factor: f32) -> Rgba {
    let channel = |shift: u32| {
        let c = ((color >> shift) & 0xFF) as f32 * factor;
        ((c as u32) & 0xFF) << shift
    };
    (color & 0xFF00_0000) | channel(16) | channel(8) | channel(0)
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::RayCaster,
        renderer::RendererExt,
        sim::Player,
        world::{Grid, Texture, TextureBank},
    };
    use glam::Vec2;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI};

    const RED: Rgba = 0xFF_FF_00_00;
    const BLUE: Rgba = 0xFF_00_00_FF;
    const GREEN: Rgba = 0xFF_00_FF_00;
    const CLEAR: Rgba = 0xFF_00_00_00;

    /* tiny helpers ---------------------------------------------------*/
    fn solid(color: Rgba) -> Texture {
        Texture {
            name: "Solid".to_string(),
            w: 4,
            h: 4,
            pixels: vec![color; 16],
        }
    }

    /// Slot 0 red walls, slot 4 green floor/ceiling.
    fn tiny_bank() -> TextureBank {
        let mut bank = TextureBank::default();
        bank.push(solid(RED));
        for _ in 0..3 {
            bank.push(solid(BLUE));
        }
        bank.push(solid(GREEN));
        bank
    }

    fn room() -> Grid {
        let mut cells = vec![1; 25];
        for r in 1..4 {
            for c in 1..4 {
                cells[r * 5 + c] = 0;
            }
        }
        Grid::from_cells(5, 5, 64.0, cells)
    }

    fn render(player: &Player, w: usize, h: usize) -> Vec<Rgba> {
        let grid = room();
        let mut caster = RayCaster::new(w, FRAC_PI_3);
        caster.cast_all_rays(&grid, player);
        let scene = Scene {
            grid: &grid,
            player,
            rays: caster.records(),
            plane_dist: caster.projection_plane_distance(),
        };
        let mut sw = Software::default();
        sw.draw_frame(w, h, &scene, &tiny_bank(), None, |fb, _, _| fb.to_vec())
    }

    #[test]
    fn darken_scales_channels_only() {
        assert_eq!(darken(0xFF_FF_80_10, 0.7), 0xFF_B2_59_0B);
        assert_eq!(darken(0x12_00_00_00, 0.7), 0x12_00_00_00);
        assert_eq!(darken(0xFF_FF_FF_FF, 1.0), 0xFF_FF_FF_FF);
    }

    #[test]
    fn vertical_hits_are_shaded() {
        // facing east: the centre ray hits the x = 256 line
        let player = Player::new(Vec2::new(160.0, 160.0), 0.0);
        let fb = render(&player, 64, 48);
        assert_eq!(fb[24 * 64 + 32], darken(RED, 0.7));
    }

    #[test]
    fn horizontal_hits_keep_full_colour() {
        let player = Player::new(Vec2::new(160.0, 160.0), FRAC_PI_2);
        let fb = render(&player, 64, 48);
        assert_eq!(fb[24 * 64 + 32], RED);
    }

    #[test]
    fn floor_and_ceiling_fill_outside_the_span() {
        let player = Player::new(Vec2::new(160.0, 160.0), 0.0);
        let fb = render(&player, 64, 48);
        for x in [0usize, 32, 63] {
            assert_eq!(fb[x], GREEN, "ceiling at column {x}");
            assert_eq!(fb[47 * 64 + x], GREEN, "floor at column {x}");
        }
    }

    #[test]
    fn every_pixel_is_written() {
        let player = Player::new(Vec2::new(100.0, 200.0), 0.8);
        let fb = render(&player, 80, 60);
        assert!(fb.iter().all(|&p| p != CLEAR));
    }

    #[test]
    fn rays_behind_the_view_are_skipped() {
        let grid = room();
        let player = Player::new(Vec2::new(160.0, 160.0), 0.0);
        let rays = [
            RayRecord {
                angle: PI,
                hit: Vec2::new(64.0, 160.0),
                distance: 96.0,
                vertical: true,
                cell: 1,
            },
            RayRecord {
                angle: 0.0,
                hit: Vec2::new(256.0, 160.0),
                distance: 96.0,
                vertical: true,
                cell: 1,
            },
        ];
        let scene = Scene {
            grid: &grid,
            player: &player,
            rays: &rays,
            plane_dist: 50.0,
        };
        let mut sw = Software::default();
        sw.begin_frame(2, 20);
        sw.draw_view(&scene, &tiny_bank());
        let fb = sw.framebuffer();
        assert!((0..20).all(|y| fb.get(0, y) == Some(CLEAR)));
        assert!((0..20).all(|y| fb.get(1, y) != Some(CLEAR)));
    }

    #[test]
    fn wall_span_is_centred_and_clamped() {
        let grid = room();
        let player = Player::new(Vec2::new(160.0, 160.0), 0.0);
        let mut sw = Software::default();
        sw.begin_frame(1, 100);
        let mut ray = RayRecord {
            angle: 0.0,
            hit: Vec2::new(256.0, 160.0),
            distance: 64.0,
            vertical: false,
            cell: 1,
        };
        let scene = Scene {
            grid: &grid,
            player: &player,
            rays: &[],
            plane_dist: 40.0,
        };

        let span = sw.wall_span(&ray, &scene).unwrap();
        assert_eq!(span, WallSpan { height: 40, top: 30, bottom: 70 });

        ray.distance = 8.0;
        let span = sw.wall_span(&ray, &scene).unwrap();
        assert_eq!((span.top, span.bottom), (0, 100));
        assert_eq!(span.height, 320);
    }

    #[test]
    fn missing_wall_texture_falls_back() {
        let grid = room();
        let player = Player::new(Vec2::new(160.0, 160.0), 0.0);
        let rays = [RayRecord {
            angle: 0.0,
            hit: Vec2::new(256.0, 160.0),
            distance: 96.0,
            vertical: false,
            cell: 42,
        }];
        let scene = Scene {
            grid: &grid,
            player: &player,
            rays: &rays,
            plane_dist: 50.0,
        };
        let bank = tiny_bank();
        let mut sw = Software::default();
        sw.begin_frame(1, 40);
        sw.draw_view(&scene, &bank);
        let centre = sw.framebuffer().get(0, 20).unwrap();
        assert!(bank.missing().pixels.contains(&centre));
    }

    /* texel-coded textures -------------------------------------------*/

    /// Texel `(u, v)` stores `u` in the green byte and `v` in the blue byte.
    fn coded(w: usize, h: usize) -> Texture {
        let pixels = (0..h)
            .flat_map(|v| (0..w).map(move |u| 0xFF_00_00_00 | (u as u32) << 8 | v as u32))
            .collect();
        Texture {
            name: "Coded".to_string(),
            w,
            h,
            pixels,
        }
    }

    fn texel(color: Rgba) -> (usize, usize) {
        (((color >> 8) & 0xFF) as usize, (color & 0xFF) as usize)
    }

    /// Slot 0 a 32×64 wall, slot 4 a 16×16 floor/ceiling.
    fn coded_bank() -> TextureBank {
        let mut bank = TextureBank::default();
        bank.push(coded(32, 64));
        for _ in 0..3 {
            bank.push(solid(BLUE));
        }
        bank.push(coded(16, 16));
        bank
    }

    fn unshaded() -> Software {
        Software::new(Shading {
            shade_factor: 1.0,
            ..Shading::default()
        })
    }

    /// One column, 100 rows, plane distance 96: a wall 96 units away is
    /// exactly 64 rows tall, spanning rows 18..82.
    fn draw_column(ray: RayRecord, player: &Player) -> Software {
        let grid = room();
        let rays = [ray];
        let scene = Scene {
            grid: &grid,
            player,
            rays: &rays,
            plane_dist: 96.0,
        };
        let mut sw = unshaded();
        sw.begin_frame(1, 100);
        sw.draw_view(&scene, &coded_bank());
        sw
    }

    #[test]
    fn wall_column_follows_the_struck_face() {
        let player = Player::new(Vec2::new(160.0, 147.0), 0.0);

        // vertical line: column comes from hit.y (147 mod 64 = 19, scaled to 32 wide)
        let sw = draw_column(
            RayRecord {
                angle: 0.0,
                hit: Vec2::new(256.0, 147.0),
                distance: 96.0,
                vertical: true,
                cell: 1,
            },
            &player,
        );
        assert_eq!(texel(sw.framebuffer().get(0, 50).unwrap()).0, 19 * 32 / 64);

        // horizontal line: column comes from hit.x
        let sw = draw_column(
            RayRecord {
                angle: 0.0,
                hit: Vec2::new(83.0, 256.0),
                distance: 96.0,
                vertical: false,
                cell: 1,
            },
            &player,
        );
        assert_eq!(texel(sw.framebuffer().get(0, 50).unwrap()).0, 19 * 32 / 64);
    }

    #[test]
    fn wall_rows_span_the_whole_texture() {
        let player = Player::new(Vec2::new(160.0, 160.0), 0.0);
        let sw = draw_column(
            RayRecord {
                angle: 0.0,
                hit: Vec2::new(256.0, 160.0),
                distance: 96.0,
                vertical: true,
                cell: 1,
            },
            &player,
        );
        let fb = sw.framebuffer();
        for y in 18..82 {
            // hit.y = 160 → column 32 of 64 → 16 of 32
            assert_eq!(texel(fb.get(0, y).unwrap()), (16, (y - 18) as usize), "row {y}");
        }
        assert_eq!(texel(fb.get(0, 18).unwrap()).1, 0);
        assert_eq!(texel(fb.get(0, 81).unwrap()).1, 63);
        // rows just outside the span belong to floor/ceiling
        assert_ne!(fb.get(0, 17), fb.get(0, 18));
    }

    #[test]
    fn floor_and_ceiling_project_back_to_world() {
        let player = Player::new(Vec2::new(100.0, 130.0), 0.0);
        let angle = 0.3f32;
        let sw = draw_column(
            RayRecord {
                angle,
                hit: Vec2::new(256.0, 180.0),
                distance: 96.0,
                vertical: true,
                cell: 1,
            },
            &player,
        );
        let fb = sw.framebuffer();

        // bottom row: 30 / (99 - 50) along the ray, corrected by the view angle
        let d = (30.0f32 / 49.0) * 96.0 / angle.cos();
        let u = (d * angle.cos() + 100.0).floor() as i32;
        let v = (d * angle.sin() + 130.0).floor() as i32;
        assert_eq!(
            texel(fb.get(0, 99).unwrap()),
            (u.rem_euclid(16) as usize, v.rem_euclid(16) as usize)
        );

        // top row looks the other way
        let d = (30.0f32 / -50.0) * 96.0 / angle.cos();
        let u = (-d * angle.cos() + 100.0).floor() as i32;
        let v = (-d * angle.sin() + 130.0).floor() as i32;
        assert_eq!(
            texel(fb.get(0, 0).unwrap()),
            (u.rem_euclid(16) as usize, v.rem_euclid(16) as usize)
        );
    }
}
