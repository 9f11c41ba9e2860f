use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use crate::{
    config::Config,
    engine::RayCaster,
    renderer::{Minimap, RendererExt, Rgba, Scene, Shading, Software},
    sim::{MoveResult, Player},
    world::{Grid, TextureBank},
};

/// World state that advances each frame: the level, the player and the
/// rays cast from the player's current pose.
pub struct Simulation {
    pub grid: Grid,
    pub player: Player,
    pub caster: RayCaster,
}

impl Simulation {
    /// Spawn the player in the middle of the view, facing +Y.
    pub fn new(grid: Grid, cfg: &Config) -> Self {
        let spawn = Vec2::new(
            cfg.screen_width as f32 * 0.5,
            cfg.screen_height as f32 * 0.5,
        );
        Self {
            grid,
            player: Player::new(spawn, FRAC_PI_2),
            caster: RayCaster::new(cfg.screen_width, cfg.fov),
        }
    }

    /// Move the player by one frame of its intent, then recast every column.
    pub fn step(&mut self, dt: f32) -> MoveResult {
        let moved = self.player.update(dt, &self.grid);
        self.caster.cast_all_rays(&self.grid, &self.player);
        moved
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            grid: &self.grid,
            player: &self.player,
            rays: self.caster.records(),
            plane_dist: self.caster.projection_plane_distance(),
        }
    }
}

/// Everything needed to turn a [`Simulation`] into pixels.
pub struct Presentation {
    pub renderer: Software,
    pub bank: TextureBank,
    pub minimap: Minimap,
    width: usize,
    height: usize,
}

impl Presentation {
    pub fn new(bank: TextureBank, cfg: &Config) -> Self {
        Self {
            renderer: Software::new(Shading::from(cfg)),
            bank,
            minimap: Minimap::from(cfg),
            width: cfg.screen_width,
            height: cfg.screen_height,
        }
    }

    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Draw one frame and loan it to `submit`.
    pub fn render<F, T>(&mut self, sim: &Simulation, show_minimap: bool, submit: F) -> T
    where
        F: FnOnce(&[Rgba], usize, usize) -> T,
    {
        let minimap = show_minimap.then_some(&self.minimap);
        self.renderer.draw_frame(
            self.width,
            self.height,
            &sim.scene(),
            &self.bank,
            minimap,
            submit,
        )
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
