//! Top-down 2-D view of a map at full scale: tiles, every cast ray and the
//! player. Same controls as the game.
//!
//! ```bash
//! cargo run --bin map_view -- maps/map.txt
//! ```

use anyhow::Context;
use clap::Parser;
use tracing::info;

use yawolf_rs::{
    config::{Cli, Config},
    engine::Simulation,
    frontend::{Display, init_logging},
    renderer::{Framebuffer, Minimap},
    sim::{FramePacer, InputState},
    world::Grid,
};

fn main() -> anyhow::Result<()> {
    let cfg = Config::from(Cli::parse());
    init_logging();

    let grid = Grid::load(&cfg.map_path, cfg.rows, cfg.cols, cfg.tile_size)
        .with_context(|| format!("loading {}", cfg.map_path.display()))?;

    // window matches the world, one pixel per world unit
    let size = grid.world_size();
    let (w, h) = (size.x as usize, size.y as usize);
    info!(w, h, "top-down view");

    let mut sim = Simulation::new(grid, &cfg);
    let overlay = Minimap {
        scale: 1.0,
        ray_stride: 1,
    };
    let mut fb = Framebuffer::new(w, h);
    let mut display = Display::open("yawolf map", w, h)?;
    let mut input = InputState::default();
    let mut pacer = FramePacer::new(cfg.target_fps);

    while input.running {
        input.apply_all(display.poll_events());
        sim.player.intent = input.intent;
        sim.step(pacer.tick());

        fb.clear(0xFF_00_00_00);
        overlay.draw(&mut fb, &sim.scene());
        display.present(fb.as_slice(), w, h)?;
    }
    Ok(())
}
