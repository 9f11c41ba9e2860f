//! First-person grid raycaster.
//!
//! ```bash
//! cargo run --release -- maps/map.txt --minimap
//! ```

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use yawolf_rs::{
    config::{Cli, Config},
    engine::{Presentation, Simulation},
    frontend::{Display, init_logging},
    sim::{FramePacer, InputState},
    world::{Grid, TextureBank},
};

fn main() -> anyhow::Result<()> {
    let cfg = Config::from(Cli::parse());
    init_logging();

    // ─────────── load map & textures ───────────
    let grid = match Grid::load(&cfg.map_path, cfg.rows, cfg.cols, cfg.tile_size) {
        Ok(grid) => grid,
        Err(err) => {
            error!(path = %cfg.map_path.display(), "{err}; continuing with an empty grid");
            Grid::empty(cfg.rows.max(1), cfg.cols.max(1), cfg.tile_size)
        }
    };
    let bank = TextureBank::load(&cfg.texture_paths());
    info!(
        rows = grid.rows(),
        cols = grid.cols(),
        textures = bank.len(),
        "level ready"
    );

    let mut display = Display::open("yawolf", cfg.screen_width, cfg.screen_height)
        .context("window setup failed")?;

    let mut sim = Simulation::new(grid, &cfg);
    let mut view = Presentation::new(bank, &cfg);
    let mut input = InputState::new(cfg.minimap);
    let mut pacer = FramePacer::new(cfg.target_fps);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while input.running {
        input.apply_all(display.poll_events());
        if !input.running {
            break;
        }
        sim.player.intent = input.intent;

        let dt = pacer.tick();
        sim.step(dt);

        let t0 = Instant::now();
        view.render(&sim, input.minimap, |fb, w, h| display.present(fb, w, h))?;
        acc_time += t0.elapsed();
        acc_frames += 1;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            info!("avg render: {avg_ms:.2} ms ({:.1} FPS)", 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }

    info!("bye");
    Ok(())
}
