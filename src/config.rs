//! Runtime configuration.
//!
//! [`Cli`] is the `clap` front door; it folds into a plain [`Config`] whose
//! `Default` mirrors the classic constants (64-unit tiles, 13×20 grid,
//! 60° field of view, 30 FPS).

use std::path::PathBuf;

use clap::Parser;

/// Side of one grid cell in world units.
pub const TILE_SIZE: f32 = 64.0;
pub const MAP_ROWS: usize = 13;
pub const MAP_COLS: usize = 20;
pub const FOV_DEG: f32 = 60.0;
pub const TARGET_FPS: u32 = 30;
pub const MINIMAP_SCALE: f32 = 0.2;
/// Only every n-th ray is drawn on the minimap.
pub const MINIMAP_RAY_STRIDE: usize = 50;
/// Texture slot sampled by both floor and ceiling (`colorstone`).
pub const FLOOR_TEXTURE: usize = 4;
pub const CEILING_TEXTURE: usize = 4;
/// Channel multiplier for walls hit on a vertical grid line.
pub const SHADE_FACTOR: f32 = 0.7;

/// Wall/floor textures in slot order. Cell code `k` uses slot `k - 1`.
pub const TEXTURE_FILES: [&str; 6] = [
    "redbrick.png",
    "mossystone.png",
    "graystone.png",
    "wood.png",
    "colorstone.png",
    "bluestone.png",
];

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about = "First-person grid raycaster")]
pub struct Cli {
    /// Map file: whitespace separated integers, ROWS × COLS values
    #[arg(value_name = "MAP")]
    pub map: PathBuf,

    /// Start with the minimap overlay enabled (toggle in game with `M`)
    #[arg(long)]
    pub minimap: bool,

    /// Directory holding the texture images
    #[arg(long, value_name = "DIR", default_value = "images")]
    pub assets: PathBuf,

    /// Grid rows in the map file
    #[arg(long, default_value_t = MAP_ROWS)]
    pub rows: usize,

    /// Grid columns in the map file
    #[arg(long, default_value_t = MAP_COLS)]
    pub cols: usize,

    /// Window width in pixels (defaults to cols × tile size)
    #[arg(long)]
    pub width: Option<usize>,

    /// Window height in pixels (defaults to rows × tile size)
    #[arg(long)]
    pub height: Option<usize>,

    /// Target frame rate
    #[arg(long, default_value_t = TARGET_FPS)]
    pub fps: u32,
}

/// Everything the engine needs to know, independent of how it was parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub map_path: PathBuf,
    pub assets_dir: PathBuf,
    pub rows: usize,
    pub cols: usize,
    pub tile_size: f32,
    pub screen_width: usize,
    pub screen_height: usize,
    /// Horizontal field of view, radians.
    pub fov: f32,
    pub target_fps: u32,
    pub minimap: bool,
    pub minimap_scale: f32,
    pub minimap_ray_stride: usize,
    pub floor_texture: usize,
    pub ceiling_texture: usize,
    pub shade_factor: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map_path: PathBuf::new(),
            assets_dir: PathBuf::from("images"),
            rows: MAP_ROWS,
            cols: MAP_COLS,
            tile_size: TILE_SIZE,
            screen_width: MAP_COLS * TILE_SIZE as usize,
            screen_height: MAP_ROWS * TILE_SIZE as usize,
            fov: FOV_DEG.to_radians(),
            target_fps: TARGET_FPS,
            minimap: false,
            minimap_scale: MINIMAP_SCALE,
            minimap_ray_stride: MINIMAP_RAY_STRIDE,
            floor_texture: FLOOR_TEXTURE,
            ceiling_texture: CEILING_TEXTURE,
            shade_factor: SHADE_FACTOR,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let tile = TILE_SIZE as usize;
        Self {
            screen_width: cli.width.unwrap_or(cli.cols * tile).max(1),
            screen_height: cli.height.unwrap_or(cli.rows * tile).max(1),
            map_path: cli.map,
            assets_dir: cli.assets,
            rows: cli.rows,
            cols: cli.cols,
            target_fps: cli.fps.max(1),
            minimap: cli.minimap,
            ..Self::default()
        }
    }
}

impl Config {
    /// Full paths of the texture images, in slot order.
    pub fn texture_paths(&self) -> Vec<PathBuf> {
        TEXTURE_FILES
            .iter()
            .map(|name| self.assets_dir.join(name))
            .collect()
    }
}
