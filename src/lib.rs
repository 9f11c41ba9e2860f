//! Grid raycaster in the Wolfenstein 3-D tradition.
//!
//! * [`config`]   – CLI options and the defaults behind them.
//! * [`world`]    – the tile grid and texture bank (read-only after load).
//! * [`sim`]      – player movement, input intent, frame pacing.
//! * [`engine`]   – ray geometry, grid-line scans, the per-column caster and
//!   the simulation/presentation contexts that drive one frame.
//! * [`renderer`] – framebuffer, textured column renderer, minimap overlay.
//! * [`frontend`] – `minifb` window and key decoding.

pub mod config;
pub mod engine;
pub mod frontend;
pub mod renderer;
pub mod sim;
pub mod world;
