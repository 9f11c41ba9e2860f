//! Ray casting and the two per-frame contexts.
//!
//! [`Simulation`] owns what changes (grid, player, ray records);
//! [`Presentation`] owns what draws (renderer, textures, minimap settings).

#[allow(clippy::module_inception)]
mod engine;
mod caster;
pub mod geometry;
mod intersect;

pub use caster::{RayCaster, RayRecord, projection_plane_distance};
pub use engine::{Presentation, Simulation};
pub use intersect::{Intersections, WallHit, scan_horizontal, scan_vertical};
