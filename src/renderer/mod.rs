//! Rendering abstraction layer.
//!
//! *The simulation never touches a pixel buffer directly.*
//! It hands a read-only [`Scene`] (grid, player, this frame's ray records) to
//! a type that implements [`Renderer`].
//!
//! * The software back-end ([`Software`]) is the only one today; the trait
//!   keeps the frame loop independent of it.
//! * A helper blanket-impl [`RendererExt`] adds `draw_frame` so call-sites
//!   stay short.

use crate::engine::RayRecord;
use crate::sim::Player;
use crate::world::{Grid, TextureBank};

/// Pixel format of the frame-buffer and textures (0xAARRGGBB).
pub type Rgba = u32;

/// Everything the renderer reads for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    pub grid: &'a Grid,
    pub player: &'a Player,
    /// One record per screen column, left to right.
    pub rays: &'a [RayRecord],
    pub plane_dist: f32,
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Walls, floor and ceiling for every column of `scene.rays`.
    fn draw_view(&mut self, scene: &Scene<'_>, bank: &TextureBank);

    /// Top-down overlay in the upper-left corner.
    fn draw_minimap(&mut self, scene: &Scene<'_>, minimap: &Minimap);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F, T>(&mut self, submit: F) -> T
    where
        F: FnOnce(&[Rgba], usize, usize) -> T;
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F, T>(
        &mut self,
        width: usize,
        height: usize,
        scene: &Scene<'_>,
        bank: &TextureBank,
        minimap: Option<&Minimap>,
        submit: F,
    ) -> T
    where
        F: FnOnce(&[Rgba], usize, usize) -> T,
    {
        self.begin_frame(width, height);
        self.draw_view(scene, bank);
        if let Some(m) = minimap {
            self.draw_minimap(scene, m);
        }
        self.end_frame(submit)
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

mod framebuffer;
mod minimap;
mod software;

pub use framebuffer::Framebuffer;
pub use minimap::{Minimap, draw_line, draw_rect};
pub use software::{Shading, Software, darken};
