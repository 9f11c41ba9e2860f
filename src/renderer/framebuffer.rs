//! Owning frame buffer with bounds-checked pixel access.
//!
//! Every pixel write in the crate goes through [`Framebuffer::set`]; the
//! `y * width + x` arithmetic lives only here.

use super::Rgba;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Framebuffer {
    pixels: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            width,
            height,
        }
    }

    /// Reallocate if the resolution changed. Contents are unspecified after
    /// a resize; callers clear every frame anyway.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels.resize(width * height, 0);
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Write one pixel. Returns `false` (and writes nothing) when `(x, y)`
    /// is off-screen.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Rgba) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = color;
                true
            }
            None => false,
        }
    }

    /// Read one pixel, or `None` off-screen.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Row-major pixels, ready for the window.
    #[inline]
    pub fn as_slice(&self) -> &[Rgba] {
        &self.pixels
    }
}
