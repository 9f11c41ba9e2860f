// Slot-indexed repository of decoded wall/floor textures.
// The renderer samples the raw pixel vectors; nothing here knows about the
// window backend.

use std::path::Path;

use tracing::{debug, warn};

use crate::renderer::Rgba;

/// Slot of a texture in the bank (`cell code - 1`).
pub type TextureId = usize;

/// CPU-side storage: 32-bit **ARGB** (0xAARRGGBB) in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<Rgba>,
}

/// Magenta/black 8×8 checkerboard, stands in for anything that failed to load.
impl Default for Texture {
    fn default() -> Self {
        const LIGHT: Rgba = 0xFF_FF_00_FF;
        const DARK: Rgba = 0xFF_00_00_00;
        let mut pix = vec![0; 8 * 8];
        for y in 0..8 {
            for x in 0..8 {
                pix[y * 8 + x] = if (x ^ y) & 1 == 0 { LIGHT } else { DARK };
            }
        }
        Texture {
            name: "MISSING".to_string(),
            w: 8,
            h: 8,
            pixels: pix,
        }
    }
}

/// Things that can go wrong when loading a texture.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("cannot decode `{path}`: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("`{0}` has zero width or height")]
    Empty(String),
}

impl Texture {
    /// Decode an image file into ARGB pixels.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let img = image::open(path)
            .map_err(|source| TextureError::Decode {
                path: display.clone(),
                source,
            })?
            .to_rgba8();

        let (w, h) = img.dimensions();
        if w == 0 || h == 0 {
            return Err(TextureError::Empty(display));
        }

        let pixels = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                Rgba::from_be_bytes([a, r, g, b])
            })
            .collect();

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or(display);

        Ok(Texture {
            name,
            w: w as usize,
            h: h as usize,
            pixels,
        })
    }

    /// Texel at wrapped coordinates; negative and oversized values fold back
    /// with floored modulo.
    #[inline]
    pub fn sample_wrapped(&self, u: i32, v: i32) -> Rgba {
        let x = wrap(u, self.w);
        let y = wrap(v, self.h);
        self.pixels[y * self.w + x]
    }

    /// Texel at clamped coordinates.
    #[inline]
    pub fn sample_clamped(&self, u: usize, v: usize) -> Rgba {
        let x = u.min(self.w - 1);
        let y = v.min(self.h - 1);
        self.pixels[y * self.w + x]
    }
}

/// Floored modulo into `0..size`.
#[inline]
pub fn wrap(v: i32, size: usize) -> usize {
    v.rem_euclid(size as i32) as usize
}

/// Fixed-slot texture bank.
///
/// * Slot `i` holds the texture for cell code `i + 1`.
/// * Slots whose file failed to load hold the checkerboard sentinel, so
///   sampling never reads past a buffer.
/// * Lookups outside the slot range also resolve to the sentinel.
pub struct TextureBank {
    slots: Vec<Texture>,
    missing: Texture,
}

impl Default for TextureBank {
    fn default() -> Self {
        Self::new(Texture::default())
    }
}

impl TextureBank {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// Empty bank with a mandatory fallback texture.
    pub fn new(missing_tex: Texture) -> Self {
        Self {
            slots: Vec::new(),
            missing: missing_tex,
        }
    }

    /// Decode every path in order. Failures are logged and leave the
    /// sentinel in their slot; the bank always has `paths.len()` slots.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Self {
        let mut bank = Self::default();
        for path in paths {
            match Texture::from_file(path) {
                Ok(tex) => {
                    debug!(name = %tex.name, w = tex.w, h = tex.h, "texture loaded");
                    bank.push(tex);
                }
                Err(err) => {
                    warn!("{err}; using the missing-texture pattern");
                    let fallback = bank.missing.clone();
                    bank.push(fallback);
                }
            }
        }
        bank
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of slots (the sentinel is not counted).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Borrow a slot; out-of-range ids resolve to the sentinel.
    pub fn texture(&self, id: TextureId) -> &Texture {
        self.slots.get(id).unwrap_or(&self.missing)
    }

    /// Texture for a raw cell code (`code - 1`); non-positive codes resolve
    /// to the sentinel.
    pub fn for_cell(&self, code: i32) -> &Texture {
        match usize::try_from(code - 1) {
            Ok(id) => self.texture(id),
            Err(_) => &self.missing,
        }
    }

    pub fn missing(&self) -> &Texture {
        &self.missing
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Append a texture; returns its slot.
    pub fn push(&mut self, tex: Texture) -> TextureId {
        self.slots.push(tex);
        self.slots.len() - 1
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
