mod grid;
mod texture;

pub use grid::{CellCode, EMPTY, Grid, MapError};

pub use texture::{Texture, TextureBank, TextureError, TextureId, wrap};
