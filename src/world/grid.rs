//! Tile grid – the whole level.
//!
//! Row-major matrix of cell codes: `0` is floor, any other value is a wall
//! whose texture lives in slot `code - 1`. Dimensions are fixed by the
//! caller; the grid is never mutated after load.

use std::{fs, io, path::Path};

use glam::Vec2;
use thiserror::Error;
use tracing::warn;

use crate::renderer::Rgba;

/// Raw value stored in one grid cell.
pub type CellCode = i32;

pub const EMPTY: CellCode = 0;

const WALL_COLOR: Rgba = 0xFF_FF_FF_FF;
const FLOOR_COLOR: Rgba = 0xFF_00_00_00;

/// Things that can go wrong while reading a map file.
#[derive(Error, Debug)]
pub enum MapError {
    /// Underlying I/O failure – propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A token that is not a decimal integer.
    #[error("value #{index} (`{token}`) is not an integer")]
    BadValue { index: usize, token: String },

    /// The file ran out before the grid was full.
    #[error("map needs {expected} values, found only {found}")]
    TooFewValues { expected: usize, found: usize },

    #[error("grid dimensions must be non-zero (got {rows}×{cols})")]
    EmptyDimensions { rows: usize, cols: usize },
}

/// Fixed-size level grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tile: f32,
    cells: Vec<CellCode>,
}

impl Grid {
    /// All-floor grid. The border is still solid through [`Grid::wall_at`].
    pub fn empty(rows: usize, cols: usize, tile: f32) -> Self {
        Self {
            rows,
            cols,
            tile,
            cells: vec![EMPTY; rows * cols],
        }
    }

    /// Build from explicit row-major cells.
    ///
    /// # Panics
    /// If `cells.len() != rows * cols`.
    pub fn from_cells(rows: usize, cols: usize, tile: f32, cells: Vec<CellCode>) -> Self {
        assert_eq!(cells.len(), rows * cols, "cell count must match dimensions");
        Self {
            rows,
            cols,
            tile,
            cells,
        }
    }

    /// Parse the plain-text map format: `rows × cols` whitespace separated
    /// integers, row-major. Surplus values are ignored.
    pub fn parse(text: &str, rows: usize, cols: usize, tile: f32) -> Result<Self, MapError> {
        if rows == 0 || cols == 0 {
            return Err(MapError::EmptyDimensions { rows, cols });
        }
        let expected = rows * cols;
        let mut cells = Vec::with_capacity(expected);
        let mut tokens = text.split_whitespace();

        for index in 0..expected {
            let Some(token) = tokens.next() else {
                return Err(MapError::TooFewValues {
                    expected,
                    found: index,
                });
            };
            let code = token.parse::<CellCode>().map_err(|_| MapError::BadValue {
                index,
                token: token.to_owned(),
            })?;
            cells.push(code);
        }

        let surplus = tokens.count();
        if surplus > 0 {
            warn!(surplus, "ignoring values past the end of the {rows}×{cols} grid");
        }

        Ok(Self {
            rows,
            cols,
            tile,
            cells,
        })
    }

    /// Read and parse a map file.
    pub fn load<P: AsRef<Path>>(
        path: P,
        rows: usize,
        cols: usize,
        tile: f32,
    ) -> Result<Self, MapError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text, rows, cols, tile)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile
    }

    /// World-space extent `(cols × tile, rows × tile)`.
    #[inline]
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.cols as f32 * self.tile, self.rows as f32 * self.tile)
    }

    /// Raw cell code, or `None` outside the grid.
    #[inline]
    pub fn cell_at(&self, row: i32, col: i32) -> Option<CellCode> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(self.cells[row as usize * self.cols + col as usize])
    }

    /// Cell code under a world-space point.
    #[inline]
    pub fn cell_at_point(&self, p: Vec2) -> Option<CellCode> {
        self.cell_at(
            (p.y / self.tile).floor() as i32,
            (p.x / self.tile).floor() as i32,
        )
    }

    /// `true` if the world point is inside a wall cell **or** off the grid.
    pub fn wall_at(&self, x: f32, y: f32) -> bool {
        let size = self.world_size();
        // negated form so NaN lands on the solid side
        if !(x >= 0.0 && x < size.x && y >= 0.0 && y < size.y) {
            return true;
        }
        // `x / tile` can round up to `cols` just below the far edge
        let row = ((y / self.tile).floor() as usize).min(self.rows - 1);
        let col = ((x / self.tile).floor() as usize).min(self.cols - 1);
        self.cells[row * self.cols + col] != EMPTY
    }

    /// Bounds test used by the grid-line scans.
    ///
    /// `x` is open at zero but closed at the far edge while `y` is closed at
    /// both ends; scans stop as soon as this turns false.
    #[inline]
    pub fn inside_bounds(&self, x: f32, y: f32) -> bool {
        let size = self.world_size();
        x > 0.0 && x <= size.x && y >= 0.0 && y <= size.y
    }

    /// Minimap colour of a tile: white walls, black floor.
    pub fn tile_color(&self, row: usize, col: usize) -> Rgba {
        match self.cell_at(row as i32, col as i32) {
            Some(EMPTY) | None => FLOOR_COLOR,
            Some(_) => WALL_COLOR,
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
