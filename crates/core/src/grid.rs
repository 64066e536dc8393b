//! Grid module - procedural square tiling
//!
//! A frame is a `grid_size x grid_size` cartesian area cut into square cells
//! of side `cell_size`. Each cell gets three random color channels, a fixed
//! alpha of [`FILL_ALPHA`] and a random elevation in `0..=255`.
//!
//! Cells are stored column-major (outer loop over `x`, inner loop over `y`),
//! so the cell at column `c`, row `r` lives at index `c * cells_per_side + r`.
//!
//! Frames are independent: every frame re-rolls every color and elevation.
//! There is no continuity between consecutive frames.

use rand::Rng;
use serde::Serialize;

use crate::error::GridError;
use crate::types::{Rgba, CONTOUR_LEN, DEFAULT_CELL_SIZE, DEFAULT_GRID_SIZE, FILL_ALPHA};

/// A contour vertex in cartesian grid units.
pub type Point = [u32; 2];

/// Largest accepted `grid_size`: every coordinate up to it is exact as `f32`.
pub const MAX_GRID_SIZE: u32 = 1 << 24;

/// Validated grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSpec {
    grid_size: u32,
    cell_size: u32,
}

impl GridSpec {
    /// Create a grid spec.
    ///
    /// A `grid_size` that is not a multiple of `cell_size` is accepted: the
    /// trailing partial row and column are simply not generated. Sizes above
    /// [`MAX_GRID_SIZE`] are rejected since packed positions would round.
    pub fn new(grid_size: u32, cell_size: u32) -> Result<Self, GridError> {
        if grid_size == 0 {
            return Err(GridError::ZeroGridSize);
        }
        if grid_size > MAX_GRID_SIZE {
            return Err(GridError::GridTooLarge(grid_size));
        }
        if cell_size == 0 {
            return Err(GridError::ZeroCellSize);
        }
        Ok(Self {
            grid_size,
            cell_size,
        })
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Number of whole cells along one side.
    pub fn cells_per_side(&self) -> u32 {
        self.grid_size / self.cell_size
    }

    /// Number of cells in one frame.
    pub fn cell_count(&self) -> usize {
        let n = self.cells_per_side() as usize;
        n * n
    }

    /// Lower-left corner of the cell at (`col`, `row`).
    pub fn origin(&self, col: u32, row: u32) -> Point {
        [col * self.cell_size, row * self.cell_size]
    }

    /// Index of the cell at (`col`, `row`) in a frame, if it exists.
    pub fn index_of(&self, col: u32, row: u32) -> Option<usize> {
        let n = self.cells_per_side();
        if col >= n || row >= n {
            return None;
        }
        Some(col as usize * n as usize + row as usize)
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// One grid quadrilateral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    /// Closed ring: lower-left, upper-left, upper-right, lower-right, lower-left.
    pub contour: [Point; CONTOUR_LEN],
    pub color: Rgba,
    pub elevation: u8,
}

impl Cell {
    /// Build the square cell whose lower-left corner is (`x`, `y`).
    pub fn square(x: u32, y: u32, size: u32, color: Rgba, elevation: u8) -> Self {
        Self {
            contour: [
                [x, y],
                [x, y + size],
                [x + size, y + size],
                [x + size, y],
                [x, y],
            ],
            color,
            elevation,
        }
    }

    /// Lower-left corner.
    pub fn origin(&self) -> Point {
        self.contour[0]
    }

    /// Check the contour is the closed square ring produced by [`Cell::square`].
    pub fn is_square_of(&self, size: u32) -> bool {
        let [x, y] = self.origin();
        *self == Cell::square(x, y, size, self.color, self.elevation)
    }
}

/// All cells of one animation step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Frame {
    cells: Vec<Cell>,
}

impl Frame {
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Generate one frame with fresh random colors and elevations.
pub fn generate_frame<R: Rng + ?Sized>(spec: GridSpec, rng: &mut R) -> Frame {
    let n = spec.cells_per_side();
    let mut cells = Vec::with_capacity(spec.cell_count());

    for col in 0..n {
        for row in 0..n {
            let [x, y] = spec.origin(col, row);
            let color = [rng.gen::<u8>(), rng.gen::<u8>(), rng.gen::<u8>(), FILL_ALPHA];
            let elevation = rng.gen::<u8>();
            cells.push(Cell::square(x, y, spec.cell_size(), color, elevation));
        }
    }

    Frame { cells }
}

/// Generate `frame_count` independent frames.
pub fn generate<R: Rng + ?Sized>(spec: GridSpec, frame_count: usize, rng: &mut R) -> Vec<Frame> {
    (0..frame_count).map(|_| generate_frame(spec, rng)).collect()
}
