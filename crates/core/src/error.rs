//! Configuration errors for grid generation.
//!
//! Generation and packing of a valid [`GridSpec`](crate::GridSpec) cannot
//! fail; the only errors are rejected inputs.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid size must be positive")]
    ZeroGridSize,

    #[error("grid size {0} exceeds {max}", max = crate::grid::MAX_GRID_SIZE)]
    GridTooLarge(u32),

    #[error("cell size must be positive")]
    ZeroCellSize,

    #[error("at least one frame is required")]
    NoFrames,
}
