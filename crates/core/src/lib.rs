//! Core data module - pure, synchronous, and testable
//!
//! This module contains the grid generator, the buffer packer and the small
//! amount of state that drives the animation. It has **no dependencies** on
//! terminal I/O, async runtimes or configuration, which keeps it:
//!
//! - **Reproducible**: a seeded RNG produces identical frame sets
//! - **Testable**: every invariant of the generated data is checked in unit tests
//! - **Portable**: the same frames feed the terminal host and the exporter
//!
//! # Module Structure
//!
//! - [`grid`]: square tiling of cells with random color and elevation
//! - [`pack`]: structure-of-arrays ("binary") encoding of one frame
//! - [`source`]: read access shared by both encodings
//! - [`frames`]: immutable container of every pre-generated frame
//! - [`player`]: circular frame index
//! - [`view`]: user-facing toggles and the snapshot the host renders
//! - [`layer`]: serializable layer descriptor for an external renderer
//!
//! # Example
//!
//! ```
//! use polygrid_core::{pack, FrameSet, FramePlayer, GridSpec};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let spec = GridSpec::new(4, 2).unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! let frames = FrameSet::generate(spec, 3, &mut rng).unwrap();
//!
//! // 2 x 2 cells per frame
//! assert_eq!(frames.frame(0).unwrap().len(), 4);
//!
//! // The packed encoding carries the same cells
//! let packed = pack(frames.frame(0).unwrap());
//! assert_eq!(packed.polygon_count(), 4);
//! assert_eq!(packed.start_indices(), &[0, 5, 10, 15]);
//!
//! // Advance through the frames
//! let mut player = FramePlayer::new(frames.len());
//! player.advance();
//! assert_eq!(player.frame_number(), 2);
//! ```

pub mod error;
pub mod frames;
pub mod grid;
pub mod layer;
pub mod pack;
pub mod player;
pub mod source;
pub mod view;

pub use polygrid_types as types;

// Re-export commonly used types for convenience
pub use error::GridError;
pub use frames::FrameSet;
pub use grid::{generate, generate_frame, Cell, Frame, GridSpec, Point, MAX_GRID_SIZE};
pub use layer::{DeckDescriptor, InitialViewState, LayerData, LayerDescriptor, MapConfig};
pub use pack::{pack, PackedFrame};
pub use player::FramePlayer;
pub use source::CellSource;
pub use view::{ViewSnapshot, ViewState};
