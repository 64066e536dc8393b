//! Core types module - shared data structures and constants
//!
//! This module defines the small vocabulary shared by the generator, the
//! packer, the terminal host and the exporter. Everything here is plain data
//! with no external dependencies, so it can be used from any crate in the
//! workspace (core logic, terminal rendering, headless export).
//!
//! # Grid Defaults
//!
//! The default grid is a 512 x 512 cartesian area tiled in 2-unit steps,
//! which yields 256 x 256 = 65 536 cells per frame:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_GRID_SIZE` | 512 | Side of the cartesian area |
//! | `DEFAULT_CELL_SIZE` | 2 | Side of one cell |
//! | `DEFAULT_FRAME_COUNT` | 5 | Pre-generated animation frames |
//! | `FRAME_PERIOD_MS` | 1000 | Frame advance period |
//!
//! # Rendering Constants
//!
//! - `FILL_ALPHA`: 150 - alpha channel of every cell color
//! - `ELEVATION_SCALE`: 1000 - extrusion scale handed to the renderer
//! - `CONTOUR_LEN`: 5 - vertices per closed cell ring
//!
//! # Examples
//!
//! ```
//! use polygrid_types::{DataMode, ViewAction, CONTOUR_LEN, FILL_ALPHA};
//!
//! // Parse a data mode (case-insensitive)
//! let mode = DataMode::from_str("Objects").unwrap();
//! assert_eq!(mode, DataMode::Objects);
//!
//! // Toggle between the two encodings
//! assert_eq!(mode.toggled(), DataMode::Binary);
//!
//! // Parse a view action
//! assert_eq!(ViewAction::from_str("toggleLogging"), Some(ViewAction::ToggleLogging));
//!
//! assert_eq!(CONTOUR_LEN, 5);
//! assert_eq!(FILL_ALPHA, 150);
//! ```

/// Side of the default cartesian area (512 units).
pub const DEFAULT_GRID_SIZE: u32 = 512;

/// Side of one default cell (2 units).
pub const DEFAULT_CELL_SIZE: u32 = 2;

/// Number of frames generated at startup.
pub const DEFAULT_FRAME_COUNT: usize = 5;

/// Frame advance period in milliseconds (1 second).
pub const FRAME_PERIOD_MS: u32 = 1000;

/// Alpha channel applied to every generated cell color.
pub const FILL_ALPHA: u8 = 150;

/// Extrusion scale factor handed to the renderer.
pub const ELEVATION_SCALE: u32 = 1000;

/// Number of vertices in a closed cell contour (4 corners + closing point).
pub const CONTOUR_LEN: usize = 5;

/// Floats per position vertex (`[x, y]`).
pub const POSITION_SIZE: usize = 2;

/// Bytes per color vertex (`[r, g, b, a]`).
pub const COLOR_SIZE: usize = 4;

/// Bytes per elevation vertex.
pub const ELEVATION_SIZE: usize = 1;


/// How frame geometry is handed to the renderer.
///
/// - **Objects**: one record per cell (contour, color, elevation)
/// - **Binary**: flat structure-of-arrays attribute buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataMode {
    Objects,
    #[default]
    Binary,
}

impl DataMode {
    /// Parse a data mode from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use polygrid_types::DataMode;
    ///
    /// assert_eq!(DataMode::from_str("binary"), Some(DataMode::Binary));
    /// assert_eq!(DataMode::from_str("SOA"), Some(DataMode::Binary));
    /// assert_eq!(DataMode::from_str("objects"), Some(DataMode::Objects));
    /// assert_eq!(DataMode::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "objects" | "object" | "records" => Some(DataMode::Objects),
            "binary" | "soa" | "buffers" => Some(DataMode::Binary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataMode::Objects => "objects",
            DataMode::Binary => "binary",
        }
    }

    /// The other encoding.
    pub fn toggled(&self) -> Self {
        match self {
            DataMode::Objects => DataMode::Binary,
            DataMode::Binary => DataMode::Objects,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, DataMode::Binary)
    }
}

/// Actions the host user can apply to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    /// Switch between object records and binary attribute buffers
    ToggleDataMode,
    /// Enable or disable logging of the active frame's data
    ToggleLogging,
}

impl ViewAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use polygrid_types::ViewAction;
    ///
    /// assert_eq!(ViewAction::from_str("toggleDataMode"), Some(ViewAction::ToggleDataMode));
    /// assert_eq!(ViewAction::from_str("nope"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "toggledatamode" => Some(ViewAction::ToggleDataMode),
            "togglelogging" => Some(ViewAction::ToggleLogging),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewAction::ToggleDataMode => "toggleDataMode",
            ViewAction::ToggleLogging => "toggleLogging",
        }
    }
}

/// RGBA color with 8 bits per channel.
///
/// Stored as an array so it can be copied straight into the flat color buffer.
pub type Rgba = [u8; 4];
