//! Runtime module - everything between the pure core and a binary
//!
//! - [`config`]: environment variables and command-line overrides
//! - [`logging`]: `env_logger` setup (stderr or a log file)
//! - [`frame_log`]: logging of the active frame's data
//! - [`ticker`]: tokio interval task that advances the frame index
//!
//! # Environment Variables
//!
//! - `POLYGRID_GRID_SIZE`: side of the cartesian area (default: 512)
//! - `POLYGRID_CELL_SIZE`: side of one cell (default: 2)
//! - `POLYGRID_FRAMES`: number of pre-generated frames (default: 5)
//! - `POLYGRID_TICK_MS`: frame advance period (default: 1000)
//! - `POLYGRID_MODE`: `binary` or `objects` (default: binary)
//! - `POLYGRID_LOG_FRAMES`: set to "1" or "true" to log every active frame
//! - `POLYGRID_SEED`: seed for reproducible frames (default: OS entropy)
//! - `POLYGRID_LOG_PATH`: log file for the terminal viewer (default: polygrid.log)
//! - `POLYGRID_MAP_STYLE`: basemap style URL (default: Carto Positron)
//! - `MAPBOX_ACCESS_TOKEN`: basemap access token
//!
//! Log verbosity follows `RUST_LOG` (default: `info`).

pub mod config;
pub mod frame_log;
pub mod logging;
pub mod ticker;

pub use polygrid_core as core;
pub use polygrid_types as types;

pub use config::{AppConfig, ConfigArgs};
pub use frame_log::log_active_frame;
pub use logging::{init_logging, LogTarget};
pub use ticker::{run_ticker, FrameTicker};
