//! tui-polygrid (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_polygrid::{core,engine,input,term,types}`
//! while the implementation lives in dedicated crates under `crates/`.

pub use polygrid_core as core;
pub use polygrid_engine as engine;
pub use polygrid_input as input;
pub use polygrid_term as term;
pub use polygrid_types as types;
