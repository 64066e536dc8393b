//! Terminal input module (host-facing).
//!
//! Maps `crossterm` key events into [`crate::types::ViewAction`]s. The view
//! has no continuous controls, so there is no repeat handling: one key press
//! is one action.

pub mod map;

pub use polygrid_types as types;

pub use map::{handle_key_event, should_quit};
