//! Key mapping from terminal events to view actions.

use crate::types::ViewAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to view actions.
pub fn handle_key_event(key: KeyEvent) -> Option<ViewAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Data supply mode
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Char('m') | KeyCode::Char('M') => {
            Some(ViewAction::ToggleDataMode)
        }

        // Frame logging
        KeyCode::Char('l') | KeyCode::Char('L') => Some(ViewAction::ToggleLogging),

        _ => None,
    }
}

/// Check if key should quit the viewer.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
