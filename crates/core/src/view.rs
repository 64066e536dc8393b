//! View state: the toggles the user controls and the snapshot the host draws.

use crate::frames::FrameSet;
use crate::types::{DataMode, ViewAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub mode: DataMode,
    pub log_frames: bool,
}

impl ViewState {
    pub fn new(mode: DataMode, log_frames: bool) -> Self {
        Self { mode, log_frames }
    }

    /// Apply `action`.
    ///
    /// Returns `true` when the active frame has to be logged right away:
    /// logging was just switched on, or the data mode changed while logging.
    pub fn apply_action(&mut self, action: ViewAction) -> bool {
        match action {
            ViewAction::ToggleDataMode => self.mode = self.mode.toggled(),
            ViewAction::ToggleLogging => self.log_frames = !self.log_frames,
        }
        self.log_frames
    }

    /// Whether a newly active frame is logged.
    pub fn logs_frame_change(&self) -> bool {
        self.log_frames
    }

    /// Capture what the host displays for frame `index`.
    pub fn snapshot(&self, frames: &FrameSet, index: usize, map_token: bool) -> ViewSnapshot {
        let polygon_count = frames
            .source(index, self.mode)
            .map(|s| s.polygon_count())
            .unwrap_or(0);
        let spec = frames.spec();

        ViewSnapshot {
            frame_index: index,
            frame_count: frames.len(),
            polygon_count,
            mode: self.mode,
            log_frames: self.log_frames,
            grid_size: spec.grid_size(),
            cell_size: spec.cell_size(),
            map_token,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewSnapshot {
    pub frame_index: usize,
    pub frame_count: usize,
    pub polygon_count: usize,
    pub mode: DataMode,
    pub log_frames: bool,
    pub grid_size: u32,
    pub cell_size: u32,
    pub map_token: bool,
}

impl ViewSnapshot {
    /// 1-based frame number for display.
    pub fn frame_number(&self) -> usize {
        self.frame_index + 1
    }
}
