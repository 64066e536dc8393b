//! Frame player - circular frame index
//!
//! States are frame indices `0..frame_count`; the only transition is
//! [`FramePlayer::advance`], which wraps to 0 after the last frame. There is
//! no terminal state. Who calls `advance` (and how often) is up to the host;
//! see the engine's ticker for the timer-driven version.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePlayer {
    index: usize,
    frame_count: usize,
}

impl FramePlayer {
    /// Start at frame 0.
    pub fn new(frame_count: usize) -> Self {
        Self {
            index: 0,
            frame_count,
        }
    }

    /// Current frame index (0-based).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current frame number for display (1-based).
    pub fn frame_number(&self) -> usize {
        self.index + 1
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Move to the next frame, wrapping after the last one.
    ///
    /// Returns the new index. With no frames the index stays at 0.
    pub fn advance(&mut self) -> usize {
        if self.frame_count > 0 {
            self.index = (self.index + 1) % self.frame_count;
        }
        self.index
    }
}
