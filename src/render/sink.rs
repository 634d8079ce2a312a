use crate::foundation::{core::CharGrid, error::MorphResult};

/// Consumer of scheduled frames.
///
/// Replay frames are drawn plainly. The live frame (the newest one queued) may be decorated
/// further, but implementations must not change the grid they are handed.
pub trait FrameRenderer {
    fn render_replay(&mut self, frame: &CharGrid) -> MorphResult<()>;
    fn render_live(&mut self, frame: &CharGrid) -> MorphResult<()>;
}

/// How a frame was handed to a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    Replay,
    Live,
}

/// In-memory renderer for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryRenderer {
    /// Frames in the order they were rendered.
    pub frames: Vec<(FrameKind, CharGrid)>,
}

impl InMemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&(FrameKind, CharGrid)> {
        self.frames.last()
    }
}

impl FrameRenderer for InMemoryRenderer {
    fn render_replay(&mut self, frame: &CharGrid) -> MorphResult<()> {
        self.frames.push((FrameKind::Replay, frame.clone()));
        Ok(())
    }

    fn render_live(&mut self, frame: &CharGrid) -> MorphResult<()> {
        self.frames.push((FrameKind::Live, frame.clone()));
        Ok(())
    }
}
