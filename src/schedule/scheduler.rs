use std::time::Duration;

use crate::{
    foundation::{
        core::{CharGrid, Fps},
        error::{MorphError, MorphResult},
    },
    render::sink::FrameRenderer,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Outcome of one [`FrameScheduler::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Scheduler is stopped; nothing happened.
    Idle,
    /// Every queued frame has been shown; waiting for producers.
    Starved,
    /// Frame at this queue index was rendered as a replay frame.
    Replay(usize),
    /// Frame at this queue index was the newest and was rendered live.
    Live(usize),
}

/// Append-only frame queue consumed one frame per tick.
///
/// Frames are only ever appended at the tail. Once the cursor has moved two past a frame it
/// is dropped, so long sessions keep only the frames still ahead of the cursor (plus the one
/// on screen). Producers and the tick share one thread; a multi-threaded host must serialize
/// access (e.g. behind a `Mutex`).
#[derive(Debug)]
pub struct FrameScheduler {
    frames: Vec<Option<CharGrid>>,
    cursor: usize,
    state: SchedulerState,
    fps: Fps,
}

impl FrameScheduler {
    pub fn new(fps: Fps) -> Self {
        Self {
            frames: Vec::new(),
            cursor: 0,
            state: SchedulerState::Idle,
            fps,
        }
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Tick period while running.
    pub fn period(&self) -> Duration {
        self.fps.frame_duration()
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn start(&mut self) {
        if self.state == SchedulerState::Running {
            return;
        }
        self.state = SchedulerState::Running;
        tracing::debug!(fps = self.fps.get(), "scheduler started");
    }

    pub fn stop(&mut self) {
        if self.state == SchedulerState::Idle {
            return;
        }
        self.state = SchedulerState::Idle;
        tracing::debug!(cursor = self.cursor, "scheduler stopped");
    }

    pub fn add_frame(&mut self, frame: CharGrid) {
        self.frames.push(Some(frame));
    }

    pub fn add_frames<I: IntoIterator<Item = CharGrid>>(&mut self, frames: I) {
        self.frames.extend(frames.into_iter().map(Some));
    }

    /// Total frames ever queued, released ones included.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn num_remaining_frames(&self) -> usize {
        self.frames.len() - self.cursor
    }

    /// Frames still held in memory.
    pub fn retained(&self) -> usize {
        self.frames.iter().filter(|f| f.is_some()).count()
    }

    pub fn is_released(&self, index: usize) -> bool {
        matches!(self.frames.get(index), Some(None))
    }

    /// Newest queued frame, if any.
    pub fn last_frame(&self) -> Option<&CharGrid> {
        self.frames.last().and_then(Option::as_ref)
    }

    /// Render the frame under the cursor and advance.
    ///
    /// The newest frame goes to [`FrameRenderer::render_live`], older ones to
    /// [`FrameRenderer::render_replay`]. On a renderer error the cursor does not move.
    pub fn tick(&mut self, renderer: &mut dyn FrameRenderer) -> MorphResult<Tick> {
        if self.state == SchedulerState::Idle {
            return Ok(Tick::Idle);
        }
        if self.cursor >= self.frames.len() {
            tracing::trace!(cursor = self.cursor, "scheduler starved");
            return Ok(Tick::Starved);
        }

        let index = self.cursor;
        let frame = self.frames[index].as_ref().ok_or_else(|| {
            MorphError::invariant(format!("frame {index} was released before it was shown"))
        })?;
        let live = index + 1 == self.frames.len();
        if live {
            renderer.render_live(frame)?;
        } else {
            renderer.render_replay(frame)?;
        }

        if index > 0 {
            self.frames[index - 1] = None;
        }
        self.cursor = (index + 1).min(self.frames.len());

        Ok(if live {
            Tick::Live(index)
        } else {
            Tick::Replay(index)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
