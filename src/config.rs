use std::io::Read;

use crate::foundation::{
    core::Fps,
    error::{MorphError, MorphResult},
};

/// Tunables for a [`MorphSession`](crate::MorphSession).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    /// Scheduler tick rate.
    pub fps: u32,
    /// Steps for word-to-word transitions. `None` means a third of a second.
    pub transition_frames: Option<usize>,
    /// Steps for the random-flip swap when related words arrive.
    pub related_frames: usize,
    /// Per-cell chance of re-glyphing a visible cell on each shimmer tick.
    pub shimmer_probability: f64,
    /// Multiplier applied to every letter's direction on a scroll event.
    pub scroll_speed: f64,
    /// Length of each letter's random scroll direction.
    pub letter_scroll_speed: f64,
    /// Share of the canvas the word block may occupy, in `(0, 1]`.
    pub padding_factor: f64,
    /// Seconds between autoplay word changes.
    pub autoplay_secs: f64,
    /// Seed for every random draw; entropy when unset.
    pub seed: Option<u64>,
    /// Display height including the toolbar row; terminal height when unset.
    pub rows: Option<usize>,
    /// Display width; terminal width when unset.
    pub cols: Option<usize>,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            transition_frames: None,
            related_frames: 10,
            shimmer_probability: 0.05,
            scroll_speed: 1.5,
            letter_scroll_speed: 1.0,
            padding_factor: 0.8,
            autoplay_secs: 5.0,
            seed: None,
            rows: None,
            cols: None,
        }
    }
}

impl MorphConfig {
    pub fn from_json_reader<R: Read>(reader: R) -> MorphResult<Self> {
        let cfg: Self =
            serde_json::from_reader(reader).map_err(|e| MorphError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> MorphResult<()> {
        Fps::new(self.fps)?;
        if self.transition_frames == Some(0) {
            return Err(MorphError::validation("transition_frames must be >= 1"));
        }
        if self.related_frames == 0 {
            return Err(MorphError::validation("related_frames must be >= 1"));
        }
        if !(0.0..=1.0).contains(&self.shimmer_probability) {
            return Err(MorphError::validation(
                "shimmer_probability must be within [0, 1]",
            ));
        }
        if !(self.padding_factor > 0.0 && self.padding_factor <= 1.0) {
            return Err(MorphError::validation(
                "padding_factor must be within (0, 1]",
            ));
        }
        if !self.scroll_speed.is_finite() || !self.letter_scroll_speed.is_finite() {
            return Err(MorphError::validation("scroll speeds must be finite"));
        }
        if !(self.autoplay_secs.is_finite() && self.autoplay_secs > 0.0) {
            return Err(MorphError::validation("autoplay_secs must be > 0"));
        }
        if self.rows == Some(0) || self.cols == Some(0) {
            return Err(MorphError::validation("rows and cols must be > 0 when set"));
        }
        Ok(())
    }

    pub fn fps(&self) -> MorphResult<Fps> {
        Fps::new(self.fps)
    }

    /// Transition length, defaulting to `fps / 3` (at least one step).
    pub fn transition_steps(&self) -> usize {
        self.transition_frames
            .unwrap_or((self.fps / 3).max(1) as usize)
    }
}
