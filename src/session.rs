use rand::{Rng, rngs::StdRng};

use crate::{
    compose::canvas::Canvas,
    config::MorphConfig,
    foundation::{
        core::CharGrid,
        error::{MorphError, MorphResult},
        rng::rng_from_seed,
    },
    glyph::atlas::GlyphAtlas,
    morph::interpolate::{TransitionKind, interpolate},
    render::sink::FrameRenderer,
    schedule::scheduler::{FrameScheduler, Tick},
    scene::{word::WordArt, words::resolve_related},
};

/// Frames left in the queue below which a scroll enqueues a fresh frame.
const SCROLL_TOP_UP: usize = 2;

/// Everything one running display needs: scheduler, active canvas and word, randomness.
///
/// Producers (word changes, related-word replies, scroll input, shimmer ticks) and the
/// scheduler tick all go through `&mut self`, so there is exactly one writer.
pub struct MorphSession {
    cfg: MorphConfig,
    rng: StdRng,
    atlas: GlyphAtlas,
    scheduler: FrameScheduler,
    canvas: Canvas,
    word: Option<WordArt>,
    transitioning: bool,
}

impl MorphSession {
    /// `display_rows` includes the toolbar row, so the canvas is one row shorter.
    pub fn new(
        cfg: MorphConfig,
        atlas: GlyphAtlas,
        display_rows: usize,
        display_cols: usize,
    ) -> MorphResult<Self> {
        cfg.validate()?;
        if display_rows < 2 || display_cols == 0 {
            return Err(MorphError::validation(format!(
                "display {display_rows}x{display_cols} leaves no room for a canvas"
            )));
        }
        let rng = rng_from_seed(cfg.seed);
        let scheduler = FrameScheduler::new(cfg.fps()?);
        Ok(Self {
            cfg,
            rng,
            atlas,
            scheduler,
            canvas: Canvas::new(display_rows - 1, display_cols),
            word: None,
            transitioning: false,
        })
    }

    pub fn config(&self) -> &MorphConfig {
        &self.cfg
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut FrameScheduler {
        &mut self.scheduler
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn word(&self) -> Option<&WordArt> {
        self.word.as_ref()
    }

    /// True from a word change until its related words have been applied.
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Text to ask the related-words source about.
    pub fn query(&self) -> Option<String> {
        self.word.as_ref().map(|w| w.lines().join(" "))
    }

    fn build(&mut self, lines: &[String]) -> MorphResult<(Canvas, WordArt)> {
        let mut canvas = Canvas::new(self.canvas.rows(), self.canvas.cols());
        let word = WordArt::layout(
            lines,
            &[],
            &mut canvas,
            &self.atlas,
            &self.cfg,
            &mut self.rng,
        )?;
        Ok((canvas, word))
    }

    /// Replace the display with `lines` immediately (no transition).
    #[tracing::instrument(skip(self))]
    pub fn show(&mut self, lines: &[String]) -> MorphResult<()> {
        let (canvas, word) = self.build(lines)?;
        self.scheduler.add_frame(canvas.get_frame());
        self.canvas = canvas;
        self.word = Some(word);
        self.transitioning = true;
        Ok(())
    }

    /// Move from whatever is queued last to `lines` with the transport transition.
    ///
    /// Returns the number of frames appended.
    #[tracing::instrument(skip(self))]
    pub fn transition_to(&mut self, lines: &[String]) -> MorphResult<usize> {
        let from = match self.scheduler.last_frame() {
            Some(frame) => frame.clone(),
            None => CharGrid::blank(self.canvas.rows(), self.canvas.cols()),
        };
        let (canvas, word) = self.build(lines)?;
        let frames = interpolate(
            TransitionKind::ApproximateOt,
            &from,
            &canvas.get_frame(),
            self.cfg.transition_steps(),
            &mut self.rng,
        )?;
        let n = frames.len();
        self.scheduler.add_frames(frames);
        self.canvas = canvas;
        self.word = Some(word);
        self.transitioning = true;
        Ok(n)
    }

    /// Apply a related-words reply (or its failure) to the current word.
    ///
    /// Failures fall back to the default vocabulary. The textures swap over with a random
    /// flip, and the transition ends.
    #[tracing::instrument(skip_all)]
    pub fn receive_related(&mut self, reply: anyhow::Result<Vec<String>>) -> MorphResult<usize> {
        let words = resolve_related(reply);
        let Some(word) = self.word.as_mut() else {
            return Err(MorphError::validation(
                "related words arrived before any word was shown",
            ));
        };

        let before = self.canvas.get_frame();
        word.update_words(&mut self.canvas, words, &mut self.rng)?;
        let after = self.canvas.get_frame();
        let frames = interpolate(
            TransitionKind::RandomFlip,
            &before,
            &after,
            self.cfg.related_frames,
            &mut self.rng,
        )?;
        let n = frames.len();
        self.scheduler.add_frames(frames);
        self.transitioning = false;
        Ok(n)
    }

    /// While transitioning, sprinkle random glyphs over the word and queue one frame.
    pub fn shimmer_tick(&mut self) -> MorphResult<bool> {
        if !self.transitioning {
            return Ok(false);
        }
        let Some(word) = self.word.as_ref() else {
            return Ok(false);
        };
        word.shimmer(&mut self.canvas, self.cfg.shimmer_probability, &mut self.rng)?;
        self.scheduler.add_frame(self.canvas.get_frame());
        Ok(true)
    }

    /// Drift every letter texture. Ignored mid-transition. `direction` is the scroll sign.
    pub fn scroll(&mut self, direction: f64) -> MorphResult<bool> {
        if self.transitioning {
            return Ok(false);
        }
        let Some(word) = self.word.as_ref() else {
            return Ok(false);
        };
        word.scroll(&mut self.canvas, direction, self.cfg.scroll_speed)?;
        if self.scheduler.num_remaining_frames() < SCROLL_TOP_UP {
            self.scheduler.add_frame(self.canvas.get_frame());
        }
        Ok(true)
    }

    /// A random related word to show next, if any are known.
    pub fn autoplay_pick(&mut self) -> Option<String> {
        let related = self.word.as_ref()?.related();
        if related.is_empty() {
            return None;
        }
        let i = self.rng.gen_range(0..related.len());
        Some(related[i].clone())
    }

    pub fn start(&mut self) {
        self.scheduler.start();
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn tick(&mut self, renderer: &mut dyn FrameRenderer) -> MorphResult<Tick> {
        self.scheduler.tick(renderer)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
