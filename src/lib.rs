//! asciimorph turns words into big letter-shaped windows onto scrolling word textures, and
//! animates between displays by moving individual characters.
//!
//! # Pipeline overview
//!
//! 1. **Compose**: `Layer + Mask` pairs on a [`Canvas`] produce one [`CharGrid`] frame.
//! 2. **Interpolate**: two frames and a step count give an in-between sequence
//!    ([`TransitionKind`]).
//! 3. **Schedule**: sequences are queued on a [`FrameScheduler`], which hands one frame per
//!    tick to a [`FrameRenderer`].
//!
//! [`MorphSession`] owns all of the above for one display.
#![forbid(unsafe_code)]

mod compose;
mod config;
mod foundation;
mod glyph;
mod morph;
mod render;
mod scene;
mod schedule;
mod session;

pub use compose::canvas::{Canvas, LayerId};
pub use compose::layer::{Layer, TILE_PAD};
pub use compose::mask::Mask;
pub use config::MorphConfig;
pub use foundation::core::{BLANK, CharGrid, Fps, Grid, Point};
pub use foundation::error::{MorphError, MorphResult};
pub use foundation::rng::{random_glyph, rng_from_seed};
pub use glyph::atlas::GlyphAtlas;
pub use glyph::rle::{GlyphMatrix, RleGlyph};
pub use morph::cloud::{Pairing, PointCloud, match_points};
pub use morph::interpolate::{
    TransitionKind, approximate_ot, balance_counts, interpolate, parse_transition_kind,
    random_flip, random_map,
};
pub use render::sink::{FrameKind, FrameRenderer, InMemoryRenderer};
pub use render::terminal::{
    TerminalRenderer, TextRenderer, related_runs, terminal_size, toolbar_row, word_runs,
};
pub use scene::word::{Letter, LetterMetrics, WordArt};
pub use scene::words::{
    MAX_SINGLE_LINE, RelatedWords, StaticRelatedWords, default_related_words, guess_full_word,
    parse_words, resolve_related, split_related,
};
pub use schedule::clock::TickClock;
pub use schedule::scheduler::{FrameScheduler, SchedulerState, Tick};
pub use session::MorphSession;
