use std::f64::consts::TAU;

use rand::Rng;

use crate::{
    compose::{
        canvas::{Canvas, LayerId},
        layer::Layer,
        mask::Mask,
    },
    config::MorphConfig,
    foundation::{
        error::{MorphError, MorphResult},
        rng::random_glyph,
    },
    glyph::atlas::GlyphAtlas,
};

/// Gap between letters as a share of the letter size.
const SPACING_RATIO: f64 = 0.1;

/// One glyph of a [`WordArt`]: a canvas layer plus the direction it drifts when scrolled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letter {
    pub ch: char,
    pub id: LayerId,
    pub dx: f64,
    pub dy: f64,
}

/// Letter box geometry computed by [`WordArt::layout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LetterMetrics {
    pub size: usize,
    pub spacing: usize,
    pub start_row: usize,
    pub start_col: usize,
    pub block_width: usize,
    pub block_height: usize,
}

impl LetterMetrics {
    /// Size the letter grid so `lines` fit in the padded canvas, centred.
    pub fn fit(lines: &[String], rows: usize, cols: usize, padding: f64) -> MorphResult<Self> {
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        if lines.is_empty() || widest == 0 {
            return Err(MorphError::validation("word art needs at least one character"));
        }

        let avail_rows = (rows as f64 * padding).floor() as usize;
        let avail_cols = (cols as f64 * padding).floor() as usize;
        let size = (avail_cols / widest).min(avail_rows / lines.len());
        if size == 0 {
            return Err(MorphError::validation(format!(
                "{rows}x{cols} canvas is too small for {} line(s) of up to {widest} letters",
                lines.len()
            )));
        }
        let spacing = ((size as f64 * SPACING_RATIO).floor() as usize).max(1);
        let block_width = widest * (size + spacing) - spacing;
        let block_height = lines.len() * (size + spacing) - spacing;

        Ok(Self {
            size,
            spacing,
            start_row: rows.saturating_sub(block_height) / 2,
            start_col: cols.saturating_sub(block_width) / 2,
            block_width,
            block_height,
        })
    }

    /// Top-left cell of letter `index` on line `line` holding `line_len` letters.
    pub fn origin(&self, line: usize, line_len: usize, index: usize) -> (usize, usize) {
        let pitch = self.size + self.spacing;
        let line_width = (line_len * pitch).saturating_sub(self.spacing);
        let indent = self.block_width.saturating_sub(line_width) / 2;
        (
            self.start_row + line * pitch,
            self.start_col + indent + index * pitch,
        )
    }
}

/// Words drawn as big glyph-shaped windows onto scrolling word textures.
#[derive(Clone, Debug)]
pub struct WordArt {
    lines: Vec<String>,
    letters: Vec<Letter>,
    related: Vec<String>,
    metrics: LetterMetrics,
}

impl WordArt {
    /// Lay `lines` out centred on `canvas` and register one layer per letter.
    ///
    /// Characters missing from `atlas` still take up space but show nothing.
    #[tracing::instrument(skip_all, fields(lines = ?lines))]
    pub fn layout<R: Rng + ?Sized>(
        lines: &[String],
        related: &[String],
        canvas: &mut Canvas,
        atlas: &GlyphAtlas,
        cfg: &MorphConfig,
        rng: &mut R,
    ) -> MorphResult<Self> {
        let (rows, cols) = (canvas.rows(), canvas.cols());
        let metrics = LetterMetrics::fit(lines, rows, cols, cfg.padding_factor)?;

        let mut letters = Vec::new();
        for (li, line) in lines.iter().enumerate() {
            let line_len = line.chars().count();
            for (ci, ch) in line.chars().enumerate() {
                let (row, col) = metrics.origin(li, line_len, ci);

                let mut layer = Layer::filled_random(rows, cols, rng)?;
                layer.tile_with_words(related, rng);

                let mut mask = Mask::new(rows, cols);
                match atlas.glyph(ch)? {
                    Some(glyph) => mask.stamp_glyph(&glyph, row, col, metrics.size),
                    None if ch.is_whitespace() => {}
                    None => tracing::warn!(glyph = %ch, "no glyph in atlas"),
                }

                let angle = rng.gen_range(0.0..TAU);
                let id = canvas.add_layer(layer, mask)?;
                letters.push(Letter {
                    ch,
                    id,
                    dx: cfg.letter_scroll_speed * angle.cos(),
                    dy: cfg.letter_scroll_speed * angle.sin(),
                });
            }
        }

        tracing::debug!(
            letters = letters.len(),
            size = metrics.size,
            "laid out word art"
        );
        Ok(Self {
            lines: lines.to_vec(),
            letters,
            related: related.to_vec(),
            metrics,
        })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn related(&self) -> &[String] {
        &self.related
    }

    pub fn metrics(&self) -> LetterMetrics {
        self.metrics
    }

    /// Replace the related vocabulary and retile every letter texture with it.
    pub fn update_words<R: Rng + ?Sized>(
        &mut self,
        canvas: &mut Canvas,
        words: Vec<String>,
        rng: &mut R,
    ) -> MorphResult<()> {
        self.related = words;
        for letter in &self.letters {
            layer_of(canvas, letter.id)?.tile_with_words(&self.related, rng);
        }
        Ok(())
    }

    /// Re-glyph each visible cell with probability `p`.
    pub fn shimmer<R: Rng + ?Sized>(
        &self,
        canvas: &mut Canvas,
        p: f64,
        rng: &mut R,
    ) -> MorphResult<()> {
        let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
        for letter in &self.letters {
            let (layer, mask) = canvas
                .pair_mut(letter.id)
                .ok_or_else(|| missing_layer(letter.id))?;
            for cell in mask.visible_cells() {
                if rng.gen_bool(p) {
                    layer.set_char(cell.row as i64, cell.col as i64, random_glyph(rng));
                }
            }
        }
        Ok(())
    }

    /// Drift every letter texture along its own direction. `direction` is the scroll sign.
    pub fn scroll(&self, canvas: &mut Canvas, direction: f64, speed: f64) -> MorphResult<()> {
        let k = speed * direction.signum();
        for letter in &self.letters {
            layer_of(canvas, letter.id)?.scroll_by(k * letter.dx, k * letter.dy);
        }
        Ok(())
    }

    /// Mean `(x, y)` = `(col, row)` of all visible cells; `None` when nothing is visible.
    pub fn center_of_mass(&self, canvas: &Canvas) -> Option<(f64, f64)> {
        let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
        for letter in &self.letters {
            let Some(mask) = canvas.mask(letter.id) else {
                continue;
            };
            for p in mask.visible_cells() {
                sx += p.col as f64;
                sy += p.row as f64;
                n += 1;
            }
        }
        (n > 0).then(|| (sx / n as f64, sy / n as f64))
    }
}

fn missing_layer(id: LayerId) -> MorphError {
    MorphError::invariant(format!("letter layer {} is not on the canvas", id.0))
}

fn layer_of(canvas: &mut Canvas, id: LayerId) -> MorphResult<&mut Layer> {
    canvas.layer_mut(id).ok_or_else(|| missing_layer(id))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/word.rs"]
mod tests;
