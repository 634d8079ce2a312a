use rand::Rng;

use crate::foundation::{
    core::CharGrid,
    error::{MorphError, MorphResult},
    rng::random_glyph,
};

/// Padding glyph written between tiled words.
pub const TILE_PAD: char = '.';

/// A character texture with a continuous scroll offset, addressed toroidally.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    grid: CharGrid,
    offset_x: f64,
    offset_y: f64,
}

impl Layer {
    pub fn new(grid: CharGrid) -> MorphResult<Self> {
        if grid.is_empty() {
            return Err(MorphError::validation(format!(
                "layer needs a non-empty grid (got {}x{})",
                grid.rows(),
                grid.cols()
            )));
        }
        Ok(Self {
            grid,
            offset_x: 0.0,
            offset_y: 0.0,
        })
    }

    /// A layer filled with random printable glyphs.
    pub fn filled_random<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> MorphResult<Self> {
        let mut grid = CharGrid::blank(rows, cols);
        for c in grid.cells_mut() {
            *c = random_glyph(rng);
        }
        Self::new(grid)
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn grid(&self) -> &CharGrid {
        &self.grid
    }

    /// `(offset_x, offset_y)`.
    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    pub fn set_offset(&mut self, offset_x: f64, offset_y: f64) {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
    }

    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Character shown at display cell `(row, col)` given the current offset.
    ///
    /// Any integer coordinate is valid: offsets are floored, then the sum wraps around both
    /// axes onto a non-negative index.
    pub fn get_char(&self, row: i64, col: i64) -> char {
        let r = wrap(row, self.offset_y, self.rows());
        let c = wrap(col, self.offset_x, self.cols());
        self.grid[(r, c)]
    }

    /// Overwrite the texture cell under display cell `(row, col)`.
    pub fn set_char(&mut self, row: i64, col: i64, c: char) {
        let r = wrap(row, self.offset_y, self.rows());
        let cc = wrap(col, self.offset_x, self.cols());
        self.grid[(r, cc)] = c;
    }

    /// Refill every row with random picks from `words`, each followed by 2 to 5 pad dots.
    /// Words are cut off at the row end. Empty word lists leave the texture untouched.
    pub fn tile_with_words<S: AsRef<str>, R: Rng + ?Sized>(&mut self, words: &[S], rng: &mut R) {
        let words: Vec<&str> = words
            .iter()
            .map(AsRef::as_ref)
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return;
        }

        for r in 0..self.grid.rows() {
            let row = self.grid.row_mut(r);
            let mut col = 0;
            while col < row.len() {
                let word = words[rng.gen_range(0..words.len())];
                for ch in word.chars() {
                    if col >= row.len() {
                        break;
                    }
                    row[col] = ch;
                    col += 1;
                }
                let pad = rng.gen_range(2..6);
                for _ in 0..pad {
                    if col >= row.len() {
                        break;
                    }
                    row[col] = TILE_PAD;
                    col += 1;
                }
            }
        }
    }
}

fn wrap(pos: i64, offset: f64, len: usize) -> usize {
    let n = len as i64;
    let shift = (offset.floor() as i64).rem_euclid(n);
    (pos.rem_euclid(n) + shift).rem_euclid(n) as usize
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layer.rs"]
mod tests;
