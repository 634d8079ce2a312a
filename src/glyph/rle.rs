use crate::foundation::{
    core::Grid,
    error::{MorphError, MorphResult},
};

/// Rasterized glyph: `true` where the shape is lit.
pub type GlyphMatrix = Grid<bool>;

/// Run-length encoded glyph bitmap, flattened row-major.
///
/// `values[i]` repeats `lengths[i]` times; the expanded sequence has `width * height` entries.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RleGlyph {
    pub values: Vec<u8>,
    pub lengths: Vec<usize>,
    pub width: usize,
    pub height: usize,
}

impl RleGlyph {
    pub fn decode(&self) -> MorphResult<GlyphMatrix> {
        if self.width == 0 || self.height == 0 {
            return Err(MorphError::glyph(format!(
                "glyph must be non-empty (got {}x{})",
                self.width, self.height
            )));
        }
        if self.values.len() != self.lengths.len() {
            return Err(MorphError::glyph(format!(
                "{} run values but {} run lengths",
                self.values.len(),
                self.lengths.len()
            )));
        }
        let expected = self.width * self.height;
        let total = self
            .lengths
            .iter()
            .try_fold(0usize, |acc, n| acc.checked_add(*n))
            .ok_or_else(|| MorphError::glyph("run lengths overflow"))?;
        if total != expected {
            return Err(MorphError::glyph(format!(
                "runs cover {total} pixels, expected {expected} ({}x{})",
                self.width, self.height
            )));
        }

        let mut matrix = Grid::new(self.height, self.width, false);
        let mut at = 0usize;
        for (&v, &n) in self.values.iter().zip(&self.lengths) {
            matrix.cells_mut()[at..at + n].fill(v != 0);
            at += n;
        }
        Ok(matrix)
    }

    pub fn encode(matrix: &GlyphMatrix) -> Self {
        let mut values = Vec::new();
        let mut lengths: Vec<usize> = Vec::new();
        for &lit in matrix.cells() {
            let v = u8::from(lit);
            if values.last() == Some(&v)
                && let Some(n) = lengths.last_mut()
            {
                *n += 1;
                continue;
            }
            values.push(v);
            lengths.push(1);
        }
        Self {
            values,
            lengths,
            width: matrix.cols(),
            height: matrix.rows(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/rle.rs"]
mod tests;
