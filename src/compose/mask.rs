use crate::foundation::core::{Grid, Point};
use crate::glyph::rle::GlyphMatrix;

/// Boolean visibility grid paired with a [`Layer`](crate::Layer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    grid: Grid<bool>,
}

impl Mask {
    /// An all-hidden mask.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            grid: Grid::new(rows, cols, false),
        }
    }

    pub fn from_grid(grid: Grid<bool>) -> Self {
        Self { grid }
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn grid(&self) -> &Grid<bool> {
        &self.grid
    }

    /// Caller guarantees `(row, col)` is in bounds.
    pub fn is_visible(&self, row: usize, col: usize) -> bool {
        self.grid[(row, col)]
    }

    /// Out-of-bounds cells are ignored.
    pub fn set(&mut self, row: usize, col: usize, visible: bool) {
        if let Some(cell) = self.grid.get_mut(row, col) {
            *cell = visible;
        }
    }

    /// Reveal a `size × size` square anchored at `(start_row, start_col)`, clipped to bounds.
    pub fn set_square(&mut self, start_row: usize, start_col: usize, size: usize) {
        self.set_rect(start_row, start_col, size, size);
    }

    fn set_rect(&mut self, start_row: usize, start_col: usize, height: usize, width: usize) {
        let row_end = start_row.saturating_add(height).min(self.rows());
        let col_end = start_col.saturating_add(width).min(self.cols());
        for r in start_row..row_end {
            for c in start_col..col_end {
                self.grid[(r, c)] = true;
            }
        }
    }

    /// Rasterize `glyph` scaled into the `size × size` box at `(start_row, start_col)`.
    ///
    /// Glyph pixel `(i, j)` covers rows `start + floor(i*size/h) .. start + floor((i+1)*size/h)`
    /// (at least one row), and likewise for columns, so both up- and down-scaling leave no
    /// gaps. Anything past the mask edge is clipped.
    pub fn stamp_glyph(
        &mut self,
        glyph: &GlyphMatrix,
        start_row: usize,
        start_col: usize,
        size: usize,
    ) {
        let (h, w) = (glyph.rows(), glyph.cols());
        if h == 0 || w == 0 || size == 0 {
            return;
        }
        for (p, &lit) in glyph.iter() {
            if !lit {
                continue;
            }
            let r0 = p.row * size / h;
            let r1 = ((p.row + 1) * size / h).max(r0 + 1);
            let c0 = p.col * size / w;
            let c1 = ((p.col + 1) * size / w).max(c0 + 1);
            self.set_rect(start_row + r0, start_col + c0, r1 - r0, c1 - c0);
        }
    }

    pub fn visible_count(&self) -> usize {
        self.grid.cells().iter().filter(|v| **v).count()
    }

    pub fn visible_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.grid.iter().filter(|(_, v)| **v).map(|(p, _)| p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/mask.rs"]
mod tests;
