use std::fmt;
use std::ops::{Index, IndexMut};
use std::time::Duration;

use crate::foundation::error::{MorphError, MorphResult};

/// Character that marks an empty cell in every frame.
pub const BLANK: char = ' ';

/// Integer cell coordinate. `row` grows downwards, `col` grows to the right.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn distance(self, row: f64, col: f64) -> f64 {
        let dr = self.row as f64 - row;
        let dc = self.col as f64 - col;
        (dr * dr + dc * dc).sqrt()
    }

    /// Position `step / steps` of the way towards `to`, floored back onto the grid.
    ///
    /// The offset is scaled by `step` before dividing by `steps`, so whole-cell positions
    /// come out exact. `steps == 0` yields `to`.
    pub fn lerp_floor(self, to: Point, step: usize, steps: usize) -> Point {
        if steps == 0 {
            return to;
        }
        let along = |a: usize, b: usize| {
            let offset = (b as f64 - a as f64) * step as f64 / steps as f64;
            (a as f64 + offset).floor().max(0.0) as usize
        };
        Point {
            row: along(self.row, to.row),
            col: along(self.col, to.col),
        }
    }
}

/// Fixed-size row-major buffer addressed by `row * cols + col`.
///
/// Shape is set once at construction; every row has exactly `cols` entries.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }

    /// Build from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> MorphResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MorphError::validation(format!(
                    "grid row {i} has {} cells, expected {cols}",
                    row.len()
                )));
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Fail with a validation error unless `other` has the same shape.
    pub fn ensure_same_shape<U>(&self, other: &Grid<U>, what: &str) -> MorphResult<()> {
        if self.same_shape(other) {
            return Ok(());
        }
        Err(MorphError::validation(format!(
            "{what}: shape mismatch ({}x{} vs {}x{})",
            self.rows, self.cols, other.rows, other.cols
        )))
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if !self.contains(row, col) {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if !self.contains(row, col) {
            return None;
        }
        self.cells.get_mut(row * self.cols + col)
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> MorphResult<()> {
        let (rows, cols) = (self.rows, self.cols);
        let slot = self.get_mut(row, col).ok_or_else(|| {
            MorphError::validation(format!("cell ({row}, {col}) outside {rows}x{cols} grid"))
        })?;
        *slot = value;
        Ok(())
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        &mut self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Iterate cells in row-major order together with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (Point::new(i / cols, i % cols), v))
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            self.contains(row, col),
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        &self.cells[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            self.contains(row, col),
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        &mut self.cells[row * self.cols + col]
    }
}

impl<T: fmt::Debug> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish_non_exhaustive()
    }
}

/// A frame: one grid of characters.
pub type CharGrid = Grid<char>;

impl Grid<char> {
    pub fn blank(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, BLANK)
    }

    /// Build from text lines. Lines must all have the same number of chars.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> MorphResult<Self> {
        Self::from_rows(
            lines
                .iter()
                .map(|l| l.as_ref().chars().collect())
                .collect(),
        )
    }

    pub fn to_lines(&self) -> Vec<String> {
        (0..self.rows).map(|r| self.row(r).iter().collect()).collect()
    }

    /// Positions of every non-blank cell, row-major.
    pub fn occupied(&self) -> Vec<Point> {
        self.iter()
            .filter(|(_, c)| **c != BLANK)
            .map(|(p, _)| p)
            .collect()
    }
}

impl fmt::Display for Grid<char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            if r > 0 {
                writeln!(f)?;
            }
            for c in self.row(r) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Integer frames-per-second rate driving the scheduler tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps(u32);

impl Fps {
    pub fn new(fps: u32) -> MorphResult<Self> {
        if fps == 0 {
            return Err(MorphError::validation("fps must be > 0"));
        }
        Ok(Self(fps))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn frame_duration(self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.0))
    }

    pub fn secs_to_frames(self, secs: f64) -> u64 {
        (secs * f64::from(self.0)).floor().max(0.0) as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
