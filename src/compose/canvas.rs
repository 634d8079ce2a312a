use crate::{
    compose::{layer::Layer, mask::Mask},
    foundation::{
        core::CharGrid,
        error::{MorphError, MorphResult},
    },
};

/// Handle to a (layer, mask) pair registered on a [`Canvas`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u32);

#[derive(Clone, Debug)]
struct Entry {
    layer: Layer,
    mask: Mask,
}

/// Ordered stack of (layer, mask) pairs composited in paint order.
#[derive(Clone, Debug)]
pub struct Canvas {
    rows: usize,
    cols: usize,
    entries: Vec<Entry>,
}

impl Canvas {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: Vec::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a pair on top of the stack. Mask and layer must match the canvas shape.
    pub fn add_layer(&mut self, layer: Layer, mask: Mask) -> MorphResult<LayerId> {
        if mask.rows() != self.rows || mask.cols() != self.cols {
            return Err(MorphError::validation(format!(
                "mask is {}x{}, canvas is {}x{}",
                mask.rows(),
                mask.cols(),
                self.rows,
                self.cols
            )));
        }
        if layer.rows() != self.rows || layer.cols() != self.cols {
            return Err(MorphError::validation(format!(
                "layer is {}x{}, canvas is {}x{}",
                layer.rows(),
                layer.cols(),
                self.rows,
                self.cols
            )));
        }
        let id = LayerId(
            self.entries
                .len()
                .try_into()
                .map_err(|_| MorphError::validation("layer id overflow"))?,
        );
        self.entries.push(Entry { layer, mask });
        Ok(id)
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.entries.get(id.0 as usize).map(|e| &e.layer)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.entries.get_mut(id.0 as usize).map(|e| &mut e.layer)
    }

    pub fn mask(&self, id: LayerId) -> Option<&Mask> {
        self.entries.get(id.0 as usize).map(|e| &e.mask)
    }

    /// Both halves of a pair, the layer mutable.
    pub fn pair_mut(&mut self, id: LayerId) -> Option<(&mut Layer, &Mask)> {
        self.entries
            .get_mut(id.0 as usize)
            .map(|e| (&mut e.layer, &e.mask))
    }

    /// Composite every pair in registration order onto a fresh blank frame.
    ///
    /// Where several masks are visible, the last-registered layer wins.
    pub fn get_frame(&self) -> CharGrid {
        let mut frame = CharGrid::blank(self.rows, self.cols);
        for entry in &self.entries {
            for p in entry.mask.visible_cells() {
                frame[(p.row, p.col)] = entry.layer.get_char(p.row as i64, p.col as i64);
            }
        }
        frame
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/canvas.rs"]
mod tests;
