//! N-dimensional arrays.
//!
//! The leading indices already fixed by enclosing groups are passed down
//! explicitly, so each call knows its residual shape:
//!
//! - rank 0: the single cell at the fixed coordinate
//! - rank 1: a vertical list of cells
//! - rank 2: a dense grid, read through one bulk view
//! - rank 3 and up: one group per index of the next axis

use super::{Node, Renderer};
use crate::error::Result;
use crate::value::{NdArray, ValueKind};

/// Narrowest grid cell, in points.
const MIN_CELL_WIDTH: f32 = 32.0;
/// Horizontal spacing reserved per grid cell.
const CELL_SPACING: f32 = 8.0;

impl Renderer<'_> {
    /// Render the part of `array` below the leading indices `fixed`.
    pub fn render_array_at(
        &mut self,
        array: &mut NdArray,
        node: &Node,
        fixed: &[usize],
    ) -> Result<()> {
        let residual = array.residual_shape(fixed).to_vec();
        if residual.is_empty() {
            return self.render_cell(array, fixed, node);
        }

        let label = format!("{} {:?}", node.display_name(), residual);
        self.titled(node, &label, |ui| match residual.as_slice() {
            [len] => {
                for i in 0..*len {
                    let child = node.child(i, i.to_string(), ValueKind::Array, None);
                    ui.render_cell(array, &extend(fixed, &[i]), &child)?;
                }
                Ok(())
            }
            [rows, cols] => ui.render_grid(array, node, fixed, *rows, *cols),
            [outer, ..] => {
                for i in 0..*outer {
                    let child = node.child(i, i.to_string(), ValueKind::Array, None);
                    ui.render_array_at(array, &child, &extend(fixed, &[i]))?;
                }
                Ok(())
            }
            [] => Ok(()),
        })?;
        Ok(())
    }

    /// One cell, written back if it was edited.
    fn render_cell(&mut self, array: &mut NdArray, index: &[usize], node: &Node) -> Result<()> {
        let Some(mut cell) = array.get(index) else {
            return Ok(());
        };
        let (result, modified) = self.scoped(|ui| ui.render_node(&mut cell, node));
        if modified && !array.set(index, &cell) {
            tracing::trace!(array = %node.id(), ?index, "cell edit not stored");
        }
        result
    }

    fn render_grid(
        &mut self,
        array: &mut NdArray,
        node: &Node,
        fixed: &[usize],
        rows: usize,
        cols: usize,
    ) -> Result<()> {
        let width = (self.backend.available_width() / cols.max(1) as f32 - CELL_SPACING)
            .max(MIN_CELL_WIDTH);
        let mut cells = array.view(fixed);

        for r in 0..rows {
            let mut edited = Vec::new();
            let row_cells = cells.iter_mut().skip(r * cols).take(cols);
            let result = self.row(|ui| {
                for (c, cell) in row_cells.enumerate() {
                    let child = node
                        .child(r, "", ValueKind::Array, None)
                        .child(c, "", ValueKind::Array, None)
                        .inline();
                    ui.backend.set_next_item_width(width);
                    let (rendered, modified) = ui.scoped(|ui| ui.render_node(cell, &child));
                    if modified {
                        edited.push(c);
                    }
                    rendered?;
                }
                Ok(())
            });

            for c in edited {
                let index = extend(fixed, &[r, c]);
                if let Some(cell) = cells.get(r * cols + c) {
                    array.set(&index, cell);
                }
            }
            result?;
        }
        Ok(())
    }
}

fn extend(fixed: &[usize], more: &[usize]) -> Vec<usize> {
    [fixed, more].concat()
}
