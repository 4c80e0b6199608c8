//! Sparse 2-D cell store.
//!
//! The grid is conceptually unbounded; only initialized cells take memory.
//! The renderer never reads the table directly — it goes through row slices
//! produced by [`Table::cell_range`], which synthesize empty rows so a
//! consumer never faces a missing row.

mod cell;
mod slice;

pub use cell::{Cell, CellUpdate, CellValue, ContentUpdate, DataFormat, FormatUpdate, UpdateChain};
pub use slice::BoundedSlice;

use std::collections::HashMap;

use crate::error::{GridError, Result};
use crate::geometry::GridPos;

/// Sparse table keyed by (column, row).
#[derive(Default)]
pub struct Table {
    cells: HashMap<(u32, u32), Cell>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell at `position` with the default `Text` format, replacing
    /// any cell already there.
    pub fn init_cell(&mut self, position: GridPos) {
        self.cells.insert(
            (position.col, position.row),
            Cell::new(position, DataFormat::Text),
        );
    }

    /// The cell at `position`, or `None` when uninitialized.
    pub fn cell_at(&self, position: GridPos) -> Option<&Cell> {
        self.cells.get(&(position.col, position.row))
    }

    /// Apply an update chain to the cell at `position`.
    ///
    /// # Errors
    /// `UninitializedCell` when no cell exists there; `EmptyUpdate` /
    /// `FormatMismatch` propagate from the chain with earlier links' effects
    /// retained.
    pub fn update_cell(&mut self, position: GridPos, chain: &UpdateChain) -> Result<()> {
        let cell = self
            .cells
            .get_mut(&(position.col, position.row))
            .ok_or(GridError::UninitializedCell(position.col, position.row))?;
        chain.apply_to(cell)
    }

    /// Row-major slice views covering the half-open rectangle `[from, to)`.
    ///
    /// One slice per row, indexed by column offset from `from.col`.
    /// Uninitialized rows come back as all-absent slices of the same width.
    ///
    /// # Errors
    /// `InvalidRange` when `to` precedes `from` on either axis.
    pub fn cell_range(&self, from: GridPos, to: GridPos) -> Result<Vec<BoundedSlice<Cell>>> {
        if to.col < from.col {
            return Err(GridError::InvalidRange {
                start: from.col as usize,
                end: to.col as usize,
            });
        }
        if to.row < from.row {
            return Err(GridError::InvalidRange {
                start: from.row as usize,
                end: to.row as usize,
            });
        }

        let width = (to.col - from.col) as usize;
        let mut rows = Vec::with_capacity((to.row - from.row) as usize);
        for row in from.row..to.row {
            let mut source: Vec<Option<Cell>> = Vec::with_capacity(width);
            for col in from.col..to.col {
                source.push(self.cells.get(&(col, row)).cloned());
            }
            rows.push(BoundedSlice::new(source, 0, width)?);
        }
        Ok(rows)
    }

    /// Number of initialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
