//! Cached window over the table covering the visible cell range.

use std::cell::{Cell as StdCell, Ref, RefCell};
use std::rc::Rc;

use crate::geometry::GridPos;
use crate::layout::Layout;
use crate::table::{BoundedSlice, Cell, Table};

/// Caches the slice of the table that the renderer needs this frame.
///
/// The cache is replaced wholesale on every refresh, never mutated in place,
/// so a reader mid-frame sees either the old window or the new one. Refreshes
/// are driven by the layout's range-changed notification, not by raw scroll
/// events.
pub struct TableDataWindow {
    table: Rc<RefCell<Table>>,
    layout: Rc<Layout>,
    rows: RefCell<Vec<BoundedSlice<Cell>>>,
    start: StdCell<GridPos>,
}

impl TableDataWindow {
    /// Build a window subscribed to `layout` range changes.
    pub fn new(table: Rc<RefCell<Table>>, layout: Rc<Layout>) -> Rc<Self> {
        let window = Rc::new(Self {
            table,
            layout: Rc::clone(&layout),
            rows: RefCell::new(Vec::new()),
            start: StdCell::new(GridPos::new(0, 0)),
        });
        let weak = Rc::downgrade(&window);
        layout.on_range_change(move || {
            if let Some(window) = weak.upgrade() {
                window.refresh_data();
            }
        });
        window
    }

    /// Replace the cached slice collection with the table content covering
    /// the layout's current tight `[start_cell, end_cell)` rectangle.
    pub fn refresh_data(&self) {
        let from = self.layout.start_cell();
        let to = self.layout.end_cell();
        // end_cell never precedes start_cell for a non-negative viewport
        // size, so the range request cannot be rejected.
        let rows = self
            .table
            .borrow()
            .cell_range(from, to)
            .unwrap_or_default();
        self.start.set(from);
        *self.rows.borrow_mut() = rows;
    }

    /// The cached per-row slices; empty before the first refresh.
    pub fn data(&self) -> Ref<'_, Vec<BoundedSlice<Cell>>> {
        self.rows.borrow()
    }

    /// First cell covered by the cached window.
    pub fn start(&self) -> GridPos {
        self.start.get()
    }

    /// The cached cell at an absolute grid position, resolving the window
    /// offset internally. `None` outside the cached window or where the
    /// table holds nothing.
    pub fn cell_at(&self, position: GridPos) -> Option<Cell> {
        let start = self.start.get();
        let col = position.col.checked_sub(start.col)? as usize;
        let row = position.row.checked_sub(start.row)? as usize;
        self.rows.borrow().get(row)?.index(col).cloned()
    }
}
