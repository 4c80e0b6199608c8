//! Coordinate transforms between world space, viewport space, and the screen.
//!
//! [`Layout`] is a pure function of viewport state and geometry properties,
//! except for one cached rectangle used to detect when the set of visible
//! cells actually changed (as opposed to every scroll pixel).

use std::cell::Cell;
use std::rc::Rc;

use crate::events::ChangeListeners;
use crate::geometry::{
    cell_count_ceil, cell_index_floor, CellRange, GeometryProperties, GridPos, Vec2,
};
use crate::layout::Viewport;

/// Screen-space layout of a single cell, in scaled pixels relative to the
/// drawing surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLayout {
    /// Top-left corner of the cell.
    pub cell_anchor: Vec2,
    /// Draw origin for the cell's content, vertically centered (pair with a
    /// `middle` text baseline).
    pub content_anchor: Vec2,
    /// Content area inside the padding, height capped at the configured
    /// maximum.
    pub available_content_area: Vec2,
}

/// Coordinate-transform component over one [`Viewport`].
pub struct Layout {
    viewport: Rc<Viewport>,
    props: GeometryProperties,
    last_range: Cell<Option<CellRange>>,
    changed: ChangeListeners,
}

impl Layout {
    /// Build a layout subscribed to `viewport` changes.
    pub fn new(viewport: Rc<Viewport>, props: GeometryProperties) -> Rc<Self> {
        let layout = Rc::new(Self {
            viewport: Rc::clone(&viewport),
            props,
            last_range: Cell::new(None),
            changed: ChangeListeners::new(),
        });
        let weak = Rc::downgrade(&layout);
        viewport.on_change(move || {
            if let Some(layout) = weak.upgrade() {
                layout.viewport_changed();
            }
        });
        layout
    }

    /// Fires only when the tight visible rectangle moved to a different set
    /// of cells. Sub-cell scrolling never notifies.
    pub fn on_range_change(&self, listener: impl Fn() + 'static) {
        self.changed.subscribe(listener);
    }

    pub fn properties(&self) -> &GeometryProperties {
        &self.props
    }

    pub fn viewport(&self) -> &Rc<Viewport> {
        &self.viewport
    }

    fn viewport_changed(&self) {
        let range = CellRange::new(self.start_cell(), self.end_cell());
        if self.last_range.get() != Some(range) {
            self.last_range.set(Some(range));
            self.changed.notify();
        }
    }

    /// Cells to draw this frame: the tight range plus one extra row and
    /// column of overscan, so a cell partially visible at the trailing edge
    /// is still included at fractional-pixel scroll positions.
    pub fn visible_cells(&self) -> CellRange {
        let cell = self.props.cell_size_scaled();
        let anchor = self.viewport.anchor();
        let size = self.viewport.size();

        let from = GridPos::new(
            cell_index_floor(anchor.x, cell.x),
            cell_index_floor(anchor.y, cell.y),
        );
        let to = GridPos::new(
            from.col
                .saturating_add(cell_count_ceil(size.x, cell.x))
                .saturating_add(1),
            from.row
                .saturating_add(cell_count_ceil(size.y, cell.y))
                .saturating_add(1),
        );
        CellRange::new(from, to)
    }

    /// First cell intersecting the viewport (no overscan). Sizes the data
    /// window precisely.
    pub fn start_cell(&self) -> GridPos {
        let cell = self.props.cell_size_scaled();
        let anchor = self.viewport.anchor();
        GridPos::new(
            cell_index_floor(anchor.x, cell.x),
            cell_index_floor(anchor.y, cell.y),
        )
    }

    /// One past the last cell intersecting the viewport (no overscan).
    pub fn end_cell(&self) -> GridPos {
        let cell = self.props.cell_size_scaled();
        let anchor = self.viewport.anchor();
        let size = self.viewport.size();
        GridPos::new(
            cell_count_ceil(anchor.x + size.x, cell.x),
            cell_count_ceil(anchor.y + size.y, cell.y),
        )
    }

    /// Screen anchors for the cell at `position`.
    pub fn for_cell(&self, position: GridPos) -> CellLayout {
        let cell = self.props.cell_size_scaled();
        let origin = self.props.grid_origin_scaled();
        let anchor = self.viewport.anchor();
        let pad = self.props.cell_padding_scaled();

        let cell_anchor = Vec2::new(
            origin.x + f64::from(position.col) * cell.x - anchor.x,
            origin.y + f64::from(position.row) * cell.y - anchor.y,
        );
        let available_content_area = Vec2::new(
            (cell.x - pad.x * 2.0).max(0.0),
            (cell.y - pad.y * 2.0)
                .max(0.0)
                .min(self.props.max_content_height_scaled()),
        );
        let content_anchor = Vec2::new(
            cell_anchor.x + pad.x,
            cell_anchor.y + pad.y + available_content_area.y / 2.0,
        );

        CellLayout {
            cell_anchor,
            content_anchor,
            available_content_area,
        }
    }

    /// Anchor of the column label for `index` in the top gutter: follows the
    /// horizontal scroll, fixed at 0 vertically.
    pub fn for_top_bar(&self, index: u32) -> Vec2 {
        let cell = self.props.cell_size_scaled();
        let origin = self.props.grid_origin_scaled();
        Vec2::new(
            origin.x + f64::from(index) * cell.x - self.viewport.anchor().x,
            0.0,
        )
    }

    /// Anchor of the row label for `index` in the left gutter: follows the
    /// vertical scroll, fixed at 0 horizontally.
    pub fn for_left_bar(&self, index: u32) -> Vec2 {
        let cell = self.props.cell_size_scaled();
        let origin = self.props.grid_origin_scaled();
        Vec2::new(
            0.0,
            origin.y + f64::from(index) * cell.y - self.viewport.anchor().y,
        )
    }

    /// Map a pointer position (unscaled CSS pixels, surface-relative) to the
    /// logical cell under it. `None` when the pointer is inside a gutter.
    ///
    /// The anchor is added back in absolute form; using only its in-cell
    /// remainder would resolve every click relative to the first visible
    /// cell.
    pub fn mouse_position_to_cell(&self, pointer: Vec2) -> Option<GridPos> {
        let local = pointer
            - Vec2::new(
                self.props.left_gutter_width,
                self.props.top_gutter_height,
            );
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let world = local + self.viewport.anchor_unscaled();
        Some(GridPos::new(
            cell_index_floor(world.x, self.props.cell_size.x),
            cell_index_floor(world.y, self.props.cell_size.y),
        ))
    }
}
