//! Geometry primitives shared across the engine.
//!
//! Pixel-space math uses [`Vec2`] (f64 components, scaled or unscaled pixels
//! depending on context); logical cell coordinates use [`GridPos`]. The
//! immutable per-renderer configuration lives in [`GeometryProperties`].

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2-D pixel vector. Deserializes from a JS `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// The origin.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Both components multiplied by `factor`.
    pub fn scaled(self, factor: f64) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Vec2 { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        self.scaled(rhs)
    }
}

/// Logical position of a cell in the unbounded grid: (column, row), both
/// 0-based. Any non-negative pair is addressable; there is no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub col: u32,
    pub row: u32,
}

impl GridPos {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// A half-open rectangle `[from, to)` in cell-index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub from: GridPos,
    pub to: GridPos,
}

impl CellRange {
    pub fn new(from: GridPos, to: GridPos) -> Self {
        Self { from, to }
    }

    /// Number of columns covered.
    pub fn cols(&self) -> u32 {
        self.to.col.saturating_sub(self.from.col)
    }

    /// Number of rows covered.
    pub fn rows(&self) -> u32 {
        self.to.row.saturating_sub(self.from.row)
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.col >= self.from.col
            && pos.col < self.to.col
            && pos.row >= self.from.row
            && pos.row < self.to.row
    }
}

/// Floor-divide a pixel offset by a cell extent, yielding a cell index.
///
/// Negative or non-finite inputs map to 0 so a clamped viewport can never
/// produce an out-of-domain index.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn cell_index_floor(px: f64, cell_extent: f64) -> u32 {
    if cell_extent <= 0.0 {
        return 0;
    }
    let idx = (px / cell_extent).floor();
    if idx.is_finite() && idx > 0.0 {
        idx.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Ceiling-divide a pixel offset by a cell extent, yielding a cell count.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn cell_count_ceil(px: f64, cell_extent: f64) -> u32 {
    if cell_extent <= 0.0 {
        return 0;
    }
    let count = (px / cell_extent).ceil();
    if count.is_finite() && count > 0.0 {
        count.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Immutable geometry configuration for one renderer instance.
///
/// All fields are in unscaled (CSS-pixel) units except `scale`, the
/// device-pixel multiplier. Pointer input arrives in unscaled pixels while
/// drawing happens in scaled pixels, so both flavors of accessor exist.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeometryProperties {
    /// Width and height of one cell.
    pub cell_size: Vec2,
    /// Height of the column-label strip across the top.
    pub top_gutter_height: f64,
    /// Width of the row-number strip down the left.
    pub left_gutter_width: f64,
    /// Upper bound on cell content height (caps the text size).
    pub max_content_height: f64,
    /// Device-pixel multiplier.
    pub scale: f64,
    /// Content inset from the cell edge, per axis.
    pub cell_padding: Vec2,
}

impl Default for GeometryProperties {
    fn default() -> Self {
        Self {
            cell_size: Vec2::new(128.0, 28.0),
            top_gutter_height: 28.0,
            left_gutter_width: 48.0,
            max_content_height: 20.0,
            scale: 2.0,
            cell_padding: Vec2::new(8.0, 6.0),
        }
    }
}

impl GeometryProperties {
    pub fn cell_size_scaled(&self) -> Vec2 {
        self.cell_size.scaled(self.scale)
    }

    pub fn top_gutter_height_scaled(&self) -> f64 {
        self.top_gutter_height * self.scale
    }

    pub fn left_gutter_width_scaled(&self) -> f64 {
        self.left_gutter_width * self.scale
    }

    pub fn max_content_height_scaled(&self) -> f64 {
        self.max_content_height * self.scale
    }

    pub fn cell_padding_scaled(&self) -> Vec2 {
        self.cell_padding.scaled(self.scale)
    }

    /// Scaled origin of the cell area: top-left corner just inside both
    /// gutters.
    pub fn grid_origin_scaled(&self) -> Vec2 {
        Vec2::new(
            self.left_gutter_width_scaled(),
            self.top_gutter_height_scaled(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_index_floor() {
        assert_eq!(cell_index_floor(0.0, 100.0), 0);
        assert_eq!(cell_index_floor(99.9, 100.0), 0);
        assert_eq!(cell_index_floor(100.0, 100.0), 1);
        assert_eq!(cell_index_floor(300.0, 100.0), 3);
        assert_eq!(cell_index_floor(-5.0, 100.0), 0);
        assert_eq!(cell_index_floor(50.0, 0.0), 0);
    }

    #[test]
    fn test_cell_count_ceil() {
        assert_eq!(cell_count_ceil(0.0, 100.0), 0);
        assert_eq!(cell_count_ceil(1.0, 100.0), 1);
        assert_eq!(cell_count_ceil(100.0, 100.0), 1);
        assert_eq!(cell_count_ceil(101.0, 100.0), 2);
    }

    #[test]
    fn test_scaled_accessors() {
        let props = GeometryProperties::default();
        assert_eq!(props.cell_size_scaled().x, 256.0);
        assert_eq!(props.cell_size_scaled().y, 56.0);
        assert_eq!(props.top_gutter_height_scaled(), 56.0);
        assert_eq!(props.left_gutter_width_scaled(), 96.0);
        assert_eq!(props.cell_padding_scaled().x, 16.0);
    }

    #[test]
    fn test_range_contains() {
        let range = CellRange::new(GridPos::new(2, 3), GridPos::new(5, 6));
        assert!(range.contains(GridPos::new(2, 3)));
        assert!(range.contains(GridPos::new(4, 5)));
        assert!(!range.contains(GridPos::new(5, 5)));
        assert!(!range.contains(GridPos::new(4, 6)));
        assert_eq!(range.cols(), 3);
        assert_eq!(range.rows(), 3);
    }
}
