//! Coordinate-transform tests for cellgrid
//!
//! Covers visible-range math (floor/ceil bounds, overscan), forward and
//! inverse cell-anchor mapping at mixed scales, and viewport clamping.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::rc::Rc;

use test_case::test_case;

use cellgrid::{GeometryProperties, GridPos, Layout, Vec2, Viewport};

fn build(props: GeometryProperties) -> (Rc<Viewport>, Rc<Layout>) {
    let viewport = Rc::new(Viewport::new(props.scale));
    let layout = Layout::new(Rc::clone(&viewport), props);
    (viewport, layout)
}

fn bare_grid(cell: Vec2, scale: f64) -> GeometryProperties {
    GeometryProperties {
        cell_size: cell,
        top_gutter_height: 0.0,
        left_gutter_width: 0.0,
        max_content_height: 1000.0,
        scale,
        cell_padding: Vec2::ZERO,
    }
}

#[test_case(0.0, 0 ; "at origin")]
#[test_case(50.0, 0 ; "mid first cell")]
#[test_case(99.9, 0 ; "just before boundary")]
#[test_case(100.0, 1 ; "on boundary")]
#[test_case(300.0, 3 ; "several cells in")]
#[test_case(1234.0, 12 ; "fractional position")]
fn test_visible_from_is_floor_of_anchor(anchor_x: f64, expected_col: u32) {
    let (viewport, layout) = build(bare_grid(Vec2::new(100.0, 100.0), 1.0));
    viewport.resize(Vec2::new(400.0, 400.0));
    viewport.move_to(Vec2::new(anchor_x, 0.0));

    assert_eq!(layout.visible_cells().from.col, expected_col);
    assert_eq!(layout.start_cell().col, expected_col);
}

#[test_case(0.0 ; "zero scroll")]
#[test_case(37.0 ; "sub cell scroll")]
#[test_case(100.0 ; "exact cell scroll")]
#[test_case(777.5 ; "fractional pixel scroll")]
fn test_overscan_covers_whole_pixel_range(anchor_x: f64) {
    let cell = Vec2::new(100.0, 100.0);
    let (viewport, layout) = build(bare_grid(cell, 1.0));
    let size = Vec2::new(450.0, 300.0);
    viewport.resize(size);
    viewport.move_to(Vec2::new(anchor_x, 0.0));

    let range = layout.visible_cells();
    // Every pixel of [anchor, anchor + size] falls inside a covered cell.
    let last_col_end = f64::from(range.to.col) * cell.x;
    let first_col_start = f64::from(range.from.col) * cell.x;
    assert!(first_col_start <= anchor_x);
    assert!(last_col_end >= anchor_x + size.x);
}

#[test]
fn test_scenario_anchor_300_cell_100() {
    let (viewport, layout) = build(bare_grid(Vec2::new(100.0, 100.0), 1.0));
    viewport.resize(Vec2::new(450.0, 200.0));
    viewport.move_to(Vec2::new(300.0, 0.0));

    assert_eq!(layout.start_cell(), GridPos::new(3, 0));
    assert_eq!(layout.end_cell(), GridPos::new(8, 2));
    assert_eq!(layout.visible_cells().from.col, 3);
}

#[test]
fn test_scenario_pointer_in_gutters_and_first_cells() {
    let (viewport, layout) = build(GeometryProperties {
        cell_size: Vec2::new(128.0, 32.0),
        top_gutter_height: 16.0,
        left_gutter_width: 16.0,
        max_content_height: 20.0,
        scale: 1.0,
        cell_padding: Vec2::ZERO,
    });
    viewport.resize(Vec2::new(800.0, 600.0));

    // (50 - 16) / 128 -> col 0, (50 - 16) / 32 -> row 1.
    assert_eq!(
        layout.mouse_position_to_cell(Vec2::new(50.0, 50.0)),
        Some(GridPos::new(0, 1))
    );
    assert!(layout.mouse_position_to_cell(Vec2::new(10.0, 50.0)).is_none());
    assert!(layout.mouse_position_to_cell(Vec2::new(50.0, 10.0)).is_none());
}

#[test]
fn test_round_trip_anchor_to_pointer_at_zero_scroll() {
    let props = GeometryProperties {
        cell_size: Vec2::new(128.0, 28.0),
        top_gutter_height: 28.0,
        left_gutter_width: 48.0,
        max_content_height: 20.0,
        scale: 2.0,
        cell_padding: Vec2::new(8.0, 6.0),
    };
    let (viewport, layout) = build(props.clone());
    viewport.resize(Vec2::new(1600.0, 1200.0));

    let range = layout.visible_cells();
    for col in range.from.col..range.to.col {
        for row in range.from.row..range.to.row {
            let pos = GridPos::new(col, row);
            let anchor = layout.for_cell(pos).cell_anchor;
            // Cell anchors are in scaled pixels; pointer input is unscaled.
            // Probe just inside the cell's top-left corner.
            let pointer = Vec2::new(anchor.x / props.scale + 1.0, anchor.y / props.scale + 1.0);
            assert_eq!(layout.mouse_position_to_cell(pointer), Some(pos));
        }
    }
}

#[test]
fn test_mouse_mapping_uses_absolute_scroll_offset() {
    let (viewport, layout) = build(bare_grid(Vec2::new(100.0, 100.0), 1.0));
    viewport.resize(Vec2::new(400.0, 400.0));
    viewport.move_to(Vec2::new(250.0, 0.0));

    // A click 30px into the surface sits at world x = 280, inside column 2.
    // A remainder-only mapping would report column 0.
    assert_eq!(
        layout.mouse_position_to_cell(Vec2::new(30.0, 10.0)),
        Some(GridPos::new(2, 0))
    );

    // Same click after scrolling two more cells lands two columns later.
    viewport.move_by(Vec2::new(200.0, 0.0));
    assert_eq!(
        layout.mouse_position_to_cell(Vec2::new(30.0, 10.0)),
        Some(GridPos::new(4, 0))
    );
}

#[test]
fn test_mouse_mapping_at_scale_two() {
    // Anchor is stored scaled; pointer input is unscaled CSS pixels.
    let (viewport, layout) = build(bare_grid(Vec2::new(100.0, 100.0), 2.0));
    viewport.resize(Vec2::new(800.0, 800.0));
    viewport.move_by(Vec2::new(400.0, 0.0)); // 200 CSS pixels

    assert_eq!(
        layout.mouse_position_to_cell(Vec2::new(50.0, 50.0)),
        Some(GridPos::new(2, 0))
    );
}

#[test]
fn test_for_cell_anchors_at_scale_two() {
    let props = GeometryProperties {
        cell_size: Vec2::new(100.0, 50.0),
        top_gutter_height: 10.0,
        left_gutter_width: 20.0,
        max_content_height: 20.0,
        scale: 2.0,
        cell_padding: Vec2::new(4.0, 3.0),
    };
    let (viewport, layout) = build(props);
    viewport.resize(Vec2::new(800.0, 600.0));
    viewport.move_to(Vec2::new(60.0, 0.0));

    let cl = layout.for_cell(GridPos::new(1, 0));
    // origin (40, 20) + 1 * (200, 100) - anchor (60, 0)
    assert_eq!(cl.cell_anchor, Vec2::new(180.0, 20.0));
    // width 200 - 2*8; height min(100 - 2*6, 40)
    assert_eq!(cl.available_content_area, Vec2::new(184.0, 40.0));
    // anchor + padding, vertically centered over the content area
    assert_eq!(cl.content_anchor, Vec2::new(188.0, 46.0));
}

#[test]
fn test_gutter_label_anchors_track_one_axis() {
    let props = GeometryProperties {
        cell_size: Vec2::new(100.0, 50.0),
        top_gutter_height: 10.0,
        left_gutter_width: 20.0,
        max_content_height: 20.0,
        scale: 1.0,
        cell_padding: Vec2::ZERO,
    };
    let (viewport, layout) = build(props);
    viewport.resize(Vec2::new(800.0, 600.0));
    viewport.move_to(Vec2::new(30.0, 40.0));

    // Top bar follows horizontal scroll only.
    assert_eq!(layout.for_top_bar(2), Vec2::new(190.0, 0.0));
    // Left bar follows vertical scroll only.
    assert_eq!(layout.for_left_bar(3), Vec2::new(0.0, 120.0));
}

#[test]
fn test_move_by_clamp_is_monotonic() {
    let (viewport, _layout) = build(bare_grid(Vec2::new(100.0, 100.0), 1.0));
    viewport.move_to(Vec2::new(5000.0, 12345.0));
    viewport.move_by(Vec2::new(-1e9, -1e9));
    assert_eq!(viewport.anchor(), Vec2::ZERO);
}
