//! Cell model tests for cellgrid
//!
//! End-to-end scenarios over the sparse table: init/update/read-back,
//! format enforcement, composed update chains, and range slicing.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use cellgrid::error::GridError;
use cellgrid::table::{CellValue, ContentUpdate, DataFormat, UpdateChain};
use cellgrid::{GridPos, Table};

#[test]
fn test_init_update_read_back() {
    let mut table = Table::new();
    table.init_cell(GridPos::new(0, 0));
    table
        .update_cell(GridPos::new(0, 0), &UpdateChain::content("Hello"))
        .unwrap();

    let cell = table.cell_at(GridPos::new(0, 0)).unwrap();
    assert_eq!(cell.value(), Some(&CellValue::Text("Hello".to_string())));
    assert_eq!(cell.format(), DataFormat::Text);
}

#[test]
fn test_number_into_text_cell_fails_and_preserves_data() {
    let mut table = Table::new();
    let pos = GridPos::new(2, 5);
    table.init_cell(pos);
    table
        .update_cell(pos, &UpdateChain::content("before"))
        .unwrap();

    let err = table
        .update_cell(pos, &UpdateChain::content(99.0))
        .unwrap_err();
    assert!(matches!(
        err,
        GridError::FormatMismatch {
            expected: DataFormat::Text
        }
    ));
    assert_eq!(
        table.cell_at(pos).unwrap().value(),
        Some(&CellValue::Text("before".to_string()))
    );
}

#[test]
fn test_chain_retypes_then_assigns() {
    let mut table = Table::new();
    let pos = GridPos::new(1, 1);
    table.init_cell(pos);

    let chain = UpdateChain::format(DataFormat::Number).then_content(3.25);
    table.update_cell(pos, &chain).unwrap();

    let cell = table.cell_at(pos).unwrap();
    assert_eq!(cell.format(), DataFormat::Number);
    assert_eq!(cell.value(), Some(&CellValue::Number(3.25)));
}

#[test]
fn test_empty_link_aborts_chain_keeps_prior_links() {
    let mut table = Table::new();
    let pos = GridPos::new(0, 0);
    table.init_cell(pos);

    let chain = UpdateChain::content("first")
        .chain(ContentUpdate::new())
        .then_content("unreachable");
    let err = table.update_cell(pos, &chain).unwrap_err();

    assert!(matches!(err, GridError::EmptyUpdate));
    assert_eq!(
        table.cell_at(pos).unwrap().value(),
        Some(&CellValue::Text("first".to_string()))
    );
}

#[test]
fn test_update_without_init_fails() {
    let mut table = Table::new();
    let err = table
        .update_cell(GridPos::new(7, 8), &UpdateChain::content("x"))
        .unwrap_err();
    assert!(matches!(err, GridError::UninitializedCell(7, 8)));
    assert!(table.is_empty());
}

#[test]
fn test_cell_range_rows_and_holes() {
    let mut table = Table::new();
    for col in [0_u32, 2] {
        let pos = GridPos::new(col, 1);
        table.init_cell(pos);
        table
            .update_cell(pos, &UpdateChain::content(format!("c{col}")))
            .unwrap();
    }

    let rows = table
        .cell_range(GridPos::new(0, 0), GridPos::new(4, 3))
        .unwrap();
    assert_eq!(rows.len(), 3);

    // Row 0 untouched: full-width, all absent.
    assert_eq!(rows[0].len(), 4);
    assert!((0..4).all(|i| rows[0].index(i).is_none()));

    // Row 1: populated at offsets 0 and 2, hole at 1, absent at 3.
    assert_eq!(
        rows[1].index(0).unwrap().value(),
        Some(&CellValue::Text("c0".to_string()))
    );
    assert!(rows[1].index(1).is_none());
    assert_eq!(
        rows[1].index(2).unwrap().value(),
        Some(&CellValue::Text("c2".to_string()))
    );
    assert!(rows[1].index(3).is_none());

    // Reads past the slice end are absent, not panics.
    assert!(rows[1].index(100).is_none());
}

#[test]
fn test_format_switch_drops_stale_value() {
    let mut table = Table::new();
    let pos = GridPos::new(0, 0);
    table.init_cell(pos);
    table
        .update_cell(pos, &UpdateChain::content("stale"))
        .unwrap();

    table
        .update_cell(pos, &UpdateChain::format(DataFormat::Number))
        .unwrap();
    assert_eq!(table.cell_at(pos).unwrap().value(), None);
}
