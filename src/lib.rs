//! cellgrid - virtualized spreadsheet grid renderer for the web
//!
//! Maintains a sparse cell-data model, a scrollable viewport, and a
//! layout/render pipeline that draws only the visible subset of a
//! conceptually unbounded grid onto a Canvas 2D surface via WebAssembly:
//! - Visible-range virtualization with one cell of overscan
//! - Frame-coalesced redraws driven by the host's `requestAnimationFrame`
//! - Pre-rendered offscreen cell template, blitted per cell
//! - Click-to-select and double-click-to-edit hit testing
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'cellgrid';
//! await init();
//! const view = new GridView(canvas, { cellSize: [128, 28], scale: devicePixelRatio });
//! view.loadCells(JSON.stringify(data));
//! view.start();
//! const frame = () => { view.tick(); requestAnimationFrame(frame); };
//! requestAnimationFrame(frame);
//! ```

pub mod data_window;
pub mod error;
pub mod events;
pub mod geometry;
pub mod layout;
pub mod render;
pub mod table;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use data_window::TableDataWindow;
pub use error::{GridError, Result};
pub use geometry::{CellRange, GeometryProperties, GridPos, Vec2};
pub use layout::{CellLayout, Layout, Viewport};
pub use render::{GridRenderer, RenderLoop};
pub use table::Table;
#[cfg(target_arch = "wasm32")]
pub use viewer::GridView;
pub use viewer::{InteractionEvent, Interactivity};

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
