//! Viewport state and grid coordinate transforms.

mod grid_layout;
mod viewport;

pub use grid_layout::{CellLayout, Layout};
pub use viewport::Viewport;
