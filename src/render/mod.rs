//! Drawing pipeline: surfaces, the offscreen cell template, the frame loop,
//! and the renderer composition root.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
mod grid_renderer;
mod render_loop;
mod surface;
mod template;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use grid_renderer::{col_to_letter, GridRenderer};
pub use render_loop::{ExecTask, RenderLoop, RenderStage};
pub use surface::{Bitmap, DrawSurface};
#[cfg(not(target_arch = "wasm32"))]
pub use surface::{DrawOp, RecordingSurface};
pub use template::OffscreenTemplate;
