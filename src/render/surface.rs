//! Drawing surface abstraction.
//!
//! The render pipeline draws through [`DrawSurface`], an immediate-mode 2-D
//! capability shaped after the Canvas 2D API. The browser implementation
//! lives in [`canvas`](crate::render::canvas); native builds get a
//! [`RecordingSurface`] that captures the op stream for tests.

use crate::geometry::Vec2;

/// A pre-rendered bitmap that a surface can blit.
#[derive(Clone)]
pub enum Bitmap {
    /// Offscreen canvas element (browser).
    #[cfg(target_arch = "wasm32")]
    Canvas(web_sys::HtmlCanvasElement),
    /// Dimensions-only placeholder (native builds).
    #[cfg(not(target_arch = "wasm32"))]
    Raster { width: u32, height: u32 },
}

/// Immediate-mode 2-D drawing capability.
///
/// Paint state (`set_*`) is sticky, matching the Canvas 2D context model.
/// All coordinates are scaled (device) pixels.
pub trait DrawSurface {
    /// Resize the backing surface. Resets paint state on canvas backends.
    fn resize(&mut self, size: Vec2);
    fn size(&self) -> Vec2;

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn set_fill_color(&mut self, color: &str);
    fn set_stroke_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: &str);
    fn set_text_baseline(&mut self, baseline: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Blit a pre-rendered bitmap into the target rectangle.
    fn blit(&mut self, bitmap: &Bitmap, x: f64, y: f64, w: f64, h: f64);
}

/// Round a scaled pixel extent to a device pixel count.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn device_px(extent: f64) -> u32 {
    if extent.is_finite() && extent > 0.0 {
        extent.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// One recorded drawing operation.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Resize { w: f64, h: f64 },
    ClearRect { x: f64, y: f64, w: f64, h: f64 },
    FillColor(String),
    StrokeColor(String),
    LineWidth(f64),
    FillRect { x: f64, y: f64, w: f64, h: f64 },
    StrokeRect { x: f64, y: f64, w: f64, h: f64 },
    Font(String),
    TextAlign(String),
    TextBaseline(String),
    FillText { text: String, x: f64, y: f64 },
    Blit { x: f64, y: f64, w: f64, h: f64 },
}

/// Surface that records its op stream instead of rasterizing.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: Vec2,
    ops: Vec<DrawOp>,
}

#[cfg(not(target_arch = "wasm32"))]
impl RecordingSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    /// Every operation drawn since construction (or the last [`Self::take_ops`]).
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain the recorded operations.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl DrawSurface for RecordingSurface {
    fn resize(&mut self, size: Vec2) {
        self.size = size;
        self.ops.push(DrawOp::Resize {
            w: size.x,
            h: size.y,
        });
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::ClearRect { x, y, w, h });
    }

    fn set_fill_color(&mut self, color: &str) {
        self.ops.push(DrawOp::FillColor(color.to_string()));
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.ops.push(DrawOp::StrokeColor(color.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(DrawOp::LineWidth(width));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::FillRect { x, y, w, h });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::StrokeRect { x, y, w, h });
    }

    fn set_font(&mut self, font: &str) {
        self.ops.push(DrawOp::Font(font.to_string()));
    }

    fn set_text_align(&mut self, align: &str) {
        self.ops.push(DrawOp::TextAlign(align.to_string()));
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        self.ops.push(DrawOp::TextBaseline(baseline.to_string()));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn blit(&mut self, _bitmap: &Bitmap, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::Blit { x, y, w, h });
    }
}
