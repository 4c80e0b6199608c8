//! Offscreen pre-rendered cell template.
//!
//! The repeating cell background is drawn once into an offscreen surface and
//! blitted per cell. It is redrawn only when cell geometry or style changes,
//! never per frame.

use crate::error::Result;
use crate::geometry::Vec2;
use crate::render::surface::{Bitmap, DrawSurface};

#[cfg(target_arch = "wasm32")]
use crate::error::GridError;
#[cfg(target_arch = "wasm32")]
use crate::render::canvas::CanvasSurface;
#[cfg(target_arch = "wasm32")]
use crate::render::surface::device_px;
#[cfg(not(target_arch = "wasm32"))]
use crate::render::surface::RecordingSurface;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// An offscreen surface holding one pre-rendered cell.
pub struct OffscreenTemplate {
    size: Vec2,
    #[cfg(target_arch = "wasm32")]
    surface: CanvasSurface,
    #[cfg(not(target_arch = "wasm32"))]
    surface: RecordingSurface,
}

impl OffscreenTemplate {
    /// Allocate an offscreen surface of `size` scaled pixels.
    #[cfg(target_arch = "wasm32")]
    pub fn new(size: Vec2) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| GridError::Render("document unavailable".to_string()))?;
        let canvas = document
            .create_element("canvas")
            .map_err(|_| GridError::Render("canvas creation failed".to_string()))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| GridError::Render("canvas creation failed".to_string()))?;
        canvas.set_width(device_px(size.x));
        canvas.set_height(device_px(size.y));
        Ok(Self {
            size,
            surface: CanvasSurface::new(canvas)?,
        })
    }

    /// Allocate an offscreen surface of `size` scaled pixels.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(size: Vec2) -> Result<Self> {
        Ok(Self {
            size,
            surface: RecordingSurface::new(size),
        })
    }

    /// Run a draw routine against the offscreen surface.
    pub fn draw(&mut self, f: impl FnOnce(&mut dyn DrawSurface)) {
        f(&mut self.surface);
    }

    /// The pre-rendered result, blittable onto any surface.
    pub fn bitmap(&self) -> Bitmap {
        #[cfg(target_arch = "wasm32")]
        {
            Bitmap::Canvas(self.surface.canvas().clone())
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Bitmap::Raster {
                width: crate::render::surface::device_px(self.size.x),
                height: crate::render::surface::device_px(self.size.y),
            }
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }
}
