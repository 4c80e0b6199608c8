//! Browser-facing viewer: the WASM-exported `GridView` entry point.
//!
//! `GridView` owns the renderer component graph, wires DOM input events to
//! the interactivity state machine, and hands frame ticks to the render
//! loop. JavaScript drives the frames: the host calls `tick()` from its own
//! `requestAnimationFrame` callback while the loop is running.

mod interactivity;

pub use interactivity::{InteractionEvent, Interactivity};

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use serde::{Deserialize, Serialize};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

#[cfg(target_arch = "wasm32")]
use crate::geometry::{GeometryProperties, GridPos, Vec2};
#[cfg(target_arch = "wasm32")]
use crate::render::{CanvasSurface, GridRenderer};
#[cfg(target_arch = "wasm32")]
use crate::table::{DataFormat, Table, UpdateChain};

/// One cell of an initial dataset, as parsed from JSON.
#[cfg(target_arch = "wasm32")]
#[derive(Deserialize)]
struct CellSeed {
    position: [u32; 2],
    #[serde(default)]
    format: Option<DataFormat>,
    #[serde(default)]
    value: Option<SeedValue>,
}

#[cfg(target_arch = "wasm32")]
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedValue {
    Number(f64),
    Text(String),
}

/// Selection/edit transition forwarded to the JS event callback.
#[cfg(target_arch = "wasm32")]
#[derive(Serialize)]
struct EventPayload<'a> {
    kind: &'a str,
    cell: Option<GridPos>,
}

/// The grid viewer exported to JavaScript.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct GridView {
    renderer: Rc<GridRenderer>,
    surface: Rc<RefCell<CanvasSurface>>,
    interactivity: Rc<Interactivity>,
    event_callback: Rc<RefCell<Option<Function>>>,
    #[allow(dead_code)]
    mouse_closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
    #[allow(dead_code)]
    wheel_closure: Closure<dyn FnMut(WheelEvent)>,
    #[allow(dead_code)]
    key_closure: Closure<dyn FnMut(KeyboardEvent)>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GridView {
    /// Create a viewer on `canvas`. `config` is an optional geometry object
    /// (`{cellSize: [w, h], topGutterHeight, leftGutterWidth,
    /// maxContentHeight, scale, cellPadding: [x, y]}`); missing fields fall
    /// back to defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: JsValue) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let props: GeometryProperties = if config.is_undefined() || config.is_null() {
            GeometryProperties::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        let table = Rc::new(RefCell::new(Table::new()));
        let renderer = Rc::new(GridRenderer::new(table, props)?);
        let surface = Rc::new(RefCell::new(CanvasSurface::new(canvas.clone())?));
        renderer.viewport().resize(Vec2::new(
            f64::from(canvas.width()),
            f64::from(canvas.height()),
        ));

        let interactivity = Rc::new(Interactivity::new(Rc::clone(renderer.layout())));

        let event_callback: Rc<RefCell<Option<Function>>> = Rc::new(RefCell::new(None));
        {
            let event_callback = Rc::clone(&event_callback);
            interactivity.on_event(move |event| {
                let payload = match *event {
                    InteractionEvent::Select(cell) => EventPayload {
                        kind: "select",
                        cell,
                    },
                    InteractionEvent::EditStart(cell) => EventPayload {
                        kind: "editStart",
                        cell: Some(cell),
                    },
                    InteractionEvent::EditEnd(cell) => EventPayload {
                        kind: "editEnd",
                        cell: Some(cell),
                    },
                };
                if let Some(callback) = event_callback.borrow().as_ref() {
                    if let Ok(value) = serde_wasm_bindgen::to_value(&payload) {
                        let _ = callback.call1(&JsValue::NULL, &value);
                    }
                }
            });
        }

        let mut mouse_closures: Vec<Closure<dyn FnMut(MouseEvent)>> = Vec::new();

        // Pointer input arrives in CSS pixels relative to the page; the
        // interactivity layer wants surface-relative coordinates.
        {
            let interactivity = Rc::clone(&interactivity);
            let canvas = canvas.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let rect = canvas.get_bounding_client_rect();
                interactivity.pointer_pressed(Vec2::new(
                    f64::from(event.client_x()) - rect.left(),
                    f64::from(event.client_y()) - rect.top(),
                ));
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            mouse_closures.push(closure);
        }

        {
            let interactivity = Rc::clone(&interactivity);
            let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
                interactivity.double_click();
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas
                .add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref())?;
            mouse_closures.push(closure);
        }

        let wheel_closure = {
            let viewport = Rc::clone(renderer.viewport());
            let scale = renderer.properties().scale;
            let closure = Closure::wrap(Box::new(move |event: WheelEvent| {
                event.prevent_default();
                viewport.move_by(Vec2::new(event.delta_x() * scale, event.delta_y() * scale));
            }) as Box<dyn FnMut(WheelEvent)>);
            canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref())?;
            closure
        };

        let key_closure = {
            let interactivity = Rc::clone(&interactivity);
            let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
                interactivity.key_pressed(&event.key());
            }) as Box<dyn FnMut(KeyboardEvent)>);
            canvas
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure
        };

        Ok(GridView {
            renderer,
            surface,
            interactivity,
            event_callback,
            mouse_closures,
            wheel_closure,
            key_closure,
        })
    }

    /// Load an initial dataset from a JSON array of
    /// `{position: [col, row], format?, value?}` entries.
    #[wasm_bindgen(js_name = "loadCells")]
    pub fn load_cells(&self, json: &str) -> Result<(), JsValue> {
        let seeds: Vec<CellSeed> =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;

        {
            let table = self.renderer.table();
            let mut table = table.borrow_mut();
            for seed in seeds {
                let [col, row] = seed.position;
                let pos = GridPos::new(col, row);
                table.init_cell(pos);

                let mut chain = UpdateChain::new();
                if let Some(format) = seed.format {
                    chain = chain.then_format(format);
                }
                match seed.value {
                    Some(SeedValue::Number(n)) => chain = chain.then_content(n),
                    Some(SeedValue::Text(s)) => chain = chain.then_content(s),
                    None => {}
                }
                if !chain.links().is_empty() {
                    table.update_cell(pos, &chain)?;
                }
            }
        }

        self.renderer.data_window().refresh_data();
        self.renderer.request_render();
        Ok(())
    }

    /// Create an empty text-format cell at (col, row).
    #[wasm_bindgen(js_name = "initCell")]
    pub fn init_cell(&self, col: u32, row: u32) {
        self.renderer
            .table()
            .borrow_mut()
            .init_cell(GridPos::new(col, row));
        self.renderer.data_window().refresh_data();
        self.renderer.request_render();
    }

    /// Set the text content of an initialized cell, switching its format to
    /// text if needed.
    #[wasm_bindgen(js_name = "setCellText")]
    pub fn set_cell_text(&self, col: u32, row: u32, text: &str) -> Result<(), JsValue> {
        let chain = UpdateChain::format(DataFormat::Text).then_content(text);
        self.apply_update(GridPos::new(col, row), &chain)
    }

    /// Set the numeric content of an initialized cell, switching its format
    /// to number if needed.
    #[wasm_bindgen(js_name = "setCellNumber")]
    pub fn set_cell_number(&self, col: u32, row: u32, value: f64) -> Result<(), JsValue> {
        let chain = UpdateChain::format(DataFormat::Number).then_content(value);
        self.apply_update(GridPos::new(col, row), &chain)
    }

    fn apply_update(&self, pos: GridPos, chain: &UpdateChain) -> Result<(), JsValue> {
        self.renderer.table().borrow_mut().update_cell(pos, chain)?;
        self.renderer.data_window().refresh_data();
        self.renderer.request_render();
        Ok(())
    }

    /// Scroll the viewport by a delta in CSS pixels.
    #[wasm_bindgen(js_name = "scrollBy")]
    pub fn scroll_by(&self, dx: f64, dy: f64) {
        let scale = self.renderer.properties().scale;
        self.renderer
            .viewport()
            .move_by(Vec2::new(dx * scale, dy * scale));
    }

    /// Resize the drawing surface and viewport to a new CSS-pixel size. The
    /// actual resize runs at the start of the next frame.
    #[wasm_bindgen(js_name = "requestResize")]
    pub fn request_resize(&self, width: f64, height: f64) {
        self.renderer.request_resize(Vec2::new(width, height));
    }

    /// Request a redraw on the next frame. Idempotent.
    #[wasm_bindgen(js_name = "requestRender")]
    pub fn request_render(&self) {
        self.renderer.request_render();
    }

    /// Begin honoring frame ticks.
    pub fn start(&self) {
        self.renderer.render_loop().run();
    }

    /// Stop honoring frame ticks. Already-scheduled host callbacks become
    /// no-ops.
    pub fn stop(&self) {
        self.renderer.render_loop().stop();
    }

    #[wasm_bindgen(js_name = "isRunning")]
    pub fn is_running(&self) -> bool {
        self.renderer.render_loop().is_running()
    }

    /// Execute one frame if running and a redraw is pending. Call this from
    /// a `requestAnimationFrame` callback.
    pub fn tick(&self) {
        let mut surface = self.surface.borrow_mut();
        self.renderer.render_loop().tick(&mut *surface);
    }

    /// The selected cell as `{col, row}`, or `undefined`.
    #[wasm_bindgen(js_name = "selectedCell")]
    pub fn selected_cell(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.interactivity.selected_cell())
            .unwrap_or(JsValue::UNDEFINED)
    }

    /// The cell being edited as `{col, row}`, or `undefined`.
    #[wasm_bindgen(js_name = "editedCell")]
    pub fn edited_cell(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.interactivity.edited_cell())
            .unwrap_or(JsValue::UNDEFINED)
    }

    /// Register a callback for selection/edit events. The callback receives
    /// `{kind: "select" | "editStart" | "editEnd", cell: {col, row} | null}`.
    #[wasm_bindgen(js_name = "onEvent")]
    pub fn on_event(&self, callback: Function) {
        *self.event_callback.borrow_mut() = Some(callback);
    }
}
