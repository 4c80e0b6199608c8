//! Composition root: wires viewport, layout, data window, cell template, and
//! the render loop into a working grid renderer.

use std::cell::RefCell;
use std::rc::Rc;

use crate::data_window::TableDataWindow;
use crate::error::Result;
use crate::geometry::{GeometryProperties, GridPos, Vec2};
use crate::layout::{Layout, Viewport};
use crate::render::render_loop::RenderLoop;
use crate::render::surface::DrawSurface;
use crate::render::template::OffscreenTemplate;
use crate::table::Table;

/// Convert a 0-based column index to spreadsheet column letters
/// (A, B, ..., Z, AA, AB, ...).
#[allow(clippy::cast_possible_truncation)]
pub fn col_to_letter(col: u32) -> String {
    let mut result = String::new();
    let mut n = col + 1; // 1-based
    while n > 0 {
        n -= 1;
        let c = char::from(b'A' + (n % 26) as u8);
        result.insert(0, c);
        n /= 26;
    }
    result
}

/// The virtualized grid renderer.
///
/// Owns the component graph and the listener wiring that keeps it
/// consistent: the layout listens to the viewport, the data window listens to
/// the layout, and every viewport change requests a redraw — registered in
/// that order, so by the time a frame draws, the data window already covers
/// the new visible range.
pub struct GridRenderer {
    table: Rc<RefCell<Table>>,
    viewport: Rc<Viewport>,
    layout: Rc<Layout>,
    window: Rc<TableDataWindow>,
    render_loop: Rc<RenderLoop>,
    template: Rc<RefCell<OffscreenTemplate>>,
    props: GeometryProperties,
}

impl GridRenderer {
    pub fn new(table: Rc<RefCell<Table>>, props: GeometryProperties) -> Result<Self> {
        let viewport = Rc::new(Viewport::new(props.scale));
        let layout = Layout::new(Rc::clone(&viewport), props.clone());
        let window = TableDataWindow::new(Rc::clone(&table), Rc::clone(&layout));
        let render_loop = Rc::new(RenderLoop::new());
        {
            let render_loop = Rc::clone(&render_loop);
            viewport.on_change(move || render_loop.request_render());
        }

        let mut template = OffscreenTemplate::new(props.cell_size_scaled())?;
        prepare_cell_template(&mut template, &props);

        let renderer = Self {
            table,
            viewport,
            layout,
            window,
            render_loop,
            template: Rc::new(RefCell::new(template)),
            props,
        };
        renderer.install_pipeline();
        Ok(renderer)
    }

    /// Register the draw stages: clear, cells, gutters.
    fn install_pipeline(&self) {
        {
            let viewport = Rc::clone(&self.viewport);
            self.render_loop.add(move |surface| {
                let size = viewport.size();
                surface.clear_rect(0.0, 0.0, size.x, size.y);
            });
        }
        {
            let layout = Rc::clone(&self.layout);
            let window = Rc::clone(&self.window);
            let template = Rc::clone(&self.template);
            let props = self.props.clone();
            self.render_loop.add(move |surface| {
                draw_cells(surface, &layout, &window, &template.borrow(), &props);
            });
        }
        {
            let layout = Rc::clone(&self.layout);
            let props = self.props.clone();
            self.render_loop.add(move |surface| {
                draw_gutters(surface, &layout, &props);
            });
        }
    }

    /// Queue a surface + viewport resize to `css_size` (unscaled pixels),
    /// applied at the start of the next frame.
    pub fn request_resize(&self, css_size: Vec2) {
        let scaled = css_size.scaled(self.props.scale);
        let viewport = Rc::clone(&self.viewport);
        self.render_loop.enqueue(move |surface| {
            surface.resize(scaled);
            viewport.resize(scaled);
        });
        self.render_loop.request_render();
    }

    pub fn request_render(&self) {
        self.render_loop.request_render();
    }

    pub fn table(&self) -> &Rc<RefCell<Table>> {
        &self.table
    }

    pub fn viewport(&self) -> &Rc<Viewport> {
        &self.viewport
    }

    pub fn layout(&self) -> &Rc<Layout> {
        &self.layout
    }

    pub fn data_window(&self) -> &Rc<TableDataWindow> {
        &self.window
    }

    pub fn render_loop(&self) -> &Rc<RenderLoop> {
        &self.render_loop
    }

    pub fn properties(&self) -> &GeometryProperties {
        &self.props
    }
}

/// Draw the repeating cell background once. Re-run only if cell geometry or
/// style changes.
fn prepare_cell_template(template: &mut OffscreenTemplate, props: &GeometryProperties) {
    let size = props.cell_size_scaled();
    let line = props.scale;
    template.draw(|surface| {
        surface.set_fill_color("white");
        surface.set_stroke_color("black");
        surface.set_line_width(line);
        surface.fill_rect(0.0, 0.0, size.x, size.y);
        surface.stroke_rect(0.0, 0.0, size.x, size.y);
    });
}

fn draw_cells(
    surface: &mut dyn DrawSurface,
    layout: &Layout,
    window: &TableDataWindow,
    template: &OffscreenTemplate,
    props: &GeometryProperties,
) {
    let range = layout.visible_cells();
    let cell_size = props.cell_size_scaled();
    let bitmap = template.bitmap();

    for col in range.from.col..range.to.col {
        for row in range.from.row..range.to.row {
            let pos = GridPos::new(col, row);
            let cell_layout = layout.for_cell(pos);
            surface.blit(
                &bitmap,
                cell_layout.cell_anchor.x,
                cell_layout.cell_anchor.y,
                cell_size.x,
                cell_size.y,
            );

            let Some(cell) = window.cell_at(pos) else {
                continue;
            };
            let Some(value) = cell.value() else {
                continue;
            };
            surface.set_fill_color("black");
            surface.set_font(&content_font(cell_layout.available_content_area.y));
            surface.set_text_align("left");
            surface.set_text_baseline("middle");
            surface.fill_text(
                &value.to_string(),
                cell_layout.content_anchor.x,
                cell_layout.content_anchor.y,
            );
        }
    }
}

fn draw_gutters(surface: &mut dyn DrawSurface, layout: &Layout, props: &GeometryProperties) {
    let size = layout.viewport().size();
    let top_h = props.top_gutter_height_scaled();
    let left_w = props.left_gutter_width_scaled();
    let cell_size = props.cell_size_scaled();
    let pad = props.cell_padding_scaled();

    surface.set_fill_color("white");
    surface.set_stroke_color("black");
    surface.set_line_width(props.scale);
    surface.fill_rect(0.0, 0.0, size.x, top_h);
    surface.stroke_rect(0.0, 0.0, size.x, top_h);
    surface.fill_rect(0.0, 0.0, left_w, size.y);
    surface.stroke_rect(0.0, 0.0, left_w, size.y);

    let label_h = props.max_content_height_scaled().min(top_h);
    surface.set_fill_color("black");
    surface.set_font(&content_font(label_h));
    surface.set_text_align("left");
    surface.set_text_baseline("middle");

    let range = layout.visible_cells();
    for col in range.from.col..range.to.col {
        let anchor = layout.for_top_bar(col);
        // Labels scrolled under the corner block stay hidden.
        if anchor.x < left_w {
            continue;
        }
        surface.fill_text(&col_to_letter(col), anchor.x + pad.x, top_h / 2.0);
    }
    for row in range.from.row..range.to.row {
        let anchor = layout.for_left_bar(row);
        if anchor.y < top_h {
            continue;
        }
        surface.fill_text(
            &(row + 1).to_string(),
            pad.x,
            anchor.y + cell_size.y / 2.0,
        );
    }
}

fn content_font(height_px: f64) -> String {
    format!("{height_px}px monospace")
}
