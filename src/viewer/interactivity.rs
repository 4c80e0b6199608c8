//! Selection and edit state machine.
//!
//! Translates already-decoded pointer/keyboard input into logical selection
//! and edit transitions. Selection is held by logical position, so it
//! survives scrolling; screen-space concerns stay in the layout.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::geometry::{GridPos, Vec2};
use crate::layout::Layout;

/// A selection or edit transition, reported to registered observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    /// The selection changed. `None` means a click outside the cell area
    /// cleared it.
    Select(Option<GridPos>),
    /// Editing began on the given cell.
    EditStart(GridPos),
    /// Editing ended on the given cell.
    EditEnd(GridPos),
}

type EventListener = Box<dyn Fn(&InteractionEvent)>;

/// State machine over `{selected, edited}` cell positions.
pub struct Interactivity {
    layout: Rc<Layout>,
    selected: Cell<Option<GridPos>>,
    edited: Cell<Option<GridPos>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl Interactivity {
    pub fn new(layout: Rc<Layout>) -> Self {
        Self {
            layout,
            selected: Cell::new(None),
            edited: Cell::new(None),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Register an observer for selection/edit transitions. Observers run
    /// synchronously, in registration order.
    pub fn on_event(&self, listener: impl Fn(&InteractionEvent) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    fn emit(&self, event: InteractionEvent) {
        for listener in self.listeners.borrow().iter() {
            listener(&event);
        }
    }

    /// Pointer press at `pointer` (unscaled pixels, surface-relative).
    ///
    /// Resolves the cell under the pointer and selects it (`None` inside a
    /// gutter clears the selection). An edit in progress on a different cell
    /// ends first, before the select transition is reported.
    pub fn pointer_pressed(&self, pointer: Vec2) {
        let cell = self.layout.mouse_position_to_cell(pointer);
        self.selected.set(cell);

        if let Some(edited) = self.edited.get() {
            if cell != Some(edited) {
                self.edited.set(None);
                self.emit(InteractionEvent::EditEnd(edited));
            }
        }

        self.emit(InteractionEvent::Select(cell));
    }

    /// Double click: begin editing the selected cell, if any.
    pub fn double_click(&self) {
        if let Some(cell) = self.selected.get() {
            self.edited.set(Some(cell));
            self.emit(InteractionEvent::EditStart(cell));
        }
    }

    /// A named key was pressed. Only `Escape` carries meaning here.
    pub fn key_pressed(&self, key: &str) {
        if key == "Escape" {
            self.stop_editing();
        }
    }

    /// End the edit in progress, if any.
    pub fn stop_editing(&self) {
        if let Some(edited) = self.edited.take() {
            self.emit(InteractionEvent::EditEnd(edited));
        }
    }

    pub fn selected_cell(&self) -> Option<GridPos> {
        self.selected.get()
    }

    pub fn edited_cell(&self) -> Option<GridPos> {
        self.edited.get()
    }
}
