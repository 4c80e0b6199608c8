//! Synchronous in-process change notification.
//!
//! The original event wiring is DOM `EventTarget` based; here it is a plain
//! callback registry. Listeners run synchronously, in registration order,
//! before the notifying call returns — downstream components react within the
//! same logical tick, so registration order doubles as dependency order.

use std::cell::RefCell;

/// A registry of `Fn()` callbacks fired on every state change of the owner.
#[derive(Default)]
pub struct ChangeListeners {
    listeners: RefCell<Vec<Box<dyn Fn()>>>,
}

impl ChangeListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners registered earlier run earlier.
    ///
    /// Must not be called from inside a listener that is currently being
    /// notified.
    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Run every listener synchronously, in registration order.
    pub fn notify(&self) {
        for listener in self.listeners.borrow().iter() {
            listener();
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}
