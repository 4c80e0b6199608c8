//! Viewport state: scroll anchor and visible surface size.

use std::cell::Cell;

use crate::events::ChangeListeners;
use crate::geometry::Vec2;

/// The visible window onto the unbounded grid.
///
/// `anchor` is the scroll offset of the top-left corner and `size` the
/// drawing-surface extent, both in scaled (device) pixels. The viewport is
/// the sole owner of this state; consumers hold a shared handle and subscribe
/// to change notifications instead of polling. Every mutating call notifies
/// synchronously.
pub struct Viewport {
    anchor: Cell<Vec2>,
    size: Cell<Vec2>,
    scale: f64,
    changed: ChangeListeners,
}

impl Viewport {
    pub fn new(scale: f64) -> Self {
        Self {
            anchor: Cell::new(Vec2::ZERO),
            size: Cell::new(Vec2::ZERO),
            scale,
            changed: ChangeListeners::new(),
        }
    }

    /// Set the visible drawing-surface size (scaled pixels).
    pub fn resize(&self, size: Vec2) {
        self.size.set(size);
        self.changed.notify();
    }

    /// Jump to an absolute anchor. No clamping; callers pass non-negative
    /// coordinates.
    pub fn move_to(&self, anchor: Vec2) {
        self.anchor.set(anchor);
        self.changed.notify();
    }

    /// Scroll by a delta, clamping each axis at 0. There is no upper bound —
    /// the grid is conceptually infinite.
    pub fn move_by(&self, delta: Vec2) {
        let next = (self.anchor.get() + delta).max(Vec2::ZERO);
        self.anchor.set(next);
        self.changed.notify();
    }

    /// Scroll offset in scaled pixels.
    pub fn anchor(&self) -> Vec2 {
        self.anchor.get()
    }

    /// Scroll offset in unscaled (CSS) pixels.
    pub fn anchor_unscaled(&self) -> Vec2 {
        self.anchor.get().scaled(1.0 / self.scale)
    }

    /// Visible size in scaled pixels.
    pub fn size(&self) -> Vec2 {
        self.size.get()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Register a listener run synchronously on every mutation.
    pub fn on_change(&self, listener: impl Fn() + 'static) {
        self.changed.subscribe(listener);
    }
}
