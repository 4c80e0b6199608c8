//! Frame-scheduling discipline for the draw pipeline.
//!
//! The loop core is host-agnostic: something external calls [`RenderLoop::tick`]
//! once per display frame (on the web, a `requestAnimationFrame` callback).
//! Work only happens on ticks where a redraw was requested, so idle frames
//! cost one flag check.

use std::cell::{Cell, RefCell};

use crate::render::surface::DrawSurface;

/// A repeating draw stage of the pipeline.
pub type RenderStage = Box<dyn FnMut(&mut dyn DrawSurface)>;
/// A one-shot setup task (resize, geometry change) run before the pipeline.
pub type ExecTask = Box<dyn FnOnce(&mut dyn DrawSurface)>;

/// Ordered draw pipeline plus a one-shot task queue, gated by a redraw flag
/// and a running flag.
pub struct RenderLoop {
    pipeline: RefCell<Vec<RenderStage>>,
    exec_queue: RefCell<Vec<ExecTask>>,
    should_render: Cell<bool>,
    running: Cell<bool>,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoop {
    /// A stopped loop with the redraw flag pre-set, so the first frame after
    /// `run()` always draws.
    pub fn new() -> Self {
        Self {
            pipeline: RefCell::new(Vec::new()),
            exec_queue: RefCell::new(Vec::new()),
            should_render: Cell::new(true),
            running: Cell::new(false),
        }
    }

    /// Append a draw stage. Stages run every rendered frame, in registration
    /// order.
    pub fn add(&self, stage: impl FnMut(&mut dyn DrawSurface) + 'static) {
        self.pipeline.borrow_mut().push(Box::new(stage));
    }

    /// Queue a one-shot task. Tasks run once, in insertion order, before the
    /// pipeline of the next rendered frame.
    pub fn enqueue(&self, task: impl FnOnce(&mut dyn DrawSurface) + 'static) {
        self.exec_queue.borrow_mut().push(Box::new(task));
    }

    /// Request a redraw on the next tick. Idempotent: any number of requests
    /// before the next frame coalesce into one pipeline execution.
    pub fn request_render(&self) {
        self.should_render.set(true);
    }

    /// stopped → running. Idempotent.
    pub fn run(&self) {
        self.running.set(true);
    }

    /// running → stopped. Idempotent; frames already scheduled by the host
    /// become no-ops because every tick re-checks this flag.
    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Execute one frame: while running and a redraw is pending, drain the
    /// exec queue, run the pipeline, clear the redraw flag. Otherwise a
    /// no-op.
    pub fn tick(&self, surface: &mut dyn DrawSurface) {
        if !self.running.get() || !self.should_render.get() {
            return;
        }

        let tasks: Vec<ExecTask> = self.exec_queue.borrow_mut().drain(..).collect();
        for task in tasks {
            task(surface);
        }

        for stage in self.pipeline.borrow_mut().iter_mut() {
            stage(surface);
        }

        self.should_render.set(false);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;
    use crate::render::surface::RecordingSurface;
    use std::rc::Rc;

    fn counting_loop() -> (Rc<RenderLoop>, Rc<Cell<u32>>) {
        let frames = Rc::new(Cell::new(0u32));
        let render_loop = Rc::new(RenderLoop::new());
        {
            let frames = Rc::clone(&frames);
            render_loop.add(move |_| frames.set(frames.get() + 1));
        }
        (render_loop, frames)
    }

    #[test]
    fn test_stopped_loop_never_draws() {
        let (render_loop, frames) = counting_loop();
        let mut surface = RecordingSurface::new(Vec2::ZERO);
        render_loop.request_render();
        render_loop.tick(&mut surface);
        assert_eq!(frames.get(), 0);
    }

    #[test]
    fn test_requests_coalesce_into_one_frame() {
        let (render_loop, frames) = counting_loop();
        let mut surface = RecordingSurface::new(Vec2::ZERO);
        render_loop.run();

        render_loop.request_render();
        render_loop.request_render();
        render_loop.request_render();
        render_loop.tick(&mut surface);
        assert_eq!(frames.get(), 1);

        // Flag cleared: the next tick is a no-op.
        render_loop.tick(&mut surface);
        assert_eq!(frames.get(), 1);
    }

    #[test]
    fn test_exec_queue_runs_before_pipeline_and_drains() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let render_loop = RenderLoop::new();
        {
            let order = Rc::clone(&order);
            render_loop.add(move |_| order.borrow_mut().push("stage"));
        }
        {
            let order = Rc::clone(&order);
            render_loop.enqueue(move |_| order.borrow_mut().push("task-a"));
        }
        {
            let order = Rc::clone(&order);
            render_loop.enqueue(move |_| order.borrow_mut().push("task-b"));
        }

        let mut surface = RecordingSurface::new(Vec2::ZERO);
        render_loop.run();
        render_loop.tick(&mut surface);
        assert_eq!(*order.borrow(), vec!["task-a", "task-b", "stage"]);

        // Tasks are one-shot; a second rendered frame runs only the stage.
        render_loop.request_render();
        render_loop.tick(&mut surface);
        assert_eq!(
            *order.borrow(),
            vec!["task-a", "task-b", "stage", "stage"]
        );
    }

    #[test]
    fn test_stop_is_immediate_for_future_frames() {
        let (render_loop, frames) = counting_loop();
        let mut surface = RecordingSurface::new(Vec2::ZERO);
        render_loop.run();
        render_loop.tick(&mut surface);
        assert_eq!(frames.get(), 1);

        render_loop.stop();
        render_loop.stop(); // idempotent
        render_loop.request_render();
        render_loop.tick(&mut surface);
        assert_eq!(frames.get(), 1);

        render_loop.run();
        render_loop.tick(&mut surface);
        assert_eq!(frames.get(), 2);
    }
}
