use winit::event::WindowEvent;

use crate::device::Drawable;
use crate::time::FrameTime;

use super::ctx::RenderCtx;

/// Control directive returned to the runtime.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Receives per-frame notifications from a `ViewController`.
pub trait ViewDelegate {
    /// Called once when the delegate is attached to a loaded view.
    ///
    /// Create buffers, textures and bind groups here.
    fn view_did_load(&mut self, ctx: &RenderCtx<'_>) {
        let _ = ctx;
    }

    /// Advances application state. Called once per draw, before a drawable is
    /// requested, with the time elapsed since the previous draw.
    fn update_logic(&mut self, time: FrameTime);

    /// Records draw commands into `drawable`.
    ///
    /// The drawable has already been cleared to the view's clear color; load
    /// it with `LoadOp::Load`. Submission and presentation happen after return.
    fn render_objects(&mut self, ctx: &RenderCtx<'_>, drawable: &mut Drawable);

    /// Called for every window event before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }
}
