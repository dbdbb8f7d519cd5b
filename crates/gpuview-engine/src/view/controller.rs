use std::cell::RefCell;
use std::rc::Weak;

use anyhow::Result;
use glam::Mat4;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::coords::{Perspective, Viewport};
use crate::device::{Drawable, Gpu, GpuInit, SurfaceErrorAction};
use crate::pipeline::PipelineState;
use crate::time::FrameTime;
use crate::window::ViewSettings;

use super::{AppControl, DelegateSlot, RenderCtx, ViewDelegate};

/// Binds a window to a GPU device, the `basic` pipeline and a delegate.
///
/// Lifetimes:
/// - `'w` is the window borrow carried by the surface inside `Gpu<'w>`
pub struct ViewController<'w> {
    window: &'w Window,
    gpu: Gpu<'w>,
    pipeline: PipelineState,
    perspective: Perspective,
    projection: Mat4,
    clear_color: wgpu::Color,
    delegate: DelegateSlot,
}

impl<'w> ViewController<'w> {
    /// Creates the device, compiles the pipeline state for the surface format
    /// and computes the initial projection.
    pub async fn load(window: &'w Window, gpu_init: GpuInit, settings: &ViewSettings) -> Result<Self> {
        let gpu = Gpu::new(window, gpu_init).await?;
        let pipeline = PipelineState::new(gpu.device(), gpu.surface_format());

        let perspective = settings.perspective;
        let projection = next_projection(&perspective, Mat4::IDENTITY, gpu.size());

        log::info!(
            "view loaded: {}x{} {:?}",
            gpu.size().width,
            gpu.size().height,
            gpu.surface_format()
        );

        Ok(Self {
            window,
            gpu,
            pipeline,
            perspective,
            projection,
            clear_color: settings.clear_color,
            delegate: DelegateSlot::new(),
        })
    }

    /// Attaches a delegate without taking ownership and runs its
    /// `view_did_load` hook.
    pub fn set_delegate(&mut self, delegate: Weak<RefCell<dyn ViewDelegate>>) {
        self.delegate.set(delegate);
        if !self.delegate.is_attached() {
            log::warn!("delegate was dropped before it could be attached");
            return;
        }

        let ctx = render_ctx(&self.gpu, &self.pipeline, self.projection, self.clear_color);
        self.delegate.with(|d| d.view_did_load(&ctx));
    }

    /// Resize hook: reconfigures the surface and recomputes the projection.
    pub fn drawable_size_will_change(&mut self, size: PhysicalSize<u32>) {
        self.gpu.resize(size);
        self.projection = next_projection(&self.perspective, self.projection, size);
        log::debug!("drawable size changed to {}x{}", size.width, size.height);
    }

    /// Per-frame hook: updates the delegate, then hands it a drawable.
    pub fn draw(&mut self, time: FrameTime) -> AppControl {
        let mut frames = SurfaceFrames {
            window: self.window,
            gpu: &mut self.gpu,
            pipeline: &self.pipeline,
            projection: self.projection,
            clear_color: self.clear_color,
        };

        relay_frame(&self.delegate, &mut frames, time)
    }

    /// Forwards a window event to the delegate.
    pub fn window_event(&mut self, event: &WindowEvent) -> AppControl {
        self.delegate
            .with(|d| d.on_window_event(event))
            .unwrap_or(AppControl::Continue)
    }
}

/// Projection for a drawable of `size`; a zero-area size keeps `current`.
pub(crate) fn next_projection(perspective: &Perspective, current: Mat4, size: PhysicalSize<u32>) -> Mat4 {
    perspective
        .for_viewport(Viewport::from(size))
        .unwrap_or(current)
}

/// Where drawables come from. The surface in production; a fake in tests.
pub(crate) trait FrameSource {
    type Frame;

    /// Next drawable, or the action taken when none is available.
    fn acquire(&mut self) -> std::result::Result<Self::Frame, SurfaceErrorAction>;

    /// Lets the delegate render into `frame`, then presents it.
    fn render(&mut self, delegate: &DelegateSlot, frame: Self::Frame);
}

/// One draw tick: `update_logic` first, then `render_objects` only if a
/// drawable could be acquired.
pub(crate) fn relay_frame<S: FrameSource>(
    delegate: &DelegateSlot,
    source: &mut S,
    time: FrameTime,
) -> AppControl {
    delegate.with(|d| d.update_logic(time));

    match source.acquire() {
        Ok(frame) => {
            source.render(delegate, frame);
            AppControl::Continue
        }
        Err(SurfaceErrorAction::Fatal) => {
            log::error!("surface error is unrecoverable; exiting");
            AppControl::Exit
        }
        Err(SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame) => AppControl::Continue,
    }
}

struct SurfaceFrames<'a, 'w> {
    window: &'w Window,
    gpu: &'a mut Gpu<'w>,
    pipeline: &'a PipelineState,
    projection: Mat4,
    clear_color: wgpu::Color,
}

impl FrameSource for SurfaceFrames<'_, '_> {
    type Frame = Drawable;

    fn acquire(&mut self) -> std::result::Result<Drawable, SurfaceErrorAction> {
        let size = self.gpu.size();
        if size.width == 0 || size.height == 0 {
            return Err(SurfaceErrorAction::SkipFrame);
        }

        self.gpu.next_drawable().map_err(|err| {
            log::debug!("no drawable this frame: {err}");
            self.gpu.handle_surface_error(err)
        })
    }

    fn render(&mut self, delegate: &DelegateSlot, mut drawable: Drawable) {
        // Clear pass, dropped before the delegate records into the encoder.
        {
            let _rpass = drawable.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("gpuview clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &drawable.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        {
            let ctx = render_ctx(self.gpu, self.pipeline, self.projection, self.clear_color);
            delegate.with(|d| d.render_objects(&ctx, &mut drawable));
        }

        self.window.pre_present_notify();
        self.gpu.present(drawable);
    }
}

fn render_ctx<'a>(
    gpu: &'a Gpu<'_>,
    pipeline: &'a PipelineState,
    projection: Mat4,
    clear_color: wgpu::Color,
) -> RenderCtx<'a> {
    RenderCtx {
        device: gpu.device(),
        queue: gpu.queue(),
        pipeline,
        projection,
        viewport: Viewport::from(gpu.size()),
        clear_color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::time::FrameClock;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    struct Recorder {
        log: Log,
    }

    impl ViewDelegate for Recorder {
        fn update_logic(&mut self, _time: FrameTime) {
            self.log.borrow_mut().push("update");
        }

        fn render_objects(&mut self, _ctx: &RenderCtx<'_>, _drawable: &mut Drawable) {
            self.log.borrow_mut().push("render");
        }
    }

    /// Stands in for the surface: yields `next` once per acquire.
    struct FakeFrames {
        log: Log,
        next: std::result::Result<(), SurfaceErrorAction>,
    }

    impl FrameSource for FakeFrames {
        type Frame = ();

        fn acquire(&mut self) -> std::result::Result<(), SurfaceErrorAction> {
            self.log.borrow_mut().push("acquire");
            self.next
        }

        fn render(&mut self, delegate: &DelegateSlot, _frame: ()) {
            // Real drawables need a GPU; record that the delegate was reachable.
            if delegate.is_attached() {
                self.log.borrow_mut().push("render");
            }
        }
    }

    fn run_frame(next: std::result::Result<(), SurfaceErrorAction>) -> (AppControl, Vec<&'static str>) {
        let log: Log = Rc::default();
        let delegate = Rc::new(RefCell::new(Recorder { log: log.clone() }));
        let mut slot = DelegateSlot::new();
        let weak: Weak<RefCell<Recorder>> = Rc::downgrade(&delegate);
        slot.set(weak);

        let mut frames = FakeFrames { log: log.clone(), next };
        let control = relay_frame(&slot, &mut frames, FrameClock::new().tick());

        let events = log.borrow().clone();
        (control, events)
    }

    // ── draw relay ────────────────────────────────────────────────────────

    #[test]
    fn update_runs_before_drawable_is_acquired() {
        let (control, events) = run_frame(Ok(()));
        assert_eq!(control, AppControl::Continue);
        assert_eq!(events, vec!["update", "acquire", "render"]);
    }

    #[test]
    fn no_drawable_skips_render() {
        for action in [SurfaceErrorAction::SkipFrame, SurfaceErrorAction::Reconfigured] {
            let (control, events) = run_frame(Err(action));
            assert_eq!(control, AppControl::Continue);
            assert_eq!(events, vec!["update", "acquire"]);
        }
    }

    #[test]
    fn fatal_surface_error_exits() {
        let (control, events) = run_frame(Err(SurfaceErrorAction::Fatal));
        assert_eq!(control, AppControl::Exit);
        assert!(!events.contains(&"render"));
    }

    #[test]
    fn dropped_delegate_still_acquires_and_continues() {
        let log: Log = Rc::default();
        let mut slot = DelegateSlot::new();
        {
            let delegate = Rc::new(RefCell::new(Recorder { log: log.clone() }));
            let weak: Weak<RefCell<Recorder>> = Rc::downgrade(&delegate);
            slot.set(weak);
        }

        let mut frames = FakeFrames { log: log.clone(), next: Ok(()) };
        let control = relay_frame(&slot, &mut frames, FrameClock::new().tick());

        assert_eq!(control, AppControl::Continue);
        assert_eq!(*log.borrow(), vec!["acquire"]);
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_recomputes_projection_for_new_aspect() {
        let p = Perspective::default();
        let before = next_projection(&p, Mat4::IDENTITY, PhysicalSize::new(800, 600));
        let after = next_projection(&p, before, PhysicalSize::new(1600, 600));

        assert_eq!(after, p.matrix(1600.0 / 600.0));
        assert!((before.x_axis.x / after.x_axis.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn zero_height_resize_keeps_projection() {
        let p = Perspective::default();
        let current = p.matrix(4.0 / 3.0);
        assert_eq!(next_projection(&p, current, PhysicalSize::new(800, 0)), current);
        assert_eq!(next_projection(&p, current, PhysicalSize::new(0, 0)), current);
    }
}
