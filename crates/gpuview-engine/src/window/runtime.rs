use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::device::GpuInit;
use crate::time::{FrameClock, FramePacer};
use crate::view::{AppControl, ViewController, ViewDelegate};

use super::RuntimeConfig;

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, loads the view and runs until the window closes or
    /// the delegate requests exit.
    ///
    /// The runtime only keeps a weak handle to `delegate`; the caller owns it.
    pub fn run<D>(config: RuntimeConfig, gpu_init: GpuInit, delegate: &Rc<RefCell<D>>) -> Result<()>
    where
        D: ViewDelegate + 'static,
    {
        let weak: Weak<RefCell<D>> = Rc::downgrade(delegate);
        let delegate: Weak<RefCell<dyn ViewDelegate>> = weak;

        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, delegate);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct ViewEntry {
    clock: FrameClock,
    pacer: FramePacer,

    window: Window,

    #[borrows(window)]
    #[covariant]
    controller: ViewController<'this>,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    delegate: Weak<RefCell<dyn ViewDelegate>>,

    view: Option<ViewEntry>,
    exit_requested: bool,

    /// First fatal error; returned from `Runtime::run`.
    error: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, delegate: Weak<RefCell<dyn ViewDelegate>>) -> Self {
        Self {
            config,
            gpu_init,
            delegate,
            view: None,
            exit_requested: false,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error.get_or_insert(err);
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_view(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let settings = self.config.view.clone();

        let mut entry = ViewEntryTryBuilder {
            clock: FrameClock::default(),
            pacer: FramePacer::new(settings.preferred_frames_per_second),
            window,
            controller_builder: |w| pollster::block_on(ViewController::load(w, gpu_init, &settings)),
        }
        .try_build()
        .context("failed to load view")?;

        // Loading can take long enough to skew the first frame's dt.
        entry.with_mut(|fields| {
            fields.clock.reset();
            fields.pacer.reset();
        });

        let delegate = self.delegate.clone();
        entry.with_controller_mut(|c| c.set_delegate(delegate));
        entry.with_window(|w| w.request_redraw());

        self.view = Some(entry);
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.view.is_some() {
            return;
        }

        if let Err(e) = self.create_view(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // Surfaces do not survive suspension on mobile targets; rebuild on resume.
        if self.view.take().is_some() {
            log::info!("view released on suspend");
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.view.as_mut() else {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        };

        let flow = entry.with_mut(|fields| {
            if fields.pacer.poll(Instant::now()) {
                fields.window.request_redraw();
            }

            match fields.pacer.next_deadline() {
                Some(deadline) => ControlFlow::WaitUntil(deadline),
                None => ControlFlow::Wait,
            }
        });

        event_loop.set_control_flow(flow);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.view.as_mut() else {
            return;
        };

        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        let mut control = entry.with_controller_mut(|c| c.window_event(&event));

        match &event {
            WindowEvent::CloseRequested => {
                control = AppControl::Exit;
            }

            WindowEvent::Resized(new_size) => {
                entry.with_controller_mut(|c| c.drawable_size_will_change(*new_size));
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                entry.with_mut(|fields| {
                    let new_size = fields.window.inner_size();
                    fields.controller.drawable_size_will_change(new_size);
                });
            }

            WindowEvent::RedrawRequested => {
                let frame_control = entry.with_mut(|fields| {
                    let time = fields.clock.tick();
                    fields.controller.draw(time)
                });

                if frame_control == AppControl::Exit {
                    control = AppControl::Exit;
                }
            }

            _ => {}
        }

        if control == AppControl::Exit {
            self.view = None;
            self.exit_requested = true;
            event_loop.exit();
        }
    }
}
