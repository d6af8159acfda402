//! Windowed host: drives a [`NetworkBackground`] from winit redraws and shows
//! each frame through the wgpu [`Presenter`].

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::background::NetworkBackground;
use crate::error::RunError;
use crate::gpu::Presenter;
use crate::render::Raster;
use crate::scene::Viewport;
use crate::time::Time;

const TITLE: &str = "Network Backdrop";

/// Refresh the FPS readout in the title every this many frames.
const TITLE_INTERVAL: u64 = 30;

pub(crate) fn run(background: NetworkBackground) -> Result<(), RunError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(background);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Logical container size and pixel ratio for a physical window size.
fn container_size(size: PhysicalSize<u32>, scale_factor: f64) -> (Vec2, f32) {
    let scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
    let logical = size.to_logical::<f32>(scale_factor);
    (Vec2::new(logical.width, logical.height), scale_factor as f32)
}

struct App {
    background: NetworkBackground,
    raster: Raster,
    time: Time,
    // Field order matters on drop: the surface must go before its window
    presenter: Option<Presenter>,
    window: Option<Arc<Window>>,
    error: Option<RunError>,
}

impl App {
    fn new(background: NetworkBackground) -> Self {
        Self {
            background,
            raster: Raster::new(&Viewport::default()),
            time: Time::new(),
            presenter: None,
            window: None,
            error: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let presenter = pollster::block_on(Presenter::new(window.clone()))?;

        self.presenter = Some(presenter);
        self.window = Some(window.clone());
        self.time.reset();
        self.observe_resize(window.inner_size(), window.scale_factor());
        window.request_redraw();
        Ok(())
    }

    /// Every size or scale change rebuilds the scene and the backing store.
    fn observe_resize(&mut self, size: PhysicalSize<u32>, scale_factor: f64) {
        let (logical, ratio) = container_size(size, scale_factor);
        self.background.resize(logical, ratio, &mut self.raster);
        if let Some(presenter) = &mut self.presenter {
            presenter.resize(size.width, size.height);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let delta = self.time.update();

        let mut out_of_memory = false;
        match &mut self.presenter {
            Some(presenter) => {
                self.background.frame(delta, &mut self.raster);
                match presenter.present(&self.raster, self.background.opacity()) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        presenter.reconfigure()
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => out_of_memory = true,
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
            // No drawing surface: keep animating without drawing
            None => self.background.advance(delta),
        }

        if out_of_memory {
            log::error!("surface out of memory, closing");
            self.shutdown(event_loop);
            return;
        }

        if let Some(window) = &self.window {
            if self.time.frame() % TITLE_INTERVAL == 0 {
                window.set_title(&format!("{} - {:.0} fps", TITLE, self.time.fps()));
            }
            window.request_redraw();
        }
    }

    /// Stop scheduling frames and release GPU resources before the window.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.presenter = None;
        self.window = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.create_window(event_loop) {
                log::error!("{}", e);
                self.error = Some(e);
                self.shutdown(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("closing after {} frames", self.background.frames());
                self.shutdown(event_loop);
            }
            WindowEvent::Resized(physical_size) => {
                self.observe_resize(physical_size, window.scale_factor());
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.observe_resize(window.inner_size(), scale_factor);
            }
            WindowEvent::CursorMoved { .. } | WindowEvent::CursorLeft { .. } => {
                if self.background.config().interactive {
                    self.background
                        .pointer_mut()
                        .handle_event(&event, window.scale_factor());
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.presenter = None;
    }
}
