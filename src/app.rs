use std::{sync::Arc, time::Instant};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::{SceneConfig, WindowConfig},
    gfx::{
        geometry::GenerationError,
        rendering::render_engine::{RenderEngine, RenderError},
    },
    planet_scene::{build_scene, PlanetScene},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("scene generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("GPU ran out of memory while acquiring a frame")]
    OutOfMemory,
}

/// Window, renderer and animated scene, driven by the winit event loop
pub struct PlanetApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    window_config: WindowConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    planet: PlanetScene,
    started: Option<Instant>,
    error: Option<AppError>,
}

impl PlanetApp {
    /// Generates the scene and prepares the event loop
    ///
    /// No window exists yet; it is created once the event loop resumes.
    pub fn new(config: &SceneConfig) -> Result<Self, AppError> {
        let event_loop = EventLoop::new()?;

        let window = &config.window;
        let aspect = window.width as f32 / window.height.max(1) as f32;
        let planet = build_scene(config, aspect)?;

        Ok(Self {
            event_loop,
            app_state: AppState {
                window_config: window.clone(),
                window: None,
                render_engine: None,
                planet,
                started: None,
                error: None,
            },
        })
    }

    /// Runs until the window closes or a fatal error occurs
    pub fn run(mut self) -> Result<(), AppError> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attributes = WindowAttributes::default()
            .with_title(self.window_config.title.clone())
            .with_inner_size(LogicalSize::new(
                self.window_config.width,
                self.window_config.height,
            ));
        let window_handle = Arc::new(event_loop.create_window(attributes)?);
        self.window = Some(window_handle.clone());

        let (width, height) = window_handle.inner_size().into();
        let vsync = self.window_config.vsync;
        let renderer = pollster::block_on(async move {
            RenderEngine::new(window_handle, width, height, vsync).await
        })?;

        let scene = &mut self.planet.scene;
        scene.camera_manager.camera.resize_projection(width, height);
        scene.init_gpu_resources(renderer.device(), renderer.queue());

        self.render_engine = Some(renderer);
        self.started = Some(Instant::now());
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        log::error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };
        let scene = &mut self.planet.scene;

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                scene.camera_manager.process_keyboard_event(&event);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                scene.camera_manager.process_mouse_button(button, state);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                render_engine.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let elapsed = self
                    .started
                    .map(|started| started.elapsed().as_secs_f32())
                    .unwrap_or_default();

                self.planet.animate(elapsed);
                let scene = &mut self.planet.scene;
                scene.update_all_transforms(render_engine.queue());
                scene.update();
                render_engine.update(scene.camera_manager.camera.uniform, &scene.lights);

                match render_engine.render_frame(scene) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        log::debug!("Surface lost or outdated, reconfiguring");
                        render_engine.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("{}", AppError::OutOfMemory);
                        self.error = Some(AppError::OutOfMemory);
                        event_loop.exit();
                    }
                    Err(wgpu::SurfaceError::Timeout) => {
                        log::warn!("Timed out acquiring a frame, skipping it");
                    }
                    Err(err) => {
                        log::warn!("Skipping frame: {}", err);
                    }
                }
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        self.planet.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
