//! Window, event loop and the per-frame cycle.
//!
//! [`run`] opens a window from an [`AppConfig`], brings up the GPU and then
//! drives one frame per redraw: keyboard controls edit the parameters, the
//! [`FrameComposer`] turns them into uniforms and vertices, and the
//! [`PrimitiveRenderer`] draws the result.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::KeyCode;
use winit::window::{Window, WindowAttributes, WindowId};

use crate::composer::FrameComposer;
use crate::config::{ConfigError, ViewConfig};
use crate::controls::Controls;
use crate::geometry::Primitive;
use crate::gpu::{GpuContext, GpuError};
use crate::input::Input;
use crate::params::{FrameParameters, to_hex_color};
use crate::renderer::PrimitiveRenderer;
use crate::texture::{Texture, TextureError};

/// Errors that end a session.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Gpu(#[from] GpuError),
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error("invalid view configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("the GPU ran out of memory")]
    OutOfMemory,
}

/// Where the primitive's texture comes from.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TextureSource {
    /// Procedural cobblestone for the cube, plain white for the others.
    #[default]
    Auto,
    /// An image file, loaded once at startup.
    File(PathBuf),
    /// Plain white; only the color parameter shows.
    Untextured,
}

/// Configuration for a viewer session.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub primitive: Primitive,
    pub texture: TextureSource,
    /// Starting parameters; also what the reset key restores.
    pub params: FrameParameters,
    pub view: ViewConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Turntable".to_string(),
            width: 800,
            height: 600,
            primitive: Primitive::default(),
            texture: TextureSource::default(),
            params: FrameParameters::default(),
            view: ViewConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn primitive(mut self, primitive: Primitive) -> Self {
        self.primitive = primitive;
        self
    }

    pub fn texture(mut self, texture: TextureSource) -> Self {
        self.texture = texture;
        self
    }

    pub fn params(mut self, params: FrameParameters) -> Self {
        self.params = params;
        self
    }

    pub fn view(mut self, view: ViewConfig) -> Self {
        self.view = view;
        self
    }
}

/// Opens a window and runs the frame loop until it is closed.
///
/// Startup failures (no adapter, unreadable texture, invalid view settings)
/// are returned before any frame is drawn.
///
/// # Example
/// ```no_run
/// use turntable::{AppConfig, Primitive};
///
/// turntable::run(AppConfig::new().primitive(Primitive::Octahedron)).unwrap();
/// ```
pub fn run(config: AppConfig) -> Result<(), AppError> {
    config.view.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = TurntableApp {
        state: AppState::Pending(Some(config)),
        failure: None,
    };
    event_loop.run_app(&mut app)?;

    match app.failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct TurntableApp {
    state: AppState,
    failure: Option<AppError>,
}

enum AppState {
    Pending(Option<AppConfig>),
    Running(Box<Session>),
}

impl TurntableApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        log::error!("{}", err);
        self.failure = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for TurntableApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let AppState::Pending(config) = &mut self.state else {
            return;
        };
        let Some(config) = config.take() else {
            return;
        };

        match Session::start(event_loop, config) {
            Ok(session) => self.state = AppState::Running(Box::new(session)),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let AppState::Running(session) = &mut self.state else {
            return;
        };

        session.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                session.gpu.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                if session.input.key_pressed(KeyCode::Escape) {
                    event_loop.exit();
                    return;
                }
                if let Err(err) = session.frame() {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }
}

/// Everything alive while the window is open.
struct Session {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: PrimitiveRenderer,
    composer: FrameComposer,
    controls: Controls,
    input: Input,
    params: FrameParameters,
    title: String,
    start_time: Instant,
    last_frame: Instant,
}

impl Session {
    fn start(event_loop: &ActiveEventLoop, config: AppConfig) -> Result<Self, AppError> {
        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = GpuContext::new(window.clone())?;

        let composer = FrameComposer::new(config.primitive, config.view, &config.params)?;

        let texture = match &config.texture {
            TextureSource::File(path) => Texture::from_file(&gpu, path)?,
            TextureSource::Auto if config.primitive.textured_by_default() => {
                Texture::cobblestone(&gpu, 16, 1)
            }
            TextureSource::Auto | TextureSource::Untextured => Texture::white(&gpu),
        };

        let renderer =
            PrimitiveRenderer::new(&gpu, composer.geometry(), texture, config.view.clear_color);

        log::info!(
            "showing {} at {}x{} (fov {}°, tilt {:.3} rad)",
            config.primitive,
            gpu.width(),
            gpu.height(),
            config.view.fov_degrees,
            config.view.tilt
        );

        let session = Self {
            window,
            gpu,
            renderer,
            composer,
            controls: Controls::new(config.params),
            input: Input::new(),
            params: config.params,
            title: config.title,
            start_time: Instant::now(),
            last_frame: Instant::now(),
        };
        session.update_title();
        session.window.request_redraw();
        Ok(session)
    }

    /// One tick: input, compose, draw, schedule the next tick.
    fn frame(&mut self) -> Result<(), AppError> {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let changed = self.controls.apply(&self.input, &mut self.params, dt);

        let frame = self.composer.tick(
            now.duration_since(self.start_time),
            &self.params,
            self.gpu.viewport(),
        );
        self.params.angle = frame.angle;

        match self.renderer.render(&self.gpu, &frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                self.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(AppError::OutOfMemory),
            Err(err) => log::warn!("skipping frame: {}", err),
        }

        if changed {
            self.update_title();
        }
        self.input.begin_frame();
        self.window.request_redraw();
        Ok(())
    }

    fn update_title(&self) {
        let p = &self.params;
        self.window.set_title(&format!(
            "{} | {} | scale {:.2} {:.2} {:.2} | z {:.2} | {} | {}",
            self.title,
            self.composer.primitive(),
            p.scale.x,
            p.scale.y,
            p.scale.z,
            p.translation.z,
            to_hex_color(p.color),
            if p.spinning { "spinning" } else { "manual" },
        ));
    }
}
