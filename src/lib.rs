//! # Turntable
//!
//! **An interactive viewer for a single textured primitive.**
//!
//! Turntable draws a cube, a quad or an octahedron in a window and lets you
//! scale it, push it back and forth along the view axis, recolor it, and
//! either turn it by hand or let it spin at a steady rate.
//!
//! The drawing itself is thin. Most of the crate is the frame math that feeds
//! it, and that part needs no GPU:
//!
//! - [`math`] builds column-major 4×4 matrices.
//! - [`uniforms`] packs projection, transform and color into the 144-byte
//!   block the shader reads.
//! - [`Animation`] tracks the rotation angle in manual or spinning mode.
//! - [`FrameComposer`] turns the current [`FrameParameters`] and a timestamp
//!   into everything one frame needs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use turntable::{AppConfig, FrameParameters, Primitive, Vec3};
//!
//! let params = FrameParameters::new()
//!     .scale(Vec3::new(1.0, 0.5, 1.0))
//!     .spinning(true);
//!
//! turntable::run(AppConfig::new().primitive(Primitive::Cube).params(params)).unwrap();
//! ```
//!
//! ## Headless
//!
//! ```
//! use std::time::Duration;
//! use turntable::{FrameComposer, FrameParameters, Primitive, ViewConfig};
//!
//! let params = FrameParameters::new().spinning(true);
//! let mut composer = FrameComposer::new(Primitive::Quad, ViewConfig::new(), &params).unwrap();
//! composer.tick(Duration::ZERO, &params, (800, 600));
//! let frame = composer.tick(Duration::from_millis(700), &params, (800, 600));
//! assert!((frame.angle - 1.0).abs() < 1e-4);
//! ```

mod animation;
mod app;
mod composer;
mod config;
mod controls;
mod geometry;
mod gpu;
mod input;
pub mod math;
mod mesh;
mod params;
mod renderer;
mod texture;
pub mod uniforms;

pub use animation::{Animation, DEFAULT_SPIN_DIVISOR_MS, RotationMode, wrap_angle};
pub use app::{AppConfig, AppError, TextureSource, run};
pub use composer::{FrameComposer, FrameOutput, model_matrix};
pub use config::{ConfigError, ViewConfig};
pub use controls::{Controls, MAX_DEPTH, MIN_DEPTH};
pub use geometry::{GeometryError, Primitive, RawGeometry, scale_vertices};
pub use gpu::{GpuContext, GpuError};
pub use input::Input;
pub use mesh::{Mesh, Vertex3d};
pub use params::{
    FrameParameters, MAX_SCALE, MIN_SCALE, ParamError, ParamField, Rgb, TRANSLATION_LIMIT,
    parse_hex_color, to_hex_color,
};
pub use renderer::PrimitiveRenderer;
pub use texture::{Texture, TextureError};
pub use uniforms::FrameUniforms;

// Re-export glam math types for convenience
pub use glam::{Mat4, Vec3};

// Re-export commonly used winit types for convenience
pub use winit::keyboard::KeyCode;
