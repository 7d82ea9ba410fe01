//! Per-frame transform composition.
//!
//! [`FrameComposer::tick`] is the whole per-frame core: given the current time,
//! the frame's [`FrameParameters`] and the viewport size, it advances the
//! rotation animation, rescales the cube when needed, builds the projection and
//! model matrices and packs them into a [`FrameUniforms`] block. It does no GPU
//! work itself; the returned [`FrameOutput`] is what the renderer uploads.
//!
//! ```
//! use std::time::Duration;
//! use turntable::{FrameComposer, FrameParameters, Primitive, ViewConfig};
//!
//! let params = FrameParameters::default().angle(1.2);
//! let mut composer = FrameComposer::new(Primitive::Cube, ViewConfig::default(), &params).unwrap();
//!
//! let frame = composer.tick(Duration::ZERO, &params, (800, 600));
//! assert_eq!(frame.angle, 1.2);
//! assert_eq!(frame.index_count, 36);
//! assert_eq!(frame.uniforms.as_bytes().len(), 144);
//! ```

use crate::animation::Animation;
use crate::config::{ConfigError, ViewConfig};
use crate::geometry::{Primitive, RawGeometry, scale_vertices};
use crate::math;
use crate::mesh::Vertex3d;
use crate::params::FrameParameters;
use crate::uniforms::FrameUniforms;
use glam::{Mat4, Vec3};
use std::time::Duration;

/// Everything the renderer needs for one frame.
#[derive(Debug)]
pub struct FrameOutput<'a> {
    /// The 144-byte uniform record.
    pub uniforms: FrameUniforms,
    /// Rescaled vertices to upload in full, if the primitive is scalable.
    pub vertices: Option<&'a [Vertex3d]>,
    /// Number of indices to draw.
    pub index_count: u32,
    /// Rotation angle used this frame, in `[0, 2π)`.
    pub angle: f32,
}

/// Owns the animation state and geometry template for the displayed primitive.
#[derive(Debug)]
pub struct FrameComposer {
    view: ViewConfig,
    primitive: Primitive,
    base: RawGeometry,
    scaled: Vec<Vertex3d>,
    animation: Animation,
    /// Manual angle as last read from the parameters.
    last_angle_input: f32,
}

impl FrameComposer {
    /// Creates a composer starting at `params.angle` in manual mode.
    ///
    /// If `params.spinning` is set, spin starts on the first tick.
    pub fn new(
        primitive: Primitive,
        view: ViewConfig,
        params: &FrameParameters,
    ) -> Result<Self, ConfigError> {
        view.validate()?;
        let params = params.sanitized();
        let base = primitive.geometry();

        Ok(Self {
            view,
            primitive,
            scaled: base.vertices.clone(),
            base,
            animation: Animation::new(params.angle, view.spin_divisor_ms)?,
            last_angle_input: params.angle,
        })
    }

    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// The unscaled geometry template, for the initial upload.
    pub fn geometry(&self) -> &RawGeometry {
        &self.base
    }

    /// Computes the frame at time `now` (since session start).
    ///
    /// `viewport` is the render target size in pixels; zero dimensions are
    /// treated as 1. The returned angle should be written back into the
    /// caller's parameters so its displayed value tracks the spin.
    pub fn tick(
        &mut self,
        now: Duration,
        params: &FrameParameters,
        viewport: (u32, u32),
    ) -> FrameOutput<'_> {
        let params = params.sanitized();

        // Only a changed manual angle is applied, so stale input never
        // overrides the angle a spin left behind. Stopping happens before the
        // angle is set and starting after, so an angle changed in the same
        // tick lands in manual mode or becomes the spin baseline.
        if !params.spinning {
            self.animation.set_spinning(false, now);
        }
        if params.angle != self.last_angle_input {
            self.last_angle_input = params.angle;
            self.animation.set_angle(params.angle);
        }
        self.animation.set_spinning(params.spinning, now);
        let angle = self.animation.advance(now);

        let vertices = if self.primitive.supports_scale() {
            self.scaled = scale_vertices(&self.base.vertices, params.scale);
            Some(self.scaled.as_slice())
        } else {
            None
        };

        let transform = model_matrix(angle, self.view.tilt, params.translation);
        let projection = self.projection_matrix(viewport);

        FrameOutput {
            uniforms: FrameUniforms::pack(projection, transform, params.color),
            vertices,
            index_count: self.primitive.index_count(),
            angle,
        }
    }

    /// Perspective projection for a viewport of `(width, height)` pixels.
    pub fn projection_matrix(&self, viewport: (u32, u32)) -> Mat4 {
        let aspect = viewport.0.max(1) as f32 / viewport.1.max(1) as f32;
        math::projection(self.view.fov_degrees, aspect, self.view.near, self.view.far)
    }
}

/// Model transform: spin about Y, then tilt about X, then translate.
///
/// As a column-vector product this is `T · Rx(tilt) · Ry(angle)`.
pub fn model_matrix(angle: f32, tilt: f32, translation: Vec3) -> Mat4 {
    math::multiply(
        math::translation(translation),
        math::multiply(math::rotation_x(tilt), math::rotation_y(angle)),
    )
}
