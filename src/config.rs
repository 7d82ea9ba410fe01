//! Camera and animation constants for the viewer.

use crate::animation::DEFAULT_SPIN_DIVISOR_MS;
use std::f32::consts::PI;

/// Errors from an inconsistent [`ViewConfig`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("near plane must be positive and below the far plane (near {near}, far {far})")]
    DepthRange { near: f32, far: f32 },
    #[error("field of view must be between 0 and 180 degrees, got {0}")]
    FieldOfView(f32),
    #[error("spin divisor must be a positive number of milliseconds, got {0}")]
    SpinDivisor(f32),
    #[error("tilt must be finite, got {0}")]
    Tilt(f32),
}

/// Projection, default tilt and spin speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Fixed rotation about X applied after the spin, in radians.
    pub tilt: f32,
    /// Milliseconds of spin per radian.
    pub spin_divisor_ms: f32,
    /// Background color of the render target.
    pub clear_color: [f32; 3],
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 70.0,
            near: 0.01,
            far: 100.0,
            tilt: -PI / 7.0,
            spin_divisor_ms: DEFAULT_SPIN_DIVISOR_MS,
            clear_color: [0.1, 0.1, 0.1],
        }
    }
}

impl ViewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fov(mut self, degrees: f32) -> Self {
        self.fov_degrees = degrees;
        self
    }

    pub fn depth_range(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn tilt(mut self, radians: f32) -> Self {
        self.tilt = radians;
        self
    }

    pub fn spin_divisor(mut self, ms_per_radian: f32) -> Self {
        self.spin_divisor_ms = ms_per_radian;
        self
    }

    pub fn clear_color(mut self, rgb: [f32; 3]) -> Self {
        self.clear_color = rgb;
        self
    }

    /// Checks `far > near > 0`, `0 < fov < 180`, a positive spin divisor and a finite tilt.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // negated comparisons also reject NaN
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(ConfigError::DepthRange {
                near: self.near,
                far: self.far,
            });
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::FieldOfView(self.fov_degrees));
        }
        if !(self.spin_divisor_ms > 0.0 && self.spin_divisor_ms.is_finite()) {
            return Err(ConfigError::SpinDivisor(self.spin_divisor_ms));
        }
        if !self.tilt.is_finite() {
            return Err(ConfigError::Tilt(self.tilt));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = ViewConfig::default();
        assert_eq!(c.fov_degrees, 70.0);
        assert_eq!(c.near, 0.01);
        assert_eq!(c.far, 100.0);
        assert_eq!(c.spin_divisor_ms, 700.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_collapsed_depth_range() {
        assert_eq!(
            ViewConfig::new().depth_range(5.0, 5.0).validate(),
            Err(ConfigError::DepthRange {
                near: 5.0,
                far: 5.0
            })
        );
        assert!(ViewConfig::new().depth_range(0.0, 10.0).validate().is_err());
        assert!(ViewConfig::new().depth_range(f32::NAN, 10.0).validate().is_err());
    }

    #[test]
    fn rejects_bad_fov_and_speed() {
        assert_eq!(
            ViewConfig::new().fov(180.0).validate(),
            Err(ConfigError::FieldOfView(180.0))
        );
        assert_eq!(
            ViewConfig::new().spin_divisor(0.0).validate(),
            Err(ConfigError::SpinDivisor(0.0))
        );
        assert!(ViewConfig::new().tilt(f32::INFINITY).validate().is_err());
    }
}
