//! Rotation angle state machine: manual angle or time-driven spin.
//!
//! The machine has two modes. In [`RotationMode::Manual`] the angle is whatever
//! was last set. In [`RotationMode::Spinning`] it advances with wall-clock time:
//!
//! ```text
//! angle = (start_angle + elapsed_seconds * speed) mod 2π
//! ```
//!
//! Switching into spin captures the current angle as `start_angle` and the
//! switch time as `start_time`, so the first spinning frame shows exactly the
//! angle the manual mode left behind. Switching back keeps the last computed
//! angle.
//!
//! Time is passed in as a [`Duration`] since session start, which keeps the
//! machine deterministic under synthetic timestamps.

use crate::config::ConfigError;
use std::f32::consts::TAU;
use std::time::Duration;

/// Default spin divisor: milliseconds of wall-clock time per radian.
pub const DEFAULT_SPIN_DIVISOR_MS: f32 = 700.0;

/// Whether the angle is user-driven or time-driven.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationMode {
    Manual,
    Spinning,
}

/// Animation state owned by the frame composer.
#[derive(Clone, Debug)]
pub struct Animation {
    start_time: Duration,
    start_angle: f32,
    spinning: bool,
    angle: f32,
    /// Radians per second while spinning.
    speed: f64,
}

impl Default for Animation {
    fn default() -> Self {
        Self::with_speed(0.0, 1000.0 / DEFAULT_SPIN_DIVISOR_MS as f64)
    }
}

impl Animation {
    /// Starts in manual mode at `angle`.
    ///
    /// `spin_divisor_ms` is how many milliseconds it takes to sweep one radian;
    /// it must be positive and finite.
    pub fn new(angle: f32, spin_divisor_ms: f32) -> Result<Self, ConfigError> {
        if !(spin_divisor_ms > 0.0 && spin_divisor_ms.is_finite()) {
            return Err(ConfigError::SpinDivisor(spin_divisor_ms));
        }
        Ok(Self::with_speed(angle, 1000.0 / spin_divisor_ms as f64))
    }

    fn with_speed(angle: f32, speed: f64) -> Self {
        Self {
            start_time: Duration::ZERO,
            start_angle: 0.0,
            spinning: false,
            angle: wrap_angle(angle),
            speed,
        }
    }

    pub fn mode(&self) -> RotationMode {
        if self.spinning {
            RotationMode::Spinning
        } else {
            RotationMode::Manual
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// The angle produced by the most recent update, in `[0, 2π)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Sets the manual angle. Ignored while spinning; returns whether it applied.
    pub fn set_angle(&mut self, angle: f32) -> bool {
        if self.spinning {
            return false;
        }
        self.angle = wrap_angle(angle);
        true
    }

    /// Enables or disables spin at time `now`.
    ///
    /// Enabling rebases the spin on the current angle. Disabling freezes the
    /// angle at its last computed value. Repeating the current mode is a no-op.
    pub fn set_spinning(&mut self, spinning: bool, now: Duration) {
        if spinning == self.spinning {
            return;
        }

        if spinning {
            self.start_time = now;
            self.start_angle = self.angle;
            log::debug!("spin enabled at {:?} from angle {:.4}", now, self.angle);
        } else {
            log::debug!("spin disabled at angle {:.4}", self.angle);
        }
        self.spinning = spinning;
    }

    /// Advances to `now` and returns the angle to display this frame.
    ///
    /// In manual mode this just returns the stored angle. A `now` earlier than
    /// the spin start counts as zero elapsed time.
    pub fn advance(&mut self, now: Duration) -> f32 {
        if self.spinning {
            let elapsed = now.saturating_sub(self.start_time).as_secs_f64();
            let raw = self.start_angle as f64 + elapsed * self.speed;
            self.angle = wrap_angle(raw.rem_euclid(std::f64::consts::TAU) as f32);
        }
        self.angle
    }
}

/// Wraps `angle` into `[0, 2π)`. Exactly 2π (or anything rounding to it) maps to 0.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}
