//! Keyboard bindings that edit [`FrameParameters`] between frames.
//!
//! | Key              | Effect                                   |
//! |------------------|------------------------------------------|
//! | Space            | toggle spin                              |
//! | Left / Right     | manual angle, 1 rad/s                    |
//! | Up / Down, wheel | translation z, clamped to `[1, 20]`      |
//! | X / Y / Z        | grow that scale axis (Shift shrinks)     |
//! | 1 – 6            | color palette                            |
//! | R                | reset to the starting parameters         |

use crate::input::Input;
use crate::params::{FrameParameters, Rgb, parse_hex_color, to_hex_color};
use glam::Vec3;
use winit::keyboard::KeyCode;

/// Radians per second while an arrow key is held.
const ANGLE_RATE: f32 = 1.0;
/// Units per second while Up/Down is held.
const DEPTH_RATE: f32 = 2.0;
/// Units per scroll line.
const DEPTH_PER_LINE: f32 = 0.25;
/// Scale units per second while X/Y/Z is held.
const SCALE_RATE: f32 = 1.0;

pub const MIN_DEPTH: f32 = 1.0;
pub const MAX_DEPTH: f32 = 20.0;

const PALETTE: [&str; 6] = ["#ffffff", "#ff8000", "#3399ff", "#66cc66", "#cc3366", "#ffcc00"];
const PALETTE_KEYS: [KeyCode; 6] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
];

/// Applies key bindings to a parameter set.
#[derive(Debug)]
pub struct Controls {
    initial: FrameParameters,
    palette: Vec<Rgb>,
}

impl Controls {
    /// `initial` is what `R` resets to.
    pub fn new(initial: FrameParameters) -> Self {
        let palette = PALETTE
            .iter()
            .filter_map(|hex| parse_hex_color(hex).ok())
            .collect();
        Self { initial, palette }
    }

    /// Updates `params` from this frame's input; `dt` is in seconds.
    ///
    /// Returns true if anything changed.
    pub fn apply(&self, input: &Input, params: &mut FrameParameters, dt: f32) -> bool {
        let before = *params;

        if input.key_pressed(KeyCode::KeyR) {
            *params = self.initial;
            log::info!("parameters reset");
            return *params != before;
        }

        if input.key_pressed(KeyCode::Space) {
            params.spinning = !params.spinning;
            log::info!("spin {}", if params.spinning { "on" } else { "off" });
        }

        let turn = axis(input, KeyCode::ArrowRight, KeyCode::ArrowLeft);
        if turn != 0.0 && !params.spinning {
            params.angle += turn * ANGLE_RATE * dt;
        }

        let depth = axis(input, KeyCode::ArrowUp, KeyCode::ArrowDown) * DEPTH_RATE * dt
            + input.scroll_delta() * DEPTH_PER_LINE;
        if depth != 0.0 {
            params.translation.z = (params.translation.z + depth).clamp(MIN_DEPTH, MAX_DEPTH);
        }

        let shrink = input.key_down(KeyCode::ShiftLeft) || input.key_down(KeyCode::ShiftRight);
        let sign = if shrink { -1.0 } else { 1.0 };
        let grow = Vec3::new(
            held(input, KeyCode::KeyX),
            held(input, KeyCode::KeyY),
            held(input, KeyCode::KeyZ),
        );
        if grow != Vec3::ZERO {
            params.scale += grow * sign * SCALE_RATE * dt;
        }

        for (key, color) in PALETTE_KEYS.iter().zip(&self.palette) {
            if input.key_pressed(*key) {
                params.color = *color;
                log::info!("color {}", to_hex_color(*color));
            }
        }

        *params = params.sanitized();
        *params != before
    }
}

fn held(input: &Input, key: KeyCode) -> f32 {
    if input.key_down(key) { 1.0 } else { 0.0 }
}

fn axis(input: &Input, positive: KeyCode, negative: KeyCode) -> f32 {
    held(input, positive) - held(input, negative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::ElementState;

    fn pressed(keys: &[KeyCode]) -> Input {
        let mut input = Input::new();
        for key in keys {
            input.key_event(*key, ElementState::Pressed);
        }
        input
    }

    #[test]
    fn space_toggles_spin() {
        let controls = Controls::new(FrameParameters::default());
        let mut params = FrameParameters::default();

        assert!(controls.apply(&pressed(&[KeyCode::Space]), &mut params, 0.016));
        assert!(params.spinning);
        controls.apply(&pressed(&[KeyCode::Space]), &mut params, 0.016);
        assert!(!params.spinning);
    }

    #[test]
    fn arrows_turn_only_in_manual_mode() {
        let controls = Controls::new(FrameParameters::default());
        let input = pressed(&[KeyCode::ArrowRight]);

        let mut params = FrameParameters::default();
        controls.apply(&input, &mut params, 0.5);
        assert!((params.angle - 0.5).abs() < 1e-6);

        let mut spinning = FrameParameters::default().spinning(true);
        assert!(!controls.apply(&input, &mut spinning, 0.5));
        assert_eq!(spinning.angle, 0.0);
    }

    #[test]
    fn depth_is_clamped() {
        let controls = Controls::new(FrameParameters::default());
        let mut params = FrameParameters::default();
        controls.apply(&pressed(&[KeyCode::ArrowDown]), &mut params, 10.0);
        assert_eq!(params.translation.z, MIN_DEPTH);
        controls.apply(&pressed(&[KeyCode::ArrowUp]), &mut params, 100.0);
        assert_eq!(params.translation.z, MAX_DEPTH);
    }

    #[test]
    fn shift_shrinks_scale() {
        let controls = Controls::new(FrameParameters::default());
        let mut params = FrameParameters::default();

        controls.apply(&pressed(&[KeyCode::KeyX]), &mut params, 0.5);
        assert_eq!(params.scale, Vec3::new(1.5, 1.0, 1.0));

        controls.apply(&pressed(&[KeyCode::ShiftLeft, KeyCode::KeyY]), &mut params, 0.25);
        assert_eq!(params.scale, Vec3::new(1.5, 0.75, 1.0));
    }

    #[test]
    fn palette_and_reset() {
        let initial = FrameParameters::default().angle(0.3);
        let controls = Controls::new(initial);
        let mut params = initial;

        controls.apply(&pressed(&[KeyCode::Digit2]), &mut params, 0.016);
        assert_eq!(to_hex_color(params.color), "#ff8000");

        params.spinning = true;
        controls.apply(&pressed(&[KeyCode::KeyR]), &mut params, 0.016);
        assert_eq!(params, initial);
    }

    #[test]
    fn idle_input_changes_nothing() {
        let controls = Controls::new(FrameParameters::default());
        let mut params = FrameParameters::default();
        assert!(!controls.apply(&Input::new(), &mut params, 0.016));
    }
}
