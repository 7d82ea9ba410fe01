//! User-adjustable frame parameters and their text parsing.
//!
//! [`FrameParameters`] is the explicit input of every composer tick. Values can
//! be set directly, or from text (as typed into a field or passed on the
//! command line) through [`FrameParameters::set_from_str`]. Text that does not
//! parse is rejected and the previous value stays, so a bad edit never turns
//! into NaN inside the uniforms.

use glam::Vec3;
use std::fmt;
use std::str::FromStr;

/// Smallest accepted scale per axis.
pub const MIN_SCALE: f32 = 0.01;
/// Largest accepted scale per axis.
pub const MAX_SCALE: f32 = 10.0;
/// Translation components are clamped to `[-TRANSLATION_LIMIT, TRANSLATION_LIMIT]`.
pub const TRANSLATION_LIMIT: f32 = 100.0;

/// Errors from parsing parameter text.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParamError {
    #[error("'{text}' is not a number (field {field})")]
    InvalidNumber { field: ParamField, text: String },
    #[error("{field} must be finite")]
    NonFinite { field: ParamField },
    #[error("'{0}' is not a #RRGGBB color")]
    InvalidColor(String),
    #[error("'{0}' is not a boolean (use on/off, true/false or 1/0)")]
    InvalidFlag(String),
    #[error("unknown parameter '{0}'")]
    UnknownField(String),
}

/// RGB color with components in `[0, 1]`.
pub type Rgb = [f32; 3];

/// Everything the composer reads from the outside world each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParameters {
    /// Per-axis scale of the cube's vertices.
    pub scale: Vec3,
    /// Model translation.
    pub translation: Vec3,
    /// Manual rotation angle in radians; written back while spinning.
    pub angle: f32,
    /// Spin mode switch.
    pub spinning: bool,
    /// Surface color.
    pub color: Rgb,
}

impl Default for FrameParameters {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            translation: Vec3::new(0.0, 0.0, 2.0),
            angle: 0.0,
            spinning: false,
            color: [1.0, 1.0, 1.0],
        }
    }
}

impl FrameParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn spinning(mut self, spinning: bool) -> Self {
        self.spinning = spinning;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Parses `text` into `field`. On error nothing changes.
    pub fn set_from_str(&mut self, field: ParamField, text: &str) -> Result<(), ParamError> {
        match field {
            ParamField::ScaleX => self.scale.x = parse_number(field, text)?,
            ParamField::ScaleY => self.scale.y = parse_number(field, text)?,
            ParamField::ScaleZ => self.scale.z = parse_number(field, text)?,
            ParamField::TranslateX => self.translation.x = parse_number(field, text)?,
            ParamField::TranslateY => self.translation.y = parse_number(field, text)?,
            ParamField::TranslateZ => self.translation.z = parse_number(field, text)?,
            ParamField::Angle => self.angle = parse_number(field, text)?,
            ParamField::Spin => self.spinning = parse_flag(text)?,
            ParamField::Color => self.color = parse_hex_color(text)?,
        }
        *self = self.sanitized();
        Ok(())
    }

    /// Returns a copy with every value finite and in range.
    ///
    /// Non-finite components fall back to the default; scale is clamped to
    /// `[MIN_SCALE, MAX_SCALE]`, translation to `±TRANSLATION_LIMIT` and color
    /// to `[0, 1]`.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();

        let scale = Vec3::select(
            self.scale.is_finite_mask(),
            self.scale,
            defaults.scale,
        )
        .clamp(Vec3::splat(MIN_SCALE), Vec3::splat(MAX_SCALE));

        let translation = Vec3::select(
            self.translation.is_finite_mask(),
            self.translation,
            defaults.translation,
        )
        .clamp(
            Vec3::splat(-TRANSLATION_LIMIT),
            Vec3::splat(TRANSLATION_LIMIT),
        );

        let angle = if self.angle.is_finite() {
            self.angle
        } else {
            defaults.angle
        };

        let color = self
            .color
            .map(|c| if c.is_finite() { c.clamp(0.0, 1.0) } else { 1.0 });

        Self {
            scale,
            translation,
            angle,
            spinning: self.spinning,
            color,
        }
    }
}

/// A single text-settable parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamField {
    ScaleX,
    ScaleY,
    ScaleZ,
    TranslateX,
    TranslateY,
    TranslateZ,
    Angle,
    Spin,
    Color,
}

impl ParamField {
    pub fn name(self) -> &'static str {
        match self {
            ParamField::ScaleX => "scale-x",
            ParamField::ScaleY => "scale-y",
            ParamField::ScaleZ => "scale-z",
            ParamField::TranslateX => "translate-x",
            ParamField::TranslateY => "translate-y",
            ParamField::TranslateZ => "translate-z",
            ParamField::Angle => "angle",
            ParamField::Spin => "spin",
            ParamField::Color => "color",
        }
    }

    const ALL: [ParamField; 9] = [
        ParamField::ScaleX,
        ParamField::ScaleY,
        ParamField::ScaleZ,
        ParamField::TranslateX,
        ParamField::TranslateY,
        ParamField::TranslateZ,
        ParamField::Angle,
        ParamField::Spin,
        ParamField::Color,
    ];
}

impl fmt::Display for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamField {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamField::ALL
            .into_iter()
            .find(|f| f.name() == s.trim())
            .ok_or_else(|| ParamError::UnknownField(s.to_string()))
    }
}

/// Parses `#RRGGBB` (the `#` is optional) into components divided by 255.
pub fn parse_hex_color(text: &str) -> Result<Rgb, ParamError> {
    let trimmed = text.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParamError::InvalidColor(text.to_string()));
    }
    let n = u32::from_str_radix(hex, 16).map_err(|_| ParamError::InvalidColor(text.to_string()))?;

    let channel = |shift: u32| ((n >> shift) & 0xff) as f32 / 255.0;
    Ok([channel(16), channel(8), channel(0)])
}

/// Formats a color as `#rrggbb`, rounding each channel to the nearest step.
pub fn to_hex_color(color: Rgb) -> String {
    let [r, g, b] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn parse_number(field: ParamField, text: &str) -> Result<f32, ParamError> {
    let value: f32 = text
        .trim()
        .parse()
        .map_err(|_| ParamError::InvalidNumber {
            field,
            text: text.to_string(),
        })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParamError::NonFinite { field })
    }
}

fn parse_flag(text: &str) -> Result<bool, ParamError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ParamError::InvalidFlag(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 1.0 / 255.0;

    #[test]
    fn hex_color_to_unit_rgb() {
        let [r, g, b] = parse_hex_color("#FF8000").unwrap();
        assert!((r - 1.0).abs() < STEP);
        assert!((g - 0.5019).abs() < STEP);
        assert!(b.abs() < STEP);
    }

    #[test]
    fn hex_color_without_hash_and_lowercase() {
        assert_eq!(parse_hex_color("00ff00").unwrap(), [0.0, 1.0, 0.0]);
        assert_eq!(parse_hex_color(" #ffffff ").unwrap(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn bad_hex_colors_are_rejected() {
        for text in ["", "#", "#12345", "#1234567", "#GG0000", "red", "#+12345"] {
            assert!(
                matches!(parse_hex_color(text), Err(ParamError::InvalidColor(_))),
                "{:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(to_hex_color([1.0, 0.5019608, 0.0]), "#ff8000");
        assert_eq!(to_hex_color([2.0, -1.0, 0.2]), "#ff0033");
    }

    #[test]
    fn set_from_str_updates_field() {
        let mut p = FrameParameters::default();
        p.set_from_str(ParamField::ScaleX, "2.5").unwrap();
        p.set_from_str(ParamField::TranslateZ, " 4 ").unwrap();
        p.set_from_str(ParamField::Angle, "1.2").unwrap();
        p.set_from_str(ParamField::Spin, "on").unwrap();
        p.set_from_str(ParamField::Color, "#336699").unwrap();

        assert_eq!(p.scale, Vec3::new(2.5, 1.0, 1.0));
        assert_eq!(p.translation.z, 4.0);
        assert_eq!(p.angle, 1.2);
        assert!(p.spinning);
        assert_eq!(to_hex_color(p.color), "#336699");
    }

    #[test]
    fn unparseable_text_keeps_previous_value() {
        let mut p = FrameParameters::default().scale(Vec3::new(1.5, 1.0, 1.0));

        let err = p.set_from_str(ParamField::ScaleX, "abc").unwrap_err();
        assert_eq!(
            err,
            ParamError::InvalidNumber {
                field: ParamField::ScaleX,
                text: "abc".into()
            }
        );
        assert_eq!(p.scale.x, 1.5);

        assert_eq!(
            p.set_from_str(ParamField::Angle, "NaN"),
            Err(ParamError::NonFinite {
                field: ParamField::Angle
            })
        );
        assert_eq!(p.angle, 0.0);

        assert!(p.set_from_str(ParamField::Spin, "maybe").is_err());
        assert!(!p.spinning);
    }

    #[test]
    fn sanitized_replaces_non_finite_and_clamps() {
        let p = FrameParameters {
            scale: Vec3::new(f32::NAN, 0.0, 50.0),
            translation: Vec3::new(f32::INFINITY, -500.0, 3.0),
            angle: f32::NAN,
            spinning: true,
            color: [1.5, f32::NAN, -0.2],
        }
        .sanitized();

        assert_eq!(p.scale, Vec3::new(1.0, MIN_SCALE, MAX_SCALE));
        assert_eq!(p.translation, Vec3::new(0.0, -TRANSLATION_LIMIT, 3.0));
        assert_eq!(p.angle, 0.0);
        assert!(p.spinning);
        assert_eq!(p.color, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("scale-y".parse::<ParamField>().unwrap(), ParamField::ScaleY);
        assert_eq!("color".parse::<ParamField>().unwrap(), ParamField::Color);
        assert!(matches!(
            "size".parse::<ParamField>(),
            Err(ParamError::UnknownField(_))
        ));
    }
}
