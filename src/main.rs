use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use turntable::{
    AppConfig, FrameParameters, ParamError, ParamField, Primitive, TextureSource, ViewConfig,
};

/// Interactive viewer for a cube, a quad or an octahedron.
///
/// Numeric values are parsed leniently: a value that does not parse is
/// reported and the default is kept.
#[derive(Debug, Parser)]
#[command(name = "turntable", version, about)]
struct Cli {
    /// Primitive to display (cube, quad, octahedron).
    #[arg(long, default_value = "cube")]
    primitive: Primitive,

    /// Object color as #RRGGBB.
    #[arg(long)]
    color: Option<String>,

    /// Scale along X, Y and Z (cube only).
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_hyphen_values = true)]
    scale: Option<Vec<String>>,

    /// Distance along the view axis.
    #[arg(long, allow_hyphen_values = true)]
    translate_z: Option<String>,

    /// Starting rotation angle in radians.
    #[arg(long, allow_hyphen_values = true)]
    angle: Option<String>,

    /// Start spinning.
    #[arg(long)]
    spin: bool,

    /// Set any parameter by name, e.g. `--set translate-x=0.5`.
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    sets: Vec<String>,

    /// Vertical field of view in degrees.
    #[arg(long, default_value_t = 70.0)]
    fov: f32,

    /// Tilt about the X axis in degrees.
    #[arg(long, allow_hyphen_values = true)]
    tilt: Option<f32>,

    /// Image file to use as the texture.
    #[arg(long, conflicts_with = "untextured")]
    texture: Option<PathBuf>,

    /// Draw without a texture.
    #[arg(long)]
    untextured: bool,

    /// Window width in logical pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Window height in logical pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,
}

impl Cli {
    fn params(&self) -> FrameParameters {
        let mut params = FrameParameters::new().spinning(self.spin);

        let mut assignments: Vec<(ParamField, &str)> = Vec::new();
        if let Some(scale) = &self.scale {
            let axes = [ParamField::ScaleX, ParamField::ScaleY, ParamField::ScaleZ];
            assignments.extend(axes.into_iter().zip(scale.iter().map(String::as_str)));
        }
        if let Some(z) = &self.translate_z {
            assignments.push((ParamField::TranslateZ, z));
        }
        if let Some(angle) = &self.angle {
            assignments.push((ParamField::Angle, angle));
        }
        if let Some(color) = &self.color {
            assignments.push((ParamField::Color, color));
        }

        for (field, text) in assignments {
            if let Err(err) = params.set_from_str(field, text) {
                log::warn!("{}; keeping {}", err, field);
            }
        }

        for set in &self.sets {
            if let Err(err) = apply_assignment(&mut params, set) {
                log::warn!("ignoring --set {}: {}", set, err);
            }
        }

        params
    }

    fn view(&self) -> ViewConfig {
        let view = ViewConfig::new().fov(self.fov);
        match self.tilt {
            Some(degrees) => view.tilt(degrees.to_radians()),
            None => view,
        }
    }

    fn texture(&self) -> TextureSource {
        match (&self.texture, self.untextured) {
            (Some(path), _) => TextureSource::File(path.clone()),
            (None, true) => TextureSource::Untextured,
            (None, false) => TextureSource::Auto,
        }
    }
}

fn apply_assignment(params: &mut FrameParameters, text: &str) -> Result<(), ParamError> {
    let (field, value) = text
        .split_once('=')
        .ok_or_else(|| ParamError::UnknownField(text.to_string()))?;
    params.set_from_str(field.parse()?, value)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AppConfig::new()
        .size(cli.width, cli.height)
        .primitive(cli.primitive)
        .texture(cli.texture())
        .params(cli.params())
        .view(cli.view());

    match turntable::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
