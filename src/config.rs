//! Viewer configuration.
//!
//! All scene constants that are not tied to a specific model live here. The
//! defaults reproduce the farmstead as it is meant to be seen; a handful of
//! them can be overridden from the command line or the environment (see
//! [`ViewerArgs`]).

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use clap::{Parser, error::ErrorKind};

/// Environment variable that points to the directory holding `models/`.
pub const ASSETS_VAR: &str = "FARMSTEAD_ASSETS";
/// Start in borderless fullscreen when set to `1`/`true`.
pub const FULLSCREEN_VAR: &str = "FARMSTEAD_FULLSCREEN";
/// Sun speed in degrees per second, `0` keeps the sun still.
pub const SUN_SPEED_VAR: &str = "FARMSTEAD_SUN_SPEED";
/// Fog density, or `off` to disable fog.
pub const FOG_VAR: &str = "FARMSTEAD_FOG";

#[derive(Clone, Debug, PartialEq)]
pub struct FogConfig {
    pub active: bool,
    pub colour: [f32; 3],
    pub density: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            active: true,
            colour: [0.5, 0.5, 0.5],
            density: 0.003,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub clear_colour: wgpu::Color,
    pub asset_root: PathBuf,
    pub tick_duration_millis: u64,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
    pub ambient_light: [f32; 3],
    pub specular_power: f32,
    pub fog: FogConfig,
    /// Starting sun angle in degrees.
    pub sun_angle: f32,
    /// Degrees per second.
    pub sun_speed: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: String::from("Farmstead"),
            width: 1280,
            height: 760,
            fullscreen: false,
            clear_colour: wgpu::Color {
                r: 1.0,
                g: 0.5,
                b: 0.0,
                a: 1.0,
            },
            asset_root: PathBuf::from("./assets"),
            tick_duration_millis: 16,
            fovy: 70.0,
            znear: 0.1,
            zfar: 5000.0,
            move_speed: 2.0,
            mouse_sensitivity: 0.007,
            ambient_light: [0.3, 0.3, 0.3],
            specular_power: 10.0,
            fog: FogConfig::default(),
            sun_angle: -85.0,
            sun_speed: 0.0,
        }
    }
}

/// Command line and environment overrides. Every flag can also be set through
/// its `FARMSTEAD_*` variable; a flag given on the command line wins.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "farmstead", version, about = "Walk around a small farm scene")]
pub struct ViewerArgs {
    /// Directory holding `models/`
    #[arg(long, env = ASSETS_VAR, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Start in borderless fullscreen
    #[arg(long, env = FULLSCREEN_VAR, value_parser = parse_bool_env)]
    pub fullscreen: Option<bool>,

    /// Sun speed in degrees per second (negative runs the day backwards)
    #[arg(long, env = SUN_SPEED_VAR, allow_negative_numbers = true, value_parser = parse_finite)]
    pub sun_speed: Option<f32>,

    /// Fog density, or `off`
    #[arg(long, env = FOG_VAR, value_parser = parse_fog)]
    pub fog: Option<FogSetting>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FogSetting {
    Off,
    Density(f32),
}

impl ViewerConfig {
    /// Defaults overlaid with the process arguments and `FARMSTEAD_*` variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let args = match ViewerArgs::try_parse() {
            Ok(args) => args,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self::default().with_args(args))
    }

    /// Parses `args` (program name first) the way [`from_env`](Self::from_env) does.
    pub fn try_parse_from<I, T>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = ViewerArgs::try_parse_from(args)?;
        Ok(Self::default().with_args(args))
    }

    pub fn with_args(mut self, args: ViewerArgs) -> Self {
        if let Some(assets) = args.assets {
            self.asset_root = assets;
        }
        if let Some(fullscreen) = args.fullscreen {
            self.fullscreen = fullscreen;
        }
        if let Some(sun_speed) = args.sun_speed {
            self.sun_speed = sun_speed;
        }
        match args.fog {
            Some(FogSetting::Off) => self.fog.active = false,
            Some(FogSetting::Density(density)) => {
                self.fog.active = true;
                self.fog.density = density;
            }
            None => (),
        }
        self
    }

    /// Resolves a path relative to the asset root.
    pub fn asset_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.asset_root.join(relative)
    }
}

fn parse_bool_env(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(format!(
            "Invalid boolean value '{s}'. Expected: 1/0, true/false, yes/no, on/off"
        )),
    }
}

fn parse_finite(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if !value.is_finite() {
        return Err(format!("'{s}' is not a finite number"));
    }
    Ok(value)
}

fn parse_fog(s: &str) -> Result<FogSetting, String> {
    if s.trim().eq_ignore_ascii_case("off") {
        return Ok(FogSetting::Off);
    }
    let density = parse_finite(s).map_err(|e| format!("{e}, expected a fog density or 'off'"))?;
    if density < 0.0 {
        return Err(format!("Fog density must not be negative, got {density}"));
    }
    Ok(FogSetting::Density(density))
}
