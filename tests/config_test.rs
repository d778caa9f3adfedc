use std::path::PathBuf;

use farmstead::config::ViewerConfig;

fn parse(flags: &[&str]) -> anyhow::Result<ViewerConfig> {
    ViewerConfig::try_parse_from(std::iter::once("farmstead").chain(flags.iter().copied()))
}

#[test]
fn defaults_describe_the_farmstead() {
    let config = ViewerConfig::default();
    assert_eq!(config.title, "Farmstead");
    assert_eq!((config.width, config.height), (1280, 760));
    assert!(!config.fullscreen);
    assert_eq!(config.clear_colour, wgpu::Color { r: 1.0, g: 0.5, b: 0.0, a: 1.0 });
    assert_eq!(config.tick_duration_millis, 16);
    assert_eq!(config.fovy, 70.0);
    assert_eq!((config.znear, config.zfar), (0.1, 5000.0));
    assert_eq!(config.ambient_light, [0.3, 0.3, 0.3]);
    assert_eq!(config.specular_power, 10.0);
    assert!(config.fog.active);
    assert_eq!(config.fog.density, 0.003);
    assert_eq!(config.sun_angle, -85.0);
    assert_eq!(config.sun_speed, 0.0);
}

#[test]
fn no_flags_gives_defaults() {
    assert_eq!(parse(&[]).unwrap(), ViewerConfig::default());
}

#[test]
fn unknown_flags_are_an_error() {
    assert!(parse(&["--colour", "blue"]).is_err());
}

#[test]
fn asset_root_is_overridable() {
    let config = parse(&["--assets", "/srv/farm"]).unwrap();
    assert_eq!(config.asset_root, PathBuf::from("/srv/farm"));
    assert_eq!(
        config.asset_path("models/barn/barn.obj"),
        PathBuf::from("/srv/farm/models/barn/barn.obj")
    );
}

#[test]
fn fullscreen_flag_accepts_common_spellings() {
    for on in ["1", "true", "TRUE", " yes ", "on"] {
        assert!(parse(&["--fullscreen", on]).unwrap().fullscreen, "{on:?}");
    }
    for off in ["0", "false", "no", "off"] {
        assert!(!parse(&["--fullscreen", off]).unwrap().fullscreen, "{off:?}");
    }
}

#[test]
fn fullscreen_flag_rejects_garbage() {
    let err = parse(&["--fullscreen", "maybe"]).unwrap_err();
    assert!(err.to_string().contains("maybe"));
}

#[test]
fn fog_can_be_switched_off() {
    let config = parse(&["--fog", "Off"]).unwrap();
    assert!(!config.fog.active);
    assert_eq!(config.fog.density, 0.003);
}

#[test]
fn fog_density_is_overridable() {
    let config = parse(&["--fog", "0.01"]).unwrap();
    assert!(config.fog.active);
    assert_eq!(config.fog.density, 0.01);
}

#[test]
fn negative_fog_density_is_an_error() {
    assert!(parse(&["--fog=-0.5"]).is_err());
}

#[test]
fn malformed_fog_is_an_error() {
    let err = parse(&["--fog", "thick"]).unwrap_err();
    assert!(err.to_string().contains("thick"));
}

#[test]
fn fog_density_must_be_finite() {
    for value in ["NaN", "nan", "inf", "infinity"] {
        assert!(parse(&["--fog", value]).is_err(), "{value:?}");
    }
}

#[test]
fn sun_speed_is_parsed() {
    assert_eq!(parse(&["--sun-speed", "12.5"]).unwrap().sun_speed, 12.5);
    assert_eq!(parse(&["--sun-speed", "-10"]).unwrap().sun_speed, -10.0);
    assert!(parse(&["--sun-speed", "fast"]).is_err());
}

#[test]
fn sun_speed_must_be_finite() {
    for value in ["NaN", "inf", "-inf"] {
        assert!(parse(&["--sun-speed", value]).is_err(), "{value:?}");
    }
}
