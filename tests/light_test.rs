use cgmath::{Matrix4, SquareMatrix, Vector3};
use farmstead::{
    config::{FogConfig, ViewerConfig},
    data_structures::light::{
        DirectionalLight, Fog, LightUniform, PointLight, SceneLights, Sun,
    },
    scene,
};

use crate::common::test_utils::{assert_approx, assert_vec3_eq};

mod common;

fn lit_by(angle: f32) -> DirectionalLight {
    let mut light = DirectionalLight::default();
    Sun::new(angle, 0.0).apply(&mut light);
    light
}

fn farmstead_lights() -> SceneLights {
    let config = ViewerConfig::default();
    let mut directional = DirectionalLight::default();
    Sun::new(config.sun_angle, config.sun_speed).apply(&mut directional);
    SceneLights {
        ambient: config.ambient_light.into(),
        specular_power: config.specular_power,
        directional,
        point: scene::point_light(),
        fog: Fog::from(&config.fog),
    }
}

#[test]
fn sun_near_the_horizon_is_dim_and_orange() {
    let light = lit_by(-85.0);
    assert_approx(light.intensity, 0.5);
    assert_vec3_eq(light.colour, (1.0, 0.9, 0.5));
    assert_approx(light.direction.x, (-85.0f32).to_radians().sin());
    assert_approx(light.direction.y, (-85.0f32).to_radians().cos());
    assert_approx(light.direction.z, 1.0);
}

#[test]
fn sun_at_noon_is_full_white() {
    let light = lit_by(0.0);
    assert_approx(light.intensity, 1.0);
    assert_vec3_eq(light.colour, (1.0, 1.0, 1.0));
    assert_vec3_eq(light.direction, (0.0, 1.0, 1.0));
}

#[test]
fn sun_leaving_the_horizon_turns_white_again() {
    let mut light = lit_by(85.0);
    assert_approx(light.intensity, 0.5);
    Sun::new(30.0, 0.0).apply(&mut light);
    assert_vec3_eq(light.colour, (1.0, 1.0, 1.0));
}

#[test]
fn sun_below_the_horizon_gives_no_light() {
    assert_approx(lit_by(120.0).intensity, 0.0);
    assert_approx(lit_by(90.0).intensity, 0.0);
}

#[test]
fn sun_wraps_back_to_sunrise() {
    let mut sun = Sun::new(359.5, 1.0);
    sun.advance(1.0);
    assert_approx(sun.angle, -90.0);
}

#[test]
fn still_sun_does_not_move() {
    let mut sun = Sun::new(-85.0, 0.0);
    for _ in 0..1000 {
        sun.advance(0.016);
    }
    assert_approx(sun.angle, -85.0);
}

#[test]
fn sun_advances_by_speed_times_time() {
    let mut sun = Sun::new(10.0, 4.0);
    sun.advance(0.5);
    assert_approx(sun.angle, 12.0);
}

#[test]
fn light_uniform_is_padded_for_the_shader() {
    let size = std::mem::size_of::<LightUniform>();
    assert_eq!(size, 112);
    assert_eq!(size % 16, 0);
}

#[test]
fn identity_view_keeps_world_values() {
    let lights = farmstead_lights();
    let uniform = LightUniform::new(&lights, &Matrix4::identity());
    assert_eq!(uniform.point_position, scene::POINT_LIGHT_POSITION);
    assert_eq!(uniform.point_colour, scene::POINT_LIGHT_COLOUR);
    assert_eq!(uniform.point_intensity, scene::POINT_LIGHT_INTENSITY);
    assert_eq!(uniform.dir_direction, Into::<[f32; 3]>::into(lights.directional.direction));
    assert_eq!(uniform.ambient, [0.3, 0.3, 0.3]);
    assert_eq!(uniform.specular_power, 10.0);
}

#[test]
fn view_moves_the_point_light_but_not_the_direction() {
    let lights = farmstead_lights();
    let view = Matrix4::from_translation(Vector3::new(10.0, 0.0, -5.0));
    let uniform = LightUniform::new(&lights, &view);
    assert_vec3_eq(uniform.point_position.into(), (-100.0, -134.3, 49.5));
    assert_vec3_eq(uniform.dir_direction.into(), lights.directional.direction);
}

#[test]
fn view_rotation_turns_the_direction() {
    let mut lights = farmstead_lights();
    lights.directional.direction = Vector3::new(1.0, 0.0, 0.0);
    let view = Matrix4::from_angle_z(cgmath::Deg(90.0));
    let uniform = LightUniform::new(&lights, &view);
    assert_vec3_eq(uniform.dir_direction.into(), (0.0, 1.0, 0.0));
}

#[test]
fn fog_defaults_are_packed() {
    let uniform = LightUniform::new(&farmstead_lights(), &Matrix4::identity());
    assert_eq!(uniform.fog_active, 1);
    assert_approx(uniform.fog_density, 0.003);
    assert_eq!(uniform.fog_colour, [0.5, 0.5, 0.5]);
}

#[test]
fn inactive_fog_is_flagged_off() {
    let mut lights = farmstead_lights();
    lights.fog = Fog::from(&FogConfig {
        active: false,
        ..Default::default()
    });
    let uniform = LightUniform::new(&lights, &Matrix4::identity());
    assert_eq!(uniform.fog_active, 0);
}

#[test]
fn point_light_attenuation_is_quadratic() {
    let light = PointLight::new((1.0, 1.0, 1.0), (0.0, 0.0, 0.0), 1.0);
    assert_eq!(light.attenuation.constant, 0.0);
    assert_eq!(light.attenuation.linear, 0.0);
    assert_eq!(light.attenuation.exponent, 1.0);
}

#[test]
fn point_light_colour_accumulates_adjustments() {
    let mut light = scene::point_light();
    light.adjust_colour(Vector3::new(0.1, -0.1, 0.0));
    light.adjust_colour(Vector3::new(0.1, 0.0, 0.1));
    assert_vec3_eq(light.colour, (15.7, 46.4, 65.1));
}

#[test]
fn backwards_sun_wraps_into_night_instead_of_going_negative() {
    let mut sun = Sun::new(-85.0, -10.0);
    let mut light = DirectionalLight::default();
    for _ in 0..200 {
        sun.advance(0.016);
        sun.apply(&mut light);
        assert!(light.intensity >= 0.0, "angle {} gave {}", sun.angle, light.intensity);
        assert!(sun.angle >= -90.0 && sun.angle <= 360.0, "angle {}", sun.angle);
    }
}

#[test]
fn backwards_sun_wraps_to_360() {
    let mut sun = Sun::new(-89.5, -1.0);
    sun.advance(1.0);
    assert_approx(sun.angle, 360.0);
    assert_approx(lit_by(sun.angle).intensity, 0.0);
}

#[test]
fn horizon_factor_is_clamped() {
    assert_approx(lit_by(-95.0).intensity, 0.0);
}
