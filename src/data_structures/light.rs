//! Light sources, fog and the uniform they are packed into.
//!
//! The farmstead is lit by one ambient term, one directional light driven by
//! the [`Sun`] and one attenuated point light sitting next to the cottage.
//! Directions and positions are handed to the shader in view space.

use cgmath::{Matrix4, Vector3, Vector4};

use crate::config::FogConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub exponent: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointLight {
    pub colour: Vector3<f32>,
    pub position: Vector3<f32>,
    pub intensity: f32,
    pub attenuation: Attenuation,
}

impl PointLight {
    pub fn new(
        colour: impl Into<Vector3<f32>>,
        position: impl Into<Vector3<f32>>,
        intensity: f32,
    ) -> Self {
        Self {
            colour: colour.into(),
            position: position.into(),
            intensity,
            attenuation: Attenuation {
                constant: 0.0,
                linear: 0.0,
                exponent: 1.0,
            },
        }
    }

    pub fn adjust_colour(&mut self, delta: Vector3<f32>) {
        self.colour += delta;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    pub colour: Vector3<f32>,
    pub direction: Vector3<f32>,
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            colour: Vector3::new(1.0, 1.0, 1.0),
            direction: Vector3::new(0.0, 0.0, 1.0),
            intensity: 1.0,
        }
    }
}

/// Drives the directional light from an angle in degrees.
///
/// Around the horizon (|angle| >= 80) the light fades and turns orange, past
/// 90 degrees it is night until the angle wraps from 360 back to -90. The
/// light never gets a negative intensity.
#[derive(Clone, Debug, PartialEq)]
pub struct Sun {
    pub angle: f32,
    /// Degrees per second.
    pub speed: f32,
}

impl Sun {
    pub fn new(angle: f32, speed: f32) -> Self {
        Self { angle, speed }
    }

    /// Running backwards, the sun wraps from -90 to 360 and sets into night.
    pub fn advance(&mut self, dt_secs: f32) {
        self.angle += self.speed * dt_secs;
        if self.angle >= 360.0 {
            self.angle = -90.0;
        } else if self.angle < -90.0 {
            self.angle = 360.0;
        }
    }

    pub fn apply(&self, light: &mut DirectionalLight) {
        if self.angle > 90.0 {
            light.intensity = 0.0;
        } else if self.angle <= -80.0 || self.angle >= 80.0 {
            let factor = (1.0 - (self.angle.abs() - 80.0) / 10.0).clamp(0.0, 1.0);
            light.intensity = factor;
            light.colour.y = factor.max(0.9);
            light.colour.z = factor.max(0.5);
        } else {
            light.intensity = 1.0;
            light.colour = Vector3::new(1.0, 1.0, 1.0);
        }
        let radians = self.angle.to_radians();
        light.direction.x = radians.sin();
        light.direction.y = radians.cos();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fog {
    pub active: bool,
    pub colour: Vector3<f32>,
    pub density: f32,
}

impl From<&FogConfig> for Fog {
    fn from(config: &FogConfig) -> Self {
        Self {
            active: config.active,
            colour: config.colour.into(),
            density: config.density,
        }
    }
}

/// Everything the lit pipeline needs besides camera and material.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneLights {
    pub ambient: Vector3<f32>,
    pub specular_power: f32,
    pub directional: DirectionalLight,
    pub point: PointLight,
    pub fog: Fog,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub ambient: [f32; 3],
    pub specular_power: f32,
    pub dir_colour: [f32; 3],
    pub dir_intensity: f32,
    pub dir_direction: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    pub _padding: u32,
    pub point_colour: [f32; 3],
    pub point_intensity: f32,
    pub point_position: [f32; 3],
    pub att_constant: f32,
    pub att_linear: f32,
    pub att_exponent: f32,
    pub fog_active: u32,
    pub fog_density: f32,
    pub fog_colour: [f32; 3],
    pub _padding2: u32,
}

impl LightUniform {
    /// Packs the lights, moving the directional light direction and the point
    /// light position into the space described by `view`.
    pub fn new(lights: &SceneLights, view: &Matrix4<f32>) -> Self {
        let direction = *view * lights.directional.direction.extend(0.0);
        let point = lights.point.position;
        let point = *view * Vector4::new(point.x, point.y, point.z, 1.0);
        Self {
            ambient: lights.ambient.into(),
            specular_power: lights.specular_power,
            dir_colour: lights.directional.colour.into(),
            dir_intensity: lights.directional.intensity,
            dir_direction: direction.truncate().into(),
            _padding: 0,
            point_colour: lights.point.colour.into(),
            point_intensity: lights.point.intensity,
            point_position: point.truncate().into(),
            att_constant: lights.point.attenuation.constant,
            att_linear: lights.point.attenuation.linear,
            att_exponent: lights.point.attenuation.exponent,
            fog_active: lights.fog.active as u32,
            fog_density: lights.fog.density,
            fog_colour: lights.fog.colour.into(),
            _padding2: 0,
        }
    }
}
