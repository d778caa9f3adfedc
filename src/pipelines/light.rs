use cgmath::Matrix4;
use wgpu::util::DeviceExt;

use crate::data_structures::light::{LightUniform, SceneLights, Sun};

/// GPU side of [`SceneLights`]: one uniform buffer rewritten every frame.
#[derive(Debug)]
pub struct LightResources {
    pub lights: SceneLights,
    pub sun: Sun,
    pub uniform: LightUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl LightResources {
    pub fn new(device: &wgpu::Device, lights: SceneLights, sun: Sun, view: &Matrix4<f32>) -> Self {
        let uniform = LightUniform::new(&lights, view);
        let buffer = mk_buffer(device, uniform);
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = mk_bind_group(device, &bind_group_layout, &buffer);
        Self {
            lights,
            sun,
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    /// Moves the sun along and lets it drive the directional light.
    pub fn tick(&mut self, dt_secs: f32) {
        self.sun.advance(dt_secs);
        self.sun.apply(&mut self.lights.directional);
    }

    /// Repacks the lights for the current camera and uploads them.
    pub fn write_to_buffer(&mut self, queue: &wgpu::Queue, view: &Matrix4<f32>) {
        self.uniform = LightUniform::new(&self.lights, view);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Uniform Buffer"),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("light_bind_group_layout"),
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: light_buffer.as_entire_binding(),
        }],
        label: Some("light_bind_group"),
    })
}
