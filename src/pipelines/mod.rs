//! Render pipelines and the shaders they are built from.
//!
//! - `basic` holds the shared pipeline builder and the lit scene pipeline
//! - `skybox` draws the unlit sky cube behind everything
//! - `light` owns the lighting uniform buffer and its bind group

pub mod basic;
pub mod light;
pub mod skybox;

/// Every pipeline the farmstead needs, created once per device.
#[derive(Debug)]
pub struct Pipelines {
    pub scene: wgpu::RenderPipeline,
    pub skybox: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        material_layout: &wgpu::BindGroupLayout,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        light_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        Self {
            scene: basic::mk_scene_pipeline(
                device,
                config,
                material_layout,
                camera_bind_group_layout,
                light_bind_group_layout,
            ),
            skybox: skybox::mk_skybox_pipeline(
                device,
                config,
                material_layout,
                camera_bind_group_layout,
            ),
        }
    }
}
