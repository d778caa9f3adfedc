use crate::{
    data_structures::{
        instance::InstanceRaw,
        model::{ModelVertex, Vertex},
    },
    pipelines::basic::{DepthTest, mk_render_pipeline},
};

/**
 * Pipeline for the sky cube.
 *
 * The sky is unlit and drawn after everything else. It uses the camera's
 * rotation-only view so it stays centred on the viewer, is visible from the
 * inside (no culling) and never writes depth.
 */
pub fn mk_skybox_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    material_layout: &wgpu::BindGroupLayout,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Skybox Pipeline Layout"),
        bind_group_layouts: &[material_layout, camera_bind_group_layout],
        immediate_size: 0,
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Skybox Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("skybox.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        &render_pipeline_layout,
        config.format,
        Some(wgpu::BlendState::REPLACE),
        None,
        Some(DepthTest::BACKGROUND),
        &[ModelVertex::desc(), InstanceRaw::desc()],
        shader,
    )
}
