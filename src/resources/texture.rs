use std::path::Path;

use crate::{
    data_structures::{
        model::{Material, MaterialUniform},
        texture,
    },
    resources::load_binary,
};

/// Colour used for materials whose texture could not be loaded.
pub const UNTEXTURED_COLOUR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

pub fn material_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
        label: Some("Model material_bind_group_layout"),
    })
}

pub async fn load_texture(
    path: &Path,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<texture::Texture> {
    let data = load_binary(path).await?;
    let label = path.to_string_lossy();
    let format = path.extension().and_then(|ext| ext.to_str());
    texture::Texture::from_bytes(device, queue, &data, &label, format)
}

/// Builds the material for a model from its diffuse texture.
///
/// A texture that cannot be read or decoded is logged and replaced by a plain
/// grey material so the rest of the scene still renders.
pub async fn load_material(
    texture_path: &Path,
    reflectance: f32,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
) -> Material {
    let name = texture_path.to_string_lossy();
    match load_texture(texture_path, device, queue).await {
        Ok(diffuse_texture) => Material::new(
            device,
            &name,
            diffuse_texture,
            MaterialUniform::textured(reflectance),
            layout,
        ),
        Err(e) => {
            log::error!("Couldn't load texture at {}: {:#}", texture_path.display(), e);
            Material::new(
                device,
                &name,
                texture::Texture::create_white(device, queue),
                MaterialUniform::coloured(UNTEXTURED_COLOUR, reflectance),
                layout,
            )
        }
    }
}
