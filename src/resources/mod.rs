use std::path::Path;

use anyhow::{Context, bail};

use crate::data_structures::model::{Mesh, MeshData, Model};

/**
 * This module contains all logic for loading meshes and textures from external files.
 *
 * Paths handed to these functions are already resolved against the asset
 * root, see [`crate::config::ViewerConfig::asset_path`].
 */
pub mod mesh;
pub mod texture;

/// Reflectance every farmstead material uses for its specular highlight.
pub const DEFAULT_REFLECTANCE: f32 = 1.0;

pub async fn load_string(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Couldn't read {}", path.display()))
}

pub async fn load_binary(path: &Path) -> anyhow::Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Couldn't read {}", path.display()))
}

/// Imports the geometry of `model_path`, picking the importer from its extension.
pub async fn load_mesh_data(model_path: &Path) -> anyhow::Result<MeshData> {
    let extension = model_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("obj") => mesh::load_obj(model_path).await,
        Some("gltf" | "glb") => mesh::load_gltf(model_path).await,
        _ => bail!("Unsupported model format: {}", model_path.display()),
    }
}

/// Loads a single-mesh model together with its diffuse texture and uploads both.
pub async fn load_model(
    model_path: &Path,
    texture_path: &Path,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    material_layout: &wgpu::BindGroupLayout,
) -> anyhow::Result<Model> {
    let data = load_mesh_data(model_path).await?;
    log::info!(
        "Loaded {} with {} vertices and {} triangles",
        data.name,
        data.vertices.len(),
        data.indices.len() / 3
    );
    let mesh = Mesh::upload(device, &data);
    let material = texture::load_material(
        texture_path,
        DEFAULT_REFLECTANCE,
        device,
        queue,
        material_layout,
    )
    .await;
    Ok(Model { mesh, material })
}
