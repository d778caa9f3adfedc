//! Conversion of imported geometry into [`MeshData`].
//!
//! Only the first mesh of a file is used; every farmstead asset is a single
//! textured object. Texture coordinates of Wavefront files are flipped to the
//! top-left origin wgpu samples with.

use std::{
    io::{BufReader, Cursor},
    path::Path,
};

use anyhow::{Context, bail};

use crate::{
    data_structures::model::{MeshData, ModelVertex},
    resources::{load_binary, load_string},
};

pub async fn parse_obj(obj_text: &str) -> anyhow::Result<Vec<tobj::Model>> {
    let mut obj_reader = BufReader::new(Cursor::new(obj_text));
    // Textures are passed explicitly, so referenced .mtl files are not needed.
    let (models, _materials) = tobj::load_obj_buf_async(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_| async { tobj::MTLLoadResult::Ok(Default::default()) },
    )
    .await?;
    Ok(models)
}

pub fn mesh_data_from_obj(models: &[tobj::Model], name: &str) -> anyhow::Result<MeshData> {
    let Some(first) = models.first() else {
        bail!("{name} contains no mesh");
    };
    if models.len() > 1 {
        log::warn!(
            "{} contains {} meshes, only {:?} is drawn",
            name,
            models.len(),
            first.name
        );
    }
    let mesh = &first.mesh;
    let vertex_count = mesh.positions.len() / 3;
    if mesh.normals.len() < vertex_count * 3 {
        log::warn!("{name} has no normals for some vertices, those stay unlit");
    }
    if mesh.texcoords.len() < vertex_count * 2 {
        log::warn!("{name} has no texture coordinates for some vertices");
    }

    let vertices = (0..vertex_count)
        .map(|i| ModelVertex {
            position: [
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            ],
            normal: [
                mesh.normals.get(i * 3).map_or(0.0, |f| *f),
                mesh.normals.get(i * 3 + 1).map_or(0.0, |f| *f),
                mesh.normals.get(i * 3 + 2).map_or(0.0, |f| *f),
            ],
            tex_coords: [
                mesh.texcoords.get(i * 2).map_or(0.0, |f| *f),
                1.0 - mesh.texcoords.get(i * 2 + 1).map_or(1.0, |f| *f),
            ],
        })
        .collect::<Vec<_>>();

    let data = MeshData {
        name: name.to_string(),
        vertices,
        indices: mesh.indices.clone(),
    };
    if data.indices.is_empty() {
        bail!("{name} contains no triangles");
    }
    if !data.is_well_formed() {
        bail!("{name} references vertices that do not exist");
    }
    Ok(data)
}

pub async fn load_obj(path: &Path) -> anyhow::Result<MeshData> {
    let text = load_string(path).await?;
    let models = parse_obj(&text)
        .await
        .with_context(|| format!("Couldn't parse {}", path.display()))?;
    mesh_data_from_obj(&models, &path.to_string_lossy())
}

/**
 * Reads the first primitive of the first mesh of a glTF/GLB file.
 *
 * Node transforms are ignored, the game object provides the placement.
 */
pub async fn load_gltf(path: &Path) -> anyhow::Result<MeshData> {
    let name = path.to_string_lossy().to_string();
    let bytes = load_binary(path).await?;
    let gltf = gltf::Gltf::from_slice(&bytes)
        .with_context(|| format!("Couldn't parse {}", path.display()))?;

    let mut buffer_data: Vec<Vec<u8>> = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                let blob = gltf
                    .blob
                    .as_deref()
                    .with_context(|| format!("{name} references a missing binary chunk"))?;
                buffer_data.push(blob.to_vec());
            }
            gltf::buffer::Source::Uri(uri) => {
                let sibling = path.parent().unwrap_or(Path::new("")).join(uri);
                buffer_data.push(load_binary(&sibling).await?);
            }
        }
    }

    let mesh_count = gltf.meshes().len();
    let mesh = gltf
        .meshes()
        .next()
        .with_context(|| format!("{name} contains no mesh"))?;
    if mesh_count > 1 || mesh.primitives().len() > 1 {
        log::warn!("{name} contains more than one mesh primitive, only the first is drawn");
    }
    let primitive = mesh
        .primitives()
        .next()
        .with_context(|| format!("{name} has an empty mesh"))?;
    let reader = primitive.reader(|buffer| buffer_data.get(buffer.index()).map(Vec::as_slice));

    let mut vertices: Vec<ModelVertex> = reader
        .read_positions()
        .with_context(|| format!("{name} has no vertex positions"))?
        .map(|position| ModelVertex {
            position,
            ..Default::default()
        })
        .collect();
    match reader.read_normals() {
        Some(normals) => vertices
            .iter_mut()
            .zip(normals)
            .for_each(|(vertex, normal)| vertex.normal = normal),
        None => log::warn!("{name} has no normals, it stays unlit"),
    }
    match reader.read_tex_coords(0).map(|t| t.into_f32()) {
        Some(tex_coords) => vertices
            .iter_mut()
            .zip(tex_coords)
            .for_each(|(vertex, uv)| vertex.tex_coords = uv),
        None => log::warn!("{name} has no texture coordinates"),
    }
    let indices = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..vertices.len() as u32).collect(),
    };

    let data = MeshData {
        name,
        vertices,
        indices,
    };
    if data.indices.is_empty() {
        bail!("{} contains no triangles", data.name);
    }
    if !data.is_well_formed() {
        bail!("{} references vertices that do not exist", data.name);
    }
    Ok(data)
}
