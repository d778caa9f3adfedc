//! Scene data structures: models, textures, transforms, lights and game objects.
//!
//! - `model` contains mesh and material definitions, GPU resources for 3D models
//! - `texture` contains GPU texture wrapper and creation utilities
//! - `instance` holds the per-object transform and its GPU record
//! - `light` holds the light sources, the sun and fog
//! - `game_object` ties a model to a transform and a movement script

pub mod game_object;
pub mod instance;
pub mod light;
pub mod model;
pub mod texture;
