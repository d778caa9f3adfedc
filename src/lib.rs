//! farmstead
//!
//! A small wgpu scene viewer. It loads a fixed farm scene (an airplane, a
//! barn, a cottage, a bobbing dodecahedron and a skybox), lights it with a
//! sun, a point light, ambient light and fog, and lets the keyboard and mouse
//! move the camera, the airplane and the point light colour.
//!
//! High-level modules
//! - `camera`: camera types, controller and uniforms for view/projection
//! - `config`: viewer constants and their environment overrides
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: scene data (meshes, materials, transforms, lights, game objects)
//! - `flow`: the event loop and the flow lifecycle
//! - `input`: polled keyboard and mouse state
//! - `pipelines`: the lit scene pipeline and the skybox pipeline
//! - `resources`: helpers to load textures/models and create GPU resources
//! - `render`: render composition and draw order
//! - `scene`: the farmstead itself
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod input;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
