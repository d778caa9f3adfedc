use wgpu::util::DeviceExt;

use crate::{
    data_structures::{instance::Transform, model::Model},
    render::{Drawn, Render},
};

/// Per-tick movement attached to a game object.
#[derive(Clone, Debug, PartialEq)]
pub enum Script {
    Static,
    /// Lowers the object by `step` every tick.
    Sink { step: f32 },
    /// Moves the object up and down between `min_z` and `max_z`.
    Bob {
        step: f32,
        min_z: f32,
        max_z: f32,
        rising: bool,
    },
}

impl Script {
    /// Applies one tick of movement. Returns whether the transform changed.
    pub fn tick(&mut self, transform: &mut Transform) -> bool {
        match self {
            Script::Static => false,
            Script::Sink { step } => {
                transform.position.z -= *step;
                true
            }
            Script::Bob {
                step,
                min_z,
                max_z,
                rising,
            } => {
                if *rising {
                    transform.position.z += *step;
                    if transform.position.z >= *max_z {
                        *rising = false;
                    }
                } else {
                    transform.position.z -= *step;
                    if transform.position.z <= *min_z {
                        *rising = true;
                    }
                }
                true
            }
        }
    }
}

/**
 * A model placed in the scene.
 *
 * The transform lives on the CPU and is uploaded into the object's own
 * instance buffer by [`GameObject::write_to_buffer`] whenever it changed.
 */
#[derive(Debug)]
pub struct GameObject {
    pub name: String,
    pub transform: Transform,
    pub model: Model,
    pub script: Script,
    pub instance_buffer: wgpu::Buffer,
    dirty: bool,
}

impl GameObject {
    pub fn new(
        device: &wgpu::Device,
        name: &str,
        model: Model,
        transform: Transform,
        script: Script,
    ) -> Self {
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Instance Buffer")),
            contents: bytemuck::cast_slice(&[transform.to_raw()]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            name: name.to_string(),
            transform,
            model,
            script,
            instance_buffer,
            dirty: false,
        }
    }

    /// Moves the object by `delta` and schedules an upload.
    pub fn translate(&mut self, delta: cgmath::Vector3<f32>) {
        self.transform.position += delta;
        self.dirty = true;
    }

    pub fn tick(&mut self) {
        if self.script.tick(&mut self.transform) {
            self.dirty = true;
        }
    }

    pub fn write_to_buffer(&mut self, queue: &wgpu::Queue) {
        if self.dirty {
            queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&[self.transform.to_raw()]),
            );
            self.dirty = false;
        }
    }

    pub fn as_sky(&self) -> Render<'_> {
        Render::Sky(self.into())
    }
}

impl<'a> From<&'a GameObject> for Drawn<'a> {
    fn from(object: &'a GameObject) -> Self {
        Drawn {
            instance: &object.instance_buffer,
            model: &object.model,
        }
    }
}
