//! Camera, its keyboard/mouse controller and the GPU uniform.
//!
//! The camera stores a position and an Euler rotation in radians. Its view
//! matrix is `translate(-position) · rotate_y · rotate_z · rotate_x`; the
//! skybox uses the same matrix with the translation column zeroed so the sky
//! never comes closer.

use cgmath::{Matrix4, Rad, Vector3, perspective};
use wgpu::util::DeviceExt;
use winit::keyboard::KeyCode;

use crate::input::{KeyboardState, MouseButtonState};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
}

impl Camera {
    pub fn new(position: impl Into<Vector3<f32>>, rotation: impl Into<Vector3<f32>>) -> Self {
        Self {
            position: position.into(),
            rotation: rotation.into(),
        }
    }

    pub fn view(&self) -> Matrix4<f32> {
        Matrix4::from_translation(-self.position)
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_angle_x(Rad(self.rotation.x))
    }

    pub fn sky_view(&self) -> Matrix4<f32> {
        let mut view = self.view();
        view.w.x = 0.0;
        view.w.y = 0.0;
        view.w.z = 0.0;
        view
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new((0.0, 0.0, 1.0), (0.0, 0.0, 0.0))
    }
}

#[derive(Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// How the controller moves the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraMode {
    /// WASD flight, mouse look while the right button is held.
    Free,
    /// Circles a target; left drag turns, right drag zooms.
    Orbit {
        horizontal: f32,
        vertical: f32,
        distance: f32,
    },
}

impl CameraMode {
    pub const ORBIT_START_DISTANCE: f32 = 2.0;

    pub fn orbit() -> Self {
        CameraMode::Orbit {
            horizontal: 0.0,
            vertical: 0.0,
            distance: Self::ORBIT_START_DISTANCE,
        }
    }
}

#[derive(Debug)]
pub struct CameraController {
    speed: f32,
    sensitivity: f32,
    mode: CameraMode,
    mouse_dx: f32,
    mouse_dy: f32,
    mouse_button: MouseButtonState,
}

impl CameraController {
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            speed,
            sensitivity,
            mode: CameraMode::Free,
            mouse_dx: 0.0,
            mouse_dy: 0.0,
            mouse_button: MouseButtonState::None,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Switches between free flight and orbiting. Returns the new mode.
    pub fn toggle_mode(&mut self) -> CameraMode {
        self.mode = match self.mode {
            CameraMode::Free => CameraMode::orbit(),
            CameraMode::Orbit { .. } => CameraMode::Free,
        };
        self.mouse_dx = 0.0;
        self.mouse_dy = 0.0;
        self.mode
    }

    /// Accumulates raw mouse motion until the next [`update`](Self::update).
    ///
    /// Motion only counts while the button that drives the current mode is held.
    pub fn handle_mouse(&mut self, dx: f64, dy: f64, button: MouseButtonState) {
        let relevant = match (self.mode, button) {
            (CameraMode::Free, MouseButtonState::Right) => true,
            (CameraMode::Orbit { .. }, MouseButtonState::Left | MouseButtonState::Right) => true,
            _ => false,
        };
        if !relevant {
            return;
        }
        if self.mouse_button != button {
            self.mouse_dx = 0.0;
            self.mouse_dy = 0.0;
            self.mouse_button = button;
        }
        self.mouse_dx += dx as f32;
        self.mouse_dy += dy as f32;
    }

    /// One step of movement. `target` is the object to circle in orbit mode.
    pub fn update(
        &mut self,
        camera: &mut Camera,
        keyboard: &KeyboardState,
        target: Option<Vector3<f32>>,
    ) {
        let dx = std::mem::take(&mut self.mouse_dx);
        let dy = std::mem::take(&mut self.mouse_dy);
        let k = self.sensitivity;
        match &mut self.mode {
            CameraMode::Free => {
                let s = self.speed;
                let x = camera.rotation.y.sin() * s;
                let z = camera.rotation.y.cos() * s;
                if keyboard.is_key_down(KeyCode::KeyA) {
                    camera.position += Vector3::new(-z, 0.0, x);
                }
                if keyboard.is_key_down(KeyCode::KeyD) {
                    camera.position += Vector3::new(z, 0.0, -x);
                }
                if keyboard.is_key_down(KeyCode::KeyW) {
                    camera.position += Vector3::new(-x, 0.0, -z);
                }
                if keyboard.is_key_down(KeyCode::KeyS) {
                    camera.position += Vector3::new(x, 0.0, z);
                }
                if keyboard.is_key_down(KeyCode::Space) {
                    camera.position.y += s;
                }
                if keyboard.is_key_down(KeyCode::ShiftLeft) {
                    camera.position.y -= s;
                }
                camera.rotation += Vector3::new(-dy * k, -dx * k, 0.0);
            }
            CameraMode::Orbit {
                horizontal,
                vertical,
                distance,
            } => {
                match self.mouse_button {
                    MouseButtonState::Left => {
                        *vertical -= dy * k;
                        *horizontal += dx * k;
                    }
                    MouseButtonState::Right => {
                        if *distance > 0.0 {
                            *distance += dy * k / 4.0;
                        } else {
                            *distance = 0.1;
                        }
                    }
                    MouseButtonState::None => (),
                }
                if let Some(target) = target {
                    orbit(camera, target, *horizontal, *vertical, *distance);
                }
            }
        }
    }
}

/// Places `camera` on a sphere of `distance` around `target`, looking back at it.
pub fn orbit(
    camera: &mut Camera,
    target: Vector3<f32>,
    horizontal: f32,
    vertical: f32,
    distance: f32,
) {
    let horizontal_distance = distance * vertical.cos();
    let vertical_distance = distance * vertical.sin();
    let x_offset = horizontal_distance * (-horizontal).sin();
    let z_offset = horizontal_distance * (-horizontal).cos();
    camera.position = Vector3::new(
        target.x + x_offset,
        target.y - vertical_distance,
        target.z + z_offset,
    );
    camera.rotation = Vector3::new(vertical, -horizontal, 0.0);
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub sky_view: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view: Matrix4::identity().into(),
            proj: Matrix4::identity().into(),
            sky_view: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view = camera.view().into();
        self.proj = projection.calc_matrix().into();
        self.sky_view = camera.sky_view().into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub controller: CameraController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn new(
        device: &wgpu::Device,
        camera: Camera,
        controller: CameraController,
        projection: &Projection,
    ) -> Self {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, projection);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
            label: Some("camera_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            camera,
            controller,
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn write_to_buffer(&mut self, queue: &wgpu::Queue, projection: &Projection) {
        self.uniform.update_view_proj(&self.camera, projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
