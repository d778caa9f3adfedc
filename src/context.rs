use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use cgmath::{Deg, Vector3};
use winit::window::Window;

use crate::{
    camera::{self, CameraResources, Projection},
    config::ViewerConfig,
    data_structures::{
        light::{DirectionalLight, Fog, PointLight, SceneLights, Sun},
        texture,
    },
    input::{KeyboardState, MouseState},
    pipelines::{Pipelines, light::LightResources},
    resources::texture::material_layout,
};

/// Everything a running viewer owns on the GPU plus the polled input state.
///
/// Fields are dropped in declaration order: scene-facing resources first,
/// the device and surface last.
#[derive(Debug)]
pub struct Context {
    pub pipelines: Pipelines,
    pub camera: CameraResources,
    pub light: LightResources,
    pub material_layout: wgpu::BindGroupLayout,
    pub(crate) depth_texture: texture::Texture,
    pub projection: Projection,
    /// Object the camera circles in orbit mode.
    pub camera_target: Option<Vector3<f32>>,
    pub clear_colour: wgpu::Color,
    pub tick_duration_millis: u64,
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    pub config: ViewerConfig,
    pub queue: wgpu::Queue,
    pub device: wgpu::Device,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub surface: wgpu::Surface<'static>,
    pub(crate) window: Arc<Window>,
}

impl Context {
    pub async fn new(window: Arc<Window>, config: &ViewerConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();

        // The instance is a handle to our GPU
        // BackendBit::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Couldn't create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No GPU adapter can present to this window")?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("farmstead device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Couldn't create the GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Shaders output linear colour, so an sRGB surface keeps textures looking right.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("The surface supports no texture format")?;
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let projection = Projection::new(
            surface_config.width,
            surface_config.height,
            Deg(config.fovy),
            config.znear,
            config.zfar,
        );
        let camera = CameraResources::new(
            &device,
            camera::Camera::default(),
            camera::CameraController::new(config.move_speed, config.mouse_sensitivity),
            &projection,
        );

        let sun = Sun::new(config.sun_angle, config.sun_speed);
        let mut directional = DirectionalLight::default();
        sun.apply(&mut directional);
        let lights = SceneLights {
            ambient: config.ambient_light.into(),
            specular_power: config.specular_power,
            directional,
            // Dark until a flow places it.
            point: PointLight::new((0.0, 0.0, 0.0), (0.0, 0.0, 0.0), 0.0),
            fog: Fog::from(&config.fog),
        };
        let light = LightResources::new(&device, lights, sun, &camera.camera.view());

        let material_layout = material_layout(&device);
        let pipelines = Pipelines::new(
            &device,
            &surface_config,
            &material_layout,
            &camera.bind_group_layout,
            &light.bind_group_layout,
        );

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [surface_config.width, surface_config.height],
            "depth_texture",
        );

        Ok(Self {
            pipelines,
            camera,
            light,
            material_layout,
            depth_texture,
            projection,
            camera_target: None,
            clear_colour: config.clear_colour,
            tick_duration_millis: config.tick_duration_millis,
            keyboard: KeyboardState::new(),
            mouse: MouseState::default(),
            config: config.clone(),
            queue,
            device,
            surface_config,
            surface,
            window,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.projection.resize(width, height);
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_texture =
            texture::Texture::create_depth_texture(&self.device, [width, height], "depth_texture");
        true
    }

    /// Uploads camera and lighting for the frame about to be drawn.
    pub(crate) fn write_frame_uniforms(&mut self) {
        self.camera.write_to_buffer(&self.queue, &self.projection);
        let view = self.camera.camera.view();
        self.light.write_to_buffer(&self.queue, &view);
    }
}

/// The part of the [`Context`] flows need while they are being constructed.
///
/// Device and queue are reference counted internally, so cloning is cheap.
#[derive(Clone, Debug)]
pub struct InitContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub material_layout: wgpu::BindGroupLayout,
    pub config: ViewerConfig,
}

impl InitContext {
    pub fn asset_path(&self, relative: &str) -> PathBuf {
        self.config.asset_path(relative)
    }
}

impl From<&Context> for InitContext {
    fn from(ctx: &Context) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            material_layout: ctx.material_layout.clone(),
            config: ctx.config.clone(),
        }
    }
}
