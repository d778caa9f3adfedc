//! Flow control and application event loop.
//!
//! A "flow" represents a scene that handles user input, updates its objects
//! and provides renderable objects each frame. The engine owns the window and
//! the GPU [`Context`] and drives every flow through the same lifecycle.
//!
//! # User-facing types
//!
//! - [`GraphicsFlow<S>`] is the trait for scenes that handle events and rendering
//! - [`Out`] is the output type used to reconfigure the context or exit
//!
//! # Lifecycle Flow
//!
//! The event loop follows this pattern each frame:
//! 1. Collect window/device events into the polled input state
//! 2. Call `on_<device/window>_events` on all flows
//! 3. Run `on_tick` once every `tick_duration_millis`, then `on_update`
//! 4. Upload the camera and lighting uniforms
//! 5. Call flows' `on_render()` and draw lit objects, then the skybox
//! 6. Present frame

use std::{fmt::Debug, iter, pin::Pin, sync::Arc};

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Fullscreen, Window},
};

use crate::{
    config::ViewerConfig,
    context::{Context, InitContext},
    render::{Drawn, draw_batches},
};

///
/// This is the Output Type for every lifecycle hook.
///
/// `Out::Configure` can be used to modify the Context during runtime for instance to change the tick
/// speed, the clear colour, the camera mode or the lights.
///
/// `Out::Exit` asks the event loop to shut down after the current event.
///
/// `Empty` is the default output used when nothing needs to change.
///
#[derive(Default)]
pub enum Out {
    Configure(Box<dyn FnOnce(&mut Context)>),
    Exit,
    #[default]
    Empty,
}

impl Debug for Out {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Out::Configure(_) => f.write_str("Configure(|&mut Context| {...})"),
            Out::Exit => f.write_str("Exit"),
            Out::Empty => f.write_str("Empty"),
        }
    }
}

/// Trait for implementing a renderable scene.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once when the flow is created; configure the context (camera, lights, clear colour)
/// 2. `on_window_events()` and `on_device_events()` are called for each winit input event
/// 3. `on_tick()` is called every `tick_duration_millis`
/// 4. `on_update()` is called every frame
/// 5. `on_render()` is called each frame and specifies how to render `self`
///
/// Dropping the flow releases its meshes and textures; this happens before
/// the context is torn down.
pub trait GraphicsFlow<S> {
    /// Initialize the flow and configure the context.
    fn on_init(&mut self, ctx: &mut Context, state: &mut S) -> Out;

    /// Update state every frame with the elapsed time `dt`.
    fn on_update(&mut self, ctx: &Context, state: &mut S, dt: Duration) -> Out;

    /// Update state periodically.
    ///
    /// Called every `tick_duration_millis` milliseconds (configurable via context).
    /// The keyboard state in `ctx` is polled here.
    fn on_tick(&mut self, ctx: &Context, state: &mut S) -> Out;

    /// Handle raw device events (mouse motion).
    fn on_device_events(&mut self, ctx: &Context, state: &mut S, event: &DeviceEvent) -> Out;

    /// Handle window events (keyboard, mouse, window resizing, etc.).
    fn on_window_events(&mut self, ctx: &Context, state: &mut S, event: &WindowEvent) -> Out;

    /// Return renderable objects for this flow.
    fn on_render(&self) -> crate::render::Render<'_>;
}

impl<State> Debug for dyn GraphicsFlow<State> + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GraphicsFlow")
    }
}

/// Type alias for a flow constructor (factory function).
///
/// A flow constructor takes an `InitContext` and asynchronously returns a
/// boxed `GraphicsFlow`. All constructors run concurrently, which is where
/// models and textures get loaded.
pub type FlowConstructor<S> = Box<dyn FnOnce(InitContext) -> FlowFuture<S>>;

pub type FlowFuture<S> = Pin<Box<dyn Future<Output = anyhow::Result<Box<dyn GraphicsFlow<S>>>>>>;

/// Boxes an async flow factory into a [`FlowConstructor`].
pub fn constructor<S, F, Fut>(f: F) -> FlowConstructor<S>
where
    F: FnOnce(InitContext) -> Fut + 'static,
    Fut: Future<Output = anyhow::Result<Box<dyn GraphicsFlow<S>>>> + 'static,
{
    Box::new(move |ctx| -> FlowFuture<S> { Box::pin(f(ctx)) })
}

/// Application state bundle: GPU context, app state, and surface status.
#[derive(Debug)]
pub struct AppState<State: 'static> {
    pub(crate) ctx: Context,
    state: State,
    is_surface_configured: bool,
}

impl<State: Default> AppState<State> {
    async fn new(window: Arc<Window>, config: &ViewerConfig) -> anyhow::Result<Self> {
        let ctx = Context::new(window, config).await?;
        Ok(Self {
            ctx,
            state: State::default(),
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.is_surface_configured = true;
        }
    }

    fn render(
        &mut self,
        graphics_flows: &[Box<dyn GraphicsFlow<State>>],
    ) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        self.ctx.write_frame_uniforms();

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            let mut lits: Vec<Drawn> = Vec::new();
            let mut skies: Vec<Drawn> = Vec::new();
            graphics_flows
                .iter()
                .for_each(|flow| flow.on_render().set_pipelines(&mut lits, &mut skies));
            draw_batches(&self.ctx, &mut render_pass, &lits, &skies);
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    /// One fixed step: flows poll the keyboard, the camera moves and the sun advances.
    fn tick(
        &mut self,
        graphics_flows: &mut [Box<dyn GraphicsFlow<State>>],
        event_loop: &ActiveEventLoop,
    ) {
        for flow in graphics_flows.iter_mut() {
            let out = flow.on_tick(&self.ctx, &mut self.state);
            handle_flow_output(&mut self.ctx, event_loop, out);
        }
        let ctx = &mut self.ctx;
        ctx.camera
            .controller
            .update(&mut ctx.camera.camera, &ctx.keyboard, ctx.camera_target);
        ctx.light
            .tick(Duration::from_millis(ctx.tick_duration_millis).as_secs_f32());
        ctx.keyboard.end_tick();
    }
}

pub struct App<State: 'static> {
    async_runtime: tokio::runtime::Runtime,
    config: ViewerConfig,
    state: Option<AppState<State>>,
    // This will hold the fully initialized flows once they are ready.
    graphics_flows: Vec<Box<dyn GraphicsFlow<State>>>,
    // This holds the constructors at the start.
    // We use Option to `take()` it after use.
    constructors: Option<Vec<FlowConstructor<State>>>,
    // Startup failure handed back to the caller of `run`.
    error: Option<anyhow::Error>,
    last_time: Instant,
    time_since_tick: Duration,
}

impl<State: 'static> App<State> {
    fn new(config: ViewerConfig, constructors: Vec<FlowConstructor<State>>) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            async_runtime,
            config,
            state: None,
            graphics_flows: Vec::new(),
            constructors: Some(constructors),
            error: None,
            last_time: Instant::now(),
            time_since_tick: Duration::from_millis(0),
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

impl<State: 'static + Default> ApplicationHandler for App<State> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(constructors) = self.constructors.take() else {
            // Already initialized, e.g. resumed after a suspend.
            return;
        };

        let mut window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ));
        if self.config.fullscreen {
            window_attributes =
                window_attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                let error = anyhow::Error::new(e).context("Couldn't create the window");
                return self.fail(event_loop, error);
            }
        };

        let config = self.config.clone();
        let init_future = async move {
            let app_state = AppState::<State>::new(window, &config).await?;

            let flow_futures: Vec<_> = constructors
                .into_iter()
                // The clone in into() leverages the internal Arcs of Device and Queue and thus only clones the ref
                .map(|constructor| constructor((&app_state.ctx).into()))
                .collect();
            let flows = futures::future::join_all(flow_futures)
                .await
                .into_iter()
                .collect::<anyhow::Result<Vec<_>>>()?;
            anyhow::Ok((app_state, flows))
        };

        match self.async_runtime.block_on(init_future) {
            Ok((mut app_state, flows)) => {
                self.graphics_flows = flows;
                let size = app_state.ctx.window.inner_size();
                app_state.resize(size.width, size.height);
                for flow in self.graphics_flows.iter_mut() {
                    let out = flow.on_init(&mut app_state.ctx, &mut app_state.state);
                    handle_flow_output(&mut app_state.ctx, event_loop, out);
                }
                app_state.ctx.window.request_redraw();
                self.last_time = Instant::now();
                self.state = Some(app_state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn device_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            let button = state.ctx.mouse.pressed;
            state.ctx.camera.controller.handle_mouse(dx, dy, button);
        }
        for flow in self.graphics_flows.iter_mut() {
            let out = flow.on_device_events(&state.ctx, &mut state.state, &event);
            handle_flow_output(&mut state.ctx, event_loop, out);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        // general stuff
        match &event {
            WindowEvent::KeyboardInput { event: key, .. } => state.ctx.keyboard.handle_key_event(key),
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => state.ctx.mouse.handle_button(*button, *button_state),
            WindowEvent::Focused(false) => state.ctx.keyboard.clear(),
            _ => (),
        }

        for flow in self.graphics_flows.iter_mut() {
            let out = flow.on_window_events(&state.ctx, &mut state.state, &event);
            handle_flow_output(&mut state.ctx, event_loop, out);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::F11 => toggle_fullscreen(&state.ctx.window),
                _ => (),
            },
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();
                self.time_since_tick += dt;

                let tick = Duration::from_millis(state.ctx.tick_duration_millis.max(1));
                // Catch up after a slow frame without spiralling.
                let mut ticks = 0;
                while self.time_since_tick >= tick && ticks < 5 {
                    state.tick(&mut self.graphics_flows, event_loop);
                    self.time_since_tick -= tick;
                    ticks += 1;
                }
                if self.time_since_tick >= tick {
                    self.time_since_tick = Duration::from_millis(0);
                }

                for flow in self.graphics_flows.iter_mut() {
                    let out = flow.on_update(&state.ctx, &mut state.state, dt);
                    handle_flow_output(&mut state.ctx, event_loop, out);
                }

                match state.render(&self.graphics_flows) {
                    Ok(_) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Meshes and textures belong to the flows and go first, then the
        // pipelines and finally the device inside the context.
        let flows = self.graphics_flows.len();
        self.graphics_flows.clear();
        drop(self.state.take());
        log::info!("Released {} flow(s) and the GPU context", flows);
    }
}

fn toggle_fullscreen(window: &Window) {
    if window.fullscreen().is_some() {
        window.set_fullscreen(None);
    } else {
        window.set_fullscreen(Some(Fullscreen::Borderless(None)));
    }
}

fn handle_flow_output(ctx: &mut Context, event_loop: &ActiveEventLoop, out: Out) {
    match out {
        Out::Configure(f) => f(ctx),
        Out::Exit => event_loop.exit(),
        Out::Empty => (),
    }
}

pub fn run<State: 'static + Default>(
    config: ViewerConfig,
    constructors: Vec<FlowConstructor<State>>,
) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app: App<State> = App::new(config, constructors)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
