//! The farmstead: five hardcoded objects, a point light and the keyboard
//! controls that move them.

use cgmath::{Vector3, Zero};
use instant::Duration;
use winit::{
    event::{DeviceEvent, WindowEvent},
    keyboard::KeyCode,
};

use crate::{
    camera::CameraMode,
    context::{Context, InitContext},
    data_structures::{
        game_object::{GameObject, Script},
        instance::Transform,
        light::PointLight,
    },
    flow::{self, FlowConstructor, GraphicsFlow, Out},
    input::KeyboardState,
    render::Render,
    resources::load_model,
};

/// Where an object comes from and where it is placed.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectSpec {
    pub name: &'static str,
    pub model: &'static str,
    pub texture: &'static str,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: f32,
    pub script: Script,
}

impl ObjectSpec {
    pub fn transform(&self) -> Transform {
        Transform::with(self.position, self.rotation, [self.scale; 3])
    }
}

pub const AIRPLANE: ObjectSpec = ObjectSpec {
    name: "airplane",
    model: "models/airplane/airplane.obj",
    texture: "models/airplane/airplane_diffuse.jpg",
    position: [-97.0, -460.0, -3.3],
    rotation: [0.0, 0.0, 0.0],
    scale: 0.1,
    script: Script::Static,
};

pub const BARN: ObjectSpec = ObjectSpec {
    name: "barn",
    model: "models/barn/barn.obj",
    texture: "models/barn/barn_diffuse.png",
    position: [30.0, 10.5, 7.0],
    rotation: [1.54, -0.08, 0.0],
    scale: 2.0,
    script: Script::Static,
};

pub const HOUSE: ObjectSpec = ObjectSpec {
    name: "house",
    model: "models/house/cottage.glb",
    texture: "models/house/cottage_base_color.png",
    position: [36.2, -64.2, 6.55],
    rotation: [1.57, 0.0, 0.0],
    scale: 0.05,
    script: Script::Static,
};

pub const SKYBOX: ObjectSpec = ObjectSpec {
    name: "skybox",
    model: "models/skybox/skybox.obj",
    texture: "models/skybox/skybox.png",
    position: [0.0, 0.0, 0.0],
    rotation: [0.0, 0.0, 0.0],
    scale: 1000.0,
    script: Script::Static,
};

pub const DODECAHEDRON: ObjectSpec = ObjectSpec {
    name: "dodecahedron",
    model: "models/dodecahedron/dodecahedron.obj",
    texture: "models/dodecahedron/dodecahedron.jpg",
    position: [50.0, 50.0, 4.0],
    rotation: [0.0, 0.0, 0.0],
    scale: 1.0,
    script: Script::Bob {
        step: 0.05,
        min_z: 2.0,
        max_z: 6.0,
        rising: true,
    },
};

pub const POINT_LIGHT_COLOUR: [f32; 3] = [15.5, 46.5, 65.0];
pub const POINT_LIGHT_POSITION: [f32; 3] = [-110.0, -134.3, 54.5];
pub const POINT_LIGHT_INTENSITY: f32 = 50.0;

/// Airplane movement per tick and per held key.
pub const AIRPLANE_STEP: f32 = 0.4;
/// Point light colour change per tick and per held key.
pub const LIGHT_STEP: f32 = 0.1;

pub fn point_light() -> PointLight {
    PointLight::new(POINT_LIGHT_COLOUR, POINT_LIGHT_POSITION, POINT_LIGHT_INTENSITY)
}

/// What the arrow keys and V/B act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlTarget {
    Airplane,
    PointLight,
}

impl ControlTarget {
    pub fn toggled(self) -> Self {
        match self {
            ControlTarget::Airplane => ControlTarget::PointLight,
            ControlTarget::PointLight => ControlTarget::Airplane,
        }
    }
}

/// Left/Right move along x, Up/Down along y, V lowers and B raises.
pub fn airplane_delta(keyboard: &KeyboardState) -> Vector3<f32> {
    let mut delta = Vector3::zero();
    if keyboard.is_key_down(KeyCode::ArrowLeft) {
        delta.x += AIRPLANE_STEP;
    }
    if keyboard.is_key_down(KeyCode::ArrowRight) {
        delta.x -= AIRPLANE_STEP;
    }
    if keyboard.is_key_down(KeyCode::ArrowUp) {
        delta.y += AIRPLANE_STEP;
    }
    if keyboard.is_key_down(KeyCode::ArrowDown) {
        delta.y -= AIRPLANE_STEP;
    }
    if keyboard.is_key_down(KeyCode::KeyV) {
        delta.z -= AIRPLANE_STEP;
    }
    if keyboard.is_key_down(KeyCode::KeyB) {
        delta.z += AIRPLANE_STEP;
    }
    delta
}

/// Left/Right change red, Up/Down green, V/B blue.
pub fn light_colour_delta(keyboard: &KeyboardState) -> Vector3<f32> {
    let mut delta = Vector3::zero();
    if keyboard.is_key_down(KeyCode::ArrowLeft) {
        delta.x += LIGHT_STEP;
    }
    if keyboard.is_key_down(KeyCode::ArrowRight) {
        delta.x -= LIGHT_STEP;
    }
    if keyboard.is_key_down(KeyCode::ArrowUp) {
        delta.y += LIGHT_STEP;
    }
    if keyboard.is_key_down(KeyCode::ArrowDown) {
        delta.y -= LIGHT_STEP;
    }
    if keyboard.is_key_down(KeyCode::KeyV) {
        delta.z += LIGHT_STEP;
    }
    if keyboard.is_key_down(KeyCode::KeyB) {
        delta.z -= LIGHT_STEP;
    }
    delta
}

#[derive(Debug)]
pub struct Farmstead {
    airplane: GameObject,
    barn: GameObject,
    house: GameObject,
    dodecahedron: GameObject,
    skybox: GameObject,
    control: ControlTarget,
}

async fn load_object(ctx: &InitContext, spec: &ObjectSpec) -> anyhow::Result<GameObject> {
    let model_path = ctx.asset_path(spec.model);
    let texture_path = ctx.asset_path(spec.texture);
    let model = load_model(
        &model_path,
        &texture_path,
        &ctx.device,
        &ctx.queue,
        &ctx.material_layout,
    )
    .await
    .map_err(|e| e.context(format!("Couldn't load model at {}", model_path.display())))?;
    Ok(GameObject::new(
        &ctx.device,
        spec.name,
        model,
        spec.transform(),
        spec.script.clone(),
    ))
}

impl Farmstead {
    pub async fn new(ctx: InitContext) -> anyhow::Result<Self> {
        let (airplane, barn, house, dodecahedron, skybox) = futures::try_join!(
            load_object(&ctx, &AIRPLANE),
            load_object(&ctx, &BARN),
            load_object(&ctx, &HOUSE),
            load_object(&ctx, &DODECAHEDRON),
            load_object(&ctx, &SKYBOX),
        )?;
        Ok(Self {
            airplane,
            barn,
            house,
            dodecahedron,
            skybox,
            control: ControlTarget::Airplane,
        })
    }

    pub fn constructor() -> FlowConstructor<()> {
        flow::constructor(|ctx| async move {
            let flow: Box<dyn GraphicsFlow<()>> = Box::new(Farmstead::new(ctx).await?);
            anyhow::Ok(flow)
        })
    }

    fn objects_mut(&mut self) -> [&mut GameObject; 5] {
        [
            &mut self.airplane,
            &mut self.barn,
            &mut self.house,
            &mut self.dodecahedron,
            &mut self.skybox,
        ]
    }
}

impl GraphicsFlow<()> for Farmstead {
    fn on_init(&mut self, ctx: &mut Context, _: &mut ()) -> Out {
        ctx.light.lights.point = point_light();
        ctx.camera_target = Some(self.airplane.transform.position);
        log::info!(
            "Farmstead ready: arrows/V/B move the {:?}, P switches to the point light, C toggles the orbit camera",
            self.airplane.name
        );
        Out::Empty
    }

    fn on_update(&mut self, _: &Context, _: &mut (), _: Duration) -> Out {
        Out::Empty
    }

    fn on_tick(&mut self, ctx: &Context, _: &mut ()) -> Out {
        let keyboard = &ctx.keyboard;
        if keyboard.just_pressed(KeyCode::KeyP) {
            self.control = self.control.toggled();
            log::info!("Arrow keys now control the {:?}", self.control);
        }
        let toggle_camera = keyboard.just_pressed(KeyCode::KeyC);

        let mut colour_delta = None;
        match self.control {
            ControlTarget::Airplane => {
                let delta = airplane_delta(keyboard);
                if !delta.is_zero() {
                    self.airplane.translate(delta);
                }
            }
            ControlTarget::PointLight => {
                let delta = light_colour_delta(keyboard);
                if !delta.is_zero() {
                    colour_delta = Some(delta);
                }
            }
        }

        for object in self.objects_mut() {
            object.tick();
            object.write_to_buffer(&ctx.queue);
        }

        let target = self.airplane.transform.position;
        Out::Configure(Box::new(move |ctx: &mut Context| {
            if toggle_camera {
                let mode = ctx.camera.controller.toggle_mode();
                log::info!(
                    "Camera mode: {}",
                    match mode {
                        CameraMode::Free => "free",
                        CameraMode::Orbit { .. } => "orbit",
                    }
                );
            }
            if let Some(delta) = colour_delta {
                let point = &mut ctx.light.lights.point;
                point.adjust_colour(delta);
                log::info!("Point light colour: {:?}", point.colour);
            }
            ctx.camera_target = Some(target);
        }))
    }

    fn on_device_events(&mut self, _: &Context, _: &mut (), _: &DeviceEvent) -> Out {
        Out::Empty
    }

    fn on_window_events(&mut self, _: &Context, _: &mut (), _: &WindowEvent) -> Out {
        Out::Empty
    }

    fn on_render(&self) -> Render<'_> {
        Render::Composed(vec![
            Render::Lits(vec![
                (&self.airplane).into(),
                (&self.barn).into(),
                (&self.house).into(),
                (&self.dodecahedron).into(),
            ]),
            self.skybox.as_sky(),
        ])
    }
}
