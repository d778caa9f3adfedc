use std::f32::consts::FRAC_PI_2;

use cgmath::{Deg, InnerSpace, Matrix4, Rad, SquareMatrix, Vector3, Vector4};
use farmstead::{
    camera::{Camera, CameraController, CameraMode, Projection, orbit},
    input::{KeyboardState, MouseButtonState},
};
use winit::keyboard::KeyCode;

use crate::common::test_utils::{
    assert_approx, assert_mat4_eq, assert_vec3_eq, keyboard_with, transform_point,
};

mod common;

const SPEED: f32 = 2.0;
const SENSITIVITY: f32 = 0.007;

#[test]
fn default_camera_looks_from_one_unit_up_z() {
    let camera = Camera::default();
    assert_vec3_eq(camera.position, (0.0, 0.0, 1.0));
    assert_mat4_eq(
        camera.view(),
        Matrix4::from_translation(Vector3::new(0.0, 0.0, -1.0)),
    );
}

#[test]
fn view_rotates_before_translating() {
    let camera = Camera::new((1.0, 2.0, 3.0), (0.0, FRAC_PI_2, 0.0));
    // rotate_y(90°) turns +x into -z, then the camera position is subtracted.
    assert_vec3_eq(transform_point(camera.view(), [1.0, 0.0, 0.0]), (-1.0, -2.0, -4.0));
}

#[test]
fn view_composes_y_then_z_then_x() {
    let camera = Camera::new((0.0, 0.0, 0.0), (0.3, -0.7, 1.1));
    let expected = Matrix4::from_angle_y(Rad(-0.7))
        * Matrix4::from_angle_z(Rad(1.1))
        * Matrix4::from_angle_x(Rad(0.3));
    assert_mat4_eq(camera.view(), expected);

    let swapped = Matrix4::from_angle_x(Rad(0.3))
        * Matrix4::from_angle_y(Rad(-0.7))
        * Matrix4::from_angle_z(Rad(1.1));
    assert!(
        transform_point(camera.view(), [1.0, 2.0, 3.0]) != transform_point(swapped, [1.0, 2.0, 3.0])
    );
}

#[test]
fn sky_view_drops_translation_only() {
    let camera = Camera::new((40.0, -12.0, 7.5), (0.2, 0.4, 0.0));
    let sky = camera.sky_view();
    assert_eq!(sky.w, Vector4::new(0.0, 0.0, 0.0, 1.0));
    assert_eq!(sky.x, camera.view().x);
    assert_eq!(sky.y, camera.view().y);
    assert_eq!(sky.z, camera.view().z);
}

#[test]
fn free_camera_moves_along_its_heading() {
    let mut controller = CameraController::new(SPEED, SENSITIVITY);
    let mut camera = Camera::default();

    controller.update(&mut camera, &keyboard_with(&[KeyCode::KeyW]), None);
    assert_vec3_eq(camera.position, (0.0, 0.0, -1.0));

    controller.update(&mut camera, &keyboard_with(&[KeyCode::KeyD]), None);
    assert_vec3_eq(camera.position, (2.0, 0.0, -1.0));

    controller.update(&mut camera, &keyboard_with(&[KeyCode::KeyS, KeyCode::Space]), None);
    assert_vec3_eq(camera.position, (2.0, 2.0, 1.0));

    controller.update(&mut camera, &keyboard_with(&[KeyCode::KeyA, KeyCode::ShiftLeft]), None);
    assert_vec3_eq(camera.position, (0.0, 0.0, 1.0));
}

#[test]
fn free_camera_heading_follows_y_rotation() {
    let mut controller = CameraController::new(SPEED, SENSITIVITY);
    let mut camera = Camera::new((0.0, 0.0, 0.0), (0.0, FRAC_PI_2, 0.0));
    controller.update(&mut camera, &keyboard_with(&[KeyCode::KeyW]), None);
    assert_vec3_eq(camera.position, (-2.0, 0.0, 0.0));
}

#[test]
fn mouse_look_needs_the_right_button() {
    let mut controller = CameraController::new(SPEED, SENSITIVITY);
    let mut camera = Camera::default();
    let keyboard = KeyboardState::new();

    controller.handle_mouse(10.0, 5.0, MouseButtonState::Left);
    controller.handle_mouse(10.0, 5.0, MouseButtonState::None);
    controller.update(&mut camera, &keyboard, None);
    assert_vec3_eq(camera.rotation, (0.0, 0.0, 0.0));

    controller.handle_mouse(10.0, 5.0, MouseButtonState::Right);
    controller.update(&mut camera, &keyboard, None);
    assert_vec3_eq(camera.rotation, (-5.0 * SENSITIVITY, -10.0 * SENSITIVITY, 0.0));

    // Motion is consumed by the update.
    controller.update(&mut camera, &keyboard, None);
    assert_vec3_eq(camera.rotation, (-5.0 * SENSITIVITY, -10.0 * SENSITIVITY, 0.0));
}

#[test]
fn orbit_mode_circles_the_target() {
    let mut controller = CameraController::new(SPEED, SENSITIVITY);
    assert_eq!(controller.mode(), CameraMode::Free);
    assert_eq!(controller.toggle_mode(), CameraMode::orbit());

    let mut camera = Camera::default();
    let target = Vector3::new(10.0, 0.0, 0.0);
    // Movement keys do nothing while orbiting.
    controller.update(&mut camera, &keyboard_with(&[KeyCode::KeyW]), Some(target));
    assert_vec3_eq(camera.position, (10.0, 0.0, CameraMode::ORBIT_START_DISTANCE));
    assert_vec3_eq(camera.rotation, (0.0, 0.0, 0.0));

    controller.handle_mouse(0.0, 100.0, MouseButtonState::Right);
    controller.update(&mut camera, &KeyboardState::new(), Some(target));
    let zoomed = CameraMode::ORBIT_START_DISTANCE + 100.0 * SENSITIVITY / 4.0;
    assert_vec3_eq(camera.position, (10.0, 0.0, zoomed));

    assert_eq!(controller.toggle_mode(), CameraMode::Free);
}

#[test]
fn orbit_places_camera_on_a_sphere() {
    let mut camera = Camera::default();
    let target = Vector3::new(1.0, 2.0, 3.0);
    orbit(&mut camera, target, FRAC_PI_2, 0.5, 4.0);

    let horizontal_distance = 4.0 * 0.5f32.cos();
    assert_vec3_eq(
        camera.position,
        (
            1.0 + horizontal_distance * (-FRAC_PI_2).sin(),
            2.0 - 4.0 * 0.5f32.sin(),
            3.0 + horizontal_distance * (-FRAC_PI_2).cos(),
        ),
    );
    assert_vec3_eq(camera.rotation, (0.5, -FRAC_PI_2, 0.0));
    assert_approx((camera.position - target).magnitude(), 4.0);
}

#[test]
fn projection_maps_near_and_far_to_wgpu_depth() {
    let projection = Projection::new(1280, 760, Deg(70.0), 0.1, 5000.0);
    assert_approx(projection.aspect(), 1280.0 / 760.0);

    let matrix = projection.calc_matrix();
    let near = matrix * Vector4::new(0.0, 0.0, -0.1, 1.0);
    let far = matrix * Vector4::new(0.0, 0.0, -5000.0, 1.0);
    assert_approx(near.z / near.w, 0.0);
    assert_approx(far.z / far.w, 1.0);
}

#[test]
fn projection_survives_minimised_window() {
    let mut projection = Projection::new(1280, 760, Deg(70.0), 0.1, 5000.0);
    projection.resize(0, 0);
    assert_approx(projection.aspect(), 1.0);
    assert!(projection.calc_matrix().invert().is_some());
}
