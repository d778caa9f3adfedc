#![allow(dead_code)]

use cgmath::{Matrix4, Vector3, Vector4};
use farmstead::input::KeyboardState;
use winit::{event::ElementState, keyboard::KeyCode};

pub const EPSILON: f32 = 1e-4;

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON * a.abs().max(b.abs()).max(1.0)
}

pub fn assert_approx(actual: f32, expected: f32) {
    assert!(
        approx(actual, expected),
        "expected {expected}, got {actual}"
    );
}

pub fn assert_vec3_eq(actual: Vector3<f32>, expected: impl Into<Vector3<f32>>) {
    let expected = expected.into();
    assert!(
        approx(actual.x, expected.x) && approx(actual.y, expected.y) && approx(actual.z, expected.z),
        "expected {expected:?}, got {actual:?}"
    );
}

pub fn assert_vec4_eq(actual: Vector4<f32>, expected: impl Into<Vector4<f32>>) {
    let expected = expected.into();
    assert!(
        approx(actual.x, expected.x)
            && approx(actual.y, expected.y)
            && approx(actual.z, expected.z)
            && approx(actual.w, expected.w),
        "expected {expected:?}, got {actual:?}"
    );
}

pub fn assert_mat4_eq(actual: Matrix4<f32>, expected: Matrix4<f32>) {
    let a: [[f32; 4]; 4] = actual.into();
    let e: [[f32; 4]; 4] = expected.into();
    for col in 0..4 {
        for row in 0..4 {
            assert!(
                approx(a[col][row], e[col][row]),
                "column {col} row {row}: expected {expected:?}, got {actual:?}"
            );
        }
    }
}

/// Multiplies `matrix` with the point `p` (w = 1) and drops w.
pub fn transform_point(matrix: Matrix4<f32>, p: [f32; 3]) -> Vector3<f32> {
    (matrix * Vector4::new(p[0], p[1], p[2], 1.0)).truncate()
}

/// A keyboard on which `keys` are currently held down.
pub fn keyboard_with(keys: &[KeyCode]) -> KeyboardState {
    let mut keyboard = KeyboardState::new();
    for key in keys {
        keyboard.set(*key, ElementState::Pressed, false);
    }
    keyboard
}
