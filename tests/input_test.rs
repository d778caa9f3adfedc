use farmstead::input::{KeyboardState, MouseButtonState, MouseState};
use winit::{
    event::{ElementState, MouseButton},
    keyboard::KeyCode,
};

#[test]
fn press_is_held_and_just_pressed_for_one_tick() {
    let mut keyboard = KeyboardState::new();
    keyboard.set(KeyCode::KeyP, ElementState::Pressed, false);
    assert!(keyboard.is_key_down(KeyCode::KeyP));
    assert!(keyboard.just_pressed(KeyCode::KeyP));

    keyboard.end_tick();
    assert!(keyboard.is_key_down(KeyCode::KeyP));
    assert!(!keyboard.just_pressed(KeyCode::KeyP));
}

#[test]
fn release_stops_holding() {
    let mut keyboard = KeyboardState::new();
    keyboard.set(KeyCode::ArrowUp, ElementState::Pressed, false);
    keyboard.set(KeyCode::ArrowUp, ElementState::Released, false);
    assert!(!keyboard.is_key_down(KeyCode::ArrowUp));
    assert!(!keyboard.is_key_down(KeyCode::ArrowDown));
}

#[test]
fn auto_repeat_is_not_a_new_press() {
    let mut keyboard = KeyboardState::new();
    keyboard.set(KeyCode::KeyC, ElementState::Pressed, false);
    keyboard.end_tick();
    keyboard.set(KeyCode::KeyC, ElementState::Pressed, true);
    assert!(keyboard.is_key_down(KeyCode::KeyC));
    assert!(!keyboard.just_pressed(KeyCode::KeyC));
}

#[test]
fn repeated_press_of_a_held_key_does_not_retrigger() {
    let mut keyboard = KeyboardState::new();
    keyboard.set(KeyCode::KeyC, ElementState::Pressed, false);
    keyboard.end_tick();
    keyboard.set(KeyCode::KeyC, ElementState::Pressed, false);
    assert!(!keyboard.just_pressed(KeyCode::KeyC));
}

#[test]
fn tap_within_one_tick_still_counts() {
    let mut keyboard = KeyboardState::new();
    keyboard.set(KeyCode::KeyP, ElementState::Pressed, false);
    keyboard.set(KeyCode::KeyP, ElementState::Released, false);
    assert!(!keyboard.is_key_down(KeyCode::KeyP));
    assert!(keyboard.just_pressed(KeyCode::KeyP));
}

#[test]
fn clear_forgets_everything() {
    let mut keyboard = KeyboardState::new();
    keyboard.set(KeyCode::KeyW, ElementState::Pressed, false);
    keyboard.set(KeyCode::KeyA, ElementState::Pressed, false);
    keyboard.clear();
    assert!(!keyboard.is_key_down(KeyCode::KeyW));
    assert!(!keyboard.just_pressed(KeyCode::KeyA));
}

#[test]
fn mouse_tracks_the_pressed_button() {
    let mut mouse = MouseState::default();
    assert_eq!(mouse.pressed, MouseButtonState::None);

    mouse.handle_button(MouseButton::Right, ElementState::Pressed);
    assert_eq!(mouse.pressed, MouseButtonState::Right);

    mouse.handle_button(MouseButton::Middle, ElementState::Pressed);
    assert_eq!(mouse.pressed, MouseButtonState::Right);

    mouse.handle_button(MouseButton::Right, ElementState::Released);
    assert_eq!(mouse.pressed, MouseButtonState::None);

    mouse.handle_button(MouseButton::Left, ElementState::Pressed);
    assert_eq!(mouse.pressed, MouseButtonState::Left);
}
