//! Polled keyboard and mouse state.
//!
//! Window events only record what is held; the scene asks
//! [`KeyboardState::is_key_down`] once per tick, the same way a game loop
//! polls the keyboard.

use std::collections::HashSet;

use winit::{
    event::{ElementState, KeyEvent, MouseButton},
    keyboard::{KeyCode, PhysicalKey},
};

#[derive(Debug, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(code) = event.physical_key {
            self.set(code, event.state, event.repeat);
        }
    }

    /// Records a key transition. Auto-repeat does not count as a fresh press.
    pub fn set(&mut self, code: KeyCode, state: ElementState, repeat: bool) {
        match state {
            ElementState::Pressed => {
                if self.held.insert(code) && !repeat {
                    self.pressed.insert(code);
                }
            }
            ElementState::Released => {
                self.held.remove(&code);
            }
        }
    }

    pub fn is_key_down(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    /// True once per physical press, until [`end_tick`](Self::end_tick) is called.
    pub fn just_pressed(&self, code: KeyCode) -> bool {
        self.pressed.contains(&code)
    }

    pub fn end_tick(&mut self) {
        self.pressed.clear();
    }

    /// Focus loss means release events will never arrive.
    pub fn clear(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MouseButtonState {
    Right,
    Left,
    #[default]
    None,
}

/// The mouse button currently held, which decides what mouse motion does.
#[derive(Debug, Default)]
pub struct MouseState {
    pub pressed: MouseButtonState,
}

impl MouseState {
    pub fn handle_button(&mut self, button: MouseButton, state: ElementState) {
        self.pressed = match (button, state.is_pressed()) {
            (MouseButton::Left, true) => MouseButtonState::Left,
            (MouseButton::Right, true) => MouseButtonState::Right,
            (_, false) => MouseButtonState::None,
            _ => self.pressed,
        };
    }
}
