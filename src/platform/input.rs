//! Input as seen by the simulation
//!
//! The host polls its window once per frame and hands over an `InputState`
//! snapshot. Discrete presses can also be forwarded as `InputEvent`s.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Pause / resume toggle
    Pause,
    Restart,
}

/// Structured input event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    MousePressed { button: MouseButton, position: Vec2 },
    MouseReleased { button: MouseButton, position: Vec2 },
    MouseMoved { position: Vec2 },
    KeyPressed(Key),
    KeyReleased(Key),
}

/// Held keys and mouse state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub mouse_left: bool,
    pub mouse_right: bool,
    /// World coordinates
    pub mouse_position: Vec2,
}

impl InputState {
    /// Movement axis from held keys, components in {-1, 0, 1}
    pub fn movement(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }

    /// Fold an event into the snapshot
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::MousePressed { button, position } => {
                self.mouse_position = position;
                self.set_button(button, true);
            }
            InputEvent::MouseReleased { button, position } => {
                self.mouse_position = position;
                self.set_button(button, false);
            }
            InputEvent::MouseMoved { position } => self.mouse_position = position,
            InputEvent::KeyPressed(key) => self.set_key(key, true),
            InputEvent::KeyReleased(key) => self.set_key(key, false),
        }
    }

    fn set_button(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.mouse_left = down,
            MouseButton::Right => self.mouse_right = down,
        }
    }

    fn set_key(&mut self, key: Key, down: bool) {
        match key {
            Key::Up => self.up = down,
            Key::Down => self.down = down,
            Key::Left => self.left = down,
            Key::Right => self.right = down,
            Key::Pause | Key::Restart => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_axis() {
        let mut input = InputState::default();
        assert_eq!(input.movement(), Vec2::ZERO);
        input.up = true;
        input.right = true;
        assert_eq!(input.movement(), Vec2::new(1.0, -1.0));
        input.down = true;
        assert_eq!(input.movement(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_apply_events() {
        let mut input = InputState::default();
        input.apply(&InputEvent::KeyPressed(Key::Left));
        input.apply(&InputEvent::MousePressed {
            button: MouseButton::Left,
            position: Vec2::new(3.0, 4.0),
        });
        assert!(input.left);
        assert!(input.mouse_left);
        assert_eq!(input.mouse_position, Vec2::new(3.0, 4.0));

        input.apply(&InputEvent::KeyReleased(Key::Left));
        input.apply(&InputEvent::MouseReleased {
            button: MouseButton::Left,
            position: Vec2::new(5.0, 5.0),
        });
        assert!(!input.left);
        assert!(!input.mouse_left);
    }
}
