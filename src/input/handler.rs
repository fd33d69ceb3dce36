use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::touch::TouchPoint;
use crate::game::Direction;

#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// Ask for a new heading directly
    Turn(Direction),
    /// A pointer press, still to be mapped onto a heading
    Touch(TouchPoint),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> InputAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => InputAction::Turn(Direction::Up),
            KeyCode::Down => InputAction::Turn(Direction::Down),
            KeyCode::Left => InputAction::Turn(Direction::Left),
            KeyCode::Right => InputAction::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => InputAction::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => InputAction::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => InputAction::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => InputAction::Turn(Direction::Right),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,

            _ => InputAction::None,
        }
    }

    /// Left-button presses become touches at the terminal cell pressed
    pub fn handle_mouse_event(&self, mouse: MouseEvent) -> InputAction {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                InputAction::Touch(TouchPoint::new(mouse.column as f32, mouse.row as f32))
            }
            _ => InputAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
