use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Game(Command),
    /// Switch between the configured grid and one filling the terminal
    ToggleLayout,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Translate a key press. Some keys only mean something on a given screen.
    pub fn handle_key_event(&self, key: KeyEvent, phase: Phase) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Game(Command::Quit);
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Game(Command::Turn(Direction::Up)),
            KeyCode::Down => KeyAction::Game(Command::Turn(Direction::Down)),
            KeyCode::Left => KeyAction::Game(Command::Turn(Direction::Left)),
            KeyCode::Right => KeyAction::Game(Command::Turn(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::Game(Command::Turn(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Game(Command::Turn(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Game(Command::Turn(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Game(Command::Turn(Direction::Right))
            }

            // Controls
            KeyCode::Esc => KeyAction::Game(Command::Quit),
            KeyCode::F(11) | KeyCode::Char('f') | KeyCode::Char('F') => KeyAction::ToggleLayout,
            KeyCode::Char(' ') | KeyCode::Enter if phase == Phase::Instructions => {
                KeyAction::Game(Command::Start)
            }
            KeyCode::Char('r') | KeyCode::Char('R') if matches!(phase, Phase::GameOver { .. }) => {
                KeyAction::Game(Command::Restart)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') if matches!(phase, Phase::GameOver { .. }) => {
                KeyAction::Game(Command::Quit)
            }

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
