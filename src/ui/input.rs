//! Keyboard mapping for the terminal driver.

use crate::session::{GameState, InputKind};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Game(InputKind),
    Quit,
}

/// Translate a key press for the given state. During name entry letters
/// and digits are text, so only Esc quits there.
pub fn map_key(key: KeyEvent, state: GameState) -> Option<UiAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(UiAction::Quit);
    }

    if state == GameState::NameEntry {
        return match key.code {
            KeyCode::Esc => Some(UiAction::Quit),
            KeyCode::Enter => Some(UiAction::Game(InputKind::StartOrConfirm)),
            KeyCode::Backspace => Some(UiAction::Game(InputKind::Backspace)),
            KeyCode::Char(c) if c.is_ascii_alphanumeric() => {
                Some(UiAction::Game(InputKind::TextChar(c)))
            }
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(UiAction::Quit),
        KeyCode::Char(' ') | KeyCode::Up => Some(UiAction::Game(InputKind::Jump)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('f') | KeyCode::Char('F') => {
            Some(UiAction::Game(InputKind::Fire))
        }
        KeyCode::Enter => Some(UiAction::Game(InputKind::StartOrConfirm)),
        _ => None,
    }
}
