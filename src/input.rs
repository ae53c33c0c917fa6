use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    /// Start from Ready, try again from GameOver
    Primary,
    Pause,
    Reset,
    Quit,
    None,
}

pub fn map_key(ev: &KeyEvent) -> KeyAction {
    if ev.kind != KeyEventKind::Press {
        return KeyAction::None;
    }

    if is_ctrl_c(ev) {
        return KeyAction::Quit;
    }

    match ev.code {
        KeyCode::Up => KeyAction::Turn(Up),
        KeyCode::Down => KeyAction::Turn(Down),
        KeyCode::Left => KeyAction::Turn(Left),
        KeyCode::Right => KeyAction::Turn(Right),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => KeyAction::Turn(Up),
            'a' => KeyAction::Turn(Left),
            's' => KeyAction::Turn(Down),
            'd' => KeyAction::Turn(Right),
            ' ' => KeyAction::Primary,
            'p' => KeyAction::Pause,
            'r' => KeyAction::Reset,
            'q' => KeyAction::Quit,
            _ => KeyAction::None,
        },
        KeyCode::Enter => KeyAction::Primary,
        KeyCode::Esc => KeyAction::Pause,
        _ => KeyAction::None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
