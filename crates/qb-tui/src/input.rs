//! Input handling - convert key events to commands

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Board commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the quest cursor up
    Up,
    /// Move the quest cursor down
    Down,
    /// Advance the selected quest's status and save
    CycleStatus,
    PrevDay,
    NextDay,
    Today,
    Help,
    Redraw,
    Quit,
}

/// Convert a key event to a board command.
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit), // Ctrl+C: quit
            KeyCode::Char('r') => Some(Command::Redraw), // Ctrl+R: redraw screen
            KeyCode::Char('l') => Some(Command::Redraw), // Ctrl+L: redraw screen
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('k') | KeyCode::Up => Some(Command::Up),
        KeyCode::Char('j') | KeyCode::Down => Some(Command::Down),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Command::CycleStatus),

        KeyCode::Char('[') | KeyCode::Left => Some(Command::PrevDay),
        KeyCode::Char(']') | KeyCode::Right => Some(Command::NextDay),
        KeyCode::Char('t') => Some(Command::Today),

        KeyCode::Char('?') => Some(Command::Help),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),

        _ => None,
    }
}
