//! Keyboard input mapped to game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Game action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Type a letter (always lowercase).
    Letter(char),
    /// Submit the buffer.
    Submit,
    /// Remove the last letter.
    DeleteLast,
    /// Start a new game.
    NewGame,
    /// Switch between hard and normal mode.
    ToggleDifficulty,
    /// Leave the game.
    Quit,
}

impl KeyInput {
    /// Maps a key press to an action. Key releases and unbound keys return
    /// `None`.
    pub fn from_key_event(event: KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

        match event.code {
            KeyCode::Char('n') if ctrl => Some(Self::NewGame),
            KeyCode::Char('c') if ctrl => Some(Self::Quit),
            KeyCode::Char(c) if !ctrl && c.is_ascii_alphabetic() => {
                Some(Self::Letter(c.to_ascii_lowercase()))
            }
            KeyCode::Enter => Some(Self::Submit),
            KeyCode::Backspace => Some(Self::DeleteLast),
            KeyCode::Tab => Some(Self::ToggleDifficulty),
            KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_letters_are_lowercased() {
        assert_eq!(
            KeyInput::from_key_event(press(KeyCode::Char('Q'))),
            Some(KeyInput::Letter('q'))
        );
    }

    #[test]
    fn test_unbound_keys_ignored() {
        assert_eq!(KeyInput::from_key_event(press(KeyCode::Char('7'))), None);
        assert_eq!(KeyInput::from_key_event(press(KeyCode::Left)), None);
    }

    #[test]
    fn test_control_keys() {
        let new_game = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(KeyInput::from_key_event(new_game), Some(KeyInput::NewGame));
        assert_eq!(KeyInput::from_key_event(press(KeyCode::Enter)), Some(KeyInput::Submit));
        assert_eq!(
            KeyInput::from_key_event(press(KeyCode::Backspace)),
            Some(KeyInput::DeleteLast)
        );
    }

    #[test]
    fn test_release_ignored() {
        let mut event = press(KeyCode::Enter);
        event.kind = KeyEventKind::Release;
        assert_eq!(KeyInput::from_key_event(event), None);
    }
}
