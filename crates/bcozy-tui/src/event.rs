//! Terminal event polling

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

use bcozy_app::message::Message;
use bcozy_app::InputKey;
use bcozy_core::prelude::*;

/// Poll timeout; a timeout becomes a [`Message::Tick`]
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Convert a crossterm key event to an [`InputKey`]
pub fn key_event_to_input(key: crossterm::event::KeyEvent) -> Option<InputKey> {
    let input = match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => InputKey::CharCtrl(c),
        KeyCode::Char(c) => InputKey::Char(c),
        KeyCode::Enter => InputKey::Enter,
        KeyCode::Esc => InputKey::Esc,
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => InputKey::BackTab,
        KeyCode::Tab => InputKey::Tab,
        KeyCode::BackTab => InputKey::BackTab,
        KeyCode::Backspace => InputKey::Backspace,
        KeyCode::Delete => InputKey::Delete,
        KeyCode::Up => InputKey::Up,
        KeyCode::Down => InputKey::Down,
        KeyCode::Left => InputKey::Left,
        KeyCode::Right => InputKey::Right,
        _ => return None,
    };
    Some(input)
}

/// Wait up to [`POLL_INTERVAL`] for a key press
pub fn poll() -> Result<Option<Message>> {
    if !event::poll(POLL_INTERVAL)? {
        return Ok(Some(Message::Tick));
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            Ok(key_event_to_input(key).map(Message::Key))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_becomes_char_ctrl() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_event_to_input(key), Some(InputKey::CharCtrl('c')));
        assert!(key_event_to_input(key).unwrap().is_force_quit());
    }

    #[test]
    fn test_umlaut_passes_through() {
        let key = KeyEvent::new(KeyCode::Char('Ä'), KeyModifiers::SHIFT);
        assert_eq!(key_event_to_input(key), Some(InputKey::Char('Ä')));
    }

    #[test]
    fn test_editing_and_navigation_keys() {
        assert_eq!(key_event_to_input(plain(KeyCode::Backspace)), Some(InputKey::Backspace));
        assert_eq!(key_event_to_input(plain(KeyCode::Delete)), Some(InputKey::Delete));
        assert_eq!(key_event_to_input(plain(KeyCode::Enter)), Some(InputKey::Enter));
        assert_eq!(key_event_to_input(plain(KeyCode::Up)), Some(InputKey::Up));
        assert_eq!(key_event_to_input(plain(KeyCode::Down)), Some(InputKey::Down));
    }

    #[test]
    fn test_shift_tab_is_backtab() {
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT);
        assert_eq!(key_event_to_input(key), Some(InputKey::BackTab));
        assert_eq!(key_event_to_input(plain(KeyCode::BackTab)), Some(InputKey::BackTab));
    }

    #[test]
    fn test_unsupported_keys_ignored() {
        assert_eq!(key_event_to_input(plain(KeyCode::Insert)), None);
        assert_eq!(key_event_to_input(plain(KeyCode::F(5))), None);
    }
}
