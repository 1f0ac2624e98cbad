//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::login::LoginPhase;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if key.is_force_quit() {
        return Some(Message::Quit);
    }
    match state.ui_mode {
        UiMode::Units => handle_key_units(key),
        UiMode::Groups => handle_key_groups(key),
        UiMode::Settings => handle_key_settings(key),
        UiMode::Login => handle_key_login(state, key),
    }
}

/// Screen switches shared by every mode that has no text input focused
fn handle_navigation(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') => Some(Message::Quit),
        InputKey::Char('u') => Some(Message::ShowMode(UiMode::Units)),
        InputKey::Char('g') => Some(Message::ShowMode(UiMode::Groups)),
        InputKey::Char('s') => Some(Message::ShowMode(UiMode::Settings)),
        InputKey::Char('l') => Some(Message::ShowMode(UiMode::Login)),
        InputKey::Char('m') => Some(Message::ToggleMenu),
        _ => None,
    }
}

fn handle_key_units(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Up | InputKey::Char('k') => Some(Message::SelectPrevious),
        InputKey::Down | InputKey::Char('j') => Some(Message::SelectNext),
        InputKey::Enter => Some(Message::ToggleExpandSelected),
        InputKey::Char('d') | InputKey::Delete => Some(Message::DisposeSelectedPane),
        _ => handle_navigation(key),
    }
}

/// The group name input always has focus on this screen
fn handle_key_groups(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::ShowMode(UiMode::Units)),
        InputKey::Enter => Some(Message::SubmitGroup),
        InputKey::Backspace => Some(Message::GroupInputBackspace),
        InputKey::Delete => Some(Message::RemoveSelectedGroup),
        InputKey::Up => Some(Message::SelectPrevious),
        InputKey::Down => Some(Message::SelectNext),
        InputKey::Char(c) => Some(Message::GroupInput(c)),
        _ => None,
    }
}

fn handle_key_settings(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::ShowMode(UiMode::Units)),
        InputKey::Up | InputKey::Char('k') => Some(Message::SelectPrevious),
        InputKey::Down | InputKey::Char('j') => Some(Message::SelectNext),
        InputKey::Enter => Some(Message::ApplyLanguage),
        _ => handle_navigation(key),
    }
}

fn handle_key_login(state: &AppState, key: InputKey) -> Option<Message> {
    match state.login.phase {
        LoginPhase::Login => match key {
            InputKey::Enter => Some(Message::LoginStart),
            InputKey::Esc => Some(Message::ShowMode(UiMode::Units)),
            _ => handle_navigation(key),
        },
        LoginPhase::LoginActive => match key {
            InputKey::Esc => Some(Message::LoginCancel),
            InputKey::Enter => Some(Message::LoginSubmit),
            InputKey::Tab | InputKey::BackTab | InputKey::Up | InputKey::Down => {
                Some(Message::LoginSwitchField)
            }
            InputKey::Backspace => Some(Message::LoginBackspace),
            InputKey::Char(c) => Some(Message::LoginInput(c)),
            _ => None,
        },
        LoginPhase::Logout => match key {
            InputKey::Enter => Some(Message::Logout),
            InputKey::Esc => Some(Message::ShowMode(UiMode::Units)),
            _ => handle_navigation(key),
        },
    }
}
