//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use tracing::{debug, info};

use crate::message::Message;
use crate::settings_page::SettingsPageState;
use crate::state::{AppPhase, AppState, UiMode};

use super::{groups, keys::handle_key, login, units, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            info!("Quit requested");
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => {
            let expired = state.notices.expire(Instant::now());
            if expired > 0 {
                debug!("{} notice(s) expired", expired);
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::ShowMode(mode) => {
            if mode == UiMode::Settings {
                state.settings_page = SettingsPageState::new(state.localization.locale());
            }
            state.ui_mode = mode;
            UpdateResult::none()
        }

        Message::ToggleMenu => {
            state.menu_maximized = !state.menu_maximized;
            UpdateResult::none()
        }

        Message::SelectNext => {
            match state.ui_mode {
                UiMode::Units => state.board.select_next(),
                UiMode::Groups => state.groups.select_next(),
                UiMode::Settings => state.settings_page.select_next(),
                UiMode::Login => {}
            }
            UpdateResult::none()
        }

        Message::SelectPrevious => {
            match state.ui_mode {
                UiMode::Units => state.board.select_previous(),
                UiMode::Groups => state.groups.select_previous(),
                UiMode::Settings => state.settings_page.select_previous(),
                UiMode::Login => {}
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Unit Panes
        // ─────────────────────────────────────────────────────────
        Message::ToggleExpandSelected => units::handle_toggle_expand(state),
        Message::DisposeSelectedPane => units::handle_dispose_selected(state),

        // ─────────────────────────────────────────────────────────
        // Group Management
        // ─────────────────────────────────────────────────────────
        Message::GroupInput(c) => {
            state.groups.push_char(c);
            UpdateResult::none()
        }
        Message::GroupInputBackspace => {
            state.groups.backspace();
            UpdateResult::none()
        }
        Message::SubmitGroup => groups::handle_submit(state),
        Message::RemoveSelectedGroup => groups::handle_remove_selected(state),
        Message::SelectGroup(index) => {
            state.groups.selected = index.min(state.groups.groups.len().saturating_sub(1));
            UpdateResult::none()
        }
        Message::GroupsChanged { groups } => {
            debug!("Group list changed ({} groups)", groups.len());
            state.groups.set_groups(groups);
            UpdateResult::none()
        }
        Message::GroupAdded { record } => groups::handle_added(state, record),
        Message::GroupAddFailed { label, cause } => groups::handle_add_failed(state, label, cause),
        Message::GroupRemoved { record } => groups::handle_removed(state, record),
        Message::GroupRemoveFailed { record, cause } => {
            groups::handle_remove_failed(state, record, cause)
        }
        Message::GroupOperationInterrupted => groups::handle_interrupted(state),

        // ─────────────────────────────────────────────────────────
        // Login
        // ─────────────────────────────────────────────────────────
        Message::LoginStart => {
            state.login.start();
            UpdateResult::none()
        }
        Message::LoginCancel => {
            state.login.cancel();
            UpdateResult::none()
        }
        Message::LoginInput(c) => {
            state.login.push_char(c);
            UpdateResult::none()
        }
        Message::LoginBackspace => {
            state.login.backspace();
            UpdateResult::none()
        }
        Message::LoginSwitchField => {
            state.login.switch_field();
            UpdateResult::none()
        }
        Message::LoginSubmit => login::handle_submit(state),
        Message::LoginResult {
            attempt,
            user,
            accepted,
        } => login::handle_result(state, attempt, user, accepted),
        Message::LoginFailed { attempt, cause } => login::handle_failed(state, attempt, cause),
        Message::Logout => login::handle_logout(state),

        // ─────────────────────────────────────────────────────────
        // Settings
        // ─────────────────────────────────────────────────────────
        Message::SelectLanguage(locale) => {
            if let Some(index) = state.settings_page.languages().iter().position(|l| *l == locale) {
                state.settings_page.selected = index;
            }
            UpdateResult::none()
        }

        Message::ApplyLanguage => {
            let locale = state.settings_page.selected_locale();
            if state.localization.set_locale(locale) {
                state.settings.ui.language = locale;
                let text = state.text("languageChanged");
                state.notices.success(text);
            }
            UpdateResult::none()
        }
    }
}
