//! Tests for the update function and key handling

use std::time::Duration;

use bcozy_core::{GroupRecord, Locale};

use super::*;
use crate::input_key::InputKey;
use crate::login::LoginPhase;
use crate::notice::{Notices, Severity};
use crate::state::{AppState, UiMode};

fn groups_state() -> AppState {
    let mut state = AppState::default();
    state.ui_mode = UiMode::Groups;
    state
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        let result = update(state, Message::Key(InputKey::Char(c)));
        if let Some(msg) = result.message {
            update(state, msg);
        }
    }
}

fn press(state: &mut AppState, key: InputKey) -> UpdateResult {
    let result = update(state, Message::Key(key));
    match result.message {
        Some(msg) => update(state, msg),
        None => result,
    }
}

// ─────────────────────────────────────────────────────────
// Group Management
// ─────────────────────────────────────────────────────────

#[test]
fn test_blank_group_name_marks_input_invalid() {
    let mut state = groups_state();
    type_text(&mut state, "  ");

    let result = press(&mut state, InputKey::Enter);

    assert!(result.action.is_none());
    assert!(state.groups.input_invalid);
    assert_eq!(state.groups.input, "  ");
    let notice = state.notices.current().unwrap();
    assert_eq!(notice.severity, Severity::Error);
    assert_eq!(
        notice.text,
        "Could not save: Group name must not be empty"
    );
}

#[test]
fn test_submit_spawns_add_task() {
    let mut state = groups_state();
    type_text(&mut state, "Engineers");

    let result = press(&mut state, InputKey::Enter);

    match result.action {
        Some(UpdateAction::SpawnTask(task)) => assert_eq!(
            task,
            Task::AddGroup {
                label: "Engineers".into()
            }
        ),
        other => panic!("expected AddGroup task, got {:?}", other),
    }
    assert!(state.groups.is_busy());
}

#[test]
fn test_group_added_clears_input_and_shows_success() {
    let mut state = groups_state();
    type_text(&mut state, "Engineers");
    press(&mut state, InputKey::Enter);

    update(
        &mut state,
        Message::GroupAdded {
            record: GroupRecord::new("group-2", "Engineers"),
        },
    );

    assert!(state.groups.input.is_empty());
    assert!(!state.groups.input_invalid);
    assert!(!state.groups.is_busy());
    let notice = state.notices.current().unwrap();
    assert_eq!(notice.severity, Severity::Success);
    assert_eq!(notice.text, "Saved successfully");
}

#[test]
fn test_group_add_failure_keeps_input() {
    let mut state = groups_state();
    type_text(&mut state, "Admins");
    press(&mut state, InputKey::Enter);

    update(
        &mut state,
        Message::GroupAddFailed {
            label: "Admins".into(),
            cause: "Group Admins already exists".into(),
        },
    );

    assert_eq!(state.groups.input, "Admins");
    assert!(state.groups.input_invalid);
    assert_eq!(
        state.notices.current().unwrap().text,
        "Could not save: Group Admins already exists"
    );

    type_text(&mut state, "2");
    assert!(!state.groups.input_invalid);
}

#[test]
fn test_late_success_keeps_newer_input() {
    let mut state = groups_state();
    type_text(&mut state, "Alpha");
    press(&mut state, InputKey::Enter);
    for _ in 0.."Alpha".len() {
        press(&mut state, InputKey::Backspace);
    }
    type_text(&mut state, "Beta");

    update(
        &mut state,
        Message::GroupAdded {
            record: GroupRecord::new("group-2", "Alpha"),
        },
    );
    assert_eq!(state.groups.input, "Beta");
    assert_eq!(state.notices.current().unwrap().severity, Severity::Success);

    update(
        &mut state,
        Message::GroupAddFailed {
            label: "Alpha".into(),
            cause: "refused".into(),
        },
    );
    assert_eq!(state.groups.input, "Beta");
    assert!(!state.groups.input_invalid);
}

#[test]
fn test_interrupted_operation_is_silent() {
    let mut state = groups_state();
    type_text(&mut state, "Engineers");
    press(&mut state, InputKey::Enter);

    update(&mut state, Message::GroupOperationInterrupted);

    assert!(state.notices.is_empty());
    assert!(!state.groups.input_invalid);
    assert!(!state.groups.is_busy());
    assert_eq!(state.groups.input, "Engineers");
}

#[test]
fn test_remove_selected_group() {
    let mut state = groups_state();
    let record = GroupRecord::new("group-1", "Admins");
    update(
        &mut state,
        Message::GroupsChanged {
            groups: vec![record.clone()],
        },
    );

    let result = press(&mut state, InputKey::Delete);
    assert!(matches!(
        result.action,
        Some(UpdateAction::SpawnTask(Task::RemoveGroup { record: r })) if r == record
    ));

    update(&mut state, Message::GroupRemoved { record });
    assert_eq!(state.notices.current().unwrap().text, "Deleted successfully");
}

#[test]
fn test_remove_failure_shows_cause() {
    let mut state = groups_state();
    update(
        &mut state,
        Message::GroupRemoveFailed {
            record: GroupRecord::new("group-9", "Ghost"),
            cause: "no group with id group-9".into(),
        },
    );
    assert_eq!(
        state.notices.current().unwrap().text,
        "Could not delete: no group with id group-9"
    );
}

#[test]
fn test_q_is_text_on_groups_screen() {
    let mut state = groups_state();
    type_text(&mut state, "q");
    assert_eq!(state.groups.input, "q");
    assert!(!state.should_quit());

    press(&mut state, InputKey::CharCtrl('c'));
    assert!(state.should_quit());
}

// ─────────────────────────────────────────────────────────
// Navigation / Notices
// ─────────────────────────────────────────────────────────

#[test]
fn test_navigation_keys() {
    let mut state = AppState::default();
    press(&mut state, InputKey::Char('g'));
    assert_eq!(state.ui_mode, UiMode::Groups);
    press(&mut state, InputKey::Esc);
    assert_eq!(state.ui_mode, UiMode::Units);

    let maximized = state.menu_maximized;
    press(&mut state, InputKey::Char('m'));
    assert_ne!(state.menu_maximized, maximized);

    press(&mut state, InputKey::Char('q'));
    assert!(state.should_quit());
}

#[test]
fn test_tick_expires_notices() {
    let mut state = AppState::default();
    state.notices = Notices::new(Duration::ZERO);
    state.notices.success("done");

    update(&mut state, Message::Tick);
    assert!(state.notices.is_empty());
}

#[test]
fn test_apply_language() {
    let mut state = AppState::default();
    press(&mut state, InputKey::Char('s'));
    press(&mut state, InputKey::Down);
    press(&mut state, InputKey::Enter);

    assert_eq!(state.localization.locale(), Locale::German);
    assert_eq!(state.settings.ui.language, Locale::German);
    assert_eq!(state.notices.current().unwrap().text, "Sprache geändert");

    // Applying the active language again is a no-op
    press(&mut state, InputKey::Enter);
    assert_eq!(state.notices.iter().count(), 1);
}

#[test]
fn test_select_language_then_apply() {
    let mut state = AppState::default();
    update(&mut state, Message::SelectLanguage(Locale::German));
    update(&mut state, Message::ApplyLanguage);
    assert_eq!(state.localization.locale(), Locale::German);
}

#[test]
fn test_select_group_clamps_to_table() {
    let mut state = groups_state();
    state.groups.set_groups(vec![
        GroupRecord::new("group-1", "Admins"),
        GroupRecord::new("group-2", "Kitchen"),
    ]);
    update(&mut state, Message::SelectGroup(7));
    assert_eq!(state.groups.selected, 1);
    update(&mut state, Message::SelectGroup(0));
    assert_eq!(state.groups.selected_group().unwrap().label, "Admins");
}

// ─────────────────────────────────────────────────────────
// Login
// ─────────────────────────────────────────────────────────

#[test]
fn test_login_flow() {
    let mut state = AppState::default();
    press(&mut state, InputKey::Char('l'));
    press(&mut state, InputKey::Enter);
    assert_eq!(state.login.phase, LoginPhase::LoginActive);

    type_text(&mut state, "Admin");
    let result = press(&mut state, InputKey::Enter);
    assert!(matches!(
        result.action,
        Some(UpdateAction::SpawnTask(Task::Authenticate { ref user, .. })) if user == "Admin"
    ));

    let attempt = state.login.attempt;
    update(
        &mut state,
        Message::LoginResult {
            attempt,
            user: "Admin".into(),
            accepted: true,
        },
    );
    assert_eq!(state.login.phase, LoginPhase::Logout);
    assert_eq!(state.login.logged_in_user.as_deref(), Some("Admin"));

    press(&mut state, InputKey::Enter);
    assert_eq!(state.login.phase, LoginPhase::Login);
}

#[test]
fn test_wrong_credentials_show_marker() {
    let mut state = AppState::default();
    state.ui_mode = UiMode::Login;
    press(&mut state, InputKey::Enter);
    type_text(&mut state, "mallory");
    press(&mut state, InputKey::Enter);

    let attempt = state.login.attempt;
    update(
        &mut state,
        Message::LoginResult {
            attempt,
            user: "mallory".into(),
            accepted: false,
        },
    );
    assert!(state.login.input_wrong);
    assert_eq!(state.login.phase, LoginPhase::LoginActive);

    type_text(&mut state, "x");
    assert!(!state.login.input_wrong);
}

#[test]
fn test_result_of_cancelled_login_is_dropped() {
    let mut state = AppState::default();
    state.ui_mode = UiMode::Login;
    press(&mut state, InputKey::Enter);
    type_text(&mut state, "Admin");
    press(&mut state, InputKey::Enter);
    let abandoned = state.login.attempt;

    press(&mut state, InputKey::Esc);
    press(&mut state, InputKey::Enter);
    type_text(&mut state, "mallory");
    let result = press(&mut state, InputKey::Enter);
    assert!(matches!(
        result.action,
        Some(UpdateAction::SpawnTask(Task::Authenticate { ref user, .. })) if user == "mallory"
    ));
    assert_ne!(state.login.attempt, abandoned);

    update(
        &mut state,
        Message::LoginResult {
            attempt: abandoned,
            user: "Admin".into(),
            accepted: true,
        },
    );
    assert_eq!(state.login.phase, LoginPhase::LoginActive);
    assert!(state.login.logged_in_user.is_none());
    assert!(state.login.authenticating);

    update(
        &mut state,
        Message::LoginFailed {
            attempt: abandoned,
            cause: "timeout".into(),
        },
    );
    assert!(state.login.authenticating);
    assert!(state.notices.is_empty());
}
