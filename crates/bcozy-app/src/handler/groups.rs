//! Group management handlers

use tracing::debug;

use bcozy_core::GroupRecord;

use crate::state::AppState;

use super::{Task, UpdateResult};

pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    match state.groups.validated_input() {
        Ok(label) => {
            state.groups.pending += 1;
            UpdateResult::task(Task::AddGroup { label })
        }
        Err(e) => {
            debug!("Rejected group name {:?}: {}", state.groups.input, e);
            state.groups.input_invalid = true;
            let cause = state.text("emptyGroupName");
            let text = state
                .localization
                .get_localized("saveErrorWithMessage", &[&cause]);
            state.notices.error(text);
            UpdateResult::none()
        }
    }
}

pub fn handle_remove_selected(state: &mut AppState) -> UpdateResult {
    let Some(record) = state.groups.selected_group().cloned() else {
        return UpdateResult::none();
    };
    state.groups.pending += 1;
    UpdateResult::task(Task::RemoveGroup { record })
}

pub fn handle_added(state: &mut AppState, record: GroupRecord) -> UpdateResult {
    debug!("Group {} ({}) added", record.label, record.id);
    finish(state);
    if state.groups.input_matches(&record.label) {
        state.groups.input.clear();
        state.groups.input_invalid = false;
    }
    let text = state.text("saveSuccess");
    state.notices.success(text);
    UpdateResult::none()
}

pub fn handle_add_failed(state: &mut AppState, label: String, cause: String) -> UpdateResult {
    debug!("Adding group {:?} failed: {}", label, cause);
    finish(state);
    if state.groups.input_matches(&label) {
        state.groups.input_invalid = true;
    }
    let text = state
        .localization
        .get_localized("saveErrorWithMessage", &[&cause]);
    state.notices.error(text);
    UpdateResult::none()
}

pub fn handle_removed(state: &mut AppState, record: GroupRecord) -> UpdateResult {
    debug!("Group {} ({}) removed", record.label, record.id);
    finish(state);
    let text = state.text("deleteSuccess");
    state.notices.success(text);
    UpdateResult::none()
}

pub fn handle_remove_failed(state: &mut AppState, record: GroupRecord, cause: String) -> UpdateResult {
    debug!("Removing group {} failed: {}", record.label, cause);
    finish(state);
    let text = state
        .localization
        .get_localized("deleteErrorWithMessage", &[&cause]);
    state.notices.error(text);
    UpdateResult::none()
}

pub fn handle_interrupted(state: &mut AppState) -> UpdateResult {
    debug!("Group operation interrupted");
    finish(state);
    UpdateResult::none()
}

fn finish(state: &mut AppState) {
    state.groups.pending = state.groups.pending.saturating_sub(1);
}
