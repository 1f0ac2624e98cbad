//! Unit pane handlers

use tracing::info;

use crate::state::AppState;

use super::UpdateResult;

pub fn handle_toggle_expand(state: &mut AppState) -> UpdateResult {
    if let Some(id) = state.board.selected_id() {
        if !state.expanded.remove(&id) {
            state.expanded.insert(id);
        }
    }
    UpdateResult::none()
}

pub fn handle_dispose_selected(state: &mut AppState) -> UpdateResult {
    if let Some(id) = state.board.selected_id() {
        if state.board.dispose(id) {
            state.expanded.remove(&id);
            info!("{} removed from the board", id);
        }
    }
    UpdateResult::none()
}
