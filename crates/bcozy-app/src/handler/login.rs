//! Login panel handlers

use tracing::{debug, info};

use crate::state::AppState;

use super::{Task, UpdateResult};

pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    match state.login.begin_authentication() {
        Some((attempt, user, password)) => UpdateResult::task(Task::Authenticate {
            attempt,
            user,
            password,
        }),
        None => UpdateResult::none(),
    }
}

pub fn handle_result(
    state: &mut AppState,
    attempt: u64,
    user: String,
    accepted: bool,
) -> UpdateResult {
    if !state.login.is_current(attempt) {
        debug!("Ignoring stale authentication result #{} for {:?}", attempt, user);
        return UpdateResult::none();
    }
    if accepted {
        info!("User {} logged in", user);
    } else {
        debug!("Login of {:?} rejected", user);
    }
    state.login.finish_authentication(user, accepted);
    UpdateResult::none()
}

pub fn handle_failed(state: &mut AppState, attempt: u64, cause: String) -> UpdateResult {
    if !state.login.is_current(attempt) {
        debug!("Ignoring failure of abandoned login #{}: {}", attempt, cause);
        return UpdateResult::none();
    }
    state.login.authenticating = false;
    state.notices.error(cause);
    UpdateResult::none()
}

pub fn handle_logout(state: &mut AppState) -> UpdateResult {
    if let Some(user) = &state.login.logged_in_user {
        info!("User {} logged out", user);
    }
    state.login.logout();
    UpdateResult::none()
}
