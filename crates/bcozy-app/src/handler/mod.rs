//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers per UI mode
//! - `units`: Unit pane handlers
//! - `groups`: Group management handlers
//! - `login`: Login panel handlers

pub(crate) mod groups;
pub(crate) mod keys;
pub(crate) mod login;
pub(crate) mod units;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use bcozy_core::GroupRecord;

use crate::message::Message;

pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Spawn a background task
    SpawnTask(Task),
}

/// Background tasks talking to the middleware
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    AddGroup { label: String },
    RemoveGroup { record: GroupRecord },
    Authenticate {
        attempt: u64,
        user: String,
        password: String,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    pub fn task(task: Task) -> Self {
        Self::action(UpdateAction::SpawnTask(task))
    }
}
