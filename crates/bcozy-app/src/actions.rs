//! Action handlers: UpdateAction dispatch and background task spawning

use std::future::Future;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use bcozy_core::prelude::{Error, Result};
use bcozy_core::{cause_message, log_history};
use bcozy_remote::Middleware;

use crate::handler::{Task, UpdateAction};
use crate::message::Message;

/// Execute an action by spawning a background task
pub fn handle_action(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    middleware: &Middleware,
    shutdown_rx: watch::Receiver<bool>,
) {
    match action {
        UpdateAction::SpawnTask(task) => {
            let middleware = middleware.clone();
            tokio::spawn(async move {
                execute_task(task, msg_tx, middleware, shutdown_rx).await;
            });
        }
    }
}

/// Run one task to completion and report its outcome as a message
pub async fn execute_task(
    task: Task,
    msg_tx: mpsc::Sender<Message>,
    middleware: Middleware,
    shutdown_rx: watch::Receiver<bool>,
) {
    let message = match task {
        Task::AddGroup { label } => {
            let groups = middleware.groups.clone();
            let result = until_shutdown(shutdown_rx, groups.add_group(&label)).await;
            match result {
                Ok(record) => {
                    info!("Group {} added as {}", record.label, record.id);
                    Message::GroupAdded { record }
                }
                Err(e) if e.is_interrupted() => {
                    debug!("Adding group {:?} interrupted", label);
                    Message::GroupOperationInterrupted
                }
                Err(e) => {
                    log_history(&format!("Could not add group {:?}", label), &e);
                    Message::GroupAddFailed {
                        label,
                        cause: cause_message(&e),
                    }
                }
            }
        }

        Task::RemoveGroup { record } => {
            let groups = middleware.groups.clone();
            let result = until_shutdown(shutdown_rx, groups.remove_group(&record)).await;
            match result {
                Ok(()) => Message::GroupRemoved { record },
                Err(e) if e.is_interrupted() => {
                    debug!("Removing group {} interrupted", record.label);
                    Message::GroupOperationInterrupted
                }
                Err(e) => {
                    log_history(&format!("Could not remove group {}", record.label), &e);
                    Message::GroupRemoveFailed {
                        record,
                        cause: cause_message(&e),
                    }
                }
            }
        }

        Task::Authenticate {
            attempt,
            user,
            password,
        } => {
            let users = middleware.users.clone();
            let check_user = user.clone();
            let result =
                tokio::task::spawn_blocking(move || users.authenticate(&check_user, &password))
                    .await
                    .map_err(|e| Error::remote(format!("authentication task failed: {}", e)));
            match result.and_then(|r| r) {
                Ok(accepted) => Message::LoginResult {
                    attempt,
                    user,
                    accepted,
                },
                Err(e) => {
                    log_history("Could not authenticate", &e);
                    Message::LoginFailed {
                        attempt,
                        cause: cause_message(&e),
                    }
                }
            }
        }
    };

    let _ = msg_tx.send(message).await;
}

/// Await `operation`, resolving to [`Error::Interrupted`] once shutdown is signalled
async fn until_shutdown<T>(
    mut shutdown_rx: watch::Receiver<bool>,
    operation: impl Future<Output = Result<T>>,
) -> Result<T> {
    if *shutdown_rx.borrow() {
        return Err(Error::Interrupted);
    }
    tokio::select! {
        result = operation => result,
        _ = wait_for_shutdown(&mut shutdown_rx) => Err(Error::Interrupted),
    }
}

async fn wait_for_shutdown(shutdown_rx: &mut watch::Receiver<bool>) {
    loop {
        if shutdown_rx.changed().await.is_err() {
            // Sender gone: no shutdown will ever be signalled
            std::future::pending::<()>().await;
        }
        if *shutdown_rx.borrow() {
            return;
        }
    }
}
