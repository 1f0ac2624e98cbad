//! Message processing: runs the TEA update loop and dispatches actions

use tokio::sync::{mpsc, watch};

use bcozy_remote::Middleware;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message and every follow-up message it produces
pub fn process_message(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    middleware: &Middleware,
    shutdown_rx: &watch::Receiver<bool>,
) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), middleware, shutdown_rx.clone());
        }

        msg = result.message;
    }
}
