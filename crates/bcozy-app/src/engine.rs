//! Engine - shared orchestration state for the TUI and headless runners
//!
//! The Engine owns the TEA state, the message channel, the shutdown signal
//! and the middleware connection. Both runners drive it the same way:
//! deliver remote updates, drain messages, then render or print events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use bcozy_core::prelude::*;
use bcozy_core::{cause_message, log_history, GroupRecord, Locale};
use bcozy_remote::sim::SimulatedMiddleware;
use bcozy_remote::{Middleware, UnitRemote};

use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::pane::PaneId;
use crate::process;
use crate::signals;
use crate::state::AppState;

/// How long shutdown waits for background tasks
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to decide which
/// EngineEvents to emit.
#[derive(Debug, Clone)]
struct StateSnapshot {
    groups: Vec<String>,
    logged_in_user: Option<String>,
    locale: Locale,
    panes: Vec<(PaneId, String)>,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            groups: state.groups.groups.iter().map(|g| g.label.clone()).collect(),
            logged_in_user: state.login.logged_in_user.clone(),
            locale: state.localization.locale(),
            panes: state
                .board
                .panes()
                .iter()
                .map(|p| (p.id(), p.unit_id().to_string()))
                .collect(),
        }
    }
}

/// Orchestration engine for bcozy.
pub struct Engine {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Send `true` to initiate shutdown
    pub shutdown_tx: watch::Sender<bool>,

    /// Clone for background tasks
    pub shutdown_rx: watch::Receiver<bool>,

    middleware: Middleware,

    /// Present when the engine started its own simulated middleware
    simulation: Option<SimulatedMiddleware>,

    /// Forwards group list changes into the message channel
    groups_bridge: Option<JoinHandle<()>>,

    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine {
    /// Create an Engine backed by the simulated middleware described in
    /// `settings`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(settings: Settings) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let simulation = SimulatedMiddleware::start(
            &settings.simulation.units,
            settings.simulation.options(),
            shutdown_rx.clone(),
        );
        let middleware = simulation.middleware.clone();

        let mut engine = Self::assemble(settings, middleware, shutdown_tx, shutdown_rx);
        engine.simulation = Some(simulation);
        signals::spawn_signal_handler(engine.msg_tx.clone());
        engine
    }

    /// Create an Engine for an already running middleware.
    ///
    /// No signal handler is installed.
    pub fn with_middleware(settings: Settings, middleware: Middleware) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self::assemble(settings, middleware, shutdown_tx, shutdown_rx)
    }

    fn assemble(
        settings: Settings,
        middleware: Middleware,
        shutdown_tx: watch::Sender<bool>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (event_tx, _) = broadcast::channel(256);

        let mut engine = Self {
            state: AppState::with_settings(settings),
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            middleware,
            simulation: None,
            groups_bridge: None,
            event_tx,
        };

        engine.bind_units();

        let mut groups_rx = engine.middleware.groups.groups();
        let initial = groups_rx.borrow_and_update().clone();
        engine.state.groups.set_groups(initial);
        engine.groups_bridge = Some(spawn_groups_bridge(
            groups_rx,
            engine.msg_tx.clone(),
            engine.shutdown_rx.clone(),
        ));

        engine
    }

    /// Construct and bind a pane for every unit of the middleware
    fn bind_units(&mut self) {
        let units: Vec<Arc<dyn UnitRemote>> = self.middleware.units.clone();
        for remote in &units {
            if let Err(e) = self.state.board.add_unit(remote) {
                log_history(&format!("Could not bind unit {}", remote.unit_id()), &e);
                warn!("Unit {} is not shown: {}", remote.unit_id(), e);
                let text = self
                    .state
                    .localization
                    .get_localized("bindErrorWithMessage", &[&cause_message(&e)]);
                self.state.notices.error(text);
            }
        }
        info!(
            "Bound {} of {} units",
            self.state.board.len(),
            self.middleware.units.len()
        );
    }

    /// Subscribe to engine events.
    ///
    /// Lagging subscribers lose the oldest events.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle and emit
    /// events for what changed.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(
            &mut self.state,
            msg,
            &self.msg_tx,
            &self.middleware,
            &self.shutdown_rx,
        );

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Deliver snapshots pushed by the middleware to their panes.
    ///
    /// Returns the number of panes whose display changed.
    pub fn drain_remote_updates(&mut self) -> usize {
        self.state.board.drain_updates();
        let changed = self.state.board.take_changed();

        for id in &changed {
            let Some(pane) = self.state.board.get(*id) else {
                continue;
            };
            let display = pane.display();
            self.emit(EngineEvent::UnitUpdated {
                pane_id: id.0,
                unit_id: pane.unit_id().to_string(),
                title: display.title.clone(),
                headline: display.headline.resolve(&self.state.localization),
                active: display.active,
            });
        }
        changed.len()
    }

    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    pub fn middleware(&self) -> &Middleware {
        &self.middleware
    }

    /// Simulated units, if the engine runs its own simulation
    pub fn simulation(&self) -> Option<&SimulatedMiddleware> {
        self.simulation.as_ref()
    }

    /// Signal background tasks, dispose every pane and wait for the
    /// simulation to stop.
    ///
    /// Group operations still in flight see the shutdown signal and end
    /// without reporting a failure.
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);

        let _ = self.shutdown_tx.send(true);

        self.state.board.dispose_all();
        self.state.expanded.clear();

        if let Some(bridge) = self.groups_bridge.take() {
            match tokio::time::timeout(SHUTDOWN_TIMEOUT, bridge).await {
                Ok(Ok(())) => debug!("Group bridge stopped"),
                Ok(Err(e)) => warn!("Group bridge panicked: {}", e),
                Err(_) => warn!("Group bridge did not stop in time"),
            }
        }

        if let Some(simulation) = self.simulation.take() {
            if tokio::time::timeout(SHUTDOWN_TIMEOUT, simulation.join())
                .await
                .is_err()
            {
                warn!("Simulation drivers did not stop in time");
            }
        }
        info!("Engine shut down");
    }

    fn emit_events(&mut self, pre: &StateSnapshot, post: &StateSnapshot) {
        for (id, unit_id) in &pre.panes {
            if !post.panes.iter().any(|(other, _)| other == id) {
                self.emit(EngineEvent::PaneDisposed {
                    pane_id: id.0,
                    unit_id: unit_id.clone(),
                });
            }
        }

        if pre.groups != post.groups {
            self.emit(EngineEvent::GroupsChanged {
                groups: post.groups.clone(),
            });
        }

        for notice in self.state.notices.take_shown() {
            self.emit(EngineEvent::NoticeShown {
                text: notice.text,
                severity: notice.severity.as_str().to_string(),
            });
        }

        if pre.logged_in_user != post.logged_in_user {
            if let Some(user) = &pre.logged_in_user {
                self.emit(EngineEvent::LoggedOut { user: user.clone() });
            }
            if let Some(user) = &post.logged_in_user {
                self.emit(EngineEvent::LoggedIn { user: user.clone() });
            }
        }

        if pre.locale != post.locale {
            self.emit(EngineEvent::LocaleChanged {
                locale: post.locale.tag().to_string(),
            });
        }
    }

    /// Emit a single EngineEvent. Having no subscribers is fine.
    fn emit(&self, event: EngineEvent) {
        trace!("Engine event: {}", event.event_type());
        let _ = self.event_tx.send(event);
    }
}

/// Forward every published group list into the message channel until
/// shutdown or until the registry goes away.
fn spawn_groups_bridge(
    mut groups_rx: watch::Receiver<Vec<GroupRecord>>,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                changed = groups_rx.changed() => {
                    if changed.is_err() {
                        debug!("Group registry closed");
                        break;
                    }
                    let groups = groups_rx.borrow_and_update().clone();
                    if msg_tx.send(Message::GroupsChanged { groups }).await.is_err() {
                        break;
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
    })
}
