//! bcozy-app - Application state and orchestration for bcozy
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management, the observation binding that carries middleware updates onto
//! the UI thread, unit panes, group management and configuration loading.

pub mod actions;
pub mod binding;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod groups;
pub mod handler;
pub mod input_key;
pub mod login;
pub mod message;
pub mod notice;
pub mod pane;
pub mod process;
pub mod settings_page;
pub mod signals;
pub mod state;

// Re-export primary types
pub use binding::{MarshalQueue, ObservationSubscription, RemoteObservationBinding, SubscriptionId};
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{Task, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use notice::{InfoNotice, Notices, Severity};
pub use pane::{PaneBoard, PaneId, PaneLifecycleState, UnitPane};
pub use state::{AppPhase, AppState, UiMode};
