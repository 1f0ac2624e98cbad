//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each processing cycle via
//! [`Engine::subscribe`](crate::Engine::subscribe). The headless runner
//! prints them as JSON lines.

use serde::Serialize;

/// Domain events emitted by the Engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Unit Panes
    // ─────────────────────────────────────────────────────────
    /// A pane applied a pushed snapshot
    UnitUpdated {
        pane_id: u64,
        unit_id: String,
        title: String,
        /// Headline resolved in the current locale
        headline: String,
        active: bool,
    },

    /// A pane was disposed and left the board
    PaneDisposed { pane_id: u64, unit_id: String },

    // ─────────────────────────────────────────────────────────
    // Groups
    // ─────────────────────────────────────────────────────────
    /// The authorization group list changed
    GroupsChanged { groups: Vec<String> },

    // ─────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────
    /// An info notice was shown
    NoticeShown { text: String, severity: String },

    LoggedIn { user: String },

    LoggedOut { user: String },

    /// Display language switched
    LocaleChanged { locale: String },

    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Short event name for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::UnitUpdated { .. } => "unit_updated",
            EngineEvent::PaneDisposed { .. } => "pane_disposed",
            EngineEvent::GroupsChanged { .. } => "groups_changed",
            EngineEvent::NoticeShown { .. } => "notice_shown",
            EngineEvent::LoggedIn { .. } => "logged_in",
            EngineEvent::LoggedOut { .. } => "logged_out",
            EngineEvent::LocaleChanged { .. } => "locale_changed",
            EngineEvent::Shutdown => "shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_event_tag() {
        let event = EngineEvent::NoticeShown {
            text: "Saved successfully".into(),
            severity: "success".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "notice_shown");
        assert_eq!(json["severity"], "success");
        assert_eq!(event.event_type(), "notice_shown");
    }

    #[test]
    fn test_unit_event_fields() {
        let json = serde_json::to_string(&EngineEvent::Shutdown).unwrap();
        assert_eq!(json, r#"{"event":"shutdown"}"#);
    }
}
