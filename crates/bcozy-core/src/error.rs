//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

use crate::types::UnitId;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Remote Unit Errors
    // ─────────────────────────────────────────────────────────────
    /// Synchronous snapshot fetch failed. Recovered by the pane placeholder.
    #[error("Could not fetch data of unit {unit}: {reason}")]
    Fetch { unit: UnitId, reason: String },

    /// The device handle was disposed or unreachable at subscribe time.
    #[error("Could not observe unit {unit}: {reason}")]
    Subscription { unit: UnitId, reason: String },

    /// Middleware-side failure without a more specific category.
    #[error("Remote error: {message}")]
    Remote { message: String },

    /// Wraps a lower-level failure with the action that was attempted.
    #[error("Could not {action}")]
    CouldNotPerform {
        action: String,
        #[source]
        source: Box<Error>,
    },

    // ─────────────────────────────────────────────────────────────
    // Input Errors
    // ─────────────────────────────────────────────────────────────
    #[error("{message}")]
    Validation { message: String },

    // ─────────────────────────────────────────────────────────────
    // Cancellation
    // ─────────────────────────────────────────────────────────────
    /// Cooperative cancellation. Never reported to the user.
    #[error("Operation interrupted")]
    Interrupted,

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn fetch(unit: impl Into<UnitId>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            unit: unit.into(),
            reason: reason.into(),
        }
    }

    pub fn subscription(unit: impl Into<UnitId>, reason: impl Into<String>) -> Self {
        Self::Subscription {
            unit: unit.into(),
            reason: reason.into(),
        }
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    pub fn could_not(action: impl Into<String>, source: Error) -> Self {
        Self::CouldNotPerform {
            action: action.into(),
            source: Box::new(source),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True if this error, or any error in its cause chain, is an interruption.
    pub fn is_interrupted(&self) -> bool {
        match self {
            Error::Interrupted => true,
            Error::CouldNotPerform { source, .. } => source.is_interrupted(),
            _ => false,
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Fetch { .. }
                | Error::Remote { .. }
                | Error::Validation { .. }
                | Error::CouldNotPerform { .. }
                | Error::Interrupted
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Terminal { .. } | Error::ChannelClosed)
    }
}

// ─────────────────────────────────────────────────────────────────
// Cause Chain Helpers
// ─────────────────────────────────────────────────────────────────

/// Message of the innermost cause in the error chain.
///
/// This is the short text shown to the user in notices, e.g.
/// "Group Engineers already exists" rather than "Could not add group".
pub fn cause_message(err: &(dyn std::error::Error + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

/// Log an error together with its full causal history.
///
/// The first line carries the context, every following line one cause,
/// outermost first.
pub fn log_history(context: &str, err: &(dyn std::error::Error + 'static)) {
    tracing::error!("{}: {}", context, err);
    let mut source = err.source();
    let mut depth = 1;
    while let Some(cause) = source {
        tracing::error!("  {:>width$}caused by: {}", "", cause, width = depth * 2);
        source = cause.source();
        depth += 1;
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
