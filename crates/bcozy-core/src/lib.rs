//! # bcozy-core - Core Domain Types
//!
//! Foundation crate for bcozy. Provides the unit snapshot model, error
//! handling, localization and logging setup.
//!
//! This crate has **zero internal dependencies**.
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`DeviceSnapshot`] - Complete state of one unit at one point in time
//! - [`UnitId`], [`UnitKind`], [`UnitState`] - Unit identity and kind-specific state
//! - [`GroupRecord`] - Authorization group as listed by the middleware
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`log_history()`], [`cause_message()`] - Cause chain helpers
//!
//! ### Localization (`i18n`)
//! - [`Localization`], [`Locale`] - String tables and locale-change observation
//!
//! ## Prelude
//!
//! ```rust
//! use bcozy_core::prelude::*;
//! ```

pub mod error;
pub mod i18n;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all bcozy crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{cause_message, log_history, Error, Result, ResultExt};
pub use i18n::{Locale, Localization};
pub use types::{
    DeviceSnapshot, GroupRecord, MotionState, PowerConsumptionState, PowerSwitchState,
    TemperatureState, UnitId, UnitKind, UnitState, UNKNOWN_ID,
};
