//! Centralized theme for the bcozy TUI.
//!
//! - `palette` holds raw color constants
//! - `styles` builds semantic styles from them
//! - `icons` resolves glyphs for the configured icon mode

pub mod icons;
pub mod palette;
pub mod styles;
