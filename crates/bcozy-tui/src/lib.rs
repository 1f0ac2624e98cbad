//! bcozy-tui - Terminal UI for bcozy
//!
//! This crate provides the ratatui-based terminal interface. It creates an
//! Engine from bcozy-app and adds terminal rendering, event polling and the
//! widgets of every screen.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry point
pub use runner::run;
