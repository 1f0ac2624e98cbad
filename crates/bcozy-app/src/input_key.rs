//! Terminal-independent key events
//!
//! The TUI converts crossterm key events into [`InputKey`] at its boundary,
//! so the update logic and the headless runner never see crossterm types.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character
    Char(char),
    /// Character with Ctrl held
    CharCtrl(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
}

impl InputKey {
    /// Keys that quit from any screen
    pub fn is_force_quit(self) -> bool {
        matches!(self, InputKey::CharCtrl('c'))
    }
}
