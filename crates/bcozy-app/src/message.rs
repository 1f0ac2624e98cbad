//! Message types for the application (TEA pattern)

use bcozy_core::{GroupRecord, Locale};

use crate::input_key::InputKey;
use crate::state::UiMode;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates (notice expiry)
    Tick,

    /// Quit immediately (Ctrl+C, signal handler, 'q')
    Quit,

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    /// Switch to another screen
    ShowMode(UiMode),
    /// Maximize or minimize the main menu
    ToggleMenu,
    /// Move the selection of the current screen down
    SelectNext,
    /// Move the selection of the current screen up
    SelectPrevious,

    // ─────────────────────────────────────────────────────────
    // Unit Panes
    // ─────────────────────────────────────────────────────────
    /// Show or hide the detail rows of the selected pane
    ToggleExpandSelected,
    /// Remove the selected pane from the board
    DisposeSelectedPane,

    // ─────────────────────────────────────────────────────────
    // Group Management
    // ─────────────────────────────────────────────────────────
    GroupInput(char),
    GroupInputBackspace,
    /// Add a group named by the current input
    SubmitGroup,
    RemoveSelectedGroup,
    /// Highlight the group at this table row
    SelectGroup(usize),
    /// Registry published a new group list
    GroupsChanged { groups: Vec<GroupRecord> },
    GroupAdded { record: GroupRecord },
    GroupAddFailed { label: String, cause: String },
    GroupRemoved { record: GroupRecord },
    GroupRemoveFailed { record: GroupRecord, cause: String },
    /// A group operation was cancelled by shutdown or by the middleware
    GroupOperationInterrupted,

    // ─────────────────────────────────────────────────────────
    // Login
    // ─────────────────────────────────────────────────────────
    LoginStart,
    LoginCancel,
    LoginInput(char),
    LoginBackspace,
    LoginSwitchField,
    LoginSubmit,
    /// Outcome of credential check `attempt`
    LoginResult {
        attempt: u64,
        user: String,
        accepted: bool,
    },
    /// The registry could not be asked
    LoginFailed { attempt: u64, cause: String },
    Logout,

    // ─────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────
    /// Highlight a language on the settings screen
    SelectLanguage(Locale),
    /// Switch to the language highlighted on the settings screen
    ApplyLanguage,
}
