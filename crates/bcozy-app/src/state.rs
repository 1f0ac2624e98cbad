//! Application state (Model in TEA pattern)

use std::collections::HashSet;

use bcozy_core::Localization;

use crate::config::{IconMode, Settings};
use crate::groups::GroupsState;
use crate::login::LoginState;
use crate::notice::Notices;
use crate::pane::{PaneBoard, PaneId};
use crate::settings_page::SettingsPageState;

/// Screen currently shown in the content area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Unit panes grouped by room
    #[default]
    Units,
    /// Authorization group management
    Groups,
    /// Language selection
    Settings,
    /// Login panel
    Login,
}

impl UiMode {
    /// Localization key of the screen title
    pub fn title_key(self) -> &'static str {
        match self {
            UiMode::Units => "units",
            UiMode::Groups => "groups",
            UiMode::Settings => "settings",
            UiMode::Login => "login",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub ui_mode: UiMode,

    /// Unit panes and their observation binding
    pub board: PaneBoard,
    /// Panes showing their detail rows
    pub expanded: HashSet<PaneId>,

    pub groups: GroupsState,
    pub login: LoginState,
    pub settings_page: SettingsPageState,

    pub localization: Localization,
    pub notices: Notices,
    pub menu_maximized: bool,

    pub settings: Settings,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl AppState {
    pub fn with_settings(settings: Settings) -> Self {
        let locale = settings.ui.language;
        Self {
            phase: AppPhase::Running,
            ui_mode: UiMode::Units,
            board: PaneBoard::new(),
            expanded: HashSet::new(),
            groups: GroupsState::default(),
            login: LoginState::default(),
            settings_page: SettingsPageState::new(locale),
            localization: Localization::new(locale),
            notices: Notices::new(settings.ui.notice_duration()),
            menu_maximized: settings.ui.menu_maximized,
            settings,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn icon_mode(&self) -> IconMode {
        self.settings.ui.icons
    }

    /// Localized text for `key`
    pub fn text(&self, key: &str) -> String {
        self.localization.text(key)
    }

    pub fn is_expanded(&self, id: PaneId) -> bool {
        self.expanded.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcozy_core::Locale;

    #[test]
    fn test_state_follows_ui_settings() {
        let mut settings = Settings::default();
        settings.ui.language = Locale::German;
        settings.ui.menu_maximized = false;

        let state = AppState::with_settings(settings);
        assert_eq!(state.localization.locale(), Locale::German);
        assert_eq!(state.text("groups"), "Gruppen");
        assert!(!state.menu_maximized);
        assert!(!state.should_quit());
    }
}
