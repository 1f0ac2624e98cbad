//! Settings screen state

use bcozy_core::Locale;

/// Language list of the settings screen
#[derive(Debug, Default)]
pub struct SettingsPageState {
    pub selected: usize,
}

impl SettingsPageState {
    /// Start with `current` highlighted
    pub fn new(current: Locale) -> Self {
        Self {
            selected: Locale::ALL.iter().position(|l| *l == current).unwrap_or(0),
        }
    }

    pub fn languages(&self) -> &'static [Locale] {
        &Locale::ALL
    }

    pub fn selected_locale(&self) -> Locale {
        Locale::ALL[self.selected.min(Locale::ALL.len() - 1)]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % Locale::ALL.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = (self.selected + Locale::ALL.len() - 1) % Locale::ALL.len();
    }
}
