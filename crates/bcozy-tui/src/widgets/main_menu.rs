//! Main menu sidebar
//!
//! Maximized it lists every screen with its label and shortcut key,
//! minimized it shows the icons only.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use bcozy_app::state::{AppState, UiMode};

use crate::theme::{icons::IconSet, styles};

/// Screens in menu order with their shortcut keys
pub const MENU_ENTRIES: [(UiMode, char); 4] = [
    (UiMode::Units, 'u'),
    (UiMode::Groups, 'g'),
    (UiMode::Settings, 's'),
    (UiMode::Login, 'l'),
];

pub struct MainMenu<'a> {
    state: &'a AppState,
    icons: IconSet,
}

impl<'a> MainMenu<'a> {
    pub fn new(state: &'a AppState, icons: IconSet) -> Self {
        Self { state, icons }
    }

    fn entry_line(&self, mode: UiMode, key: char, width: u16) -> Line<'static> {
        let current = self.state.ui_mode == mode;
        let icon = self.icons.screen(mode);

        let mut line = if self.state.menu_maximized {
            let label = self.state.text(mode.title_key());
            let label = super::truncate(&label, width.saturating_sub(7) as usize);
            Line::from(vec![
                Span::raw(format!(" {} ", icon)),
                Span::raw(format!("{:<w$}", label, w = width.saturating_sub(7) as usize)),
                Span::styled(format!(" {}", key), styles::keybinding()),
            ])
        } else {
            Line::from(format!(" {}", icon))
        };

        if current {
            line = line.style(styles::focused_selected());
        }
        line
    }
}

impl Widget for MainMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        for (row, (mode, key)) in MENU_ENTRIES.iter().enumerate() {
            let y = inner.y + row as u16;
            if y >= inner.bottom() {
                return;
            }
            let line = self.entry_line(*mode, *key, inner.width);
            buf.set_line(inner.x, y, &line, inner.width);
        }

        let toggle_hint = if self.state.menu_maximized { "m «" } else { "»" };
        let hint = Line::from(Span::styled(toggle_hint, styles::text_muted()));
        let y = inner.bottom() - 1;
        if y >= inner.y + MENU_ENTRIES.len() as u16 {
            buf.set_line(inner.x + 1, y, &hint, inner.width.saturating_sub(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{MENU_WIDTH_MAXIMIZED, MENU_WIDTH_MINIMIZED};
    use crate::test_utils::TestTerminal;
    use bcozy_app::config::IconMode;

    #[test]
    fn test_maximized_menu_lists_labels() {
        let state = AppState::default();
        let mut term = TestTerminal::new();
        term.render_widget(
            MainMenu::new(&state, IconSet::new(IconMode::Unicode)),
            Rect::new(0, 0, MENU_WIDTH_MAXIMIZED, 12),
        );
        assert!(term.buffer_contains("Units"));
        assert!(term.buffer_contains("Groups"));
        assert!(term.buffer_contains("Settings"));
        assert!(term.buffer_contains("Login"));
    }

    #[test]
    fn test_minimized_menu_hides_labels() {
        let mut state = AppState::default();
        state.menu_maximized = false;
        let mut term = TestTerminal::new();
        term.render_widget(
            MainMenu::new(&state, IconSet::new(IconMode::Unicode)),
            Rect::new(0, 0, MENU_WIDTH_MINIMIZED, 12),
        );
        assert!(!term.buffer_contains("Groups"));
        assert!(term.buffer_contains("≡"));
    }

    #[test]
    fn test_menu_follows_locale() {
        let mut state = AppState::default();
        state.localization.set_locale(bcozy_core::Locale::German);
        let mut term = TestTerminal::new();
        term.render_widget(
            MainMenu::new(&state, IconSet::new(IconMode::Unicode)),
            Rect::new(0, 0, MENU_WIDTH_MAXIMIZED, 12),
        );
        assert!(term.buffer_contains("Gruppen"));
    }
}
