//! Settings screen: language selection

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use bcozy_app::state::AppState;

use crate::theme::{icons::IconSet, styles};

pub struct SettingsPanel<'a> {
    state: &'a AppState,
    icons: IconSet,
}

impl<'a> SettingsPanel<'a> {
    pub fn new(state: &'a AppState, icons: IconSet) -> Self {
        Self { state, icons }
    }
}

impl Widget for SettingsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let page = &self.state.settings_page;
        let current = self.state.localization.locale();

        let mut lines = vec![
            Line::from(Span::styled(
                format!(" {}", self.state.text("language")),
                styles::accent_bold(),
            )),
            Line::default(),
        ];

        for (index, locale) in page.languages().iter().enumerate() {
            let marker = if *locale == current {
                self.icons.dot()
            } else {
                " "
            };
            let mut line = Line::from(format!("  {} {}", marker, locale.display_name()));
            if index == page.selected {
                line = line.style(styles::focused_selected());
            }
            lines.push(line);
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            " [Enter] ✓  [Esc] ✗",
            styles::keybinding(),
        )));

        let title = format!(" {} ", self.state.text("settings"));
        Paragraph::new(lines)
            .block(styles::glass_block(true).title(title))
            .render(area, buf);
    }
}
