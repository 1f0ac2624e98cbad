//! Header bar showing the app title, current screen and login status

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use bcozy_app::state::AppState;

use crate::theme::{icons::IconSet, palette, styles};

const SHORTCUTS: [(&str, &str); 3] = [("m", "Menu"), ("↑↓", "Select"), ("q", "Quit")];

pub struct MainHeader<'a> {
    state: &'a AppState,
    icons: IconSet,
}

impl<'a> MainHeader<'a> {
    pub fn new(state: &'a AppState, icons: IconSet) -> Self {
        Self { state, icons }
    }

    fn title_line(&self) -> Line<'static> {
        let status_style = if self.state.login.logged_in_user.is_some() {
            Style::default().fg(palette::STATUS_GREEN)
        } else {
            styles::text_muted()
        };
        Line::from(vec![
            Span::raw(" "),
            Span::styled(self.icons.dot(), status_style),
            Span::raw(" "),
            Span::styled(self.state.text("appTitle"), styles::accent_bold()),
            Span::styled(" / ", styles::text_muted()),
            Span::styled(
                self.state.text(self.state.ui_mode.title_key()),
                styles::text_secondary(),
            ),
        ])
    }

    fn user_line(&self) -> Line<'static> {
        match &self.state.login.logged_in_user {
            Some(user) => Line::from(Span::styled(
                self.state
                    .localization
                    .get_localized("loggedInAs", &[user.as_str()]),
                Style::default().fg(palette::STATUS_GREEN),
            )),
            None => Line::from(Span::styled(
                self.state.text("notLoggedIn"),
                styles::text_muted(),
            )),
        }
    }
}

fn shortcuts_line() -> Line<'static> {
    let mut spans = Vec::new();
    for (key, label) in SHORTCUTS {
        spans.push(Span::styled("[", styles::text_muted()));
        spans.push(Span::styled(key, styles::keybinding()));
        spans.push(Span::styled(format!("] {}  ", label), styles::text_muted()));
    }
    Line::from(spans)
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let title = self.title_line();
        let user = self.user_line();
        let shortcuts = shortcuts_line();
        let title_width = title.width() as u16;
        let user_width = user.width() as u16 + 1;
        let shortcuts_width = shortcuts.width() as u16;

        buf.set_line(inner.x, inner.y, &title, inner.width);

        if title_width + user_width + 1 <= inner.width {
            let user_x = inner.right() - user_width;
            buf.set_line(user_x, inner.y, &user, user_width);

            if title_width + shortcuts_width + user_width + 4 <= inner.width {
                let shortcuts_x = inner.x + title_width + 2;
                buf.set_line(shortcuts_x, inner.y, &shortcuts, shortcuts_width);
            }
        }
    }
}
