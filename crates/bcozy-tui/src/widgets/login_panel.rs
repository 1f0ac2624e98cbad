//! Login panel: start button, credential fields or logout prompt

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};

use bcozy_app::login::{LoginField, LoginPhase};
use bcozy_app::state::AppState;

use crate::layout::centered_rect;
use crate::theme::{icons::IconSet, palette, styles};

const PANEL_WIDTH: u16 = 44;
const PANEL_HEIGHT: u16 = 8;

pub struct LoginPanel<'a> {
    state: &'a AppState,
    icons: IconSet,
}

impl<'a> LoginPanel<'a> {
    pub fn new(state: &'a AppState, icons: IconSet) -> Self {
        Self { state, icons }
    }

    fn field_line(&self, field: LoginField) -> Line<'static> {
        let login = &self.state.login;
        let (label_key, value) = match field {
            LoginField::User => ("username", login.user.clone()),
            LoginField::Password => ("password", "•".repeat(login.password.chars().count())),
        };
        let focused = login.focus == field;
        let value_style = if focused {
            styles::focused_selected()
        } else {
            styles::text_primary()
        };
        Line::from(vec![
            Span::styled(
                format!(" {:<14}", self.state.text(label_key)),
                styles::text_secondary(),
            ),
            Span::styled(format!("{:<20}", value), value_style),
        ])
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let login = &self.state.login;
        match login.phase {
            LoginPhase::Login => vec![
                Line::default(),
                Line::from(Span::styled(
                    format!(" [Enter] {}", self.state.text("startLogin")),
                    styles::keybinding(),
                )),
            ],
            LoginPhase::LoginActive => {
                let mut lines = vec![
                    self.field_line(LoginField::User),
                    self.field_line(LoginField::Password),
                    Line::default(),
                ];
                if login.authenticating {
                    lines.push(Line::from(Span::styled(
                        format!(" {}", self.icons.busy()),
                        styles::keybinding(),
                    )));
                } else if login.input_wrong {
                    lines.push(Line::from(Span::styled(
                        format!(" {}", self.state.text("inputWrong")),
                        Style::default().fg(palette::STATUS_RED),
                    )));
                }
                lines
            }
            LoginPhase::Logout => {
                let user = login.logged_in_user.as_deref().unwrap_or_default();
                vec![
                    Line::from(Span::styled(
                        format!(
                            " {}",
                            self.state.localization.get_localized("loggedInAs", &[user])
                        ),
                        Style::default().fg(palette::STATUS_GREEN),
                    )),
                    Line::default(),
                    Line::from(Span::styled(
                        format!(" [Enter] {}", self.state.text("logout")),
                        styles::keybinding(),
                    )),
                ]
            }
        }
    }
}

impl Widget for LoginPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let panel = centered_rect(PANEL_WIDTH, PANEL_HEIGHT, area);
        Clear.render(panel, buf);

        let title = format!(" {} ", self.state.text("login"));
        Paragraph::new(self.lines())
            .block(styles::popup_block(&title))
            .render(panel, buf);
    }
}
