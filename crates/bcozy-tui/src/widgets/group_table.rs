//! Authorization group management: name input above the group table

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

use bcozy_app::groups::project_rows;
use bcozy_app::state::AppState;

use crate::theme::{icons::IconSet, styles};

pub struct GroupTable<'a> {
    state: &'a AppState,
    icons: IconSet,
}

impl<'a> GroupTable<'a> {
    pub fn new(state: &'a AppState, icons: IconSet) -> Self {
        Self { state, icons }
    }

    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let groups = &self.state.groups;
        let border = if groups.input_invalid {
            styles::border_error()
        } else {
            styles::border_active()
        };
        let block = styles::glass_block(true)
            .border_style(border)
            .title(format!(" {} ", self.state.text("groupLabel")));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = vec![
            Span::raw(" "),
            Span::styled(groups.input.clone(), styles::text_primary()),
            Span::styled("▏", styles::accent_bold()),
        ];
        if groups.is_busy() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(self.icons.busy(), styles::keybinding()));
        }
        Paragraph::new(Line::from(spans)).render(inner, buf);
    }

    fn render_table(&self, area: Rect, buf: &mut Buffer) {
        let groups = &self.state.groups;
        let block = styles::glass_block(false).title(format!(" {} ", self.state.text("groups")));

        if groups.groups.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                format!(" {}", self.state.text("noGroups")),
                styles::text_muted(),
            )))
            .block(block)
            .render(area, buf);
            return;
        }

        let rows: Vec<Row> = project_rows(&groups.groups, groups.selected)
            .into_iter()
            .map(|row| {
                Row::new(vec![
                    Cell::from(row.label),
                    Cell::from(Span::styled(row.id, styles::text_muted())),
                ])
            })
            .collect();

        let table = Table::new(rows, [Constraint::Min(16), Constraint::Length(12)])
            .block(block)
            .row_highlight_style(styles::focused_selected())
            .highlight_symbol(format!("{} ", self.icons.selected()));

        let mut table_state = TableState::default().with_selected(Some(groups.selected));
        StatefulWidget::render(table, area, buf, &mut table_state);
    }
}

impl Widget for GroupTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [input, table, hint] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_input(input, buf);
        self.render_table(table, buf);

        let hint_line = Line::from(vec![
            Span::styled(" [Enter] ", styles::keybinding()),
            Span::styled("+  ", styles::text_muted()),
            Span::styled("[Del] ", styles::keybinding()),
            Span::styled("-  ", styles::text_muted()),
            Span::styled("[Esc] ", styles::keybinding()),
            Span::styled(self.state.text("units"), styles::text_muted()),
        ]);
        buf.set_line(hint.x, hint.y, &hint_line, hint.width);
    }
}
