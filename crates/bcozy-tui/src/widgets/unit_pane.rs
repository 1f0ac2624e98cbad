//! One unit pane: icon, title, headline and, when expanded, detail rows

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Widget,
};

use bcozy_app::pane::UnitPane;
use bcozy_core::Localization;

use crate::theme::{icons::IconSet, styles};

/// Column where detail values start
const DETAIL_LABEL_WIDTH: usize = 22;

pub struct UnitPaneView<'a> {
    pane: &'a UnitPane,
    localization: &'a Localization,
    icons: IconSet,
    selected: bool,
    expanded: bool,
}

impl<'a> UnitPaneView<'a> {
    pub fn new(pane: &'a UnitPane, localization: &'a Localization, icons: IconSet) -> Self {
        Self {
            pane,
            localization,
            icons,
            selected: false,
            expanded: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Rows this pane occupies, borders included
    pub fn height(&self) -> u16 {
        if self.expanded {
            4 + self.pane.display().details.len() as u16
        } else {
            3
        }
    }

    fn headline(&self) -> Line<'static> {
        let display = self.pane.display();
        let mut value_style = styles::text_primary();
        if display.active {
            value_style = value_style.add_modifier(Modifier::BOLD);
        }

        let mut spans = vec![
            Span::raw(" "),
            Span::styled(self.icons.unit(display.icon), styles::tint(display.tint)),
            Span::raw(" "),
            Span::styled(display.headline.resolve(self.localization), value_style),
        ];
        if !display.enabled {
            spans.push(Span::styled(
                format!("  ({})", self.localization.text("unavailable")),
                styles::text_muted(),
            ));
        }
        Line::from(spans)
    }
}

impl Widget for UnitPaneView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = self.pane.display();
        let title_style = if display.enabled {
            styles::text_secondary()
        } else {
            styles::text_muted()
        };
        let title = super::truncate(&display.title, area.width.saturating_sub(4) as usize);
        let block = styles::glass_block(self.selected)
            .title(Span::styled(format!(" {} ", title), title_style));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        buf.set_line(inner.x, inner.y, &self.headline(), inner.width);

        if !self.expanded {
            return;
        }

        let mut y = inner.y + 1;
        let tooltip = Line::from(Span::styled(
            format!(" {}", self.localization.text(display.tooltip_key)),
            styles::text_muted(),
        ));
        if y < inner.bottom() {
            buf.set_line(inner.x, y, &tooltip, inner.width);
            y += 1;
        }

        for row in &display.details {
            if y >= inner.bottom() {
                break;
            }
            let label = self.localization.text(row.label_key);
            let line = Line::from(vec![
                Span::styled(
                    format!(" {:<w$}", label, w = DETAIL_LABEL_WIDTH),
                    styles::text_secondary(),
                ),
                Span::styled(row.value.resolve(self.localization), styles::text_primary()),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
            y += 1;
        }
    }
}
