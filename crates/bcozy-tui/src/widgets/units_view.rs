//! Unit panes grouped into rooms
//!
//! Scrolls by whole items so the selected pane is always fully visible.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use bcozy_app::pane::PaneId;
use bcozy_app::state::AppState;

use super::UnitPaneView;
use crate::theme::{icons::IconSet, styles};

enum Item<'a> {
    Room(String),
    Pane(UnitPaneView<'a>, PaneId),
}

impl Item<'_> {
    fn height(&self) -> u16 {
        match self {
            Item::Room(_) => 1,
            Item::Pane(view, _) => view.height(),
        }
    }
}

pub struct UnitsView<'a> {
    state: &'a AppState,
    icons: IconSet,
}

impl<'a> UnitsView<'a> {
    pub fn new(state: &'a AppState, icons: IconSet) -> Self {
        Self { state, icons }
    }

    fn items(&self) -> Vec<Item<'a>> {
        let board = &self.state.board;
        let selected = board.selected_id();
        let mut items = Vec::new();

        for room in board.rooms() {
            let label = room
                .label
                .unwrap_or_else(|| self.state.text("unknownLocation"));
            items.push(Item::Room(label));

            for id in room.panes {
                let Some(pane) = board.get(id) else {
                    continue;
                };
                let view = UnitPaneView::new(pane, &self.state.localization, self.icons)
                    .selected(selected == Some(id))
                    .expanded(self.state.is_expanded(id));
                items.push(Item::Pane(view, id));
            }
        }
        items
    }
}

/// First item to draw so that `items[..=target]` ends inside `height`
fn scroll_start(heights: &[u16], target: usize, height: u16) -> usize {
    let mut start = 0;
    while start < target {
        let needed: u16 = heights[start..=target].iter().sum();
        if needed <= height {
            break;
        }
        start += 1;
    }
    start
}

impl Widget for UnitsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        if self.state.board.is_empty() {
            Paragraph::new(self.state.text("noUnits"))
                .style(styles::text_muted())
                .alignment(Alignment::Center)
                .render(Rect::new(area.x, area.y + area.height / 2, area.width, 1), buf);
            return;
        }

        let items = self.items();
        let heights: Vec<u16> = items.iter().map(Item::height).collect();
        let selected = self.state.board.selected_id();
        let target = items
            .iter()
            .position(|item| matches!(item, Item::Pane(_, id) if Some(*id) == selected))
            .unwrap_or(0);
        let start = scroll_start(&heights, target, area.height);

        let mut y = area.y;
        for item in items.into_iter().skip(start) {
            let height = item.height();
            if y + height > area.bottom() {
                break;
            }
            let rect = Rect::new(area.x, y, area.width, height);
            match item {
                Item::Room(label) => {
                    let line = Line::from(Span::styled(format!(" {}", label), styles::accent_bold()));
                    buf.set_line(rect.x, rect.y, &line, rect.width);
                }
                Item::Pane(view, _) => view.render(rect, buf),
            }
            y += height;
        }
    }
}
