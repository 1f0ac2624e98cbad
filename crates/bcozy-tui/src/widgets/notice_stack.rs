//! Info notices stacked in the bottom-right corner of the content area

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};

use bcozy_app::notice::Notices;

use crate::layout::notice_area;
use crate::theme::{icons::IconSet, styles};

pub struct NoticeStack<'a> {
    notices: &'a Notices,
    icons: IconSet,
}

impl<'a> NoticeStack<'a> {
    pub fn new(notices: &'a Notices, icons: IconSet) -> Self {
        Self { notices, icons }
    }
}

impl Widget for NoticeStack<'_> {
    fn render(self, content: Rect, buf: &mut Buffer) {
        if self.notices.is_empty() {
            return;
        }

        let count = self.notices.iter().count();
        let area = notice_area(content, count);
        let width = area.width.saturating_sub(5) as usize;

        let lines: Vec<Line> = self
            .notices
            .iter()
            .map(|notice| {
                let style = styles::severity(notice.severity);
                Line::from(vec![
                    Span::styled(format!(" {} ", self.icons.notice(notice.severity)), style),
                    Span::styled(super::truncate(&notice.text, width), style),
                ])
            })
            .collect();

        Clear.render(area, buf);
        Paragraph::new(lines)
            .block(styles::popup_block(""))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use bcozy_app::config::IconMode;

    #[test]
    fn test_nothing_rendered_without_notices() {
        let notices = Notices::default();
        let mut term = TestTerminal::new();
        term.render_widget(
            NoticeStack::new(&notices, IconSet::new(IconMode::Unicode)),
            Rect::new(0, 0, 80, 24),
        );
        assert!(term.content().trim().is_empty());
    }

    #[test]
    fn test_newest_notice_last() {
        let mut notices = Notices::default();
        notices.success("Saved successfully");
        notices.error("Could not delete: busy");
        let mut term = TestTerminal::new();
        term.render_widget(
            NoticeStack::new(&notices, IconSet::new(IconMode::Unicode)),
            Rect::new(0, 0, 80, 24),
        );
        assert!(term.line_contains(21, "✓ Saved successfully"));
        assert!(term.line_contains(22, "⚠ Could not delete: busy"));
    }
}
