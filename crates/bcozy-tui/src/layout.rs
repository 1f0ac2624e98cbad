//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Menu width with labels
pub const MENU_WIDTH_MAXIMIZED: u16 = 20;
/// Menu width with icons only
pub const MENU_WIDTH_MINIMIZED: u16 = 5;

const HEADER_HEIGHT: u16 = 3;
const NOTICE_WIDTH: u16 = 56;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, current screen and login status
    pub header: Rect,

    /// Main menu sidebar
    pub menu: Rect,

    /// Active screen
    pub content: Rect,
}

/// Split the terminal into header, main menu and content
pub fn create(area: Rect, menu_maximized: bool) -> ScreenAreas {
    let [header, body] =
        Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(3)]).areas(area);

    let menu_width = if menu_maximized {
        MENU_WIDTH_MAXIMIZED
    } else {
        MENU_WIDTH_MINIMIZED
    };
    let [menu, content] =
        Layout::horizontal([Constraint::Length(menu_width), Constraint::Min(10)]).areas(body);

    ScreenAreas {
        header,
        menu,
        content,
    }
}

/// Center a fixed-size rect within `area`, clamped to its size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    Rect::new(x, y, w, h)
}

/// Bottom-right corner of `content` sized for `count` notice lines
pub fn notice_area(content: Rect, count: usize) -> Rect {
    let height = (count as u16 + 2).min(content.height);
    let width = NOTICE_WIDTH.min(content.width);
    Rect::new(
        content.right() - width,
        content.bottom() - height,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maximized_menu_is_wider() {
        let area = Rect::new(0, 0, 80, 24);
        let max = create(area, true);
        let min = create(area, false);
        assert_eq!(max.menu.width, MENU_WIDTH_MAXIMIZED);
        assert_eq!(min.menu.width, MENU_WIDTH_MINIMIZED);
        assert!(min.content.width > max.content.width);
    }

    #[test]
    fn test_areas_contiguous() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = create(area, true);
        assert_eq!(layout.header.height, HEADER_HEIGHT);
        assert_eq!(layout.menu.y, HEADER_HEIGHT);
        assert_eq!(layout.content.height, 24 - HEADER_HEIGHT);
        assert_eq!(layout.menu.width + layout.content.width, 80);
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
        assert_eq!(centered_rect(100, 30, area), area);
    }

    #[test]
    fn test_notice_area_in_bottom_right() {
        let content = Rect::new(20, 3, 60, 21);
        let area = notice_area(content, 2);
        assert_eq!(area.height, 4);
        assert_eq!(area.right(), content.right());
        assert_eq!(area.bottom(), content.bottom());
    }
}
