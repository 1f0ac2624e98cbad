//! Custom widget components

mod group_table;
mod header;
mod login_panel;
mod main_menu;
mod notice_stack;
mod settings_panel;
mod unit_pane;
mod units_view;

pub use group_table::GroupTable;
pub use header::MainHeader;
pub use login_panel::LoginPanel;
pub use main_menu::{MainMenu, MENU_ENTRIES};
pub use notice_stack::NoticeStack;
pub use settings_panel::SettingsPanel;
pub use unit_pane::UnitPaneView;
pub use units_view::UnitsView;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `text` to `max` display columns, ending in an ellipsis if shortened
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Kitchen", 10), "Kitchen");
        assert_eq!(truncate("Living Room Lamp", 8), "Living …");
        assert_eq!(truncate("Lamp", 0), "");
    }
}
