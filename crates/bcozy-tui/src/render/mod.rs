//! Main render/view function (View in TEA pattern)


use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use bcozy_app::state::{AppState, UiMode};

use super::{layout, widgets};
use crate::theme::{icons::IconSet, palette};

/// Render the complete UI. Pure with respect to `state`.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area, state.menu_maximized);
    let icons = IconSet::new(state.icon_mode());

    frame.render_widget(widgets::MainHeader::new(state, icons), areas.header);
    frame.render_widget(widgets::MainMenu::new(state, icons), areas.menu);

    match state.ui_mode {
        UiMode::Units => {
            frame.render_widget(widgets::UnitsView::new(state, icons), areas.content);
        }
        UiMode::Groups => {
            frame.render_widget(widgets::GroupTable::new(state, icons), areas.content);
        }
        UiMode::Settings => {
            frame.render_widget(widgets::SettingsPanel::new(state, icons), areas.content);
        }
        UiMode::Login => {
            // The panel floats over the unit panes
            frame.render_widget(widgets::UnitsView::new(state, icons), areas.content);
            frame.render_widget(widgets::LoginPanel::new(state, icons), areas.content);
        }
    }

    frame.render_widget(
        widgets::NoticeStack::new(&state.notices, icons),
        areas.content,
    );
}
