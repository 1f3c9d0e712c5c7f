pub mod layout;
pub mod menu_pane;
pub mod theme;
pub mod widgets;

use ratatui::Frame;

use crate::app::state::AppState;
use crate::app::ScreenView;
use layout::LayoutAreas;
use menu_pane::MenuPane;
use theme::Theme;
use widgets::{header, hints, status_bar};

pub struct Ui {
    pub theme: Theme,
    pub menu: MenuPane,
    /// Last known mouse position (column, row) for hover tracking
    pub mouse_pos: Option<(u16, u16)>,
}

impl Ui {
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            menu: MenuPane::new(),
            mouse_pos: None,
        }
    }

    /// Keystrokes go to the focused Wi-Fi field instead of navigation.
    pub fn is_typing(view: &ScreenView) -> bool {
        view.state == AppState::WifiSetup && view.wifi.active_field.is_some()
    }

    pub fn render(&mut self, frame: &mut Frame, view: &ScreenView) {
        let areas = LayoutAreas::compute(frame.area());

        header::render_header(frame, areas.header, view.state, &self.theme);
        self.menu.render(frame, areas.menu, view, &self.theme);
        status_bar::render_status_bar(frame, areas.status_bar, view, &self.theme);
        hints::render_hints(frame, areas.hints, Self::is_typing(view), &self.theme);
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}
