use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone)]
pub struct LayoutAreas {
    pub header: Rect,
    pub menu: Rect,
    pub status_bar: Rect,
    pub hints: Rect,
}

impl LayoutAreas {
    pub fn compute(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title + subtitle (bordered)
                Constraint::Min(5),    // Menu entries
                Constraint::Length(3), // USB / playback status (bordered)
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        // Keep the menu readable on wide screens
        let menu_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(15),
                Constraint::Percentage(70),
                Constraint::Percentage(15),
            ])
            .split(vertical[1]);

        Self {
            header: vertical[0],
            menu: menu_row[1],
            status_bar: vertical[2],
            hints: vertical[3],
        }
    }
}
