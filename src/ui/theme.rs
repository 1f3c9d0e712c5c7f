use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub fg: Color,
    pub border: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub hover_bg: Color,
    pub title_style: Style,
    pub subtitle_style: Style,
    pub dim_style: Style,
    pub field_style: Style,
    pub field_active_style: Style,
    pub usb_present: Color,
    pub usb_absent: Color,
    pub playing_indicator: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            border: Color::Cyan,
            highlight_bg: Color::Cyan,
            highlight_fg: Color::Black,
            hover_bg: Color::Indexed(236),
            title_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            subtitle_style: Style::default().fg(Color::Gray),
            dim_style: Style::default().fg(Color::DarkGray),
            field_style: Style::default().fg(Color::Gray),
            field_active_style: Style::default()
                .fg(Color::Rgb(255, 200, 80))
                .add_modifier(Modifier::BOLD),
            usb_present: Color::Rgb(80, 255, 120),
            usb_absent: Color::Rgb(255, 100, 100),
            playing_indicator: Color::Rgb(100, 220, 255),
        }
    }
}
