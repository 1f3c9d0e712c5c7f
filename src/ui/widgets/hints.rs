use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::ui::theme::Theme;

const NAVIGATION: &[(&str, &str)] = &[
    ("\u{2191}/\u{2193}", "Move"),
    ("Enter", "Select"),
    ("Backspace", "Back"),
    ("Esc", "Main menu"),
    ("Ctrl+C", "Quit"),
];

const TYPING: &[(&str, &str)] = &[
    ("Type", "Edit field"),
    ("Enter", "Done"),
    ("Esc", "Main menu"),
    ("Ctrl+C", "Quit"),
];

pub fn render_hints(frame: &mut Frame, area: Rect, typing: bool, theme: &Theme) {
    let bindings = if typing { TYPING } else { NAVIGATION };

    let mut spans = Vec::with_capacity(bindings.len() * 2);
    for (key, desc) in bindings {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(theme.border).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!("{}  ", desc), theme.dim_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
