use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::ScreenView;
use crate::playback::PlaybackTarget;
use crate::ui::theme::Theme;

pub fn render_status_bar(frame: &mut Frame, area: Rect, view: &ScreenView, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    // Left: USB volume
    let usb_line = match &view.library.mount_point {
        Some(mount_point) => Line::from(vec![
            Span::styled(
                " \u{25CF} USB ", // ●
                Style::default().fg(theme.usb_present).add_modifier(Modifier::BOLD),
            ),
            Span::styled(mount_point.display().to_string(), Style::default().fg(theme.fg)),
            Span::styled(
                format!(
                    "  {} photos, {} songs, {} videos",
                    view.library.photos.len(),
                    view.library.music.len(),
                    view.library.videos.len()
                ),
                theme.dim_style,
            ),
        ]),
        None => Line::from(vec![
            Span::styled(" \u{25CB} USB ", Style::default().fg(theme.usb_absent)), // ○
            Span::styled("not connected", theme.dim_style),
        ]),
    };
    frame.render_widget(Paragraph::new(usb_line), cols[0]);

    // Right: what the external player is showing
    let Some(now) = view.playing else {
        return;
    };
    let name = match now.target {
        PlaybackTarget::File(path) => path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string()),
        PlaybackTarget::Playlist { kind, .. } => format!("{} playlist", kind),
    };
    let mut spans = vec![
        Span::styled(
            "\u{25B6} ", // ▶
            Style::default().fg(theme.playing_indicator).add_modifier(Modifier::BOLD),
        ),
        Span::styled(name, Style::default().fg(theme.fg)),
    ];
    if let Some(secs) = now.per_item_secs {
        spans.push(Span::styled(format!("  {}s each", secs), theme.dim_style));
    }
    if now.looping {
        spans.push(Span::styled("  \u{21BB} loop", theme.dim_style)); // ↻
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), cols[1]);
}
