use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::state::AppState;
use crate::ui::theme::Theme;

/// Title and optional subtitle for each screen.
pub fn screen_text(state: AppState) -> (&'static str, Option<&'static str>) {
    match state {
        AppState::MainMenu => ("Media Center Pi", None),
        AppState::WifiSetup => ("Wi-Fi Setup", Some("Enter the network details:")),
        AppState::WifiSuccess => ("Wi-Fi connected!", Some("Returning to the main menu...")),
        AppState::UsbSubmenu => ("Select USB media type", None),
        AppState::UsbLoading => ("Loading USB...", Some("Please wait or insert a USB stick.")),
        AppState::UsbNoMedia => (
            "USB detected, but no media.",
            Some("Insert a USB stick with photos, music or videos."),
        ),
        AppState::UsbMixedChoice => ("Mixed USB content", Some("What would you like to play?")),
        AppState::UsbVideoSelection => ("Select a video from the USB", None),
        AppState::PlayingMedia => (
            "Playing media...",
            Some("Press ESC to stop and return to the menu."),
        ),
        AppState::Exiting => ("Goodbye", None),
    }
}

pub fn render_header(frame: &mut Frame, area: Rect, state: AppState, theme: &Theme) {
    let (title, subtitle) = screen_text(state);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    let mut lines = vec![Line::from(Span::styled(title, theme.title_style))];
    if let Some(subtitle) = subtitle {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(subtitle, theme.subtitle_style)));
    }

    let content = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(content, area);
}
