use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::state::{AppState, Entry, WifiField};
use crate::app::ScreenView;
use crate::ui::theme::Theme;

/// The selectable list in the middle of every screen.
pub struct MenuPane {
    pub selected: usize,
    pub scroll_offset: usize,
    pub hover_row: Option<usize>,
    /// Inner list area from the last render, for mouse hit-testing.
    pub inner: Rect,
    shown_for: Option<AppState>,
}

impl MenuPane {
    pub fn new() -> Self {
        Self {
            selected: 0,
            scroll_offset: 0,
            hover_row: None,
            inner: Rect::default(),
            shown_for: None,
        }
    }

    /// Reset the cursor when the screen changes and keep it in range.
    pub fn sync(&mut self, view: &ScreenView) {
        if self.shown_for != Some(view.state) {
            self.shown_for = Some(view.state);
            self.selected = 0;
            self.scroll_offset = 0;
            self.hover_row = None;
        }
        let count = view.entries.len();
        if count == 0 {
            self.selected = 0;
        } else if self.selected >= count {
            self.selected = count - 1;
        }
    }

    pub fn select_next(&mut self, count: usize) {
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_prev(&mut self, count: usize) {
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }

    pub fn selected_entry(&self, view: &ScreenView) -> Option<Entry> {
        view.entries.get(self.selected).copied()
    }

    /// Entry index under the terminal cell `(x, y)`, if any.
    pub fn row_at(&self, x: u16, y: u16, count: usize) -> Option<usize> {
        let inner = self.inner;
        if x >= inner.x && x < inner.x + inner.width && y >= inner.y && y < inner.y + inner.height {
            let row = self.scroll_offset + (y - inner.y) as usize;
            (row < count).then_some(row)
        } else {
            None
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, view: &ScreenView, theme: &Theme) {
        self.sync(view);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        let inner = block.inner(area);
        self.inner = inner;

        let count = view.entries.len();
        if count == 0 {
            let content = Paragraph::new("").block(block);
            frame.render_widget(content, area);
            return;
        }

        // Auto-scroll to keep the selection visible
        let inner_height = inner.height as usize;
        let inner_width = inner.width as usize;
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        }
        if inner_height > 0 && self.selected >= self.scroll_offset + inner_height {
            self.scroll_offset = self.selected - inner_height + 1;
        }

        let sel_style = Style::default()
            .bg(theme.highlight_bg)
            .fg(theme.highlight_fg)
            .add_modifier(Modifier::BOLD);

        let items: Vec<ListItem> = view
            .entries
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(inner_height)
            .map(|(i, entry)| {
                let base = if i == self.selected {
                    sel_style
                } else if self.hover_row == Some(i) {
                    Style::default().fg(theme.fg).bg(theme.hover_bg)
                } else {
                    entry_style(*entry, view, theme)
                };
                let label = fit_to_width(&entry_label(*entry, view), inner_width.saturating_sub(2));
                ListItem::new(Line::from(Span::styled(format!("  {}", label), base)))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

impl Default for MenuPane {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate a string to fit within `max_width` columns, adding "…" if needed.
/// Pads with spaces so selection highlight spans the whole row.
fn fit_to_width(s: &str, max_width: usize) -> String {
    let str_width = UnicodeWidthStr::width(s);
    if str_width <= max_width {
        return format!("{}{}", s, " ".repeat(max_width - str_width));
    }
    let mut w = 0;
    let mut result = String::new();
    for ch in s.chars() {
        let ch_w = ch.width().unwrap_or(0);
        if w + ch_w + 1 > max_width {
            result.push('\u{2026}'); // …
            w += 1;
            break;
        }
        w += ch_w;
        result.push(ch);
    }
    result.push_str(&" ".repeat(max_width.saturating_sub(w)));
    result
}

fn entry_style(entry: Entry, view: &ScreenView, theme: &Theme) -> Style {
    let focused = match entry {
        Entry::SsidField => Some(WifiField::Ssid),
        Entry::PasswordField => Some(WifiField::Password),
        _ => None,
    };
    match focused {
        Some(field) if view.wifi.active_field == Some(field) => theme.field_active_style,
        Some(_) => theme.field_style,
        None => Style::default().fg(theme.fg),
    }
}

pub fn entry_label(entry: Entry, view: &ScreenView) -> String {
    let mixed = view.state == AppState::UsbMixedChoice;
    match entry {
        Entry::Streaming(i) => view
            .services
            .get(i)
            .map(|s| s.name.clone())
            .unwrap_or_default(),
        Entry::Usb => "Play USB".to_string(),
        Entry::Wifi => "Wi-Fi setup".to_string(),
        Entry::Exit => "Exit".to_string(),
        Entry::Back => "Back".to_string(),
        Entry::Videos if mixed => "Play videos".to_string(),
        Entry::Photos if mixed => "Play photos".to_string(),
        Entry::Music if mixed => "Play music".to_string(),
        Entry::Videos => "Videos".to_string(),
        Entry::Photos => "Pictures".to_string(),
        Entry::Music => "Music".to_string(),
        Entry::PlayVideo(i) => view
            .library
            .videos
            .get(i)
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        Entry::PlayAllVideos => "Play all as a slideshow".to_string(),
        Entry::SsidField => {
            let cursor = cursor(view, WifiField::Ssid);
            format!("SSID: {}{}", view.wifi.ssid, cursor)
        }
        Entry::PasswordField => {
            let cursor = cursor(view, WifiField::Password);
            format!("Password: {}{}", view.wifi.masked_password(), cursor)
        }
        Entry::Connect => "Connect".to_string(),
    }
}

fn cursor(view: &ScreenView, field: WifiField) -> &'static str {
    if view.wifi.active_field == Some(field) {
        "\u{2588}" // █
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_to_width() {
        assert_eq!(fit_to_width("Back", 6), "Back  ");
        assert_eq!(fit_to_width("holiday_video.mkv", 8), "holiday\u{2026}");
        assert_eq!(UnicodeWidthStr::width(fit_to_width("日本語のビデオ.mp4", 9).as_str()), 9);
    }
}
