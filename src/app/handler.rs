//! Terminal key and mouse events to controller inputs.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::state::{Entry, Input, WifiField};
use crate::app::ScreenView;
use crate::ui::Ui;

pub fn handle_key_event(key: KeyEvent, view: &ScreenView, ui: &mut Ui) -> Vec<Input> {
    let mut inputs = Vec::new();
    ui.menu.sync(view);

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        inputs.push(Input::Quit);
        return inputs;
    }
    if key.code == KeyCode::Esc {
        inputs.push(Input::Cancel);
        return inputs;
    }

    let count = view.entries.len();

    // Wi-Fi field focused: text goes into the field
    if Ui::is_typing(view) {
        match key.code {
            KeyCode::Char(c) => inputs.push(Input::Char(c)),
            KeyCode::Backspace => inputs.push(Input::Backspace),
            KeyCode::Enter => {
                let field = match view.wifi.active_field {
                    Some(WifiField::Ssid) => Entry::SsidField,
                    _ => Entry::PasswordField,
                };
                inputs.push(Input::Activate(field));
            }
            KeyCode::Up => ui.menu.select_prev(count),
            KeyCode::Down | KeyCode::Tab => ui.menu.select_next(count),
            _ => {}
        }
        return inputs;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => ui.menu.select_prev(count),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => ui.menu.select_next(count),
        KeyCode::Home | KeyCode::Char('g') => ui.menu.selected = 0,
        KeyCode::End | KeyCode::Char('G') => ui.menu.selected = count.saturating_sub(1),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(entry) = ui.menu.selected_entry(view) {
                inputs.push(Input::Activate(entry));
            }
        }
        KeyCode::Backspace => {
            if view.entries.contains(&Entry::Back) {
                inputs.push(Input::Activate(Entry::Back));
            }
        }
        _ => {}
    }

    inputs
}

pub fn handle_mouse_event(mouse: MouseEvent, view: &ScreenView, ui: &mut Ui) -> Vec<Input> {
    let mut inputs = Vec::new();
    ui.menu.sync(view);

    let x = mouse.column;
    let y = mouse.row;
    ui.mouse_pos = Some((x, y));

    let count = view.entries.len();
    let row = ui.menu.row_at(x, y, count);
    ui.menu.hover_row = row;

    match mouse.kind {
        MouseEventKind::Moved => {
            if let Some(row) = row {
                ui.menu.selected = row;
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(row) = row {
                ui.menu.selected = row;
                inputs.push(Input::Activate(view.entries[row]));
            }
        }
        MouseEventKind::ScrollUp => ui.menu.select_prev(count),
        MouseEventKind::ScrollDown => ui.menu.select_next(count),
        _ => {}
    }

    inputs
}

/// Refresh hover from the stored mouse position after the screen changed
/// under a stationary pointer.
pub fn refresh_hover(view: &ScreenView, ui: &mut Ui) {
    ui.menu.sync(view);
    let hover = ui
        .mouse_pos
        .and_then(|(x, y)| ui.menu.row_at(x, y, view.entries.len()));
    ui.menu.hover_row = hover;
}
