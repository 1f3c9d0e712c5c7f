use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppState {
    MainMenu,
    WifiSetup,
    WifiSuccess,
    UsbSubmenu,
    UsbLoading,
    UsbMixedChoice,
    UsbVideoSelection,
    UsbNoMedia,
    PlayingMedia,
    Exiting,
}

impl AppState {
    /// Screens that only make sense while a stick is attached.
    pub fn depends_on_usb(self) -> bool {
        matches!(
            self,
            AppState::UsbSubmenu
                | AppState::UsbLoading
                | AppState::UsbMixedChoice
                | AppState::UsbVideoSelection
                | AppState::UsbNoMedia
                | AppState::PlayingMedia
        )
    }
}

/// A selectable item on the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// Index into the configured streaming services.
    Streaming(usize),
    Usb,
    Wifi,
    Exit,
    Back,
    Videos,
    Photos,
    Music,
    /// Index into the library's video list.
    PlayVideo(usize),
    PlayAllVideos,
    SsidField,
    PasswordField,
    Connect,
}

/// Discrete user input handed to the controller once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Activate(Entry),
    Char(char),
    Backspace,
    Cancel,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiField {
    Ssid,
    Password,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WifiForm {
    pub ssid: String,
    pub password: String,
    pub active_field: Option<WifiField>,
}

impl WifiForm {
    /// Focus `field`, or drop focus if it already has it.
    pub fn toggle_focus(&mut self, field: WifiField) {
        self.active_field = if self.active_field == Some(field) {
            None
        } else {
            Some(field)
        };
    }

    pub fn push(&mut self, c: char) {
        match self.active_field {
            Some(WifiField::Ssid) => self.ssid.push(c),
            Some(WifiField::Password) => self.password.push(c),
            None => {}
        }
    }

    pub fn pop(&mut self) {
        match self.active_field {
            Some(WifiField::Ssid) => {
                self.ssid.pop();
            }
            Some(WifiField::Password) => {
                self.password.pop();
            }
            None => {}
        }
    }

    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingService {
    pub name: String,
    pub url: String,
}

impl StreamingService {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

pub fn default_services() -> Vec<StreamingService> {
    vec![
        StreamingService::new("Netflix", "https://www.netflix.com"),
        StreamingService::new("Disney+", "https://www.disneyplus.com"),
        StreamingService::new("Prime Video", "https://www.primevideo.com"),
        StreamingService::new("Spotify", "https://open.spotify.com"),
        StreamingService::new("Apple Music", "https://music.apple.com"),
    ]
}
