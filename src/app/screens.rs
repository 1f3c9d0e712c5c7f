//! Per-screen transition rules.

use tracing::{error, warn};

use super::state::{AppState, Entry, Input, WifiField};
use super::Controller;
use crate::error::Result;
use crate::host::HostActions;
use crate::playback::player::MediaPlayer;
use crate::playback::PlaylistKind;

impl<P: MediaPlayer, H: HostActions> Controller<P, H> {
    /// Route a non-global input to the current screen and return the next state.
    pub(super) fn handle_input(&mut self, input: Input) -> AppState {
        if let Input::Activate(entry) = input {
            if !self.entries().contains(&entry) {
                warn!(state = ?self.state, ?entry, "entry not on this screen");
                return self.state;
            }
        }

        match self.state {
            AppState::MainMenu => self.main_menu(input),
            AppState::WifiSetup => self.wifi_setup(input),
            AppState::UsbSubmenu => self.usb_submenu(input),
            AppState::UsbMixedChoice => self.usb_mixed_choice(input),
            AppState::UsbVideoSelection => self.usb_video_selection(input),
            AppState::UsbLoading | AppState::UsbNoMedia => match input {
                Input::Activate(Entry::Back) => AppState::UsbSubmenu,
                _ => self.state,
            },
            AppState::WifiSuccess | AppState::PlayingMedia | AppState::Exiting => self.state,
        }
    }

    fn main_menu(&mut self, input: Input) -> AppState {
        let Input::Activate(entry) = input else {
            return self.state;
        };
        match entry {
            Entry::Streaming(index) => {
                let service = &self.services[index];
                if let Err(e) = self.host.open_url(&service.url) {
                    error!(service = %service.name, error = %e, "could not open streaming service");
                }
                AppState::MainMenu
            }
            Entry::Usb => AppState::UsbSubmenu,
            Entry::Wifi => AppState::WifiSetup,
            Entry::Exit => AppState::Exiting,
            _ => self.state,
        }
    }

    fn wifi_setup(&mut self, input: Input) -> AppState {
        match input {
            Input::Char(c) => self.wifi.push(c),
            Input::Backspace => self.wifi.pop(),
            Input::Activate(Entry::SsidField) => self.wifi.toggle_focus(WifiField::Ssid),
            Input::Activate(Entry::PasswordField) => self.wifi.toggle_focus(WifiField::Password),
            Input::Activate(Entry::Connect) => {
                return match self.host.connect_wifi(&self.wifi.ssid, &self.wifi.password) {
                    Ok(()) => AppState::WifiSuccess,
                    Err(e) => {
                        warn!(ssid = %self.wifi.ssid, error = %e, "Wi-Fi connection failed");
                        self.state
                    }
                };
            }
            Input::Activate(Entry::Back) => return AppState::MainMenu,
            _ => {}
        }
        self.state
    }

    fn usb_submenu(&mut self, input: Input) -> AppState {
        match input {
            Input::Activate(Entry::Back) => AppState::MainMenu,
            Input::Activate(entry) => self.open_category(entry),
            _ => self.state,
        }
    }

    fn usb_mixed_choice(&mut self, input: Input) -> AppState {
        match input {
            Input::Activate(Entry::Back) => AppState::UsbSubmenu,
            Input::Activate(entry) => self.open_category(entry),
            _ => self.state,
        }
    }

    /// Photos and music start straight away; videos get a picker first.
    /// A category with nothing in it sends the user to the loading screen.
    fn open_category(&mut self, entry: Entry) -> AppState {
        match entry {
            Entry::Videos if self.library.videos.is_empty() => AppState::UsbLoading,
            Entry::Videos => AppState::UsbVideoSelection,
            Entry::Photos if self.library.photos.is_empty() => AppState::UsbLoading,
            Entry::Photos => {
                let started = self.playback.start_playlist(
                    PlaylistKind::Photos,
                    &self.library.photos,
                    true,
                    self.slideshow_secs,
                );
                self.playing_or_stay(started)
            }
            Entry::Music if self.library.music.is_empty() => AppState::UsbLoading,
            Entry::Music => {
                let started = self
                    .playback
                    .start_playlist(PlaylistKind::Music, &self.library.music, true, 0);
                self.playing_or_stay(started)
            }
            _ => self.state,
        }
    }

    fn usb_video_selection(&mut self, input: Input) -> AppState {
        match input {
            Input::Activate(Entry::PlayVideo(index)) => {
                let started = self.playback.start_single(&self.library.videos[index], false);
                self.playing_or_stay(started)
            }
            Input::Activate(Entry::PlayAllVideos) => {
                let started = self
                    .playback
                    .start_playlist(PlaylistKind::Videos, &self.library.videos, true, 0);
                self.playing_or_stay(started)
            }
            Input::Activate(Entry::Back) => AppState::UsbSubmenu,
            _ => self.state,
        }
    }

    fn playing_or_stay(&self, started: Result<()>) -> AppState {
        match started {
            Ok(()) => AppState::PlayingMedia,
            Err(e) => {
                error!(error = %e, "could not start playback");
                self.state
            }
        }
    }
}
