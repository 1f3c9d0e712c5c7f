pub mod handler;
pub mod screens;
pub mod state;

use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use tracing::{debug, info};

use crate::device::DeviceEvent;
use crate::host::HostActions;
use crate::library::MediaLibrary;
use crate::playback::player::MediaPlayer;
use crate::playback::{PlaybackController, PlaybackTarget};
use state::*;

/// Knobs the controller takes from configuration.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub services: Vec<StreamingService>,
    /// Seconds each photo stays on screen in a slideshow.
    pub slideshow_secs: u32,
    /// How long the Wi-Fi confirmation stays up before returning to the menu.
    pub wifi_success_hold: Duration,
    pub initial_state: AppState,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            services: default_services(),
            slideshow_secs: 3,
            wifi_success_hold: Duration::from_secs(2),
            initial_state: AppState::MainMenu,
        }
    }
}

/// Read-only snapshot the UI renders from.
#[derive(Debug)]
pub struct ScreenView<'a> {
    pub state: AppState,
    pub entries: Vec<Entry>,
    pub library: &'a MediaLibrary,
    pub wifi: &'a WifiForm,
    pub services: &'a [StreamingService],
    pub playing: Option<NowPlaying<'a>>,
}

/// The live player session as the status bar shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NowPlaying<'a> {
    pub target: &'a PlaybackTarget,
    pub looping: bool,
    /// Slideshow seconds per photo.
    pub per_item_secs: Option<u32>,
}

/// The foreground state machine. Single writer for the screen state, the
/// media library and the playback session.
pub struct Controller<P, H> {
    state: AppState,
    library: MediaLibrary,
    wifi: WifiForm,
    services: Vec<StreamingService>,
    slideshow_secs: u32,
    wifi_success_hold: Duration,
    entered_at: Instant,
    device_events: Receiver<DeviceEvent>,
    playback: PlaybackController<P>,
    host: H,
}

impl<P: MediaPlayer, H: HostActions> Controller<P, H> {
    pub fn new(
        settings: ControllerSettings,
        device_events: Receiver<DeviceEvent>,
        playback: PlaybackController<P>,
        host: H,
    ) -> Self {
        Self {
            state: settings.initial_state,
            library: MediaLibrary::new(),
            wifi: WifiForm::default(),
            services: settings.services,
            slideshow_secs: settings.slideshow_secs,
            wifi_success_hold: settings.wifi_success_hold,
            entered_at: Instant::now(),
            device_events,
            playback,
            host,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn library(&self) -> &MediaLibrary {
        &self.library
    }

    pub fn wifi(&self) -> &WifiForm {
        &self.wifi
    }

    pub fn playback(&self) -> &PlaybackController<P> {
        &self.playback
    }

    /// One iteration of the foreground loop: device events, then user
    /// inputs in order, then the autonomous transitions.
    pub fn tick(&mut self, inputs: &[Input]) -> AppState {
        let library_replaced = self.drain_device_events();

        for &input in inputs {
            if self.state == AppState::Exiting {
                break;
            }
            // The index was picked from the list of the previous stick
            if library_replaced && matches!(input, Input::Activate(Entry::PlayVideo(_))) {
                debug!(?input, "dropping selection made against a replaced library");
                continue;
            }
            self.apply_input(input);
        }

        self.advance();
        self.host.reap_finished();
        self.state
    }

    /// Returns whether any event replaced or cleared the library.
    fn drain_device_events(&mut self) -> bool {
        let mut replaced = false;
        while let Ok(event) = self.device_events.try_recv() {
            self.apply_device_event(event);
            replaced = true;
        }
        replaced
    }

    fn apply_device_event(&mut self, event: DeviceEvent) {
        match event {
            DeviceEvent::Inserted { mount_point, media } => {
                info!(
                    mount_point = %mount_point.display(),
                    photos = media.photos.len(),
                    music = media.music.len(),
                    videos = media.videos.len(),
                    "USB library updated"
                );
                self.library = MediaLibrary::mounted(mount_point, media);

                if self.state == AppState::UsbLoading {
                    let next = if self.library.has_media() {
                        AppState::UsbMixedChoice
                    } else {
                        AppState::UsbNoMedia
                    };
                    self.set_state(next);
                }
            }
            DeviceEvent::Removed => {
                info!("USB stick removed");
                self.playback.stop();
                self.library = MediaLibrary::new();
                if self.state.depends_on_usb() {
                    self.set_state(AppState::MainMenu);
                }
            }
        }
    }

    fn apply_input(&mut self, input: Input) {
        match input {
            Input::Quit => {
                self.playback.stop();
                self.set_state(AppState::Exiting);
            }
            Input::Cancel => self.cancel(),
            other => {
                let next = self.handle_input(other);
                if next == AppState::Exiting {
                    self.playback.stop();
                }
                self.set_state(next);
            }
        }
    }

    /// Escape hatch back to the main menu from any screen.
    fn cancel(&mut self) {
        if matches!(self.state, AppState::MainMenu | AppState::Exiting) {
            return;
        }
        self.playback.stop();
        self.set_state(AppState::MainMenu);
    }

    fn advance(&mut self) {
        match self.state {
            AppState::PlayingMedia if self.playback.has_ended() => {
                self.set_state(AppState::MainMenu);
            }
            AppState::WifiSuccess if self.entered_at.elapsed() >= self.wifi_success_hold => {
                self.set_state(AppState::MainMenu);
            }
            _ => {}
        }
    }

    fn set_state(&mut self, next: AppState) {
        if next == self.state {
            return;
        }
        info!(from = ?self.state, to = ?next, "screen change");
        if self.state == AppState::WifiSetup {
            self.wifi.active_field = None;
        }
        self.state = next;
        self.entered_at = Instant::now();
    }

    /// Selectable entries on the current screen, in display order.
    pub fn entries(&self) -> Vec<Entry> {
        match self.state {
            AppState::MainMenu => (0..self.services.len())
                .map(Entry::Streaming)
                .chain([Entry::Usb, Entry::Wifi, Entry::Exit])
                .collect(),
            AppState::WifiSetup => vec![
                Entry::SsidField,
                Entry::PasswordField,
                Entry::Connect,
                Entry::Back,
            ],
            AppState::UsbSubmenu => vec![Entry::Videos, Entry::Photos, Entry::Music, Entry::Back],
            AppState::UsbMixedChoice => {
                let mut entries = Vec::with_capacity(4);
                if !self.library.photos.is_empty() {
                    entries.push(Entry::Photos);
                }
                if !self.library.music.is_empty() {
                    entries.push(Entry::Music);
                }
                if !self.library.videos.is_empty() {
                    entries.push(Entry::Videos);
                }
                entries.push(Entry::Back);
                entries
            }
            AppState::UsbVideoSelection => (0..self.library.videos.len())
                .map(Entry::PlayVideo)
                .chain([Entry::PlayAllVideos, Entry::Back])
                .collect(),
            AppState::UsbLoading | AppState::UsbNoMedia => vec![Entry::Back],
            AppState::WifiSuccess | AppState::PlayingMedia | AppState::Exiting => Vec::new(),
        }
    }

    pub fn view(&self) -> ScreenView<'_> {
        ScreenView {
            state: self.state,
            entries: self.entries(),
            library: &self.library,
            wifi: &self.wifi,
            services: &self.services,
            playing: self.playback.current_target().map(|target| NowPlaying {
                target,
                looping: self.playback.is_looping(),
                per_item_secs: self.playback.per_item_secs(),
            }),
        }
    }

    /// Stop anything still playing. Call once when the loop ends.
    pub fn shutdown(&mut self) {
        debug!("controller shutting down");
        self.playback.stop();
    }
}
