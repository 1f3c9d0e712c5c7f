use std::fs::{self, File};
use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use mediakiosk::app::handler;
use mediakiosk::app::state::AppState;
use mediakiosk::app::{Controller, ControllerSettings};
use mediakiosk::cli::Args;
use mediakiosk::config::{self, Config};
use mediakiosk::device::watcher::{self, WatcherSettings};
use mediakiosk::event::{input, Event};
use mediakiosk::host::SystemHost;
use mediakiosk::playback::player::VlcPlayer;
use mediakiosk::playback::PlaybackController;
use mediakiosk::ui::Ui;

fn main() -> Result<()> {
    let args = Args::parse();

    let (file_config, config_error) = match config::find_config_file(args.config.as_deref()) {
        Some(path) => match config::load_config(&path) {
            Ok(cfg) => (Some(cfg), None),
            Err(e) => (None, Some(e)),
        },
        None => (None, None),
    };
    let config = Config::resolve(file_config, &args);

    if let Err(e) = init_logging(&config) {
        eprintln!("warning: logging disabled: {:#}", e);
    }
    if let Some(e) = config_error {
        warn!(error = %e, "ignoring config file, using defaults");
    }
    info!(?config, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    // Explicitly enable mouse motion tracking (SGR any-event mode)
    stdout.write_all(b"\x1b[?1003h")?;
    stdout.flush()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        crossterm::style::Print("\x1b[?1003l"),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!(error = %e, "terminated with error");
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn init_logging(config: &Config) -> Result<()> {
    if let Some(parent) = config.log_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("opening log file {}", config.log_file.display()))?;

    let filter = EnvFilter::try_from_env("MEDIAKIOSK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: &Config) -> Result<()> {
    // Device events: watcher thread -> controller
    let (device_tx, device_rx) = crossbeam_channel::unbounded();
    let watcher = match watcher::spawn_watcher(
        WatcherSettings {
            device_dir: config.device_dir.clone(),
            mount_settle: config.mount_settle,
        },
        device_tx,
    ) {
        Ok(handle) => Some(handle),
        Err(e) => {
            error!(error = %e, "running without USB detection");
            None
        }
    };
    let mut watcher_reported = false;

    // Terminal events: input thread -> main loop
    let (event_tx, event_rx) = crossbeam_channel::unbounded();
    let _input_handle = input::spawn_input_thread(event_tx);

    let player = VlcPlayer::new(config.player.clone(), config.player_args.clone());
    let playback = PlaybackController::new(player, &config.scratch_dir);
    let host = SystemHost::new(config.browser.clone(), config.wifi_use_sudo);
    let settings = ControllerSettings {
        services: config.services.clone(),
        slideshow_secs: config.slideshow_seconds,
        wifi_success_hold: config.wifi_success_hold,
        initial_state: if config.start_in_wifi_setup {
            AppState::WifiSetup
        } else {
            AppState::MainMenu
        },
    };
    let mut controller = Controller::new(settings, device_rx, playback, host);

    let mut ui = Ui::new();
    let ticker = crossbeam_channel::tick(config.tick_interval());

    loop {
        let mut inputs = Vec::new();
        {
            let view = controller.view();
            for event in event_rx.try_iter() {
                match event {
                    Event::Key(key) => inputs.extend(handler::handle_key_event(key, &view, &mut ui)),
                    Event::Mouse(mouse) => inputs.extend(handler::handle_mouse_event(mouse, &view, &mut ui)),
                    Event::Resize(_, _) => {} // Will re-render below
                }
            }
        }

        if controller.tick(&inputs) == AppState::Exiting {
            break;
        }

        if let Some(ref handle) = watcher {
            if !watcher_reported && !handle.is_alive() {
                warn!("device watcher stopped, USB changes will not be noticed");
                watcher_reported = true;
            }
        }

        // Render
        let view = controller.view();
        handler::refresh_hover(&view, &mut ui);
        terminal.draw(|frame| {
            ui.render(frame, &view);
        })?;

        ticker.recv()?;
    }

    controller.shutdown();
    info!("exiting");
    Ok(())
}
