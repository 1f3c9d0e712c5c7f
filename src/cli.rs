use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    name = "mediakiosk",
    about = "Kiosk media console: streaming shortcuts, USB photos/music/videos and Wi-Fi setup",
    long_about = None,
    version,
)]
pub struct Args {
    /// Path to JSON config file [default: <config dir>/mediakiosk/config.json]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// External media player program [default: vlc]
    #[arg(short, long)]
    pub player: Option<String>,

    /// Directory for the scratch playlists [default: system temp dir]
    #[arg(long, value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Controller ticks per second [default: 30]
    #[arg(long)]
    pub tick_hz: Option<u32>,

    /// Log file [default: <cache dir>/mediakiosk/mediakiosk.log]
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Start on the Wi-Fi setup screen
    #[arg(long)]
    pub wifi_setup: bool,
}
