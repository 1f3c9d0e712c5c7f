use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::state::{default_services, StreamingService};
use crate::error::{ConfigParseSnafu, ConfigReadSnafu, Result};
use crate::playback::player::{default_player_args, DEFAULT_PLAYER};

const APP_DIR: &str = "mediakiosk";
const DEFAULT_SLIDESHOW_SECONDS: u32 = 3;
const DEFAULT_TICK_HZ: u32 = 30;
const DEFAULT_MOUNT_SETTLE_MS: u64 = 1000;
const DEFAULT_WIFI_SUCCESS_MS: u64 = 2000;
const DEFAULT_LOG_LEVEL: &str = "info";

fn default_browser() -> Vec<String> {
    vec!["chromium-browser".to_string(), "--kiosk".to_string()]
}

fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join("mediakiosk.log")
}

/// On-disk settings. Every key is optional and unknown keys are ignored.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
pub struct FileConfig {
    pub player: Option<String>,
    pub player_args: Option<Vec<String>>,
    pub slideshow_seconds: Option<u32>,
    pub scratch_dir: Option<PathBuf>,
    pub tick_hz: Option<u32>,
    pub mount_settle_ms: Option<u64>,
    pub device_dir: Option<PathBuf>,
    pub browser: Option<Vec<String>>,
    pub services: Option<Vec<StreamingService>>,
    pub wifi_use_sudo: Option<bool>,
    pub wifi_success_ms: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub player: String,
    pub player_args: Vec<String>,
    pub slideshow_seconds: u32,
    pub scratch_dir: PathBuf,
    pub tick_hz: u32,
    pub mount_settle: Duration,
    pub device_dir: PathBuf,
    pub browser: Vec<String>,
    pub services: Vec<StreamingService>,
    pub wifi_use_sudo: bool,
    pub wifi_success_hold: Duration,
    pub log_file: PathBuf,
    pub log_level: String,
    pub start_in_wifi_setup: bool,
}

impl Config {
    /// CLI flags win over the file, the file wins over built-in defaults.
    pub fn resolve(file: Option<FileConfig>, args: &crate::cli::Args) -> Self {
        let file = file.unwrap_or_default();
        Config {
            player: args
                .player
                .clone()
                .or(file.player)
                .unwrap_or_else(|| DEFAULT_PLAYER.to_string()),
            player_args: file.player_args.unwrap_or_else(default_player_args),
            slideshow_seconds: file.slideshow_seconds.unwrap_or(DEFAULT_SLIDESHOW_SECONDS),
            scratch_dir: args
                .scratch_dir
                .clone()
                .or(file.scratch_dir)
                .unwrap_or_else(std::env::temp_dir),
            tick_hz: args
                .tick_hz
                .or(file.tick_hz)
                .unwrap_or(DEFAULT_TICK_HZ)
                .max(1),
            mount_settle: Duration::from_millis(file.mount_settle_ms.unwrap_or(DEFAULT_MOUNT_SETTLE_MS)),
            device_dir: file.device_dir.unwrap_or_else(|| PathBuf::from("/dev")),
            browser: file.browser.unwrap_or_else(default_browser),
            services: file.services.unwrap_or_else(default_services),
            wifi_use_sudo: file.wifi_use_sudo.unwrap_or(true),
            wifi_success_hold: Duration::from_millis(file.wifi_success_ms.unwrap_or(DEFAULT_WIFI_SUCCESS_MS)),
            log_file: args
                .log_file
                .clone()
                .or(file.log_file)
                .unwrap_or_else(default_log_file),
            log_level: file.log_level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            start_in_wifi_setup: args.wifi_setup,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_hz
    }
}

pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_owned());
    }
    let path = dirs::config_dir()?.join(APP_DIR).join("config.json");
    path.exists().then_some(path)
}

pub fn load_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).context(ConfigReadSnafu { path })?;
    let config: FileConfig = serde_json::from_str(&content).context(ConfigParseSnafu { path })?;
    Ok(config)
}
