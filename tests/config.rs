use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use mediakiosk::cli::Args;
use mediakiosk::config::{find_config_file, load_config, Config, FileConfig};
use tempfile::TempDir;

#[test]
fn test_file_overrides_default() {
    let file = FileConfig {
        player: Some("mpv".to_string()),
        slideshow_seconds: Some(5),
        mount_settle_ms: Some(250),
        ..FileConfig::default()
    };
    let config = Config::resolve(Some(file), &Args::default());
    assert_eq!(config.player, "mpv");
    assert_eq!(config.slideshow_seconds, 5);
    assert_eq!(config.mount_settle, Duration::from_millis(250));
}

#[test]
fn test_cli_overrides_file() {
    let file = FileConfig {
        player: Some("mpv".to_string()),
        tick_hz: Some(10),
        scratch_dir: Some(PathBuf::from("/var/tmp")),
        ..FileConfig::default()
    };
    let args = Args {
        player: Some("cvlc".to_string()),
        tick_hz: Some(60),
        ..Args::default()
    };
    let config = Config::resolve(Some(file), &args);
    assert_eq!(config.player, "cvlc"); // CLI wins
    assert_eq!(config.tick_hz, 60);
    assert_eq!(config.scratch_dir, PathBuf::from("/var/tmp")); // no flag, file wins
}

#[test]
fn test_load_json_with_services_and_unknown_keys() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "browser": ["firefox", "--kiosk"],
            "services": [{"name": "YouTube", "url": "https://www.youtube.com"}],
            "wifi_use_sudo": false,
            "theme": "dark"
        }"#,
    )
    .unwrap();

    let file = load_config(&path).unwrap();
    let config = Config::resolve(Some(file), &Args::default());
    assert_eq!(config.browser, vec!["firefox", "--kiosk"]);
    assert_eq!(config.services.len(), 1);
    assert_eq!(config.services[0].name, "YouTube");
    assert!(!config.wifi_use_sudo);
}

#[test]
fn test_load_invalid_json_is_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.json");
    fs::write(&path, "{ player = vlc }").unwrap();
    assert!(load_config(&path).is_err());
}

#[test]
fn test_load_missing_file_is_error() {
    assert!(load_config(&PathBuf::from("/nonexistent/mediakiosk.json")).is_err());
}

#[test]
fn test_explicit_config_path_is_used_as_is() {
    let explicit = PathBuf::from("/etc/mediakiosk/kiosk.json");
    assert_eq!(find_config_file(Some(&explicit)), Some(explicit.clone()));
}

#[test]
fn test_wifi_setup_flag() {
    let args = Args {
        wifi_setup: true,
        ..Args::default()
    };
    assert!(Config::resolve(None, &args).start_in_wifi_setup);
}
