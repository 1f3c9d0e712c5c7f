//! Error types shared by the device, playback and config layers.
//!
//! The watcher and controller never surface these to the screen; they are
//! logged and degrade to "no event" or "state unchanged".

use snafu::{ResultExt, Snafu};
use std::path::PathBuf;

use crate::playback::PlaylistKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// A helper program could not be started at all.
    #[snafu(display("failed to execute command '{command}'"))]
    CommandExecution {
        command: String,
        source: std::io::Error,
    },

    /// A helper program ran but reported failure.
    #[snafu(display("command '{command}' exited with code {code}: {stderr}"))]
    CommandExit {
        command: String,
        code: i32,
        stderr: String,
    },

    #[snafu(display("failed to parse lsblk output: {message}"))]
    LsblkParse { message: String },

    #[snafu(display("failed to watch {} for device nodes", path.display()))]
    DeviceWatch {
        path: PathBuf,
        source: notify::Error,
    },

    #[snafu(display("failed to write playlist at {}", path.display()))]
    PlaylistWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to launch player '{program}'"))]
    PlayerLaunch {
        program: String,
        source: std::io::Error,
    },

    #[snafu(display("no browser command configured"))]
    NoBrowser,

    #[snafu(display("refusing to start an empty {kind} playlist"))]
    EmptyPlaylist { kind: PlaylistKind },

    #[snafu(display("failed to read config file {}", path.display()))]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to parse config file {}", path.display()))]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[snafu(display("failed to spawn the device watcher thread"))]
    ThreadSpawn { source: std::io::Error },
}

/// Context helpers for `io::Error` results.
pub trait IoResultExt<T> {
    fn command_context(self, command: impl Into<String>) -> Result<T>;

    fn playlist_context(self, path: impl Into<PathBuf>) -> Result<T>;

    fn player_context(self, program: impl Into<String>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn command_context(self, command: impl Into<String>) -> Result<T> {
        self.context(CommandExecutionSnafu {
            command: command.into(),
        })
    }

    fn playlist_context(self, path: impl Into<PathBuf>) -> Result<T> {
        self.context(PlaylistWriteSnafu { path: path.into() })
    }

    fn player_context(self, program: impl Into<String>) -> Result<T> {
        self.context(PlayerLaunchSnafu {
            program: program.into(),
        })
    }
}

/// Turns a finished `Command::output()` into `Ok(stdout)` or a `CommandExit`.
pub fn check_output(command: &str, output: std::process::Output) -> Result<String> {
    if !output.status.success() {
        return Err(Error::CommandExit {
            command: command.to_string(),
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
