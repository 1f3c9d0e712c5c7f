use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use tracing::{debug, info};

use crate::error::{IoResultExt, Result};

/// What the external player should open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// A media file or a playlist file.
    pub target: PathBuf,
    pub fullscreen: bool,
    pub looped: bool,
    /// Seconds each still image stays on screen; `None` leaves the player default.
    pub per_item_secs: Option<u32>,
}

/// An external player that can be launched on a file or playlist.
pub trait MediaPlayer {
    fn launch(&self, request: &LaunchRequest) -> Result<Box<dyn PlayerProcess>>;
}

/// A running player instance.
pub trait PlayerProcess {
    /// Non-blocking liveness check.
    fn has_exited(&mut self) -> bool;

    /// Kill the process. Must tolerate a process that already exited.
    fn terminate(&mut self);
}

impl PlayerProcess for Child {
    fn has_exited(&mut self) -> bool {
        // A process we can no longer query is as good as gone
        !matches!(self.try_wait(), Ok(None))
    }

    fn terminate(&mut self) {
        if let Err(e) = self.kill() {
            debug!(pid = self.id(), error = %e, "player already gone");
        }
        let _ = self.wait();
    }
}

pub const DEFAULT_PLAYER: &str = "vlc";

pub fn default_player_args() -> Vec<String> {
    vec!["--no-video-title-show".to_string(), "--no-osd".to_string()]
}

/// Runs VLC (or a binary that accepts the same flags) as a child process.
#[derive(Debug, Clone)]
pub struct VlcPlayer {
    program: String,
    base_args: Vec<String>,
}

impl VlcPlayer {
    pub fn new(program: impl Into<String>, base_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            base_args,
        }
    }

    fn args(&self, request: &LaunchRequest) -> Vec<String> {
        let mut args = Vec::with_capacity(self.base_args.len() + 4);
        if request.fullscreen {
            args.push("--fullscreen".to_string());
        }
        args.extend(self.base_args.iter().cloned());
        if request.looped {
            args.push("--loop".to_string());
        }
        if let Some(secs) = request.per_item_secs.filter(|s| *s > 0) {
            args.push(format!("--image-duration={}", secs));
        }
        args.push(request.target.to_string_lossy().to_string());
        args
    }
}

impl Default for VlcPlayer {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER, default_player_args())
    }
}

impl MediaPlayer for VlcPlayer {
    fn launch(&self, request: &LaunchRequest) -> Result<Box<dyn PlayerProcess>> {
        let args = self.args(request);
        info!(program = %self.program, ?args, "launching player");

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .player_context(&self.program)?;

        Ok(Box::new(child))
    }
}
