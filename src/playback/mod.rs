pub mod player;
pub mod playlist;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result};
use player::{LaunchRequest, MediaPlayer, PlayerProcess};

/// Which scratch playlist a playlist-backed session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistKind {
    Photos,
    Music,
    Videos,
}

impl PlaylistKind {
    pub fn file_name(self) -> &'static str {
        match self {
            PlaylistKind::Photos => "usb_photos.m3u",
            PlaylistKind::Music => "usb_music.m3u",
            PlaylistKind::Videos => "usb_videos.m3u",
        }
    }
}

impl fmt::Display for PlaylistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaylistKind::Photos => "photo",
            PlaylistKind::Music => "music",
            PlaylistKind::Videos => "video",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackTarget {
    File(PathBuf),
    Playlist { kind: PlaylistKind, path: PathBuf },
}

struct PlaybackSession {
    target: PlaybackTarget,
    looped: bool,
    per_item_secs: Option<u32>,
    process: Box<dyn PlayerProcess>,
}

/// Owns the one external player process that may be on screen.
pub struct PlaybackController<P> {
    player: P,
    scratch_dir: PathBuf,
    session: Option<PlaybackSession>,
}

impl<P: MediaPlayer> PlaybackController<P> {
    pub fn new(player: P, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            player,
            scratch_dir: scratch_dir.into(),
            session: None,
        }
    }

    /// Play one file, replacing any current session.
    pub fn start_single(&mut self, path: &Path, looped: bool) -> Result<()> {
        self.stop();
        self.launch(PlaybackTarget::File(path.to_path_buf()), looped, None)
    }

    /// Write the scratch playlist for `kind` and play it, replacing any
    /// current session. `per_item_secs` only affects photo slideshows.
    pub fn start_playlist(
        &mut self,
        kind: PlaylistKind,
        paths: &[PathBuf],
        looped: bool,
        per_item_secs: u32,
    ) -> Result<()> {
        self.stop();
        if paths.is_empty() {
            return Err(Error::EmptyPlaylist { kind });
        }

        let path = self.scratch_dir.join(kind.file_name());
        playlist::write_m3u(&path, paths)?;

        let per_item_secs = match kind {
            PlaylistKind::Photos if per_item_secs > 0 => Some(per_item_secs),
            _ => None,
        };
        self.launch(PlaybackTarget::Playlist { kind, path }, looped, per_item_secs)
    }

    fn launch(&mut self, target: PlaybackTarget, looped: bool, per_item_secs: Option<u32>) -> Result<()> {
        let request = LaunchRequest {
            target: match &target {
                PlaybackTarget::File(path) => path.clone(),
                PlaybackTarget::Playlist { path, .. } => path.clone(),
            },
            fullscreen: true,
            looped,
            per_item_secs,
        };
        let process = self.player.launch(&request)?;
        info!(?target, looped, ?per_item_secs, "playback started");
        self.session = Some(PlaybackSession {
            target,
            looped,
            per_item_secs,
            process,
        });
        Ok(())
    }

    /// Terminate the live session, if any. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.process.terminate();
            info!(target = ?session.target, "playback stopped");
        }
    }

    /// Poll the player without blocking. Returns `true` once, the first time
    /// the process is seen to have exited, and forgets the session.
    pub fn has_ended(&mut self) -> bool {
        let ended = match self.session.as_mut() {
            Some(session) => session.process.has_exited(),
            None => false,
        };
        if ended {
            if let Some(session) = self.session.take() {
                info!(target = ?session.target, "player exited");
            }
        }
        ended
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_target(&self) -> Option<&PlaybackTarget> {
        self.session.as_ref().map(|s| &s.target)
    }

    pub fn is_looping(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.looped)
    }

    pub fn per_item_secs(&self) -> Option<u32> {
        self.session.as_ref().and_then(|s| s.per_item_secs)
    }
}

impl<P> Drop for PlaybackController<P> {
    fn drop(&mut self) {
        if let Some(mut session) = self.session.take() {
            warn!(target = ?session.target, "stopping player left running at shutdown");
            session.process.terminate();
        }
    }
}
