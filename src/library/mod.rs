pub mod scanner;

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Audio,
    Video,
}

/// Classified files found under one mount point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaFiles {
    pub photos: Vec<PathBuf>,
    pub music: Vec<PathBuf>,
    pub videos: Vec<PathBuf>,
}

/// Snapshot of the attached USB volume, owned by the controller.
///
/// Replaced wholesale when a stick is inserted and cleared when it is removed;
/// never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaLibrary {
    pub mount_point: Option<PathBuf>,
    pub photos: Vec<PathBuf>,
    pub music: Vec<PathBuf>,
    pub videos: Vec<PathBuf>,
}

impl MediaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mounted(mount_point: PathBuf, files: MediaFiles) -> Self {
        Self {
            mount_point: Some(mount_point),
            photos: files.photos,
            music: files.music,
            videos: files.videos,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mount_point.is_some()
    }

    pub fn has_media(&self) -> bool {
        !(self.photos.is_empty() && self.music.is_empty() && self.videos.is_empty())
    }
}
