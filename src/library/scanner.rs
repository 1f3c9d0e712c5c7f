use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use super::{MediaFiles, MediaKind};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov", "webm"];

/// Classify a file by the end of its name, ignoring case. A bare `.jpg`
/// counts as a photo.
pub fn classify(path: &Path) -> Option<MediaKind> {
    let name = path.file_name()?.to_str()?.to_lowercase();
    let has_ext = |exts: &[&str]| {
        exts.iter()
            .any(|ext| name.strip_suffix(*ext).is_some_and(|stem| stem.ends_with('.')))
    };
    if has_ext(IMAGE_EXTENSIONS) {
        Some(MediaKind::Photo)
    } else if has_ext(AUDIO_EXTENSIONS) {
        Some(MediaKind::Audio)
    } else if has_ext(VIDEO_EXTENSIONS) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Walk `root` and sort its media files into photos, music and videos.
///
/// A missing root is not an error: the stick may have been pulled between the
/// mount and the scan, so the result is simply empty.
pub fn scan(root: &Path) -> MediaFiles {
    let mut files = MediaFiles::default();

    if !root.exists() {
        debug!(root = %root.display(), "scan root does not exist");
        return files;
    }

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        match classify(path) {
            Some(MediaKind::Photo) => files.photos.push(path.to_path_buf()),
            Some(MediaKind::Audio) => files.music.push(path.to_path_buf()),
            Some(MediaKind::Video) => files.videos.push(path.to_path_buf()),
            None => {}
        }
    }

    debug!(
        root = %root.display(),
        photos = files.photos.len(),
        music = files.music.len(),
        videos = files.videos.len(),
        "scan finished"
    );
    files
}
