use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IoResultExt, Result};

pub const PLAYLIST_HEADER: &str = "#EXTM3U";

/// Write an M3U playlist to `path`, replacing whatever was there.
pub fn write_m3u(path: &Path, entries: &[PathBuf]) -> Result<()> {
    let mut content = String::from(PLAYLIST_HEADER);
    content.push('\n');
    for entry in entries {
        content.push_str(&entry.to_string_lossy());
        content.push('\n');
    }
    fs::write(path, content).playlist_context(path)
}
