//! Folder scanning for supported media.

use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::Error;
use crate::media::MediaItem;

/// List the supported media files directly inside `dir`, sorted by path.
///
/// An empty result is not an error; callers report it as "no media found".
/// Entries without a supported extension are never resolved, so broken links
/// or lock files next to the media do not matter. A supported name whose link
/// target is missing is skipped with a warning.
///
/// # Errors
/// Returns [`Error::ScanFailed`] if `dir` is missing, is not a directory, or
/// cannot be listed. No partial listing is returned in that case.
pub fn scan_directory(dir: &Path) -> Result<Vec<MediaItem>, Error> {
    let meta = std::fs::metadata(dir).map_err(|e| Error::scan_failed(dir, e))?;
    if !meta.is_dir() {
        return Err(Error::scan_failed(dir, "not a directory"));
    }

    let mut items: Vec<MediaItem> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| Error::scan_failed(dir, e))?;
        let Some(item) = MediaItem::from_path(entry.path()) else {
            continue;
        };
        let file_type = entry.file_type();
        let is_file = if file_type.is_symlink() {
            match std::fs::metadata(entry.path()) {
                Ok(target) => target.is_file(),
                Err(err) => {
                    warn!(path = %entry.path().display(), "skipping unreadable link: {err}");
                    false
                }
            }
        } else {
            file_type.is_file()
        };
        if is_file {
            items.push(item);
        }
    }
    items.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(dir = %dir.display(), found = items.len(), "folder scanned");
    Ok(items)
}
