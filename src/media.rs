//! Media items and the library the engine navigates.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;

/// Still image extensions (lowercase, without dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];
/// Video container extensions (lowercase, without dot).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify `path` by its extension, case-insensitively.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase)?;
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Video)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub path: PathBuf,
    pub kind: MediaKind,
}

impl MediaItem {
    /// Build an item for a supported file, `None` for anything else.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let kind = MediaKind::from_path(&path)?;
        Some(Self { path, kind })
    }

    #[must_use]
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

/// The items of one folder selection, in slideshow order.
#[derive(Debug, Clone, Default)]
pub struct Library {
    items: Vec<MediaItem>,
}

impl Library {
    /// Take ownership of scanned items and shuffle them once.
    pub fn shuffled<R: Rng + ?Sized>(mut items: Vec<MediaItem>, rng: &mut R) -> Self {
        items.shuffle(rng);
        Self { items }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[MediaItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn classifies_by_extension_ignoring_case() {
        assert_eq!(
            MediaKind::from_path(Path::new("/a/b.JPG")),
            Some(MediaKind::Image)
        );
        assert_eq!(
            MediaKind::from_path(Path::new("clip.Mov")),
            Some(MediaKind::Video)
        );
        assert_eq!(MediaKind::from_path(Path::new("notes.txt")), None);
        assert_eq!(MediaKind::from_path(Path::new("README")), None);
    }

    #[test]
    fn shuffle_keeps_every_item() {
        let items: Vec<MediaItem> = ["a.jpg", "b.png", "c.mp4", "d.gif"]
            .into_iter()
            .filter_map(MediaItem::from_path)
            .collect();
        let mut rng = StdRng::seed_from_u64(9);
        let lib = Library::shuffled(items.clone(), &mut rng);
        assert_eq!(lib.len(), 4);
        for item in &items {
            assert!(lib.as_slice().contains(item));
        }
    }
}
