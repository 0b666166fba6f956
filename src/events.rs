use std::fmt;
use std::path::PathBuf;

use crate::engine::Settings;
use crate::error::Error;
use crate::interfaces::Size;

/// Everything that can happen to a running slideshow.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// "Open Folder" button.
    OpenFolderRequested,
    /// Open-folder key.
    KeyOpen,
    /// A folder chosen by an asynchronous picker.
    FolderSelected(PathBuf),
    FolderDropped(PathBuf),
    /// Previous item.
    KeyLeft,
    /// Next item.
    KeyRight,
    /// Play/pause.
    KeySpace,
    SettingsRequested,
    /// Settings confirmed by an asynchronous settings surface.
    SettingsApplied(Settings),
    WindowResized(Size),
    /// The advance countdown elapsed.
    ClockFired,
    VideoReachedEnd,
    /// An asynchronous renderer could not present the current item.
    RenderFailed(String),
    PointerMoved,
    PointerEntered,
    PointerLeft,
    CursorTimerFired,
}

/// User-facing messages; nothing the engine hits is fatal.
#[derive(Debug)]
pub enum Notice {
    Failed(Error),
    /// Every item in the library failed to render in a row.
    NothingPlayable,
    SettingsChanged(Settings),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(err) => write!(f, "{err}"),
            Self::NothingPlayable => f.write_str("none of the media in this folder could be shown"),
            Self::SettingsChanged(settings) => write!(
                f,
                "display duration set to {}",
                humantime::format_duration(settings.display_duration())
            ),
        }
    }
}

impl From<Error> for Notice {
    fn from(err: Error) -> Self {
        Self::Failed(err)
    }
}
