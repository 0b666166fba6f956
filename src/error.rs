use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Library error type for slideshow operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The chosen folder could not be read (missing, not a directory, or unreadable).
    #[error("cannot read folder {path}: {reason}")]
    ScanFailed { path: PathBuf, reason: String },

    /// The scan completed but found no supported media.
    #[error("no supported media files found in {0}")]
    NoMediaFound(PathBuf),

    /// Something other than a directory was dropped onto the surface.
    #[error("please drop a folder, not a file: {0}")]
    InvalidDrop(PathBuf),

    /// Decoding or presenting an item failed.
    #[error("failed to render {path}: {reason}")]
    RenderFailed { path: PathBuf, reason: String },

    /// Display duration outside the accepted range.
    #[error("invalid display duration {got:?}: {reason}")]
    InvalidSettings { got: Duration, reason: String },
}

impl Error {
    pub(crate) fn scan_failed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ScanFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn render_failed(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        Self::RenderFailed {
            path: path.into(),
            reason: format!("{err:#}"),
        }
    }
}
