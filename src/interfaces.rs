//! Collaborators the engine calls out to.
//!
//! The engine never talks to a window system, a decoder or a timer directly;
//! hosts plug concrete implementations in through these traits.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use image::RgbaImage;
use serde::Deserialize;
use tracing::debug;

use crate::engine::Settings;
use crate::events::Notice;
use crate::processing::orientation::decode_upright;

/// Pixel size of the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
        }
    }
}

/// Timers the engine drives. Each kind has at most one pending countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    /// Advances past the image on screen.
    Advance,
    /// Hides the pointer after a stretch without movement.
    Cursor,
}

pub trait MediaRenderer {
    /// Present an already upright, aspect-fitted frame on a surface of `target` size.
    fn show_image(&mut self, frame: &RgbaImage, target: Size) -> Result<()>;
    /// Load `path` and start playing it. End of media comes back as an event.
    fn show_video(&mut self, path: &Path) -> Result<()>;
    fn pause_playback(&mut self);
    fn resume_playback(&mut self);
    /// Stop any video and release it.
    fn stop(&mut self);
}

pub trait Clock {
    /// Start (or restart) `timer`; a pending countdown of the same kind is replaced.
    fn start(&mut self, timer: Timer, duration: Duration);
    fn stop(&mut self, timer: Timer);
}

/// Window-level surface: prompts, dialogs and pointer state.
pub trait Shell {
    fn notify(&mut self, notice: &Notice);
    /// Ask the user for a folder. `None` when cancelled or unsupported.
    fn pick_folder(&mut self) -> Option<PathBuf>;
    /// Let the user edit settings. `None` leaves them unchanged.
    fn edit_settings(&mut self, current: &Settings) -> Option<Settings>;
    fn set_cursor_visible(&mut self, visible: bool);
}

/// Produces upright frames for image items.
pub trait FrameSource {
    fn load(&mut self, path: &Path) -> Result<Arc<RgbaImage>>;
}

/// Decodes from disk and keeps the most recent upright frame, so re-rendering
/// the same image at a new size only repeats the scale step.
#[derive(Debug, Default)]
pub struct DiskFrames {
    last: Option<(PathBuf, Arc<RgbaImage>)>,
}

impl FrameSource for DiskFrames {
    fn load(&mut self, path: &Path) -> Result<Arc<RgbaImage>> {
        if let Some((cached, frame)) = &self.last
            && cached == path
        {
            debug!(path = %path.display(), "frame cache hit");
            return Ok(Arc::clone(frame));
        }
        let frame = Arc::new(decode_upright(path)?);
        self.last = Some((path.to_path_buf(), Arc::clone(&frame)));
        Ok(frame)
    }
}
