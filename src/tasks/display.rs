use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use tracing::{debug, info};

use super::player::ProcessPlayer;
use crate::interfaces::{MediaRenderer, Size};

/// Renderer without a window: frames go to a PNG file (when configured) and
/// videos to an external player process.
pub struct HeadlessDisplay {
    frame_output: Option<PathBuf>,
    player: ProcessPlayer,
}

impl HeadlessDisplay {
    pub fn new(frame_output: Option<PathBuf>, player: ProcessPlayer) -> Self {
        Self {
            frame_output,
            player,
        }
    }

    pub fn player_mut(&mut self) -> &mut ProcessPlayer {
        &mut self.player
    }
}

impl MediaRenderer for HeadlessDisplay {
    fn show_image(&mut self, frame: &RgbaImage, target: Size) -> Result<()> {
        let (w, h) = frame.dimensions();
        info!(
            width = w,
            height = h,
            surface_w = target.width,
            surface_h = target.height,
            "frame presented"
        );
        if let Some(out) = &self.frame_output {
            write_frame(out, frame)?;
        }
        Ok(())
    }

    fn show_video(&mut self, path: &Path) -> Result<()> {
        self.player.play(path)
    }

    fn pause_playback(&mut self) {
        self.player.pause();
    }

    fn resume_playback(&mut self) {
        self.player.resume();
    }

    fn stop(&mut self) {
        self.player.stop();
    }
}

// Write beside the target and rename, so readers never see a torn frame.
fn write_frame(out: &Path, frame: &RgbaImage) -> Result<()> {
    let mut tmp = out.as_os_str().to_owned();
    tmp.push(".part");
    let tmp = PathBuf::from(tmp);
    frame
        .save_with_format(&tmp, ImageFormat::Png)
        .with_context(|| format!("failed to write frame to {}", tmp.display()))?;
    std::fs::rename(&tmp, out)
        .with_context(|| format!("failed to move frame into {}", out.display()))?;
    debug!(path = %out.display(), "frame written");
    Ok(())
}
