use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::engine::{DEFAULT_CURSOR_HIDE_DELAY, Settings};
use crate::interfaces::Size;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Folder to open on startup.
    pub start_folder: Option<PathBuf>,
    /// Time an image stays on screen while playing.
    #[serde(with = "humantime_serde")]
    pub display_duration: Duration,
    /// Pointer inactivity before the cursor is hidden.
    #[serde(with = "humantime_serde")]
    pub cursor_hide_delay: Duration,
    /// Initial display surface size.
    pub surface: Size,
    /// Optional deterministic seed for shuffling and random picks.
    pub shuffle_seed: Option<u64>,
    /// Where the headless display writes the current frame (PNG).
    pub frame_output: Option<PathBuf>,
    /// Video player argv; the video path is appended. Empty disables video playback.
    pub video_player: Vec<String>,
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        Settings::new(self.display_duration).context("invalid display-duration")?;
        ensure!(
            !self.cursor_hide_delay.is_zero(),
            "cursor-hide-delay must be greater than zero"
        );
        ensure!(
            self.surface.width > 0 && self.surface.height > 0,
            "surface width and height must be greater than zero"
        );
        ensure!(
            self.video_player.iter().all(|arg| !arg.is_empty()),
            "video-player arguments must not be empty strings"
        );
        Ok(self)
    }

    /// Engine settings derived from a validated configuration.
    pub fn settings(&self) -> Result<Settings> {
        Ok(Settings::new(self.display_duration)?)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            start_folder: None,
            display_duration: Settings::DEFAULT_DURATION,
            cursor_hide_delay: DEFAULT_CURSOR_HIDE_DELAY,
            surface: Size::default(),
            shuffle_seed: None,
            frame_output: None,
            video_player: vec![
                "ffplay".into(),
                "-autoexit".into(),
                "-loglevel".into(),
                "error".into(),
            ],
        }
    }
}
