//! Slideshow navigation engine.
//!
//! Owns the library, the history with its redo queue and the play/pause
//! state. Every input arrives as an [`Event`] through [`Engine::handle`];
//! output goes to the [`MediaRenderer`], [`Clock`] and [`Shell`]
//! collaborators. The engine is synchronous and single-threaded.

pub mod history;
pub mod playback;
pub mod selection;
pub mod settings;

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use rand::rngs::StdRng;
use tracing::{debug, error, info, warn};

pub use history::History;
pub use playback::{Phase, PlaybackState};
pub use settings::Settings;

use crate::error::Error;
use crate::events::{Event, Notice};
use crate::interfaces::{Clock, FrameSource, MediaRenderer, Shell, Size, Timer};
use crate::media::{Library, MediaItem, MediaKind};
use crate::processing::layout::fit_within;
use crate::scan::scan_directory;

pub const DEFAULT_CURSOR_HIDE_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

pub struct Engine<R, C, S, F> {
    library: Library,
    history: History,
    playback: PlaybackState,
    settings: Settings,
    surface: Size,
    cursor_hide_delay: Duration,
    cursor_visible: bool,
    // Library indices that failed since the last item that actually played.
    failed: HashSet<usize>,
    rng: StdRng,
    renderer: R,
    clock: C,
    shell: S,
    frames: F,
}

impl<R, C, S, F> Engine<R, C, S, F>
where
    R: MediaRenderer,
    C: Clock,
    S: Shell,
    F: FrameSource,
{
    pub fn new(renderer: R, clock: C, shell: S, frames: F, rng: StdRng) -> Self {
        Self {
            library: Library::default(),
            history: History::default(),
            playback: PlaybackState::default(),
            settings: Settings::default(),
            surface: Size::default(),
            cursor_hide_delay: DEFAULT_CURSOR_HIDE_DELAY,
            cursor_visible: true,
            failed: HashSet::new(),
            rng,
            renderer,
            clock,
            shell,
            frames,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_surface(mut self, surface: Size) -> Self {
        self.surface = surface;
        self
    }

    #[must_use]
    pub fn with_cursor_hide_delay(mut self, delay: Duration) -> Self {
        self.cursor_hide_delay = delay;
        self
    }

    /// Single entry point for everything the host observes.
    pub fn handle(&mut self, event: Event) {
        debug!(?event, "event");
        match event {
            Event::OpenFolderRequested | Event::KeyOpen => {
                if let Some(dir) = self.shell.pick_folder() {
                    self.open_folder(&dir);
                }
            }
            Event::FolderSelected(dir) => self.open_folder(&dir),
            Event::FolderDropped(path) => self.folder_dropped(&path),
            Event::KeyLeft => self.retreat(),
            Event::KeyRight => self.advance(),
            Event::KeySpace => self.toggle_play_pause(),
            Event::SettingsRequested => {
                if let Some(settings) = self.shell.edit_settings(&self.settings) {
                    self.apply_settings(settings);
                }
            }
            Event::SettingsApplied(settings) => self.apply_settings(settings),
            Event::WindowResized(size) => self.resize(size),
            Event::ClockFired => self.clock_fired(),
            Event::VideoReachedEnd => self.video_reached_end(),
            Event::RenderFailed(reason) => self.current_failed(reason),
            Event::PointerMoved => self.pointer_moved(),
            Event::PointerEntered => {
                if self.is_active() {
                    self.clock.start(Timer::Cursor, self.cursor_hide_delay);
                }
            }
            Event::PointerLeft => {
                self.clock.stop(Timer::Cursor);
                self.set_cursor_visible(true);
            }
            Event::CursorTimerFired => {
                if self.is_active() {
                    self.set_cursor_visible(false);
                }
            }
        }
    }

    /// Scan `dir` and start a slideshow over it. A failed or empty scan is
    /// reported and leaves the current state untouched.
    pub fn open_folder(&mut self, dir: &Path) {
        match scan_directory(dir) {
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "folder scan failed");
                self.shell.notify(&Notice::Failed(err));
            }
            Ok(items) if items.is_empty() => {
                info!(dir = %dir.display(), "no supported media in folder");
                self.shell
                    .notify(&Notice::Failed(Error::NoMediaFound(dir.to_path_buf())));
            }
            Ok(items) => {
                info!(dir = %dir.display(), items = items.len(), "folder opened");
                self.start_slideshow(items);
            }
        }
    }

    fn folder_dropped(&mut self, path: &Path) {
        if path.is_dir() {
            self.open_folder(path);
        } else {
            info!(path = %path.display(), "ignoring drop of a non-directory");
            self.shell
                .notify(&Notice::Failed(Error::InvalidDrop(path.to_path_buf())));
        }
    }

    /// Replace the library and clear all navigation state without showing anything.
    ///
    /// Returns `false` (and changes nothing) for an empty item list.
    pub fn load_library(&mut self, items: Vec<MediaItem>) -> bool {
        if items.is_empty() {
            warn!("refusing to load an empty library");
            return false;
        }
        self.clock.stop(Timer::Advance);
        self.renderer.stop();
        self.library = Library::shuffled(items, &mut self.rng);
        self.history.reset();
        self.playback.clear();
        self.failed.clear();
        true
    }

    /// Load `items` and show the first pick.
    pub fn start_slideshow(&mut self, items: Vec<MediaItem>) {
        if !self.load_library(items) {
            return;
        }
        info!(items = self.library.len(), "slideshow started");
        self.clock.start(Timer::Cursor, self.cursor_hide_delay);
        self.advance();
    }

    /// Next item: replay from the redo queue, else a random pick.
    pub fn advance(&mut self) {
        if let Some(index) = self.history.advance(self.library.len(), &mut self.rng) {
            self.present(index, Direction::Forward);
        }
    }

    /// Previous item; no-op at the start of the history.
    pub fn retreat(&mut self) {
        if let Some(index) = self.history.retreat() {
            self.present(index, Direction::Backward);
        }
    }

    /// Show `index`, skipping unplayable entries in the direction of travel.
    /// Going back past the first entry turns around.
    fn present(&mut self, mut index: usize, mut direction: Direction) {
        loop {
            match self.show(index) {
                Ok(()) => return,
                Err(err) => {
                    if !self.record_failure(index, err) {
                        return;
                    }
                }
            }
            let next = match direction {
                Direction::Backward => self.history.retreat(),
                Direction::Forward => None,
            };
            let next = match next {
                Some(next) => Some(next),
                None => {
                    direction = Direction::Forward;
                    self.history.advance(self.library.len(), &mut self.rng)
                }
            };
            match next {
                Some(next) => index = next,
                None => return,
            }
        }
    }

    fn show(&mut self, index: usize) -> Result<(), Error> {
        let Some(item) = self.library.get(index).cloned() else {
            return Ok(());
        };
        debug!(
            index,
            position = ?self.history.position(),
            kind = ?item.kind,
            path = %item.path.display(),
            "showing item"
        );
        match item.kind {
            MediaKind::Image => {
                self.renderer.stop();
                self.render_image(&item.path)?;
                self.playback.show(MediaKind::Image);
                self.failed.clear();
                if self.playback.is_playing() {
                    self.clock
                        .start(Timer::Advance, self.settings.display_duration());
                } else {
                    self.clock.stop(Timer::Advance);
                }
            }
            MediaKind::Video => {
                self.clock.stop(Timer::Advance);
                if let Err(err) = self.renderer.show_video(&item.path) {
                    self.playback.clear();
                    return Err(Error::render_failed(&item.path, &err));
                }
                self.playback.show(MediaKind::Video);
            }
        }
        Ok(())
    }

    fn render_image(&mut self, path: &Path) -> Result<(), Error> {
        let target = self.surface;
        let rendered = self
            .frames
            .load(path)
            .and_then(|frame| fit_within(&frame, target))
            .and_then(|fitted| self.renderer.show_image(&fitted, target));
        if let Err(err) = rendered {
            self.clock.stop(Timer::Advance);
            self.playback.clear();
            return Err(Error::render_failed(path, &err));
        }
        Ok(())
    }

    /// Returns `false` once every item in the library has failed since the
    /// last successful show; the slideshow halts.
    fn record_failure(&mut self, index: usize, err: Error) -> bool {
        self.failed.insert(index);
        warn!(
            error = %err,
            failed = self.failed.len(),
            items = self.library.len(),
            "render failed; skipping item"
        );
        self.shell.notify(&Notice::Failed(err));
        if self.failed.len() >= self.library.len() {
            error!(items = self.library.len(), "every item failed to render; halting");
            self.clock.stop(Timer::Advance);
            self.renderer.stop();
            self.playback.clear();
            self.shell.notify(&Notice::NothingPlayable);
            return false;
        }
        true
    }

    fn current_failed(&mut self, reason: String) {
        let Some(index) = self.history.current() else {
            return;
        };
        let Some(item) = self.library.get(index).cloned() else {
            return;
        };
        if self.playback.active().is_none() {
            return;
        }
        self.clock.stop(Timer::Advance);
        self.playback.clear();
        let err = Error::RenderFailed {
            path: item.path,
            reason,
        };
        if self.record_failure(index, err) {
            self.advance();
        }
    }

    fn toggle_play_pause(&mut self) {
        let playing = self.playback.toggle();
        info!(playing, "play/pause toggled");
        match (self.playback.active(), playing) {
            (Some(MediaKind::Image), true) => self
                .clock
                .start(Timer::Advance, self.settings.display_duration()),
            (Some(MediaKind::Image), false) => self.clock.stop(Timer::Advance),
            (Some(MediaKind::Video), true) => self.renderer.resume_playback(),
            (Some(MediaKind::Video), false) => self.renderer.pause_playback(),
            (None, _) => {}
        }
    }

    fn clock_fired(&mut self) {
        if self.playback.phase() == Phase::PlayingImage {
            self.advance();
        } else {
            debug!(phase = ?self.playback.phase(), "stale advance timer ignored");
        }
    }

    // Videos advance at their end even while paused.
    fn video_reached_end(&mut self) {
        if self.playback.active() == Some(MediaKind::Video) {
            self.failed.clear();
            self.advance();
        } else {
            debug!("end of media without an active video");
        }
    }

    fn apply_settings(&mut self, settings: Settings) {
        info!(
            display_duration = %humantime::format_duration(settings.display_duration()),
            "settings applied"
        );
        self.settings = settings;
        self.shell.notify(&Notice::SettingsChanged(settings));
    }

    fn resize(&mut self, size: Size) {
        self.surface = size;
        if self.playback.active() != Some(MediaKind::Image) {
            return;
        }
        let Some(index) = self.history.current() else {
            return;
        };
        let Some(path) = self.library.get(index).map(|item| item.path.clone()) else {
            return;
        };
        debug!(width = size.width, height = size.height, "re-rendering for new size");
        if let Err(err) = self.render_image(&path)
            && self.record_failure(index, err)
        {
            self.advance();
        }
    }

    fn pointer_moved(&mut self) {
        if !self.is_active() {
            return;
        }
        self.set_cursor_visible(true);
        self.clock.start(Timer::Cursor, self.cursor_hide_delay);
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        if self.cursor_visible != visible {
            self.cursor_visible = visible;
            self.shell.set_cursor_visible(visible);
        }
    }

    /// A library is loaded.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.library.is_empty()
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&MediaItem> {
        self.history.current().and_then(|i| self.library.get(i))
    }

    #[must_use]
    pub fn library(&self) -> &Library {
        &self.library
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.playback.phase()
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    #[must_use]
    pub fn surface(&self) -> Size {
        self.surface
    }

    #[must_use]
    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }
}
