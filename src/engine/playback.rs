use crate::media::MediaKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Stopped,
    PlayingImage,
    PlayingVideo,
    Paused(MediaKind),
}

/// Play/pause flag plus the kind of item on screen.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackState {
    playing: bool,
    active: Option<MediaKind>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            playing: true,
            active: None,
        }
    }
}

impl PlaybackState {
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn active(&self) -> Option<MediaKind> {
        self.active
    }

    pub fn show(&mut self, kind: MediaKind) {
        self.active = Some(kind);
    }

    /// Nothing on screen any more; the play/pause choice survives.
    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Flip play/pause and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match (self.active, self.playing) {
            (None, _) => Phase::Stopped,
            (Some(MediaKind::Image), true) => Phase::PlayingImage,
            (Some(MediaKind::Video), true) => Phase::PlayingVideo,
            (Some(kind), false) => Phase::Paused(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_follow_flag_and_kind() {
        let mut p = PlaybackState::default();
        assert_eq!(p.phase(), Phase::Stopped);
        p.show(MediaKind::Image);
        assert_eq!(p.phase(), Phase::PlayingImage);
        assert!(!p.toggle());
        assert_eq!(p.phase(), Phase::Paused(MediaKind::Image));
        p.show(MediaKind::Video);
        assert_eq!(p.phase(), Phase::Paused(MediaKind::Video));
        assert!(p.toggle());
        assert_eq!(p.phase(), Phase::PlayingVideo);
        p.clear();
        assert_eq!(p.phase(), Phase::Stopped);
        assert!(p.is_playing());
    }
}
