use std::time::Duration;

use crate::error::Error;

/// Runtime knobs the user can change while a slideshow runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    display_duration: Duration,
}

impl Settings {
    /// Shortest duration the settings surface offers.
    pub const MIN_DURATION: Duration = Duration::from_secs(1);
    /// Longest duration the settings surface offers.
    pub const MAX_DURATION: Duration = Duration::from_secs(60);
    pub const DEFAULT_DURATION: Duration = Duration::from_secs(5);

    /// Any positive duration; configuration files are not limited to the dialog range.
    ///
    /// # Errors
    /// Returns [`Error::InvalidSettings`] for a zero duration.
    pub fn new(display_duration: Duration) -> Result<Self, Error> {
        if display_duration.is_zero() {
            return Err(Error::InvalidSettings {
                got: display_duration,
                reason: "must be greater than zero".into(),
            });
        }
        Ok(Self { display_duration })
    }

    /// Whole seconds as entered in the settings dialog (1 to 60).
    ///
    /// # Errors
    /// Returns [`Error::InvalidSettings`] outside that range.
    pub fn from_dialog_secs(secs: u64) -> Result<Self, Error> {
        let got = Duration::from_secs(secs);
        if !(Self::MIN_DURATION..=Self::MAX_DURATION).contains(&got) {
            return Err(Error::InvalidSettings {
                got,
                reason: format!(
                    "must be between {} and {}",
                    humantime::format_duration(Self::MIN_DURATION),
                    humantime::format_duration(Self::MAX_DURATION)
                ),
            });
        }
        Ok(Self {
            display_duration: got,
        })
    }

    #[must_use]
    pub fn display_duration(&self) -> Duration {
        self.display_duration
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_duration: Self::DEFAULT_DURATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_range_is_one_to_sixty_seconds() {
        assert!(Settings::from_dialog_secs(0).is_err());
        assert!(Settings::from_dialog_secs(61).is_err());
        assert_eq!(
            Settings::from_dialog_secs(60).unwrap().display_duration(),
            Duration::from_secs(60)
        );
        assert_eq!(
            Settings::from_dialog_secs(1).unwrap().display_duration(),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn zero_duration_is_rejected() {
        let err = Settings::new(Duration::ZERO).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings { .. }));
        assert_eq!(
            err.to_string(),
            "invalid display duration 0ns: must be greater than zero"
        );
        assert!(Settings::new(Duration::from_millis(250)).is_ok());
    }

    #[test]
    fn dialog_errors_name_the_range() {
        let err = Settings::from_dialog_secs(61).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid display duration 61s: must be between 1s and 1m"
        );
    }
}
