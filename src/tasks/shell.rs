use std::io::{self, Write};
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::engine::Settings;
use crate::events::Notice;
use crate::interfaces::Shell;

/// Prompts for a terminal session. Folders and settings arrive as typed
/// commands, so the interactive pickers only explain how to use them.
///
/// Notices go to the log; `out` only carries those usage hints.
#[derive(Debug)]
pub struct TerminalShell<W = io::Stderr> {
    out: W,
}

impl Default for TerminalShell {
    fn default() -> Self {
        Self::with_writer(io::stderr())
    }
}

impl<W: Write> TerminalShell<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    fn hint(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            debug!("failed to write hint: {err}");
        }
    }
}

impl<W: Write> Shell for TerminalShell<W> {
    fn notify(&mut self, notice: &Notice) {
        match notice {
            Notice::SettingsChanged(_) => info!("{notice}"),
            _ => warn!("{notice}"),
        }
    }

    fn pick_folder(&mut self) -> Option<PathBuf> {
        self.hint("type `o <folder>` to open a folder");
        None
    }

    fn edit_settings(&mut self, current: &Settings) -> Option<Settings> {
        let text = format!(
            "display duration is {}; type `settings <1-60>` to change it",
            humantime::format_duration(current.display_duration())
        );
        self.hint(&text);
        None
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        debug!(visible, "cursor visibility");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn notices_stay_off_the_hint_stream() {
        let mut shell = TerminalShell::with_writer(Vec::new());
        shell.notify(&Notice::NothingPlayable);
        shell.notify(&Notice::Failed(Error::NoMediaFound(PathBuf::from("/empty"))));
        shell.notify(&Notice::SettingsChanged(Settings::default()));
        assert!(shell.out.is_empty());
    }

    #[test]
    fn pickers_print_usage_and_change_nothing() {
        let mut shell = TerminalShell::with_writer(Vec::new());
        assert_eq!(shell.pick_folder(), None);
        assert_eq!(shell.edit_settings(&Settings::default()), None);
        let text = String::from_utf8(shell.out).unwrap();
        assert!(text.contains("o <folder>"));
        assert!(text.contains("display duration is 5s"));
    }
}
