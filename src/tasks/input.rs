use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use tokio::sync::mpsc::Sender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::engine::Settings;
use crate::events::Event;
use crate::interfaces::Size;

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Event(Event),
    Quit,
}

pub const HELP: &str = "\
commands:
  n | next | right      next item
  p | prev | left       previous item
  t | space | toggle    play/pause
  o [FOLDER]            open a folder
  drop PATH             drop a path onto the window
  settings [SECONDS]    show or set the display duration (1-60)
  resize WxH            resize the display surface
  q | quit              exit";

/// Parse one terminal line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Input>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };
    let event = match (cmd.to_ascii_lowercase().as_str(), rest) {
        ("q" | "quit" | "exit", "") => return Ok(Some(Input::Quit)),
        ("n" | "next" | "right", "") => Event::KeyRight,
        ("p" | "prev" | "left", "") => Event::KeyLeft,
        ("t" | "space" | "toggle", "") => Event::KeySpace,
        ("o" | "open", "") => Event::KeyOpen,
        ("o" | "open", dir) => Event::FolderSelected(PathBuf::from(dir)),
        ("drop", path) if !path.is_empty() => Event::FolderDropped(PathBuf::from(path)),
        ("settings", "") => Event::SettingsRequested,
        ("settings", secs) => {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("`{secs}` is not a number of seconds"))?;
            Event::SettingsApplied(Settings::from_dialog_secs(secs)?)
        }
        ("resize", dims) => Event::WindowResized(parse_size(dims)?),
        _ => bail!("unknown command `{line}`"),
    };
    Ok(Some(Input::Event(event)))
}

fn parse_size(dims: &str) -> Result<Size> {
    let (w, h) = dims
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("expected WIDTHxHEIGHT, got `{dims}`"))?;
    let width: u32 = w.trim().parse().context("invalid width")?;
    let height: u32 = h.trim().parse().context("invalid height")?;
    if width == 0 || height == 0 {
        bail!("surface size must be positive");
    }
    Ok(Size { width, height })
}

/// Read commands from stdin on a detached thread until EOF, `quit`, or the
/// receiver goes away. EOF cancels the session.
///
/// A plain thread rather than `spawn_blocking`: a read parked on stdin must
/// not hold up runtime shutdown.
pub fn spawn_stdin_reader(tx: Sender<Input>, cancel: CancellationToken) {
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!("stdin read failed: {err}");
                    break;
                }
            };
            match parse_line(&line) {
                Ok(Some(input)) => {
                    debug!(?input, "terminal input");
                    let quit = input == Input::Quit;
                    if tx.blocking_send(input).is_err() || quit {
                        return;
                    }
                }
                Ok(None) => {}
                Err(err) => eprintln!("{err:#}\n{HELP}"),
            }
        }
        info!("stdin closed; initiating shutdown");
        cancel.cancel();
    });
}
