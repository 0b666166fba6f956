use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result, bail};
use tokio::process::Command;
use tokio::sync::mpsc::Sender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::events::Event;

/// Outcome of one player process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerExited {
    pub generation: u64,
    pub outcome: PlayerOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerOutcome {
    Finished,
    Failed(String),
}

struct Playing {
    generation: u64,
    pid: Option<u32>,
    cancel: CancellationToken,
}

/// Plays videos by running an external player, one process at a time.
/// The process exiting on its own is the end-of-media signal.
pub struct ProcessPlayer {
    argv: Vec<String>,
    tx: Sender<PlayerExited>,
    current: Option<Playing>,
    generation: u64,
}

impl ProcessPlayer {
    pub fn new(argv: Vec<String>, tx: Sender<PlayerExited>) -> Self {
        Self {
            argv,
            tx,
            current: None,
            generation: 0,
        }
    }

    /// Start playing `path`, replacing whatever is playing.
    pub fn play(&mut self, path: &Path) -> Result<()> {
        self.stop();
        let Some((program, args)) = self.argv.split_first() else {
            bail!("no video player configured");
        };
        let mut child = Command::new(program)
            .args(args)
            .arg(path)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start video player `{program}`"))?;

        self.generation += 1;
        let generation = self.generation;
        let cancel = CancellationToken::new();
        let pid = child.id();
        info!(path = %path.display(), pid, "video playback started");

        let tx = self.tx.clone();
        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    let _ = child.kill().await;
                }
                status = child.wait() => {
                    let outcome = match status {
                        Ok(s) if s.success() => PlayerOutcome::Finished,
                        Ok(s) => PlayerOutcome::Failed(format!("video player exited with {s}")),
                        Err(e) => PlayerOutcome::Failed(format!("waiting for video player: {e}")),
                    };
                    let _ = tx.send(PlayerExited { generation, outcome }).await;
                }
            }
        });

        self.current = Some(Playing {
            generation,
            pid,
            cancel,
        });
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(playing) = self.current.take() {
            debug!(pid = playing.pid, "stopping video player");
            // A paused process must be running again to die cleanly.
            self.signal(playing.pid, false);
            playing.cancel.cancel();
        }
    }

    pub fn pause(&mut self) {
        if let Some(pid) = self.current.as_ref().and_then(|p| p.pid) {
            self.signal(Some(pid), true);
        }
    }

    pub fn resume(&mut self) {
        if let Some(pid) = self.current.as_ref().and_then(|p| p.pid) {
            self.signal(Some(pid), false);
        }
    }

    /// Map an exit to an engine event; exits of replaced players are dropped.
    pub fn accept(&mut self, exited: PlayerExited) -> Option<Event> {
        let current = self.current.as_ref()?;
        if current.generation != exited.generation {
            return None;
        }
        self.current = None;
        Some(match exited.outcome {
            PlayerOutcome::Finished => Event::VideoReachedEnd,
            PlayerOutcome::Failed(reason) => Event::RenderFailed(reason),
        })
    }

    #[cfg(unix)]
    fn signal(&self, pid: Option<u32>, pause: bool) {
        use nix::sys::signal::{Signal, kill};
        use nix::unistd::Pid;

        let Some(pid) = pid.and_then(|p| i32::try_from(p).ok()) else {
            return;
        };
        let sig = if pause { Signal::SIGSTOP } else { Signal::SIGCONT };
        if let Err(err) = kill(Pid::from_raw(pid), sig) {
            warn!(pid, ?sig, "failed to signal video player: {err}");
        }
    }

    #[cfg(not(unix))]
    fn signal(&self, _pid: Option<u32>, pause: bool) {
        if pause {
            warn!("pausing the video player is not supported on this platform");
        }
    }
}

impl Drop for ProcessPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}
