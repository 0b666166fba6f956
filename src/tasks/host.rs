use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::select;
use tokio::sync::mpsc::{self, Receiver};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::clock::{TimerFired, TokioClock};
use super::display::HeadlessDisplay;
use super::input::Input;
use super::player::{PlayerExited, ProcessPlayer};
use super::shell::TerminalShell;
use crate::config::Configuration;
use crate::engine::Engine;
use crate::events::Event;
use crate::interfaces::{DiskFrames, MediaRenderer};

pub type HostEngine = Engine<HeadlessDisplay, TokioClock, TerminalShell, DiskFrames>;

/// Event loop adapter: owns the engine and the channels its collaborators
/// report back on.
pub struct Host {
    engine: HostEngine,
    timer_rx: Receiver<TimerFired>,
    player_rx: Receiver<PlayerExited>,
}

impl Host {
    pub fn new(cfg: &Configuration) -> Result<Self> {
        let (timer_tx, timer_rx) = mpsc::channel::<TimerFired>(8); // Clock -> Host
        let (player_tx, player_rx) = mpsc::channel::<PlayerExited>(8); // Player -> Host

        let rng = match cfg.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let player = ProcessPlayer::new(cfg.video_player.clone(), player_tx);
        let engine = Engine::new(
            HeadlessDisplay::new(cfg.frame_output.clone(), player),
            TokioClock::new(timer_tx),
            TerminalShell::default(),
            DiskFrames::default(),
            rng,
        )
        .with_settings(cfg.settings().context("invalid display settings")?)
        .with_surface(cfg.surface)
        .with_cursor_hide_delay(cfg.cursor_hide_delay);

        Ok(Self {
            engine,
            timer_rx,
            player_rx,
        })
    }

    pub fn engine(&self) -> &HostEngine {
        &self.engine
    }

    /// Feed one event straight to the engine.
    pub fn dispatch(&mut self, event: Event) {
        self.engine.handle(event);
    }

    /// Drive the engine until cancelled or asked to quit.
    pub async fn run(mut self, mut input_rx: Receiver<Input>, cancel: CancellationToken) -> Result<()> {
        let mut input_open = true;
        loop {
            select! {
                _ = cancel.cancelled() => break,

                // Terminal commands
                maybe_input = input_rx.recv(), if input_open => match maybe_input {
                    Some(Input::Event(event)) => self.engine.handle(event),
                    Some(Input::Quit) => {
                        info!("quit requested");
                        cancel.cancel();
                        break;
                    }
                    None => {
                        // Timers and the player keep the show going.
                        debug!("input channel closed");
                        input_open = false;
                    }
                },

                // Countdown and cursor timers
                Some(fired) = self.timer_rx.recv() => {
                    if let Some(event) = self.engine.clock_mut().accept(fired) {
                        self.engine.handle(event);
                    }
                }

                // Video player exits
                Some(exited) = self.player_rx.recv() => {
                    let accepted = self.engine.renderer_mut().player_mut().accept(exited);
                    if let Some(event) = accepted {
                        self.engine.handle(event);
                    }
                }
            }
        }
        self.engine.renderer_mut().stop();
        info!("slideshow stopped");
        Ok(())
    }
}
