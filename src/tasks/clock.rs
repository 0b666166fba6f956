use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, trace};

use crate::events::Event;
use crate::interfaces::{Clock, Timer};

/// A countdown that elapsed. Only the latest generation of a timer counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub timer: Timer,
    pub generation: u64,
}

struct Pending {
    generation: u64,
    handle: JoinHandle<()>,
}

/// [`Clock`] backed by tokio sleeps. Must be used from within a runtime.
pub struct TokioClock {
    tx: Sender<TimerFired>,
    pending: HashMap<Timer, Pending>,
    generation: u64,
}

impl TokioClock {
    pub fn new(tx: Sender<TimerFired>) -> Self {
        Self {
            tx,
            pending: HashMap::new(),
            generation: 0,
        }
    }

    /// Turn a fire into an engine event, dropping fires from stopped or
    /// restarted countdowns.
    pub fn accept(&mut self, fired: TimerFired) -> Option<Event> {
        match self.pending.get(&fired.timer) {
            Some(p) if p.generation == fired.generation => {
                self.pending.remove(&fired.timer);
            }
            _ => {
                trace!(?fired, "stale timer fire dropped");
                return None;
            }
        }
        Some(match fired.timer {
            Timer::Advance => Event::ClockFired,
            Timer::Cursor => Event::CursorTimerFired,
        })
    }
}

impl Clock for TokioClock {
    fn start(&mut self, timer: Timer, duration: Duration) {
        self.stop(timer);
        self.generation += 1;
        let fired = TimerFired {
            timer,
            generation: self.generation,
        };
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            sleep(duration).await;
            let _ = tx.send(fired).await;
        });
        debug!(?timer, ?duration, generation = self.generation, "timer started");
        self.pending.insert(
            timer,
            Pending {
                generation: self.generation,
                handle,
            },
        );
    }

    fn stop(&mut self, timer: Timer) {
        if let Some(p) = self.pending.remove(&timer) {
            p.handle.abort();
        }
    }
}

impl Drop for TokioClock {
    fn drop(&mut self) {
        for (_, p) in self.pending.drain() {
            p.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    #[tokio::test]
    async fn fires_once_per_start() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut clock = TokioClock::new(tx);
        clock.start(Timer::Advance, Duration::from_millis(10));
        let fired = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timer should fire")
            .unwrap();
        assert_eq!(clock.accept(fired), Some(Event::ClockFired));
        assert_eq!(clock.accept(fired), None, "a fire is consumed once");
    }

    #[tokio::test]
    async fn stopped_timer_never_reaches_engine() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut clock = TokioClock::new(tx);
        clock.start(Timer::Cursor, Duration::from_millis(10));
        clock.stop(Timer::Cursor);
        let got = timeout(Duration::from_millis(100), rx.recv()).await;
        if let Ok(Some(fired)) = got {
            assert_eq!(clock.accept(fired), None);
        }
    }

    #[tokio::test]
    async fn restart_supersedes_pending_countdown() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut clock = TokioClock::new(tx);
        clock.start(Timer::Advance, Duration::from_millis(5));
        let stale = TimerFired {
            timer: Timer::Advance,
            generation: 1,
        };
        clock.start(Timer::Advance, Duration::from_millis(5));
        assert_eq!(clock.accept(stale), None);

        let fired = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("restarted timer should fire")
            .unwrap();
        assert_eq!(fired.generation, 2);
        assert_eq!(clock.accept(fired), Some(Event::ClockFired));
    }
}
