//! Periodic countdown sampling on the tokio runtime.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use super::{CountdownEngine, RemainingDuration};

/// One published sample. `sequence` grows with every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub sequence: u64,
    pub remaining: RemainingDuration,
}

/// A running countdown. Dropping it clears the timer.
#[derive(Debug)]
pub struct Countdown {
    rx: watch::Receiver<Tick>,
    task: Option<JoinHandle<()>>,
}

impl Countdown {
    /// Sample `engine` every `period` on a background task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(engine: CountdownEngine, period: Duration) -> Self {
        let initial = Tick {
            sequence: 0,
            remaining: engine.sample(),
        };
        let (tx, rx) = watch::channel(initial);

        debug!(target_instant = %engine.target(), ?period, "starting countdown");
        let task = tokio::spawn(run(engine, period, tx));

        Countdown {
            rx,
            task: Some(task),
        }
    }

    /// Most recently published remaining time.
    pub fn latest(&self) -> RemainingDuration {
        self.rx.borrow().remaining
    }

    /// Receiver notified on every accepted tick.
    pub fn subscribe(&self) -> watch::Receiver<Tick> {
        self.rx.clone()
    }

    /// Stop ticking and wait for the task to finish.
    pub async fn stop(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            debug!("countdown stopped");
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run(engine: CountdownEngine, period: Duration, tx: watch::Sender<Tick>) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut sequence = 0u64;
    loop {
        interval.tick().await;
        sequence += 1;

        let tick = Tick {
            sequence,
            remaining: engine.sample(),
        };
        trace!(sequence, remaining = %tick.remaining, "tick");
        publish(&tx, tick);
    }
}

/// Store `tick` unless a newer one is already published.
fn publish(tx: &watch::Sender<Tick>, tick: Tick) -> bool {
    tx.send_if_modified(|current| {
        if tick.sequence <= current.sequence {
            return false;
        }
        *current = tick;
        true
    })
}
