//! Event countdown: a pure state machine plus the 1 s ticker task that
//! drives it while a target is armed.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// What the countdown panel shows on a given tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownDisplay {
    /// No target armed: render `--` everywhere, no ticking
    #[default]
    Idle,
    /// Counting down, remaining whole seconds decomposed for display
    Running {
        days: u64,
        hours: u64,
        minutes: u64,
        seconds: u64,
    },
    /// Target reached; terminal for this target
    Reached,
}

/// Countdown state machine over an optional target instant
#[derive(Debug, Default)]
pub struct CountdownEngine {
    target: Option<DateTime<Utc>>,
}

impl CountdownEngine {
    pub fn new() -> Self {
        Self { target: None }
    }

    pub fn target(&self) -> Option<DateTime<Utc>> {
        self.target
    }

    /// Arm (or clear) the target. Returns false when the target is
    /// unchanged, so the caller can keep the running ticker instead of
    /// restarting it.
    pub fn set_target(&mut self, target: Option<DateTime<Utc>>) -> bool {
        if self.target == target {
            return false;
        }
        self.target = target;
        true
    }

    /// Recompute the display for `now`
    pub fn tick(&self, now: DateTime<Utc>) -> CountdownDisplay {
        let Some(target) = self.target else {
            return CountdownDisplay::Idle;
        };
        let remaining = (target - now).num_seconds();
        if remaining <= 0 {
            return CountdownDisplay::Reached;
        }
        let total = remaining as u64;
        CountdownDisplay::Running {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }
}

/// Owns the 1 s ticker task and publishes each tick on a watch channel.
///
/// Arming a new target cancels the old ticker before starting the
/// replacement, under the task-slot lock, so two tickers never run at once.
pub struct CountdownTicker {
    engine: Arc<Mutex<CountdownEngine>>,
    display_tx: watch::Sender<CountdownDisplay>,
    task: Mutex<Option<JoinHandle<()>>>,
}

const TICK_CADENCE: Duration = Duration::from_secs(1);

impl CountdownTicker {
    pub fn new() -> (Self, watch::Receiver<CountdownDisplay>) {
        let (display_tx, display_rx) = watch::channel(CountdownDisplay::Idle);
        (
            Self {
                engine: Arc::new(Mutex::new(CountdownEngine::new())),
                display_tx,
                task: Mutex::new(None),
            },
            display_rx,
        )
    }

    /// Re-arm the countdown. An unchanged target keeps the running ticker;
    /// a reached or absent target stops ticking entirely.
    pub fn set_target(&self, target: Option<DateTime<Utc>>) {
        let mut slot = self.task.lock().expect("countdown slot poisoned");
        let changed = self
            .engine
            .lock()
            .expect("countdown engine poisoned")
            .set_target(target);
        if !changed {
            return;
        }
        if let Some(handle) = slot.take() {
            handle.abort();
        }

        let display = self
            .engine
            .lock()
            .expect("countdown engine poisoned")
            .tick(Utc::now());
        let _ = self.display_tx.send(display);
        if !matches!(display, CountdownDisplay::Running { .. }) {
            return;
        }

        let engine = Arc::clone(&self.engine);
        let display_tx = self.display_tx.clone();
        *slot = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(TICK_CADENCE).await;
                let display = engine
                    .lock()
                    .expect("countdown engine poisoned")
                    .tick(Utc::now());
                let _ = display_tx.send(display);
                if matches!(display, CountdownDisplay::Reached) {
                    debug!("countdown target reached, ticker stopping");
                    break;
                }
            }
        }));
    }

    pub fn display(&self) -> CountdownDisplay {
        *self.display_tx.borrow()
    }

    pub fn shutdown(&self) {
        if let Some(handle) = self.task.lock().expect("countdown slot poisoned").take() {
            handle.abort();
        }
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    #[test]
    fn test_idle_without_target() {
        let engine = CountdownEngine::new();
        assert_eq!(engine.tick(Utc::now()), CountdownDisplay::Idle);
    }

    #[test]
    fn test_decomposition() {
        let now = Utc::now();
        let mut engine = CountdownEngine::new();
        engine.set_target(Some(now + ChronoDuration::seconds(3661)));

        // After 60 ticks: 3601 s left = 1h 0m 1s
        assert_eq!(
            engine.tick(now + ChronoDuration::seconds(60)),
            CountdownDisplay::Running {
                days: 0,
                hours: 1,
                minutes: 0,
                seconds: 1
            }
        );
        // After 3600 ticks: 61 s left = 1m 1s
        assert_eq!(
            engine.tick(now + ChronoDuration::seconds(3600)),
            CountdownDisplay::Running {
                days: 0,
                hours: 0,
                minutes: 1,
                seconds: 1
            }
        );
        // Multi-day target
        engine.set_target(Some(now + ChronoDuration::seconds(2 * 86_400 + 3)));
        assert_eq!(
            engine.tick(now),
            CountdownDisplay::Running {
                days: 2,
                hours: 0,
                minutes: 0,
                seconds: 3
            }
        );
    }

    #[test]
    fn test_reached_at_and_past_target() {
        let now = Utc::now();
        let mut engine = CountdownEngine::new();
        engine.set_target(Some(now));
        assert_eq!(engine.tick(now), CountdownDisplay::Reached);
        assert_eq!(
            engine.tick(now + ChronoDuration::seconds(5)),
            CountdownDisplay::Reached
        );
    }

    #[test]
    fn test_set_target_reports_change() {
        let now = Utc::now();
        let mut engine = CountdownEngine::new();
        let target = now + ChronoDuration::hours(1);
        assert!(engine.set_target(Some(target)));
        assert!(!engine.set_target(Some(target)));
        assert!(engine.set_target(Some(target + ChronoDuration::hours(1))));
        assert!(engine.set_target(None));
        assert!(!engine.set_target(None));
    }

    #[tokio::test]
    async fn test_ticker_past_target_emits_reached_without_ticking() {
        let (ticker, rx) = CountdownTicker::new();
        ticker.set_target(Some(Utc::now() - ChronoDuration::seconds(1)));
        assert_eq!(*rx.borrow(), CountdownDisplay::Reached);
        // No task was spawned for a reached target
        assert!(ticker.task.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ticker_idle_on_clear() {
        let (ticker, rx) = CountdownTicker::new();
        ticker.set_target(Some(Utc::now() + ChronoDuration::hours(1)));
        assert!(matches!(*rx.borrow(), CountdownDisplay::Running { .. }));
        assert!(ticker.task.lock().unwrap().is_some());

        ticker.set_target(None);
        assert_eq!(*rx.borrow(), CountdownDisplay::Idle);
        assert!(ticker.task.lock().unwrap().is_none());
    }
}
