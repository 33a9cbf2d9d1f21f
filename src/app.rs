//! Wallboard orchestrator: an explicitly constructed, explicitly owned
//! value that wires the fetcher, scene rotor, countdown ticker, and wall
//! clock together and can tear all of them down.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::{Freshness, SnapshotCache};
use crate::config::Config;
use crate::countdown::{CountdownDisplay, CountdownTicker};
use crate::fetch::SnapshotFetcher;
use crate::scene::{Scene, SceneRotor};

const CLOCK_CADENCE: Duration = Duration::from_secs(1);

/// The running wallboard core.
///
/// Owns four timer classes: the refresh loop, the scene dwell timer, the
/// 1 s wall clock, and the countdown ticker. `shutdown` cancels them all;
/// nothing here runs behind a global singleton.
pub struct Wallboard {
    cache: Arc<Mutex<SnapshotCache>>,
    rotor: SceneRotor,
    countdown: Arc<CountdownTicker>,
    countdown_rx: watch::Receiver<CountdownDisplay>,
    status_rx: watch::Receiver<bool>,
    clock_rx: watch::Receiver<DateTime<Utc>>,
    stop_tx: watch::Sender<bool>,
    refresh_task: Option<JoinHandle<()>>,
    clock_task: Option<JoinHandle<()>>,
    rearm_task: Option<JoinHandle<()>>,
}

impl Wallboard {
    /// Construct the orchestrator and start every periodic task
    pub fn start(config: Config) -> Self {
        let cache = Arc::new(Mutex::new(SnapshotCache::new()));
        let (stop_tx, stop_rx) = watch::channel(false);

        let (fetcher, status_rx, applied_rx) =
            SnapshotFetcher::new(&config, Arc::clone(&cache), stop_rx);
        let refresh_task = fetcher.spawn();

        let rotor = SceneRotor::start(config.dwell);

        let (countdown, countdown_rx) = CountdownTicker::new();
        let countdown = Arc::new(countdown);
        let rearm_task = Self::spawn_rearm_task(
            Arc::clone(&cache),
            Arc::clone(&countdown),
            applied_rx,
        );

        let (clock_tx, clock_rx) = watch::channel(Utc::now());
        let clock_task = tokio::spawn(async move {
            loop {
                tokio::time::sleep(CLOCK_CADENCE).await;
                let _ = clock_tx.send(Utc::now());
            }
        });

        info!("wallboard started");
        Self {
            cache,
            rotor,
            countdown,
            countdown_rx,
            status_rx,
            clock_rx,
            stop_tx,
            refresh_task: Some(refresh_task),
            clock_task: Some(clock_task),
            rearm_task: Some(rearm_task),
        }
    }

    /// Re-arm the countdown from the earliest upcoming event whenever a
    /// new snapshot is applied
    fn spawn_rearm_task(
        cache: Arc<Mutex<SnapshotCache>>,
        countdown: Arc<CountdownTicker>,
        mut applied_rx: watch::Receiver<u64>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while applied_rx.changed().await.is_ok() {
                let target = cache
                    .lock()
                    .expect("snapshot cache poisoned")
                    .next_event()
                    .map(|event| event.when);
                countdown.set_target(target);
            }
        })
    }

    /// Shared handle to the snapshot cache, for the presentation layer
    pub fn cache(&self) -> Arc<Mutex<SnapshotCache>> {
        Arc::clone(&self.cache)
    }

    pub fn active_scene(&self) -> Scene {
        self.rotor.active()
    }

    pub fn active_scene_index(&self) -> usize {
        self.rotor.active_index()
    }

    /// Manual navigation; restarts the dwell timer
    pub fn jump_to(&self, k: usize) -> Scene {
        self.rotor.jump(k)
    }

    /// Connection-health observable: true after the last retrieval succeeded
    pub fn connection(&self) -> watch::Receiver<bool> {
        self.status_rx.clone()
    }

    pub fn countdown(&self) -> watch::Receiver<CountdownDisplay> {
        self.countdown_rx.clone()
    }

    /// 1 s wall-clock ticks for the header clock
    pub fn clock(&self) -> watch::Receiver<DateTime<Utc>> {
        self.clock_rx.clone()
    }

    pub fn freshness(&self) -> Freshness {
        self.cache
            .lock()
            .expect("snapshot cache poisoned")
            .freshness()
    }

    /// Cancel all four timer classes; in-flight retrievals are not
    /// interrupted, their late results are simply never applied
    pub fn shutdown(&mut self) {
        let _ = self.stop_tx.send(true);
        if let Some(handle) = self.refresh_task.take() {
            handle.abort();
        }
        if let Some(handle) = self.clock_task.take() {
            handle.abort();
        }
        if let Some(handle) = self.rearm_task.take() {
            handle.abort();
        }
        self.rotor.shutdown();
        self.countdown.shutdown();
        info!("wallboard stopped");
    }
}

impl Drop for Wallboard {
    fn drop(&mut self) {
        self.shutdown();
    }
}
