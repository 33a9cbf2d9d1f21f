//! Periodic snapshot retrieval with connection-health tracking.
//!
//! One retrieval per refresh tick; a failed attempt schedules a single
//! extra retry after a short delay on top of the main timer, so overlapping
//! retrievals are possible. Every attempt takes an initiation sequence
//! number and the cache refuses results that are not newer than the last
//! applied one, which makes arrival order irrelevant.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::SnapshotCache;
use crate::config::Config;
use crate::error::FetchError;
use crate::snapshot::Snapshot;

/// Issue a single retrieval of the snapshot resource
async fn fetch_snapshot(client: &Client, url: &str) -> Result<Snapshot, FetchError> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }
    Ok(response.json::<Snapshot>().await?)
}

/// Everything one retrieval attempt needs; cheap to clone into retry tasks
#[derive(Clone)]
struct FetchContext {
    client: Client,
    url: String,
    cache: Arc<Mutex<SnapshotCache>>,
    status_tx: watch::Sender<bool>,
    applied_tx: watch::Sender<u64>,
    next_seq: Arc<AtomicU64>,
    retry: Duration,
    stop_rx: watch::Receiver<bool>,
}

impl FetchContext {
    async fn attempt(&self) {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        match fetch_snapshot(&self.client, &self.url).await {
            Ok(snapshot) => self.on_success(seq, snapshot),
            Err(err) => {
                warn!(seq, error = %err, "snapshot retrieval failed, retry scheduled");
                self.on_failure();
            }
        }
    }

    fn on_success(&self, seq: u64, snapshot: Snapshot) {
        let applied = self
            .cache
            .lock()
            .expect("snapshot cache poisoned")
            .apply(seq, snapshot, Utc::now());
        // Even a discarded stale result proves the upstream is reachable
        let _ = self.status_tx.send(true);
        if applied {
            debug!(seq, "snapshot applied");
            let _ = self.applied_tx.send(seq);
        }
    }

    fn on_failure(&self) {
        let _ = self.status_tx.send(false);
        self.spawn_retry();
    }

    /// One extra attempt after the retry delay; a failed retry schedules
    /// the next one, so retries continue while the source is unreachable
    fn spawn_retry(&self) {
        let ctx = self.clone();
        tokio::spawn(async move {
            let mut stop = ctx.stop_rx.clone();
            tokio::select! {
                _ = tokio::time::sleep(ctx.retry) => ctx.attempt().await,
                _ = stop.changed() => {}
            }
        });
    }
}

/// Owns the periodic retrieval loop
pub struct SnapshotFetcher {
    ctx: FetchContext,
    refresh: Duration,
}

impl SnapshotFetcher {
    /// Build a fetcher; returns the connection-health receiver and a
    /// receiver that observes the sequence number of each applied snapshot
    pub fn new(
        config: &Config,
        cache: Arc<Mutex<SnapshotCache>>,
        stop_rx: watch::Receiver<bool>,
    ) -> (Self, watch::Receiver<bool>, watch::Receiver<u64>) {
        let (status_tx, status_rx) = watch::channel(false);
        let (applied_tx, applied_rx) = watch::channel(0);
        let fetcher = Self {
            ctx: FetchContext {
                client: Client::new(),
                url: config.snapshot_url(),
                cache,
                status_tx,
                applied_tx,
                next_seq: Arc::new(AtomicU64::new(1)),
                retry: config.retry,
                stop_rx,
            },
            refresh: config.refresh,
        };
        (fetcher, status_rx, applied_rx)
    }

    /// Spawn the refresh loop; the first retrieval fires immediately
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(url = %self.ctx.url, refresh = ?self.refresh, "snapshot fetcher starting");
            let mut ticker = tokio::time::interval(self.refresh);
            loop {
                ticker.tick().await;
                self.ctx.attempt().await;
            }
        })
    }
}
