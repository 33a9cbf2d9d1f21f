//! Snapshot cache: the single current snapshot, the views built from it,
//! derived event caches, freshness classification, and a short rolling
//! market-breadth window for the trend display.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::snapshot::{normalize_events, upcoming_events, MarketEvent, Snapshot};
use crate::views::{build_all, ViewSet};

/// Elapsed-time thresholds for freshness classification
const REALTIME_WINDOW: Duration = Duration::from_secs(30);
const DELAYED_WINDOW: Duration = Duration::from_secs(60);

/// Maximum points retained for the breadth trend display
pub const TREND_CAPACITY: usize = 20;

/// Qualitative staleness of the displayed data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// No snapshot has ever been applied
    Waiting,
    RealTime,
    Delayed,
    Stale,
}

impl Freshness {
    pub fn label(&self) -> &'static str {
        match self {
            Freshness::Waiting => "waiting",
            Freshness::RealTime => "real-time",
            Freshness::Delayed => "delayed",
            Freshness::Stale => "stale",
        }
    }

    fn from_elapsed(elapsed: Duration) -> Self {
        if elapsed < REALTIME_WINDOW {
            Freshness::RealTime
        } else if elapsed < DELAYED_WINDOW {
            Freshness::Delayed
        } else {
            Freshness::Stale
        }
    }
}

/// Fixed-capacity rolling window of breadth points
#[derive(Debug, Default)]
pub struct TrendWindow {
    points: VecDeque<f64>,
}

impl TrendWindow {
    pub fn push(&mut self, value: f64) {
        if self.points.len() >= TREND_CAPACITY {
            self.points.pop_front();
        }
        self.points.push_back(value);
    }

    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Holds the current snapshot and everything derived from it.
///
/// A snapshot is applied atomically: views and event caches are rebuilt in
/// the same run-to-completion pass, always from that snapshot alone.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    snapshot: Option<Snapshot>,
    views: ViewSet,
    events: Vec<MarketEvent>,
    upcoming: Vec<MarketEvent>,
    trend: TrendWindow,
    last_applied_seq: u64,
    last_update: Option<Instant>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a retrieval result.
    ///
    /// `seq` is the retrieval's initiation sequence number; a result that
    /// is not newer than the last applied one is discarded so a delayed
    /// retry can never overwrite a fresher snapshot.
    pub fn apply(&mut self, seq: u64, snapshot: Snapshot, now: DateTime<Utc>) -> bool {
        if seq <= self.last_applied_seq {
            debug!(
                seq,
                latest = self.last_applied_seq,
                "discarding out-of-order retrieval result"
            );
            return false;
        }

        // Events are derived here once; the view set only caps the list
        self.events = normalize_events(&snapshot.calendar);
        self.upcoming = upcoming_events(&self.events, now);
        self.views = build_all(&snapshot, &self.upcoming);
        self.trend.push(snapshot.summary.advancing as f64);
        self.snapshot = Some(snapshot);
        self.last_applied_seq = seq;
        self.last_update = Some(Instant::now());
        true
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn views(&self) -> &ViewSet {
        &self.views
    }

    /// All normalized events from the current snapshot, time ascending
    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }

    /// Future events only; the first one is the countdown target
    pub fn upcoming(&self) -> &[MarketEvent] {
        &self.upcoming
    }

    pub fn next_event(&self) -> Option<&MarketEvent> {
        self.upcoming.first()
    }

    pub fn trend(&self) -> &TrendWindow {
        &self.trend
    }

    pub fn last_applied_seq(&self) -> u64 {
        self.last_applied_seq
    }

    pub fn freshness(&self) -> Freshness {
        match self.last_update {
            None => Freshness::Waiting,
            Some(at) => Freshness::from_elapsed(at.elapsed()),
        }
    }
}
