//! Market Wallboard - Rotating Display Core
//!
//! Orchestration logic for an unattended, rotating financial-data display:
//! - Periodic snapshot retrieval with connection-health tracking
//! - Scene-rotation state machine with manual navigation
//! - Pure snapshot -> render-model view builders
//! - Event countdown ticker
//!
//! The presentation layer is an external consumer: it reads the built
//! [`views::ViewSet`], the active [`scene::Scene`], and the countdown
//! display, and never touches retrieval or derivation itself.

pub mod app;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod countdown;
pub mod error;
pub mod fetch;
pub mod scene;
pub mod snapshot;
pub mod views;

// Re-export the types a consumer wires against
pub use app::Wallboard;
pub use cache::{Freshness, SnapshotCache, TrendWindow};
pub use config::Config;
pub use countdown::{CountdownDisplay, CountdownEngine, CountdownTicker};
pub use error::FetchError;
pub use fetch::SnapshotFetcher;
pub use scene::{Scene, SceneRotor, SceneScheduler};
pub use snapshot::{
    classify, BoardEntry, Calendar, DataMode, EventItem, MarketEvent, MarketSummary, Quote,
    QuoteMap, QuoteTendency, ShortTermBoards, Snapshot,
};
pub use views::{
    BoardItem, CurveProjection, RankedQuote, RegionCard, SectorGroup, SpreadInsight, ViewSet,
};
