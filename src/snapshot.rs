//! Snapshot data model for the wallboard core.
//!
//! These types match the JSON document served by the data backend at
//! `GET {base}/data/latest`. Every category carries a serde default so a
//! partial payload still deserializes to an empty-but-usable snapshot;
//! downstream view builders can assume every mapping is present.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Instrument code -> quote mapping.
///
/// IndexMap keeps document order, which is what makes "ties broken by
/// original map iteration order" well defined for the ranked views.
pub type QuoteMap = IndexMap<String, Quote>;

/// One complete, immutable, point-in-time market-data payload.
///
/// A snapshot wholly replaces its predecessor; it is never mutated in place
/// and never merged field-by-field with an older one.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Snapshot {
    /// Backend-reported generation time (lenient ISO-8601, may be absent)
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Which provider produced the payload
    #[serde(default)]
    pub data_mode: DataMode,
    #[serde(default)]
    pub indices: QuoteMap,
    #[serde(default)]
    pub a_shares: QuoteMap,
    #[serde(default)]
    pub fx: QuoteMap,
    #[serde(default)]
    pub commodities: QuoteMap,
    #[serde(default)]
    pub crypto: QuoteMap,
    #[serde(default)]
    pub us_stocks: QuoteMap,
    #[serde(default)]
    pub rates: QuoteMap,
    #[serde(default)]
    pub summary: MarketSummary,
    #[serde(default, rename = "a_share_short_term")]
    pub short_term: ShortTermBoards,
    #[serde(default)]
    pub calendar: Calendar,
}

impl Snapshot {
    /// Parsed generation time, if the backend sent a usable one
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_deref().and_then(parse_instant)
    }
}

/// Data provider mode reported by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    Open,
    Wind,
    #[serde(other)]
    #[default]
    Mock,
}

impl DataMode {
    pub fn label(&self) -> &'static str {
        match self {
            DataMode::Open => "OPEN",
            DataMode::Wind => "WIND",
            DataMode::Mock => "MOCK",
        }
    }
}

/// Last price/level and its change for one instrument.
///
/// Any numeric field may be absent or non-finite; the accessors below
/// collapse both cases into "no data".
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Quote {
    #[serde(default)]
    pub last: Option<f64>,
    #[serde(default)]
    pub change: Option<f64>,
    #[serde(default)]
    pub change_pct: Option<f64>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub turnover_rate: Option<f64>,
    #[serde(default)]
    pub net_flow: Option<f64>,
}

impl Quote {
    /// Percentage change, filtered to finite values
    pub fn pct(&self) -> Option<f64> {
        self.change_pct.filter(|v| v.is_finite())
    }

    /// Last price/level, filtered to finite values
    pub fn last_value(&self) -> Option<f64> {
        self.last.filter(|v| v.is_finite())
    }

    /// Absolute change, filtered to finite values
    pub fn change_value(&self) -> Option<f64> {
        self.change.filter(|v| v.is_finite())
    }

    /// Magnitude of the move, used as the ranking key (no data ranks last)
    pub fn abs_move(&self) -> f64 {
        self.pct().map(f64::abs).unwrap_or(0.0)
    }

    /// Best available human label for this quote
    pub fn label<'a>(&'a self, code: &'a str) -> &'a str {
        self.display_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(code)
    }
}

/// Direction of a quote's move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteTendency {
    Positive,
    Negative,
    Unchanged,
}

impl QuoteTendency {
    pub fn label(&self) -> &'static str {
        match self {
            QuoteTendency::Positive => "positive",
            QuoteTendency::Negative => "negative",
            QuoteTendency::Unchanged => "unchanged",
        }
    }
}

/// Classify a percentage change.
///
/// Unchanged iff the value is absent, non-finite, or exactly zero;
/// otherwise the sign decides.
pub fn classify(change_pct: Option<f64>) -> QuoteTendency {
    match change_pct.filter(|v| v.is_finite()) {
        Some(v) if v > 0.0 => QuoteTendency::Positive,
        Some(v) if v < 0.0 => QuoteTendency::Negative,
        _ => QuoteTendency::Unchanged,
    }
}

/// Advancing/declining/unchanged counts computed by the backend
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct MarketSummary {
    #[serde(default)]
    pub advancing: u32,
    #[serde(default)]
    pub declining: u32,
    #[serde(default)]
    pub unchanged: u32,
}

/// Short-term board candidate lists (hot / cold / capital-flow)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ShortTermBoards {
    #[serde(default, rename = "hot_boards")]
    pub hot: Vec<BoardEntry>,
    #[serde(default, rename = "cold_boards")]
    pub cold: Vec<BoardEntry>,
    #[serde(default, rename = "capital_boards")]
    pub capital: Vec<BoardEntry>,
}

/// One raw board candidate as delivered by the backend.
///
/// The percentage change arrives under either `pct_change` or `change_pct`
/// depending on the upstream list; `pct()` resolves them in that order.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BoardEntry {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub pct_change: Option<f64>,
    #[serde(default)]
    pub change_pct: Option<f64>,
    #[serde(default)]
    pub turnover_rate: Option<f64>,
    #[serde(default)]
    pub net_flow: Option<f64>,
}

impl BoardEntry {
    /// Deduplication key: code, falling back to name
    pub fn key(&self) -> Option<&str> {
        self.code.as_deref().or(self.name.as_deref())
    }

    /// Resolved percentage change (`pct_change` wins over `change_pct`)
    pub fn pct(&self) -> Option<f64> {
        self.pct_change
            .filter(|v| v.is_finite())
            .or(self.change_pct.filter(|v| v.is_finite()))
    }

    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.name.as_deref())
            .or(self.code.as_deref())
            .unwrap_or("--")
    }
}

/// Economic calendar payload
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Calendar {
    #[serde(default)]
    pub events: Vec<EventItem>,
}

/// One raw calendar event as delivered by the backend
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EventItem {
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub importance: Option<String>,
}

/// A calendar event with a successfully parsed timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct MarketEvent {
    pub title: String,
    pub when: DateTime<Utc>,
    pub country: Option<String>,
    pub importance: Option<String>,
}

impl EventItem {
    /// Resolve into a usable event; an unparseable datetime drops the event
    pub fn resolve(&self) -> Option<MarketEvent> {
        let when = self.datetime.as_deref().and_then(parse_instant)?;
        let title = self
            .title
            .clone()
            .or(self.event_id.clone())
            .unwrap_or_else(|| "event".to_string());
        Some(MarketEvent {
            title,
            when,
            country: self.country.clone(),
            importance: self.importance.clone(),
        })
    }
}

/// Normalize raw calendar events: drop unusable ones, sort by time ascending
pub fn normalize_events(calendar: &Calendar) -> Vec<MarketEvent> {
    let mut events: Vec<MarketEvent> =
        calendar.events.iter().filter_map(EventItem::resolve).collect();
    events.sort_by_key(|e| e.when);
    events
}

/// Keep only events at or after `now`
pub fn upcoming_events(events: &[MarketEvent], now: DateTime<Utc>) -> Vec<MarketEvent> {
    events.iter().filter(|e| e.when >= now).cloned().collect()
}

/// Lenient timestamp parsing: RFC 3339 first, then the naive ISO shapes the
/// backend is known to emit
pub(crate) fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(Utc.from_utc_datetime(&naive));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}
