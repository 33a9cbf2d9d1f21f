//! Pure snapshot -> render-model builders.
//!
//! Every builder takes the current snapshot and returns plain display
//! structures; missing or non-numeric inputs are excluded or surface as
//! explicit placeholders, never as errors. The presentation layer consumes
//! the [`ViewSet`] without touching the snapshot itself.

pub mod board;
pub mod curve;
pub mod ranking;
pub mod region;
pub mod sector;

use crate::catalog::{display_name, CORE_A_SHARES, FX_WATCHLIST, RATE_ORDER, RATE_SPREADS};
use crate::snapshot::{
    classify, DataMode, MarketEvent, MarketSummary, Quote, QuoteTendency, Snapshot,
};

pub use board::{build_board_ranking, BoardItem, BOARD_CAP};
pub use curve::{build_yield_curves, CurvePoint, CurveProjection};
pub use ranking::{
    build_commodity_movers, build_crypto_movers, build_leaderboard, build_us_focus, RankedQuote,
};
pub use region::{build_regions, RegionCard, RegionMember, Sentiment};
pub use sector::{build_commodity_note, build_sector_groups, CommodityNote, SectorGroup};

/// Number of upcoming events shown on the events scene
const UPCOMING_DISPLAY_CAP: usize = 6;

/// One pinned core A-share index card; all-None fields render as `--`
#[derive(Debug, Clone)]
pub struct CoreIndexCard {
    pub code: &'static str,
    pub name: &'static str,
    pub last: Option<f64>,
    pub change: Option<f64>,
    pub pct: Option<f64>,
    pub tendency: QuoteTendency,
}

/// One macro-scene rate row
#[derive(Debug, Clone)]
pub struct RateRow {
    pub code: String,
    pub name: String,
    pub value: Option<f64>,
    pub change: Option<f64>,
    pub tendency: QuoteTendency,
}

/// One derived rate-spread readout on the macro scene; `value` is None
/// when either leg is missing from the snapshot and renders as `--`
#[derive(Debug, Clone)]
pub struct SpreadInsight {
    pub key: &'static str,
    pub label: &'static str,
    pub value: Option<f64>,
}

/// One FX watchlist card for the alternative-assets scene
#[derive(Debug, Clone)]
pub struct FxCard {
    pub code: String,
    pub name: String,
    pub value: Option<f64>,
    pub pct: Option<f64>,
    pub tendency: QuoteTendency,
}

/// Everything the presentation layer needs, rebuilt as one unit on every
/// successful fetch. The default value is the pre-first-fetch "waiting"
/// state: all lists empty, all optionals absent.
#[derive(Debug, Clone, Default)]
pub struct ViewSet {
    pub data_mode: DataMode,
    pub summary: MarketSummary,
    pub regions: Vec<RegionCard>,
    pub leaderboard: Vec<RankedQuote>,
    pub us_focus: Vec<RankedQuote>,
    pub core_indices: Vec<CoreIndexCard>,
    pub board_ranking: Vec<BoardItem>,
    pub rate_rows: Vec<RateRow>,
    pub spreads: Vec<SpreadInsight>,
    pub curves: Vec<CurveProjection>,
    pub sectors: Vec<SectorGroup>,
    pub commodity_note: Option<CommodityNote>,
    pub crypto_movers: Vec<RankedQuote>,
    pub commodity_movers: Vec<RankedQuote>,
    pub fx_cards: Vec<FxCard>,
    pub upcoming: Vec<MarketEvent>,
}

fn build_core_indices(snapshot: &Snapshot) -> Vec<CoreIndexCard> {
    CORE_A_SHARES
        .iter()
        .map(|&(code, name)| match snapshot.a_shares.get(code) {
            Some(quote) => CoreIndexCard {
                code,
                name,
                last: quote.last_value(),
                change: quote.change_value(),
                pct: quote.pct(),
                tendency: classify(quote.change_pct),
            },
            None => CoreIndexCard {
                code,
                name,
                last: None,
                change: None,
                pct: None,
                tendency: QuoteTendency::Unchanged,
            },
        })
        .collect()
}

fn build_rate_rows(snapshot: &Snapshot) -> Vec<RateRow> {
    RATE_ORDER
        .iter()
        .filter_map(|code| snapshot.rates.get(*code).map(|quote| (*code, quote)))
        .map(|(code, quote)| RateRow {
            code: code.to_string(),
            name: display_name(code).unwrap_or(code).to_string(),
            value: quote.last_value(),
            change: quote.change_value(),
            tendency: classify(quote.change),
        })
        .collect()
}

fn build_rate_spreads(snapshot: &Snapshot) -> Vec<SpreadInsight> {
    RATE_SPREADS
        .iter()
        .map(|def| {
            let long = snapshot.rates.get(def.long_leg).and_then(Quote::last_value);
            let short = snapshot.rates.get(def.short_leg).and_then(Quote::last_value);
            SpreadInsight {
                key: def.key,
                label: def.label,
                value: long.zip(short).map(|(l, s)| l - s),
            }
        })
        .collect()
}

fn build_fx_cards(snapshot: &Snapshot) -> Vec<FxCard> {
    FX_WATCHLIST
        .iter()
        .filter_map(|code| snapshot.fx.get(*code).map(|quote| (*code, quote)))
        .map(|(code, quote)| FxCard {
            code: code.to_string(),
            name: display_name(code).unwrap_or(code).to_string(),
            value: quote.last_value(),
            pct: quote.pct(),
            tendency: classify(quote.change_pct),
        })
        .collect()
}

/// Build the full view set from one snapshot.
///
/// `upcoming` is the cache's already-normalized future-event list; event
/// derivation happens in exactly one place and this pass only caps it for
/// display. Synchronous run-to-completion: nothing downstream ever
/// observes a partially rebuilt set.
pub fn build_all(snapshot: &Snapshot, upcoming: &[MarketEvent]) -> ViewSet {
    ViewSet {
        data_mode: snapshot.data_mode,
        summary: snapshot.summary,
        regions: build_regions(snapshot),
        leaderboard: build_leaderboard(snapshot),
        us_focus: build_us_focus(snapshot),
        core_indices: build_core_indices(snapshot),
        board_ranking: build_board_ranking(&snapshot.short_term),
        rate_rows: build_rate_rows(snapshot),
        spreads: build_rate_spreads(snapshot),
        curves: build_yield_curves(&snapshot.rates),
        sectors: build_sector_groups(snapshot),
        commodity_note: build_commodity_note(snapshot),
        crypto_movers: build_crypto_movers(snapshot),
        commodity_movers: build_commodity_movers(snapshot),
        fx_cards: build_fx_cards(snapshot),
        upcoming: upcoming.iter().take(UPCOMING_DISPLAY_CAP).cloned().collect(),
    }
}
