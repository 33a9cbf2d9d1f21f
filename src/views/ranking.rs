//! Top-N mover lists: index leaderboard, US focus, crypto and commodity
//! movers. One ranking rule for all of them: stable sort by descending
//! absolute change, ties keep original map (document) order.

use std::cmp::Ordering;

use crate::catalog::{is_index_code, is_us_equity_code};
use crate::snapshot::{classify, Quote, QuoteMap, QuoteTendency, Snapshot};

/// One ranked row, ready for display
#[derive(Debug, Clone)]
pub struct RankedQuote {
    pub code: String,
    pub name: String,
    pub last: Option<f64>,
    pub pct: Option<f64>,
    pub tendency: QuoteTendency,
}

impl RankedQuote {
    fn from_entry(code: &str, quote: &Quote) -> Self {
        Self {
            code: code.to_string(),
            name: quote.label(code).to_string(),
            last: quote.last_value(),
            pct: quote.pct(),
            tendency: classify(quote.change_pct),
        }
    }
}

/// Rank quotes by |change_pct| descending and cap the result.
///
/// Vec::sort_by is stable, so equal magnitudes keep their map order.
pub fn rank_by_move<F>(quotes: &QuoteMap, filter: F, cap: usize) -> Vec<RankedQuote>
where
    F: Fn(&str) -> bool,
{
    let mut ranked: Vec<RankedQuote> = quotes
        .iter()
        .filter(|(code, _)| filter(code))
        .map(|(code, quote)| RankedQuote::from_entry(code, quote))
        .collect();
    ranked.sort_by(|a, b| {
        let a_move = a.pct.map(f64::abs).unwrap_or(0.0);
        let b_move = b.pct.map(f64::abs).unwrap_or(0.0);
        b_move.partial_cmp(&a_move).unwrap_or(Ordering::Equal)
    });
    ranked.truncate(cap);
    ranked
}

/// Top 8 index movers across all recognized index codes
pub fn build_leaderboard(snapshot: &Snapshot) -> Vec<RankedQuote> {
    rank_by_move(&snapshot.indices, is_index_code, 8)
}

/// Top 5 US-listed movers
pub fn build_us_focus(snapshot: &Snapshot) -> Vec<RankedQuote> {
    rank_by_move(&snapshot.us_stocks, is_us_equity_code, 5)
}

/// Top 6 digital-asset movers for the alternative-assets scene
pub fn build_crypto_movers(snapshot: &Snapshot) -> Vec<RankedQuote> {
    rank_by_move(&snapshot.crypto, |_| true, 6)
}

/// Top 5 commodity movers for the alternative-assets scene
pub fn build_commodity_movers(snapshot: &Snapshot) -> Vec<RankedQuote> {
    rank_by_move(&snapshot.commodities, |_| true, 5)
}
