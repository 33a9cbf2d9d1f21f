//! Commodity sector grouping for the commodities scene.

use std::collections::BTreeMap;

use crate::catalog::sector;
use crate::snapshot::Snapshot;
use crate::views::ranking::{rank_by_move, RankedQuote};

/// One sector bucket with its movers, biggest first
#[derive(Debug, Clone)]
pub struct SectorGroup {
    pub sector: &'static str,
    pub items: Vec<RankedQuote>,
}

/// Headline note for the commodities scene: coverage plus the leading
/// gainer and decliner by signed change
#[derive(Debug, Clone)]
pub struct CommodityNote {
    pub covered: usize,
    pub leader: Option<(String, f64)>,
    pub laggard: Option<(String, f64)>,
}

/// Bucket commodities by sector; buckets come back in lexicographic key
/// order for a stable display, movers sorted by |pct| within each bucket.
pub fn build_sector_groups(snapshot: &Snapshot) -> Vec<SectorGroup> {
    let mut buckets: BTreeMap<&'static str, Vec<(String, &crate::snapshot::Quote)>> =
        BTreeMap::new();
    for (code, quote) in &snapshot.commodities {
        buckets
            .entry(sector(code))
            .or_default()
            .push((code.clone(), quote));
    }

    buckets
        .into_iter()
        .map(|(name, members)| {
            // Rebuild a per-bucket map so the shared ranking rule applies
            let map: crate::snapshot::QuoteMap = members
                .into_iter()
                .map(|(code, quote)| (code, quote.clone()))
                .collect();
            SectorGroup {
                sector: name,
                items: rank_by_move(&map, |_| true, usize::MAX),
            }
        })
        .collect()
}

/// Summarize the commodity universe; None when no quotes resolved
pub fn build_commodity_note(snapshot: &Snapshot) -> Option<CommodityNote> {
    let resolved: Vec<(&str, &crate::snapshot::Quote, f64)> = snapshot
        .commodities
        .iter()
        .filter_map(|(code, quote)| quote.pct().map(|pct| (code.as_str(), quote, pct)))
        .collect();
    if resolved.is_empty() {
        return None;
    }

    let leader = resolved
        .iter()
        .max_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(code, quote, pct)| (quote.label(code).to_string(), *pct));
    let laggard = resolved
        .iter()
        .min_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(code, quote, pct)| (quote.label(code).to_string(), *pct));

    Some(CommodityNote {
        covered: snapshot.commodities.len(),
        leader,
        laggard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Quote;

    fn quote(pct: Option<f64>) -> Quote {
        Quote {
            change_pct: pct,
            ..Quote::default()
        }
    }

    #[test]
    fn test_buckets_are_lexicographic_and_sorted_within() {
        let mut snapshot = Snapshot::default();
        snapshot.commodities.insert("CL.NYM".to_string(), quote(Some(0.5))); // Energy
        snapshot.commodities.insert("GC.CMX".to_string(), quote(Some(-1.0))); // Precious
        snapshot.commodities.insert("SI.CMX".to_string(), quote(Some(2.5))); // Precious
        snapshot.commodities.insert("ZZZ.XX".to_string(), quote(Some(0.1))); // General

        let groups = build_sector_groups(&snapshot);
        let names: Vec<&str> = groups.iter().map(|g| g.sector).collect();
        assert_eq!(names, ["Energy", "General", "Precious"]);

        let precious = groups.iter().find(|g| g.sector == "Precious").unwrap();
        assert_eq!(precious.items[0].code, "SI.CMX");
        assert_eq!(precious.items[1].code, "GC.CMX");
    }

    #[test]
    fn test_note_leader_and_laggard_by_signed_change() {
        let mut snapshot = Snapshot::default();
        snapshot.commodities.insert("CL.NYM".to_string(), quote(Some(-3.0)));
        snapshot.commodities.insert("GC.CMX".to_string(), quote(Some(1.0)));
        snapshot.commodities.insert("NG.NYM".to_string(), quote(None));

        let note = build_commodity_note(&snapshot).unwrap();
        assert_eq!(note.covered, 3);
        assert_eq!(note.leader.as_ref().unwrap().1, 1.0);
        assert_eq!(note.laggard.as_ref().unwrap().1, -3.0);
    }

    #[test]
    fn test_note_absent_without_resolvable_quotes() {
        let mut snapshot = Snapshot::default();
        snapshot.commodities.insert("CL.NYM".to_string(), quote(None));
        assert!(build_commodity_note(&snapshot).is_none());
        assert!(build_commodity_note(&Snapshot::default()).is_none());
    }
}
