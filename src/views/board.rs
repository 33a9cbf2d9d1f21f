//! Board heat-map ranking: merge the hot / cold / capital-flow candidate
//! lists, deduplicate by code, and keep the biggest movers.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::snapshot::ShortTermBoards;

/// Maximum number of cells in the board heat-map
pub const BOARD_CAP: usize = 8;

/// One deduplicated, ranked board cell
#[derive(Debug, Clone, PartialEq)]
pub struct BoardItem {
    pub code: String,
    pub name: String,
    pub pct_change: f64,
}

/// Merge the three candidate lists into one ranked heat-map.
///
/// First occurrence of a code wins; entries without a resolvable numeric
/// change are dropped; the merged result is sorted by descending |pct| and
/// capped at [`BOARD_CAP`].
pub fn build_board_ranking(boards: &ShortTermBoards) -> Vec<BoardItem> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<BoardItem> = Vec::new();

    for entry in boards
        .hot
        .iter()
        .chain(boards.cold.iter())
        .chain(boards.capital.iter())
    {
        let Some(key) = entry.key() else { continue };
        if seen.contains(key) {
            continue;
        }
        let Some(pct) = entry.pct() else { continue };
        seen.insert(key.to_string());
        merged.push(BoardItem {
            code: key.to_string(),
            name: entry.label().to_string(),
            pct_change: pct,
        });
    }

    merged.sort_by(|a, b| {
        b.pct_change
            .abs()
            .partial_cmp(&a.pct_change.abs())
            .unwrap_or(Ordering::Equal)
    });
    merged.truncate(BOARD_CAP);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::BoardEntry;

    fn entry(code: &str, pct_change: Option<f64>, change_pct: Option<f64>) -> BoardEntry {
        BoardEntry {
            code: Some(code.to_string()),
            pct_change,
            change_pct,
            ..BoardEntry::default()
        }
    }

    #[test]
    fn test_first_occurrence_wins() {
        let boards = ShortTermBoards {
            hot: vec![entry("BK01", Some(3.0), None)],
            cold: vec![entry("BK01", Some(-9.0), None)],
            capital: vec![],
        };
        let ranked = build_board_ranking(&boards);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].pct_change, 3.0);
    }

    #[test]
    fn test_missing_pct_is_dropped() {
        let boards = ShortTermBoards {
            hot: vec![entry("BK01", None, None), entry("BK02", None, Some(1.5))],
            cold: vec![],
            capital: vec![],
        };
        let ranked = build_board_ranking(&boards);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].code, "BK02");
        assert_eq!(ranked[0].pct_change, 1.5);
    }

    #[test]
    fn test_name_fallback_key() {
        let boards = ShortTermBoards {
            hot: vec![BoardEntry {
                code: None,
                name: Some("Semis".to_string()),
                pct_change: Some(2.0),
                ..BoardEntry::default()
            }],
            cold: vec![],
            capital: vec![],
        };
        let ranked = build_board_ranking(&boards);
        assert_eq!(ranked[0].code, "Semis");
    }

    #[test]
    fn test_cap_and_ordering() {
        let hot: Vec<BoardEntry> = (0..12)
            .map(|i| entry(&format!("BK{i:02}"), Some(i as f64 - 6.0), None))
            .collect();
        let boards = ShortTermBoards {
            hot,
            cold: vec![],
            capital: vec![],
        };
        let ranked = build_board_ranking(&boards);
        assert_eq!(ranked.len(), BOARD_CAP);
        // Non-increasing |pct| and no duplicate codes
        for pair in ranked.windows(2) {
            assert!(pair[0].pct_change.abs() >= pair[1].pct_change.abs());
        }
        let unique: HashSet<&str> = ranked.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(unique.len(), ranked.len());
    }
}
