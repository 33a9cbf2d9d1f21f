//! Regional sentiment aggregation for the global-overview scene.

use crate::catalog::REGION_GROUPS;
use crate::snapshot::{classify, QuoteTendency, Snapshot};

/// Sentiment reading derived from the sign of the regional mean move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    RiskOn,
    RiskOff,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::RiskOn => "Risk appetite building",
            Sentiment::RiskOff => "Havens in demand",
        }
    }
}

/// One index inside a regional card
#[derive(Debug, Clone)]
pub struct RegionMember {
    pub code: String,
    pub name: String,
    pub pct: Option<f64>,
    pub tendency: QuoteTendency,
}

/// Regional sentiment card.
///
/// `score` is None when no member instrument resolved to a numeric change;
/// the presentation renders a placeholder card in that case, never a
/// synthetic neutral 50.
#[derive(Debug, Clone)]
pub struct RegionCard {
    pub id: &'static str,
    pub label: &'static str,
    pub score: Option<u8>,
    pub sentiment: Option<Sentiment>,
    pub members: Vec<RegionMember>,
}

/// Bounded sentiment score: clamp(round(50 + mean * 100), 5, 95)
fn sentiment_score(mean: f64) -> u8 {
    (50.0 + mean * 100.0).round().clamp(5.0, 95.0) as u8
}

/// Build one card per configured region group.
///
/// Instruments missing from the snapshot are excluded from the mean, not
/// treated as zero.
pub fn build_regions(snapshot: &Snapshot) -> Vec<RegionCard> {
    REGION_GROUPS
        .iter()
        .map(|region| {
            let members: Vec<RegionMember> = region
                .codes
                .iter()
                .filter_map(|code| snapshot.indices.get(*code).map(|quote| (code, quote)))
                .map(|(code, quote)| RegionMember {
                    code: (*code).to_string(),
                    name: quote.label(code).to_string(),
                    pct: quote.pct(),
                    tendency: classify(quote.change_pct),
                })
                .collect();

            let resolved: Vec<f64> = members.iter().filter_map(|m| m.pct).collect();
            let (score, sentiment) = if resolved.is_empty() {
                (None, None)
            } else {
                let mean = resolved.iter().sum::<f64>() / resolved.len() as f64;
                let sentiment = if mean >= 0.0 {
                    Sentiment::RiskOn
                } else {
                    Sentiment::RiskOff
                };
                (Some(sentiment_score(mean)), Some(sentiment))
            };

            RegionCard {
                id: region.id,
                label: region.label,
                score,
                sentiment,
                members,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Quote;

    fn snapshot_with_index(code: &str, pct: Option<f64>) -> Snapshot {
        let mut snapshot = Snapshot::default();
        snapshot.indices.insert(
            code.to_string(),
            Quote {
                change_pct: pct,
                ..Quote::default()
            },
        );
        snapshot
    }

    #[test]
    fn test_score_bounds() {
        assert_eq!(sentiment_score(0.0), 50);
        assert_eq!(sentiment_score(10.0), 95);
        assert_eq!(sentiment_score(-10.0), 5);
        assert_eq!(sentiment_score(0.2), 70);
        for mean in [-1e9, -3.7, -0.001, 0.0, 0.45, 2.0, 1e9] {
            let score = sentiment_score(mean);
            assert!((5..=95).contains(&score));
        }
    }

    #[test]
    fn test_empty_region_has_no_score() {
        let cards = build_regions(&Snapshot::default());
        assert_eq!(cards.len(), REGION_GROUPS.len());
        assert!(cards.iter().all(|c| c.score.is_none()));
        assert!(cards.iter().all(|c| c.sentiment.is_none()));
    }

    #[test]
    fn test_present_instrument_without_pct_is_excluded_from_mean() {
        // One Asia member present but with no numeric change: still no score
        let snapshot = snapshot_with_index("000001.SH", None);
        let asia = &build_regions(&snapshot)[0];
        assert_eq!(asia.members.len(), 1);
        assert!(asia.score.is_none());
    }

    #[test]
    fn test_mean_over_resolved_members_only() {
        let mut snapshot = snapshot_with_index("000001.SH", Some(0.2));
        snapshot.indices.insert(
            "HSI.HI".to_string(),
            Quote {
                change_pct: Some(-0.1),
                ..Quote::default()
            },
        );
        // mean = 0.05 -> score 55, risk-on
        let asia = &build_regions(&snapshot)[0];
        assert_eq!(asia.score, Some(55));
        assert_eq!(asia.sentiment, Some(Sentiment::RiskOn));
    }
}
