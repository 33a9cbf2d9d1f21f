//! Yield-curve point projection for the macro scene.
//!
//! Each configured curve resolves its rate codes against the snapshot and
//! projects the surviving points into a fixed drawing box. A curve with
//! fewer than two resolved points is omitted: a single point cannot be
//! projected into a line.

use crate::catalog::{CurveDef, YIELD_CURVES};
use crate::snapshot::QuoteMap;

pub const BOX_WIDTH: f64 = 240.0;
pub const BOX_HEIGHT: f64 = 90.0;
pub const BOX_PADDING: f64 = 8.0;
/// Floor applied to the tenor and value spans so the projection never
/// divides by a near-zero range
pub const MIN_SPAN: f64 = 0.1;

/// One projected curve point
#[derive(Debug, Clone)]
pub struct CurvePoint {
    pub label: &'static str,
    pub tenor: f64,
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

/// One drawable curve
#[derive(Debug, Clone)]
pub struct CurveProjection {
    pub key: &'static str,
    pub label: &'static str,
    /// Value at the longest resolved tenor
    pub latest: f64,
    pub points: Vec<CurvePoint>,
}

fn project(def: &CurveDef, rates: &QuoteMap) -> Option<CurveProjection> {
    let mut resolved: Vec<(&'static str, f64, f64)> = def
        .points
        .iter()
        .filter_map(|p| {
            rates
                .get(p.code)
                .and_then(|quote| quote.last_value())
                .map(|value| (p.label, p.tenor, value))
        })
        .collect();
    if resolved.len() < 2 {
        return None;
    }
    resolved.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let min_tenor = resolved.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_tenor = resolved.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let min_value = resolved.iter().map(|p| p.2).fold(f64::INFINITY, f64::min);
    let max_value = resolved.iter().map(|p| p.2).fold(f64::NEG_INFINITY, f64::max);
    let tenor_span = (max_tenor - min_tenor).max(MIN_SPAN);
    let value_span = (max_value - min_value).max(MIN_SPAN);

    let points: Vec<CurvePoint> = resolved
        .iter()
        .map(|&(label, tenor, value)| CurvePoint {
            label,
            tenor,
            value,
            x: BOX_PADDING + (tenor - min_tenor) / tenor_span * (BOX_WIDTH - BOX_PADDING * 2.0),
            y: BOX_HEIGHT
                - BOX_PADDING
                - (value - min_value) / value_span * (BOX_HEIGHT - BOX_PADDING * 2.0),
        })
        .collect();

    Some(CurveProjection {
        key: def.key,
        label: def.label,
        latest: resolved[resolved.len() - 1].2,
        points,
    })
}

/// Project every configured curve that has at least two resolved points
pub fn build_yield_curves(rates: &QuoteMap) -> Vec<CurveProjection> {
    YIELD_CURVES
        .iter()
        .filter_map(|def| project(def, rates))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Quote;

    fn rates(entries: &[(&str, f64)]) -> QuoteMap {
        entries
            .iter()
            .map(|(code, last)| {
                (
                    code.to_string(),
                    Quote {
                        last: Some(*last),
                        ..Quote::default()
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_curve_omitted_below_two_points() {
        assert!(build_yield_curves(&rates(&[])).is_empty());
        assert!(build_yield_curves(&rates(&[("M0000017.SH", 2.3)])).is_empty());
    }

    #[test]
    fn test_point_count_matches_resolved_and_x_monotonic() {
        let rates = rates(&[
            ("M0000017.SH", 2.3),
            ("M0000001.SH", 1.6),
            ("M0000025.SH", 2.0),
            // 3Y point intentionally missing
        ]);
        let curves = build_yield_curves(&rates);
        assert_eq!(curves.len(), 1);
        let cn = &curves[0];
        assert_eq!(cn.key, "cn");
        assert_eq!(cn.points.len(), 3);
        assert_eq!(cn.latest, 2.3);
        for pair in cn.points.windows(2) {
            assert!(pair[0].tenor <= pair[1].tenor);
            assert!(pair[0].x <= pair[1].x);
        }
        // Projection stays inside the padded box
        for p in &cn.points {
            assert!(p.x >= BOX_PADDING && p.x <= BOX_WIDTH - BOX_PADDING);
            assert!(p.y >= BOX_PADDING && p.y <= BOX_HEIGHT - BOX_PADDING);
        }
    }

    #[test]
    fn test_flat_curve_uses_span_floor() {
        // Identical values would otherwise divide by zero on the y axis
        let rates = rates(&[("M0000001.SH", 2.0), ("M0000017.SH", 2.0)]);
        let curves = build_yield_curves(&rates);
        assert_eq!(curves.len(), 1);
        for p in &curves[0].points {
            assert!(p.y.is_finite());
        }
    }

    #[test]
    fn test_non_finite_rate_is_unresolved() {
        let rates = rates(&[("UST3M.GBM", f64::NAN), ("UST10Y.GBM", 4.1)]);
        // Only one usable US point: the curve is omitted
        assert!(build_yield_curves(&rates).is_empty());
    }
}
