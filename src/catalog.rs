//! Static instrument metadata shared by every view builder.
//!
//! One enumerated mapping resource (code -> display name / region / sector /
//! curve membership) instead of per-scene lookup tables.

/// A fixed group of instruments aggregated into one regional sentiment card
pub struct RegionGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub codes: &'static [&'static str],
}

pub const REGION_GROUPS: &[RegionGroup] = &[
    RegionGroup {
        id: "asia",
        label: "Asia",
        codes: &["000001.SH", "399001.SZ", "399006.SZ", "HSI.HI", "N225.GI"],
    },
    RegionGroup {
        id: "americas",
        label: "Americas",
        codes: &["DJI.GI", "SPX.GI", "IXIC.GI", "NDXTMC.GI"],
    },
    RegionGroup {
        id: "europe",
        label: "Europe",
        codes: &["SX5E.GI", "UKX.GI", "CAC.GI", "DAX.GI"],
    },
];

/// Core A-share indices pinned to the A-shares scene, in display order
pub const CORE_A_SHARES: &[(&str, &str)] = &[
    ("000001.SH", "Shanghai Composite"),
    ("399001.SZ", "Shenzhen Component"),
    ("399006.SZ", "ChiNext"),
    ("000300.SH", "CSI 300"),
];

/// Macro scene rate rows, in display order
pub const RATE_ORDER: &[&str] = &[
    "M0000017.SH",
    "M0000025.SH",
    "M0000007.SH",
    "M0000001.SH",
    "UST10Y.GBM",
    "UST2Y.GBM",
    "UST5Y.GBM",
    "SOFR.IR",
    "SONIA.IR",
    "EFFR.IR",
];

/// Display-name fallbacks for codes whose quotes arrive without one
const NAMES: &[(&str, &str)] = &[
    ("000001.SH", "Shanghai Composite"),
    ("399001.SZ", "Shenzhen Component"),
    ("399006.SZ", "ChiNext"),
    ("000300.SH", "CSI 300"),
    ("M0000017.SH", "CN Govt 10Y"),
    ("M0000025.SH", "CN Govt 5Y"),
    ("M0000007.SH", "CN Govt 3Y"),
    ("M0000001.SH", "CN Govt 1Y"),
    ("UST10Y.GBM", "UST 10Y"),
    ("UST5Y.GBM", "UST 5Y"),
    ("UST2Y.GBM", "UST 2Y"),
    ("UST3M.GBM", "UST 3M"),
    ("TB10Y.WI", "CDB 10Y"),
    ("TB5Y.WI", "CDB 5Y"),
    ("LPR1Y.IR", "LPR 1Y"),
    ("LPR5Y.IR", "LPR 5Y"),
    ("SOFR.IR", "SOFR O/N"),
    ("SONIA.IR", "SONIA O/N"),
    ("EFFR.IR", "Fed Funds"),
    ("USDCNY.EX", "USD/CNY"),
    ("USDCNH.FX", "USD/CNH"),
    ("EURCNY.EX", "EUR/CNY"),
    ("EURUSD.FX", "EUR/USD"),
    ("USDJPY.FX", "USD/JPY"),
    ("USDX.FX", "DXY"),
    ("HKDCNY.EX", "HKD/CNY"),
    ("GBPUSD.FX", "GBP/USD"),
];

/// Commodity code -> sector bucket
const COMMODITY_SECTORS: &[(&str, &str)] = &[
    ("RB.SHF", "Ferrous"),
    ("RB00.SHF", "Ferrous"),
    ("I00.DCE", "Ferrous"),
    ("CU00.SHF", "Base Metals"),
    ("AL00.SHF", "Base Metals"),
    ("ZN00.SHF", "Base Metals"),
    ("HG.CMX", "Base Metals"),
    ("GC.CMX", "Precious"),
    ("SI.CMX", "Precious"),
    ("PL.NYM", "Precious"),
    ("PA.NYM", "Precious"),
    ("AU00.SHF", "Precious"),
    ("CL.NYM", "Energy"),
    ("COIL.BR", "Energy"),
    ("NG.NYM", "Energy"),
    ("ZC.CBT", "Agriculture"),
    ("ZS.CBT", "Agriculture"),
    ("KC.NYB", "Softs"),
    ("TA.CZC", "Chemicals"),
    ("PTA.CZC", "Chemicals"),
];

/// Bucket for commodities with no sector mapping
pub const DEFAULT_SECTOR: &str = "General";

/// One point on a yield-curve definition
pub struct CurvePointDef {
    pub code: &'static str,
    pub tenor: f64,
    pub label: &'static str,
}

/// An ordered list of rate codes projected into a curve sparkline
pub struct CurveDef {
    pub key: &'static str,
    pub label: &'static str,
    pub points: &'static [CurvePointDef],
}

pub const YIELD_CURVES: &[CurveDef] = &[
    CurveDef {
        key: "cn",
        label: "China Govt Curve",
        points: &[
            CurvePointDef { code: "M0000001.SH", tenor: 1.0, label: "1Y" },
            CurvePointDef { code: "M0000007.SH", tenor: 3.0, label: "3Y" },
            CurvePointDef { code: "M0000025.SH", tenor: 5.0, label: "5Y" },
            CurvePointDef { code: "M0000017.SH", tenor: 10.0, label: "10Y" },
        ],
    },
    CurveDef {
        key: "us",
        label: "US Treasury Curve",
        points: &[
            CurvePointDef { code: "UST3M.GBM", tenor: 0.25, label: "3M" },
            CurvePointDef { code: "UST5Y.GBM", tenor: 5.0, label: "5Y" },
            CurvePointDef { code: "UST10Y.GBM", tenor: 10.0, label: "10Y" },
        ],
    },
];

/// One derived rate-spread readout for the macro scene: long leg minus
/// short leg
pub struct SpreadDef {
    pub key: &'static str,
    pub label: &'static str,
    pub long_leg: &'static str,
    pub short_leg: &'static str,
}

pub const RATE_SPREADS: &[SpreadDef] = &[
    SpreadDef {
        key: "cn_us_10y",
        label: "CN-US 10Y",
        long_leg: "M0000017.SH",
        short_leg: "UST10Y.GBM",
    },
    SpreadDef {
        key: "cn_term",
        label: "CN 10Y-5Y",
        long_leg: "M0000017.SH",
        short_leg: "M0000025.SH",
    },
    SpreadDef {
        key: "ust_term",
        label: "UST 10Y-2Y",
        long_leg: "UST10Y.GBM",
        short_leg: "UST2Y.GBM",
    },
];

/// FX watchlist for the alternative-assets scene, in display order
pub const FX_WATCHLIST: &[&str] = &[
    "USDCNH.FX",
    "USDCNY.EX",
    "EURUSD.FX",
    "USDJPY.FX",
    "USDX.FX",
    "GBPUSD.FX",
];

/// Display-name fallback for a code
pub fn display_name(code: &str) -> Option<&'static str> {
    NAMES.iter().find(|(c, _)| *c == code).map(|(_, n)| *n)
}

/// Sector bucket for a commodity code
pub fn sector(code: &str) -> &'static str {
    COMMODITY_SECTORS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| *s)
        .unwrap_or(DEFAULT_SECTOR)
}

/// Index-like instrument code (leaderboard filter)
pub fn is_index_code(code: &str) -> bool {
    code.ends_with(".GI")
        || code.ends_with(".HI")
        || code.ends_with(".SH")
        || code.ends_with(".SZ")
        || code.ends_with(".CSI")
}

/// US-listed equity code (US-focus filter)
pub fn is_us_equity_code(code: &str) -> bool {
    code.ends_with(".O")
        || code.ends_with(".N")
        || code.ends_with(".UW")
        || code.ends_with(".UN")
        || code.ends_with(".US")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_suffix_filters() {
        assert!(is_index_code("SPX.GI"));
        assert!(is_index_code("000001.SH"));
        assert!(!is_index_code("BTC.CC"));
        assert!(is_us_equity_code("AAPL.O"));
        assert!(!is_us_equity_code("HSI.HI"));
    }

    #[test]
    fn test_sector_lookup_defaults_to_general() {
        assert_eq!(sector("GC.CMX"), "Precious");
        assert_eq!(sector("XX.YY"), DEFAULT_SECTOR);
    }

    #[test]
    fn test_display_name_lookup() {
        assert_eq!(display_name("SOFR.IR"), Some("SOFR O/N"));
        assert_eq!(display_name("UNKNOWN"), None);
    }
}
