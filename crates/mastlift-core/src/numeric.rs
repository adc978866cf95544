use crate::rules::schema::LiftingPolicy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Integer meters, e.g. "30 m" or "45m", but not "5 mm". Matches that continue
/// a larger number are rejected by `continues_number`.
static HEIGHT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+) ?m\b").unwrap());

/// Decimal kilograms, any case, with optional thousands separators:
/// "22 kg", "20.3KG", "1,200 kg".
static WEIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?) ?kg\b").unwrap()
});

/// Where the weight candidates came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    Document,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeightExtract {
    /// Distinct plausible heights, ascending.
    pub candidates: Vec<u32>,
    /// Highest installation point above ground level.
    pub max_agl: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightExtract {
    /// Weights in document order, or the fallback list.
    pub candidates: Vec<Decimal>,
    pub heaviest_kg: Decimal,
    pub source: WeightSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumericExtract {
    pub heights: HeightExtract,
    pub weights: WeightExtract,
}

/// Pull heights and weights out of raw text.
pub fn extract(text: &str, policy: &LiftingPolicy) -> NumericExtract {
    NumericExtract {
        heights: extract_heights(text, policy.height_min_m, policy.height_max_m),
        weights: extract_weights(text, &policy.fallback_weights_kg),
    }
}

/// Heights in meters within the inclusive band `[min, max]`.
///
/// Values outside the band are page numbers, phone fragments and the like.
pub fn extract_heights(text: &str, min: u32, max: u32) -> HeightExtract {
    let mut kept = BTreeSet::new();
    let mut discarded = 0usize;

    for caps in HEIGHT_RE.captures_iter(text) {
        let digits = &caps[1];
        if continues_number(text, caps.get(1).map_or(0, |m| m.start())) {
            discarded += 1;
            continue;
        }
        match digits.parse::<u32>() {
            Ok(v) if (min..=max).contains(&v) => {
                kept.insert(v);
            }
            _ => discarded += 1,
        }
    }

    let candidates: Vec<u32> = kept.into_iter().collect();
    let max_agl = candidates.last().copied();
    debug!(?candidates, discarded, ?max_agl, "height candidates");

    HeightExtract {
        candidates,
        max_agl,
    }
}

/// Weights in kilograms, falling back to typical equipment weights when the
/// text states none.
pub fn extract_weights(text: &str, fallback: &[Decimal]) -> WeightExtract {
    let found: Vec<Decimal> = WEIGHT_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter(|m| !continues_number(text, m.start()))
        .filter_map(|m| Decimal::from_str(&m.as_str().replace(',', "")).ok())
        .filter(|w| !w.is_zero())
        .collect();

    let (candidates, source) = if found.is_empty() {
        warn!("no weights in document, using typical equipment weights");
        (fallback.to_vec(), WeightSource::Fallback)
    } else {
        (found, WeightSource::Document)
    };

    let heaviest_kg = candidates.iter().copied().max().unwrap_or_default();
    debug!(count = candidates.len(), %heaviest_kg, ?source, "weight candidates");

    WeightExtract {
        candidates,
        heaviest_kg,
        source,
    }
}

/// True when the match at `start` is the tail of a longer number: right after
/// a digit or a decimal point ("30.5"), or after a comma between digits ("1,200").
/// A comma that follows a unit ("27m,30m") starts a new value.
fn continues_number(text: &str, start: usize) -> bool {
    let mut before = text[..start].chars().rev();
    match before.next() {
        Some(c) if c.is_ascii_digit() || c == '.' => true,
        Some(',') => before.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fallback() -> Vec<Decimal> {
        vec![
            dec!(180),
            dec!(150),
            dec!(45),
            dec!(22),
            dec!(20.3),
            dec!(18),
            dec!(8),
        ]
    }

    #[test]
    fn test_heights_with_and_without_space() {
        let h = extract_heights("Antenna at 30 m, MW at 27m, RRU at 28 m", 5, 100);
        assert_eq!(h.candidates, vec![27, 28, 30]);
        assert_eq!(h.max_agl, Some(30));
    }

    #[test]
    fn test_heights_outside_band_discarded() {
        let h = extract_heights("Page 2 m\nCall 0812345 m\n150 m ridge\n4 m pole", 5, 100);
        assert!(h.candidates.is_empty());
        assert_eq!(h.max_agl, None);
    }

    #[test]
    fn test_heights_band_inclusive() {
        let h = extract_heights("5 m and 100 m", 5, 100);
        assert_eq!(h.candidates, vec![5, 100]);
    }

    #[test]
    fn test_heights_distinct() {
        let h = extract_heights("30 m tower, antennas at 30 m", 5, 100);
        assert_eq!(h.candidates, vec![30]);
    }

    #[test]
    fn test_heights_ignore_other_units() {
        let h = extract_heights("0.6 m dish, 30.5 m, 20 mm bolts, 12 MHz, 40 km", 5, 100);
        assert!(h.candidates.is_empty());
    }

    #[test]
    fn test_weights_from_document() {
        let w = extract_weights("Cabinet 150 kg\nRRU 22.5KG\nDish 45 Kg", &fallback());
        assert_eq!(w.candidates, vec![dec!(150), dec!(22.5), dec!(45)]);
        assert_eq!(w.heaviest_kg, dec!(150));
        assert_eq!(w.source, WeightSource::Document);
    }

    #[test]
    fn test_weights_no_upper_filter() {
        let w = extract_weights("Generator 2500 kg", &fallback());
        assert_eq!(w.heaviest_kg, dec!(2500));
    }

    #[test]
    fn test_heights_comma_separated_list() {
        let h = extract_heights("Mount heights: 27m,30m,33m", 5, 100);
        assert_eq!(h.candidates, vec![27, 30, 33]);
        assert_eq!(h.max_agl, Some(33));
    }

    #[test]
    fn test_heights_ignore_thousands_tail() {
        let h = extract_heights("Cable run 1,020 m, mast 36 m", 5, 100);
        assert_eq!(h.candidates, vec![36]);
    }

    #[test]
    fn test_weights_thousands_separator() {
        let w = extract_weights("Generator set 1,200 kg\nRRU 22 kg", &fallback());
        assert_eq!(w.candidates, vec![dec!(1200), dec!(22)]);
        assert_eq!(w.heaviest_kg, dec!(1200));
    }

    #[test]
    fn test_weights_separator_with_decimals() {
        let w = extract_weights("Shelter 2,450.5 kg", &fallback());
        assert_eq!(w.heaviest_kg, dec!(2450.5));
    }

    #[test]
    fn test_weights_never_take_number_tail() {
        // "12,50" is not a thousands group; neither 12 nor 50 is a weight
        let w = extract_weights("bracket 12,50 kg", &fallback());
        assert_eq!(w.source, WeightSource::Fallback);
    }

    #[test]
    fn test_weights_fallback() {
        let w = extract_weights("no weights stated", &fallback());
        assert_eq!(w.source, WeightSource::Fallback);
        assert_eq!(w.candidates.len(), 7);
        assert_eq!(w.heaviest_kg, dec!(180));
    }

    #[test]
    fn test_zero_weight_ignored() {
        let w = extract_weights("tare 0 kg", &fallback());
        assert_eq!(w.source, WeightSource::Fallback);
    }

    #[test]
    fn test_extract_uses_policy_band() {
        let policy = crate::rules::builtin::default_policy().unwrap();
        let n = extract("30 m monopole, 182 kg", &policy);
        assert_eq!(n.heights.max_agl, Some(30));
        assert_eq!(n.weights.heaviest_kg, dec!(182));
    }
}
