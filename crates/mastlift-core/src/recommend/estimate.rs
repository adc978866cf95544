use crate::rules::schema::LiftingPolicy;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const SKYLIFT_WORKING_HEIGHT: &str = "Skylift working height (m)";
pub const CRANE_LOAD: &str = "Crane load (kg)";
pub const CRANE_RADIUS: &str = "Crane radius (m)";
pub const CRANE_ELEVATION: &str = "Crane elevation (m)";
pub const CRANE_TONNAGE: &str = "Crane tonnage (t)";

/// A quantity that is either computed or left as a formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EstimateValue {
    Number(#[serde(with = "rust_decimal::serde::float")] Decimal),
    Symbolic(String),
}

impl EstimateValue {
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            EstimateValue::Number(v) => Some(*v),
            EstimateValue::Symbolic(_) => None,
        }
    }
}

impl fmt::Display for EstimateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateValue::Number(v) => write!(f, "{v}"),
            EstimateValue::Symbolic(s) => write!(f, "{s}"),
        }
    }
}

/// Crane class with the load placement it was sized for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CraneEstimate {
    pub load_kg: Decimal,
    pub radius_m: Decimal,
    pub elevation_m: Decimal,
    pub tonnage_t: u32,
}

/// Quantified part of a recommendation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Estimates {
    pub working_height: Option<EstimateValue>,
    pub crane: Option<CraneEstimate>,
}

impl Estimates {
    pub fn is_empty(&self) -> bool {
        self.working_height.is_none() && self.crane.is_none()
    }

    /// Flatten into named quantities for reports.
    pub fn to_named(&self) -> BTreeMap<String, EstimateValue> {
        let mut out = BTreeMap::new();
        if let Some(ref h) = self.working_height {
            out.insert(SKYLIFT_WORKING_HEIGHT.to_string(), h.clone());
        }
        if let Some(ref c) = self.crane {
            out.insert(CRANE_LOAD.to_string(), EstimateValue::Number(c.load_kg));
            out.insert(CRANE_RADIUS.to_string(), EstimateValue::Number(c.radius_m));
            out.insert(CRANE_ELEVATION.to_string(), EstimateValue::Number(c.elevation_m));
            out.insert(
                CRANE_TONNAGE.to_string(),
                EstimateValue::Number(Decimal::from(c.tonnage_t)),
            );
        }
        out
    }
}

/// Smallest crane class whose band covers the load placement.
///
/// Bands are checked from smallest to largest; any limit breach moves on to
/// the next class, ending at the policy's fallback class.
pub fn crane_tonnage(
    load_kg: Decimal,
    radius_m: Decimal,
    elevation_m: Decimal,
    policy: &LiftingPolicy,
) -> u32 {
    policy
        .tonnage_bands
        .iter()
        .find(|band| band.fits(load_kg, radius_m, elevation_m))
        .map(|band| band.tons)
        .unwrap_or(policy.fallback_tons)
}

pub fn size_crane(
    load_kg: Decimal,
    radius_m: Decimal,
    elevation_m: Decimal,
    policy: &LiftingPolicy,
) -> CraneEstimate {
    CraneEstimate {
        load_kg,
        radius_m,
        elevation_m,
        tonnage_t: crane_tonnage(load_kg, radius_m, elevation_m, policy),
    }
}

/// Basket height needed to reach the highest installation point.
pub fn working_height(max_agl: Option<u32>, policy: &LiftingPolicy) -> EstimateValue {
    match max_agl {
        Some(agl) => EstimateValue::Number(Decimal::from(agl) + policy.clearance_m),
        None => EstimateValue::Symbolic(format!("AGL + {}", policy.clearance_m)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::default_policy;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tonnage_bands() {
        let p = default_policy().unwrap();
        assert_eq!(crane_tonnage(dec!(180), dec!(10), dec!(25), &p), 25);
        assert_eq!(crane_tonnage(dec!(250), dec!(25), dec!(30), &p), 25);
        assert_eq!(crane_tonnage(dec!(251), dec!(25), dec!(30), &p), 35);
        assert_eq!(crane_tonnage(dec!(180), dec!(10), dec!(31), &p), 35);
        assert_eq!(crane_tonnage(dec!(180), dec!(28), dec!(25), &p), 35);
        assert_eq!(crane_tonnage(dec!(600), dec!(10), dec!(25), &p), 50);
        assert_eq!(crane_tonnage(dec!(400), dec!(31), dec!(25), &p), 50);
    }

    #[test]
    fn test_tonnage_monotonic_in_load() {
        let p = default_policy().unwrap();
        let mut previous = 0;
        for load in (0..=1000).step_by(10) {
            let tons = crane_tonnage(Decimal::from(load), dec!(25), dec!(30), &p);
            assert!(tons >= previous, "tonnage dropped at {load} kg");
            if load > 250 {
                assert!(tons >= 35);
            }
            previous = tons;
        }
    }

    #[test]
    fn test_working_height() {
        let p = default_policy().unwrap();
        assert_eq!(working_height(Some(30), &p), EstimateValue::Number(dec!(33)));
        assert_eq!(
            working_height(None, &p),
            EstimateValue::Symbolic("AGL + 3".into())
        );
    }

    #[test]
    fn test_named_estimates() {
        let est = Estimates {
            working_height: None,
            crane: Some(CraneEstimate {
                load_kg: dec!(180),
                radius_m: dec!(10),
                elevation_m: dec!(25),
                tonnage_t: 25,
            }),
        };
        let named = est.to_named();
        assert_eq!(named.len(), 4);
        assert_eq!(named[CRANE_TONNAGE].as_number(), Some(dec!(25)));
        assert!(!named.contains_key(SKYLIFT_WORKING_HEIGHT));
    }

    #[test]
    fn test_estimate_value_json() {
        let json = serde_json::to_string(&EstimateValue::Number(dec!(33))).unwrap();
        assert_eq!(json, "33.0");
        let json = serde_json::to_string(&EstimateValue::Symbolic("AGL + 3".into())).unwrap();
        assert_eq!(json, "\"AGL + 3\"");
    }
}
