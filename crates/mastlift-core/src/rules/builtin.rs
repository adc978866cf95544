use crate::error::MastliftError;
use crate::rules::schema::{KeywordTable, LiftingPolicy};
use crate::rules::{parse_policy_str, parse_table_str};

const STRUCTURE_JSON: &str = include_str!("../../../../rules/structure.json");
const ENVIRONMENT_JSON: &str = include_str!("../../../../rules/environment.json");
const SECTIONS_JSON: &str = include_str!("../../../../rules/sections.json");
const LIFTING_JSON: &str = include_str!("../../../../rules/lifting.json");

/// Available predefined keyword tables.
pub const PRESETS: &[&str] = &["structure", "environment", "sections"];

/// Load a predefined keyword table by name.
pub fn load_preset(name: &str) -> Result<KeywordTable, MastliftError> {
    match name {
        "structure" => parse_table_str(STRUCTURE_JSON),
        "environment" => parse_table_str(ENVIRONMENT_JSON),
        "sections" => parse_table_str(SECTIONS_JSON),
        _ => Err(MastliftError::KeywordTableInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// The builtin lifting policy (height band, fallback weights, crane classes).
pub fn default_policy() -> Result<LiftingPolicy, MastliftError> {
    parse_policy_str(LIFTING_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_structure_preset() {
        let table = load_preset("structure").unwrap();
        let names: Vec<&str> = table.category_names().collect();
        assert_eq!(
            names,
            vec!["Tower", "Antennas", "RRU", "Microwave", "CabinetPower", "WeightImpact"]
        );
        assert!(!table.exclusive);
    }

    #[test]
    fn test_load_environment_preset() {
        let table = load_preset("environment").unwrap();
        let names: Vec<&str> = table.category_names().collect();
        assert_eq!(
            names,
            vec!["Accessibility", "RoadPremise", "TrafficLifting", "EnvironmentalImpact"]
        );
    }

    #[test]
    fn test_sections_preset_keeps_original_keywords() {
        let table = load_preset("sections").unwrap();
        assert_eq!(table.categories.len(), 2);
        assert!(table.categories[0].keywords.contains(&"mw".to_string()));
        assert!(table.categories[1].keywords.contains(&"crane".to_string()));
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
    }

    #[test]
    fn test_default_policy() {
        let policy = default_policy().unwrap();
        assert_eq!(policy.height_min_m, 5);
        assert_eq!(policy.height_max_m, 100);
        assert_eq!(policy.clearance_m, dec!(3));
        assert_eq!(policy.fallback_weights_kg.len(), 7);
        assert!(policy.fallback_weights_kg.contains(&dec!(20.3)));
        assert_eq!(policy.tonnage_bands.len(), 2);
        assert_eq!(policy.tonnage_bands[0].tons, 25);
        assert_eq!(policy.tonnage_bands[1].max_elevation_m, None);
        assert_eq!(policy.fallback_tons, 50);
    }
}
