pub mod builtin;
pub mod schema;

use crate::error::MastliftError;
use schema::{KeywordTable, LiftingPolicy, MatchStrategy};
use std::collections::HashSet;
use std::path::Path;

/// Load a keyword table from a JSON file.
pub fn load_table(path: &Path) -> Result<KeywordTable, MastliftError> {
    let content = std::fs::read_to_string(path).map_err(|e| MastliftError::KeywordTableLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_table(&content, path)
}

/// Parse a keyword table from a JSON string.
pub fn parse_table(json: &str, source: &Path) -> Result<KeywordTable, MastliftError> {
    let table: KeywordTable =
        serde_json::from_str(json).map_err(|e| MastliftError::KeywordTableLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_table(&table)?;
    Ok(table)
}

/// Parse a keyword table from a JSON string (no file path context).
pub fn parse_table_str(json: &str) -> Result<KeywordTable, MastliftError> {
    let table: KeywordTable = serde_json::from_str(json)?;
    validate_table(&table)?;
    Ok(table)
}

/// Validate that a keyword table is well-formed.
pub fn validate_table(table: &KeywordTable) -> Result<(), MastliftError> {
    if table.categories.is_empty() {
        return Err(MastliftError::KeywordTableInvalid(
            "categories must not be empty".into(),
        ));
    }

    let mut seen = HashSet::new();
    for category in &table.categories {
        if category.name.trim().is_empty() {
            return Err(MastliftError::KeywordTableInvalid(
                "category name must not be empty".into(),
            ));
        }
        if !seen.insert(category.name.as_str()) {
            return Err(MastliftError::KeywordTableInvalid(format!(
                "duplicate category '{}'",
                category.name
            )));
        }
        if category.keywords.is_empty() {
            return Err(MastliftError::KeywordTableInvalid(format!(
                "category '{}' has no keywords",
                category.name
            )));
        }
        for keyword in &category.keywords {
            if keyword.trim().is_empty() {
                return Err(MastliftError::KeywordTableInvalid(format!(
                    "category '{}' has a blank keyword",
                    category.name
                )));
            }
            if table.matching == MatchStrategy::Regex {
                regex::Regex::new(keyword).map_err(|e| {
                    MastliftError::KeywordTableInvalid(format!(
                        "category '{}' has an invalid pattern '{}': {}",
                        category.name, keyword, e
                    ))
                })?;
            }
        }
    }

    Ok(())
}

/// Load a lifting policy from a JSON file.
pub fn load_policy(path: &Path) -> Result<LiftingPolicy, MastliftError> {
    let content = std::fs::read_to_string(path)?;
    let policy: LiftingPolicy = serde_json::from_str(&content).map_err(|e| {
        MastliftError::PolicyInvalid(format!("{}: {}", path.display(), e))
    })?;
    validate_policy(&policy)?;
    Ok(policy)
}

/// Parse a lifting policy from a JSON string.
pub fn parse_policy_str(json: &str) -> Result<LiftingPolicy, MastliftError> {
    let policy: LiftingPolicy = serde_json::from_str(json)?;
    validate_policy(&policy)?;
    Ok(policy)
}

/// Validate a lifting policy.
///
/// Crane bands must grow strictly in tonnage and never shrink in any limit,
/// so that a heavier or farther load can only move to a larger class.
pub fn validate_policy(policy: &LiftingPolicy) -> Result<(), MastliftError> {
    if policy.height_min_m > policy.height_max_m {
        return Err(MastliftError::PolicyInvalid(format!(
            "height band [{}, {}] is empty",
            policy.height_min_m, policy.height_max_m
        )));
    }

    if policy.fallback_weights_kg.is_empty() {
        return Err(MastliftError::PolicyInvalid(
            "fallback_weights_kg must not be empty".into(),
        ));
    }
    if policy.fallback_weights_kg.iter().any(|w| w.is_sign_negative() || w.is_zero()) {
        return Err(MastliftError::PolicyInvalid(
            "fallback weights must be positive".into(),
        ));
    }

    if policy.clearance_m.is_sign_negative() {
        return Err(MastliftError::PolicyInvalid(
            "clearance_m must not be negative".into(),
        ));
    }

    for pair in policy.tonnage_bands.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        if upper.tons <= lower.tons {
            return Err(MastliftError::PolicyInvalid(format!(
                "tonnage bands must increase: {} t follows {} t",
                upper.tons, lower.tons
            )));
        }
        let elevation_shrinks = match (lower.max_elevation_m, upper.max_elevation_m) {
            (None, Some(_)) => true,
            (Some(lo), Some(hi)) => hi < lo,
            _ => false,
        };
        if upper.max_load_kg < lower.max_load_kg
            || upper.max_radius_m < lower.max_radius_m
            || elevation_shrinks
        {
            return Err(MastliftError::PolicyInvalid(format!(
                "{} t band has tighter limits than {} t band",
                upper.tons, lower.tons
            )));
        }
    }

    if let Some(last) = policy.tonnage_bands.last() {
        if policy.fallback_tons <= last.tons {
            return Err(MastliftError::PolicyInvalid(format!(
                "fallback_tons {} must exceed the largest band ({} t)",
                policy.fallback_tons, last.tons
            )));
        }
    }

    Ok(())
}
