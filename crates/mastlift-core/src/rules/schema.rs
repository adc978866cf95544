use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a category keyword is tested against a case-folded line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Plain substring test. "mw" also hits inside "framework".
    #[default]
    Substring,
    /// Keyword must start and end on word boundaries.
    Word,
    /// Keywords are case-insensitive regular expressions.
    Regex,
}

/// A table of line categories and the keywords that select them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordTable {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    #[serde(default)]
    pub matching: MatchStrategy,
    /// When set, a line lands in the first matching category only.
    #[serde(default)]
    pub exclusive: bool,
    /// Categories in report order.
    pub categories: Vec<CategoryDef>,
}

impl KeywordTable {
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub keywords: Vec<String>,
}

/// Thresholds and constants behind numeric extraction and lifting advice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiftingPolicy {
    pub name: String,
    pub version: String,
    /// Inclusive band of plausible installation heights, in meters.
    pub height_min_m: u32,
    pub height_max_m: u32,
    /// Typical equipment weights used when a document states none.
    pub fallback_weights_kg: Vec<Decimal>,
    /// Basket clearance added above the highest installation point.
    pub clearance_m: Decimal,
    /// Crane classes from smallest to largest.
    pub tonnage_bands: Vec<TonnageBand>,
    /// Class used when no band fits.
    pub fallback_tons: u32,
}

/// One crane class and the load placement it can handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TonnageBand {
    pub tons: u32,
    pub max_load_kg: Decimal,
    pub max_radius_m: Decimal,
    /// No elevation limit when absent.
    #[serde(default)]
    pub max_elevation_m: Option<Decimal>,
}

impl TonnageBand {
    pub fn fits(&self, load_kg: Decimal, radius_m: Decimal, elevation_m: Decimal) -> bool {
        load_kg <= self.max_load_kg
            && radius_m <= self.max_radius_m
            && self.max_elevation_m.map_or(true, |max| elevation_m <= max)
    }
}
