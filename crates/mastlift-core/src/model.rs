use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Linearized text of one source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDocument {
    pub source_id: String,
    /// Number of pages or paragraphs the text was assembled from.
    pub unit_count: usize,
    lines: Vec<String>,
}

impl TextDocument {
    pub fn new(source_id: impl Into<String>, unit_count: usize, lines: Vec<String>) -> Self {
        TextDocument {
            source_id: source_id.into(),
            unit_count,
            lines,
        }
    }

    /// Build a document from raw text, one entry per line.
    pub fn from_text(source_id: impl Into<String>, text: &str) -> Self {
        let lines: Vec<String> = text.lines().map(|l| l.to_string()).collect();
        let unit_count = usize::from(!lines.is_empty());
        TextDocument::new(source_id, unit_count, lines)
    }

    pub fn empty(source_id: impl Into<String>) -> Self {
        TextDocument::new(source_id, 0, Vec::new())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Full text with lines joined by `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Kind of installation the proposal describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureType {
    Rooftop,
    Lampole,
    Rapole,
    Monopole,
    Gbt,
    Unknown,
}

impl StructureType {
    /// Monopoles, ground-based towers and rapoles share the climbing rules.
    pub fn is_monopole_family(self) -> bool {
        matches!(
            self,
            StructureType::Monopole | StructureType::Gbt | StructureType::Rapole
        )
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureType::Rooftop => write!(f, "rooftop"),
            StructureType::Lampole => write!(f, "lampole"),
            StructureType::Rapole => write!(f, "rapole"),
            StructureType::Monopole => write!(f, "monopole"),
            StructureType::Gbt => write!(f, "gbt"),
            StructureType::Unknown => write!(f, "unknown"),
        }
    }
}

/// User-supplied site conditions for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContext {
    pub has_climbing_access: bool,
    pub force_skylift: bool,
    pub force_crane: bool,
    /// Horizontal distance from crane to load placement, in meters.
    pub setback_m: Decimal,
    pub rooftop_elevation_m: Decimal,
}

impl Default for SiteContext {
    fn default() -> Self {
        SiteContext {
            has_climbing_access: true,
            force_skylift: false,
            force_crane: false,
            setback_m: Decimal::from(10),
            rooftop_elevation_m: Decimal::from(25),
        }
    }
}

/// Equipment count for one category before and after the proposed change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentCountRow {
    pub category: String,
    pub before: u32,
    pub after: u32,
}

/// Tower load under one condition (e.g. "Existing", "Proposed").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TowerLoadRow {
    pub condition: String,
    pub load_kg: Decimal,
}

/// Before/after tables supplied alongside a proposal and carried into the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentComparison {
    #[serde(default)]
    pub equipment_counts: Vec<EquipmentCountRow>,
    #[serde(default)]
    pub tower_load: Vec<TowerLoadRow>,
}

impl EquipmentComparison {
    pub fn is_empty(&self) -> bool {
        self.equipment_counts.is_empty() && self.tower_load.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_site_context_defaults() {
        let ctx = SiteContext::default();
        assert!(ctx.has_climbing_access);
        assert!(!ctx.force_skylift);
        assert!(!ctx.force_crane);
        assert_eq!(ctx.setback_m, dec!(10));
        assert_eq!(ctx.rooftop_elevation_m, dec!(25));
    }

    #[test]
    fn test_site_context_partial_json() {
        let ctx: SiteContext =
            serde_json::from_str(r#"{ "has_climbing_access": false, "setback_m": "12.5" }"#)
                .unwrap();
        assert!(!ctx.has_climbing_access);
        assert_eq!(ctx.setback_m, dec!(12.5));
        assert_eq!(ctx.rooftop_elevation_m, dec!(25));
    }

    #[test]
    fn test_from_text_splits_lines() {
        let doc = TextDocument::from_text("a.txt", "Tower 30 m\nRRU 22 kg");
        assert_eq!(doc.lines().len(), 2);
        assert_eq!(doc.unit_count, 1);
        assert_eq!(doc.text(), "Tower 30 m\nRRU 22 kg");
    }

    #[test]
    fn test_from_text_empty() {
        let doc = TextDocument::from_text("a.txt", "");
        assert!(doc.is_empty());
        assert_eq!(doc.unit_count, 0);
    }

    #[test]
    fn test_monopole_family() {
        assert!(StructureType::Gbt.is_monopole_family());
        assert!(StructureType::Rapole.is_monopole_family());
        assert!(!StructureType::Lampole.is_monopole_family());
        assert!(!StructureType::Rooftop.is_monopole_family());
    }
}
