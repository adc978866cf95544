pub mod summarizer;

pub use summarizer::{ExtractiveSummarizer, Summarizer};

use crate::classify::ClassifiedBucket;
use crate::model::{EquipmentComparison, StructureType};
use crate::numeric::NumericExtract;
use crate::recommend::{EstimateValue, Recommendation};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Placeholder for a category without matching lines.
pub const NO_DETAILS: &str = "No details found.";
/// Placeholder for a section without any matching lines.
pub const NO_INFORMATION: &str = "No relevant information found.";

pub const STRUCTURE_TITLE: &str = "Structure Technical Info Summary";
pub const ENVIRONMENT_TITLE: &str = "Aerial/Environment Situation Summary";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub text: String,
}

/// One report section: the classified lines and their summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSummary {
    pub title: String,
    /// Name of the keyword table that produced the buckets.
    pub table: String,
    pub buckets: ClassifiedBucket,
    pub summaries: Vec<CategorySummary>,
    pub overview: String,
}

impl SectionSummary {
    pub fn build(
        title: &str,
        table: &str,
        buckets: ClassifiedBucket,
        summarizer: &dyn Summarizer,
    ) -> Self {
        let summaries = buckets
            .iter()
            .map(|c| CategorySummary {
                category: c.category.clone(),
                text: summarize_or(summarizer, &c.lines, NO_DETAILS),
            })
            .collect();
        let overview = summarize_or(summarizer, buckets.matched_lines(), NO_INFORMATION);

        SectionSummary {
            title: title.to_string(),
            table: table.to_string(),
            buckets,
            summaries,
            overview,
        }
    }

    pub fn summary_for(&self, category: &str) -> Option<&str> {
        self.summaries
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.text.as_str())
    }
}

fn summarize_or(summarizer: &dyn Summarizer, lines: &[String], placeholder: &str) -> String {
    if lines.iter().all(|l| l.trim().is_empty()) {
        return placeholder.to_string();
    }
    summarizer.summarize(lines)
}

/// Everything derived from one proposal, ready for report rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub source: String,
    pub structure: SectionSummary,
    pub environment: SectionSummary,
    pub structure_type: StructureType,
    pub max_agl: Option<u32>,
    pub heaviest_item_kg: Decimal,
    pub numeric: NumericExtract,
    pub recommendations: Vec<String>,
    pub estimates: BTreeMap<String, EstimateValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<EquipmentComparison>,
}

/// Merge the stage outputs into one result record.
pub fn assemble(
    source: &str,
    structure: SectionSummary,
    environment: SectionSummary,
    structure_type: StructureType,
    numeric: NumericExtract,
    recommendation: Recommendation,
) -> AnalysisResult {
    AnalysisResult {
        source: source.to_string(),
        structure,
        environment,
        structure_type,
        max_agl: numeric.heights.max_agl,
        heaviest_item_kg: numeric.weights.heaviest_kg,
        numeric,
        recommendations: recommendation.advisories,
        estimates: recommendation.estimates.to_named(),
        comparison: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::model::TextDocument;
    use crate::rules::builtin::load_preset;

    fn section(lines: &[&str]) -> SectionSummary {
        let table = load_preset("environment").unwrap();
        let doc = TextDocument::new("t.txt", 1, lines.iter().map(|s| s.to_string()).collect());
        let bucket = Classifier::new(&table).unwrap().classify(&doc);
        SectionSummary::build(ENVIRONMENT_TITLE, &table.name, bucket, &ExtractiveSummarizer::default())
    }

    #[test]
    fn test_empty_section_uses_placeholders() {
        let s = section(&["Invoice number 42"]);
        assert_eq!(s.overview, NO_INFORMATION);
        assert_eq!(s.summaries.len(), 4);
        assert!(s.summaries.iter().all(|c| c.text == NO_DETAILS));
    }

    #[test]
    fn test_filled_and_empty_categories() {
        let s = section(&["Narrow road to the premise", "Crane permit needed"]);
        assert_eq!(s.summary_for("RoadPremise"), Some("Narrow road to the premise"));
        assert_eq!(s.summary_for("TrafficLifting"), Some("Crane permit needed"));
        assert_eq!(s.summary_for("EnvironmentalImpact"), Some(NO_DETAILS));
        assert_eq!(
            s.overview,
            "Narrow road to the premise; Crane permit needed"
        );
    }
}
