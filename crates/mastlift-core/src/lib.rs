pub mod classify;
pub mod error;
pub mod model;
pub mod numeric;
pub mod recommend;
pub mod rules;
pub mod source;
pub mod structure;
pub mod summary;

use classify::Classifier;
use error::MastliftError;
use model::{EquipmentComparison, SiteContext, TextDocument};
use rules::schema::{KeywordTable, LiftingPolicy};
use source::{DefaultExtractor, DocumentSource, TextExtractor};
use summary::{AnalysisResult, ExtractiveSummarizer, SectionSummary, Summarizer};
use tracing::info;

/// The proposal analysis pipeline.
///
/// Holds only configuration and injected collaborators, so one instance can
/// be shared across threads and reused for any number of documents.
pub struct Analyzer {
    extractor: Box<dyn TextExtractor>,
    summarizer: Box<dyn Summarizer>,
    structure: Classifier,
    environment: Classifier,
    policy: LiftingPolicy,
}

impl Analyzer {
    /// Pipeline with the builtin keyword tables, lifting policy and backends.
    pub fn with_defaults() -> Result<Self, MastliftError> {
        Analyzer::new(
            &rules::builtin::load_preset("structure")?,
            &rules::builtin::load_preset("environment")?,
            rules::builtin::default_policy()?,
        )
    }

    pub fn new(
        structure: &KeywordTable,
        environment: &KeywordTable,
        policy: LiftingPolicy,
    ) -> Result<Self, MastliftError> {
        rules::validate_policy(&policy)?;
        Ok(Analyzer {
            extractor: Box::new(DefaultExtractor::new()),
            summarizer: Box::new(ExtractiveSummarizer::default()),
            structure: Classifier::new(structure)?,
            environment: Classifier::new(environment)?,
            policy,
        })
    }

    /// Replace the text extraction backend.
    pub fn with_extractor(mut self, extractor: Box<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replace the summarizer.
    pub fn with_summarizer(mut self, summarizer: Box<dyn Summarizer>) -> Self {
        self.summarizer = summarizer;
        self
    }

    /// Linearize a source without analyzing it.
    pub fn read(&self, source: &DocumentSource) -> Result<TextDocument, MastliftError> {
        source::read_document(source, self.extractor.as_ref())
    }

    /// Main API entry point: extract, classify and recommend for one source.
    ///
    /// Fails only when the text cannot be extracted.
    pub fn analyze(
        &self,
        source: &DocumentSource,
        ctx: &SiteContext,
    ) -> Result<AnalysisResult, MastliftError> {
        let document = self.read(source)?;
        Ok(self.analyze_document(&document, ctx))
    }

    /// Analyze an already linearized document. Never fails.
    pub fn analyze_document(&self, document: &TextDocument, ctx: &SiteContext) -> AnalysisResult {
        let text = document.text();

        let structure = SectionSummary::build(
            summary::STRUCTURE_TITLE,
            self.structure.name(),
            self.structure.classify(document),
            self.summarizer.as_ref(),
        );
        let environment = SectionSummary::build(
            summary::ENVIRONMENT_TITLE,
            self.environment.name(),
            self.environment.classify(document),
            self.summarizer.as_ref(),
        );

        let numeric = numeric::extract(&text, &self.policy);
        let structure_type = structure::infer(&text);
        let recommendation = recommend::recommend(
            structure_type,
            numeric.heights.max_agl,
            numeric.weights.heaviest_kg,
            ctx,
            &self.policy,
        );

        info!(
            source = %document.source_id,
            lines = document.lines().len(),
            %structure_type,
            max_agl = ?numeric.heights.max_agl,
            heaviest_kg = %numeric.weights.heaviest_kg,
            "analysis complete"
        );

        summary::assemble(
            &document.source_id,
            structure,
            environment,
            structure_type,
            numeric,
            recommendation,
        )
    }

    /// Analyze a source and attach caller-supplied before/after tables.
    pub fn analyze_with_comparison(
        &self,
        source: &DocumentSource,
        ctx: &SiteContext,
        comparison: EquipmentComparison,
    ) -> Result<AnalysisResult, MastliftError> {
        let mut result = self.analyze(source, ctx)?;
        if !comparison.is_empty() {
            result.comparison = Some(comparison);
        }
        Ok(result)
    }
}
