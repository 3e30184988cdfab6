pub mod config;
pub mod error;
pub mod extractors;
pub mod patterns;
pub mod scanner;
pub mod scoring;
pub mod search;
pub mod summary;
pub mod vocabulary;

pub use config::{EngineConfig, GateConfig, KeywordConfig, ScanConfig, ScoringConfig};
pub use error::{ConfigError, EngineError};
pub use extractors::KeywordExtractor;
pub use scanner::{ExhaustiveScanner, ScanControl};
pub use scoring::PageScorer;
pub use search::{QualityEvaluator, SemanticSearch, TwoPhaseCoordinator};
pub use vocabulary::{Category, Vocabulary};

use shared_types::{
    Candidate, Decision, EvidenceMatch, Keyword, PageMap, QualityScore, ScanResult,
};
use std::sync::Arc;

/// EvidenceEngine entry point
///
/// Holds only immutable configuration and vocabulary tables. Cloning is cheap
/// and clones share the vocabulary and any dedicated scan pool.
#[derive(Debug, Clone)]
pub struct EvidenceEngine {
    config: Arc<EngineConfig>,
    extractor: KeywordExtractor,
    scorer: PageScorer,
    coordinator: TwoPhaseCoordinator,
}

impl EvidenceEngine {
    /// Build an engine from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the dedicated
    /// scan worker pool cannot be started.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let vocabulary = Arc::new(Vocabulary::from_config(&config.keywords)?);
        let extractor = KeywordExtractor::new(vocabulary, config.keywords.clone());
        let scorer = PageScorer::new(config.scoring.clone());
        let scanner =
            ExhaustiveScanner::new(extractor.clone(), scorer.clone(), config.scan.clone())?;
        let coordinator =
            TwoPhaseCoordinator::new(QualityEvaluator::new(config.gate.clone()), scanner);

        tracing::debug!(
            categories = Category::ALL.len(),
            worker_threads = ?config.scan.worker_threads,
            "Evidence engine ready"
        );

        Ok(Self {
            config: Arc::new(config),
            extractor,
            scorer,
            coordinator,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn extract_keywords(&self, requirement: &str) -> Vec<Keyword> {
        self.extractor.extract(requirement)
    }

    pub fn score_page(
        &self,
        page_number: u32,
        page_text: &str,
        keywords: &[Keyword],
        requirement: &str,
    ) -> Option<EvidenceMatch> {
        self.scorer.score_page(page_number, page_text, keywords, requirement)
    }

    /// Scan every page, keeping matches at or above `min_relevance`
    pub fn scan_document(
        &self,
        pages: &PageMap,
        requirement: &str,
        min_relevance: f64,
    ) -> ScanResult {
        self.scan_document_with(pages, requirement, min_relevance, &ScanControl::unbounded())
    }

    pub fn scan_document_with(
        &self,
        pages: &PageMap,
        requirement: &str,
        min_relevance: f64,
        control: &ScanControl,
    ) -> ScanResult {
        self.coordinator
            .scanner()
            .scan(pages, requirement, min_relevance, control)
    }

    pub fn evaluate_quality(&self, candidates: &[Candidate]) -> QualityScore {
        self.coordinator.evaluator().evaluate(candidates)
    }

    pub fn decide(&self, requirement: &str, candidates: &[Candidate], pages: &PageMap) -> Decision {
        self.coordinator.decide(requirement, candidates, pages)
    }

    pub fn decide_with(
        &self,
        requirement: &str,
        candidates: &[Candidate],
        pages: &PageMap,
        control: &ScanControl,
    ) -> Decision {
        self.coordinator
            .decide_with(requirement, candidates, pages, control)
    }

    /// Fetch candidates from `provider` and decide
    pub fn run(
        &self,
        provider: &dyn SemanticSearch,
        requirement: &str,
        pages: &PageMap,
        control: &ScanControl,
    ) -> Decision {
        self.coordinator.run(provider, requirement, pages, control)
    }
}

impl Default for EvidenceEngine {
    fn default() -> Self {
        let config = EngineConfig::default();
        let vocabulary = Arc::new(Vocabulary::default());
        let extractor = KeywordExtractor::new(vocabulary, config.keywords.clone());
        let scorer = PageScorer::new(config.scoring.clone());
        let scanner =
            ExhaustiveScanner::from_parts(extractor.clone(), scorer.clone(), config.scan.clone());
        let coordinator =
            TwoPhaseCoordinator::new(QualityEvaluator::new(config.gate.clone()), scanner);
        Self {
            config: Arc::new(config),
            extractor,
            scorer,
            coordinator,
        }
    }
}
