//! Exhaustive document scan
//!
//! Every page of the document is scored before a "no evidence" conclusion can
//! be drawn. Large documents are scored in parallel; results are reduced in
//! page order and then sorted by relevance with a stable sort, so the output
//! does not depend on worker scheduling.

use crate::config::ScanConfig;
use crate::error::EngineError;
use crate::extractors::KeywordExtractor;
use crate::scoring::{PageScorer, PreparedQuery};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use shared_types::{EvidenceMatch, Keyword, Level, PageMap, ScanResult};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Cooperative stop conditions checked before each page is scored
#[derive(Debug, Clone, Default)]
pub struct ScanControl {
    cancel: Option<CancellationToken>,
    deadline: Option<Instant>,
}

impl ScanControl {
    /// Never stops early
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn should_stop(&self) -> bool {
        self.cancel.as_ref().is_some_and(|c| c.is_cancelled())
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Applies the page scorer to every page of a document
#[derive(Debug, Clone)]
pub struct ExhaustiveScanner {
    extractor: KeywordExtractor,
    scorer: PageScorer,
    config: ScanConfig,
    pool: Option<Arc<ThreadPool>>,
}

impl ExhaustiveScanner {
    pub fn new(
        extractor: KeywordExtractor,
        scorer: PageScorer,
        config: ScanConfig,
    ) -> Result<Self, EngineError> {
        let pool = match config.worker_threads {
            Some(threads) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("evidence-scan-{}", i))
                    .build()
                    .map_err(|e| EngineError::WorkerPool(e.to_string()))?;
                Some(Arc::new(pool))
            }
            None => None,
        };

        Ok(Self {
            extractor,
            scorer,
            config,
            pool,
        })
    }

    /// Scanner on the global rayon pool, ignoring `worker_threads`
    pub fn from_parts(extractor: KeywordExtractor, scorer: PageScorer, config: ScanConfig) -> Self {
        Self {
            extractor,
            scorer,
            config,
            pool: None,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan every page with the configured minimum relevance
    pub fn scan_document(&self, pages: &PageMap, requirement: &str) -> ScanResult {
        self.scan(
            pages,
            requirement,
            self.config.min_relevance,
            &ScanControl::unbounded(),
        )
    }

    /// Scan pages in page-number order, stopping early if `control` says so
    ///
    /// An interrupted scan returns what it found so far; `total_pages_scanned`
    /// counts only pages that were actually scored and `complete` is false.
    #[tracing::instrument(skip_all, fields(pages = pages.len()))]
    pub fn scan(
        &self,
        pages: &PageMap,
        requirement: &str,
        min_relevance: f64,
        control: &ScanControl,
    ) -> ScanResult {
        let start = Instant::now();

        let keywords = self.extractor.extract(requirement);
        tracing::debug!(
            keywords = %preview(&keywords, 8),
            "Extracted {} keywords",
            keywords.len()
        );
        let query = PreparedQuery::new(keywords, requirement, self.scorer.config().phrase_sample);

        let entries: Vec<(u32, &str)> = pages.iter().map(|(n, t)| (*n, t.as_str())).collect();

        // None = not visited, Some(None) = visited without qualifying evidence
        let evaluate = |(page_number, text): &(u32, &str)| -> Option<Option<EvidenceMatch>> {
            if control.should_stop() {
                return None;
            }
            Some(
                self.scorer
                    .score_prepared(*page_number, text, &query)
                    .filter(|m| m.relevance_score >= min_relevance),
            )
        };

        let outcomes: Vec<Option<Option<EvidenceMatch>>> =
            if entries.len() >= self.config.parallel_min_pages {
                match &self.pool {
                    Some(pool) => pool.install(|| entries.par_iter().map(evaluate).collect()),
                    None => entries.par_iter().map(evaluate).collect(),
                }
            } else {
                entries.iter().map(evaluate).collect()
            };

        let total_pages_scanned = outcomes.iter().filter(|o| o.is_some()).count();
        let complete = total_pages_scanned == entries.len();

        // Outcomes are in page order, so evidence pages come out ascending and unique
        let mut evidence_matches: Vec<EvidenceMatch> =
            outcomes.into_iter().flatten().flatten().collect();
        let evidence_pages: Vec<u32> = evidence_matches.iter().map(|m| m.page_number).collect();
        evidence_matches.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));

        let top_relevance = evidence_matches
            .first()
            .map(|m| m.relevance_score)
            .unwrap_or(0.0);
        let confidence = classify_confidence(
            &self.config,
            evidence_pages.len(),
            total_pages_scanned,
            top_relevance,
            complete,
        );

        let search_time = start.elapsed();
        if complete {
            tracing::info!(
                "Scan complete: {} of {} pages with evidence ({} confidence) in {:?}",
                evidence_pages.len(),
                total_pages_scanned,
                confidence,
                search_time
            );
        } else {
            tracing::warn!(
                "Scan interrupted after {} of {} pages: {} pages with evidence",
                total_pages_scanned,
                entries.len(),
                evidence_pages.len()
            );
        }

        ScanResult {
            total_pages_scanned,
            total_pages: entries.len(),
            pages_with_evidence: evidence_pages.len(),
            evidence_pages,
            evidence_matches,
            keywords_used: query.into_keywords(),
            search_time,
            confidence,
            complete,
        }
    }
}

/// Confidence tier for a scan outcome
///
/// Finding nothing after visiting every page is itself high confidence: the
/// evidence is missing. Finding nothing in a partial scan proves nothing.
pub fn classify_confidence(
    config: &ScanConfig,
    pages_with_evidence: usize,
    pages_scanned: usize,
    top_relevance: f64,
    complete: bool,
) -> Level {
    if pages_with_evidence == 0 {
        return if complete { Level::High } else { Level::Low };
    }

    let coverage = pages_with_evidence as f64 / pages_scanned.max(1) as f64;
    if pages_with_evidence >= config.high_min_pages
        || top_relevance > config.high_top_relevance
        || coverage > config.high_coverage
    {
        return Level::High;
    }

    if top_relevance > config.medium_top_relevance {
        Level::Medium
    } else {
        Level::Low
    }
}

fn preview(keywords: &[Keyword], count: usize) -> String {
    keywords
        .iter()
        .take(count)
        .map(|k| k.term.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
