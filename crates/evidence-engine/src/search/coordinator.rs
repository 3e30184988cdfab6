//! Two-phase evidence search
//!
//! Phase 1 trusts the fast-path candidates when they are convincing. Phase 2
//! scans every page. Only phase 2 can conclude that evidence is MISSING.

use super::gating::QualityEvaluator;
use super::SemanticSearch;
use crate::scanner::{ExhaustiveScanner, ScanControl};
use shared_types::{Candidate, Decision, Level, PageMap, Phase, Recommendation, ScanResult};
use std::collections::BTreeSet;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct TwoPhaseCoordinator {
    evaluator: QualityEvaluator,
    scanner: ExhaustiveScanner,
}

impl TwoPhaseCoordinator {
    pub fn new(evaluator: QualityEvaluator, scanner: ExhaustiveScanner) -> Self {
        Self { evaluator, scanner }
    }

    pub fn evaluator(&self) -> &QualityEvaluator {
        &self.evaluator
    }

    pub fn scanner(&self) -> &ExhaustiveScanner {
        &self.scanner
    }

    /// Decide whether `requirement` is evidenced in `pages`
    pub fn decide(&self, requirement: &str, candidates: &[Candidate], pages: &PageMap) -> Decision {
        self.decide_with(requirement, candidates, pages, &ScanControl::unbounded())
    }

    /// Like [`decide`](Self::decide), with a stop condition for the exhaustive scan
    #[tracing::instrument(skip_all, fields(candidates = candidates.len(), pages = pages.len()))]
    pub fn decide_with(
        &self,
        requirement: &str,
        candidates: &[Candidate],
        pages: &PageMap,
        control: &ScanControl,
    ) -> Decision {
        let start = Instant::now();
        let quality = self.evaluator.evaluate(candidates);

        tracing::debug!(
            quality = %quality.quality,
            confidence = quality.confidence,
            chunks = quality.num_chunks,
            unique_pages = quality.unique_pages,
            "Fast-path quality"
        );

        if !self.evaluator.should_escalate(&quality) {
            let evidence_found = quality.num_chunks > 0;
            let recommendation = if !evidence_found {
                Recommendation::Unclear
            } else if quality.quality == Level::High {
                Recommendation::Present
            } else {
                Recommendation::Insufficient
            };
            let evidence_pages: Vec<u32> = candidates
                .iter()
                .filter_map(Candidate::page_number)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();

            tracing::info!(
                "Semantic search sufficient ({} chunks, confidence {:.2}): {}",
                quality.num_chunks,
                quality.confidence,
                recommendation
            );

            return Decision {
                phase_used: Phase::Semantic,
                evidence_found,
                evidence_pages,
                evidence_quality: quality.quality,
                recommendation,
                quality,
                candidates: candidates.to_vec(),
                scan: None,
                total_time: start.elapsed(),
            };
        }

        tracing::info!(
            "Escalating to exhaustive scan ({} chunks, confidence {:.2}, {} quality)",
            quality.num_chunks,
            quality.confidence,
            quality.quality
        );

        let min_relevance = self.scanner.config().min_relevance;
        let scan = self.scanner.scan(pages, requirement, min_relevance, control);
        let recommendation = scan_recommendation(&scan);

        tracing::info!(
            "Exhaustive scan: {} pages with evidence of {} scanned: {}",
            scan.pages_with_evidence,
            scan.total_pages_scanned,
            recommendation
        );

        Decision {
            phase_used: Phase::Exhaustive,
            evidence_found: scan.has_evidence(),
            evidence_pages: scan.evidence_pages.clone(),
            evidence_quality: scan.confidence,
            recommendation,
            quality,
            candidates: candidates.to_vec(),
            scan: Some(scan),
            total_time: start.elapsed(),
        }
    }

    /// Query `provider` for candidates, then decide
    ///
    /// A provider failure is logged and treated as an empty candidate list,
    /// which always escalates.
    pub fn run(
        &self,
        provider: &dyn SemanticSearch,
        requirement: &str,
        pages: &PageMap,
        control: &ScanControl,
    ) -> Decision {
        let candidates = match provider.search(requirement, self.evaluator.config().top_k) {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!("Semantic search failed, falling back to exhaustive scan: {:#}", e);
                Vec::new()
            }
        };
        self.decide_with(requirement, &candidates, pages, control)
    }
}

/// MISSING only after every page was visited
fn scan_recommendation(scan: &ScanResult) -> Recommendation {
    if !scan.has_evidence() {
        if scan.complete {
            Recommendation::Missing
        } else {
            Recommendation::Unclear
        }
    } else if scan.confidence == Level::High {
        Recommendation::Present
    } else {
        Recommendation::Insufficient
    }
}
