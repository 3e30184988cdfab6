//! End-to-end evidence search scenarios
//!
//! Exercises the engine through its public API: keyword scoring, the
//! exhaustive scan, fast-path gating and the two-phase decision.
//!
//! Run with: cargo test -p evidence-engine --test scenarios

use evidence_engine::{EngineConfig, EvidenceEngine, ScanControl, SemanticSearch};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use shared_types::{Candidate, Keyword, Level, PageMap, Phase, Recommendation};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

// ============================================================================
// Test Helpers
// ============================================================================

fn engine() -> EvidenceEngine {
    EvidenceEngine::new(EngineConfig::default()).unwrap()
}

fn page_map(entries: &[(u32, &str)]) -> PageMap {
    entries.iter().map(|(n, t)| (*n, t.to_string())).collect()
}

fn rnd_document() -> PageMap {
    page_map(&[
        (1, "Unrelated text about logistics."),
        (2, "No R&D content here."),
        (3, "Research and Development expenditure was ₹5 crore in FY24."),
    ])
}

/// A long offer document with related party disclosures on a few pages
fn offer_document(pages: u32) -> PageMap {
    (1..=pages)
        .map(|n| {
            let text = match n {
                42 => "Related party transactions with the Promoter group amounted to ₹12 crore. \
                       All related party transactions were conducted at arm's length."
                    .to_string(),
                97 => "The Audit Committee reviews every related party transaction quarterly and \
                       the details are disclosed in Note 34 to the financial statements."
                    .to_string(),
                n => format!(
                    "Page {} sets out the manufacturing process and plant operations of the Company.",
                    n
                ),
            };
            (n, text)
        })
        .collect()
}

fn scored_candidates(pages: &[u32], score: f64) -> Vec<Candidate> {
    pages
        .iter()
        .map(|p| Candidate::new(Some(*p), Some(score)).with_text(format!("chunk from page {}", p)))
        .collect()
}

/// Counts provider calls
struct CountingSearch {
    candidates: Vec<Candidate>,
    calls: AtomicUsize,
}

impl SemanticSearch for CountingSearch {
    fn search(&self, _requirement: &str, top_k: usize) -> anyhow::Result<Vec<Candidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.candidates.iter().take(top_k).cloned().collect())
    }
}

// ============================================================================
// Concrete Scenarios
// ============================================================================

#[test]
fn scenario_a_revenue_segment_page() {
    let keywords = vec![Keyword::important("revenue"), Keyword::ordinary("segment")];
    let m = engine()
        .score_page(
            1,
            "Revenue for the automotive segment was ₹50 crore this year.",
            &keywords,
            "Disclose segment revenue",
        )
        .unwrap();

    assert_eq!(m.keyword_matches, keywords);
    assert_eq!(m.relevance_score, 1.0);
}

#[test]
fn scenario_b_rnd_expenditure_scan() {
    let result = engine().scan_document(&rnd_document(), "Disclose R&D expenditure", 0.2);

    assert!(result.evidence_pages.contains(&3));
    assert!(!result.evidence_pages.contains(&1));
    assert!(!result.evidence_pages.contains(&2));
    assert_eq!(result.pages_with_evidence, 1);
    assert_eq!(result.total_pages_scanned, 3);
    assert!(result.complete);

    let m = &result.evidence_matches[0];
    assert_eq!(
        m.text_snippet,
        "Research and Development expenditure was ₹5 crore in FY24"
    );
}

#[test]
fn scenario_c_six_chunks_four_pages() {
    let candidates = scored_candidates(&[10, 10, 11, 11, 12, 13], 0.8);
    let quality = engine().evaluate_quality(&candidates);

    assert_eq!(quality.num_chunks, 6);
    assert_eq!(quality.unique_pages, 4);
    assert!(quality.confidence >= 0.7);
    assert_eq!(quality.quality, Level::High);
}

// ============================================================================
// Coordinator Rules
// ============================================================================

#[test]
fn empty_candidates_always_escalate() {
    let decision = engine().decide("Disclose related party transactions", &[], &offer_document(150));

    assert_eq!(decision.phase_used, Phase::Exhaustive);
    assert_eq!(decision.evidence_pages, vec![42, 97]);
    assert!(decision.evidence_found);
    let scan = decision.scan.as_ref().unwrap();
    assert_eq!(scan.total_pages_scanned, 150);
}

#[test]
fn strong_fast_path_is_trusted() {
    let candidates = scored_candidates(&[42, 42, 97, 97, 12, 13], 0.85);
    let decision = engine().decide(
        "Disclose related party transactions",
        &candidates,
        &offer_document(150),
    );

    assert_eq!(decision.phase_used, Phase::Semantic);
    assert_eq!(decision.recommendation, Recommendation::Present);
    assert_eq!(decision.evidence_pages, vec![12, 13, 42, 97]);

    let best = decision.best_evidence(3);
    assert_eq!(best.len(), 3);
    assert!(best.iter().all(|e| e.source == Phase::Semantic));
}

#[test]
fn weak_fast_path_escalates() {
    // Enough chunks, but none carries a page and all score low
    let candidates: Vec<Candidate> = (0..6).map(|_| Candidate::new(None, Some(0.1))).collect();
    let quality = engine().evaluate_quality(&candidates);
    // 0.4 + 0.0 + 0.03
    assert!(quality.confidence < 0.6);
    assert_eq!(quality.quality, Level::Medium);

    let decision = engine().decide(
        "Disclose related party transactions",
        &candidates,
        &offer_document(150),
    );
    assert_eq!(decision.phase_used, Phase::Exhaustive);
    assert_eq!(decision.evidence_pages, vec![42, 97]);
}

#[test]
fn missing_only_after_full_scan() {
    let pages = offer_document(150);
    let decision = engine().decide("Disclose the dividend policy", &[], &pages);

    assert_eq!(decision.phase_used, Phase::Exhaustive);
    assert!(!decision.evidence_found);
    assert_eq!(decision.recommendation, Recommendation::Missing);
    assert_eq!(decision.evidence_quality, Level::High);
}

#[test]
fn cancelled_scan_is_unclear_not_missing() {
    let token = CancellationToken::new();
    token.cancel();
    let control = ScanControl::unbounded().with_cancellation(token);

    let decision = engine().decide_with(
        "Disclose the dividend policy",
        &[],
        &offer_document(150),
        &control,
    );

    assert_eq!(decision.recommendation, Recommendation::Unclear);
    let scan = decision.scan.unwrap();
    assert!(!scan.complete);
    assert_eq!(scan.total_pages, 150);
    assert!(scan.total_pages_scanned < 150);
}

#[test]
fn provider_called_once_with_top_k() {
    let provider = CountingSearch {
        candidates: scored_candidates(&(1..=40).collect::<Vec<_>>(), 0.9),
        calls: AtomicUsize::new(0),
    };
    let decision = engine().run(
        &provider,
        "Disclose related party transactions",
        &offer_document(150),
        &ScanControl::unbounded(),
    );

    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    assert_eq!(decision.candidates.len(), 20);
    assert_eq!(decision.phase_used, Phase::Semantic);
}

#[test]
fn decision_serializes_with_wire_names() {
    let decision = engine().decide("Disclose R&D expenditure", &[], &rnd_document());
    let json = serde_json::to_value(&decision).unwrap();

    assert_eq!(json["phase_used"], "exhaustive");
    assert_eq!(json["recommendation"], "PRESENT");
    assert_eq!(json["evidence_pages"], serde_json::json!([3]));
}

// ============================================================================
// Scan Invariants
// ============================================================================

#[test]
fn empty_page_map_is_confident_miss() {
    let result = engine().scan_document(&PageMap::new(), "Disclose R&D expenditure", 0.2);
    assert_eq!(result.total_pages_scanned, 0);
    assert_eq!(result.confidence, Level::High);
    assert!(result.evidence_matches.is_empty());
}

#[test]
fn large_scan_is_deterministic() {
    let pages = offer_document(400);
    let mut first = engine().scan_document(&pages, "Disclose related party transactions", 0.2);
    let mut second = engine().scan_document(&pages, "Disclose related party transactions", 0.2);
    first.search_time = Duration::ZERO;
    second.search_time = Duration::ZERO;
    assert_eq!(first, second);
}

#[test]
fn dedicated_pool_matches_global_pool() {
    let mut config = EngineConfig::default();
    config.scan.worker_threads = Some(2);
    let pooled = EvidenceEngine::new(config).unwrap();

    let pages = offer_document(400);
    let mut a = pooled.scan_document(&pages, "Disclose related party transactions", 0.2);
    let mut b = engine().scan_document(&pages, "Disclose related party transactions", 0.2);
    a.search_time = Duration::ZERO;
    b.search_time = Duration::ZERO;
    assert_eq!(a, b);
}

#[test]
fn config_loaded_from_toml() {
    let config: EngineConfig = r#"
        [scan]
        min_relevance = 0.5

        [gate]
        top_k = 5
    "#
    .parse()
    .unwrap();
    assert_eq!(config.scan.min_relevance, 0.5);
    assert_eq!(config.gate.top_k, 5);
    assert_eq!(config.scoring.min_page_chars, 50);

    let engine = EvidenceEngine::new(config).unwrap();
    assert_eq!(engine.config().gate.top_k, 5);
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: an empty requirement is a vacuous, confident miss
    #[test]
    fn vacuous_miss(
        pages in prop::collection::btree_map(1u32..1000, "\\PC{0,200}", 0..30)
    ) {
        let result = engine().scan_document(&pages, "", 0.2);
        prop_assert_eq!(result.pages_with_evidence, 0);
        prop_assert_eq!(result.confidence, Level::High);
    }

    /// Property: every match is in range and evidence pages are ordered and unique
    #[test]
    fn range_and_ordering(
        pages in prop::collection::btree_map(
            1u32..300,
            "(related|party|transaction|promoter|revenue|the|and|₹[0-9]{1,3} crore|[a-z]{2,9}|\\.| ){10,50}",
            0..40
        ),
        requirement in "(Disclose|related|party|promoter|revenue|transactions| ){1,6}"
    ) {
        let result = engine().scan_document(&pages, &requirement, 0.2);

        prop_assert!(result.evidence_matches.iter().all(|m| (0.0..=1.0).contains(&m.relevance_score)));
        prop_assert!(result.evidence_pages.windows(2).all(|w| w[0] < w[1]));

        let mut from_matches: Vec<u32> = result.evidence_matches.iter().map(|m| m.page_number).collect();
        from_matches.sort_unstable();
        prop_assert_eq!(from_matches, result.evidence_pages.clone());
    }

    /// Property: no candidates means the exhaustive scan always runs
    #[test]
    fn escalation_without_candidates(
        pages in prop::collection::btree_map(1u32..100, "[a-zA-Z .]{0,120}", 0..10),
        requirement in "[a-zA-Z ]{0,40}"
    ) {
        let decision = engine().decide(&requirement, &[], &pages);
        prop_assert_eq!(decision.phase_used, Phase::Exhaustive);
        prop_assert!(decision.scan.is_some());
        prop_assert!(decision.recommendation != Recommendation::Unclear);
    }
}
