//! Quality gating of fast-path candidates
//!
//! Routes a requirement based on how convincing its fast-path candidates are:
//!
//! ```text
//! confidence = min(chunks / 10, 0.4)
//!            + min(unique_pages / 5, 0.3)
//!            + (avg(score) * 0.3  if any candidate is scored, else 0.2)
//! ```
//!
//! - High: confidence >= 0.7 and at least 5 chunks
//! - Medium: confidence >= 0.4 and at least 3 chunks
//! - Low: everything else, including no candidates at all

use crate::config::GateConfig;
use shared_types::{Candidate, Level, QualityScore};
use std::collections::BTreeSet;

/// Scores a candidate list and decides whether the fast path is sufficient
#[derive(Debug, Clone, Default)]
pub struct QualityEvaluator {
    config: GateConfig,
}

impl QualityEvaluator {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Evaluate the quality of a candidate list
    pub fn evaluate(&self, candidates: &[Candidate]) -> QualityScore {
        if candidates.is_empty() {
            return QualityScore {
                quality: Level::Low,
                confidence: 0.0,
                num_chunks: 0,
                unique_pages: 0,
            };
        }

        let cfg = &self.config;
        let num_chunks = candidates.len();
        let unique_pages = candidates
            .iter()
            .filter_map(Candidate::page_number)
            .collect::<BTreeSet<_>>()
            .len();

        let chunk_weight = (num_chunks as f64 / cfg.chunk_divisor).min(cfg.chunk_weight_cap);
        let page_weight = (unique_pages as f64 / cfg.page_divisor).min(cfg.page_weight_cap);

        let score_weight = if candidates.iter().any(|c| c.score.is_some()) {
            // Unscored and non-finite entries count as zero
            let total: f64 = candidates
                .iter()
                .filter_map(|c| c.score)
                .filter(|s| s.is_finite())
                .sum();
            total / num_chunks as f64 * cfg.score_weight
        } else {
            cfg.unscored_bonus
        };

        let confidence = (chunk_weight + page_weight + score_weight).clamp(0.0, 1.0);

        let quality = if confidence >= cfg.high_confidence && num_chunks >= cfg.high_min_chunks {
            Level::High
        } else if confidence >= cfg.medium_confidence && num_chunks >= cfg.medium_min_chunks {
            Level::Medium
        } else {
            Level::Low
        };

        QualityScore {
            quality,
            confidence,
            num_chunks,
            unique_pages,
        }
    }

    /// Whether the fast path is too weak to rely on
    pub fn should_escalate(&self, score: &QualityScore) -> bool {
        score.num_chunks < self.config.escalate_below_chunks
            || score.confidence < self.config.escalate_below_confidence
            || score.quality == Level::Low
    }
}
