//! Fast-path search handling
//!
//! This module provides:
//! - Quality gating of externally ranked candidate chunks
//! - The two-phase coordinator that escalates to an exhaustive scan
//! - The `SemanticSearch` seam for fast-path providers

pub mod coordinator;
pub mod gating;

pub use coordinator::TwoPhaseCoordinator;
pub use gating::QualityEvaluator;

use shared_types::Candidate;

/// A fast semantic search provider (embedding index, vector store, ...)
///
/// Implementations own their retry policy; the coordinator calls `search`
/// once per requirement and treats an error as "no candidates".
pub trait SemanticSearch: Send + Sync {
    fn search(&self, requirement: &str, top_k: usize) -> anyhow::Result<Vec<Candidate>>;
}

/// Fixed candidate list, useful when candidates were produced upstream
impl SemanticSearch for Vec<Candidate> {
    fn search(&self, _requirement: &str, top_k: usize) -> anyhow::Result<Vec<Candidate>> {
        Ok(self.iter().take(top_k).cloned().collect())
    }
}
