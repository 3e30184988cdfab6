//! Value types shared by the evidence engine and its front ends

pub mod types;

pub use types::{
    Candidate, Decision, EvidenceItem, EvidenceMatch, Importance, Keyword, Level, PageMap,
    Phase, QualityScore, Recommendation, ScanResult,
};
