use std::collections::BTreeMap;
use std::time::Duration;

/// Page number to page text for one document. Page numbers need not be contiguous.
pub type PageMap = BTreeMap<u32, String>;

/// Importance class of a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Important,
    Ordinary,
}

/// A search term derived from a requirement
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Keyword {
    pub term: String,
    pub importance: Importance,
}

impl Keyword {
    pub fn new(term: impl Into<String>, importance: Importance) -> Self {
        Self {
            term: term.into(),
            importance,
        }
    }

    pub fn important(term: impl Into<String>) -> Self {
        Self::new(term, Importance::Important)
    }

    pub fn ordinary(term: impl Into<String>) -> Self {
        Self::new(term, Importance::Ordinary)
    }

    pub fn is_important(&self) -> bool {
        self.importance == Importance::Important
    }
}

/// Coarse three-way tier shared by scan confidence and fast-path quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::High => "high",
            Level::Medium => "medium",
            Level::Low => "low",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evidence found on a single page
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EvidenceMatch {
    pub page_number: u32,
    pub text_snippet: String,
    pub keyword_matches: Vec<Keyword>,
    pub relevance_score: f64, // Always within [0, 1]
    pub context_sentences: Vec<String>,
}

/// Outcome of scanning every page of a document for one requirement
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScanResult {
    pub total_pages_scanned: usize,
    pub total_pages: usize, // Size of the page map, scanned or not
    pub pages_with_evidence: usize,
    pub evidence_pages: Vec<u32>, // Ascending, unique
    pub evidence_matches: Vec<EvidenceMatch>, // Relevance descending
    pub keywords_used: Vec<Keyword>,
    pub search_time: Duration,
    pub confidence: Level,
    pub complete: bool,
}

impl ScanResult {
    pub fn top_relevance(&self) -> f64 {
        self.evidence_matches
            .first()
            .map(|m| m.relevance_score)
            .unwrap_or(0.0)
    }

    pub fn has_evidence(&self) -> bool {
        self.pages_with_evidence > 0
    }
}

/// One chunk returned by an external fast (semantic) search
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Candidate {
    #[serde(default, alias = "page_number")]
    pub page: Option<u32>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub text: Option<String>,
}

impl Candidate {
    pub fn new(page: Option<u32>, score: Option<f64>) -> Self {
        Self {
            page,
            score,
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Page number, ignoring the invalid page 0
    pub fn page_number(&self) -> Option<u32> {
        self.page.filter(|p| *p > 0)
    }
}

/// Sufficiency rating of a fast-path candidate list
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QualityScore {
    pub quality: Level,
    pub confidence: f64, // Within [0, 1]
    pub num_chunks: usize,
    pub unique_pages: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Semantic,
    Exhaustive,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Semantic => f.write_str("semantic"),
            Phase::Exhaustive => f.write_str("exhaustive"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Present,
    Insufficient,
    Missing,
    Unclear,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Recommendation::Present => "PRESENT",
            Recommendation::Insufficient => "INSUFFICIENT",
            Recommendation::Missing => "MISSING",
            Recommendation::Unclear => "UNCLEAR",
        };
        f.write_str(label)
    }
}

/// Terminal verdict input produced by the two-phase coordinator
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Decision {
    pub phase_used: Phase,
    pub evidence_found: bool,
    pub evidence_pages: Vec<u32>,
    pub evidence_quality: Level,
    pub recommendation: Recommendation,
    pub quality: QualityScore,
    pub candidates: Vec<Candidate>,
    pub scan: Option<ScanResult>,
    pub total_time: Duration,
}

/// Uniform citation record regardless of which phase produced it
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EvidenceItem {
    pub page_number: Option<u32>,
    pub text: String,
    pub relevance: Option<f64>,
    pub source: Phase,
}

impl Decision {
    /// Best evidence for citation: scan matches when escalated, else the candidates
    pub fn best_evidence(&self, max_items: usize) -> Vec<EvidenceItem> {
        match (&self.phase_used, &self.scan) {
            (Phase::Exhaustive, Some(scan)) => scan
                .evidence_matches
                .iter()
                .take(max_items)
                .map(|m| EvidenceItem {
                    page_number: Some(m.page_number),
                    text: m.text_snippet.clone(),
                    relevance: Some(m.relevance_score),
                    source: Phase::Exhaustive,
                })
                .collect(),
            _ => self
                .candidates
                .iter()
                .take(max_items)
                .map(|c| EvidenceItem {
                    page_number: c.page_number(),
                    text: c.text.clone().unwrap_or_default(),
                    relevance: c.score,
                    source: Phase::Semantic,
                })
                .collect(),
        }
    }
}
