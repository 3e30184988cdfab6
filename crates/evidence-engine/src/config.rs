//! Engine configuration
//!
//! Every tuning constant of the scorer, scanner and fast-path gate lives here
//! with its default value. Configuration can be loaded from TOML; any section
//! or field left out keeps its default.
//!
//! ```toml
//! [scan]
//! min_relevance = 0.25
//! worker_threads = 4
//!
//! [keywords.categories]
//! taxation = ["tax", "gst", "cess"]
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub keywords: KeywordConfig,
    pub scoring: ScoringConfig,
    pub scan: ScanConfig,
    pub gate: GateConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or a value fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        content.parse()
    }

    /// Check every value is in its legal range
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.keywords.validate()?;
        self.scoring.validate()?;
        self.scan.validate()?;
        self.gate.validate()
    }
}

impl FromStr for EngineConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: EngineConfig =
            toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Keyword extraction limits and vocabulary overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Maximum keywords kept per requirement (default: 30)
    pub max_keywords: usize,
    /// Maximum monetary amounts taken from a requirement (default: 3)
    pub max_amounts: usize,
    /// Keywords shorter than this many characters are dropped (default: 3)
    pub min_keyword_chars: usize,
    /// Replacement synonym lists, keyed by category name
    pub categories: BTreeMap<String, Vec<String>>,
    pub extra_important_terms: Vec<String>,
    pub extra_stop_words: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            max_keywords: 30,
            max_amounts: 3,
            min_keyword_chars: 3,
            categories: BTreeMap::new(),
            extra_important_terms: Vec::new(),
            extra_stop_words: Vec::new(),
        }
    }
}

impl KeywordConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_keywords == 0 {
            return Err(ConfigError::Zero("keywords.max_keywords"));
        }
        Ok(())
    }
}

/// Page relevance scoring parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Pages with fewer trimmed characters are skipped (default: 50)
    pub min_page_chars: usize,
    /// Added per matched important keyword (default: 0.15)
    pub importance_boost: f64,
    /// Matched keywords needed before proximity is checked (default: 3)
    pub proximity_min_keywords: usize,
    /// Matched keywords whose first positions are compared (default: 5)
    pub proximity_sample: usize,
    /// Maximum character span for the proximity bonus (default: 200)
    pub proximity_window: usize,
    pub proximity_multiplier: f64,
    /// Requirement phrases tried for the exact phrase bonus (default: 3)
    pub phrase_sample: usize,
    pub phrase_multiplier: f64,
    /// Shorter sentence fragments are ignored (default: 20)
    pub min_sentence_chars: usize,
    pub max_context_sentences: usize,
    pub snippet_max_chars: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_page_chars: 50,
            importance_boost: 0.15,
            proximity_min_keywords: 3,
            proximity_sample: 5,
            proximity_window: 200,
            proximity_multiplier: 1.3,
            phrase_sample: 3,
            phrase_multiplier: 1.2,
            min_sentence_chars: 20,
            max_context_sentences: 5,
            snippet_max_chars: 300,
        }
    }
}

impl ScoringConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("scoring.importance_boost", self.importance_boost)?;
        at_least_one("scoring.proximity_multiplier", self.proximity_multiplier)?;
        at_least_one("scoring.phrase_multiplier", self.phrase_multiplier)?;
        if self.max_context_sentences == 0 {
            return Err(ConfigError::Zero("scoring.max_context_sentences"));
        }
        if self.snippet_max_chars == 0 {
            return Err(ConfigError::Zero("scoring.snippet_max_chars"));
        }
        Ok(())
    }
}

/// Exhaustive scan thresholds and parallelism
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Matches below this relevance are discarded (default: 0.2)
    pub min_relevance: f64,
    /// Evidence on this many pages is high confidence (default: 3)
    pub high_min_pages: usize,
    /// A top match above this relevance is high confidence (default: 0.7)
    pub high_top_relevance: f64,
    /// Evidence on more than this share of pages is high confidence (default: 0.02)
    pub high_coverage: f64,
    /// A top match above this relevance is medium confidence (default: 0.4)
    pub medium_top_relevance: f64,
    /// Documents with fewer pages are scanned on the calling thread (default: 100)
    pub parallel_min_pages: usize,
    /// Dedicated scan workers; `None` shares the global pool (one worker per core)
    pub worker_threads: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_relevance: 0.2,
            high_min_pages: 3,
            high_top_relevance: 0.7,
            high_coverage: 0.02,
            medium_top_relevance: 0.4,
            parallel_min_pages: 100,
            worker_threads: None,
        }
    }
}

impl ScanConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        unit_range("scan.min_relevance", self.min_relevance)?;
        unit_range("scan.high_top_relevance", self.high_top_relevance)?;
        unit_range("scan.high_coverage", self.high_coverage)?;
        unit_range("scan.medium_top_relevance", self.medium_top_relevance)?;
        if self.worker_threads == Some(0) {
            return Err(ConfigError::Zero("scan.worker_threads"));
        }
        Ok(())
    }
}

/// Fast-path quality gate and escalation thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Chunk count giving full chunk credit (default: 10)
    pub chunk_divisor: f64,
    pub chunk_weight_cap: f64,
    /// Distinct page count giving full page credit (default: 5)
    pub page_divisor: f64,
    pub page_weight_cap: f64,
    /// Weight of the average candidate score (default: 0.3)
    pub score_weight: f64,
    /// Credit when no candidate carries a score (default: 0.2)
    pub unscored_bonus: f64,
    pub high_confidence: f64,
    pub high_min_chunks: usize,
    pub medium_confidence: f64,
    pub medium_min_chunks: usize,
    /// Escalate when fewer chunks than this were found (default: 5)
    pub escalate_below_chunks: usize,
    /// Escalate when confidence is below this (default: 0.6)
    pub escalate_below_confidence: f64,
    /// Chunks requested from a fast-path provider (default: 20)
    pub top_k: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            chunk_divisor: 10.0,
            chunk_weight_cap: 0.4,
            page_divisor: 5.0,
            page_weight_cap: 0.3,
            score_weight: 0.3,
            unscored_bonus: 0.2,
            high_confidence: 0.7,
            high_min_chunks: 5,
            medium_confidence: 0.4,
            medium_min_chunks: 3,
            escalate_below_chunks: 5,
            escalate_below_confidence: 0.6,
            top_k: 20,
        }
    }
}

impl GateConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_divisor.is_nan() || self.chunk_divisor <= 0.0 {
            return Err(ConfigError::Zero("gate.chunk_divisor"));
        }
        if self.page_divisor.is_nan() || self.page_divisor <= 0.0 {
            return Err(ConfigError::Zero("gate.page_divisor"));
        }
        unit_range("gate.chunk_weight_cap", self.chunk_weight_cap)?;
        unit_range("gate.page_weight_cap", self.page_weight_cap)?;
        unit_range("gate.score_weight", self.score_weight)?;
        unit_range("gate.unscored_bonus", self.unscored_bonus)?;
        unit_range("gate.high_confidence", self.high_confidence)?;
        unit_range("gate.medium_confidence", self.medium_confidence)?;
        unit_range("gate.escalate_below_confidence", self.escalate_below_confidence)?;
        if self.top_k == 0 {
            return Err(ConfigError::Zero("gate.top_k"));
        }
        Ok(())
    }
}

fn unit_range(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}

fn at_least_one(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::MultiplierBelowOne { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
