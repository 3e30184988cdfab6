//! Page-level relevance scoring
//!
//! Scores one page against a keyword list:
//!
//! ```text
//! relevance = min(matched / total + important_matched * importance_boost, 1.0)
//!           * proximity_multiplier   (>= 3 matches whose first hits span < 200 chars)
//!           * phrase_multiplier      (a 3-word requirement phrase appears verbatim)
//! ```
//!
//! The result is capped at 1.0 again after the bonuses.

use crate::config::ScoringConfig;
use crate::extractors::extract_context_sentences;
use crate::patterns::{char_offset, requirement_phrases, truncate_chars};
use shared_types::{EvidenceMatch, Keyword};

/// Keywords and requirement phrases prepared once per requirement
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    keywords: Vec<Keyword>,
    lowered: Vec<String>,
    phrases: Vec<String>,
}

impl PreparedQuery {
    pub fn new(keywords: Vec<Keyword>, requirement: &str, phrase_sample: usize) -> Self {
        let lowered = keywords.iter().map(|k| k.term.to_lowercase()).collect();
        let requirement_lower = requirement.to_lowercase();
        let phrases = requirement_phrases(&requirement_lower, phrase_sample)
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            keywords,
            lowered,
            phrases,
        }
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn into_keywords(self) -> Vec<Keyword> {
        self.keywords
    }
}

/// Scores single pages against a prepared query
#[derive(Debug, Clone, Default)]
pub struct PageScorer {
    config: ScoringConfig,
}

impl PageScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a page against `keywords` extracted from `requirement`
    pub fn score_page(
        &self,
        page_number: u32,
        page_text: &str,
        keywords: &[Keyword],
        requirement: &str,
    ) -> Option<EvidenceMatch> {
        let query = PreparedQuery::new(keywords.to_vec(), requirement, self.config.phrase_sample);
        self.score_prepared(page_number, page_text, &query)
    }

    /// Score a page; `None` for short pages, pages without keyword hits,
    /// and pages whose hits never land in a usable sentence
    pub fn score_prepared(
        &self,
        page_number: u32,
        page_text: &str,
        query: &PreparedQuery,
    ) -> Option<EvidenceMatch> {
        if page_text.trim().chars().count() < self.config.min_page_chars {
            return None;
        }

        let page_lower = page_text.to_lowercase();

        let mut matched: Vec<(&Keyword, &str)> = Vec::new();
        for (keyword, lowered) in query.keywords.iter().zip(&query.lowered) {
            if !lowered.is_empty() && page_lower.contains(lowered.as_str()) {
                matched.push((keyword, lowered.as_str()));
            }
        }
        if matched.is_empty() {
            return None;
        }

        let important = matched.iter().filter(|(k, _)| k.is_important()).count();
        let base_relevance = matched.len() as f64 / query.keywords.len().max(1) as f64;
        let importance_boost = important as f64 * self.config.importance_boost;
        let mut relevance = (base_relevance + importance_boost).min(1.0);

        if self.keywords_are_close(&page_lower, &matched) {
            relevance *= self.config.proximity_multiplier;
        }

        if query
            .phrases
            .iter()
            .any(|phrase| page_lower.contains(phrase.as_str()))
        {
            relevance *= self.config.phrase_multiplier;
        }

        let relevance = relevance.min(1.0);

        let matched_lower: Vec<String> = matched.iter().map(|(_, l)| l.to_string()).collect();
        let mut context_sentences =
            extract_context_sentences(page_text, &matched_lower, self.config.min_sentence_chars);
        if context_sentences.is_empty() {
            return None;
        }
        context_sentences.truncate(self.config.max_context_sentences);

        let text_snippet = truncate_chars(&context_sentences[0], self.config.snippet_max_chars);

        Some(EvidenceMatch {
            page_number,
            text_snippet,
            keyword_matches: matched.into_iter().map(|(k, _)| k.clone()).collect(),
            relevance_score: relevance,
            context_sentences,
        })
    }

    /// True when the first hits of the leading matched keywords fall inside the proximity window
    fn keywords_are_close(&self, page_lower: &str, matched: &[(&Keyword, &str)]) -> bool {
        if matched.len() < self.config.proximity_min_keywords {
            return false;
        }

        let mut positions: Vec<usize> = matched
            .iter()
            .take(self.config.proximity_sample)
            .filter_map(|(_, lowered)| page_lower.find(lowered))
            .map(|byte| char_offset(page_lower, byte))
            .collect();

        if positions.len() < self.config.proximity_min_keywords {
            return false;
        }
        positions.sort_unstable();

        match (positions.first(), positions.last()) {
            (Some(first), Some(last)) => last - first < self.config.proximity_window,
            _ => false,
        }
    }
}
