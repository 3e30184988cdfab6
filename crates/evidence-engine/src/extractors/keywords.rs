//! Requirement text to weighted keyword list

use crate::config::KeywordConfig;
use crate::patterns::{
    AMOUNT_PATTERN, CAPITALIZED_PATTERN, QUOTED_PATTERN, REGULATION_REF_PATTERN,
    SIGNIFICANT_WORD_PATTERN, TECHNICAL_PATTERN,
};
use crate::vocabulary::Vocabulary;
use shared_types::Keyword;
use std::collections::HashSet;
use std::sync::Arc;

/// Turns a requirement into a deduplicated, priority-ordered keyword list
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    vocabulary: Arc<Vocabulary>,
    config: KeywordConfig,
}

impl KeywordExtractor {
    pub fn new(vocabulary: Arc<Vocabulary>, config: KeywordConfig) -> Self {
        Self { vocabulary, config }
    }

    /// Extract keywords in strategy priority order
    ///
    /// Candidates are gathered from, in order: domain categories hit by the
    /// requirement (all synonyms of each), quoted terms, capitalized entities,
    /// technical terms, regulation references, rupee amounts, and remaining
    /// significant words. Duplicates (case-insensitive) and short terms are
    /// dropped and the list is cut at `max_keywords`.
    pub fn extract(&self, requirement: &str) -> Vec<Keyword> {
        let requirement_lower = requirement.to_lowercase();
        let mut candidates: Vec<String> = Vec::new();

        for category in self.vocabulary.matching_categories(&requirement_lower) {
            candidates.extend(self.vocabulary.terms(category).iter().cloned());
        }

        candidates.extend(
            QUOTED_PATTERN
                .captures_iter(requirement)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().to_string()),
        );

        candidates.extend(find_all(&CAPITALIZED_PATTERN, requirement));
        candidates.extend(find_all(&TECHNICAL_PATTERN, requirement));
        candidates.extend(find_all(&REGULATION_REF_PATTERN, requirement));
        candidates.extend(
            find_all(&AMOUNT_PATTERN, requirement)
                .into_iter()
                .take(self.config.max_amounts),
        );

        candidates.extend(
            find_all(&SIGNIFICANT_WORD_PATTERN, &requirement_lower)
                .into_iter()
                .filter(|w| !self.vocabulary.is_stop_word(w)),
        );

        self.dedup(candidates)
    }

    fn dedup(&self, candidates: Vec<String>) -> Vec<Keyword> {
        let mut seen = HashSet::new();
        let mut keywords = Vec::new();

        for term in candidates {
            if term.trim().is_empty() || term.chars().count() < self.config.min_keyword_chars {
                continue;
            }
            if seen.insert(term.to_lowercase()) {
                keywords.push(self.vocabulary.keyword(term));
                if keywords.len() == self.config.max_keywords {
                    break;
                }
            }
        }

        keywords
    }
}

fn find_all(pattern: &regex::Regex, text: &str) -> Vec<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
