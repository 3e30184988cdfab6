// Context sentence extraction for evidence citations
use crate::patterns::{protect_abbreviations, split_sentences, DATA_PATTERN, DIGIT_PATTERN};
use std::cmp::Reverse;

/// Sentences of `page_text` that mention any of `keywords`, best first
///
/// A sentence with two or more keyword hits is widened with the previous
/// sentence, and with the next one when it carries figures. Sentences are
/// ranked by keyword hits plus one for currency, percentages or numbers;
/// ties keep document order. `keywords` must already be lowercase.
pub fn extract_context_sentences(
    page_text: &str,
    keywords: &[String],
    min_sentence_chars: usize,
) -> Vec<String> {
    let text = protect_abbreviations(page_text);
    let sentences = split_sentences(&text);
    let long_enough = |s: &str| s.chars().count() >= min_sentence_chars;

    let mut relevant = Vec::new();
    for (i, raw) in sentences.iter().enumerate() {
        let sentence = raw.trim();
        if !long_enough(sentence) {
            continue;
        }

        let hits = keyword_hits(sentence, keywords);
        if hits == 0 {
            continue;
        }

        let mut context = sentence.to_string();
        if hits >= 2 {
            if i > 0 {
                let prev = sentences[i - 1].trim();
                if long_enough(prev) {
                    context = format!("{}. {}", prev, context);
                }
            }
            if let Some(next) = sentences.get(i + 1).map(|s| s.trim()) {
                if long_enough(next) && DIGIT_PATTERN.is_match(next) {
                    context = format!("{}. {}", context, next);
                }
            }
        }
        relevant.push(context);
    }

    relevant.sort_by_key(|s| Reverse(density(s, keywords)));
    relevant
}

fn keyword_hits(sentence: &str, keywords: &[String]) -> usize {
    let lower = sentence.to_lowercase();
    keywords
        .iter()
        .filter(|kw| lower.contains(kw.as_str()))
        .count()
}

fn density(sentence: &str, keywords: &[String]) -> usize {
    let data_bonus = usize::from(DATA_PATTERN.is_match(sentence));
    keyword_hits(sentence, keywords) + data_bonus
}
