//! Regex patterns and fixed term lists used for keyword extraction and page scoring

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Text inside double quotes
    pub static ref QUOTED_PATTERN: Regex = Regex::new(r#""([^"]+)""#).unwrap();

    /// Runs of capitalized words (entity names such as "Reserve Bank")
    pub static ref CAPITALIZED_PATTERN: Regex =
        Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").unwrap();

    /// Financial ratios, agencies and compliance nouns
    pub static ref TECHNICAL_PATTERN: Regex = Regex::new(
        r"(?i)\b(?:EBITDA|EBIT|P&L|ROE|ROCE|ROIC|ROA|EPS|NAV|IPO|DRHP|SEBI|ICDR|Companies Act|RoC|MCA|revenue|profit|margin|debt|equity|disclosure|subsidiary|associate|promoter|director|KMP|litigation|risk factor|material|certification|ISO|patent|trademark)\b"
    )
    .unwrap();

    /// "Regulation 403", "Section 203", "Schedule III", "Clause 9A"
    pub static ref REGULATION_REF_PATTERN: Regex = Regex::new(
        r"(?i)\b(?:Regulation|Section|Rule|Schedule|Chapter|Clause)\s+[IVX0-9]+[A-Za-z]?\b"
    )
    .unwrap();

    /// Rupee amounts with an optional lakh/crore/million suffix
    pub static ref AMOUNT_PATTERN: Regex =
        Regex::new(r"(?i)₹\s*[\d,]+(?:\.\d+)?(?:\s*(?:crore|lakh|million))?").unwrap();

    /// Alphabetic words of four or more letters
    pub static ref SIGNIFICANT_WORD_PATTERN: Regex = Regex::new(r"\b[a-zA-Z]{4,}\b").unwrap();

    /// Three consecutive words, used for exact phrase bonuses
    pub static ref PHRASE_PATTERN: Regex = Regex::new(r"\b\w+\s+\w+\s+\w+\b").unwrap();

    /// Sentence terminators
    pub static ref SENTENCE_BREAK_PATTERN: Regex = Regex::new(r"[.!?]+").unwrap();

    /// Currency, percentages or figures
    pub static ref DATA_PATTERN: Regex = Regex::new(r"₹|%|\d+(?:,\d+)*(?:\.\d+)?").unwrap();

    pub static ref DIGIT_PATTERN: Regex = Regex::new(r"\d").unwrap();
}

/// Terms that mark a keyword as important when contained in it
pub const IMPORTANT_TERMS: &[&str] = &[
    "regulation",
    "section",
    "schedule",
    "mandatory",
    "material",
    "disclosure",
    "ebitda",
    "revenue",
    "profit",
    "subsidiary",
    "director",
    "promoter",
    "litigation",
    "risk factor",
];

/// Words never used as generic keywords
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "this", "that", "from", "have", "has", "been", "were", "are",
    "was", "will", "shall", "should", "must", "may", "can", "any", "all",
];

/// Abbreviations whose trailing period is not a sentence break
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("Dr.", "Dr"),
    ("Mr.", "Mr"),
    ("Mrs.", "Mrs"),
    ("Ltd.", "Ltd"),
    ("Inc.", "Inc"),
    ("Pvt.", "Pvt"),
    ("Co.", "Co"),
    ("Nos.", "Nos"),
    ("viz.", "viz"),
];

/// Remove the trailing period of known abbreviations so they do not split sentences
pub fn protect_abbreviations(text: &str) -> String {
    ABBREVIATIONS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Split text on sentence terminators, keeping every piece (including empty ones)
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK_PATTERN.split(text).collect()
}

/// The first `limit` three-word phrases of a lowercased requirement
pub fn requirement_phrases(requirement_lower: &str, limit: usize) -> Vec<&str> {
    PHRASE_PATTERN
        .find_iter(requirement_lower)
        .take(limit)
        .map(|m| m.as_str())
        .collect()
}

/// Number of characters before a byte offset
pub fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

/// Truncate to at most `max_chars` characters, appending "..." when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protect_abbreviations() {
        let text = "Mr. Rao of XYZ Pvt. Ltd. said so. Next sentence.";
        let protected = protect_abbreviations(text);
        assert_eq!(protected, "Mr Rao of XYZ Pvt Ltd said so. Next sentence.");
    }

    #[test]
    fn test_split_sentences_keeps_empty_tail() {
        let parts = split_sentences("One. Two!! Three?");
        assert_eq!(parts, vec!["One", " Two", " Three", ""]);
    }

    #[test]
    fn test_requirement_phrases() {
        // "&" is not a word character, so "r&d" breaks the first window
        let phrases = requirement_phrases("disclose details of r&d facilities and expenditure", 3);
        assert_eq!(phrases, vec!["disclose details of", "d facilities and"]);

        let phrases = requirement_phrases("one two three four five six seven eight nine ten", 3);
        assert_eq!(phrases, vec!["one two three", "four five six", "seven eight nine"]);
    }

    #[test]
    fn test_regulation_reference_pattern() {
        let text = "As per Regulation 403 and Schedule III of the rules";
        let found: Vec<&str> = REGULATION_REF_PATTERN
            .find_iter(text)
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["Regulation 403", "Schedule III"]);
    }

    #[test]
    fn test_amount_pattern() {
        let text = "Capex of ₹5.2 crore and ₹ 1,200 lakh were spent";
        let found: Vec<&str> = AMOUNT_PATTERN.find_iter(text).map(|m| m.as_str()).collect();
        assert_eq!(found, vec!["₹5.2 crore", "₹ 1,200 lakh"]);
    }

    #[test]
    fn test_truncate_chars_is_char_safe() {
        assert_eq!(truncate_chars("₹₹₹₹", 2), "₹₹...");
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn test_char_offset_counts_multibyte() {
        let text = "₹5 crore revenue";
        let byte = text.find("revenue").unwrap();
        assert_eq!(char_offset(text, byte), 9);
    }
}
