//! Plain-text renderings of scan results and decisions for logs

use shared_types::{Decision, Keyword, Phase, ScanResult};
use std::fmt::{self, Write};

const MAX_LISTED: usize = 10;
const MAX_TOP_MATCHES: usize = 5;
const MAX_MATCH_KEYWORDS: usize = 5;

pub fn scan_summary(scan: &ScanResult) -> String {
    let mut output = String::new();
    // Writing into a String cannot fail
    let _ = write_scan(&mut output, scan);
    output.trim_end().to_string()
}

pub fn decision_summary(decision: &Decision) -> String {
    let mut output = String::new();
    let _ = write_decision(&mut output, decision);
    output.trim_end().to_string()
}

fn write_scan(output: &mut String, scan: &ScanResult) -> fmt::Result {
    writeln!(output, "EXHAUSTIVE SCAN RESULTS:")?;
    writeln!(
        output,
        "- Pages scanned: {} of {}{}",
        scan.total_pages_scanned,
        scan.total_pages,
        if scan.complete { "" } else { " (interrupted)" }
    )?;
    writeln!(output, "- Pages with evidence: {}", scan.pages_with_evidence)?;
    writeln!(output, "- Evidence pages: {}", page_list(&scan.evidence_pages))?;
    writeln!(
        output,
        "- Keywords used: {}",
        keyword_list(&scan.keywords_used, MAX_LISTED)
    )?;
    writeln!(output, "- Search time: {:.3}s", scan.search_time.as_secs_f64())?;
    writeln!(output, "- Confidence: {}", scan.confidence.as_str().to_uppercase())?;
    writeln!(output)?;

    if scan.evidence_matches.is_empty() {
        if scan.complete {
            writeln!(output, "NO EVIDENCE FOUND ACROSS ENTIRE DOCUMENT")?;
        } else {
            writeln!(output, "NO EVIDENCE FOUND IN SCANNED PAGES")?;
        }
        return Ok(());
    }

    writeln!(output, "TOP EVIDENCE MATCHES:")?;
    for (i, m) in scan.evidence_matches.iter().take(MAX_TOP_MATCHES).enumerate() {
        writeln!(
            output,
            "{}. Page {} (relevance {:.0}%)",
            i + 1,
            m.page_number,
            m.relevance_score * 100.0
        )?;
        writeln!(
            output,
            "   Keywords: {}",
            keyword_list(&m.keyword_matches, MAX_MATCH_KEYWORDS)
        )?;
        writeln!(output, "   Text: {}", m.text_snippet)?;
    }
    Ok(())
}

fn write_decision(output: &mut String, decision: &Decision) -> fmt::Result {
    writeln!(output, "TWO-PHASE SEARCH SUMMARY:")?;
    writeln!(
        output,
        "- Phase used: {}",
        decision.phase_used.to_string().to_uppercase()
    )?;
    writeln!(output, "- Evidence found: {}", decision.evidence_found)?;
    writeln!(output, "- Evidence pages: {}", page_list(&decision.evidence_pages))?;
    writeln!(output, "- Evidence quality: {}", decision.evidence_quality)?;
    writeln!(output, "- Recommendation: {}", decision.recommendation)?;
    writeln!(output, "- Total time: {:.3}s", decision.total_time.as_secs_f64())?;

    match (decision.phase_used, &decision.scan) {
        (Phase::Exhaustive, Some(scan)) => {
            writeln!(output, "- Pages scanned: {}", scan.total_pages_scanned)?;
            writeln!(output, "- Pages with evidence: {}", scan.pages_with_evidence)?;
        }
        _ => {
            writeln!(output, "- Semantic chunks: {}", decision.quality.num_chunks)?;
            writeln!(
                output,
                "- Semantic confidence: {:.2}",
                decision.quality.confidence
            )?;
        }
    }
    Ok(())
}

fn page_list(pages: &[u32]) -> String {
    let shown: Vec<String> = pages.iter().take(MAX_LISTED).map(u32::to_string).collect();
    if pages.len() > MAX_LISTED {
        format!("[{}, ... +{} more]", shown.join(", "), pages.len() - MAX_LISTED)
    } else {
        format!("[{}]", shown.join(", "))
    }
}

fn keyword_list(keywords: &[Keyword], max: usize) -> String {
    keywords
        .iter()
        .take(max)
        .map(|k| k.term.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Candidate, EvidenceMatch, Level, QualityScore, Recommendation};
    use std::time::Duration;

    fn scan(matches: Vec<EvidenceMatch>, complete: bool) -> ScanResult {
        let evidence_pages: Vec<u32> = matches.iter().map(|m| m.page_number).collect();
        ScanResult {
            total_pages_scanned: if complete { 40 } else { 12 },
            total_pages: 40,
            pages_with_evidence: evidence_pages.len(),
            evidence_pages,
            evidence_matches: matches,
            keywords_used: vec![Keyword::important("revenue"), Keyword::ordinary("segment")],
            search_time: Duration::from_millis(1500),
            confidence: Level::High,
            complete,
        }
    }

    fn evidence(page: u32, relevance: f64) -> EvidenceMatch {
        EvidenceMatch {
            page_number: page,
            text_snippet: "Revenue for the automotive segment was ₹50 crore".to_string(),
            keyword_matches: vec![Keyword::important("revenue")],
            relevance_score: relevance,
            context_sentences: vec!["Revenue for the automotive segment was ₹50 crore".to_string()],
        }
    }

    #[test]
    fn test_scan_summary_lists_top_matches() {
        let text = scan_summary(&scan(vec![evidence(12, 0.85)], true));
        assert!(text.contains("- Pages scanned: 40 of 40\n"));
        assert!(text.contains("- Evidence pages: [12]"));
        assert!(text.contains("- Keywords used: revenue, segment"));
        assert!(text.contains("- Search time: 1.500s"));
        assert!(text.contains("- Confidence: HIGH"));
        assert!(text.contains("1. Page 12 (relevance 85%)"));
    }

    #[test]
    fn test_scan_summary_without_evidence() {
        let complete = scan_summary(&scan(vec![], true));
        assert!(complete.ends_with("NO EVIDENCE FOUND ACROSS ENTIRE DOCUMENT"));

        let partial = scan_summary(&scan(vec![], false));
        assert!(partial.contains("12 of 40 (interrupted)"));
        assert!(partial.ends_with("NO EVIDENCE FOUND IN SCANNED PAGES"));
    }

    #[test]
    fn test_page_list_truncates() {
        let pages: Vec<u32> = (1..=13).collect();
        assert_eq!(page_list(&pages), "[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, ... +3 more]");
        assert_eq!(page_list(&[]), "[]");
    }

    #[test]
    fn test_decision_summary_semantic() {
        let decision = Decision {
            phase_used: Phase::Semantic,
            evidence_found: true,
            evidence_pages: vec![4, 9],
            evidence_quality: Level::High,
            recommendation: Recommendation::Present,
            quality: QualityScore {
                quality: Level::High,
                confidence: 0.94,
                num_chunks: 6,
                unique_pages: 2,
            },
            candidates: vec![Candidate::new(Some(4), Some(0.8))],
            scan: None,
            total_time: Duration::from_millis(20),
        };
        let text = decision_summary(&decision);
        assert!(text.starts_with("TWO-PHASE SEARCH SUMMARY:"));
        assert!(text.contains("- Phase used: SEMANTIC"));
        assert!(text.contains("- Recommendation: PRESENT"));
        assert!(text.contains("- Semantic chunks: 6"));
    }

    #[test]
    fn test_decision_summary_exhaustive() {
        let decision = Decision {
            phase_used: Phase::Exhaustive,
            evidence_found: false,
            evidence_pages: vec![],
            evidence_quality: Level::High,
            recommendation: Recommendation::Missing,
            quality: QualityScore {
                quality: Level::Low,
                confidence: 0.0,
                num_chunks: 0,
                unique_pages: 0,
            },
            candidates: vec![],
            scan: Some(scan(vec![], true)),
            total_time: Duration::from_millis(20),
        };
        let text = decision_summary(&decision);
        assert!(text.contains("- Phase used: EXHAUSTIVE"));
        assert!(text.contains("- Recommendation: MISSING"));
        assert!(text.contains("- Pages scanned: 40"));
    }
}
