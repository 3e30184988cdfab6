//! JSON input files

use anyhow::{Context, Result};
use shared_types::{Candidate, PageMap};
use std::fs;
use std::path::Path;

/// Read a page map: a JSON object of page number to page text
pub fn load_pages(path: &Path) -> Result<PageMap> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pages file {}", path.display()))?;
    parse_pages(&content).with_context(|| format!("Invalid pages file {}", path.display()))
}

/// Read a ranked candidate list: a JSON array of `{page, score, text}` objects
pub fn load_candidates(path: &Path) -> Result<Vec<Candidate>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read candidates file {}", path.display()))?;
    parse_candidates(&content)
        .with_context(|| format!("Invalid candidates file {}", path.display()))
}

pub fn parse_pages(json: &str) -> Result<PageMap> {
    let pages: PageMap =
        serde_json::from_str(json).context("Expected an object of page number to text")?;
    if pages.contains_key(&0) {
        anyhow::bail!("Page numbers start at 1");
    }
    Ok(pages)
}

pub fn parse_candidates(json: &str) -> Result<Vec<Candidate>> {
    serde_json::from_str(json).context("Expected an array of candidate chunks")
}
