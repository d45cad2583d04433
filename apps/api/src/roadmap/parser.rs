//! Extracts phase headers from a free-text roadmap.
//!
//! A header is a line like `1. Foundation Phase: learn the basics` or
//! `Phase 2 - Practice: build things`, optionally wrapped in markdown heading or
//! emphasis marks. Lines between headers are ignored.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::roadmap::PHASE_COUNT;

/// Descriptions shorter than this are replaced by [`GENERIC_AI_DESCRIPTION`].
const MIN_DESCRIPTION_CHARS: usize = 20;
pub const GENERIC_AI_DESCRIPTION: &str =
    "Build foundational skills and knowledge for this career path.";

static NUMBERED_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\d+\.\s*.*phase.*:").expect("numbered header regex"));
static PHASE_FIRST_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^phase\s*\d+.*:").expect("phase header regex"));
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("leading number regex"));

/// One header as found in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPhase {
    pub title: String,
    pub description: String,
}

fn strip_markdown(line: &str) -> String {
    line.trim()
        .trim_start_matches('#')
        .replace(['*', '_'], "")
        .trim()
        .to_string()
}

fn is_header(line: &str) -> bool {
    NUMBERED_HEADER.is_match(line) || PHASE_FIRST_HEADER.is_match(line)
}

fn parse_header(line: &str) -> ParsedPhase {
    let (head, tail) = line.split_once(':').unwrap_or((line, ""));
    let title = LEADING_NUMBER.replace(head, "").trim().to_string();

    let description = tail.trim();
    let description = if description.chars().count() < MIN_DESCRIPTION_CHARS {
        GENERIC_AI_DESCRIPTION.to_string()
    } else {
        description.to_string()
    };

    ParsedPhase { title, description }
}

/// Returns at most four phases in the order they appear.
pub fn parse_phases(text: &str) -> Vec<ParsedPhase> {
    text.lines()
        .map(strip_markdown)
        .filter(|line| is_header(line))
        .take(usize::from(PHASE_COUNT))
        .map(|line| parse_header(&line))
        .collect()
}
