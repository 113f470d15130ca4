//! Layout-noise stripping and whitespace normalization for raw report text.

use once_cell::sync::Lazy;
use regex::Regex;

static PAGE_MARKER_DASHED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)---\s*PAGE\s*\d+\s*---").unwrap());
static PAGE_MARKER_BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bPAGE\s*\d+\b").unwrap());
// A stray page number left in front of a marker word, e.g. "12 PAGE".
static NUMBER_BEFORE_PAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\s*PAGE").unwrap());
static DASH_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SECTION_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z\s&/]{6,}$").unwrap());

const SECTION_WORDS: &[&str] = &["CONTENT", "CONTENTS", "INTRODUCTION", "GOVERNANCE", "PERFORMANCE"];

/// Fixes the CO₂ glyph and collapses all whitespace runs (including newlines)
/// to a single space. Idempotent.
pub fn normalize_text(text: &str) -> String {
    let text = text.replace("CO₂", "CO2");
    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

/// Removes page-marker tokens (`--- PAGE 3 ---` and bare `PAGE 3`), a bare
/// number immediately preceding a marker, and runs of two or more dashes.
/// Idempotent.
pub fn remove_inline_junk(text: &str) -> String {
    let text = PAGE_MARKER_DASHED.replace_all(text, " ");
    let text = PAGE_MARKER_BARE.replace_all(&text, " ");
    let text = NUMBER_BEFORE_PAGE.replace_all(&text, " PAGE");
    let text = DASH_RUN.replace_all(&text, " ");
    text.trim().to_string()
}

/// Structural noise that would corrupt sentence boundaries if it reached the
/// reconstructor: blank lines, all-uppercase section headers, and a small
/// fixed header vocabulary.
pub fn is_junk_line(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return true;
    }
    if SECTION_HEADER.is_match(line) {
        return true;
    }
    SECTION_WORDS.contains(&line)
}
