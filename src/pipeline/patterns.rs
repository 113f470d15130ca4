//! Process-wide pattern tables: compiled once, never mutated, shared by the
//! filters, the classifier and the atomic splitter.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Category;

/// Keyword set for environmental relevance (case-insensitive substring,
/// match-any semantics).
pub const ENV_KEYWORDS: &[&str] = &[
    "carbon",
    "emission",
    "climate",
    "energy",
    "renewable",
    "net zero",
    "water",
    "waste",
    "biodiversity",
    "decarbon",
    "co2",
    "scope 1",
    "scope 2",
    "scope 3",
    "ghg",
];

/// Numeric expression bound to a recognized unit. Tolerates an optional
/// decimal fraction and a loosely-formatted range connector, so `30-40%` and
/// `10 to 15 tonnes` are each a single match rather than two. The trailing
/// word boundary applies to letter units only: `%` is not a word character,
/// so a boundary after it would reject `20%` followed by a space.
pub static METRIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d+(?:\.\d+)?(?:\s*(?:-|–|to)\s*\d+(?:\.\d+)?)?\s*(?:%|(?:percent|tco2e|co2e|co2|tonnes?|tons?|gj|mwh|mw)\b)",
    )
    .unwrap()
});

/// Batch-cleaning variant of the metric pattern that also accepts `year(s)`
/// as a unit.
pub static METRIC_WITH_YEARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d+(?:\.\d+)?(?:\s*(?:-|–|to)\s*\d+(?:\.\d+)?)?\s*(?:%|(?:percent|tco2e|co2e|co2|tonnes?|tons?|gj|mwh|mw|years?)\b)",
    )
    .unwrap()
});

/// Glossary/legend boilerplate that superficially resembles a metric claim
/// but carries no company-specific assertion.
pub static GLOSSARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)carbon dioxide equivalent|\bco2e\b|\bmmboe\b|million barrels of oil equivalent|\bnox\b|\bsox\b|\bvoc\b|\bmetric tons?\b|\babbreviations?\b|\bdefinitions?\b",
    )
    .unwrap()
});

// Keyword families are anchored at a leading word boundary only, so inflected
// forms still match: `\baim` covers "aims" and "aimed", `\breduce` covers
// "reduced", `\bachieve` covers "achievement".
static VISION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:aim|commit|aspire|goal|target|pledge|vision|ambition)").unwrap()
});

static ACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:reduce|achieve|implement|install|deploy|improve|invest|transition)")
        .unwrap()
});

static GOVERNANCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:board|committee|oversight|governance|leadership|reviewed|approved|audit)")
        .unwrap()
});

static MARKETING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:leader|premier)|\bbest[- ]in[- ]class|\bworld[- ]class").unwrap()
});

/// The five role families in classifier priority order.
pub const ROLE_ORDER: [Category; 5] = [
    Category::Governance,
    Category::Metric,
    Category::Vision,
    Category::Action,
    Category::Marketing,
];

/// Whether `text` matches the pattern family for a single role. The metric
/// role uses the inference-variant metric pattern (no `years` unit).
pub fn role_matches(role: Category, text: &str) -> bool {
    match role {
        Category::Metric => METRIC.is_match(text),
        Category::Vision => VISION.is_match(text),
        Category::Action => ACTION.is_match(text),
        Category::Governance => GOVERNANCE.is_match(text),
        Category::Marketing => MARKETING.is_match(text),
        Category::Other => false,
    }
}

/// Every role family `text` matches, in [`ROLE_ORDER`] order. The classifier
/// reduces this set by fixed priority; the atomic splitter consumes it whole.
pub fn matched_roles(text: &str) -> Vec<Category> {
    ROLE_ORDER
        .iter()
        .copied()
        .filter(|role| role_matches(*role, text))
        .collect()
}
