//! Boolean predicates gating which sentences enter classification.

use crate::config::PipelineOptions;
use crate::pipeline::patterns;

/// Case-insensitive match-any over the fixed environmental keyword set.
pub fn is_environment_relevant(sentence: &str) -> bool {
    let s = sentence.to_lowercase();
    patterns::ENV_KEYWORDS.iter().any(|k| s.contains(k))
}

/// Whether the sentence contains a numeric expression bound to a recognized
/// unit. Range expressions such as `30-40%` count as a single metric. The
/// `years` unit is accepted only in the batch-cleaning variant.
pub fn has_metric(sentence: &str, options: &PipelineOptions) -> bool {
    if options.include_years_as_metric_unit {
        patterns::METRIC_WITH_YEARS.is_match(sentence)
    } else {
        patterns::METRIC.is_match(sentence)
    }
}

/// Definitional/legend text that resembles a metric-bearing claim but asserts
/// nothing about the company. Matching sentences are discarded upstream of
/// classification regardless of metric content.
pub fn is_glossary_sentence(sentence: &str) -> bool {
    patterns::GLOSSARY.is_match(sentence)
}
