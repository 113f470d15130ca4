//! Single-document inference path: raw extracted text in, ordered atomic
//! claim strings out. The caller (the risk scorer) attaches its own company
//! and probability fields; no record metadata is produced here.

use crate::config::PipelineOptions;
use crate::pipeline::filters::{has_metric, is_environment_relevant};
use crate::pipeline::normalize::{normalize_text, remove_inline_junk};
use crate::pipeline::reconstruct::reconstruct_sentences;
use crate::pipeline::split::explode_sentence;
use crate::pipeline::within_length_bounds;

/// Turns a raw, newline-delimited document into atomic claim strings.
///
/// Applies the same cleaning, reconstruction and drop rules as the batch
/// pipeline, minus the batch-only options (`years` metric unit, glossary
/// filter). Sentences the splitter cannot decompose pass through unchanged;
/// a clause matching several roles appears once.
pub fn extract_atomic_claims(raw_text: &str) -> Vec<String> {
    let options = PipelineOptions::inference();

    let mut cleaned_lines = Vec::new();
    for line in raw_text.split('\n') {
        let line = normalize_text(&remove_inline_junk(line));
        if !line.is_empty() {
            cleaned_lines.push(line);
        }
    }

    let sentences = reconstruct_sentences(&cleaned_lines);

    let mut claims = Vec::new();
    for sentence in sentences {
        if !within_length_bounds(&sentence) {
            continue;
        }
        if !is_environment_relevant(&sentence) && !has_metric(&sentence, &options) {
            continue;
        }

        let exploded = explode_sentence(&sentence);
        if exploded.is_empty() {
            claims.push(sentence);
            continue;
        }
        for (_, clause) in exploded {
            // Multi-role clauses arrive as adjacent duplicates; keep one.
            if claims.last() != Some(&clause) {
                claims.push(clause);
            }
        }
    }

    claims
}
