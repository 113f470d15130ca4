//! Clause-level decomposition: the atomic splitter used by the exploding
//! stages and the connector-based balanced splitter used by refinement.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::PipelineOptions;
use crate::pipeline::filters::has_metric;
use crate::pipeline::normalize::normalize_text;
use crate::pipeline::patterns::matched_roles;
use crate::types::Category;

/// Minimum clause length (characters) to carry an independent claim.
const MIN_CLAUSE_CHARS: usize = 30;

/// Minimum fragment length (characters) kept by the balanced split.
const MIN_BALANCED_PART_CHARS: usize = 26;

static SPLIT_CONNECTORS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"\band\b", r"\bwhile\b", r"\bas part of\b", r"\bas well as\b"]
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
        .collect()
});

/// Splits on `;`, and on `,`/`.` only when not immediately followed by a
/// digit, so decimal and thousand-grouped figures (`3,500 tonnes`) survive
/// intact.
fn split_clauses(sentence: &str) -> Vec<&str> {
    let mut clauses = Vec::new();
    let mut start = 0;
    for (idx, ch) in sentence.char_indices() {
        let boundary = match ch {
            ';' => true,
            ',' | '.' => {
                let rest = &sentence[idx + ch.len_utf8()..];
                !rest.chars().next().map_or(false, |next| next.is_ascii_digit())
            }
            _ => false,
        };
        if boundary {
            clauses.push(&sentence[start..idx]);
            start = idx + ch.len_utf8();
        }
    }
    clauses.push(&sentence[start..]);
    clauses
}

/// Decomposes a sentence into role-pure atomic claims.
///
/// A clause matching exactly one role family is emitted once; a clause
/// matching several is emitted once per matching role, with identical text
/// each time. Clauses under 30 characters or matching no role are dropped.
/// An empty result means the sentence could not be decomposed and the caller
/// keeps the original record as-is.
pub fn explode_sentence(sentence: &str) -> Vec<(Category, String)> {
    let mut extracted = Vec::new();

    for clause in split_clauses(sentence) {
        let clause = normalize_text(clause);
        if clause.chars().count() < MIN_CLAUSE_CHARS {
            continue;
        }
        for role in matched_roles(&clause) {
            extracted.push((role, clause.clone()));
        }
    }

    extracted
}

/// Connector-based split used by the refine stage. Only metric-bearing
/// sentences are split (a lone metric clause is left alone); fragments at or
/// under 25 characters are discarded along the way.
pub fn balanced_split(sentence: &str, options: &PipelineOptions) -> Vec<String> {
    if !has_metric(sentence, options) {
        return vec![sentence.to_string()];
    }

    let mut parts = vec![sentence.to_string()];
    for connector in SPLIT_CONNECTORS.iter() {
        let mut next = Vec::new();
        for part in &parts {
            let pieces: Vec<&str> = connector.split(part).collect();
            if pieces.len() > 1 {
                for piece in pieces {
                    let piece = piece.trim();
                    if piece.chars().count() >= MIN_BALANCED_PART_CHARS {
                        next.push(piece.to_string());
                    }
                }
            } else {
                next.push(part.clone());
            }
        }
        parts = next;
    }

    parts
}
