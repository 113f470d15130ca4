//! Sentence reconstruction from line-wrapped extraction output.

use crate::pipeline::normalize::normalize_text;

/// Reassembles logical sentences from a sequence of cleaned lines.
///
/// Greedy single-pass join with no lookahead: once the accumulation buffer
/// ends with terminal punctuation it is flushed and the current line seeds a
/// new buffer; otherwise the line is appended with a single space. A line
/// ending in `.` for a non-sentence reason (abbreviation, decimal) causes a
/// premature split; that imprecision is accepted, not worked around.
pub fn reconstruct_sentences(lines: &[String]) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut buffer = String::new();

    for line in lines {
        let line = normalize_text(line);
        if line.is_empty() {
            continue;
        }
        if buffer.is_empty() {
            buffer = line;
            continue;
        }
        if ends_sentence(&buffer) {
            sentences.push(std::mem::replace(&mut buffer, line));
        } else {
            buffer.push(' ');
            buffer.push_str(&line);
        }
    }

    if !buffer.is_empty() {
        sentences.push(buffer);
    }

    sentences
}

fn ends_sentence(buffer: &str) -> bool {
    buffer.ends_with(['.', '!', '?'])
}
