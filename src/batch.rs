//! Corpus-level batch stages: clean raw report text into sentence records,
//! refine them (glossary drop + balanced split + reclassification), explode
//! them into atomic claims, and validate the atomic output.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::PipelineOptions;
use crate::error::{PipelineError, Result};
use crate::pipeline::classify::classify;
use crate::pipeline::filters::{has_metric, is_environment_relevant, is_glossary_sentence};
use crate::pipeline::normalize::{is_junk_line, normalize_text, remove_inline_junk};
use crate::pipeline::reconstruct::reconstruct_sentences;
use crate::pipeline::split::{balanced_split, explode_sentence};
use crate::pipeline::{within_length_bounds, MIN_SENTENCE_CHARS};
use crate::types::{Category, ClaimRecord};

static YEAR_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:19|20)\d{2}$").unwrap());

/// Summary of one batch stage run over a corpus directory.
#[derive(Debug, Serialize)]
pub struct StageSummary {
    pub files_processed: usize,
    pub records_written: usize,
    pub output_dir: String,
}

/// Statistics over an atomic output directory.
#[derive(Debug, Serialize)]
pub struct AtomicityReport {
    pub total_records: usize,
    pub mean_sentence_chars: usize,
    /// Metric-categorized records whose text still mentions governance
    /// language; a nonzero count means the splitter let mixed claims through.
    pub mixed_role_violations: usize,
}

/// Recovers the company identifier and reporting year from a
/// `<COMPANY_TOKENS>_<YYYY>.txt` filename. The single 4-digit token in
/// 1900-2099 becomes the year; remaining non-numeric tokens are upper-cased
/// and joined with underscores, or `UNKNOWN` when none remain.
pub fn extract_company_year(path: &Path) -> (String, Option<i32>) {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");

    let mut year = None;
    let mut company_tokens = Vec::new();
    for token in stem.split('_') {
        if YEAR_TOKEN.is_match(token) {
            year = token.parse().ok();
        } else if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
            company_tokens.push(token);
        }
    }

    let company = if company_tokens.is_empty() {
        "UNKNOWN".to_string()
    } else {
        company_tokens.join("_").to_uppercase()
    };
    (company, year)
}

/// Cleans one raw report file into claim records: junk-line filtering, inline
/// junk removal, normalization, sentence reconstruction, length bounds,
/// per-file case-insensitive dedup, the env/metric drop rule, classification.
pub fn process_report_file(path: &Path, options: &PipelineOptions) -> Result<Vec<ClaimRecord>> {
    let (company, year) = extract_company_year(path);

    // Best-effort decode: invalid bytes are replaced, never fatal.
    let bytes = fs::read(path)?;
    let raw_text = String::from_utf8_lossy(&bytes);

    let mut cleaned_lines = Vec::new();
    for line in raw_text.lines() {
        if is_junk_line(line) {
            continue;
        }
        let line = normalize_text(&remove_inline_junk(line));
        if !line.is_empty() {
            cleaned_lines.push(line);
        }
    }

    let sentences = reconstruct_sentences(&cleaned_lines);

    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for sentence in sentences {
        let sentence = normalize_text(&sentence);
        if !within_length_bounds(&sentence) {
            continue;
        }
        if !seen.insert(sentence.to_lowercase()) {
            continue;
        }

        let env_relevant = is_environment_relevant(&sentence);
        let metric = has_metric(&sentence, options);
        if !env_relevant && !metric {
            continue;
        }

        let category = classify(&sentence, metric);
        records.push(ClaimRecord {
            company: company.clone(),
            year,
            sentence,
            category,
            has_metric: metric,
            env_relevant,
        });
    }

    debug!("{}: {} records after cleaning", path.display(), records.len());
    Ok(records)
}

/// Refines cleaned records: drops glossary sentences, splits compound
/// metric-bearing sentences on connectors, re-derives the metric flag and
/// category per fragment. Relevance is carried over from the parent record.
pub fn refine_records(records: &[ClaimRecord], options: &PipelineOptions) -> Vec<ClaimRecord> {
    let mut refined = Vec::new();

    for row in records {
        if options.glossary_filter_enabled && is_glossary_sentence(&row.sentence) {
            continue;
        }

        for part in balanced_split(&row.sentence, options) {
            let part = normalize_text(&part);
            if part.chars().count() < MIN_SENTENCE_CHARS {
                continue;
            }
            let metric = has_metric(&part, options);
            let category = classify(&part, metric);
            refined.push(ClaimRecord {
                company: row.company.clone(),
                year: row.year,
                sentence: part,
                category,
                has_metric: metric,
                env_relevant: row.env_relevant,
            });
        }
    }

    refined
}

/// Explodes each record into role-pure atomic claims. A successful explosion
/// replaces the original record; an empty one means the sentence was already
/// atomic and the record passes through unchanged.
pub fn explode_records(records: &[ClaimRecord]) -> Vec<ClaimRecord> {
    let mut atomic = Vec::new();

    for row in records {
        let sentence = normalize_text(&row.sentence);
        let exploded = explode_sentence(&sentence);

        if exploded.is_empty() {
            atomic.push(row.clone());
            continue;
        }

        for (role, clause) in exploded {
            atomic.push(ClaimRecord {
                company: row.company.clone(),
                year: row.year,
                sentence: clause,
                category: role,
                has_metric: role == Category::Metric,
                // Relevance is not re-derived per clause.
                env_relevant: true,
            });
        }
    }

    atomic
}

/// Runs the cleaning stage over every `.txt` file in `raw_dir`.
pub fn run_clean(raw_dir: &str, out_dir: &str) -> Result<StageSummary> {
    let options = PipelineOptions::batch();
    fs::create_dir_all(out_dir)?;

    let mut summary = StageSummary {
        files_processed: 0,
        records_written: 0,
        output_dir: out_dir.to_string(),
    };

    for path in list_files(raw_dir, "txt")? {
        let records = process_report_file(&path, &options)?;
        let out_path = output_path(out_dir, &path);
        write_jsonl(&out_path, &records)?;

        info!("cleaned {} into {} sentences", path.display(), records.len());
        println!("✅ {}: {} clean sentences", file_name(&path), records.len());

        summary.files_processed += 1;
        summary.records_written += records.len();
    }

    Ok(summary)
}

/// Runs the refine stage over every `.jsonl` file in `in_dir`. The metric
/// unit set drops `years` here; the glossary filter is on.
pub fn run_refine(in_dir: &str, out_dir: &str) -> Result<StageSummary> {
    let options = PipelineOptions {
        include_years_as_metric_unit: false,
        glossary_filter_enabled: true,
    };
    fs::create_dir_all(out_dir)?;

    let mut summary = StageSummary {
        files_processed: 0,
        records_written: 0,
        output_dir: out_dir.to_string(),
    };

    for path in list_files(in_dir, "jsonl")? {
        let records = read_jsonl(&path)?;
        let refined = refine_records(&records, &options);
        write_jsonl(&Path::new(out_dir).join(file_name(&path)), &refined)?;

        info!("refined {} into {} sentences", path.display(), refined.len());
        println!("✅ {}: {} balanced-clean sentences", file_name(&path), refined.len());

        summary.files_processed += 1;
        summary.records_written += refined.len();
    }

    Ok(summary)
}

/// Runs the atomic explosion stage over every `.jsonl` file in `in_dir`.
pub fn run_atomic(in_dir: &str, out_dir: &str) -> Result<StageSummary> {
    fs::create_dir_all(out_dir)?;

    let mut summary = StageSummary {
        files_processed: 0,
        records_written: 0,
        output_dir: out_dir.to_string(),
    };

    for path in list_files(in_dir, "jsonl")? {
        let records = read_jsonl(&path)?;
        let atomic = explode_records(&records);
        write_jsonl(&Path::new(out_dir).join(file_name(&path)), &atomic)?;

        info!("exploded {} into {} atomic claims", path.display(), atomic.len());
        println!("🔥 {}: {} atomic claims created", file_name(&path), atomic.len());

        summary.files_processed += 1;
        summary.records_written += atomic.len();
    }

    Ok(summary)
}

/// Scans an atomic output directory and reports record count, mean sentence
/// length and mixed-role violations.
pub fn validate_atomicity(dir: &str) -> Result<AtomicityReport> {
    const GOVERNANCE_MARKERS: &[&str] = &["board", "committee", "oversight", "governance"];

    let mut total = 0usize;
    let mut length_sum = 0usize;
    let mut violations = 0usize;

    for path in list_files(dir, "jsonl")? {
        for record in read_jsonl(&path)? {
            total += 1;
            length_sum += record.sentence.chars().count();

            if record.category == Category::Metric {
                let lower = record.sentence.to_lowercase();
                if GOVERNANCE_MARKERS.iter().any(|m| lower.contains(m)) {
                    violations += 1;
                }
            }
        }
    }

    Ok(AtomicityReport {
        total_records: total,
        mean_sentence_chars: if total == 0 { 0 } else { length_sum / total },
        mixed_role_violations: violations,
    })
}

fn list_files(dir: &str, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

fn output_path(out_dir: &str, input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    Path::new(out_dir).join(format!("{stem}.jsonl"))
}

fn write_jsonl(path: &Path, records: &[ClaimRecord]) -> Result<()> {
    let mut file = File::create(path)?;
    for record in records {
        let line = serde_json::to_string(record)?;
        writeln!(file, "{line}")?;
    }
    Ok(())
}

/// Reads a JSONL record file. A malformed line is fatal for the whole file:
/// the error carries the file and line, and no partial result is returned.
fn read_jsonl(path: &Path) -> Result<Vec<ClaimRecord>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record =
            serde_json::from_str(&line).map_err(|e| PipelineError::MalformedRecord {
                file: path.display().to_string(),
                line: idx + 1,
                message: e.to_string(),
            })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sentence: &str, category: Category, metric: bool) -> ClaimRecord {
        ClaimRecord {
            company: "ACME".to_string(),
            year: Some(2023),
            sentence: sentence.to_string(),
            category,
            has_metric: metric,
            env_relevant: true,
        }
    }

    #[test]
    fn test_extract_company_year() {
        let (company, year) = extract_company_year(Path::new("shell_energy_2023.txt"));
        assert_eq!(company, "SHELL_ENERGY");
        assert_eq!(year, Some(2023));
    }

    #[test]
    fn test_extract_company_year_drops_stray_numbers() {
        let (company, year) = extract_company_year(Path::new("acme_42_2020.txt"));
        assert_eq!(company, "ACME");
        assert_eq!(year, Some(2020));
    }

    #[test]
    fn test_extract_company_year_unknown_company() {
        let (company, year) = extract_company_year(Path::new("2021.txt"));
        assert_eq!(company, "UNKNOWN");
        assert_eq!(year, Some(2021));
    }

    #[test]
    fn test_extract_company_year_rejects_implausible_years() {
        // 1850 is outside 1900-2099, so it is a stray number, not a year.
        let (company, year) = extract_company_year(Path::new("acme_1850.txt"));
        assert_eq!(company, "ACME");
        assert_eq!(year, None);
    }

    #[test]
    fn test_refine_drops_glossary_rows() {
        let options = PipelineOptions {
            include_years_as_metric_unit: false,
            glossary_filter_enabled: true,
        };
        let rows = vec![record(
            "One metric ton equals 1,000 kilograms of mass in this report.",
            Category::Metric,
            true,
        )];
        assert!(refine_records(&rows, &options).is_empty());
    }

    #[test]
    fn test_refine_reclassifies_split_fragments() {
        let options = PipelineOptions {
            include_years_as_metric_unit: false,
            glossary_filter_enabled: true,
        };
        let rows = vec![record(
            "We cut emissions by 20% against the 2019 baseline and the board reviewed water targets quarterly.",
            Category::Metric,
            true,
        )];
        let refined = refine_records(&rows, &options);
        assert_eq!(refined.len(), 2);
        assert_eq!(refined[0].category, Category::Metric);
        assert!(refined[0].has_metric);
        assert_eq!(refined[1].category, Category::Governance);
        assert!(!refined[1].has_metric);
    }

    #[test]
    fn test_explode_records_duplicates_multi_role_clause() {
        let rows = vec![record(
            "The committee aims to cut emissions by half.",
            Category::Governance,
            false,
        )];
        let atomic = explode_records(&rows);
        assert_eq!(atomic.len(), 2);
        assert_eq!(atomic[0].category, Category::Governance);
        assert_eq!(atomic[1].category, Category::Vision);
        assert_eq!(atomic[0].sentence, atomic[1].sentence);
        assert!(atomic.iter().all(|r| r.env_relevant));
        assert!(atomic.iter().all(|r| !r.has_metric));
    }

    #[test]
    fn test_explode_records_preserves_unsplittable_rows() {
        let original = record("We reduced CO2 by 5%.", Category::Action, true);
        let atomic = explode_records(&[original.clone()]);
        assert_eq!(atomic, vec![original]);
    }

    #[test]
    fn test_explode_records_sets_metric_flag_from_role() {
        let rows = vec![record(
            "Emissions fell by 3,500 tonnes, as part of our climate plan.",
            Category::Metric,
            true,
        )];
        let atomic = explode_records(&rows);
        assert_eq!(atomic.len(), 1);
        assert_eq!(atomic[0].category, Category::Metric);
        assert!(atomic[0].has_metric);
        assert_eq!(atomic[0].sentence, "Emissions fell by 3,500 tonnes");
    }
}
