use anyhow::Result;
use std::fs;
use tempfile::tempdir;

use esg_claims::batch;
use esg_claims::types::{Category, ClaimRecord};

fn read_records(path: &std::path::Path) -> Vec<ClaimRecord> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn test_clean_refine_atomic_over_a_noisy_report() -> Result<()> {
    let temp = tempdir()?;
    let raw_dir = temp.path().join("raw_txt");
    let cleaned_dir = temp.path().join("cleaned_jsonl");
    let refined_dir = temp.path().join("refined_jsonl");
    let atomic_dir = temp.path().join("atomic_jsonl");
    fs::create_dir_all(&raw_dir)?;

    let report = "\
CONTENTS
--- PAGE 1 ---
ENVIRONMENTAL PERFORMANCE
The board approved a 20% reduction
in emissions for the coming year.
We are committed to reducing our carbon
footprint across all operations.
we are committed to reducing our carbon footprint across all operations.
One metric ton of CO2 equals the annual output of 120 cars.
The committee aims to cut climate emissions by half.
PAGE 2
Revenue commentary without any keywords appears here.
";
    fs::write(raw_dir.join("acme_group_2022.txt"), report)?;

    // Stage 1: clean
    let cleaned = batch::run_clean(
        raw_dir.to_str().unwrap(),
        cleaned_dir.to_str().unwrap(),
    )?;
    assert_eq!(cleaned.files_processed, 1);

    let cleaned_records = read_records(&cleaned_dir.join("acme_group_2022.jsonl"));
    assert!(!cleaned_records.is_empty());
    assert!(cleaned_records
        .iter()
        .all(|r| r.company == "ACME_GROUP" && r.year == Some(2022)));

    // Governance precedence: the board sentence carries a metric but stays
    // governance.
    let board = cleaned_records
        .iter()
        .find(|r| r.sentence.starts_with("The board approved"))
        .expect("board sentence survives cleaning");
    assert_eq!(board.category, Category::Governance);
    assert!(board.has_metric);

    // Case-insensitive dedup: the repeated commitment sentence appears once.
    let commitments = cleaned_records
        .iter()
        .filter(|r| r.sentence.to_lowercase().starts_with("we are committed"))
        .count();
    assert_eq!(commitments, 1);

    // The keyword-free commentary fails both gates and is gone.
    assert!(cleaned_records
        .iter()
        .all(|r| !r.sentence.contains("Revenue commentary")));

    // Stage 2: refine drops the glossary sentence.
    let refined = batch::run_refine(
        cleaned_dir.to_str().unwrap(),
        refined_dir.to_str().unwrap(),
    )?;
    assert_eq!(refined.files_processed, 1);
    let refined_records = read_records(&refined_dir.join("acme_group_2022.jsonl"));
    assert!(refined_records
        .iter()
        .all(|r| !r.sentence.contains("metric ton")));

    // Stage 3: atomic explosion duplicates the multi-role clause.
    batch::run_atomic(
        refined_dir.to_str().unwrap(),
        atomic_dir.to_str().unwrap(),
    )?;
    let atomic_records = read_records(&atomic_dir.join("acme_group_2022.jsonl"));

    let committee: Vec<&ClaimRecord> = atomic_records
        .iter()
        .filter(|r| r.sentence.starts_with("The committee aims"))
        .collect();
    assert_eq!(committee.len(), 2);
    assert_eq!(committee[0].sentence, committee[1].sentence);
    let mut roles: Vec<Category> = committee.iter().map(|r| r.category).collect();
    roles.sort_by_key(|c| c.as_str().to_string());
    assert_eq!(roles, vec![Category::Governance, Category::Vision]);
    assert!(committee.iter().all(|r| r.env_relevant));

    // Validation sees the atomic corpus.
    let report = batch::validate_atomicity(atomic_dir.to_str().unwrap())?;
    assert_eq!(report.total_records, atomic_records.len());

    Ok(())
}

#[test]
fn test_empty_input_file_yields_empty_output() -> Result<()> {
    let temp = tempdir()?;
    let raw_dir = temp.path().join("raw_txt");
    let out_dir = temp.path().join("cleaned_jsonl");
    fs::create_dir_all(&raw_dir)?;
    fs::write(raw_dir.join("hollow_2020.txt"), "")?;

    let summary = batch::run_clean(raw_dir.to_str().unwrap(), out_dir.to_str().unwrap())?;
    assert_eq!(summary.files_processed, 1);
    assert_eq!(summary.records_written, 0);

    let content = fs::read_to_string(out_dir.join("hollow_2020.jsonl"))?;
    assert!(content.is_empty());
    Ok(())
}

#[test]
fn test_malformed_record_aborts_the_stage() -> Result<()> {
    let temp = tempdir()?;
    let in_dir = temp.path().join("cleaned_jsonl");
    let out_dir = temp.path().join("refined_jsonl");
    fs::create_dir_all(&in_dir)?;
    fs::write(in_dir.join("acme_2021.jsonl"), "{\"company\": truncated\n")?;

    let result = batch::run_refine(in_dir.to_str().unwrap(), out_dir.to_str().unwrap());
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_undecodable_bytes_are_tolerated_at_read_time() -> Result<()> {
    let temp = tempdir()?;
    let raw_dir = temp.path().join("raw_txt");
    let out_dir = temp.path().join("cleaned_jsonl");
    fs::create_dir_all(&raw_dir)?;

    let mut body =
        b"Our renewable energy capacity reached 450 MW across the portfolio.\n".to_vec();
    body.extend_from_slice(&[0xff, 0xfe, 0xfa]);
    fs::write(raw_dir.join("acme_2019.txt"), body)?;

    let summary = batch::run_clean(raw_dir.to_str().unwrap(), out_dir.to_str().unwrap())?;
    assert_eq!(summary.files_processed, 1);
    let records = read_records(&out_dir.join("acme_2019.jsonl"));
    assert_eq!(records.len(), 1);
    assert!(records[0].env_relevant);
    assert!(records[0].has_metric);
    Ok(())
}
