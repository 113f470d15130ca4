//! Flattens a directory of line-delimited record files into one CSV table.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::info;

use crate::error::{PipelineError, Result};

/// One parsed record plus the filename it came from.
struct SourcedRow {
    source_file: String,
    fields: Map<String, Value>,
}

/// Combines every `.jsonl` file in `input_dir` into a single CSV at
/// `output_file`. The header is the sorted union of all fields seen across
/// all records plus `source_file`; missing fields are left blank. Returns the
/// number of rows written.
pub fn export_csv(input_dir: &str, output_file: &str) -> Result<usize> {
    let mut rows = Vec::new();
    let mut columns = BTreeSet::new();

    for path in jsonl_files(input_dir)? {
        let source_file = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        // Best-effort decode, matching the single-document read path.
        let bytes = fs::read(&path)?;
        let content = String::from_utf8_lossy(&bytes);

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let value: Value =
                serde_json::from_str(line).map_err(|e| PipelineError::MalformedRecord {
                    file: path.display().to_string(),
                    line: idx + 1,
                    message: e.to_string(),
                })?;
            let fields = match value {
                Value::Object(map) => map,
                _ => {
                    return Err(PipelineError::MalformedRecord {
                        file: path.display().to_string(),
                        line: idx + 1,
                        message: "expected a JSON object".to_string(),
                    })
                }
            };
            columns.extend(fields.keys().cloned());
            rows.push(SourcedRow {
                source_file: source_file.clone(),
                fields,
            });
        }
    }

    columns.insert("source_file".to_string());

    let mut out = File::create(output_file)?;
    let header: Vec<String> = columns.iter().map(|c| csv_escape(c)).collect();
    writeln!(out, "{}", header.join(","))?;

    for row in &rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| {
                if column == "source_file" {
                    csv_escape(&row.source_file)
                } else {
                    match row.fields.get(column) {
                        None | Some(Value::Null) => String::new(),
                        Some(Value::String(s)) => csv_escape(s),
                        Some(other) => csv_escape(&other.to_string()),
                    }
                }
            })
            .collect();
        writeln!(out, "{}", cells.join(","))?;
    }

    info!("exported {} rows to {}", rows.len(), output_file);
    Ok(rows.len())
}

fn jsonl_files(dir: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("jsonl") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

// RFC 4180: quote a cell containing a comma, quote or line break; double any
// embedded quotes.
fn csv_escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
