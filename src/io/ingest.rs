//! CSV ingest and normalization.
//!
//! Turns one fetched aggregates CSV into typed `Row`s for the active scheme
//! and metric.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Lenient values**: a missing or malformed score cell is data, not an
//!   error — it becomes `None` and later drives the dashed gap line

use std::collections::HashMap;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{GroupLabel, GroupingScheme, Row};
use crate::error::AppError;

/// A row-level problem encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: normalized rows plus what was skipped along the way.
#[derive(Debug, Clone)]
pub struct IngestedRows {
    pub rows: Vec<Row>,
    pub rows_read: usize,
    pub row_errors: Vec<RowError>,
}

impl IngestedRows {
    pub fn rows_used(&self) -> usize {
        self.rows.len()
    }
}

/// Parse CSV bytes into rows for `scheme`, reading scores from `metric`.
pub fn parse_rows(
    bytes: &[u8],
    scheme: GroupingScheme,
    metric: &str,
) -> Result<IngestedRows, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| AppError::config(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(scheme, metric, &header_map)?;

    let year_idx = header_map["year"];
    let group_idx = scheme.group_column().map(|name| header_map[name]);
    let metric_idx = header_map[&metric.to_ascii_lowercase()];

    let mut rows = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (i, record) in reader.records().enumerate() {
        // Header occupies line 1.
        let line = i + 2;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("Unreadable record: {e}"),
                });
                continue;
            }
        };
        rows_read += 1;

        let year = match get_cell(&record, year_idx).and_then(parse_year) {
            Some(y) => y,
            None => {
                row_errors.push(RowError {
                    line,
                    message: format!(
                        "Invalid year '{}'.",
                        get_cell(&record, year_idx).unwrap_or_default()
                    ),
                });
                continue;
            }
        };

        let group = match group_idx {
            None => GroupLabel::FullDataset,
            Some(idx) => {
                let cell = get_cell(&record, idx).unwrap_or_default();
                match GroupLabel::from_csv_name(scheme, cell) {
                    Some(label) => label,
                    None => {
                        row_errors.push(RowError {
                            line,
                            message: format!(
                                "Unknown {} label '{cell}'.",
                                scheme.display_name()
                            ),
                        });
                        continue;
                    }
                }
            }
        };

        let value = parse_score(get_cell(&record, metric_idx));

        rows.push(Row { year, group, value });
    }

    Ok(IngestedRows {
        rows,
        rows_read,
        row_errors,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().to_ascii_lowercase(), idx))
        .collect()
}

fn ensure_required_columns_exist(
    scheme: GroupingScheme,
    metric: &str,
    header_map: &HashMap<String, usize>,
) -> Result<(), AppError> {
    let mut required = vec!["year".to_string()];
    if let Some(col) = scheme.group_column() {
        required.push(col.to_string());
    }
    required.push(metric.to_ascii_lowercase());

    for name in required {
        if !header_map.contains_key(&name) {
            return Err(AppError::config(format!(
                "Missing required column `{name}` in {} data.",
                scheme.display_name()
            )));
        }
    }
    Ok(())
}

fn get_cell(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

/// Parse the year column.
///
/// The aggregates export stores bare years (`2003`), but full ISO dates are
/// accepted too; either way the row lands on January 1.
fn parse_year(s: &str) -> Option<NaiveDate> {
    if let Ok(y) = s.parse::<i32>() {
        return NaiveDate::from_ymd_opt(y, 1, 1);
    }
    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    NaiveDate::from_ymd_opt(chrono::Datelike::year(&d), 1, 1)
}

/// Parse a score cell; anything absent or non-numeric is a missing value.
fn parse_score(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed.eq_ignore_ascii_case("na") {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
