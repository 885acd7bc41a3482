// ABOUTME: Motion record loader for tab-delimited pose-tool output (.mot files)
// ABOUTME: Skips the fixed header block, parses named numeric columns, and drops the time column
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Motion Record Loader
//!
//! A motion file is a fixed-size free-text header followed by a tab-separated
//! table whose first row names the columns (`time`, `trunk`, `right knee`,
//! ...). Column sets vary between files depending on what the pose tool
//! emitted, so only structural problems are errors: a missing header block,
//! a missing column row, ragged rows, or non-numeric cells.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use technique_core::constants::motion::{DELIMITER, TIME_COLUMN};
use technique_core::errors::ScoringError;
use tracing::debug;

/// Per-frame joint and segment measurements, stored column-major.
///
/// All columns have the same length, names are unique, and rows are kept in
/// frame order.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionRecord {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl MotionRecord {
    /// Build a record from named columns
    ///
    /// # Errors
    ///
    /// Returns `FileFormat` if there are no columns, no rows, duplicate or
    /// empty names, or columns of different lengths
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> Result<Self, ScoringError> {
        let source = "in-memory record";
        let Some(row_count) = columns.first().map(|(_, v)| v.len()) else {
            return Err(ScoringError::file_format(source, "no feature columns"));
        };
        if row_count == 0 {
            return Err(ScoringError::file_format(source, "no data rows"));
        }

        let mut seen = HashSet::new();
        for (name, values) in &columns {
            if name.is_empty() {
                return Err(ScoringError::file_format(source, "empty column name"));
            }
            if !seen.insert(name.as_str()) {
                return Err(ScoringError::file_format(
                    source,
                    format!("duplicate column '{name}'"),
                ));
            }
            if values.len() != row_count {
                return Err(ScoringError::file_format(
                    source,
                    format!(
                        "column '{name}' has {} rows, expected {row_count}",
                        values.len()
                    ),
                ));
            }
        }

        let (names, values) = columns.into_iter().unzip();
        Ok(Self {
            columns: names,
            values,
        })
    }

    /// Column names in file order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values of a named column
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| self.values[i].as_slice())
    }

    /// `(name, values)` pairs in column order
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(Vec::as_slice))
    }

    /// Number of frames
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    /// Number of feature columns
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Values of one frame in column order
    #[must_use]
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        (index < self.row_count()).then(|| self.values.iter().map(|c| c[index]).collect())
    }

    pub(crate) fn column_slices(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub(crate) fn from_parts_unchecked(columns: Vec<String>, values: Vec<Vec<f64>>) -> Self {
        Self { columns, values }
    }
}

/// Load a motion file, skipping `header_lines` lines before the column row
///
/// # Errors
///
/// Returns `FileFormat` if the file cannot be read or parsed into a table
pub fn load_motion_record(path: &Path, header_lines: usize) -> Result<MotionRecord, ScoringError> {
    let source_name = path.display().to_string();
    let file = File::open(path)
        .map_err(|e| ScoringError::file_format(&source_name, format!("cannot open file: {e}")))?;
    let record = parse_motion_record(BufReader::new(file), header_lines, &source_name)?;
    debug!(
        path = %source_name,
        rows = record.row_count(),
        columns = record.column_count(),
        "Loaded motion record"
    );
    Ok(record)
}

/// Parse a motion table from any reader
///
/// # Errors
///
/// Returns `FileFormat` for fewer than `header_lines` lines, a missing column
/// row, no data rows, ragged rows, or non-numeric cells
pub fn parse_motion_record<R: Read>(
    mut reader: R,
    header_lines: usize,
    source_name: &str,
) -> Result<MotionRecord, ScoringError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| ScoringError::file_format(source_name, format!("unreadable content: {e}")))?;

    let body = skip_header_block(&content, header_lines).ok_or_else(|| {
        ScoringError::file_format(
            source_name,
            format!(
                "expected at least {header_lines} header lines, found {}",
                content.lines().count()
            ),
        )
    })?;

    let mut table = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .trim(csv::Trim::All)
        .has_headers(true)
        .flexible(false)
        .from_reader(body.as_bytes());

    let header: Vec<String> = table
        .headers()
        .map_err(|e| ScoringError::file_format(source_name, format!("bad column row: {e}")))?
        .iter()
        .map(str::to_owned)
        .collect();
    if header.is_empty() || header.iter().all(String::is_empty) {
        return Err(ScoringError::file_format(
            source_name,
            "missing column header row",
        ));
    }

    let mut values: Vec<Vec<f64>> = vec![Vec::new(); header.len()];
    for (row_index, record) in table.records().enumerate() {
        let record = record
            .map_err(|e| ScoringError::file_format(source_name, format!("malformed row: {e}")))?;
        for ((name, column), raw) in header.iter().zip(values.iter_mut()).zip(record.iter()) {
            column.push(parse_cell(raw).ok_or_else(|| {
                ScoringError::file_format(
                    source_name,
                    format!("row {}, column '{name}': '{raw}' is not numeric", row_index + 1),
                )
            })?);
        }
    }

    let columns: Vec<(String, Vec<f64>)> = header
        .into_iter()
        .zip(values)
        .filter(|(name, _)| name != TIME_COLUMN)
        .collect();

    MotionRecord::from_columns(columns).map_err(|e| match e {
        ScoringError::FileFormat { reason, .. } => ScoringError::file_format(source_name, reason),
        other => other,
    })
}

/// Remainder of `content` after `count` lines, or `None` if it has fewer lines
fn skip_header_block(content: &str, count: usize) -> Option<&str> {
    if count == 0 {
        return Some(content);
    }
    content
        .match_indices('\n')
        .nth(count - 1)
        .map(|(offset, _)| &content[offset + 1..])
}

/// Blank cells are undetected frames and read as NaN
fn parse_cell(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return Some(f64::NAN);
    }
    raw.parse::<f64>().ok()
}
