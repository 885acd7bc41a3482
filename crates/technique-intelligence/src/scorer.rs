// ABOUTME: Applies a scoring model to every normalized frame and averages the predictions
// ABOUTME: Reindexes columns to the model's declared feature order before prediction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use technique_core::errors::ScoringError;
use tracing::debug;

use crate::model::ScoringModel;
use crate::normalizer::NormalizedMotionRecord;

/// Mean per-frame prediction of `model` over `record`
///
/// # Errors
///
/// Returns `ModelInvocation` when the model rejects a row or produces a
/// non-finite value
pub fn score(record: &NormalizedMotionRecord, model: &dyn ScoringModel) -> Result<f64, ScoringError> {
    let columns = input_columns(record, model.feature_names());
    let row_count = record.row_count();

    let mut total = 0.0;
    let mut row = Vec::with_capacity(columns.len());
    for frame in 0..row_count {
        row.clear();
        row.extend(columns.iter().map(|c| c.map_or(0.0, |values| values[frame])));
        total += model.predict_row(&row).map_err(|e| {
            ScoringError::model_invocation(format!("frame {frame}: {e}"))
        })?;
    }

    let mean = total / row_count as f64;
    if !mean.is_finite() {
        return Err(ScoringError::model_invocation(format!(
            "mean prediction is not finite ({mean})"
        )));
    }
    Ok(mean)
}

/// Column slices in model input order; `None` marks a missing feature
fn input_columns<'a>(
    record: &'a NormalizedMotionRecord,
    feature_names: Option<&[String]>,
) -> Vec<Option<&'a [f64]>> {
    let Some(names) = feature_names else {
        return record.iter_columns().map(|(_, v)| Some(v)).collect();
    };

    let columns: Vec<Option<&[f64]>> = names.iter().map(|n| record.column(n)).collect();
    let missing: Vec<&str> = names
        .iter()
        .zip(&columns)
        .filter(|(_, c)| c.is_none())
        .map(|(n, _)| n.as_str())
        .collect();
    let extra: Vec<&str> = record
        .columns()
        .iter()
        .filter(|c| !names.contains(c))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() || !extra.is_empty() {
        debug!(?missing, ?extra, "Reindexed motion columns to model feature order");
    }
    columns
}
