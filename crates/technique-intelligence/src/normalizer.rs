// ABOUTME: Per-column min-max normalization of motion records into the unit interval
// ABOUTME: Degenerate columns collapse to zeros so no NaN reaches the scorer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::ops::Deref;

use rayon::prelude::*;

use crate::motion_record::MotionRecord;

/// A motion record whose every value lies in `[0, 1]`
///
/// Only [`normalize`] constructs this type, so scoring and contribution
/// analysis can rely on the range without re-checking it.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMotionRecord(MotionRecord);

impl Deref for NormalizedMotionRecord {
    type Target = MotionRecord;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rescale every column to `(x - min) / (max - min)`
///
/// Non-finite cells are ignored when fitting the range and emitted as `0.0`.
/// A column whose finite values are all equal, or that has none, becomes
/// all zeros.
#[must_use]
pub fn normalize(record: &MotionRecord) -> NormalizedMotionRecord {
    let values: Vec<Vec<f64>> = record
        .column_slices()
        .par_iter()
        .map(|column| normalize_column(column))
        .collect();

    NormalizedMotionRecord(MotionRecord::from_parts_unchecked(
        record.columns().to_vec(),
        values,
    ))
}

fn normalize_column(column: &[f64]) -> Vec<f64> {
    let (min, max) = column
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;

    // range is NaN/inf when no finite value was seen
    if !range.is_finite() || range <= 0.0 {
        return vec![0.0; column.len()];
    }

    column
        .iter()
        .map(|&v| {
            if v.is_finite() {
                ((v - min) / range).clamp(0.0, 1.0)
            } else {
                0.0
            }
        })
        .collect()
}
