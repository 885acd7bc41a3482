// ABOUTME: Ranks motion features by weighted mean contribution to find the weakest ones
// ABOUTME: Stable ascending sort so ties keep the input column order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FeatureWeights;
use crate::normalizer::NormalizedMotionRecord;

/// Weighted mean of one normalized feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    /// Column name
    pub feature: String,
    /// `mean(value × weight)` over all frames
    pub contribution: f64,
}

/// The `count` features with the lowest weighted contribution, weakest first
#[must_use]
pub fn weakest_features(
    record: &NormalizedMotionRecord,
    weights: &FeatureWeights,
    count: usize,
) -> Vec<FeatureContribution> {
    let mut contributions: Vec<FeatureContribution> = record
        .iter_columns()
        .map(|(feature, values)| {
            if !weights.contains(feature) {
                debug!(feature, "No weight configured; using default");
            }
            let weight = weights.weight_for(feature);
            let contribution = values.iter().map(|v| v * weight).sum::<f64>() / values.len() as f64;
            FeatureContribution {
                feature: feature.to_owned(),
                contribution,
            }
        })
        .collect();

    contributions.sort_by(|a, b| a.contribution.total_cmp(&b.contribution));
    contributions.truncate(count);
    contributions
}
