// ABOUTME: Manually curated physiological importance weights for motion features
// ABOUTME: Unlisted features fall back to the default weight of 1.0
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Feature weight table
//!
//! Weights scale each normalized feature before its mean contribution is
//! ranked. Higher weights mark segments whose motion matters more for
//! technique, so a low weighted contribution points at a real weakness.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ConfigError;
use technique_core::constants::feedback::DEFAULT_FEATURE_WEIGHT;

/// Mapping from feature name to a positive importance weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureWeights(BTreeMap<String, f64>);

impl FeatureWeights {
    /// Build a weight table from explicit entries
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Weight for a feature, defaulting to 1.0 when unlisted
    #[must_use]
    pub fn weight_for(&self, feature: &str) -> f64 {
        self.0
            .get(feature)
            .copied()
            .unwrap_or(DEFAULT_FEATURE_WEIGHT)
    }

    /// Whether the table has an explicit weight for the feature
    #[must_use]
    pub fn contains(&self, feature: &str) -> bool {
        self.0.contains_key(feature)
    }

    /// Names from `features` that have no explicit weight, in input order
    #[must_use]
    pub fn unweighted<'a, I>(&self, features: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        features
            .into_iter()
            .filter(|f| !self.contains(f))
            .map(str::to_owned)
            .collect()
    }

    /// Reject non-positive or non-finite weights
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWeight` for the first offending entry
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.0.iter().find(|(_, w)| !w.is_finite() || **w <= 0.0) {
            Some((feature, weight)) => Err(ConfigError::InvalidWeight {
                feature: feature.clone(),
                weight: *weight,
            }),
            None => Ok(()),
        }
    }
}

impl Default for FeatureWeights {
    fn default() -> Self {
        let entries = [
            ("trunk", 7.0),
            ("pelvis", 7.0),
            ("shoulders", 6.5),
            ("right shoulder", 6.5),
            ("left shoulder", 6.5),
            ("head", 6.0),
            ("right arm", 6.2),
            ("left arm", 6.2),
            ("right forearm", 6.5),
            ("left forearm", 6.5),
            ("right elbow", 6.5),
            ("left elbow", 6.5),
            ("right hip", 6.8),
            ("left hip", 6.8),
            ("right knee", 6.5),
            ("left knee", 6.5),
            ("right ankle", 6.0),
            ("left ankle", 6.0),
            ("right thigh", 6.5),
            ("left thigh", 6.5),
            ("right shank", 5.5),
            ("left shank", 5.5),
            ("right foot", 5.0),
            ("left foot", 5.0),
        ];
        Self::new(entries.into_iter().map(|(k, v)| (k.to_owned(), v)))
    }
}
