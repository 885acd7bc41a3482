// ABOUTME: Linear regression scoring model (coefficients plus intercept)
// ABOUTME: Validates coefficient/name agreement at load time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{ensure_finite, ModelError, ScoringModel};

/// `score = intercept + Σ coefficient_i · x_i`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// Training feature order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    /// One coefficient per input feature
    pub coefficients: Vec<f64>,
    /// Constant term
    #[serde(default)]
    pub intercept: f64,
}

impl LinearModel {
    pub(super) fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.is_empty() {
            return Err(ModelError::InvalidArtifact(
                "linear model has no coefficients".into(),
            ));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.coefficients.len() {
                return Err(ModelError::InvalidArtifact(format!(
                    "{} feature names but {} coefficients",
                    names.len(),
                    self.coefficients.len()
                )));
            }
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::InvalidArtifact(
                "linear model has non-finite parameters".into(),
            ));
        }
        Ok(())
    }
}

impl ScoringModel for LinearModel {
    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict_row(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.coefficients.len() {
            return Err(ModelError::WidthMismatch {
                expected: self.coefficients.len(),
                actual: row.len(),
            });
        }
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(row)
            .map(|(c, x)| c * x)
            .sum();
        ensure_finite(self.intercept + dot)
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}
