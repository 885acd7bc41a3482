// ABOUTME: Pre-trained scoring model abstraction and JSON artifact loading
// ABOUTME: Defines the ScoringModel trait, ModelError, and the kind-tagged artifact format
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Scoring Models
//!
//! A scoring model maps one normalized frame to a technique score. Trained
//! models are exported as JSON artifacts tagged by `kind`:
//!
//! ```json
//! { "kind": "linear", "feature_names": ["trunk", "pelvis"],
//!   "coefficients": [1.5, 2.0], "intercept": 0.5 }
//! ```
//!
//! When an artifact declares `feature_names`, the scorer reorders the motion
//! columns to that order before prediction (missing columns read as `0.0`,
//! extra columns are dropped).

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use technique_core::errors::ScoringError;
use thiserror::Error;
use tracing::info;

/// Linear regression artifacts
pub mod linear;
/// Per-discipline model lookup
pub mod registry;
/// Regression tree ensemble artifacts
pub mod tree_ensemble;

pub use linear::LinearModel;
pub use registry::ModelRegistry;
pub use tree_ensemble::{Aggregation, RegressionTree, TreeEnsembleModel, TreeNode};

/// Errors raised while validating or evaluating a model
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// Row length does not match the model input width
    #[error("row has {actual} values, model expects {expected}")]
    WidthMismatch {
        /// Width the model was trained on
        expected: usize,
        /// Width of the supplied row
        actual: usize,
    },
    /// A tree split references a feature the row does not have
    #[error("tree {tree} splits on feature index {feature}, row has {width} values")]
    FeatureOutOfRange {
        /// Tree index in the ensemble
        tree: usize,
        /// Referenced feature index
        feature: usize,
        /// Width of the supplied row
        width: usize,
    },
    /// The model produced NaN or infinity
    #[error("prediction is not finite ({0})")]
    NonFinite(f64),
    /// The artifact is structurally inconsistent
    #[error("{0}")]
    InvalidArtifact(String),
}

/// A pre-trained regression model applied row by row
pub trait ScoringModel: Send + Sync + fmt::Debug {
    /// Feature order the model was trained on, if the artifact declares it
    fn feature_names(&self) -> Option<&[String]>;

    /// Predict the score of one frame
    ///
    /// # Errors
    ///
    /// Returns an error when the row does not fit the model or the output is
    /// not finite
    fn predict_row(&self, row: &[f64]) -> Result<f64, ModelError>;

    /// Artifact kind, for logging
    fn kind(&self) -> &'static str;
}

/// Serialized model, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    /// Coefficients plus intercept
    Linear(LinearModel),
    /// Averaged or summed regression trees
    TreeEnsemble(TreeEnsembleModel),
}

impl ModelArtifact {
    /// Check internal consistency and box as a shareable model
    ///
    /// # Errors
    ///
    /// Returns `InvalidArtifact` when shapes disagree or references dangle
    pub fn into_model(self) -> Result<Arc<dyn ScoringModel>, ModelError> {
        match self {
            Self::Linear(model) => {
                model.validate()?;
                Ok(Arc::new(model))
            }
            Self::TreeEnsemble(model) => {
                model.validate()?;
                Ok(Arc::new(model))
            }
        }
    }
}

/// Parse and validate a model artifact from JSON text
///
/// # Errors
///
/// Returns `ModelLoad` for malformed JSON or an inconsistent artifact
pub fn parse_model(json: &str, path: &Path) -> Result<Arc<dyn ScoringModel>, ScoringError> {
    let artifact: ModelArtifact = serde_json::from_str(json)
        .map_err(|e| ScoringError::model_load(path, format!("malformed artifact: {e}")))?;
    artifact
        .into_model()
        .map_err(|e| ScoringError::model_load(path, e.to_string()))
}

/// Load a model artifact from disk
///
/// # Errors
///
/// Returns `ModelLoad` if the file is missing, unreadable, malformed, or
/// inconsistent
pub fn load_model(path: &Path) -> Result<Arc<dyn ScoringModel>, ScoringError> {
    let json = fs::read_to_string(path)
        .map_err(|e| ScoringError::model_load(path, format!("cannot read file: {e}")))?;
    let model = parse_model(&json, path)?;
    info!(
        path = %path.display(),
        kind = model.kind(),
        features = model.feature_names().map_or(0, <[String]>::len),
        "Loaded scoring model"
    );
    Ok(model)
}

pub(crate) fn ensure_finite(value: f64) -> Result<f64, ModelError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::NonFinite(value))
    }
}
