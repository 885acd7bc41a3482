// ABOUTME: Regression tree ensemble scoring model (random forest or boosted trees)
// ABOUTME: Trees follow the "go left when x <= threshold" split convention
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{ensure_finite, ModelError, ScoringModel};

/// How per-tree outputs are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Average of tree outputs (random forest)
    #[default]
    Mean,
    /// Sum of tree outputs (gradient boosting)
    Sum,
}

/// One node of a regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Internal node: go to `left` when `row[feature] <= threshold`
    Split {
        /// Input column index
        feature: usize,
        /// Split threshold
        threshold: f64,
        /// Index of the left child
        left: usize,
        /// Index of the right child
        right: usize,
    },
    /// Terminal node
    Leaf {
        /// Predicted value
        value: f64,
    },
}

/// Flat array of nodes with the root at index 0
///
/// Children always sit after their parent, which keeps traversal acyclic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    /// Nodes in pre-order
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn validate(&self, tree: usize, width: Option<usize>) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::InvalidArtifact(format!("tree {tree} has no nodes")));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    for child in [left, right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(ModelError::InvalidArtifact(format!(
                                "tree {tree} node {index} has dangling child {child}"
                            )));
                        }
                    }
                    if let Some(width) = width.filter(|w| feature >= *w) {
                        return Err(ModelError::InvalidArtifact(format!(
                            "tree {tree} node {index} splits on feature {feature} of {width}"
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(ModelError::InvalidArtifact(format!(
                            "tree {tree} node {index} has a NaN threshold"
                        )));
                    }
                }
                TreeNode::Leaf { value } if !value.is_finite() => {
                    return Err(ModelError::InvalidArtifact(format!(
                        "tree {tree} node {index} has a non-finite leaf"
                    )));
                }
                TreeNode::Leaf { .. } => {}
            }
        }
        Ok(())
    }

    fn predict(&self, tree: usize, row: &[f64]) -> Result<f64, ModelError> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(&TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = row.get(feature).ok_or(ModelError::FeatureOutOfRange {
                        tree,
                        feature,
                        width: row.len(),
                    })?;
                    index = if *x <= threshold { left } else { right };
                }
                None => {
                    return Err(ModelError::InvalidArtifact(format!(
                        "tree {tree} has no node {index}"
                    )))
                }
            }
        }
    }
}

/// `score = base_score + scale · aggregate(tree outputs)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsembleModel {
    /// Training feature order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    /// Input width when feature names are not declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_features: Option<usize>,
    /// Trees of the ensemble
    pub trees: Vec<RegressionTree>,
    /// Combination rule
    #[serde(default)]
    pub aggregation: Aggregation,
    /// Initial prediction added to the aggregate
    #[serde(default)]
    pub base_score: f64,
    /// Multiplier applied to the aggregate (learning rate for boosting)
    #[serde(default = "default_scale")]
    pub scale: f64,
}

const fn default_scale() -> f64 {
    1.0
}

impl TreeEnsembleModel {
    fn width(&self) -> Option<usize> {
        self.feature_names.as_ref().map(Vec::len).or(self.n_features)
    }

    pub(super) fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::InvalidArtifact("ensemble has no trees".into()));
        }
        if let (Some(names), Some(n)) = (&self.feature_names, self.n_features) {
            if names.len() != n {
                return Err(ModelError::InvalidArtifact(format!(
                    "{} feature names but n_features is {n}",
                    names.len()
                )));
            }
        }
        if !self.base_score.is_finite() || !self.scale.is_finite() {
            return Err(ModelError::InvalidArtifact(
                "ensemble has non-finite parameters".into(),
            ));
        }
        let width = self.width();
        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(i, tree)| tree.validate(i, width))
    }
}

impl ScoringModel for TreeEnsembleModel {
    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict_row(&self, row: &[f64]) -> Result<f64, ModelError> {
        if let Some(expected) = self.width() {
            if row.len() != expected {
                return Err(ModelError::WidthMismatch {
                    expected,
                    actual: row.len(),
                });
            }
        }
        let mut total = 0.0;
        for (i, tree) in self.trees.iter().enumerate() {
            total += tree.predict(i, row)?;
        }
        let aggregate = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => total,
        };
        ensure_finite(self.scale.mul_add(aggregate, self.base_score))
    }

    fn kind(&self) -> &'static str {
        "tree_ensemble"
    }
}
