// ABOUTME: Aggregate technique configuration built once at startup and passed by reference
// ABOUTME: Bundles weights, catalog, vocabulary, and limits with completeness validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Technique Configuration
//!
//! Immutable configuration for the analysis pipeline. Built from compiled-in
//! defaults or a JSON override file, validated once, then shared.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use super::{ConfigError, FeatureWeights, FeedbackCatalog};
use technique_core::constants::{feedback, motion};

/// Numeric limits for the analysis pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechniqueLimits {
    /// Number of weakest features ranked for feedback
    pub weakest_feature_count: usize,
    /// Maximum number of distinct feedback messages
    pub max_feedback_messages: usize,
    /// Header lines skipped before the motion column row
    pub header_lines: usize,
}

impl Default for TechniqueLimits {
    fn default() -> Self {
        Self {
            weakest_feature_count: feedback::WEAKEST_FEATURE_COUNT,
            max_feedback_messages: feedback::MAX_FEEDBACK_MESSAGES,
            header_lines: motion::DEFAULT_HEADER_LINES,
        }
    }
}

/// Weights, catalog, vocabulary and limits for technique analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechniqueConfig {
    /// Physiological importance per feature
    pub weights: FeatureWeights,
    /// Coaching messages per discipline
    pub catalog: FeedbackCatalog,
    /// Full feature-name vocabulary expected from the pose tool.
    /// `None` means "every feature the catalog maps".
    pub vocabulary: Option<Vec<String>>,
    /// Pipeline limits
    pub limits: TechniqueLimits,
    /// Message used when no weak feature maps to a category
    pub fallback_message: String,
}

impl Default for TechniqueConfig {
    fn default() -> Self {
        Self {
            weights: FeatureWeights::default(),
            catalog: FeedbackCatalog::default(),
            vocabulary: None,
            limits: TechniqueLimits::default(),
            fallback_message: feedback::FALLBACK_MESSAGE.to_owned(),
        }
    }
}

/// Outcome of checking the vocabulary against the weight table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyReport {
    /// Vocabulary entries that will silently use the default weight
    pub unweighted: Vec<String>,
}

impl VocabularyReport {
    /// True when every vocabulary entry has an explicit weight
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unweighted.is_empty()
    }
}

impl TechniqueConfig {
    /// Load an override file; fields absent from the file keep their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        info!(path = %path.display(), "Loaded technique configuration override");
        Ok(config)
    }

    /// Effective vocabulary: explicit list or every catalog-mapped feature
    #[must_use]
    pub fn effective_vocabulary(&self) -> Vec<String> {
        self.vocabulary.clone().unwrap_or_else(|| {
            self.catalog
                .mapped_features()
                .into_iter()
                .map(str::to_owned)
                .collect()
        })
    }

    /// Validate limits, weights, catalog completeness and vocabulary coverage
    ///
    /// With `strict_vocabulary` an unweighted vocabulary entry is an error;
    /// otherwise it is logged and reported.
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found
    pub fn validate(&self, strict_vocabulary: bool) -> Result<VocabularyReport, ConfigError> {
        if self.limits.weakest_feature_count == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "weakest_feature_count must be at least 1",
            ));
        }
        if self.limits.max_feedback_messages == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_feedback_messages must be at least 1",
            ));
        }
        self.weights.validate()?;
        self.catalog.validate()?;

        let vocabulary = self.effective_vocabulary();
        let report = VocabularyReport {
            unweighted: self
                .weights
                .unweighted(vocabulary.iter().map(String::as_str)),
        };

        if !report.is_complete() {
            if strict_vocabulary {
                return Err(ConfigError::UnweightedVocabulary(report.unweighted));
            }
            warn!(
                features = ?report.unweighted,
                "Vocabulary features without explicit weights will use the default weight"
            );
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates_strictly() {
        let report = TechniqueConfig::default().validate(true).unwrap();
        assert!(report.is_complete());
    }

    #[test]
    fn test_strict_vocabulary_rejects_unweighted_names() {
        let config = TechniqueConfig {
            vocabulary: Some(vec!["trunk".to_owned(), "right wrist".to_owned()]),
            ..TechniqueConfig::default()
        };

        let lenient = config.validate(false).unwrap();
        assert_eq!(lenient.unweighted, vec!["right wrist"]);

        assert!(matches!(
            config.validate(true),
            Err(ConfigError::UnweightedVocabulary(names)) if names == ["right wrist"]
        ));
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        let config = TechniqueConfig {
            limits: TechniqueLimits {
                max_feedback_messages: 0,
                ..TechniqueLimits::default()
            },
            ..TechniqueConfig::default()
        };
        assert!(matches!(
            config.validate(false),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("technique.json");
        fs::write(&path, r#"{"limits": {"weakest_feature_count": 5}}"#).unwrap();

        let config = TechniqueConfig::from_file(&path).unwrap();
        assert_eq!(config.limits.weakest_feature_count, 5);
        assert_eq!(config.limits.max_feedback_messages, 3);
        assert_eq!(config.catalog, FeedbackCatalog::default());
    }
}
