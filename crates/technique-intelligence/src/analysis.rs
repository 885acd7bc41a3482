// ABOUTME: End-to-end technique analysis for one motion record
// ABOUTME: Chains load, normalize, score, rank and feedback into a ScoreResult
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Technique Analyzer
//!
//! Synchronous, CPU-bound pipeline for a single person. Callers in async
//! contexts run it on a blocking thread.

use std::path::Path;
use std::sync::Arc;

use technique_core::errors::ScoringError;
use technique_core::models::ScoreResult;
use tracing::debug;

use crate::config::TechniqueConfig;
use crate::contribution::weakest_features;
use crate::feedback::FeedbackGenerator;
use crate::model::ScoringModel;
use crate::motion_record::{load_motion_record, MotionRecord};
use crate::normalizer::normalize;
use crate::scorer::score;

/// Scores motion records and produces coaching feedback
#[derive(Debug, Clone, Default)]
pub struct TechniqueAnalyzer {
    config: Arc<TechniqueConfig>,
}

impl TechniqueAnalyzer {
    /// Create an analyzer over a validated configuration
    #[must_use]
    pub const fn new(config: Arc<TechniqueConfig>) -> Self {
        Self { config }
    }

    /// Shared configuration
    #[must_use]
    pub fn config(&self) -> &TechniqueConfig {
        &self.config
    }

    /// Analyze an in-memory motion record
    ///
    /// # Errors
    ///
    /// Returns `ModelInvocation` if the model fails on any frame
    pub fn analyze_record(
        &self,
        person_id: &str,
        record: &MotionRecord,
        discipline: &str,
        model: &dyn ScoringModel,
    ) -> Result<ScoreResult, ScoringError> {
        let normalized = normalize(record);
        let overall_score = score(&normalized, model)?;
        let weakest = weakest_features(
            &normalized,
            &self.config.weights,
            self.config.limits.weakest_feature_count,
        );
        debug!(
            person_id,
            overall_score,
            weakest = ?weakest.iter().map(|c| c.feature.as_str()).collect::<Vec<_>>(),
            "Scored motion record"
        );
        let feedback = FeedbackGenerator::from_config(&self.config).generate(discipline, &weakest);

        Ok(ScoreResult {
            person_id: person_id.to_owned(),
            overall_score,
            feedback,
        })
    }

    /// Load a motion file and analyze it
    ///
    /// # Errors
    ///
    /// Returns `FileFormat` for an unreadable motion file, or any error from
    /// [`Self::analyze_record`]
    pub fn analyze_file(
        &self,
        person_id: &str,
        path: &Path,
        discipline: &str,
        model: &dyn ScoringModel,
    ) -> Result<ScoreResult, ScoringError> {
        let record = load_motion_record(path, self.config.limits.header_lines)?;
        self.analyze_record(person_id, &record, discipline, model)
    }
}
