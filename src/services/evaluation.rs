// ABOUTME: Video evaluation service running pose estimation, scoring, and elaboration
// ABOUTME: Keeps per-person failures local and reports the first failure when nobody scored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use technique_intelligence::{ModelRegistry, ScoringModel, TechniqueAnalyzer};
use tokio::fs;
use tokio::task;
use tracing::{info, instrument, warn};

use super::FeedbackElaborator;
use crate::errors::{AppError, AppResult, ScoringError};
use crate::logging::AppLogger;
use crate::models::{Discipline, PersonEvaluation, PersonSelection, VideoEvaluation};
use crate::pose::{locate_motion_files, person_id_from_path, PoseEstimator};

/// Scores every selected person in a video
#[derive(Clone)]
pub struct EvaluationService {
    analyzer: TechniqueAnalyzer,
    registry: Arc<ModelRegistry>,
    pose: Arc<dyn PoseEstimator>,
    selection: PersonSelection,
    elaborator: Option<FeedbackElaborator>,
}

impl EvaluationService {
    /// Create a service over preloaded models and a pose estimator
    #[must_use]
    pub fn new(
        analyzer: TechniqueAnalyzer,
        registry: Arc<ModelRegistry>,
        pose: Arc<dyn PoseEstimator>,
    ) -> Self {
        Self {
            analyzer,
            registry,
            pose,
            selection: PersonSelection::default(),
            elaborator: None,
        }
    }

    /// Choose which detected people are scored
    #[must_use]
    pub const fn with_selection(mut self, selection: PersonSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Enable feedback elaboration for the primary athlete
    #[must_use]
    pub fn with_elaborator(mut self, elaborator: Option<FeedbackElaborator>) -> Self {
        self.elaborator = elaborator;
        self
    }

    /// Evaluate a video against a discipline
    ///
    /// # Errors
    ///
    /// Returns `VideoNotFound`, a pose tool failure, `NoMotionFile`, or the
    /// first per-person failure when no person could be scored.
    #[instrument(skip_all, fields(discipline = %discipline, video = %video.display()))]
    pub async fn evaluate_video(
        &self,
        video: &Path,
        discipline: Discipline,
    ) -> AppResult<VideoEvaluation> {
        let start = Instant::now();

        if !fs::try_exists(video).await.unwrap_or(false) {
            return Err(ScoringError::VideoNotFound {
                path: video.to_path_buf(),
            }
            .into());
        }

        let model = self.registry.get(discipline)?;
        let output_dir = self.pose.estimate(video).await?;
        let motion_files = locate_motion_files(&output_dir, self.selection).await?;
        info!(
            output_dir = %output_dir.display(),
            files = motion_files.len(),
            "Located motion files"
        );

        let mut results = Vec::with_capacity(motion_files.len());
        let mut first_failure: Option<AppError> = None;
        for path in motion_files {
            let person_id = person_id_from_path(&path);
            match self
                .score_person(person_id.clone(), path, discipline, Arc::clone(&model))
                .await
            {
                Ok(evaluation) => results.push(evaluation),
                Err(error) => {
                    warn!(person_id = %person_id, error = %error, "Person could not be scored");
                    results.push(PersonEvaluation::Failed {
                        person_id,
                        error: error.message.clone(),
                    });
                    if first_failure.is_none() {
                        first_failure = Some(error);
                    }
                }
            }
        }

        let scored = results.iter().filter(|r| r.as_scored().is_some()).count();
        AppLogger::log_evaluation(
            discipline.as_str(),
            scored,
            results.len() - scored,
            start.elapsed(),
        );
        if scored == 0 {
            if let Some(error) = first_failure {
                return Err(error);
            }
        }

        let primary = results.iter().find_map(PersonEvaluation::as_scored);
        let elaboration = match (&self.elaborator, primary) {
            (Some(elaborator), Some(primary)) => Some(
                elaborator
                    .elaborate(primary.overall_score, &primary.feedback)
                    .await,
            ),
            _ => None,
        };

        Ok(VideoEvaluation {
            discipline,
            results,
            elaboration,
            evaluated_at: Utc::now(),
        })
    }

    async fn score_person(
        &self,
        person_id: String,
        path: PathBuf,
        discipline: Discipline,
        model: Arc<dyn ScoringModel>,
    ) -> AppResult<PersonEvaluation> {
        let analyzer = self.analyzer.clone();
        let result = task::spawn_blocking(move || {
            analyzer.analyze_file(&person_id, &path, discipline.as_str(), model.as_ref())
        })
        .await
        .map_err(|e| AppError::internal(format!("Scoring task failed: {e}")))??;
        Ok(PersonEvaluation::Scored(result))
    }
}
