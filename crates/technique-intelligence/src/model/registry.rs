// ABOUTME: Read-only per-discipline model registry loaded once at startup
// ABOUTME: Broken artifacts fail startup; absent ones are reported per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use technique_core::errors::ScoringError;
use technique_core::models::Discipline;
use tracing::warn;

use super::{load_model, ScoringModel};

/// Loaded scoring models keyed by discipline
#[derive(Debug, Default, Clone)]
pub struct ModelRegistry {
    models: HashMap<Discipline, Arc<dyn ScoringModel>>,
    missing: HashMap<Discipline, PathBuf>,
}

impl ModelRegistry {
    /// Load every configured artifact
    ///
    /// A path that does not exist is recorded and reported by [`Self::get`];
    /// a path that exists but cannot be loaded fails immediately.
    ///
    /// # Errors
    ///
    /// Returns `ModelLoad` for an unreadable, malformed or inconsistent artifact
    pub fn load_all(
        paths: impl IntoIterator<Item = (Discipline, PathBuf)>,
    ) -> Result<Self, ScoringError> {
        let mut registry = Self::default();
        for (discipline, path) in paths {
            if path.exists() {
                registry.models.insert(discipline, load_model(&path)?);
            } else {
                warn!(
                    discipline = %discipline,
                    path = %path.display(),
                    "Scoring model not found; discipline will be rejected"
                );
                registry.missing.insert(discipline, path);
            }
        }
        Ok(registry)
    }

    /// Build a registry from already-constructed models
    #[must_use]
    pub fn from_models(models: impl IntoIterator<Item = (Discipline, Arc<dyn ScoringModel>)>) -> Self {
        Self {
            models: models.into_iter().collect(),
            missing: HashMap::new(),
        }
    }

    /// Model for a discipline
    ///
    /// # Errors
    ///
    /// Returns `ModelLoad` when no model was loaded for the discipline
    pub fn get(&self, discipline: Discipline) -> Result<Arc<dyn ScoringModel>, ScoringError> {
        self.models.get(&discipline).cloned().ok_or_else(|| {
            let path = self
                .missing
                .get(&discipline)
                .cloned()
                .unwrap_or_else(|| PathBuf::from(format!("<{discipline}>")));
            ScoringError::model_load(path, "no scoring model loaded for this discipline")
        })
    }

    /// Disciplines with a loaded model
    pub fn disciplines(&self) -> impl Iterator<Item = Discipline> + '_ {
        self.models.keys().copied()
    }

    /// Number of loaded models
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// True when no model is loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
