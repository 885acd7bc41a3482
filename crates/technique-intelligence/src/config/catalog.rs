// ABOUTME: Discipline-specific coaching templates and feature-to-category lookup tables
// ABOUTME: Static configuration validated once at startup; lookups never fail at runtime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Feedback catalog
//!
//! Two explicit lookup levels per discipline: a raw feature name resolves to
//! a technique category, and the category resolves to a coaching message.
//! A miss at either level simply yields no message; the generator supplies
//! the fallback text.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::ConfigError;

/// Templates and feature mapping for one discipline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisciplineFeedback {
    /// Technique category key -> coaching message
    pub templates: BTreeMap<String, String>,
    /// Raw feature name -> technique category key
    pub features: BTreeMap<String, String>,
}

impl DisciplineFeedback {
    fn from_tables(templates: &[(&str, &str)], features: &[(&str, &str)]) -> Self {
        Self {
            templates: templates
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            features: features
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        }
    }

    /// Category key for a feature
    #[must_use]
    pub fn category_for(&self, feature: &str) -> Option<&str> {
        self.features.get(feature).map(String::as_str)
    }

    /// Message for a feature, following feature -> category -> message
    #[must_use]
    pub fn message_for(&self, feature: &str) -> Option<&str> {
        self.category_for(feature)
            .and_then(|category| self.templates.get(category))
            .map(String::as_str)
    }
}

/// Discipline key -> feedback tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackCatalog(BTreeMap<String, DisciplineFeedback>);

impl FeedbackCatalog {
    /// Build a catalog from explicit discipline entries
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = (String, DisciplineFeedback)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Tables for a discipline key
    #[must_use]
    pub fn discipline(&self, key: &str) -> Option<&DisciplineFeedback> {
        self.0.get(key)
    }

    /// Configured discipline keys
    pub fn disciplines(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Coaching message for a feature within a discipline
    #[must_use]
    pub fn message_for(&self, discipline: &str, feature: &str) -> Option<&str> {
        self.discipline(discipline)
            .and_then(|tables| tables.message_for(feature))
    }

    /// Every feature name mapped by any discipline
    #[must_use]
    pub fn mapped_features(&self) -> BTreeSet<&str> {
        self.0
            .values()
            .flat_map(|tables| tables.features.keys().map(String::as_str))
            .collect()
    }

    /// Check every discipline is complete and every mapped category has a message
    ///
    /// # Errors
    ///
    /// Returns the first incompleteness found, in discipline order
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (discipline, tables) in &self.0 {
            if tables.templates.is_empty() || tables.features.is_empty() {
                return Err(ConfigError::IncompleteDiscipline(discipline.clone()));
            }
            for (feature, category) in &tables.features {
                if !tables.templates.contains_key(category) {
                    return Err(ConfigError::MissingCategory {
                        discipline: discipline.clone(),
                        feature: feature.clone(),
                        category: category.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for FeedbackCatalog {
    fn default() -> Self {
        Self::new([
            ("long-jump".to_owned(), long_jump()),
            ("shot-put".to_owned(), shot_put()),
            ("sprint-start".to_owned(), sprint_start()),
            ("discus-throw".to_owned(), discus_throw()),
        ])
    }
}

fn long_jump() -> DisciplineFeedback {
    DisciplineFeedback::from_tables(
        &[
            ("run_up", "Run-up should be accelerated without slowing down or tripping before the repulsion."),
            ("repelling_foot", "Ensure the repelling foot is flat on the ground, with the center of gravity above it."),
            ("knighthood", "Knighthood should be maintained until half of the jump for better posture."),
            ("landing", "Landing should be performed with a sliding technique to ensure stability."),
        ],
        &[
            ("right ankle", "landing"),
            ("left ankle", "landing"),
            ("right knee", "knighthood"),
            ("left knee", "knighthood"),
            ("right hip", "repelling_foot"),
            ("left hip", "repelling_foot"),
            ("right shoulder", "knighthood"),
            ("left shoulder", "knighthood"),
            ("trunk", "repelling_foot"),
            ("pelvis", "knighthood"),
            ("right foot", "run_up"),
            ("left foot", "run_up"),
            ("head", "landing"),
            ("right arm", "repelling_foot"),
            ("left arm", "repelling_foot"),
            ("right forearm", "knighthood"),
            ("left forearm", "knighthood"),
            ("right shank", "repelling_foot"),
            ("left shank", "repelling_foot"),
            ("right thigh", "knighthood"),
            ("left thigh", "knighthood"),
        ],
    )
}

fn shot_put() -> DisciplineFeedback {
    DisciplineFeedback::from_tables(
        &[
            ("glide_phase", "Improve the glide phase by starting from a folded low leg with the back facing the throwing direction."),
            ("accessory_leg", "The accessory leg should be pulled under the pelvis via a flat limp motion."),
            ("release_angle", "The ball should be released at a 45° angle with the arm fully extended."),
        ],
        &[
            ("right ankle", "glide_phase"),
            ("left ankle", "glide_phase"),
            ("right knee", "accessory_leg"),
            ("left knee", "accessory_leg"),
            ("right hip", "glide_phase"),
            ("left hip", "glide_phase"),
            ("right shoulder", "release_angle"),
            ("left shoulder", "release_angle"),
            ("right elbow", "release_angle"),
            ("left elbow", "release_angle"),
            ("right arm", "release_angle"),
            ("left arm", "release_angle"),
            ("right forearm", "release_angle"),
            ("left forearm", "release_angle"),
            ("trunk", "glide_phase"),
            ("pelvis", "glide_phase"),
            ("head", "release_angle"),
            ("right shank", "accessory_leg"),
            ("left shank", "accessory_leg"),
            ("right thigh", "glide_phase"),
            ("left thigh", "glide_phase"),
        ],
    )
}

fn sprint_start() -> DisciplineFeedback {
    DisciplineFeedback::from_tables(
        &[
            ("pelvis_position", "Ensure the pelvis is slightly higher than the shoulders during the 'done' position."),
            ("body_tension", "When pushing out, tense the body like a spear to align the head, back, and repulsive leg."),
            ("toes_claw", "Actively claw at the ground with your toes during the sprint to maximize propulsion."),
        ],
        &[
            ("right ankle", "toes_claw"),
            ("left ankle", "toes_claw"),
            ("right knee", "body_tension"),
            ("left knee", "body_tension"),
            ("right hip", "pelvis_position"),
            ("left hip", "pelvis_position"),
            ("right shoulder", "body_tension"),
            ("left shoulder", "body_tension"),
            ("trunk", "body_tension"),
            ("pelvis", "pelvis_position"),
            ("right foot", "toes_claw"),
            ("left foot", "toes_claw"),
            ("head", "body_tension"),
            ("right arm", "body_tension"),
            ("left arm", "body_tension"),
            ("right forearm", "body_tension"),
            ("left forearm", "body_tension"),
            ("right shank", "toes_claw"),
            ("left shank", "toes_claw"),
            ("right thigh", "body_tension"),
            ("left thigh", "body_tension"),
        ],
    )
}

fn discus_throw() -> DisciplineFeedback {
    DisciplineFeedback::from_tables(
        &[
            ("intro_swing", "During the introductory swing, ensure the throwing arm is behind the full movement."),
            ("jump_turn", "Use a jump turn with the ball of your foot to gain momentum."),
            ("release", "Ensure the discus departs via the index finger for optimal release technique."),
        ],
        &[
            ("right ankle", "jump_turn"),
            ("left ankle", "jump_turn"),
            ("right knee", "jump_turn"),
            ("left knee", "jump_turn"),
            ("right hip", "intro_swing"),
            ("left hip", "intro_swing"),
            ("right shoulder", "intro_swing"),
            ("left shoulder", "intro_swing"),
            ("trunk", "release"),
            ("pelvis", "intro_swing"),
            ("head", "release"),
            ("right foot", "jump_turn"),
            ("left foot", "jump_turn"),
            ("right arm", "release"),
            ("left arm", "release"),
            ("right forearm", "release"),
            ("left forearm", "release"),
            ("right shank", "release"),
            ("left shank", "release"),
            ("right thigh", "jump_turn"),
            ("left thigh", "jump_turn"),
        ],
    )
}
