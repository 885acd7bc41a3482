// ABOUTME: Core data models for disciplines, person selection, and per-person score results
// ABOUTME: Shared between the scoring engine, the evaluation service, and both boundaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Core data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::pose_tool::PRIMARY_PERSON_MARKER;
use crate::errors::ScoringError;

/// Athletic discipline with its own scoring model and feedback catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Discipline {
    /// Long jump
    LongJump,
    /// Shot put
    ShotPut,
    /// Sprint start (block start)
    SprintStart,
    /// Discus throw
    DiscusThrow,
}

impl Discipline {
    /// Every configured discipline, in catalog order
    pub const ALL: [Self; 4] = [
        Self::LongJump,
        Self::ShotPut,
        Self::SprintStart,
        Self::DiscusThrow,
    ];

    /// Wire key used by the upload form and the feedback catalog
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LongJump => "long-jump",
            Self::ShotPut => "shot-put",
            Self::SprintStart => "sprint-start",
            Self::DiscusThrow => "discus-throw",
        }
    }

    /// File-name friendly key (`long_jump`), used for default model paths
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::LongJump => "long_jump",
            Self::ShotPut => "shot_put",
            Self::SprintStart => "sprint_start",
            Self::DiscusThrow => "discus_throw",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Discipline {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == key)
            .ok_or_else(|| ScoringError::UnknownDiscipline {
                discipline: key.to_owned(),
            })
    }
}

/// Which detected people are scored from a multi-person pose run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonSelection {
    /// Only the first detected person (`person00`)
    #[default]
    PrimaryAthlete,
    /// Every detected person, for side-by-side comparison
    MultiPerson,
}

impl PersonSelection {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "multi" | "multi_person" | "multi-person" | "all" => Self::MultiPerson,
            _ => Self::PrimaryAthlete,
        }
    }

    /// Marker the file name must contain; `None` accepts any person marker
    #[must_use]
    pub const fn required_marker(self) -> Option<&'static str> {
        match self {
            Self::PrimaryAthlete => Some(PRIMARY_PERSON_MARKER),
            Self::MultiPerson => None,
        }
    }
}

/// Overall score and coaching feedback for one detected person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Person marker from the motion file name (e.g. `person00`)
    pub person_id: String,
    /// Mean of per-frame model predictions, nominally 0-5
    #[serde(rename = "score")]
    pub overall_score: f64,
    /// One to three distinct coaching messages
    pub feedback: Vec<String>,
}

/// Outcome for one person; failures stay local to that person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersonEvaluation {
    /// Person was scored successfully
    Scored(ScoreResult),
    /// Person could not be scored
    Failed {
        /// Person marker from the motion file name
        person_id: String,
        /// Human-readable failure
        error: String,
    },
}

impl PersonEvaluation {
    /// Person marker for either outcome
    #[must_use]
    pub fn person_id(&self) -> &str {
        match self {
            Self::Scored(result) => &result.person_id,
            Self::Failed { person_id, .. } => person_id,
        }
    }

    /// Score result if this person was scored
    #[must_use]
    pub const fn as_scored(&self) -> Option<&ScoreResult> {
        match self {
            Self::Scored(result) => Some(result),
            Self::Failed { .. } => None,
        }
    }
}

/// Everything produced for one uploaded or local video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoEvaluation {
    /// Discipline the video was scored against
    pub discipline: Discipline,
    /// Per-person outcomes in marker order
    pub results: Vec<PersonEvaluation>,
    /// Elaborated paragraph for the primary athlete, when enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elaboration: Option<String>,
    /// When scoring finished
    pub evaluated_at: DateTime<Utc>,
}

impl VideoEvaluation {
    /// Successfully scored people only
    pub fn scored(&self) -> impl Iterator<Item = &ScoreResult> {
        self.results.iter().filter_map(PersonEvaluation::as_scored)
    }
}
