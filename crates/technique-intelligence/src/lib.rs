// ABOUTME: Technique analysis engine for athlete motion capture
// ABOUTME: Motion loading, normalization, model scoring, contribution ranking and feedback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Technique Intelligence
//!
//! Pure, synchronous analysis of one athlete's motion record:
//!
//! 1. [`motion_record`] parses a pose-tool `.mot` table
//! 2. [`normalizer`] rescales each column into `[0, 1]`
//! 3. [`scorer`] applies a pre-trained [`model::ScoringModel`] per frame
//! 4. [`contribution`] ranks the weakest weighted features
//! 5. [`feedback`] maps them to discipline coaching messages
//!
//! [`analysis::TechniqueAnalyzer`] chains the stages. Domain tables live in
//! [`config::TechniqueConfig`].

/// End-to-end analyzer
pub mod analysis;
/// Weights, feedback catalog and limits
pub mod config;
/// Weighted feature ranking
pub mod contribution;
/// Coaching message generation
pub mod feedback;
/// Scoring model artifacts and registry
pub mod model;
/// Motion file parsing
pub mod motion_record;
/// Min-max normalization
pub mod normalizer;
/// Model application over a record
pub mod scorer;

pub use analysis::TechniqueAnalyzer;
pub use config::{ConfigError, FeatureWeights, FeedbackCatalog, TechniqueConfig};
pub use contribution::{weakest_features, FeatureContribution};
pub use feedback::FeedbackGenerator;
pub use model::{load_model, ModelArtifact, ModelError, ModelRegistry, ScoringModel};
pub use motion_record::{load_motion_record, parse_motion_record, MotionRecord};
pub use normalizer::{normalize, NormalizedMotionRecord};
pub use scorer::score;
