// ABOUTME: Configuration module for technique-intelligence crate
// ABOUTME: Re-exports weight tables, the feedback catalog, and the validated technique config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Feedback templates and feature-to-category mappings per discipline
pub mod catalog;
/// Configuration error types
pub mod error;
/// Aggregate technique configuration with startup validation
pub mod technique;
/// Physiological importance weights per feature
pub mod weights;

pub use catalog::{DisciplineFeedback, FeedbackCatalog};
pub use error::ConfigError;
pub use technique::{TechniqueConfig, TechniqueLimits, VocabularyReport};
pub use weights::FeatureWeights;
