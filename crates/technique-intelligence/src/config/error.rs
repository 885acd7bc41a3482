// ABOUTME: Configuration error types for technique configuration validation
// ABOUTME: Defines error variants for incomplete catalogs, bad weights, and unreadable overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for technique configuration validation.

use std::io;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A feature maps to a category with no message for that discipline
    #[error("Discipline '{discipline}' maps feature '{feature}' to unknown category '{category}'")]
    MissingCategory {
        /// Discipline key
        discipline: String,
        /// Feature name
        feature: String,
        /// Category key without a message
        category: String,
    },

    /// A discipline has templates but no feature mapping, or vice versa
    #[error("Discipline '{0}' is missing either its templates or its feature mapping")]
    IncompleteDiscipline(String),

    /// Weight is zero, negative, or not finite
    #[error("Invalid weight {weight} for feature '{feature}': weights must be positive")]
    InvalidWeight {
        /// Feature name
        feature: String,
        /// Offending weight
        weight: f64,
    },

    /// Vocabulary contains features the weight table does not cover
    #[error("Feature vocabulary has no weights for: {}", .0.join(", "))]
    UnweightedVocabulary(Vec<String>),

    /// Numeric limit outside its valid range
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),

    /// Override file could not be read
    #[error("Failed to read technique config: {0}")]
    Io(#[from] io::Error),

    /// Override file is not valid JSON for the expected shape
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
