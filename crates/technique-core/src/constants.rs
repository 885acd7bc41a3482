// ABOUTME: Pipeline constants for motion parsing, feedback limits, and user-facing placeholder text
// ABOUTME: Pure data constants shared by the scoring engine, CLI, and upload service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by the pipeline stage that owns them.

/// Motion file layout produced by the pose-estimation tool
pub mod motion {
    /// Header lines preceding the column row in a `.mot` file
    pub const DEFAULT_HEADER_LINES: usize = 10;
    /// Non-feature column dropped on load
    pub const TIME_COLUMN: &str = "time";
    /// Field delimiter
    pub const DELIMITER: u8 = b'\t';
    /// Motion file extension
    pub const MOTION_FILE_EXTENSION: &str = "mot";
}

/// Pose tool output naming conventions
pub mod pose_tool {
    /// Default program name on `PATH`
    pub const DEFAULT_PROGRAM: &str = "sports2d";
    /// Suffix appended to the video stem to form the output directory
    pub const OUTPUT_DIR_SUFFIX: &str = "_Sports2D";
    /// Marker of the first detected person
    pub const PRIMARY_PERSON_MARKER: &str = "person00";
    /// Prefix shared by all per-person markers
    pub const PERSON_MARKER_PREFIX: &str = "person";
    /// Default keypoint likelihood threshold
    pub const DEFAULT_KEYPOINT_THRESHOLD: f64 = 0.5;
}

/// Feature analysis and feedback limits
pub mod feedback {
    /// Number of weakest features selected for feedback
    pub const WEAKEST_FEATURE_COUNT: usize = 3;
    /// Maximum number of coaching messages returned
    pub const MAX_FEEDBACK_MESSAGES: usize = 3;
    /// Weight used for columns missing from the weight table
    pub const DEFAULT_FEATURE_WEIGHT: f64 = 1.0;
    /// Message returned when no weak feature maps to a coaching category
    pub const FALLBACK_MESSAGE: &str =
        "Great job overall, but keep working on improving your technique.";
    /// Elaboration text used whenever the text-generation call fails
    pub const ELABORATION_PLACEHOLDER: &str = "Error generating feedback.";
}

/// Score presentation
pub mod scoring {
    /// Upper end of the nominal score range
    pub const NOMINAL_MAX_SCORE: f64 = 5.0;
}

/// Service names for logging
pub mod service_names {
    /// HTTP upload service
    pub const TECHNIQUE_SERVER: &str = "pierre-technique-server";
    /// Command-line evaluator
    pub const TECHNIQUE_CLI: &str = "pierre-technique-cli";
}
