// ABOUTME: Domain error taxonomy for the video scoring pipeline
// ABOUTME: Separates fatal per-request failures by stage so boundaries can map them precisely
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::PathBuf;

use super::ErrorCode;

/// Failures raised by the scoring pipeline and its collaborators.
///
/// Every variant is fatal for the video (or person) being processed. The
/// feedback elaboration stage never produces one of these; it degrades to
/// placeholder text instead.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    /// Input video path does not exist
    #[error("Video file not found: {}", .path.display())]
    VideoNotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// External pose-estimation tool failed to run or exited non-zero
    #[error("Pose tool '{program}' failed{}: {reason}", exit_status_suffix(.status))]
    PoseToolExecution {
        /// Program that was invoked
        program: String,
        /// Exit status reported by the tool, if it ran at all
        status: Option<i32>,
        /// Captured stderr tail or spawn error
        reason: String,
    },

    /// Pose tool output contains no motion file matching the expected pattern
    #[error("No motion files matching '{marker}' found in {}", .directory.display())]
    NoMotionFile {
        /// Directory that was searched
        directory: PathBuf,
        /// Person marker or pattern that was expected
        marker: String,
    },

    /// Motion file cannot be parsed into a rectangular numeric table
    #[error("Invalid motion file {source_name}: {reason}")]
    FileFormat {
        /// File path or stream label
        source_name: String,
        /// What made the file unparseable
        reason: String,
    },

    /// Scoring model file is missing, unreadable or inconsistent
    #[error("Failed to load scoring model {}: {reason}", .path.display())]
    ModelLoad {
        /// Model artifact path
        path: PathBuf,
        /// Why loading failed
        reason: String,
    },

    /// Scoring model rejected the reindexed feature table
    #[error("Scoring model rejected input: {reason}")]
    ModelInvocation {
        /// Why the model rejected the input
        reason: String,
    },

    /// Discipline selector does not map to a configured model and catalog
    #[error("Invalid discipline: {discipline}")]
    UnknownDiscipline {
        /// Selector that was received
        discipline: String,
    },
}

#[allow(clippy::ref_option)] // thiserror hands fields over by reference
fn exit_status_suffix(status: &Option<i32>) -> String {
    status.map_or_else(String::new, |code| format!(" with exit status {code}"))
}

impl ScoringError {
    /// Error code used when this failure crosses a boundary
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::VideoNotFound { .. } => ErrorCode::ResourceNotFound,
            Self::PoseToolExecution { .. } => ErrorCode::ExternalServiceError,
            Self::NoMotionFile { .. } => ErrorCode::NoMotionFile,
            Self::FileFormat { .. } => ErrorCode::InvalidMotionData,
            Self::ModelLoad { .. } => ErrorCode::ModelLoadFailed,
            Self::ModelInvocation { .. } => ErrorCode::ModelInvocationFailed,
            Self::UnknownDiscipline { .. } => ErrorCode::UnknownDiscipline,
        }
    }

    /// Build a `FileFormat` error
    pub fn file_format(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FileFormat {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Build a `ModelLoad` error
    pub fn model_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ModelLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build a `ModelInvocation` error
    pub fn model_invocation(reason: impl Into<String>) -> Self {
        Self::ModelInvocation {
            reason: reason.into(),
        }
    }
}
