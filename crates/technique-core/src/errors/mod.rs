// ABOUTME: Unified error handling with error codes, HTTP status mapping, and JSON error bodies
// ABOUTME: Bridges the domain ScoringError taxonomy into boundary-facing AppError values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Library code reports failures as [`ScoringError`]; the CLI and HTTP
//! boundaries work with [`AppError`], which carries an [`ErrorCode`] that
//! knows its HTTP status. With the `http-response` feature `AppError`
//! renders itself as `{"success": false, "error": ...}`.

mod scoring;

pub use scoring::ScoringError;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Generic invalid request input
    InvalidInput = 3000,
    /// A required request field is absent
    MissingRequiredField = 3001,
    /// Uploaded file type is not accepted
    InvalidFormat = 3002,
    /// Discipline selector is not configured
    UnknownDiscipline = 3003,
    /// Request body exceeds the upload size limit
    PayloadTooLarge = 3004,

    // Resource Management (4000-4999)
    /// Input video or other resource does not exist
    ResourceNotFound = 4000,
    /// Pose tool produced no usable motion file
    NoMotionFile = 4001,
    /// Motion file body cannot be parsed into a table
    InvalidMotionData = 4002,

    // External Services (5000-5999)
    /// External collaborator (pose tool, LLM endpoint) failed
    ExternalServiceError = 5000,

    // Model (7000-7999)
    /// Scoring model could not be loaded
    ModelLoadFailed = 7000,
    /// Scoring model rejected its input
    ModelInvocationFailed = 7001,

    // Configuration (6000-6999)
    /// Configuration is invalid or incomplete
    ConfigError = 6000,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    InternalError = 9000,
    /// Request did not complete within the server timeout
    RequestTimeout = 9001,
    /// Filesystem write or read failed
    StorageError = 9002,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            // 400 Bad Request
            Self::InvalidInput
            | Self::MissingRequiredField
            | Self::InvalidFormat
            | Self::UnknownDiscipline => 400,

            // 404 Not Found
            Self::ResourceNotFound => 404,

            // 408 Request Timeout
            Self::RequestTimeout => 408,

            // 413 Payload Too Large
            Self::PayloadTooLarge => 413,

            // 422 Unprocessable Entity
            Self::NoMotionFile | Self::InvalidMotionData | Self::ModelInvocationFailed => 422,

            // 502 Bad Gateway
            Self::ExternalServiceError => 502,

            // 500 Internal Server Error
            Self::ModelLoadFailed | Self::ConfigError | Self::InternalError | Self::StorageError => {
                500
            }
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::InvalidFormat => "The uploaded file type is not supported",
            Self::UnknownDiscipline => "The requested discipline is not supported",
            Self::PayloadTooLarge => "The uploaded file exceeds the size limit",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::NoMotionFile => "No motion data was produced for the video",
            Self::InvalidMotionData => "The motion data could not be parsed",
            Self::ExternalServiceError => "An external service failed",
            Self::ModelLoadFailed => "The scoring model could not be loaded",
            Self::ModelInvocationFailed => "The scoring model rejected the motion data",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal server error occurred",
            Self::RequestTimeout => "The request timed out",
            Self::StorageError => "Storage operation failed",
        }
    }
}

/// Unified error type for the application boundaries
#[derive(Debug)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Required field missing
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {field}"),
        )
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// External service failure, tagged with the service name
    #[must_use]
    pub fn external_service(service: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{service}: {}", message.into()),
        )
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Storage error
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn Error + 'static))
    }
}

impl From<ScoringError> for AppError {
    fn from(error: ScoringError) -> Self {
        Self::new(error.code(), error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false` for error bodies
    pub success: bool,
    /// Human-readable error message
    pub error: String,
    /// Machine-readable error code
    pub code: ErrorCode,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            success: false,
            error: error.message.clone(),
            code: error.code,
        }
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
        tracing::debug!(code = ?self.code, status = %status, "Rendering error response");
        (status, axum::Json(ErrorResponse::from(&self))).into_response()
    }
}
