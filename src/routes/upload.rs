// ABOUTME: Route handlers for the multipart video upload and evaluation endpoint
// ABOUTME: Validates form fields, stores the upload in a request-scoped directory, and scores it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Upload routes
//!
//! `POST /upload` accepts a multipart form with a `video` file and a
//! `discipline` text field. Validation happens in a fixed order: both fields
//! present, discipline known, extension allowed. Nothing is scored until all
//! three pass.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{
        multipart::{Field, MultipartError},
        Multipart, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    config::environment::has_allowed_extension,
    errors::{AppError, AppResult, ErrorCode},
    models::{Discipline, PersonEvaluation},
    server::AppState,
};

/// Multipart field carrying the video file
const VIDEO_FIELD: &str = "video";
/// Multipart field carrying the discipline key
const DISCIPLINE_FIELD: &str = "discipline";
/// Name used when the client sends no usable file name
const FALLBACK_FILE_NAME: &str = "upload";

/// Successful evaluation response
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Always `true`
    pub success: bool,
    /// Per-person outcomes
    pub results: Vec<PersonEvaluation>,
    /// Elaborated coaching paragraph for the primary athlete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elaboration: Option<String>,
}

/// Upload routes implementation
pub struct UploadRoutes;

impl UploadRoutes {
    /// Create the upload routes
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/upload", post(Self::handle_upload))
            .with_state(state)
    }

    /// Handle POST /upload - Score an uploaded video
    async fn handle_upload(
        State(state): State<Arc<AppState>>,
        multipart: Multipart,
    ) -> Result<Response, AppError> {
        let request_dir = state.upload.upload_dir.join(Uuid::new_v4().to_string());
        let (video, discipline) = match Self::read_form(multipart, &request_dir).await {
            Ok(form) => form,
            Err(e) => {
                Self::discard(&request_dir).await;
                return Err(e);
            }
        };

        let (video, discipline) = match Self::validate(&state, video, discipline) {
            Ok(valid) => valid,
            Err(e) => {
                Self::discard(&request_dir).await;
                return Err(e);
            }
        };

        info!(
            discipline = %discipline,
            video = %video.display(),
            "Evaluating uploaded video"
        );
        let evaluation = state
            .evaluation
            .evaluate_video(&video, discipline)
            .await?;

        let response = UploadResponse {
            success: true,
            results: evaluation.results,
            elaboration: evaluation.elaboration,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Fields present, then discipline known, then extension allowed
    fn validate(
        state: &AppState,
        video: Option<PathBuf>,
        discipline: Option<String>,
    ) -> AppResult<(PathBuf, Discipline)> {
        let video = video.ok_or_else(|| AppError::missing_field(VIDEO_FIELD))?;
        let discipline = discipline
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| AppError::missing_field(DISCIPLINE_FIELD))?;

        let discipline: Discipline = discipline.parse()?;

        if !has_allowed_extension(&state.upload, &video) {
            warn!(file = %video.display(), "Rejected upload with disallowed extension");
            return Err(AppError::new(
                ErrorCode::InvalidFormat,
                format!(
                    "Invalid file type. Allowed extensions: {}",
                    state.upload.allowed_extensions.join(", ")
                ),
            ));
        }

        Ok((video, discipline))
    }

    async fn read_form(
        mut multipart: Multipart,
        request_dir: &Path,
    ) -> AppResult<(Option<PathBuf>, Option<String>)> {
        let mut video = None;
        let mut discipline = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(&e, "Invalid multipart body"))?
        {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some(VIDEO_FIELD) if video.is_none() => {
                    video = Some(Self::store_video(field, request_dir).await?);
                }
                Some(DISCIPLINE_FIELD) => {
                    discipline = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| multipart_error(&e, "Invalid discipline field"))?,
                    );
                }
                other => debug!(field = ?other, "Ignoring multipart field"),
            }
        }

        Ok((video, discipline))
    }

    async fn store_video(mut field: Field<'_>, request_dir: &Path) -> AppResult<PathBuf> {
        let file_name = sanitize_file_name(field.file_name().unwrap_or_default());
        fs::create_dir_all(request_dir).await?;
        let path = request_dir.join(file_name);

        let mut file = File::create(&path).await?;
        let mut written: usize = 0;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(&e, "Upload interrupted"))?
        {
            written += chunk.len();
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        debug!(path = %path.display(), bytes = written, "Stored uploaded video");

        Ok(path)
    }

    async fn discard(request_dir: &Path) {
        if fs::try_exists(request_dir).await.unwrap_or(false) {
            if let Err(e) = fs::remove_dir_all(request_dir).await {
                warn!(dir = %request_dir.display(), error = %e, "Failed to remove rejected upload");
            }
        }
    }
}

/// A body cut off by the size limit keeps its 413 status
fn multipart_error(error: &MultipartError, context: &str) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::new(ErrorCode::PayloadTooLarge, format!("{context}: {error}"))
    } else {
        AppError::invalid_input(format!("{context}: {error}"))
    }
}

/// Reduce a client-supplied file name to a safe single path component
#[must_use]
pub fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        FALLBACK_FILE_NAME.to_owned()
    } else {
        cleaned.to_owned()
    }
}
