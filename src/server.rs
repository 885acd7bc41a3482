// ABOUTME: HTTP server assembly with shared state, middleware layers, and graceful shutdown
// ABOUTME: Loads models and technique tables once at startup and serves the upload router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server
//!
//! Startup order: validate configuration, load the technique tables, preload
//! every discipline's scoring model, then bind. Models and tables are
//! immutable afterwards and shared by `Arc` across requests.

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::future;
use std::sync::Arc;
use std::time::Duration;
use technique_intelligence::{ModelRegistry, TechniqueAnalyzer};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::{ServerConfig, UploadConfig};
use crate::errors::{AppError, ErrorCode};
use crate::models::Discipline;
use crate::pose::Sports2dRunner;
use crate::routes::{HealthRoutes, UploadRoutes};
use crate::services::{EvaluationService, FeedbackElaborator};

/// State shared by every request handler
#[derive(Clone)]
pub struct AppState {
    /// Evaluation pipeline
    pub evaluation: EvaluationService,
    /// Upload handling settings
    pub upload: UploadConfig,
}

impl AppState {
    /// Build the state from configuration, preloading every scoring model
    ///
    /// # Errors
    ///
    /// Returns an error if the technique tables are invalid or a model
    /// artifact exists but cannot be loaded
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let registry = ModelRegistry::load_all(config.models.model_paths())
            .context("Failed to load scoring models")?;
        if registry.is_empty() {
            warn!(
                model_dir = %config.models.model_dir.display(),
                "No scoring models found; every upload will be rejected"
            );
        } else {
            info!(
                disciplines = ?registry.disciplines().map(Discipline::as_str).collect::<Vec<_>>(),
                "Scoring models loaded"
            );
        }

        Ok(Self {
            evaluation: evaluation_service(config, registry)?,
            upload: config.upload.clone(),
        })
    }
}

/// Assemble the evaluation pipeline around an already-loaded model registry
///
/// # Errors
///
/// Returns an error if the technique tables are invalid or the elaboration
/// client cannot be created
pub fn evaluation_service(
    config: &ServerConfig,
    registry: ModelRegistry,
) -> Result<EvaluationService> {
    let technique = config.load_technique_config()?;
    let elaborator = FeedbackElaborator::from_config(&config.elaboration)
        .context("Failed to create elaboration client")?;

    Ok(EvaluationService::new(
        TechniqueAnalyzer::new(Arc::new(technique)),
        Arc::new(registry),
        Arc::new(Sports2dRunner::from_config(&config.pose)),
    )
    .with_selection(config.pose.person_selection)
    .with_elaborator(elaborator))
}

/// Build the full router with middleware
pub fn build_router(state: Arc<AppState>) -> Router {
    let max_body = state.upload.max_upload_bytes;
    let timeout = Duration::from_secs(state.upload.request_timeout_secs);

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(UploadRoutes::routes(state))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::map_response(render_layer_rejection))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Give size-limit and timeout rejections the same JSON body as handler errors
async fn render_layer_rejection(response: Response) -> Response {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|value| value.as_bytes().starts_with(b"application/json"));
    if is_json {
        return response;
    }

    match response.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::new(
            ErrorCode::PayloadTooLarge,
            "Request body exceeds the upload size limit",
        )
        .into_response(),
        StatusCode::REQUEST_TIMEOUT => AppError::new(
            ErrorCode::RequestTimeout,
            "Request did not complete within the server timeout",
        )
        .into_response(),
        _ => response,
    }
}

/// Bind and serve until Ctrl+C
///
/// # Errors
///
/// Returns an error if startup fails or the listener cannot be bound
pub async fn run(config: ServerConfig) -> Result<()> {
    config.validate()?;
    let state = Arc::new(AppState::from_config(&config)?);
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.http_port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Technique scoring server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        future::pending::<()>().await;
    }
    info!("Shutting down...");
}
