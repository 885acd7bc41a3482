// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides the plain-text liveness root and the JSON health endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use crate::constants::service_names;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes() -> axum::Router {
        use axum::{routing::get, Json, Router};

        async fn root_handler() -> &'static str {
            "Pierre technique scoring server is running."
        }

        async fn health_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "healthy",
                "service": service_names::TECHNIQUE_SERVER,
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_handler))
    }
}
