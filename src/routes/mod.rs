// ABOUTME: Route module organization for the technique scoring HTTP endpoints
// ABOUTME: Health checks and the video upload endpoint, each with thin handlers over services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the technique scoring server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Health check and liveness routes
pub mod health;
/// Video upload and evaluation routes
pub mod upload;

/// Health check route handlers
pub use health::HealthRoutes;
/// Upload route handlers
pub use upload::{UploadResponse, UploadRoutes};
