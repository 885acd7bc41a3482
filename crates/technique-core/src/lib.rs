// ABOUTME: Core types and constants for the Pierre technique scoring platform
// ABOUTME: Foundation crate with error handling, disciplines, and score result models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Technique Core
//!
//! Foundation crate providing shared types and constants for technique scoring.
//! This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: `ScoringError` taxonomy plus the unified `AppError`/`ErrorCode`
//! - **constants**: Pipeline constants (header skip, feedback limits, placeholders)
//! - **models**: `Discipline`, `PersonSelection`, `ScoreResult` and friends

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models shared by the scoring engine and its boundaries
pub mod models;
