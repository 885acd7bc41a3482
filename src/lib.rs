// ABOUTME: Main library entry point for the Pierre technique scoring service
// ABOUTME: Wires pose estimation, technique analysis, elaboration, and the HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Technique
//!
//! Scores an athlete's technique from a training video. A pose-estimation
//! tool turns the video into per-frame joint angles; the
//! `technique-intelligence` crate normalizes and scores them with a
//! pre-trained model and produces coaching feedback; an optional LLM pass
//! elaborates the feedback into a paragraph.
//!
//! ## Entry points
//!
//! - `pierre-technique-server`: `POST /upload` (multipart `video` + `discipline`)
//! - `pierre-technique-cli`: evaluate a local video file
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_technique::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Scoring models read from {}", config.models.model_dir.display());
//!     Ok(())
//! }
//! ```

/// Environment-based configuration
pub mod config;

/// Pipeline constants re-exported from technique-core
pub mod constants;

/// Unified error handling re-exported from technique-core
pub mod errors;

/// LLM provider abstraction used for feedback elaboration
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Domain models re-exported from technique-core
pub mod models;

/// Pose-estimation tool collaborator
pub mod pose;

/// HTTP route handlers
pub mod routes;

/// Router assembly and HTTP server lifecycle
pub mod server;

/// Evaluation and elaboration services shared by the server and CLI
pub mod services;
